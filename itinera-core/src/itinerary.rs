//! Ordered itinerary state.
//!
//! The itinerary is the single source of truth for the user's selected
//! places and their visit order. Mutations keep ids unique and report
//! anomalies as values; nothing here panics on bad input.

use thiserror::Error;

use crate::place::{Place, PlaceId};

/// Error returned by [`Itinerary::append`] when the id is already listed.
///
/// Carries the rejected place back so the caller can release its marker
/// and popup handles instead of leaking them.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("place id {} is already in the itinerary", .0.id)]
pub struct DuplicatePlace(pub Place);

/// Errors returned by [`Itinerary::move_place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// The source index does not name a current entry.
    #[error("source index {index} is out of range for length {len}")]
    SourceOutOfRange {
        /// Offending index.
        index: usize,
        /// Itinerary length at the time of the call.
        len: usize,
    },
    /// The destination index does not name a current position.
    #[error("destination index {index} is out of range for length {len}")]
    DestinationOutOfRange {
        /// Offending index.
        index: usize,
        /// Itinerary length at the time of the call.
        len: usize,
    },
}

/// The ordered sequence of places the user plans to visit.
///
/// Insertion order is significant: it is both the display order and the
/// travel order. No two entries ever share an id.
///
/// # Examples
/// ```
/// use itinera_core::{Itinerary, MarkerHandle, Place, PlaceId, PopupHandle};
///
/// let mut itinerary = Itinerary::new();
/// let museum = Place::new(
///     PlaceId::new(1),
///     "Museum",
///     "1 Main St",
///     MarkerHandle::new(10),
///     PopupHandle::new(11),
/// );
/// itinerary.append(museum)?;
/// assert_eq!(itinerary.len(), 1);
/// # Ok::<(), itinera_core::DuplicatePlace>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    places: Vec<Place>,
}

impl Itinerary {
    /// Construct an empty itinerary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current places in visit order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Ids of the current places, in visit order.
    pub fn ids(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.places.iter().map(|place| place.id)
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the itinerary holds no places.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Whether a place with `id` is listed.
    pub fn contains(&self, id: PlaceId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a place by id.
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    /// Append a place at the end of the itinerary.
    ///
    /// Rejects a duplicate id, handing the place back inside the error so
    /// its canvas handles can be released.
    pub fn append(&mut self, place: Place) -> Result<(), DuplicatePlace> {
        if self.contains(place.id) {
            return Err(DuplicatePlace(place));
        }
        self.places.push(place);
        Ok(())
    }

    /// Remove the place with `id`, returning it.
    ///
    /// Returns `None` when no such place is listed; removing an unknown or
    /// already-removed id is not an error.
    pub fn remove(&mut self, id: PlaceId) -> Option<Place> {
        let position = self.places.iter().position(|place| place.id == id)?;
        Some(self.places.remove(position))
    }

    /// Move the place at `source` so it occupies `destination`.
    ///
    /// This is a single-element move, not a swap: the element is lifted
    /// out and reinserted, shifting the places in between by one position.
    /// Both indices must name current positions.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::{Itinerary, MarkerHandle, Place, PlaceId, PopupHandle};
    ///
    /// let mut itinerary = Itinerary::new();
    /// for (raw, name) in [(1, "A"), (2, "B"), (3, "C")] {
    ///     let place = Place::new(
    ///         PlaceId::new(raw),
    ///         name,
    ///         "",
    ///         MarkerHandle::new(raw),
    ///         PopupHandle::new(raw),
    ///     );
    ///     itinerary.append(place)?;
    /// }
    /// itinerary.move_place(0, 2).expect("indices are in range");
    /// let names: Vec<_> = itinerary.places().iter().map(|p| p.name.as_str()).collect();
    /// assert_eq!(names, ["B", "C", "A"]);
    /// # Ok::<(), itinera_core::DuplicatePlace>(())
    /// ```
    pub fn move_place(&mut self, source: usize, destination: usize) -> Result<(), ReorderError> {
        let len = self.places.len();
        if source >= len {
            return Err(ReorderError::SourceOutOfRange { index: source, len });
        }
        if destination >= len {
            return Err(ReorderError::DestinationOutOfRange {
                index: destination,
                len,
            });
        }
        let place = self.places.remove(source);
        self.places.insert(destination, place);
        Ok(())
    }

    /// Drop every place.
    pub fn clear(&mut self) {
        self.places.clear();
    }
}
