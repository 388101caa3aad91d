use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::canvas::{MarkerHandle, PopupHandle};

/// Identifier for a place within an itinerary.
///
/// Ids are opaque and unique for the lifetime of a session. They are
/// assigned when a place is created and never reused, so rapid successive
/// selections cannot collide.
///
/// # Examples
/// ```
/// use itinera_core::PlaceId;
///
/// let id = PlaceId::new(7);
/// assert_eq!(id.as_u64(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceId(u64);

impl PlaceId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw id value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A search result reported by the mapping capability.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
/// `location` is absent when the provider could not resolve the candidate
/// to a geographic position; such candidates never enter the itinerary.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::PlaceCandidate;
///
/// let hit = PlaceCandidate::located("Museum", "1 Main St", Coord { x: -74.0, y: 40.7 });
/// assert!(hit.location.is_some());
///
/// let miss = PlaceCandidate::unresolved("Atlantis", "");
/// assert!(miss.location.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceCandidate {
    /// Display name of the candidate.
    pub name: String,
    /// Formatted address; may be empty.
    pub address: String,
    /// Geographic position, when the provider resolved one.
    pub location: Option<Coord<f64>>,
}

impl PlaceCandidate {
    /// Construct a candidate with a resolved location.
    pub fn located(
        name: impl Into<String>,
        address: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            location: Some(location),
        }
    }

    /// Construct a candidate the provider could not pin to a position.
    pub fn unresolved(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            location: None,
        }
    }
}

/// One stop in the itinerary.
///
/// The marker and popup handles reference visuals owned by the map canvas;
/// the session releases them when the place is removed or the itinerary is
/// cleared. A listed place always has live handles.
///
/// # Examples
/// ```
/// use itinera_core::{MarkerHandle, Place, PlaceId, PopupHandle};
///
/// let place = Place::new(
///     PlaceId::new(1),
///     "Museum",
///     "1 Main St",
///     MarkerHandle::new(10),
///     PopupHandle::new(20),
/// );
/// assert_eq!(place.name, "Museum");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Unique identifier assigned at creation.
    pub id: PlaceId,
    /// Display label.
    pub name: String,
    /// Formatted address; may be empty.
    pub address: String,
    /// Marker drawn for this place on the canvas.
    pub marker: MarkerHandle,
    /// Detail popup bound to the marker.
    pub popup: PopupHandle,
}

impl Place {
    /// Construct a place from its display fields and canvas handles.
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        address: impl Into<String>,
        marker: MarkerHandle,
        popup: PopupHandle,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            marker,
            popup,
        }
    }
}
