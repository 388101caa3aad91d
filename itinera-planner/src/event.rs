//! External-event messages dispatched to the session.

use geo::Rect;
use itinera_core::{PlaceCandidate, PlaceId};

use crate::drag::DragOutcome;

/// One external callback, delivered to
/// [`PlannerSession::handle`](crate::PlannerSession::handle).
///
/// Events arrive on a single-threaded queue and each is processed to
/// completion before the next, so handlers never observe a half-applied
/// mutation and the itinerary needs no locking.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerEvent {
    /// The search box committed a batch of candidate places.
    PlacesSelected(Vec<PlaceCandidate>),
    /// A list entry's remove control was activated.
    RemovePlace(PlaceId),
    /// The clear-all control was activated.
    ClearAll,
    /// The map viewport moved; search biasing follows it.
    ViewportChanged(Rect<f64>),
    /// A drag gesture picked up the entry at `index`.
    DragStarted {
        /// Position the gesture started from.
        index: usize,
    },
    /// A drag gesture finished.
    DragEnded(DragOutcome),
}
