//! Core domain types for the Itinera itinerary engine.
//!
//! The engine tracks an ordered itinerary of user-selected places and the
//! opaque handles tying each place to its visuals on an external map. The
//! map itself is reached only through the [`MapCanvas`] and [`MapProvider`]
//! capability traits, so any mapping SDK (or a test double) can back it.

#![forbid(unsafe_code)]

mod canvas;
mod itinerary;
mod place;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use canvas::{
    AcquireError, MapCanvas, MapProvider, MarkerHandle, MarkerIcon, MarkerStyle, PopupHandle,
    Viewport,
};
pub use itinerary::{DuplicatePlace, Itinerary, ReorderError};
pub use place::{Place, PlaceCandidate, PlaceId};
