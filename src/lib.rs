//! Facade crate for the Itinera itinerary-planning engine.
//!
//! This crate re-exports the core domain types and the planner session so
//! embedders depend on a single crate. The mapping and drag-and-drop
//! capabilities stay behind the [`MapCanvas`] and [`MapProvider`] traits;
//! host applications implement them for their SDK of choice.

#![forbid(unsafe_code)]

pub use itinera_core::{
    AcquireError, DuplicatePlace, Itinerary, MapCanvas, MapProvider, MarkerHandle, MarkerIcon,
    MarkerStyle, Place, PlaceCandidate, PlaceId, PopupHandle, ReorderError, Viewport,
};

pub use itinera_planner::{
    DragOutcome, Interaction, PlaceIdAllocator, PlannerConfig, PlannerEvent, PlannerSession,
};
