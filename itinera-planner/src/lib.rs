//! Map/search adapter and reorder controller for the Itinera engine.
//!
//! [`PlannerSession`] bridges an external mapping capability to the
//! itinerary list state: search selections append places, list controls
//! remove or clear them, and drag gestures reorder them. All mutations run
//! on discrete, non-overlapping event callbacks; anomalies degrade to
//! logged no-ops rather than crashing the interaction.

#![forbid(unsafe_code)]

mod config;
mod drag;
mod event;
mod ids;
mod session;

pub use config::PlannerConfig;
pub use drag::{DragOutcome, Interaction};
pub use event::PlannerEvent;
pub use ids::PlaceIdAllocator;
pub use session::PlannerSession;
