//! Capability surface for the external map and its search box.
//!
//! The engine consumes a mapping SDK only through these traits; nothing in
//! the crate depends on a concrete implementation. Markers and popups are
//! identified by opaque handles issued by the canvas. The handles behave
//! like tokens into an external rendering system: the session stores them
//! and releases them explicitly, nothing is garbage collected.

use geo::{Coord, Rect};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a marker drawn on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    /// Wrap a raw handle value issued by a canvas.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw handle value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Handle to a detail popup bound to a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupHandle(u64);

impl PopupHandle {
    /// Wrap a raw handle value issued by a canvas.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw handle value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Map viewport: centre plus zoom level.
///
/// The centre is WGS84 with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// Centre of the visible area.
    pub center: Coord<f64>,
    /// Zoom level, larger is closer.
    pub zoom: u8,
}

/// Custom marker imagery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    /// Location of the icon resource.
    pub url: String,
    /// Rendered width in pixels.
    pub width: u32,
    /// Rendered height in pixels.
    pub height: u32,
}

/// Presentation for markers placed by the session.
///
/// The canvas interprets these hints; a headless canvas may ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Icon to draw instead of the canvas default.
    pub icon: Option<MarkerIcon>,
    /// Whether the marker drops in with an animation.
    pub animated: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon: None,
            animated: true,
        }
    }
}

/// Errors returned by [`MapProvider::acquire`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    /// The rendering surface or search input is not attached yet.
    #[error("map container or search input is not attached")]
    MissingTarget,
    /// The external mapping resource failed to load.
    #[error("map capability failed to load: {reason}")]
    LoadFailed {
        /// Provider-specific description of the failure.
        reason: String,
    },
}

/// Rendering and search surface of an interactive map.
///
/// Implementations bridge to a concrete SDK. All methods are infallible:
/// the interaction layer treats the canvas as always willing, and a
/// degraded canvas should swallow calls rather than panic.
pub trait MapCanvas {
    /// Draw a marker at `location` and return its handle.
    fn place_marker(&mut self, location: Coord<f64>, style: &MarkerStyle) -> MarkerHandle;

    /// Remove a previously placed marker. Unknown handles are ignored.
    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Create a detail popup bound to `marker`.
    ///
    /// The popup must stay closed until the user interacts with the
    /// marker; the canvas owns the open/close mechanics.
    fn attach_popup(&mut self, marker: MarkerHandle, content: &str) -> PopupHandle;

    /// Close and discard a popup. Unknown handles are ignored.
    fn close_popup(&mut self, popup: PopupHandle);

    /// Re-centre the visible area.
    fn pan_to(&mut self, center: Coord<f64>);

    /// Change the zoom level.
    fn set_zoom(&mut self, zoom: u8);

    /// Bias search results towards `bounds`, typically the visible area.
    fn set_search_bounds(&mut self, bounds: Rect<f64>);

    /// Erase any text in the search input.
    fn clear_search_input(&mut self);

    /// Tear down the external surface. Must be idempotent.
    fn release(&mut self);
}

/// Acquire a [`MapCanvas`] bound to the host surface.
///
/// Acquisition stands in for the asynchronous load of an external mapping
/// resource. It is attempted once per session mount; a failure leaves the
/// session detached and every operation a no-op, so a missing host surface
/// never crashes the interaction.
pub trait MapProvider {
    /// Canvas type produced on success.
    type Canvas: MapCanvas;

    /// Attempt to bind a canvas showing `viewport`.
    fn acquire(&mut self, viewport: &Viewport) -> Result<Self::Canvas, AcquireError>;
}
