//! Test-only, in-memory canvas and provider doubles shared by unit and
//! behaviour tests.

use geo::{Coord, Rect};

use crate::canvas::{
    AcquireError, MapCanvas, MapProvider, MarkerHandle, MarkerStyle, PopupHandle, Viewport,
};

/// In-memory [`MapCanvas`] that records every interaction.
///
/// Markers and popups live in insertion order until removed, so tests can
/// assert exactly which visuals survive a sequence of operations.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    next_handle: u64,
    markers: Vec<MarkerHandle>,
    popups: Vec<(PopupHandle, MarkerHandle, String)>,
    center: Option<Coord<f64>>,
    zoom: Option<u8>,
    search_bounds: Option<Rect<f64>>,
    search_clears: usize,
    released: bool,
}

impl RecordingCanvas {
    /// Create a canvas showing `viewport`.
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            center: Some(viewport.center),
            zoom: Some(viewport.zoom),
            ..Self::default()
        }
    }

    /// Markers currently drawn, oldest first.
    pub fn live_markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    /// Popups currently attached, oldest first.
    pub fn live_popups(&self) -> Vec<PopupHandle> {
        self.popups.iter().map(|(popup, _, _)| *popup).collect()
    }

    /// Content of an attached popup, if it is still live.
    pub fn popup_content(&self, popup: PopupHandle) -> Option<&str> {
        self.popups
            .iter()
            .find(|(handle, _, _)| *handle == popup)
            .map(|(_, _, content)| content.as_str())
    }

    /// Last centre the canvas was panned to.
    pub fn center(&self) -> Option<Coord<f64>> {
        self.center
    }

    /// Last zoom level applied.
    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    /// Last search bias supplied via `set_search_bounds`.
    pub fn search_bounds(&self) -> Option<Rect<f64>> {
        self.search_bounds
    }

    /// Number of times the search input was cleared.
    pub fn search_clears(&self) -> usize {
        self.search_clears
    }

    /// Whether `release` was called.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl MapCanvas for RecordingCanvas {
    fn place_marker(&mut self, _location: Coord<f64>, _style: &MarkerStyle) -> MarkerHandle {
        self.next_handle += 1;
        let marker = MarkerHandle::new(self.next_handle);
        self.markers.push(marker);
        marker
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.retain(|live| *live != marker);
    }

    fn attach_popup(&mut self, marker: MarkerHandle, content: &str) -> PopupHandle {
        self.next_handle += 1;
        let popup = PopupHandle::new(self.next_handle);
        self.popups.push((popup, marker, content.to_owned()));
        popup
    }

    fn close_popup(&mut self, popup: PopupHandle) {
        self.popups.retain(|(live, _, _)| *live != popup);
    }

    fn pan_to(&mut self, center: Coord<f64>) {
        self.center = Some(center);
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = Some(zoom);
    }

    fn set_search_bounds(&mut self, bounds: Rect<f64>) {
        self.search_bounds = Some(bounds);
    }

    fn clear_search_input(&mut self) {
        self.search_clears += 1;
    }

    fn release(&mut self) {
        self.markers.clear();
        self.popups.clear();
        self.released = true;
    }
}

/// Provider handing out a fresh [`RecordingCanvas`] on every acquisition.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    acquisitions: usize,
}

impl RecordingProvider {
    /// Number of successful acquisitions so far.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions
    }
}

impl MapProvider for RecordingProvider {
    type Canvas = RecordingCanvas;

    fn acquire(&mut self, viewport: &Viewport) -> Result<Self::Canvas, AcquireError> {
        self.acquisitions += 1;
        Ok(RecordingCanvas::new(viewport))
    }
}

/// Provider whose host surface never attaches; acquisition always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct MissingTargetProvider;

impl MapProvider for MissingTargetProvider {
    type Canvas = RecordingCanvas;

    fn acquire(&mut self, _viewport: &Viewport) -> Result<Self::Canvas, AcquireError> {
        Err(AcquireError::MissingTarget)
    }
}
