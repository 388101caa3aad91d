//! Session configuration.

use geo::Coord;
use itinera_core::{MarkerStyle, Viewport};

/// Initial viewport centre: New York.
const DEFAULT_CENTER: Coord<f64> = Coord {
    x: -74.006,
    y: 40.7128,
};

/// Initial zoom level, city scale.
const DEFAULT_ZOOM: u8 = 12;

/// Zoom applied when focusing a newly added place, street scale.
const DEFAULT_FOCUS_ZOOM: u8 = 15;

/// Configuration for [`PlannerSession`](crate::PlannerSession).
///
/// # Examples
/// ```
/// use itinera_planner::PlannerConfig;
///
/// let config = PlannerConfig::new().with_focus_zoom(17);
/// assert_eq!(config.focus_zoom, 17);
/// assert_eq!(config.initial_viewport.zoom, 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Viewport requested at canvas acquisition.
    pub initial_viewport: Viewport,
    /// Zoom applied after a selection adds at least one place.
    pub focus_zoom: u8,
    /// Presentation for markers the session places.
    pub marker_style: MarkerStyle,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            initial_viewport: Viewport {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            marker_style: MarkerStyle::default(),
        }
    }
}

impl PlannerConfig {
    /// Create a configuration with the default viewport and zooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport requested at acquisition.
    #[must_use]
    pub fn with_initial_viewport(mut self, viewport: Viewport) -> Self {
        self.initial_viewport = viewport;
        self
    }

    /// Set the zoom applied when focusing a newly added place.
    #[must_use]
    pub fn with_focus_zoom(mut self, zoom: u8) -> Self {
        self.focus_zoom = zoom;
        self
    }

    /// Set the marker presentation.
    #[must_use]
    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.marker_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::MarkerIcon;

    #[test]
    fn defaults_match_the_widget_viewport() {
        let config = PlannerConfig::default();
        assert_eq!(config.initial_viewport.center, DEFAULT_CENTER);
        assert_eq!(config.initial_viewport.zoom, 12);
        assert_eq!(config.focus_zoom, 15);
    }

    #[test]
    fn builders_chain() {
        let style = MarkerStyle {
            icon: Some(MarkerIcon {
                url: "https://example.com/pin.png".into(),
                width: 40,
                height: 40,
            }),
            animated: false,
        };
        let config = PlannerConfig::new()
            .with_focus_zoom(16)
            .with_marker_style(style.clone())
            .with_initial_viewport(Viewport {
                center: Coord { x: 0.0, y: 51.5 },
                zoom: 9,
            });
        assert_eq!(config.focus_zoom, 16);
        assert_eq!(config.marker_style, style);
        assert_eq!(config.initial_viewport.zoom, 9);
    }
}
