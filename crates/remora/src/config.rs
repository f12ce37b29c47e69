use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Screen-space capture radius used when nothing else is configured.
pub const DEFAULT_CAPTURE_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Auto-align toggle. When off, drags are never snapped and no guide is drawn.
    pub enabled: bool,
    /// Capture radius in screen pixels; divided by `zoom_ratio` to get canvas units.
    pub capture_radius: f64,
    pub zoom_ratio: f64,
    /// Offer the work area's own bounding-box points as alignment targets.
    pub include_workarea: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capture_radius: DEFAULT_CAPTURE_RADIUS,
            zoom_ratio: 1.0,
            include_workarea: true,
        }
    }
}

impl SnapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SnapConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: SnapConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.capture_radius.is_finite() && self.capture_radius >= 0.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "captureRadius must be a finite, non-negative number (got {})",
                    self.capture_radius
                ),
            });
        }
        if !(self.zoom_ratio.is_finite() && self.zoom_ratio > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "zoomRatio must be a finite, positive number (got {})",
                    self.zoom_ratio
                ),
            });
        }
        Ok(())
    }

    /// Capture radius in canvas units, so snapping feels the same at every zoom level.
    pub fn effective_capture_radius(&self) -> f64 {
        self.capture_radius / self.zoom_ratio
    }
}
