//! Directional distance histogram over a horizontal sweep band.
//!
//! A cheap alternative to full blob extraction: sweep a band of rows around
//! the middle of the frame and record, per horizontal angular sector, the
//! closest range seen in that direction. Avoidance strategies that only
//! steer in yaw consume this directly.

use serde::{Deserialize, Serialize};

use crate::detect::Detector;
use crate::frame::{DepthFrame, DepthSource};

/// Polar-histogram detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarHistConfig {
    /// Angular width of one histogram sector (radians).
    pub angle_step_rad: f64,
    /// Half-height of the swept row band around the middle row (pixels).
    pub vertical_sweep_px: usize,
}

impl Default for PolarHistConfig {
    fn default() -> Self {
        Self {
            angle_step_rad: 5.0_f64.to_radians(),
            vertical_sweep_px: 10,
        }
    }
}

/// Detector producing the closest range (meters) per angular sector.
///
/// Sector 0 covers the left edge of the frame; ranges are meters. Sectors
/// with no return in them report the sensor's maximum representable range.
pub struct PolarHistDetector<S: DepthSource> {
    source: S,
    config: PolarHistConfig,
}

impl<S: DepthSource> PolarHistDetector<S> {
    /// Detector with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, PolarHistConfig::default())
    }

    /// Detector with full configuration control.
    pub fn with_config(source: S, config: PolarHistConfig) -> Self {
        Self { source, config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &PolarHistConfig {
        &self.config
    }
}

impl<S: DepthSource> Detector for PolarHistDetector<S> {
    type Output = Vec<f64>;

    fn detect(&mut self) -> Vec<f64> {
        let Some(frame) = self.source.latest_frame() else {
            return Vec::new();
        };
        let histogram = polar_histogram(&frame, &self.config);
        tracing::debug!("{} histogram sectors filled", histogram.len());
        histogram
    }
}

/// Fill the directional histogram for one explicit frame.
///
/// The horizontal field of view is divided into `ceil(hfov / angle_step)`
/// sectors. No-return pixels count as maximally far rather than invalid, so
/// an open direction reads as "clear out to sensor range".
pub fn polar_histogram(frame: &DepthFrame, config: &PolarHistConfig) -> Vec<f64> {
    if frame.is_empty() {
        return Vec::new();
    }

    let width = frame.width();
    let height = frame.height();
    let scale = frame.scale_m();

    // The epsilon keeps an fov that is an exact multiple of the step from
    // rounding up to a spurious extra sector.
    let sectors = ((frame.horizontal_fov_rad() / config.angle_step_rad) - 1e-9)
        .ceil()
        .max(1.0) as usize;

    // Keep the sweep band inside the frame.
    let middle_row = height / 2;
    let sweep = config.vertical_sweep_px.min(middle_row);
    let row_range = (middle_row - sweep)..(middle_row + sweep).max(middle_row + 1);

    let max_range = f64::from(u16::MAX) * scale;
    let mut histogram = vec![max_range; sectors];

    for row in row_range {
        for col in 0..width {
            let sector = (col * sectors / width).min(sectors - 1);
            let raw = frame.get(row, col);
            // No return: treat the direction as clear out to sensor range.
            let raw = if raw == 0 { u16::MAX } else { raw };
            let range = f64::from(raw) * scale;
            if range < histogram[sector] {
                histogram[sector] = range;
            }
        }
    }

    histogram
}
