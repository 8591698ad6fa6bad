//! Minimal straight-ahead obstacle check.
//!
//! Looks only at a centered square window of the frame and reports a single
//! obstacle on the optical axis when anything in the window is nearer than
//! the configured threshold. This is the cheapest detector in the crate,
//! meant for stop-style avoidance that cares about "something ahead", not
//! where it is.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::detect::Detector;
use crate::frame::{DepthFrame, DepthSource};
use crate::obstacle::{Obstacle, SphericalPoint};

/// Window detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Anything nearer than this (meters) inside the window is an obstacle.
    pub distance_threshold_m: f64,
    /// Half-width of the square window around the frame center (pixels).
    pub radius_px: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            distance_threshold_m: 1.5,
            radius_px: 30,
        }
    }
}

/// Single-obstacle centered-window detector.
pub struct WindowDetector<S: DepthSource> {
    source: S,
    config: WindowConfig,
}

impl<S: DepthSource> WindowDetector<S> {
    /// Detector with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, WindowConfig::default())
    }

    /// Detector with full configuration control.
    pub fn with_config(source: S, config: WindowConfig) -> Self {
        Self { source, config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}

impl<S: DepthSource> Detector for WindowDetector<S> {
    type Output = Vec<Obstacle>;

    fn detect(&mut self) -> Vec<Obstacle> {
        match self.source.latest_frame() {
            Some(frame) => detect_in_window(&frame, &self.config),
            None => Vec::new(),
        }
    }
}

/// Scan the centered window of one explicit frame.
///
/// Returns at most one obstacle, placed on the optical axis
/// (`theta = phi = π/2`) at the minimum depth found in the window.
pub fn detect_in_window(frame: &DepthFrame, config: &WindowConfig) -> Vec<Obstacle> {
    if frame.is_empty() {
        return Vec::new();
    }

    let width = frame.width();
    let height = frame.height();
    let scale = frame.scale_m();
    let raw_threshold = (config.distance_threshold_m / scale) as u16;

    let row_start = (height / 2).saturating_sub(config.radius_px);
    let row_end = (height / 2 + config.radius_px).min(height);
    let col_start = (width / 2).saturating_sub(config.radius_px);
    let col_end = (width / 2 + config.radius_px).min(width);

    let mut min_depth: Option<u16> = None;
    for row in row_start..row_end {
        for col in col_start..col_end {
            let depth = frame.get(row, col);
            if depth == 0 || depth >= raw_threshold {
                continue;
            }
            min_depth = Some(min_depth.map_or(depth, |m| m.min(depth)));
        }
    }

    match min_depth {
        Some(depth) => vec![Obstacle {
            id: 0,
            center: SphericalPoint {
                range_m: f64::from(depth) * scale,
                theta_rad: FRAC_PI_2,
                phi_rad: FRAC_PI_2,
            },
            bounding_box: None,
        }],
        None => Vec::new(),
    }
}
