//! depthblob — obstacle extraction from depth-camera frames.
//!
//! Turns one noisy 16-bit depth raster into a list of discrete obstacles in
//! spherical camera-relative coordinates, the input an avoidance strategy
//! needs to redirect a vehicle. The pipeline stages are:
//!
//! 1. **Labeling** – three-pass connected-component labeling with a causal
//!    4-neighborhood (W, NW, N, NE) and a depth-similarity gate, merging
//!    provisional labels through a union-find forest.
//! 2. **Filtering** – minimum-blob-size and obstacle-count gates.
//! 3. **Projection** – blob centroids and extents mapped from pixel space
//!    into (range, polar angle, azimuth) relative to the optical axis.
//!
//! Two cheaper detectors share the same frame source: a directional
//! distance histogram ([`PolarHistDetector`]) and a straight-ahead window
//! check ([`WindowDetector`]).
//!
//! # Public API
//! - [`ObstacleDetector`] over any [`DepthSource`] as the primary entry point
//! - [`detect_in_frame`] for callers holding an explicit [`DepthFrame`]
//! - [`DetectorConfig`] for tuning; defaults match a RealSense-class sensor
//!
//! Detection is stateless across frames: every call relabels from scratch
//! and obstacle IDs restart at zero.

mod detect;
mod disjoint_set;
mod frame;
mod obstacle;
mod polar_hist;
mod window;

#[cfg(test)]
mod test_utils;

pub use detect::{detect_in_frame, Detector, DetectorConfig, FrameAngles, ObstacleDetector};
pub use disjoint_set::DisjointSet;
pub use frame::{CameraIntrinsics, DepthFrame, DepthSource, FrameCell, FrameError, Gray16Image};
pub use obstacle::{BoundingBox, Obstacle, SphericalPoint};
pub use polar_hist::{polar_histogram, PolarHistConfig, PolarHistDetector};
pub use window::{detect_in_window, WindowConfig, WindowDetector};
