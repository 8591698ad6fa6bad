//! Obstacle detection: frame acquisition, blob extraction, projection.
//!
//! [`ObstacleDetector`] is the primary entry point. It owns a
//! [`DepthSource`], a [`DetectorConfig`], and the scratch buffers the three
//! labeling passes run over; each `detect` call recomputes everything from
//! the latest frame. [`detect_in_frame`] exposes the same computation as a
//! pure function over an explicit frame for callers that manage frames
//! themselves.

pub(crate) mod config;
pub(crate) mod labeling;
pub(crate) mod project;

pub use config::DetectorConfig;
pub use project::FrameAngles;

use crate::frame::{DepthFrame, DepthSource};
use crate::obstacle::{BoundingBox, Obstacle};

use labeling::{BlobStats, Scratch};

/// A detector that turns sensor frames into a list of detected elements.
///
/// Implemented by [`ObstacleDetector`], the polar-histogram detector, and
/// the window detector; avoidance strategies consume any of them through
/// this interface.
pub trait Detector {
    /// What one detection call produces.
    type Output;

    /// Run one full detection over the most recent sensor data.
    fn detect(&mut self) -> Self::Output;
}

/// Connected-component obstacle detector over a depth-frame source.
///
/// Stateless across calls except for reused scratch storage; every frame is
/// labeled from scratch and obstacle IDs restart at zero. Not reentrant:
/// concurrent detection requires one detector instance per thread.
///
/// # Examples
///
/// ```no_run
/// use depthblob::{Detector, DetectorConfig, FrameCell, ObstacleDetector};
///
/// let cell = std::sync::Arc::new(FrameCell::new());
/// let mut detector = ObstacleDetector::with_config(
///     cell.clone(),
///     DetectorConfig {
///         distance_threshold_m: Some(5.0),
///         ..DetectorConfig::default()
///     },
/// );
/// let obstacles = detector.detect();
/// println!("{} obstacles", obstacles.len());
/// ```
pub struct ObstacleDetector<S: DepthSource> {
    source: S,
    config: DetectorConfig,
    scratch: Scratch,
}

impl<S: DepthSource> ObstacleDetector<S> {
    /// Detector with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, DetectorConfig::default())
    }

    /// Detector with full configuration control.
    pub fn with_config(source: S, config: DetectorConfig) -> Self {
        Self {
            source,
            config,
            scratch: Scratch::default(),
        }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectorConfig {
        &mut self.config
    }
}

impl<S: DepthSource> Detector for ObstacleDetector<S> {
    type Output = Vec<Obstacle>;

    /// Pull the latest frame and extract obstacles from it.
    ///
    /// A missing or empty frame yields an empty list without error; no
    /// retries happen here.
    fn detect(&mut self) -> Vec<Obstacle> {
        let Some(frame) = self.source.latest_frame() else {
            tracing::debug!("no depth frame available yet");
            return Vec::new();
        };

        let obstacles = detect_with_scratch(&frame, &self.config, &mut self.scratch);
        tracing::info!("{} obstacles detected", obstacles.len());
        obstacles
    }
}

/// Extract obstacles from one explicit frame with default scratch storage.
///
/// Equivalent to a single [`ObstacleDetector`] call; useful for tests,
/// benchmarks, and callers that already hold a frame.
pub fn detect_in_frame(frame: &DepthFrame, config: &DetectorConfig) -> Vec<Obstacle> {
    let mut scratch = Scratch::default();
    detect_with_scratch(frame, config, &mut scratch)
}

pub(crate) fn detect_with_scratch(
    frame: &DepthFrame,
    config: &DetectorConfig,
    scratch: &mut Scratch,
) -> Vec<Obstacle> {
    let blobs = labeling::extract_blobs(frame, config, scratch);
    if blobs.is_empty() {
        return Vec::new();
    }
    let angles = FrameAngles::new(frame);
    finalize(&blobs, &angles, config)
}

/// Convert accumulated blob statistics into finalized obstacles.
///
/// Centroid accumulators are averaged here, so no partially-computed
/// statistics ever reach a caller.
fn finalize(blobs: &[BlobStats], angles: &FrameAngles, config: &DetectorConfig) -> Vec<Obstacle> {
    blobs
        .iter()
        .enumerate()
        .map(|(id, blob)| {
            let n = f64::from(blob.pixel_count);
            let center = angles.point(blob.sum_row / n, blob.sum_col / n, blob.min_depth);
            let bounding_box = config.bounding_boxes.then(|| BoundingBox {
                near: angles.point(blob.min_row as f64, blob.min_col as f64, blob.min_depth),
                far: angles.point(blob.max_row as f64, blob.max_col as f64, blob.max_depth),
            });
            Obstacle {
                id: id as u32,
                center,
                bounding_box,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameCell;
    use crate::test_utils::{frame_from_fn, intrinsics, uniform_frame};
    use std::sync::Arc;

    fn small_config() -> DetectorConfig {
        DetectorConfig {
            min_num_pixels: 1,
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn missing_frame_yields_empty_list() {
        let mut detector = ObstacleDetector::new(Arc::new(FrameCell::new()));
        assert!(detector.detect().is_empty());
    }

    #[test]
    fn empty_frame_yields_empty_list() {
        let frame = DepthFrame::new(Vec::new(), 0, 0, intrinsics()).unwrap();
        assert!(detect_in_frame(&frame, &small_config()).is_empty());
    }

    #[test]
    fn uniform_frame_yields_centered_obstacle() {
        let (width, height, depth) = (64usize, 48usize, 500u16);
        let frame = uniform_frame(width, height, depth);
        let obstacles = detect_in_frame(&frame, &small_config());
        assert_eq!(obstacles.len(), 1);

        let o = &obstacles[0];
        assert_eq!(o.id, 0);
        // Range is the closest depth in meters (scale 0.001).
        assert!((o.center.range_m - 0.5).abs() < 1e-12);

        // Centroid sits at the geometric center of the frame.
        let angles = FrameAngles::new(&frame);
        let mid_row = (height as f64 - 1.0) / 2.0;
        let mid_col = (width as f64 - 1.0) / 2.0;
        assert!((o.center.theta_rad - angles.theta(mid_row)).abs() < 1e-9);
        assert!((o.center.phi_rad - angles.phi(mid_col)).abs() < 1e-9);
    }

    #[test]
    fn every_obstacle_has_positive_range() {
        let frame = frame_from_fn(16, 16, |row, col| ((row * 16 + col) % 5 == 0) as u16 * 300);
        for o in detect_in_frame(&frame, &small_config()) {
            assert!(o.center.range_m > 0.0);
        }
    }

    #[test]
    fn ids_are_sequential_per_frame() {
        let frame = frame_from_fn(10, 2, |_, col| match col {
            0 | 1 | 3 | 4 | 6 | 7 => 900,
            _ => 0,
        });
        let obstacles = detect_in_frame(&frame, &small_config());
        assert_eq!(obstacles.len(), 3);
        for (i, o) in obstacles.iter().enumerate() {
            assert_eq!(o.id, i as u32);
        }
    }

    #[test]
    fn bounding_box_spans_the_blob() {
        // A 4x4 block at rows 2..6, cols 3..7, with depth increasing by row.
        let frame = frame_from_fn(12, 10, |row, col| {
            if (2..6).contains(&row) && (3..7).contains(&col) {
                1000 + row as u16
            } else {
                0
            }
        });
        let config = DetectorConfig {
            min_num_pixels: 1,
            bounding_boxes: true,
            ..DetectorConfig::default()
        };
        let obstacles = detect_in_frame(&frame, &config);
        assert_eq!(obstacles.len(), 1);

        let angles = FrameAngles::new(&frame);
        let bb = obstacles[0].bounding_box.expect("bounding boxes enabled");
        assert!((bb.near.range_m - angles.range_m(1002)).abs() < 1e-12);
        assert!((bb.far.range_m - angles.range_m(1005)).abs() < 1e-12);
        assert!((bb.near.theta_rad - angles.theta(2.0)).abs() < 1e-12);
        assert!((bb.far.theta_rad - angles.theta(5.0)).abs() < 1e-12);
        // phi grows right to left: the left edge carries the larger azimuth.
        assert!(bb.near.phi_rad > bb.far.phi_rad);
        assert!((bb.near.phi_rad - angles.phi(3.0)).abs() < 1e-12);
        assert!((bb.far.phi_rad - angles.phi(6.0)).abs() < 1e-12);
    }

    #[test]
    fn bounding_boxes_are_off_by_default() {
        let frame = uniform_frame(8, 8, 400);
        let obstacles = detect_in_frame(&frame, &small_config());
        assert!(obstacles[0].bounding_box.is_none());
    }

    #[test]
    fn detector_reuses_scratch_across_frames() {
        let cell = Arc::new(FrameCell::with_frame(uniform_frame(16, 16, 700)));
        let mut detector = ObstacleDetector::with_config(cell.clone(), small_config());

        let first = detector.detect();
        assert_eq!(first.len(), 1);

        // Publish a frame with two blobs; stale state must not leak through.
        cell.publish(frame_from_fn(9, 6, |_, col| if col == 4 { 0 } else { 700 }));
        let second = detector.detect();
        assert_eq!(second.len(), 2);

        cell.publish(uniform_frame(16, 16, 0));
        assert!(detector.detect().is_empty());
    }

    #[test]
    fn repeated_detection_is_identical() {
        let frame = frame_from_fn(40, 30, |row, col| {
            if (row / 7 + col / 9) % 2 == 0 {
                850
            } else {
                0
            }
        });
        let a = detect_in_frame(&frame, &small_config());
        let b = detect_in_frame(&frame, &small_config());
        assert_eq!(a, b);
    }
}
