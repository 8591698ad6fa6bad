use serde::{Deserialize, Serialize};

/// Obstacle detector configuration. Fixed for the detector's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Pixels farther than this (meters) count as background.
    ///
    /// `None` disables the gate; only no-return pixels are background then.
    pub distance_threshold_m: Option<f64>,
    /// Maximum raw-depth delta for two neighboring pixels to share a blob.
    pub depth_tolerance: u16,
    /// Minimum blob size (pixels) to be reported as an obstacle.
    pub min_num_pixels: usize,
    /// Cap on obstacles per frame; blobs past the cap are dropped in
    /// scan-discovery order. A bounded-resource policy, not an error.
    pub max_num_obstacles: usize,
    /// Emit per-obstacle angular bounding boxes.
    pub bounding_boxes: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            distance_threshold_m: None,
            depth_tolerance: 20,
            // Equivalent area of a 20x20 square.
            min_num_pixels: 400,
            max_num_obstacles: 1000,
            bounding_boxes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let cfg = DetectorConfig::default();
        assert!(cfg.distance_threshold_m.is_none());
        assert_eq!(cfg.depth_tolerance, 20);
        assert_eq!(cfg.min_num_pixels, 400);
        assert_eq!(cfg.max_num_obstacles, 1000);
        assert!(!cfg.bounding_boxes);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: DetectorConfig =
            serde_json::from_str(r#"{"distance_threshold_m": 5.0, "min_num_pixels": 64}"#).unwrap();
        assert_eq!(cfg.distance_threshold_m, Some(5.0));
        assert_eq!(cfg.min_num_pixels, 64);
        assert_eq!(cfg.depth_tolerance, 20);
    }
}
