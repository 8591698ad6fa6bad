//! Detector output records.

/// A point in spherical camera-relative coordinates.
///
/// `theta` is the polar angle measured so that it grows from the top of the
/// frame to the bottom; `phi` is the azimuth and grows from the right edge
/// of the frame to the left. The optical axis sits at `theta = phi = π/2`
/// when both fields of view are centered. Downstream spherical-to-Cartesian
/// conversions rely on this orientation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SphericalPoint {
    /// Distance from the camera (meters).
    pub range_m: f64,
    /// Polar angle (radians).
    pub theta_rad: f64,
    /// Azimuth (radians).
    pub phi_rad: f64,
}

/// Angular bounding box of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Near / top-left corner: closest depth, minimum row and column.
    pub near: SphericalPoint,
    /// Far / bottom-right corner: farthest depth, maximum row and column.
    pub far: SphericalPoint,
}

/// One detected obstacle.
///
/// IDs are sequential in scan-discovery order and only distinguish obstacles
/// within a single frame; nothing is tracked across frames.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obstacle {
    /// Per-frame sequential id.
    pub id: u32,
    /// Blob centroid with the blob's closest range.
    pub center: SphericalPoint,
    /// Angular extent, when bounding boxes are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}
