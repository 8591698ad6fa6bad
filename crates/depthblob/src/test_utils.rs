//! Shared synthetic depth frames for unit tests.

use std::f64::consts::FRAC_PI_3;

use crate::frame::{CameraIntrinsics, DepthFrame};

/// Millimeter-scale sensor with a 60° field of view on both axes.
pub(crate) fn intrinsics() -> CameraIntrinsics {
    CameraIntrinsics {
        scale_m: 0.001,
        horizontal_fov_rad: FRAC_PI_3,
        vertical_fov_rad: FRAC_PI_3,
    }
}

/// Frame where every sample has the same raw depth.
pub(crate) fn uniform_frame(width: usize, height: usize, depth: u16) -> DepthFrame {
    frame_from_fn(width, height, |_, _| depth)
}

/// Frame built sample-by-sample from `(row, col) -> raw depth`.
pub(crate) fn frame_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> u16,
) -> DepthFrame {
    let data = (0..width * height)
        .map(|idx| f(idx / width, idx % width))
        .collect();
    DepthFrame::new(data, width, height, intrinsics()).expect("buffer sized to width*height")
}
