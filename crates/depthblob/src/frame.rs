//! Depth frames and frame sources.
//!
//! A [`DepthFrame`] bundles one row-major grid of raw 16-bit depth samples
//! with the metadata needed to interpret it (meters-per-unit scale and the
//! camera's field of view). Sample value 0 means "no return" and is treated
//! as background by every detector.
//!
//! Detectors pull frames through the [`DepthSource`] trait; [`FrameCell`] is
//! the stock implementation for sensors that run their own acquisition
//! thread and publish the most recently completed frame.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex};

use image::{ImageBuffer, Luma};

/// 16-bit grayscale raster, the interchange format for depth maps.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Fixed optical properties of a depth camera.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraIntrinsics {
    /// Meters per raw depth unit.
    pub scale_m: f64,
    /// Horizontal field of view (radians).
    pub horizontal_fov_rad: f64,
    /// Vertical field of view (radians).
    pub vertical_fov_rad: f64,
}

/// One immutable depth-camera frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    data: Vec<u16>,
    width: usize,
    height: usize,
    intrinsics: CameraIntrinsics,
}

/// Frame construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Buffer length does not equal `width * height`.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SizeMismatch { expected, actual } => write!(
                f,
                "depth buffer length {actual} does not match width*height = {expected}"
            ),
        }
    }
}

impl Error for FrameError {}

impl DepthFrame {
    /// Build a frame from a row-major buffer of raw depth samples.
    pub fn new(
        data: Vec<u16>,
        width: usize,
        height: usize,
        intrinsics: CameraIntrinsics,
    ) -> Result<Self, FrameError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            intrinsics,
        })
    }

    /// Build a frame from a 16-bit grayscale image.
    pub fn from_gray16(img: &Gray16Image, intrinsics: CameraIntrinsics) -> Self {
        let (w, h) = img.dimensions();
        Self {
            data: img.as_raw().clone(),
            width: w as usize,
            height: h as usize,
            intrinsics,
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Camera optical properties this frame was captured with.
    pub fn intrinsics(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    /// Meters per raw depth unit.
    pub fn scale_m(&self) -> f64 {
        self.intrinsics.scale_m
    }

    /// Horizontal field of view (radians).
    pub fn horizontal_fov_rad(&self) -> f64 {
        self.intrinsics.horizontal_fov_rad
    }

    /// Vertical field of view (radians).
    pub fn vertical_fov_rad(&self) -> f64 {
        self.intrinsics.vertical_fov_rad
    }

    /// Raw samples, row-major.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Raw sample at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.data[row * self.width + col]
    }

    /// True when the frame carries no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Anything that can hand the detector its most recent depth frame.
///
/// Returning `None` means "nothing captured yet" (sensor warming up, link
/// not established); detectors translate that into an empty result without
/// retrying. Retry and backoff policy belongs to the source.
pub trait DepthSource {
    /// The most recently completed frame, if any.
    fn latest_frame(&mut self) -> Option<DepthFrame>;
}

/// Mutex-guarded latest-frame slot.
///
/// An acquisition thread calls [`FrameCell::publish`] whenever a frame
/// completes; detector threads poll [`FrameCell::latest`]. A reader never
/// observes a half-written frame, and the writer blocks only for the swap.
#[derive(Debug, Default)]
pub struct FrameCell {
    slot: Mutex<Option<DepthFrame>>,
}

impl FrameCell {
    /// Empty cell; `latest` returns `None` until the first publish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell pre-loaded with one frame.
    pub fn with_frame(frame: DepthFrame) -> Self {
        Self {
            slot: Mutex::new(Some(frame)),
        }
    }

    /// Replace the stored frame with a newer one.
    pub fn publish(&self, frame: DepthFrame) {
        // A poisoned slot still holds a complete frame (publish swaps the
        // whole Option), so recover rather than propagate the panic.
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(frame);
    }

    /// Clone of the most recently published frame.
    pub fn latest(&self) -> Option<DepthFrame> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DepthSource for FrameCell {
    fn latest_frame(&mut self) -> Option<DepthFrame> {
        self.latest()
    }
}

impl DepthSource for Arc<FrameCell> {
    fn latest_frame(&mut self) -> Option<DepthFrame> {
        self.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::intrinsics;

    #[test]
    fn new_rejects_mismatched_buffer() {
        let err = DepthFrame::new(vec![0; 5], 2, 3, intrinsics()).unwrap_err();
        assert_eq!(
            err,
            FrameError::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn zero_size_frame_is_empty() {
        let frame = DepthFrame::new(Vec::new(), 0, 0, intrinsics()).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn from_gray16_preserves_samples() {
        let mut img = Gray16Image::new(3, 2);
        img.put_pixel(2, 1, Luma([1234]));
        let frame = DepthFrame::from_gray16(&img, intrinsics());
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.get(1, 2), 1234);
        assert_eq!(frame.get(0, 0), 0);
    }

    #[test]
    fn frame_cell_swaps_whole_frames() {
        let cell = FrameCell::new();
        assert!(cell.latest().is_none());

        let first = DepthFrame::new(vec![1; 4], 2, 2, intrinsics()).unwrap();
        let second = DepthFrame::new(vec![2; 4], 2, 2, intrinsics()).unwrap();
        cell.publish(first.clone());
        assert_eq!(cell.latest(), Some(first));
        cell.publish(second.clone());
        assert_eq!(cell.latest(), Some(second));
    }
}
