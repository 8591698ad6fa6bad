//! Pixel-to-spherical projection.
//!
//! The camera's optical axis is assumed centered in the frame. Conceptually
//! the instrument sits inside a half-sphere spanning π radians along each
//! axis but only senses its fov-wide central cone, so the angle from the
//! sphere edge to the cone boundary is `(π - fov) / 2`. Rows then map
//! linearly onto the polar angle and columns onto the azimuth, with the
//! azimuth growing right-to-left (column 0 maps to the largest phi).

use std::f64::consts::PI;

use crate::frame::DepthFrame;
use crate::obstacle::SphericalPoint;

/// Angular mapping derived from one frame's geometry.
#[derive(Debug, Clone, Copy)]
pub struct FrameAngles {
    base_theta: f64,
    base_phi: f64,
    vfov: f64,
    hfov: f64,
    width: f64,
    height: f64,
    scale: f64,
}

impl FrameAngles {
    /// Derive the mapping from a frame's dimensions and intrinsics.
    pub fn new(frame: &DepthFrame) -> Self {
        let vfov = frame.vertical_fov_rad();
        let hfov = frame.horizontal_fov_rad();
        Self {
            base_theta: (PI - vfov) / 2.0,
            base_phi: (PI - hfov) / 2.0,
            vfov,
            hfov,
            width: frame.width() as f64,
            height: frame.height() as f64,
            scale: frame.scale_m(),
        }
    }

    /// Polar angle for (fractional) row `i`; grows top to bottom.
    #[inline]
    pub fn theta(&self, i: f64) -> f64 {
        (i / self.height) * self.vfov + self.base_theta
    }

    /// Azimuth for (fractional) column `j`; grows right to left.
    #[inline]
    pub fn phi(&self, j: f64) -> f64 {
        (1.0 - j / self.width) * self.hfov + self.base_phi
    }

    /// Raw depth converted to meters.
    #[inline]
    pub fn range_m(&self, raw_depth: u16) -> f64 {
        raw_depth as f64 * self.scale
    }

    /// Full spherical point for a pixel position and raw depth.
    #[inline]
    pub fn point(&self, i: f64, j: f64, raw_depth: u16) -> SphericalPoint {
        SphericalPoint {
            range_m: self.range_m(raw_depth),
            theta_rad: self.theta(i),
            phi_rad: self.phi(j),
        }
    }
}
