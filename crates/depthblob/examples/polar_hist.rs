//! Print the directional distance histogram for a synthetic frame.

use std::f64::consts::FRAC_PI_3;
use std::sync::Arc;

use depthblob::{
    CameraIntrinsics, DepthFrame, Detector, FrameCell, PolarHistConfig, PolarHistDetector,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let intrinsics = CameraIntrinsics {
        scale_m: 0.001,
        horizontal_fov_rad: FRAC_PI_3,
        vertical_fov_rad: FRAC_PI_3,
    };

    // A wall on the left third of the view, open space elsewhere.
    let (width, height) = (640usize, 480usize);
    let data: Vec<u16> = (0..width * height)
        .map(|idx| if idx % width < 200 { 1800 } else { 0 })
        .collect();
    let frame = DepthFrame::new(data, width, height, intrinsics).expect("valid frame");

    let cell = Arc::new(FrameCell::with_frame(frame));
    let mut detector = PolarHistDetector::with_config(cell, PolarHistConfig::default());

    let histogram = detector.detect();
    let step_deg = detector.config().angle_step_rad.to_degrees();
    for (sector, range) in histogram.iter().enumerate() {
        println!(
            "sector {sector:2} ({:5.1}°..{:5.1}°): {range:8.3} m",
            sector as f64 * step_deg,
            (sector + 1) as f64 * step_deg,
        );
    }
}
