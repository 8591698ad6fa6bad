//! Detect obstacles in a 16-bit depth image (or a synthetic frame).

use std::error::Error;
use std::f64::consts::FRAC_PI_3;
use std::sync::Arc;

use depthblob::{
    CameraIntrinsics, DepthFrame, Detector, DetectorConfig, FrameCell, Gray16Image,
    ObstacleDetector,
};
use image::ImageReader;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let intrinsics = CameraIntrinsics {
        scale_m: 0.001,
        horizontal_fov_rad: FRAC_PI_3,
        vertical_fov_rad: FRAC_PI_3,
    };

    // With an argument: load a 16-bit grayscale depth image. Without one:
    // build a synthetic frame with two box obstacles in a far background.
    let frame = match std::env::args().nth(1) {
        Some(path) => {
            let img: Gray16Image = ImageReader::open(&path)?.decode()?.to_luma16();
            DepthFrame::from_gray16(&img, intrinsics)
        }
        None => synthetic_frame(intrinsics),
    };

    let cell = Arc::new(FrameCell::with_frame(frame));
    let mut detector = ObstacleDetector::with_config(
        cell,
        DetectorConfig {
            distance_threshold_m: Some(5.0),
            bounding_boxes: true,
            ..DetectorConfig::default()
        },
    );

    let obstacles = detector.detect();
    println!("Detected {} obstacles.", obstacles.len());
    println!("{}", serde_json::to_string_pretty(&obstacles)?);
    Ok(())
}

fn synthetic_frame(intrinsics: CameraIntrinsics) -> DepthFrame {
    let (width, height) = (640usize, 480usize);
    let mut data = vec![8000u16; width * height];
    for (row0, col0, size, depth) in [(100, 120, 60, 1500u16), (250, 400, 90, 2600u16)] {
        for row in row0..row0 + size {
            for col in col0..col0 + size {
                data[row * width + col] = depth;
            }
        }
    }
    DepthFrame::new(data, width, height, intrinsics).expect("buffer sized to width*height")
}
