//! Acquisition thread publishing frames while the detector polls.
//!
//! Mimics the real deployment shape: a sensor loop owns the camera and
//! publishes each completed frame into a [`FrameCell`]; the avoidance loop
//! polls the detector at its own rate and always sees the latest frame.

use std::f64::consts::FRAC_PI_3;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use depthblob::{
    CameraIntrinsics, DepthFrame, Detector, DetectorConfig, FrameCell, ObstacleDetector,
};

fn main() {
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

    let cell = Arc::new(FrameCell::new());
    let producer = Arc::clone(&cell);

    // Sensor loop: a box obstacle drifting left to right across the view.
    let acquisition = thread::spawn(move || {
        let (width, height) = (320usize, 240usize);
        for step in 0..20 {
            let col0 = 10 + step * 12;
            let mut data = vec![6000u16; width * height];
            for row in 80..160 {
                for col in col0..(col0 + 48).min(width) {
                    data[row * width + col] = 1200;
                }
            }
            let frame =
                DepthFrame::new(data, width, height, intrinsics).expect("valid frame");
            producer.publish(frame);
            thread::sleep(Duration::from_millis(30));
        }
    });

    let mut detector = ObstacleDetector::with_config(
        Arc::clone(&cell),
        DetectorConfig {
            distance_threshold_m: Some(3.0),
            ..DetectorConfig::default()
        },
    );

    for _ in 0..15 {
        for obstacle in detector.detect() {
            println!(
                "obstacle {} at {:.2} m (theta {:.3}, phi {:.3})",
                obstacle.id,
                obstacle.center.range_m,
                obstacle.center.theta_rad,
                obstacle.center.phi_rad
            );
        }
        thread::sleep(Duration::from_millis(40));
    }

    acquisition.join().expect("acquisition thread panicked");
}
