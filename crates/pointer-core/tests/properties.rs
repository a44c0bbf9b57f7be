//! Property tests over arbitrary landmark input.

use std::sync::Arc;

use proptest::prelude::*;

use blinkpoint_common::clock::ManualClock;
use blinkpoint_common::config::{ControllerConfig, InputMode, MAX_SENSITIVITY, MIN_SENSITIVITY};
use blinkpoint_landmark_model::{LandmarkObservation, Point2D};
use blinkpoint_landmark_source::synthetic;
use blinkpoint_pointer_core::geometry::eye_aspect_ratio;
use blinkpoint_pointer_core::head_pose::{read_head, CalibrationRange};
use blinkpoint_pointer_core::{PointerController, ScreenSize};

fn any_point() -> impl Strategy<Value = Point2D> {
    (-5.0f64..5.0, -5.0f64..5.0).prop_map(|(x, y)| Point2D::new(x, y))
}

fn any_observation() -> impl Strategy<Value = LandmarkObservation> {
    prop_oneof![
        (any_point(), 0.0f64..2.0)
            .prop_map(|(p, gap)| LandmarkObservation::Hand(synthetic::hand_pinch(p, gap))),
        (any_point(), 0.0f64..0.5)
            .prop_map(|(p, ear)| LandmarkObservation::Face(synthetic::face(p, ear))),
        Just(LandmarkObservation::NotDetected),
    ]
}

proptest! {
    #[test]
    fn cursor_stays_on_screen(
        eye_mode in any::<bool>(),
        width in 1u32..4000,
        height in 1u32..3000,
        sensitivity in MIN_SENSITIVITY..=MAX_SENSITIVITY,
        frames in prop::collection::vec(any_observation(), 1..60),
    ) {
        let config = ControllerConfig {
            mode: if eye_mode { InputMode::Eye } else { InputMode::Hand },
            sensitivity,
            screen_width: width,
            screen_height: height,
            ..Default::default()
        };
        let clock = Arc::new(ManualClock::new());
        let mut controller = PointerController::new(config, clock.clone()).unwrap();

        for observation in &frames {
            clock.advance_secs(1.0 / 30.0);
            let sample = controller.position_and_click(observation);
            prop_assert!((0..=width as i32).contains(&sample.x));
            prop_assert!((0..=height as i32).contains(&sample.y));
        }
    }

    #[test]
    fn sensitivity_stays_in_bounds(factors in prop::collection::vec(any::<f64>(), 1..30)) {
        let clock = Arc::new(ManualClock::new());
        let mut controller =
            PointerController::new(ControllerConfig::default(), clock).unwrap();

        for factor in factors {
            let sensitivity = controller.adjust_sensitivity(factor);
            prop_assert!((MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&sensitivity));
            prop_assert_eq!(sensitivity, controller.sensitivity());
        }
    }

    #[test]
    fn head_target_is_clamped(
        nose in any_point(),
        sensitivity in MIN_SENSITIVITY..=MAX_SENSITIVITY,
    ) {
        let screen = ScreenSize::new(1620, 900);
        let target = read_head(&nose, &CalibrationRange::default(), sensitivity, screen);
        prop_assert!((0..=1620).contains(&target.x));
        prop_assert!((0..=900).contains(&target.y));
    }

    #[test]
    fn ear_is_non_negative(points in prop::array::uniform6(any_point())) {
        prop_assert!(eye_aspect_ratio(&points) >= 0.0);
    }
}
