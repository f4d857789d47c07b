//! The wind triangle.
//!
//! Angles are degrees true, speeds are knots. The wind direction is the
//! direction the wind blows *from*. The wind correction angle is added to the
//! course to get the heading, so a wind from the right of track gives a
//! positive correction (turn right into the wind) and a wind from the left a
//! negative one.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    angle::normalize_heading,
    error::{SolverResult, WindTriangleError},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindTriangleInput {
    pub wind_direction: f64,
    pub wind_speed: f64,
    pub true_course: f64,
    pub true_airspeed: f64,
}

/// Side of the track the wind is blowing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosswindDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindTriangleResult {
    /// Heading to fly, `[0, 360)`.
    pub true_heading: f64,
    pub ground_speed: f64,
    /// Signed, added to the course to get the heading.
    pub wind_correction_angle: f64,
    /// Positive is headwind, negative is tailwind.
    pub headwind_component: f64,
    /// Magnitude only, see `crosswind_direction` for the side.
    pub crosswind_component: f64,
    pub crosswind_direction: CrosswindDirection,
    /// `false` when no heading holds the course: the crosswind exceeds the
    /// airspeed (correction clamped to ±90°), the headwind pushes the aircraft
    /// backward along the course, or there is wind but no airspeed.
    pub achievable: bool,
}

impl WindTriangleInput {
    pub fn new(wind_direction: f64, wind_speed: f64, true_course: f64, true_airspeed: f64) -> Self {
        Self {
            wind_direction,
            wind_speed,
            true_course,
            true_airspeed,
        }
    }

    pub fn solve(&self) -> SolverResult<WindTriangleResult> {
        solve(
            self.wind_direction,
            self.wind_speed,
            self.true_course,
            self.true_airspeed,
        )
    }
}

impl WindTriangleResult {
    /// Unsigned drift, the magnitude of the wind correction angle.
    pub fn drift_angle(&self) -> f64 {
        self.wind_correction_angle.abs()
    }
}

pub fn solve(
    wind_direction: f64,
    wind_speed: f64,
    true_course: f64,
    true_airspeed: f64,
) -> SolverResult<WindTriangleResult> {
    check_angle("wind_direction", wind_direction)?;
    check_angle("true_course", true_course)?;
    check_speed("wind_speed", wind_speed)?;
    check_speed("true_airspeed", true_airspeed)?;

    let wind_direction = normalize_heading(wind_direction);
    let true_course = normalize_heading(true_course);

    // Not re-normalized, sin/cos take care of the wraparound.
    let wind_angle = (wind_direction - true_course).to_radians();
    let headwind = wind_speed * wind_angle.cos();
    let crosswind = wind_speed * wind_angle.sin();

    let (wind_correction_angle, achievable) = if true_airspeed == 0.0 {
        (0.0, wind_speed == 0.0)
    } else {
        let sin_wca = crosswind / true_airspeed;
        if sin_wca.abs() > 1.0 {
            (90.0_f64.copysign(sin_wca), false)
        } else {
            (sin_wca.asin().to_degrees(), true)
        }
    };
    // A headwind stronger than the airspeed left along track drifts backward.
    let along_track = true_airspeed * wind_correction_angle.to_radians().cos() - headwind;
    let achievable = achievable && along_track >= 0.0;

    if !achievable {
        warn!(
            wind_direction,
            wind_speed,
            true_course,
            true_airspeed,
            wind_correction_angle,
            "Course cannot be held with this wind"
        );
    }

    let true_heading = normalize_heading(true_course + wind_correction_angle);
    let ground_speed = ground_speed(true_heading, true_airspeed, wind_direction, wind_speed);

    let result = WindTriangleResult {
        true_heading,
        ground_speed,
        wind_correction_angle,
        headwind_component: headwind,
        crosswind_component: crosswind.abs(),
        crosswind_direction: if crosswind > 0.0 {
            CrosswindDirection::Right
        } else {
            CrosswindDirection::Left
        },
        achievable,
    };
    trace!(?result, "Solved wind triangle");
    Ok(result)
}

/// Magnitude of the air vector along the heading plus the wind vector, summed
/// in a north/east frame.
fn ground_speed(true_heading: f64, true_airspeed: f64, wind_from: f64, wind_speed: f64) -> f64 {
    let heading = true_heading.to_radians();
    let wind_to = wind_from.to_radians();

    let north = true_airspeed * heading.cos() - wind_speed * wind_to.cos();
    let east = true_airspeed * heading.sin() - wind_speed * wind_to.sin();
    north.hypot(east)
}

fn check_angle(name: &'static str, value: f64) -> SolverResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WindTriangleError::InvalidArgument {
            name,
            value,
            reason: "angle must be finite",
        })
    }
}

fn check_speed(name: &'static str, value: f64) -> SolverResult<()> {
    if !value.is_finite() {
        Err(WindTriangleError::InvalidArgument {
            name,
            value,
            reason: "speed must be finite",
        })
    } else if value < 0.0 {
        Err(WindTriangleError::InvalidArgument {
            name,
            value,
            reason: "speed can not be negative",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_wind_is_identity() {
        for course in [0.0, 45.0, 180.0, 359.0] {
            let result = solve(123.0, 0.0, course, 110.0).unwrap();
            assert_eq!(result.wind_correction_angle, 0.0);
            assert_close(result.true_heading, course, EPSILON);
            assert_close(result.ground_speed, 110.0, EPSILON);
            assert_eq!(result.crosswind_component, 0.0);
            assert!(result.achievable);
        }
    }

    #[test]
    fn test_headwind_on_the_nose() {
        let result = solve(90.0, 25.0, 90.0, 100.0).unwrap();
        assert_eq!(result.wind_correction_angle, 0.0);
        assert_eq!(result.crosswind_component, 0.0);
        assert_eq!(result.crosswind_direction, CrosswindDirection::Left);
        assert_close(result.headwind_component, 25.0, EPSILON);
        assert_close(result.true_heading, 90.0, EPSILON);
        assert_close(result.ground_speed, 75.0, EPSILON);
    }

    #[test]
    fn test_tailwind() {
        let result = solve(270.0, 25.0, 90.0, 100.0).unwrap();
        assert_close(result.headwind_component, -25.0, EPSILON);
        assert_close(result.ground_speed, 125.0, EPSILON);
        assert_close(result.wind_correction_angle, 0.0, EPSILON);
        assert_close(result.true_heading, 90.0, EPSILON);
    }

    #[test]
    fn test_tailwind_across_north() {
        // course 350, wind from 170: straight tailwind, wrapping through 360
        let result = solve(170.0, 15.0, 350.0, 90.0).unwrap();
        assert_close(result.headwind_component, -15.0, EPSILON);
        assert_close(result.ground_speed, 105.0, EPSILON);
    }

    #[test]
    fn test_wind_from_left_of_track() {
        let result = solve(270.0, 20.0, 360.0, 100.0).unwrap();
        assert_close(result.wind_correction_angle, -11.536_959_032_815_489, 1e-9);
        assert_close(result.drift_angle(), 11.536_959_032_815_489, 1e-9);
        assert_close(result.true_heading, 348.463_040_967_184_5, 1e-9);
        assert_close(result.ground_speed, 97.979_589_711_327_12, 1e-9);
        assert_close(result.headwind_component, 0.0, 1e-9);
        assert_close(result.crosswind_component, 20.0, EPSILON);
        assert_eq!(result.crosswind_direction, CrosswindDirection::Left);
        assert!(result.achievable);
    }

    #[test]
    fn test_wind_from_right_of_track_turns_right() {
        let result = solve(90.0, 20.0, 0.0, 100.0).unwrap();
        assert_close(result.wind_correction_angle, 11.536_959_032_815_489, 1e-9);
        assert_close(result.true_heading, 11.536_959_032_815_489, 1e-9);
        assert_close(result.ground_speed, 97.979_589_711_327_12, 1e-9);
        assert_eq!(result.crosswind_direction, CrosswindDirection::Right);
    }

    #[test]
    fn test_crosswind_side_symmetry() {
        let course = 140.0;
        for offset in [15.0, 60.0, 90.0, 135.0, 170.0] {
            let right = solve(course + offset, 30.0, course, 120.0).unwrap();
            let left = solve(course - offset, 30.0, course, 120.0).unwrap();

            assert_eq!(right.crosswind_direction, CrosswindDirection::Right);
            assert_eq!(left.crosswind_direction, CrosswindDirection::Left);
            assert_close(left.wind_correction_angle, -right.wind_correction_angle, 1e-9);
            assert_close(left.ground_speed, right.ground_speed, 1e-9);
            assert_close(left.headwind_component, right.headwind_component, 1e-9);
            assert_close(left.crosswind_component, right.crosswind_component, 1e-9);
        }
    }

    #[test]
    fn test_ground_speed_closes_the_triangle() {
        // Flying the solved heading at TAS, drifted by the wind, must track the course.
        let (wind_from, wind_speed, course, tas) = (35.0, 42.0, 280.0, 135.0);
        let result = solve(wind_from, wind_speed, course, tas).unwrap();
        let heading = result.true_heading.to_radians();
        let wind_to = wind_from.to_radians();
        let north = tas * heading.cos() - wind_speed * wind_to.cos();
        let east = tas * heading.sin() - wind_speed * wind_to.sin();
        let track = normalize_heading(east.atan2(north).to_degrees());
        assert_close(track, course, 1e-9);
        assert_close(result.ground_speed, north.hypot(east), 1e-9);
    }

    #[test]
    #[traced_test]
    fn test_headwind_stronger_than_airspeed_is_not_achievable() {
        for wind_from in [0.0, 30.0, 330.0] {
            let result = solve(wind_from, 150.0, 0.0, 100.0).unwrap();
            assert!(!result.achievable, "wind from {wind_from}");
            assert!(result.wind_correction_angle.abs() < 90.0);
        }
        assert!(logs_contain("Course cannot be held with this wind"));

        let on_the_nose = solve(0.0, 150.0, 0.0, 100.0).unwrap();
        assert_eq!(on_the_nose.wind_correction_angle, 0.0);
        assert_close(on_the_nose.ground_speed, 50.0, EPSILON);

        // Stalled over the ground, but not pushed back.
        assert!(solve(0.0, 100.0, 0.0, 100.0).unwrap().achievable);
        assert!(solve(30.0, 90.0, 0.0, 100.0).unwrap().achievable);
    }

    #[test]
    fn test_angles_are_wrapped_not_rejected() {
        let wrapped = solve(-90.0, 20.0, 720.0, 100.0).unwrap();
        let plain = solve(270.0, 20.0, 0.0, 100.0).unwrap();
        assert_close(wrapped.true_heading, plain.true_heading, 1e-9);
        assert_close(wrapped.ground_speed, plain.ground_speed, 1e-9);
        assert_close(
            wrapped.wind_correction_angle,
            plain.wind_correction_angle,
            1e-9,
        );
    }

    #[test]
    fn test_is_deterministic() {
        let input = WindTriangleInput::new(213.0, 17.0, 47.0, 96.0);
        assert_eq!(input.solve().unwrap(), input.solve().unwrap());
    }

    #[test]
    #[traced_test]
    fn test_crosswind_stronger_than_airspeed_is_clamped() {
        let result = solve(90.0, 120.0, 0.0, 100.0).unwrap();
        assert!(!result.achievable);
        assert_eq!(result.wind_correction_angle, 90.0);
        assert_close(result.true_heading, 90.0, EPSILON);
        assert_close(result.ground_speed, 20.0, 1e-9);
        assert!(result.ground_speed.is_finite());
        assert!(logs_contain("Course cannot be held with this wind"));

        let result = solve(270.0, 120.0, 0.0, 100.0).unwrap();
        assert!(!result.achievable);
        assert_eq!(result.wind_correction_angle, -90.0);
        assert_close(result.true_heading, 270.0, EPSILON);
    }

    #[test]
    fn test_zero_airspeed() {
        let calm = solve(0.0, 0.0, 100.0, 0.0).unwrap();
        assert!(calm.achievable);
        assert_eq!(calm.wind_correction_angle, 0.0);
        assert_eq!(calm.ground_speed, 0.0);

        let windy = solve(45.0, 10.0, 100.0, 0.0).unwrap();
        assert!(!windy.achievable);
        assert_eq!(windy.wind_correction_angle, 0.0);
        assert_close(windy.true_heading, 100.0, EPSILON);
        assert_close(windy.ground_speed, 10.0, EPSILON);
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        assert!(matches!(
            solve(0.0, -1.0, 0.0, 100.0),
            Err(WindTriangleError::InvalidArgument { name: "wind_speed", .. })
        ));
        assert!(matches!(
            solve(0.0, 10.0, 0.0, -100.0),
            Err(WindTriangleError::InvalidArgument { name: "true_airspeed", .. })
        ));
        assert!(matches!(
            solve(f64::NAN, 10.0, 0.0, 100.0),
            Err(WindTriangleError::InvalidArgument { name: "wind_direction", .. })
        ));
        assert!(matches!(
            solve(0.0, 10.0, f64::INFINITY, 100.0),
            Err(WindTriangleError::InvalidArgument { name: "true_course", .. })
        ));
        assert!(solve(0.0, -0.0, 0.0, 100.0).is_ok());
    }

    #[test]
    fn test_result_serializes_lowercase_side() {
        let result = solve(90.0, 20.0, 0.0, 100.0).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["crosswind_direction"], "right");
        assert_eq!(json["achievable"], true);
    }
}
