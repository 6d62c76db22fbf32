//! Motion intents, movement bounds, and the turn translation.

use std::time::Duration;

use super::catalog;
use super::DeviceError;

/// Inclusive movement bounds. Out-of-range values are rejected, never clamped.
pub const SPEED_MIN: i64 = -2048;
pub const SPEED_MAX: i64 = 2048;
pub const HEAD_YAW_MIN: f64 = -53.0;
pub const HEAD_YAW_MAX: f64 = 53.0;
pub const HEAD_PITCH_MIN: f64 = -5.0;
pub const HEAD_PITCH_MAX: f64 = 10.0;
pub const TURN_DEGREES_MIN: f64 = -360.0;
pub const TURN_DEGREES_MAX: f64 = 360.0;
pub const BRIGHTNESS_MIN: i64 = 0;
pub const BRIGHTNESS_MAX: i64 = 255;

/// Nominal spin rate used for timed turns. Independent of the caller's
/// angular-speed parameter, which shapes only the wait duration.
pub const TURN_SPIN_MAGNITUDE: i32 = 200;

/// Movement limits as a named table, for the `movement_limits` lookup tool.
pub const LIMITS: &[(&str, f64, f64)] = &[
    ("speed", SPEED_MIN as f64, SPEED_MAX as f64),
    ("head_yaw", HEAD_YAW_MIN, HEAD_YAW_MAX),
    ("head_pitch", HEAD_PITCH_MIN, HEAD_PITCH_MAX),
    ("turn_degrees", TURN_DEGREES_MIN, TURN_DEGREES_MAX),
    ("brightness", BRIGHTNESS_MIN as f64, BRIGHTNESS_MAX as f64),
];

/// A single actuation request against the connected robot.
///
/// Transient: constructed per invocation, validated, forwarded, discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionIntent {
    Drive { speed: i32 },
    Spin { speed: i32 },
    Stop,
    Head { yaw: f64, pitch: f64 },
    Lights {
        eye_brightness: Option<u8>,
        neck: Option<String>,
        left_ear: Option<String>,
        right_ear: Option<String>,
    },
}

impl MotionIntent {
    /// Bounds check, run before the session contacts the driver.
    pub fn validate(&self) -> Result<(), DeviceError> {
        match self {
            MotionIntent::Drive { speed } | MotionIntent::Spin { speed } => {
                check_speed(*speed)
            }
            MotionIntent::Stop => Ok(()),
            MotionIntent::Head { yaw, pitch } => {
                check_range("yaw", *yaw, HEAD_YAW_MIN, HEAD_YAW_MAX)?;
                check_range("pitch", *pitch, HEAD_PITCH_MIN, HEAD_PITCH_MAX)
            }
            MotionIntent::Lights {
                eye_brightness,
                neck,
                left_ear,
                right_ear,
            } => {
                if eye_brightness.is_none()
                    && neck.is_none()
                    && left_ear.is_none()
                    && right_ear.is_none()
                {
                    return Err(DeviceError::InvalidArgument {
                        param: "lights",
                        reason: "at least one light field must be set".into(),
                    });
                }
                for (param, name) in [
                    ("neck_color", neck),
                    ("left_ear_color", left_ear),
                    ("right_ear_color", right_ear),
                ] {
                    if let Some(name) = name {
                        if catalog::resolve_color(name).is_none() {
                            return Err(DeviceError::InvalidArgument {
                                param,
                                reason: format!("unknown color `{name}`"),
                            });
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_speed(speed: i32) -> Result<(), DeviceError> {
    if i64::from(speed) < SPEED_MIN || i64::from(speed) > SPEED_MAX {
        return Err(DeviceError::InvalidArgument {
            param: "speed",
            reason: format!("{speed} is outside [{SPEED_MIN}, {SPEED_MAX}]"),
        });
    }
    Ok(())
}

fn check_range(param: &'static str, value: f64, min: f64, max: f64) -> Result<(), DeviceError> {
    if !value.is_finite() || value < min || value > max {
        return Err(DeviceError::InvalidArgument {
            param,
            reason: format!("{value} is outside [{min}, {max}]"),
        });
    }
    Ok(())
}

/// A bounded rotation expressed as a primitive spin plus a timed wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnPlan {
    pub spin_speed: i32,
    pub wait: Duration,
}

impl TurnPlan {
    /// Translates a turn request. `Ok(None)` is the zero-degree no-op: the
    /// caller returns success without contacting the driver.
    ///
    /// `deg_per_sec` shapes only the wait; the actuator always spins at
    /// [`TURN_SPIN_MAGNITUDE`].
    pub fn new(degrees: f64, deg_per_sec: f64) -> Result<Option<Self>, DeviceError> {
        check_range("degrees", degrees, TURN_DEGREES_MIN, TURN_DEGREES_MAX)?;
        if !deg_per_sec.is_finite() || deg_per_sec <= 0.0 {
            return Err(DeviceError::InvalidArgument {
                param: "speed",
                reason: format!("{deg_per_sec} is not a positive angular speed"),
            });
        }
        if degrees == 0.0 {
            return Ok(None);
        }
        let spin_speed = if degrees > 0.0 {
            TURN_SPIN_MAGNITUDE
        } else {
            -TURN_SPIN_MAGNITUDE
        };
        Ok(Some(Self {
            spin_speed,
            wait: Duration::from_secs_f64(degrees.abs() / deg_per_sec),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_bounds_are_inclusive() {
        assert!(MotionIntent::Drive { speed: 2048 }.validate().is_ok());
        assert!(MotionIntent::Drive { speed: -2048 }.validate().is_ok());
        let err = MotionIntent::Drive { speed: 2049 }.validate().unwrap_err();
        assert!(err.to_string().contains("`speed`"));
        assert!(MotionIntent::Spin { speed: -2049 }.validate().is_err());
    }

    #[test]
    fn head_bounds() {
        assert!(MotionIntent::Head { yaw: 53.0, pitch: 10.0 }.validate().is_ok());
        assert!(MotionIntent::Head { yaw: -53.0, pitch: -5.0 }.validate().is_ok());
        assert!(MotionIntent::Head { yaw: 54.0, pitch: 0.0 }.validate().is_err());
        assert!(MotionIntent::Head { yaw: 0.0, pitch: -5.1 }.validate().is_err());
        assert!(MotionIntent::Head { yaw: f64::NAN, pitch: 0.0 }.validate().is_err());
    }

    #[test]
    fn lights_require_at_least_one_field() {
        let empty = MotionIntent::Lights {
            eye_brightness: None,
            neck: None,
            left_ear: None,
            right_ear: None,
        };
        assert!(empty.validate().is_err());

        let brightness_only = MotionIntent::Lights {
            eye_brightness: Some(255),
            neck: None,
            left_ear: None,
            right_ear: None,
        };
        assert!(brightness_only.validate().is_ok());
    }

    #[test]
    fn lights_reject_unknown_color() {
        let intent = MotionIntent::Lights {
            eye_brightness: None,
            neck: Some("chartreuse".into()),
            left_ear: None,
            right_ear: None,
        };
        let err = intent.validate().unwrap_err();
        assert!(err.to_string().contains("chartreuse"));
    }

    #[test]
    fn turn_plan_zero_degrees_is_noop() {
        assert_eq!(TurnPlan::new(0.0, 200.0).unwrap(), None);
    }

    #[test]
    fn turn_plan_fixes_magnitude_and_times_from_speed() {
        let plan = TurnPlan::new(-180.0, 200.0).unwrap().unwrap();
        assert_eq!(plan.spin_speed, -200);
        assert_eq!(plan.wait, Duration::from_millis(900));

        let plan = TurnPlan::new(90.0, 45.0).unwrap().unwrap();
        assert_eq!(plan.spin_speed, 200);
        assert_eq!(plan.wait, Duration::from_secs(2));
    }

    #[test]
    fn turn_plan_rejects_out_of_range() {
        assert!(TurnPlan::new(361.0, 200.0).is_err());
        assert!(TurnPlan::new(-360.5, 200.0).is_err());
        assert!(TurnPlan::new(90.0, 0.0).is_err());
        assert!(TurnPlan::new(90.0, -10.0).is_err());
        assert!(TurnPlan::new(360.0, 200.0).unwrap().is_some());
    }
}
