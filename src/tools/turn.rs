use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamDefault, ParamKind, ParamSpec, Tool, ToolResult};
use crate::device::motion::{TURN_DEGREES_MAX, TURN_DEGREES_MIN};
use crate::device::DeviceSession;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::required(
        "degrees",
        ParamKind::Float,
        "Rotation amount; positive turns clockwise, negative counter-clockwise",
    )
    .with_bound(TURN_DEGREES_MIN, TURN_DEGREES_MAX),
    ParamSpec::optional(
        "speed",
        ParamKind::Float,
        "Angular speed in degrees per second, used to time the rotation",
    )
    .with_default(ParamDefault::Float(200.0)),
];

/// Turns the robot by a bounded angle via a timed spin.
pub struct TurnTool {
    session: Arc<DeviceSession>,
}

impl TurnTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for TurnTool {
    fn name(&self) -> &str {
        "turn"
    }

    fn description(&self) -> &str {
        "Turn the robot by up to 360 degrees in either direction, then stop. Holds the motion guard for the whole rotation."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let degrees = args
            .get("degrees")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow::anyhow!("missing degrees"))?;
        let speed = args
            .get("speed")
            .and_then(|v| v.as_f64())
            .unwrap_or(200.0);
        match self.session.turn(degrees, speed).await {
            Ok(()) => Ok(ToolResult::text(format!("turned {degrees} degrees"))),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
