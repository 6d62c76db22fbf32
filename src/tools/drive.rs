use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::device::motion::{MotionIntent, SPEED_MAX, SPEED_MIN};
use crate::device::DeviceSession;

const PARAMS: &[ParamSpec] = &[ParamSpec::required(
    "speed",
    ParamKind::Integer,
    "Wheel speed; positive drives forward, negative backward",
)
.with_bound(SPEED_MIN as f64, SPEED_MAX as f64)];

/// Drives the robot forward or backward at a constant speed.
pub struct DriveTool {
    session: Arc<DeviceSession>,
}

impl DriveTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for DriveTool {
    fn name(&self) -> &str {
        "drive"
    }

    fn description(&self) -> &str {
        "Drive the robot at the given speed until another motion command replaces it. Use stop to halt."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let speed = args
            .get("speed")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| anyhow::anyhow!("missing speed"))?;
        let speed = i32::try_from(speed)?;
        match self.session.execute(MotionIntent::Drive { speed }).await {
            Ok(()) => Ok(ToolResult::text(format!("driving at speed {speed}"))),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
