use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::device::motion::{MotionIntent, SPEED_MAX, SPEED_MIN};
use crate::device::DeviceSession;

const PARAMS: &[ParamSpec] = &[ParamSpec::required(
    "speed",
    ParamKind::Integer,
    "Rotation speed; positive spins clockwise, negative counter-clockwise",
)
.with_bound(SPEED_MIN as f64, SPEED_MAX as f64)];

/// Spins the robot in place at a constant rate.
pub struct SpinTool {
    session: Arc<DeviceSession>,
}

impl SpinTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for SpinTool {
    fn name(&self) -> &str {
        "spin"
    }

    fn description(&self) -> &str {
        "Spin the robot in place at the given speed until stopped. For a bounded rotation use turn instead."
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
        match self.session.execute(MotionIntent::Spin { speed }).await {
            Ok(()) => Ok(ToolResult::text(format!("spinning at speed {speed}"))),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
