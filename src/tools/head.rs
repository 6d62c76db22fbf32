use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::device::motion::{
    MotionIntent, HEAD_PITCH_MAX, HEAD_PITCH_MIN, HEAD_YAW_MAX, HEAD_YAW_MIN,
};
use crate::device::DeviceSession;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::required(
        "yaw",
        ParamKind::Float,
        "Horizontal head angle in degrees; negative looks left",
    )
    .with_bound(HEAD_YAW_MIN, HEAD_YAW_MAX),
    ParamSpec::required(
        "pitch",
        ParamKind::Float,
        "Vertical head angle in degrees; negative looks up",
    )
    .with_bound(HEAD_PITCH_MIN, HEAD_PITCH_MAX),
];

/// Points the robot's head.
pub struct HeadTool {
    session: Arc<DeviceSession>,
}

impl HeadTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for HeadTool {
    fn name(&self) -> &str {
        "head"
    }

    fn description(&self) -> &str {
        "Point the robot's head to the given yaw and pitch angles."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let yaw = args
            .get("yaw")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow::anyhow!("missing yaw"))?;
        let pitch = args
            .get("pitch")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow::anyhow!("missing pitch"))?;
        match self.session.execute(MotionIntent::Head { yaw, pitch }).await {
            Ok(()) => Ok(ToolResult::text(format!(
                "head pointed to yaw {yaw}, pitch {pitch}"
            ))),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::sim::{DriverAction, SimulatedDiscovery, SimulatedDriver};
    use serde_json::json;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn moves_both_axes_in_order() {
        let driver = Arc::new(SimulatedDriver::new());
        let session = Arc::new(DeviceSession::new(
            Arc::new(SimulatedDiscovery::new(driver.clone())),
            Duration::from_secs(5),
            CancellationToken::new(),
        ));
        session.connect().await.unwrap();

        let tool = HeadTool::new(session);
        let result = tool.execute(json!({"yaw": -20.0, "pitch": 5.0})).await.unwrap();
        assert!(result.is_success());
        assert_eq!(
            driver.actions(),
            vec![DriverAction::HeadYaw(-20.0), DriverAction::HeadPitch(5.0)]
        );
    }
}
