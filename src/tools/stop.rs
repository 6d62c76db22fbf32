use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamSpec, Tool, ToolResult};
use crate::device::motion::MotionIntent;
use crate::device::DeviceSession;

/// Halts all wheel motion immediately.
pub struct StopTool {
    session: Arc<DeviceSession>,
}

impl StopTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for StopTool {
    fn name(&self) -> &str {
        "stop"
    }

    fn description(&self) -> &str {
        "Stop the robot's wheels immediately."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        match self.session.execute(MotionIntent::Stop).await {
            Ok(()) => Ok(ToolResult::text("stopped")),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
