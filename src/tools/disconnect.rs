use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamSpec, Tool, ToolResult};
use crate::device::DeviceSession;

/// Soft-resets and disconnects from the robot.
pub struct DisconnectTool {
    session: Arc<DeviceSession>,
}

impl DisconnectTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for DisconnectTool {
    fn name(&self) -> &str {
        "disconnect"
    }

    fn description(&self) -> &str {
        "Soft-reset the robot and disconnect gracefully. The session always ends up disconnected, even if the reset fails."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        match self.session.disconnect().await {
            Ok(()) => Ok(ToolResult::text("disconnected")),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
