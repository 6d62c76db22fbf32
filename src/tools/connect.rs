use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamSpec, Tool, ToolResult};
use crate::device::DeviceSession;

/// Discovers and connects to the robot.
pub struct ConnectTool {
    session: Arc<DeviceSession>,
}

impl ConnectTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for ConnectTool {
    fn name(&self) -> &str {
        "connect"
    }

    fn description(&self) -> &str {
        "Discover a nearby Dash robot and connect to it. Fails if a connection already exists or is being established."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        match self.session.connect().await {
            Ok(()) => Ok(ToolResult::text("connected")),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::sim::{SimulatedDiscovery, SimulatedDriver};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn session(found: bool) -> Arc<DeviceSession> {
        let driver = Arc::new(SimulatedDriver::new());
        let discovery = if found {
            SimulatedDiscovery::new(driver)
        } else {
            SimulatedDiscovery::new(driver).finding_nothing()
        };
        Arc::new(DeviceSession::new(
            Arc::new(discovery),
            Duration::from_secs(5),
            CancellationToken::new(),
        ))
    }

    #[tokio::test]
    async fn connects_once() {
        let tool = ConnectTool::new(session(true));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(result, ToolResult::text("connected"));

        let again = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(again.message().unwrap().contains("already"));
    }

    #[tokio::test]
    async fn reports_missing_robot() {
        let tool = ConnectTool::new(session(false));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(
            result.message(),
            Some("no compatible robot found")
        );
    }
}
