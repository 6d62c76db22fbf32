use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::device::DeviceSession;

const PARAMS: &[ParamSpec] = &[ParamSpec::required(
    "name",
    ParamKind::Text,
    "Sound effect name; see list_sounds for the catalog",
)];

/// Plays one of the robot's built-in sound effects.
pub struct PlaySoundTool {
    session: Arc<DeviceSession>,
}

impl PlaySoundTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for PlaySoundTool {
    fn name(&self) -> &str {
        "play_sound"
    }

    fn description(&self) -> &str {
        "Play a built-in sound effect by name."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let name = args
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("missing name"))?;
        match self.session.play_sound(name).await {
            Ok(()) => Ok(ToolResult::text(format!("playing {name}"))),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
