use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::device::motion::{MotionIntent, BRIGHTNESS_MAX, BRIGHTNESS_MIN};
use crate::device::DeviceSession;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::optional(
        "eye_brightness",
        ParamKind::Integer,
        "Eye ring brightness, 0 (off) to 255 (full)",
    )
    .with_bound(BRIGHTNESS_MIN as f64, BRIGHTNESS_MAX as f64),
    ParamSpec::optional("neck_color", ParamKind::Text, "Named color for the neck light"),
    ParamSpec::optional(
        "left_ear_color",
        ParamKind::Text,
        "Named color for the left ear light",
    ),
    ParamSpec::optional(
        "right_ear_color",
        ParamKind::Text,
        "Named color for the right ear light",
    ),
];

/// Changes one or more of the robot's lights in a single command.
pub struct LightsTool {
    session: Arc<DeviceSession>,
}

impl LightsTool {
    pub fn new(session: Arc<DeviceSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for LightsTool {
    fn name(&self) -> &str {
        "set_lights"
    }

    fn description(&self) -> &str {
        "Set the eye brightness and/or the neck and ear light colors. At least one field is required; see list_colors for valid names."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let brightness = match args.get("eye_brightness").and_then(|v| v.as_i64()) {
            Some(value) => Some(u8::try_from(value)?),
            None => None,
        };
        let text_arg =
            |key: &str| args.get(key).and_then(|v| v.as_str()).map(String::from);

        let intent = MotionIntent::Lights {
            eye_brightness: brightness,
            neck: text_arg("neck_color"),
            left_ear: text_arg("left_ear_color"),
            right_ear: text_arg("right_ear_color"),
        };
        match self.session.execute(intent).await {
            Ok(()) => Ok(ToolResult::text("lights updated")),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}
