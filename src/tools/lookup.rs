//! Stateless lookup tools over the static device catalogs.
//!
//! Pure reads: no session, no validation beyond the dispatcher's, no failure
//! modes. Callers consult these before issuing commands.

use async_trait::async_trait;
use serde_json::json;

use super::traits::{ParamSpec, Tool, ToolResult};
use crate::device::catalog;
use crate::device::motion;

/// Lists the robot's built-in sound effects.
pub struct ListSoundsTool;

#[async_trait]
impl Tool for ListSoundsTool {
    fn name(&self) -> &str {
        "list_sounds"
    }

    fn description(&self) -> &str {
        "List the sound effect names play_sound accepts, with short descriptions."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let lines = catalog::SOUNDS
            .iter()
            .map(|(name, doc)| format!("{name} - {doc}"))
            .collect();
        Ok(ToolResult::lines(lines))
    }
}

/// Lists the named colors the light commands accept.
pub struct ListColorsTool;

#[async_trait]
impl Tool for ListColorsTool {
    fn name(&self) -> &str {
        "list_colors"
    }

    fn description(&self) -> &str {
        "List the color names set_lights accepts, with their RGB values."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let mut map = serde_json::Map::new();
        for (name, rgb) in catalog::COLORS {
            map.insert(name.to_string(), json!([rgb.r, rgb.g, rgb.b]));
        }
        Ok(ToolResult::map(map))
    }
}

/// Reports the movement bounds enforced on motion commands.
pub struct MovementLimitsTool;

#[async_trait]
impl Tool for MovementLimitsTool {
    fn name(&self) -> &str {
        "movement_limits"
    }

    fn description(&self) -> &str {
        "Report the inclusive bounds enforced on speeds, head angles, turn degrees, and brightness."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let mut map = serde_json::Map::new();
        for (name, min, max) in motion::LIMITS {
            map.insert(name.to_string(), json!([min, max]));
        }
        Ok(ToolResult::map(map))
    }
}

/// Reports the wire code for each device command.
pub struct CommandCodesTool;

#[async_trait]
impl Tool for CommandCodesTool {
    fn name(&self) -> &str {
        "command_codes"
    }

    fn description(&self) -> &str {
        "Report the wire command code for each device operation, for callers inspecting traffic."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn execute(&self, _args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let mut map = serde_json::Map::new();
        for (name, code) in catalog::COMMAND_CODES {
            map.insert(name.to_string(), json!(code));
        }
        Ok(ToolResult::map(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::traits::ToolPayload;

    #[tokio::test]
    async fn sounds_list_covers_the_catalog() {
        let result = ListSoundsTool.execute(json!({})).await.unwrap();
        let ToolResult::Success {
            payload: ToolPayload::Lines(lines),
        } = result
        else {
            panic!("expected lines payload");
        };
        assert_eq!(lines.len(), catalog::SOUNDS.len());
        assert!(lines.iter().any(|l| l.starts_with("hi - ")));
    }

    #[tokio::test]
    async fn colors_map_carries_rgb_triples() {
        let result = ListColorsTool.execute(json!({})).await.unwrap();
        let ToolResult::Success {
            payload: ToolPayload::Map(map),
        } = result
        else {
            panic!("expected map payload");
        };
        assert_eq!(map["red"], json!([255, 0, 0]));
    }

    #[tokio::test]
    async fn limits_include_speed_bounds() {
        let result = MovementLimitsTool.execute(json!({})).await.unwrap();
        let ToolResult::Success {
            payload: ToolPayload::Map(map),
        } = result
        else {
            panic!("expected map payload");
        };
        assert_eq!(map["speed"], json!([-2048.0, 2048.0]));
        assert_eq!(map["head_pitch"], json!([-5.0, 10.0]));
    }

    #[tokio::test]
    async fn command_codes_resolve() {
        let result = CommandCodesTool.execute(json!({})).await.unwrap();
        let ToolResult::Success {
            payload: ToolPayload::Map(map),
        } = result
        else {
            panic!("expected map payload");
        };
        assert_eq!(map["drive"], json!(0x02));
    }

    #[test]
    fn lookups_never_suspend() {
        assert!(!ListSoundsTool.may_suspend());
        assert!(!ListColorsTool.may_suspend());
        assert!(!MovementLimitsTool.may_suspend());
        assert!(!CommandCodesTool.may_suspend());
    }
}
