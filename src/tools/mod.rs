//! Tool subsystem: the callable surface exposed to remote operators.
//!
//! Each operation implements the [`Tool`] trait defined in [`traits`], which
//! requires a name, description, a static parameter table, and an async
//! `execute` method returning a [`ToolResult`] envelope. Tools are assembled
//! into a [`ToolRegistry`] by [`build_registry`]; the registry validates
//! arguments against the declared tables and converts handler faults into
//! failure envelopes, so no invocation can take the process down.
//!
//! Device-scoped tools share one [`DeviceSession`] injected at construction
//! time; lookup tools are stateless.

pub mod camera_snapshot;
pub mod connect;
pub mod disconnect;
pub mod drive;
pub mod head;
pub mod http_ping;
pub mod lights;
pub mod lookup;
pub mod play_sound;
pub mod registry;
pub mod spin;
pub mod stop;
pub mod traits;
pub mod turn;

pub use camera_snapshot::CameraSnapshotTool;
pub use connect::ConnectTool;
pub use disconnect::DisconnectTool;
pub use drive::DriveTool;
pub use head::HeadTool;
pub use http_ping::HttpPingTool;
pub use lights::LightsTool;
pub use lookup::{CommandCodesTool, ListColorsTool, ListSoundsTool, MovementLimitsTool};
pub use play_sound::PlaySoundTool;
pub use registry::{DispatchError, ToolRegistry};
pub use spin::SpinTool;
pub use stop::StopTool;
pub use traits::Tool;
#[allow(unused_imports)]
pub use traits::{ParamDefault, ParamKind, ParamSpec, ToolPayload, ToolResult, ToolSpec};
pub use turn::TurnTool;

use crate::config::Config;
use crate::device::DeviceSession;
use std::sync::Arc;

/// Create the full tool catalog for one device session.
pub fn all_tools(session: Arc<DeviceSession>, config: &Config) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(ConnectTool::new(session.clone())),
        Box::new(DisconnectTool::new(session.clone())),
        Box::new(DriveTool::new(session.clone())),
        Box::new(SpinTool::new(session.clone())),
        Box::new(StopTool::new(session.clone())),
        Box::new(TurnTool::new(session.clone())),
        Box::new(HeadTool::new(session.clone())),
        Box::new(LightsTool::new(session.clone())),
        Box::new(PlaySoundTool::new(session)),
        Box::new(ListSoundsTool),
        Box::new(ListColorsTool),
        Box::new(MovementLimitsTool),
        Box::new(CommandCodesTool),
        Box::new(CameraSnapshotTool::new(config.camera.clone())),
        Box::new(HttpPingTool::new(config.http_ping.clone())),
    ]
}

/// Register the full catalog into a fresh registry.
///
/// Names are static and unique by construction; a collision here is a
/// programming error surfaced at startup, not at call time.
pub fn build_registry(
    session: Arc<DeviceSession>,
    config: &Config,
) -> Result<ToolRegistry, DispatchError> {
    let mut registry = ToolRegistry::new();
    for tool in all_tools(session, config) {
        registry.register(tool)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::sim::{SimulatedDiscovery, SimulatedDriver};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn test_session() -> Arc<DeviceSession> {
        let driver = Arc::new(SimulatedDriver::new());
        Arc::new(DeviceSession::new(
            Arc::new(SimulatedDiscovery::new(driver)),
            Duration::from_secs(5),
            CancellationToken::new(),
        ))
    }

    #[test]
    fn all_tools_has_expected_count() {
        let tools = all_tools(test_session(), &Config::default());
        assert_eq!(tools.len(), 15);
    }

    #[test]
    fn all_tools_names() {
        let tools = all_tools(test_session(), &Config::default());
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        for expected in [
            "connect",
            "disconnect",
            "drive",
            "spin",
            "stop",
            "turn",
            "head",
            "set_lights",
            "play_sound",
            "list_sounds",
            "list_colors",
            "movement_limits",
            "command_codes",
            "camera_snapshot",
            "http_ping",
        ] {
            assert!(names.contains(&expected), "missing tool {expected}");
        }
    }

    #[test]
    fn all_tools_have_descriptions() {
        let tools = all_tools(test_session(), &Config::default());
        for tool in &tools {
            assert!(
                !tool.description().is_empty(),
                "Tool {} has empty description",
                tool.name()
            );
        }
    }

    #[test]
    fn all_tools_have_object_schemas() {
        let tools = all_tools(test_session(), &Config::default());
        for tool in &tools {
            let spec = tool.spec();
            assert!(
                spec.parameters.is_object(),
                "Tool {} schema is not an object",
                tool.name()
            );
            assert!(
                spec.parameters["properties"].is_object(),
                "Tool {} schema has no properties",
                tool.name()
            );
        }
    }

    #[test]
    fn device_tools_declare_suspension() {
        let tools = all_tools(test_session(), &Config::default());
        for tool in &tools {
            let expect_suspend = !matches!(
                tool.name(),
                "list_sounds" | "list_colors" | "movement_limits" | "command_codes"
            );
            assert_eq!(
                tool.may_suspend(),
                expect_suspend,
                "unexpected may_suspend for {}",
                tool.name()
            );
        }
    }

    #[test]
    fn registry_builds_without_collisions() {
        let registry = build_registry(test_session(), &Config::default()).unwrap();
        assert_eq!(registry.len(), 15);
        assert!(registry.contains("turn"));
    }
}
