use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::config::CameraConfig;

/// Maximum time to wait for a capture command to complete.
const CAPTURE_TIMEOUT_SECS: u64 = 15;
/// Maximum base64 payload size to return (2 MB of base64 ~ 1.5 MB image).
const MAX_BASE64_BYTES: usize = 2_097_152;

const PARAMS: &[ParamSpec] = &[ParamSpec::optional(
    "device",
    ParamKind::Text,
    "Capture device path, overriding the configured default",
)];

/// Captures one webcam frame using platform-native commands.
///
/// macOS: `imagesnap`
/// Linux: tries `fswebcam`, `ffmpeg` in order.
pub struct CameraSnapshotTool {
    config: CameraConfig,
}

impl CameraSnapshotTool {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Determine candidate capture commands for the current platform.
    fn capture_commands(device: &str, output_path: &str) -> Vec<Vec<String>> {
        if cfg!(target_os = "macos") {
            vec![vec![
                "imagesnap".into(),
                "-w".into(),
                "1".into(), // warm-up second so the frame is not black
                output_path.into(),
            ]]
        } else if cfg!(target_os = "linux") {
            vec![
                vec![
                    "fswebcam".into(),
                    "--no-banner".into(),
                    "-d".into(),
                    device.into(),
                    output_path.into(),
                ],
                vec![
                    "ffmpeg".into(),
                    "-f".into(),
                    "video4linux2".into(),
                    "-i".into(),
                    device.into(),
                    "-frames:v".into(),
                    "1".into(),
                    "-y".into(),
                    output_path.into(),
                ],
            ]
        } else {
            Vec::new()
        }
    }
}

#[async_trait]
impl Tool for CameraSnapshotTool {
    fn name(&self) -> &str {
        "camera_snapshot"
    }

    fn description(&self) -> &str {
        "Capture a single frame from the webcam and return it base64-encoded as a JPEG."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let device = args
            .get("device")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.config.device);

        let scratch = tempfile::tempdir()?;
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let output_path = scratch.path().join(format!("frame_{timestamp}.jpg"));
        let output_str = output_path.to_string_lossy().to_string();

        let commands = Self::capture_commands(device, &output_str);
        if commands.is_empty() {
            return Ok(ToolResult::failure(
                "webcam capture not supported on this platform",
            ));
        }

        let mut saw_spawnable_command = false;
        let mut last_failure: Option<String> = None;

        for mut cmd_args in commands {
            let program = cmd_args.remove(0);
            let result = tokio::time::timeout(
                Duration::from_secs(CAPTURE_TIMEOUT_SECS),
                tokio::process::Command::new(&program)
                    .args(&cmd_args)
                    .output(),
            )
            .await;

            match result {
                Err(_) => {
                    last_failure = Some(format!("{program} timed out"));
                }
                Ok(Err(e)) => {
                    // Missing binary; try the next candidate.
                    last_failure = Some(format!("{program}: {e}"));
                    continue;
                }
                Ok(Ok(output)) => {
                    saw_spawnable_command = true;
                    if !output.status.success() {
                        let stderr = String::from_utf8_lossy(&output.stderr);
                        last_failure =
                            Some(format!("{program} exited with {}: {}", output.status, stderr.trim()));
                        continue;
                    }
                    let bytes = tokio::fs::read(&output_path).await?;
                    let encoded = STANDARD.encode(&bytes);
                    if encoded.len() > MAX_BASE64_BYTES {
                        return Ok(ToolResult::failure(format!(
                            "captured frame too large: {} base64 bytes (max {})",
                            encoded.len(),
                            MAX_BASE64_BYTES
                        )));
                    }
                    tracing::info!(bytes = bytes.len(), %program, "webcam frame captured");
                    return Ok(ToolResult::image("image/jpeg", encoded));
                }
            }
        }

        let detail = last_failure.unwrap_or_else(|| "no capture command available".into());
        if saw_spawnable_command {
            Ok(ToolResult::failure(format!("webcam capture failed: {detail}")))
        } else {
            Ok(ToolResult::failure(format!(
                "no webcam capture command found (install fswebcam or ffmpeg): {detail}"
            )))
        }
    }
}
