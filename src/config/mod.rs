//! TOML-backed configuration.
//!
//! Every field has a serde default, so an absent file or an empty table is a
//! valid configuration. An explicitly passed path must exist; the default
//! path is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub device: DeviceConfig,
    pub camera: CameraConfig,
    pub http_ping: HttpPingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Upper bound on one discovery scan during connect.
    pub discovery_timeout_secs: u64,
    /// Artificial per-command latency of the simulated backend.
    pub sim_latency_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_secs: 30,
            sim_latency_ms: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Capture device path handed to the platform capture command.
    pub device: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpPingConfig {
    pub timeout_secs: u64,
}

impl Default for HttpPingConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Config {
    /// Default config path: `<user config dir>/dashclaw/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dashclaw")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the config. An explicit path must exist and parse; without one,
    /// the default path is read if present, else defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path)
                    .with_context(|| format!("failed to load config from {}", path.display())),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.gateway.port, 8787);
        assert_eq!(config.device.discovery_timeout_secs, 30);
        assert_eq!(config.camera.device, "/dev/video0");
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\nport = 9000").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.http_ping.timeout_secs, 10);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/dashclaw.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn partial_device_table_fills_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[device]\ndiscovery_timeout_secs = 5").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.device.discovery_timeout_secs, 5);
        assert_eq!(config.device.sim_latency_ms, 25);
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed, config);
    }
}
