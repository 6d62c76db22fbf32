//! The driver capability seam.
//!
//! `DeviceDriver` is the opaque asynchronous interface the session manager
//! issues low-level actuation through. The radio transport behind it is out
//! of scope for this crate; the shipped backend is [`crate::device::sim`],
//! and a BLE-backed implementation plugs in behind the same trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Fault reported by the transport underneath any driver operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type DriverResult<T> = Result<T, TransportError>;

/// A resolved 8-bit RGB color. Drivers take resolved colors, not names;
/// name lookup happens against the catalog before an intent is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Which ear LED a color change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarSide {
    Left,
    Right,
}

/// Reset flavor passed to the device on cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Gentle cleanup: halts motion and restores default pose and lights.
    Soft,
}

impl ResetMode {
    pub fn wire_code(self) -> u8 {
        match self {
            ResetMode::Soft => 4,
        }
    }
}

/// Asynchronous actuation primitives for one connected robot.
///
/// Every operation may suspend and may fail with a [`TransportError`]. The
/// session manager is the only caller and serializes motion on top of this;
/// implementations do not need their own locking.
#[async_trait]
pub trait DeviceDriver: Send + Sync {
    async fn drive(&self, speed: i32) -> DriverResult<()>;

    async fn spin(&self, speed: i32) -> DriverResult<()>;

    async fn stop(&self) -> DriverResult<()>;

    async fn head_yaw(&self, degrees: f64) -> DriverResult<()>;

    async fn head_pitch(&self, degrees: f64) -> DriverResult<()>;

    async fn eye_brightness(&self, value: u8) -> DriverResult<()>;

    async fn neck_color(&self, color: Rgb) -> DriverResult<()>;

    async fn ear_color(&self, side: EarSide, color: Rgb) -> DriverResult<()>;

    async fn play_sound(&self, name: &str) -> DriverResult<()>;

    async fn reset(&self, mode: ResetMode) -> DriverResult<()>;

    async fn disconnect(&self) -> DriverResult<()>;
}

/// Discovers and connects to a nearby robot.
///
/// `Ok(None)` means the scan completed without finding a compatible device;
/// `Err` means the transport itself failed.
#[async_trait]
pub trait DriverDiscovery: Send + Sync {
    async fn discover(&self) -> DriverResult<Option<Arc<dyn DeviceDriver>>>;
}
