//! Device session management.
//!
//! One process owns one robot. [`DeviceSession`] is the single authority over
//! whether that robot is connected and whether it is safe to issue a new
//! motion command. It is created by the entry point and passed as an `Arc`
//! into every device-scoped tool, never reached through a global.

pub mod catalog;
pub mod driver;
pub mod motion;
pub mod sim;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use driver::{DeviceDriver, DriverDiscovery, EarSide, ResetMode, TransportError};
use motion::{MotionIntent, TurnPlan};

/// Errors surfaced by session operations. Expected conditions are explicit
/// variants checked by callers, not exceptions caught at a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("robot is not connected; run connect first")]
    NotConnected,
    #[error("a connection attempt is already in progress or the robot is already connected")]
    AlreadyConnectingOrConnected,
    #[error("another motion command is in flight")]
    DeviceBusy,
    #[error("no compatible robot found")]
    NoDeviceFound,
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },
    #[error("motion cancelled by shutdown")]
    Cancelled,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Connection lifecycle. The driver handle lives inside `Connected`, so
/// "handle present iff connected" holds by construction.
enum SessionState {
    Disconnected,
    Connecting,
    Connected(Arc<dyn DeviceDriver>),
}

/// Externally visible connection phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Disconnected,
    Connecting,
    Connected,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Disconnected => "disconnected",
            SessionPhase::Connecting => "connecting",
            SessionPhase::Connected => "connected",
        }
    }
}

/// The relationship to at most one physical robot.
///
/// State transitions are guarded but not fully serialized: concurrent
/// `connect` calls racing is a known narrow window, accepted because one
/// human operator drives the system at a time. Motion, by contrast, is
/// strictly serialized by the non-blocking motion guard.
pub struct DeviceSession {
    discovery: Arc<dyn DriverDiscovery>,
    discovery_timeout: Duration,
    state: Mutex<SessionState>,
    /// At most one in-flight motion sequence. `try_lock` only: contention is
    /// an immediate rejection, never a queued wait. Arc'd so a turn sequence
    /// can hold an owned guard from a detached task.
    motion: Arc<tokio::sync::Mutex<()>>,
    shutdown: CancellationToken,
}

impl DeviceSession {
    pub fn new(
        discovery: Arc<dyn DriverDiscovery>,
        discovery_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            discovery,
            discovery_timeout,
            state: Mutex::new(SessionState::Disconnected),
            motion: Arc::new(tokio::sync::Mutex::new(())),
            shutdown,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match *self.state.lock() {
            SessionState::Disconnected => SessionPhase::Disconnected,
            SessionState::Connecting => SessionPhase::Connecting,
            SessionState::Connected(_) => SessionPhase::Connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.phase() == SessionPhase::Connected
    }

    fn driver(&self) -> Result<Arc<dyn DeviceDriver>, DeviceError> {
        match &*self.state.lock() {
            SessionState::Connected(driver) => Ok(driver.clone()),
            _ => Err(DeviceError::NotConnected),
        }
    }

    /// Discovers and connects to a robot. Fails without side effects unless
    /// the session is `Disconnected`.
    pub async fn connect(&self) -> Result<(), DeviceError> {
        {
            let mut state = self.state.lock();
            if !matches!(*state, SessionState::Disconnected) {
                return Err(DeviceError::AlreadyConnectingOrConnected);
            }
            *state = SessionState::Connecting;
        }

        let outcome =
            tokio::time::timeout(self.discovery_timeout, self.discovery.discover()).await;

        let mut state = self.state.lock();
        match outcome {
            Ok(Ok(Some(driver))) => {
                tracing::info!("robot connected");
                *state = SessionState::Connected(driver);
                Ok(())
            }
            Ok(Ok(None)) => {
                *state = SessionState::Disconnected;
                Err(DeviceError::NoDeviceFound)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "connection attempt failed");
                *state = SessionState::Disconnected;
                Err(DeviceError::Transport(e))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.discovery_timeout.as_secs(),
                    "discovery timed out"
                );
                *state = SessionState::Disconnected;
                Err(DeviceError::NoDeviceFound)
            }
        }
    }

    /// Soft-resets and disconnects. Cleanup is unconditional: the session is
    /// `Disconnected` afterwards even when either driver call fails.
    pub async fn disconnect(&self) -> Result<(), DeviceError> {
        let driver = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, SessionState::Disconnected) {
                SessionState::Connected(driver) => driver,
                other => {
                    *state = other;
                    return Err(DeviceError::NotConnected);
                }
            }
        };

        if let Err(e) = driver.reset(ResetMode::Soft).await {
            tracing::warn!(error = %e, "soft reset during disconnect failed");
        }
        if let Err(e) = driver.disconnect().await {
            tracing::warn!(error = %e, "driver disconnect failed");
        }
        tracing::info!("robot disconnected");
        Ok(())
    }

    /// Forwards a single validated intent to the driver, holding the motion
    /// guard for the duration. The guard is released on every exit path.
    pub async fn execute(&self, intent: MotionIntent) -> Result<(), DeviceError> {
        intent.validate()?;
        let driver = self.driver()?;
        let _guard = self
            .motion
            .try_lock()
            .map_err(|_| DeviceError::DeviceBusy)?;
        self.forward(&driver, &intent).await
    }

    async fn forward(
        &self,
        driver: &Arc<dyn DeviceDriver>,
        intent: &MotionIntent,
    ) -> Result<(), DeviceError> {
        match intent {
            MotionIntent::Drive { speed } => driver.drive(*speed).await?,
            MotionIntent::Spin { speed } => driver.spin(*speed).await?,
            MotionIntent::Stop => driver.stop().await?,
            MotionIntent::Head { yaw, pitch } => {
                driver.head_yaw(*yaw).await?;
                driver.head_pitch(*pitch).await?;
            }
            MotionIntent::Lights {
                eye_brightness,
                neck,
                left_ear,
                right_ear,
            } => {
                if let Some(value) = eye_brightness {
                    driver.eye_brightness(*value).await?;
                }
                // Validation has resolved these names already.
                if let Some(color) = neck.as_deref().and_then(catalog::resolve_color) {
                    driver.neck_color(color).await?;
                }
                if let Some(color) = left_ear.as_deref().and_then(catalog::resolve_color) {
                    driver.ear_color(EarSide::Left, color).await?;
                }
                if let Some(color) = right_ear.as_deref().and_then(catalog::resolve_color) {
                    driver.ear_color(EarSide::Right, color).await?;
                }
            }
        }
        Ok(())
    }

    /// Runs a bounded rotation as spin, timed wait, stop: one motion
    /// sequence under one guard. A zero-degree turn succeeds without
    /// contacting the driver.
    ///
    /// The sequence runs as a detached task: a caller that goes away
    /// mid-rotation does not strand the robot spinning. Only shutdown
    /// cancels the wait, and even then the final stop is still attempted.
    pub async fn turn(&self, degrees: f64, deg_per_sec: f64) -> Result<(), DeviceError> {
        let plan = TurnPlan::new(degrees, deg_per_sec)?;
        let driver = self.driver()?;
        let Some(plan) = plan else {
            return Ok(());
        };

        let guard = self
            .motion
            .clone()
            .try_lock_owned()
            .map_err(|_| DeviceError::DeviceBusy)?;
        let shutdown = self.shutdown.clone();

        let sequence = tokio::spawn(async move {
            let _guard = guard;

            // A spin failure aborts the sequence before the wait or the stop.
            driver.spin(plan.spin_speed).await?;

            let cancelled = tokio::select! {
                () = tokio::time::sleep(plan.wait) => false,
                () = shutdown.cancelled() => true,
            };

            if cancelled {
                if let Err(e) = driver.stop().await {
                    tracing::warn!(error = %e, "stop after cancelled turn failed");
                }
                return Err(DeviceError::Cancelled);
            }

            driver.stop().await?;
            Ok(())
        });

        match sequence.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DeviceError::Transport(TransportError::new(format!(
                "turn sequence task failed: {e}"
            )))),
        }
    }

    /// Plays a named sound effect. Not a motion: does not take the guard.
    pub async fn play_sound(&self, name: &str) -> Result<(), DeviceError> {
        if !catalog::sound_exists(name) {
            return Err(DeviceError::InvalidArgument {
                param: "name",
                reason: format!("unknown sound `{name}`"),
            });
        }
        let driver = self.driver()?;
        driver.play_sound(name).await?;
        Ok(())
    }

    /// Graceful teardown for process exit: cancels in-flight timed waits,
    /// then disconnects if connected.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        if self.is_connected() {
            if let Err(e) = self.disconnect().await {
                tracing::warn!(error = %e, "disconnect during shutdown failed");
            }
        }
    }
}
