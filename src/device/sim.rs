//! Simulated driver backend.
//!
//! Stands in for the BLE transport: every primitive is recorded in an
//! inspectable action log and mirrored to the tracing output. The binary
//! wires this backend by default; tests use the log for exact-sequence
//! assertions and the failure knob for fault-path coverage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::driver::{
    DeviceDriver, DriverDiscovery, DriverResult, EarSide, ResetMode, Rgb, TransportError,
};

/// One recorded driver primitive, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverAction {
    Drive(i32),
    Spin(i32),
    Stop,
    HeadYaw(f64),
    HeadPitch(f64),
    EyeBrightness(u8),
    NeckColor(Rgb),
    EarColor(EarSide, Rgb),
    PlaySound(String),
    Reset(u8),
    Disconnect,
}

#[derive(Default)]
struct SimState {
    actions: Vec<DriverAction>,
    /// When set, every subsequent primitive fails with this message.
    failure: Option<String>,
}

/// In-process robot that records everything it is asked to do.
pub struct SimulatedDriver {
    state: Mutex<SimState>,
    /// Artificial per-primitive latency, mimicking radio round-trips.
    action_delay: Duration,
}

impl SimulatedDriver {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(action_delay: Duration) -> Self {
        Self {
            state: Mutex::new(SimState::default()),
            action_delay,
        }
    }

    /// Makes every subsequent primitive fail. `None` clears the fault.
    pub fn set_failure(&self, message: Option<&str>) {
        self.state.lock().failure = message.map(String::from);
    }

    /// Snapshot of the primitives issued so far, in order.
    pub fn actions(&self) -> Vec<DriverAction> {
        self.state.lock().actions.clone()
    }

    async fn record(&self, action: DriverAction) -> DriverResult<()> {
        if !self.action_delay.is_zero() {
            tokio::time::sleep(self.action_delay).await;
        }
        let mut state = self.state.lock();
        if let Some(message) = &state.failure {
            return Err(TransportError::new(message.clone()));
        }
        tracing::debug!(?action, "sim driver");
        state.actions.push(action);
        Ok(())
    }
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceDriver for SimulatedDriver {
    async fn drive(&self, speed: i32) -> DriverResult<()> {
        self.record(DriverAction::Drive(speed)).await
    }

    async fn spin(&self, speed: i32) -> DriverResult<()> {
        self.record(DriverAction::Spin(speed)).await
    }

    async fn stop(&self) -> DriverResult<()> {
        self.record(DriverAction::Stop).await
    }

    async fn head_yaw(&self, degrees: f64) -> DriverResult<()> {
        self.record(DriverAction::HeadYaw(degrees)).await
    }

    async fn head_pitch(&self, degrees: f64) -> DriverResult<()> {
        self.record(DriverAction::HeadPitch(degrees)).await
    }

    async fn eye_brightness(&self, value: u8) -> DriverResult<()> {
        self.record(DriverAction::EyeBrightness(value)).await
    }

    async fn neck_color(&self, color: Rgb) -> DriverResult<()> {
        self.record(DriverAction::NeckColor(color)).await
    }

    async fn ear_color(&self, side: EarSide, color: Rgb) -> DriverResult<()> {
        self.record(DriverAction::EarColor(side, color)).await
    }

    async fn play_sound(&self, name: &str) -> DriverResult<()> {
        self.record(DriverAction::PlaySound(name.to_string())).await
    }

    async fn reset(&self, mode: ResetMode) -> DriverResult<()> {
        self.record(DriverAction::Reset(mode.wire_code())).await
    }

    async fn disconnect(&self) -> DriverResult<()> {
        self.record(DriverAction::Disconnect).await
    }
}

/// Discovery that hands out a fixed simulated robot.
pub struct SimulatedDiscovery {
    driver: Arc<SimulatedDriver>,
    /// Artificial scan time before the robot is "found".
    scan_delay: Duration,
    found: bool,
}

impl SimulatedDiscovery {
    pub fn new(driver: Arc<SimulatedDriver>) -> Self {
        Self {
            driver,
            scan_delay: Duration::ZERO,
            found: true,
        }
    }

    pub fn with_scan_delay(mut self, scan_delay: Duration) -> Self {
        self.scan_delay = scan_delay;
        self
    }

    /// A scan that completes without finding any robot.
    pub fn finding_nothing(mut self) -> Self {
        self.found = false;
        self
    }
}

#[async_trait]
impl DriverDiscovery for SimulatedDiscovery {
    async fn discover(&self) -> DriverResult<Option<Arc<dyn DeviceDriver>>> {
        if !self.scan_delay.is_zero() {
            tokio::time::sleep(self.scan_delay).await;
        }
        if !self.found {
            return Ok(None);
        }
        tracing::info!("simulated robot discovered");
        Ok(Some(self.driver.clone() as Arc<dyn DeviceDriver>))
    }
}
