//! Throttled gamepad polling into a [`ControlState`]

use crate::control::{ControlState, ControlValue};
use crate::error::PollError;
use crate::gamepad::{apply_radial_deadzone, quantize_axis, GamepadSnapshot};
use crate::profile::{ControlBinding, ControlLayout};
use glam::Vec2;

/// Default time between polls, in seconds
pub const DEFAULT_POLL_INTERVAL: f32 = 0.3;

/// What a poller tick did
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Interval has not elapsed yet
    Waiting,
    /// Interval elapsed but there is no control state to fill
    Skipped,
    /// Control state refreshed
    Polled,
    /// Snapshot could not be read; control state left unchanged
    Failed(PollError),
}

/// Reads raw gamepad values into a control state at a throttled rate
///
/// Polling runs less often than the frame rate to limit downstream UI churn.
#[derive(Debug, Clone)]
pub struct GamepadPoller {
    interval: f32,
    elapsed: f32,
    deadzone: f32,
}

impl Default for GamepadPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl GamepadPoller {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            deadzone: 0.0,
        }
    }

    /// Create a poller applying a radial deadzone to 2-axis controls
    pub fn with_deadzone(interval: f32, deadzone: f32) -> Self {
        Self {
            deadzone: deadzone.clamp(0.0, 0.9),
            ..Self::new(interval)
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Accumulate real elapsed time and poll once the interval is exceeded
    pub fn tick(
        &mut self,
        dt: f32,
        state: Option<&mut ControlState>,
        snapshot: Option<&GamepadSnapshot>,
    ) -> PollOutcome {
        self.elapsed += dt;
        if self.elapsed <= self.interval {
            return PollOutcome::Waiting;
        }
        self.elapsed = 0.0;
        self.poll_now(state, snapshot)
    }

    /// Poll immediately, ignoring the interval
    ///
    /// Reads are staged and committed together, so a bad index leaves every
    /// value as it was.
    pub fn poll_now(
        &self,
        state: Option<&mut ControlState>,
        snapshot: Option<&GamepadSnapshot>,
    ) -> PollOutcome {
        let Some(state) = state else {
            return PollOutcome::Skipped;
        };

        match self.read(state.layout(), snapshot) {
            Ok(values) => {
                state.commit(values);
                PollOutcome::Polled
            }
            Err(e) => {
                tracing::warn!("Gamepad poll failed, keeping previous state: {}", e);
                PollOutcome::Failed(e)
            }
        }
    }

    fn read(
        &self,
        layout: &ControlLayout,
        snapshot: Option<&GamepadSnapshot>,
    ) -> Result<Vec<(String, ControlValue)>, PollError> {
        let snapshot = snapshot.ok_or(PollError::NoSnapshot)?;
        let mut values = Vec::with_capacity(layout.len());

        for (name, binding) in layout.bindings() {
            let button = read_button(snapshot, name, binding.button())?;
            let value = match binding {
                ControlBinding::Button { .. } => ControlValue::Button(button),
                ControlBinding::Axis2D { x_axis, y_axis, .. } => {
                    let raw = Vec2::new(
                        read_axis(snapshot, name, x_axis)?,
                        read_axis(snapshot, name, y_axis)?,
                    );
                    let axes = apply_radial_deadzone(raw, self.deadzone);
                    ControlValue::Axis2D {
                        button,
                        x_axis: quantize_axis(axes.x),
                        y_axis: quantize_axis(axes.y),
                    }
                }
            };
            values.push((name.to_string(), value));
        }

        Ok(values)
    }
}

fn read_button(snapshot: &GamepadSnapshot, control: &str, index: usize) -> Result<f32, PollError> {
    snapshot.button(index).ok_or_else(|| PollError::ButtonOutOfRange {
        control: control.to_string(),
        index,
        len: snapshot.buttons.len(),
    })
}

fn read_axis(snapshot: &GamepadSnapshot, control: &str, index: usize) -> Result<f32, PollError> {
    snapshot.axis(index).ok_or_else(|| PollError::AxisOutOfRange {
        control: control.to_string(),
        index,
        len: snapshot.axes.len(),
    })
}
