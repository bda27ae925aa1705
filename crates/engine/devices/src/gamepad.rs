//! Raw gamepad snapshots and analog processing
//!
//! A snapshot is the button and axis arrays an XR input source reports for
//! one frame. Values are read from it by index through a
//! [`ControlLayout`](crate::profile::ControlLayout).

use glam::Vec2;

/// Button and axis values reported by an input source for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Button values (0.0 to 1.0)
    pub buttons: Vec<f32>,
    /// Axis values (-1.0 to 1.0)
    pub axes: Vec<f32>,
}

impl GamepadSnapshot {
    pub fn new(buttons: Vec<f32>, axes: Vec<f32>) -> Self {
        Self { buttons, axes }
    }

    /// Zeroed snapshot with the given array sizes
    pub fn zeroed(button_count: usize, axis_count: usize) -> Self {
        Self {
            buttons: vec![0.0; button_count],
            axes: vec![0.0; axis_count],
        }
    }

    pub fn button(&self, index: usize) -> Option<f32> {
        self.buttons.get(index).copied()
    }

    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }

    /// Set a button value, growing the array if needed
    pub fn set_button(&mut self, index: usize, value: f32) {
        if self.buttons.len() <= index {
            self.buttons.resize(index + 1, 0.0);
        }
        self.buttons[index] = value;
    }

    /// Set an axis value, growing the array if needed
    pub fn set_axis(&mut self, index: usize, value: f32) {
        if self.axes.len() <= index {
            self.axes.resize(index + 1, 0.0);
        }
        self.axes[index] = value;
    }
}

/// Round an axis reading to hundredths
///
/// Controllers report noisy low-order digits that would otherwise churn the
/// control state every poll.
pub fn quantize_axis(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Apply radial deadzone to an analog stick input
///
/// Uses a circular deadzone which feels more natural than per-axis deadzone.
/// A deadzone of zero passes the input through untouched.
pub fn apply_radial_deadzone(raw: Vec2, deadzone: f32) -> Vec2 {
    if deadzone <= 0.0 {
        return raw;
    }

    let magnitude = raw.length();

    if magnitude < deadzone {
        Vec2::ZERO
    } else {
        // Renormalize to make the usable range 0-1
        let normalized = raw.normalize_or_zero();
        let adjusted_magnitude = ((magnitude - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0);
        normalized * adjusted_magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_access() {
        let snapshot = GamepadSnapshot::new(vec![1.0, 0.5], vec![0.0, 0.0, 0.25, -1.0]);
        assert_eq!(snapshot.button(1), Some(0.5));
        assert_eq!(snapshot.button(2), None);
        assert_eq!(snapshot.axis(3), Some(-1.0));
        assert_eq!(snapshot.axis(4), None);
    }

    #[test]
    fn test_snapshot_grows_on_set() {
        let mut snapshot = GamepadSnapshot::default();
        snapshot.set_axis(3, 0.7);
        assert_eq!(snapshot.axes, vec![0.0, 0.0, 0.0, 0.7]);
        snapshot.set_button(0, 1.0);
        assert_eq!(snapshot.buttons, vec![1.0]);
    }

    #[test]
    fn test_quantize_axis() {
        assert_eq!(quantize_axis(1.0), 1.0);
        assert_eq!(quantize_axis(-1.0), -1.0);
        assert_eq!(quantize_axis(0.0), 0.0);
        assert!((quantize_axis(0.12345) - 0.12).abs() < 1e-6);
        assert!((quantize_axis(-0.678) + 0.68).abs() < 1e-6);
    }

    #[test]
    fn test_deadzone_processing() {
        // Small input should be filtered out
        assert_eq!(apply_radial_deadzone(Vec2::new(0.1, 0.1), 0.15), Vec2::ZERO);

        // Large input should be processed
        let out = apply_radial_deadzone(Vec2::new(0.8, 0.0), 0.15);
        assert!(out.x > 0.0 && out.x < 0.8);

        // Full deflection stays full
        let out = apply_radial_deadzone(Vec2::new(0.0, -1.0), 0.15);
        assert!((out.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_deadzone_passthrough() {
        let raw = Vec2::new(0.03, -0.5);
        assert_eq!(apply_radial_deadzone(raw, 0.0), raw);
    }
}
