//! Uniform control state built from a resolved layout

use crate::profile::{ControlBinding, ControlLayout};
use glam::Vec2;
use std::collections::BTreeMap;

/// Current value of one logical control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Button(f32),
    Axis2D { button: f32, x_axis: f32, y_axis: f32 },
}

impl ControlValue {
    fn zero_for(binding: ControlBinding) -> Self {
        match binding {
            ControlBinding::Button { .. } => ControlValue::Button(0.0),
            ControlBinding::Axis2D { .. } => ControlValue::Axis2D {
                button: 0.0,
                x_axis: 0.0,
                y_axis: 0.0,
            },
        }
    }

    pub fn button(&self) -> f32 {
        match *self {
            ControlValue::Button(value) => value,
            ControlValue::Axis2D { button, .. } => button,
        }
    }

    pub fn axes(&self) -> Option<Vec2> {
        match *self {
            ControlValue::Button(_) => None,
            ControlValue::Axis2D { x_axis, y_axis, .. } => Some(Vec2::new(x_axis, y_axis)),
        }
    }
}

/// Per-controller control values keyed by logical control name
///
/// Created zeroed from a [`ControlLayout`] once the profile resolves, then
/// refreshed by the [`GamepadPoller`](crate::poller::GamepadPoller).
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    layout: ControlLayout,
    values: BTreeMap<String, ControlValue>,
}

impl ControlState {
    /// Zero-initialized state for every control in the layout
    pub fn new(layout: ControlLayout) -> Self {
        let values = layout
            .bindings()
            .map(|(name, binding)| (name.to_string(), ControlValue::zero_for(binding)))
            .collect();
        Self { layout, values }
    }

    pub fn layout(&self) -> &ControlLayout {
        &self.layout
    }

    pub fn value(&self, name: &str) -> Option<ControlValue> {
        self.values.get(name).copied()
    }

    /// Button value of a control, 0.0 when the control is unknown
    pub fn button(&self, name: &str) -> f32 {
        self.value(name).map(|v| v.button()).unwrap_or(0.0)
    }

    /// Axis pair of a control, zero when the control is unknown or has no axes
    pub fn axes(&self, name: &str) -> Vec2 {
        self.value(name).and_then(|v| v.axes()).unwrap_or(Vec2::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ControlValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Replace values wholesale; unknown names are ignored
    pub(crate) fn commit(&mut self, values: Vec<(String, ControlValue)>) {
        for (name, value) in values {
            if let Some(slot) = self.values.get_mut(&name) {
                *slot = value;
            }
        }
    }
}
