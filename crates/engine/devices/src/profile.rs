//! Input profile descriptors and resolved control layouts
//!
//! Descriptors follow the WebXR input-profile JSON schema. A descriptor is
//! reduced once, at connection time, to a [`ControlLayout`]: a map from
//! logical control name to a tagged [`ControlBinding`]. Nothing downstream
//! inspects control names again.

use crate::error::{ProfileError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which hand a controller is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    #[default]
    None,
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::None => "none",
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the controller's pointing ray is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRayMode {
    /// Ray follows a tracked handheld pointer
    #[default]
    TrackedPointer,
    /// Ray follows the head gaze
    Gaze,
    /// Ray comes from a screen tap
    Screen,
}

/// Raw indices of one component in the gamepad arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamepadIndices {
    pub button: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<usize>,
}

/// One physical component (trigger, squeeze, thumbstick, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub root_node_name: String,
    pub gamepad_indices: GamepadIndices,
}

/// Components available for one handedness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_component_id: Option<String>,
    pub components: BTreeMap<String, ComponentDescriptor>,
}

/// A device profile: layouts keyed by handedness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDescriptor {
    pub profile_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_profile_ids: Vec<String>,
    pub layouts: BTreeMap<String, LayoutDescriptor>,
}

impl ProfileDescriptor {
    /// Parse a profile from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pick the layout for a hand
    ///
    /// Exact handedness first, then the shared `left-right` and
    /// `left-right-none` layouts used by symmetric devices.
    pub fn layout_for(&self, handedness: Handedness) -> Result<&LayoutDescriptor> {
        let keys: &[&str] = match handedness {
            Handedness::Left => &["left", "left-right", "left-right-none"],
            Handedness::Right => &["right", "left-right", "left-right-none"],
            Handedness::None => &["none", "left-right-none"],
        };

        keys.iter()
            .find_map(|key| self.layouts.get(*key))
            .ok_or_else(|| ProfileError::MissingLayout {
                profile: self.profile_id.clone(),
                handedness,
            })
    }
}

/// How a logical control maps onto the raw gamepad arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlBinding {
    /// Single pressable value
    Button { button: usize },
    /// Thumbstick or touchpad: a button plus two axes
    Axis2D {
        button: usize,
        x_axis: usize,
        y_axis: usize,
    },
}

impl ControlBinding {
    pub fn button(&self) -> usize {
        match *self {
            ControlBinding::Button { button } | ControlBinding::Axis2D { button, .. } => button,
        }
    }

    pub fn is_axis(&self) -> bool {
        matches!(self, ControlBinding::Axis2D { .. })
    }
}

/// Whether a control name denotes a 2-axis control
fn is_axis_control(name: &str) -> bool {
    name.contains("touchpad") || name.contains("thumbstick")
}

/// Resolved per-handedness mapping from control name to binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLayout {
    profile_id: String,
    bindings: BTreeMap<String, ControlBinding>,
}

impl ControlLayout {
    /// Build a layout from a descriptor's layout for one hand
    ///
    /// Controls are keyed by the component's root node name.
    pub fn from_descriptor(profile_id: &str, layout: &LayoutDescriptor) -> Result<Self> {
        let mut bindings = BTreeMap::new();

        for component in layout.components.values() {
            let name = component.root_node_name.clone();
            let indices = component.gamepad_indices;

            let binding = if is_axis_control(&name) {
                match (indices.x_axis, indices.y_axis) {
                    (Some(x_axis), Some(y_axis)) => ControlBinding::Axis2D {
                        button: indices.button,
                        x_axis,
                        y_axis,
                    },
                    _ => {
                        return Err(ProfileError::MissingAxis {
                            profile: profile_id.to_string(),
                            control: name,
                        })
                    }
                }
            } else {
                ControlBinding::Button {
                    button: indices.button,
                }
            };

            bindings.insert(name, binding);
        }

        Ok(Self {
            profile_id: profile_id.to_string(),
            bindings,
        })
    }

    /// Build a layout directly from bindings
    pub fn from_bindings(
        profile_id: impl Into<String>,
        bindings: impl IntoIterator<Item = (String, ControlBinding)>,
    ) -> Self {
        Self {
            profile_id: profile_id.into(),
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn get(&self, name: &str) -> Option<ControlBinding> {
        self.bindings.get(name).copied()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, ControlBinding)> {
        self.bindings.iter().map(|(name, binding)| (name.as_str(), *binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
