//! Configuration loaded from a TOML file
//!
//! Every field has a default, so an empty file (or no file) gives the
//! stock behavior.

use crate::error::ConfigError;
use crate::stepper::{StepMode, DEFAULT_TIMESTEP};
use devices::DEFAULT_POLL_INTERVAL;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandholdConfig {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
    #[serde(default = "default_timestep")]
    pub timestep: f32,
    #[serde(default)]
    pub step_mode: StepMode,
    /// Upper bound on steps per tick in accumulated mode
    #[serde(default = "default_max_substeps")]
    pub max_substeps: u32,
}

fn default_gravity() -> [f32; 3] {
    [0.0, -10.0, 0.0]
}

fn default_timestep() -> f32 {
    DEFAULT_TIMESTEP
}

fn default_max_substeps() -> u32 {
    4
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            timestep: default_timestep(),
            step_mode: StepMode::default(),
            max_substeps: default_max_substeps(),
        }
    }
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Depth change per tick at full axis deflection, in meters
    #[serde(default = "default_depth_gain")]
    pub depth_gain: f32,
    /// Logical control whose y axis drives grab depth
    #[serde(default = "default_depth_control")]
    pub depth_control: String,
    /// Visual ray length when nothing is hit
    #[serde(default = "default_far_ray_length")]
    pub far_ray_length: f32,
    /// Furthest distance at which a body can be picked
    #[serde(default = "default_max_pick_distance")]
    pub max_pick_distance: f32,
    #[serde(default = "default_min_depth")]
    pub min_depth: f32,
    #[serde(default = "default_max_depth")]
    pub max_depth: f32,
}

fn default_depth_gain() -> f32 {
    0.04
}

fn default_depth_control() -> String {
    "xr_standard_thumbstick".to_string()
}

fn default_far_ray_length() -> f32 {
    10.0
}

fn default_max_pick_distance() -> f32 {
    100.0
}

fn default_min_depth() -> f32 {
    0.05
}

fn default_max_depth() -> f32 {
    10.0
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            depth_gain: default_depth_gain(),
            depth_control: default_depth_control(),
            far_ray_length: default_far_ray_length(),
            max_pick_distance: default_max_pick_distance(),
            min_depth: default_min_depth(),
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Seconds between gamepad polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval: f32,
    /// Radial deadzone applied to 2-axis controls
    #[serde(default)]
    pub axis_deadzone: f32,
    /// Directory holding `profilesList.json` and the profile files
    #[serde(default = "default_profiles_path")]
    pub profiles_path: PathBuf,
    /// Profile used when a device matches none of the known profiles
    #[serde(default = "default_profile")]
    pub default_profile: Option<String>,
}

fn default_poll_interval() -> f32 {
    DEFAULT_POLL_INTERVAL
}

fn default_profiles_path() -> PathBuf {
    PathBuf::from("profiles")
}

fn default_profile() -> Option<String> {
    Some("generic-trigger".to_string())
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            axis_deadzone: 0.0,
            profiles_path: default_profiles_path(),
            default_profile: default_profile(),
        }
    }
}

impl HandholdConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: HandholdConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.physics.timestep) {
            return Err(invalid(format!(
                "physics.timestep must be positive, got {}",
                self.physics.timestep
            )));
        }
        if self.physics.max_substeps == 0 {
            return Err(invalid("physics.max_substeps must be at least 1".to_string()));
        }
        if !non_negative(self.input.poll_interval) {
            return Err(invalid(format!(
                "input.poll_interval must not be negative, got {}",
                self.input.poll_interval
            )));
        }
        if !(0.0..=0.9).contains(&self.input.axis_deadzone) {
            return Err(invalid(format!(
                "input.axis_deadzone must be within [0, 0.9], got {}",
                self.input.axis_deadzone
            )));
        }
        let interaction = &self.interaction;
        let ordered = interaction.min_depth.partial_cmp(&interaction.max_depth) == Some(Ordering::Less);
        if !positive(interaction.min_depth) || !ordered {
            return Err(invalid(format!(
                "interaction depth range [{}, {}] is empty",
                interaction.min_depth, interaction.max_depth
            )));
        }
        if !positive(interaction.far_ray_length) || !positive(interaction.max_pick_distance) {
            return Err(invalid(
                "interaction.far_ray_length and max_pick_distance must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

// NaN fails both checks
fn positive(value: f32) -> bool {
    value > 0.0
}

fn non_negative(value: f32) -> bool {
    value >= 0.0
}
