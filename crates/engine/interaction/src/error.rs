//! Error types for the interaction layer

use crate::session::ControllerId;
use handhold_physics::PhysicsError;
use thiserror::Error;

/// Errors raised while creating or updating a grab
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrabError {
    /// Controller already holds a constraint
    #[error("{0} is already grabbing")]
    AlreadyGrabbing(ControllerId),

    /// The physics world rejected the operation
    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of its allowed range
    #[error("Invalid config: {0}")]
    Invalid(String),
}
