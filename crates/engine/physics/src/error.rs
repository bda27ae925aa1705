//! Error types for the physics wrapper

use rapier3d::prelude::{ImpulseJointHandle, RigidBodyHandle};
use thiserror::Error;

/// Errors raised when a handle no longer refers to a live world object
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Rigid body was removed or never existed
    #[error("rigid body not found: {0:?}")]
    MissingBody(RigidBodyHandle),

    /// Joint was removed or never existed
    #[error("joint not found: {0:?}")]
    MissingJoint(ImpulseJointHandle),
}
