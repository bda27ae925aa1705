//! Rapier-backed physics for controller grabs
//!
//! Wraps a rapier3d world with what a grab needs: scene bodies that can be
//! ray cast one at a time, and non-colliding kinematic anchors they are
//! jointed to while held.

mod anchor;
mod body;
mod collider;
mod error;
mod joint;
mod world;

pub use anchor::JointAnchor;
pub use body::{BodyDesc, GrabBody};
pub use collider::{
    create_anchor_collider, create_ground_collider, create_shape_collider, BodyMaterial,
    BodyShape, ANCHOR_RADIUS,
};
pub use error::PhysicsError;
pub use joint::GrabJoint;
pub use world::{BodyPose, PhysicsWorld};

// Re-export for convenience
pub use glam;
pub use rapier3d;
