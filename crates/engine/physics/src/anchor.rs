use crate::collider::create_anchor_collider;
use crate::error::PhysicsError;
use crate::world::PhysicsWorld;
use glam::Vec3;
use rapier3d::prelude::*;

/// Kinematic body used as the world-space end of a grab joint
///
/// Carries no mass and is excluded from collision, so it only moves when
/// told to and never pushes anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAnchor {
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,
}

impl JointAnchor {
    /// Create an anchor at a world position
    pub fn new(world: &mut PhysicsWorld, position: Vec3) -> Self {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        let body_handle = world.add_rigid_body(body);
        let collider_handle = world.add_collider(create_anchor_collider(), body_handle);

        Self {
            body_handle,
            collider_handle,
        }
    }

    /// Move the anchor to a new world position
    pub fn set_position(&self, world: &mut PhysicsWorld, position: Vec3) -> Result<(), PhysicsError> {
        world.set_body_translation(self.body_handle, position)
    }

    /// Current world position of the anchor
    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world.body_pose(self.body_handle).map(|pose| pose.position)
    }

    /// Remove the anchor and any joint still attached to it
    pub fn remove(self, world: &mut PhysicsWorld) {
        world.remove_rigid_body(self.body_handle);
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider_handle
    }
}
