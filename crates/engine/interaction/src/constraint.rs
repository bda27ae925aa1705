//! Creating, refreshing and tearing down grab constraints

use crate::controller::{ActiveGrab, Controller, GrabState};
use crate::error::GrabError;
use glam::Vec3;
use handhold_physics::rapier3d::prelude::RigidBodyHandle;
use handhold_physics::{GrabJoint, PhysicsWorld};

/// Bind `body` to the controller's anchor at a world-space point
///
/// Fails without touching the world when the controller already holds a
/// constraint.
pub fn create(
    controller: &mut Controller,
    world: &mut PhysicsWorld,
    body: RigidBodyHandle,
    world_hit: Vec3,
) -> Result<ActiveGrab, GrabError> {
    if controller.is_grabbing() {
        return Err(GrabError::AlreadyGrabbing(controller.id()));
    }

    let joint = GrabJoint::attach(world, body, &controller.anchor, world_hit)?;
    let grab = ActiveGrab { body, joint };
    controller.state = GrabState::Grabbing(grab);
    Ok(grab)
}

/// Remove the controller's constraint from the world
///
/// Returns `false` when the controller held none. The controller's state is
/// only touched when a constraint existed.
pub fn destroy(controller: &mut Controller, world: &mut PhysicsWorld) -> bool {
    let GrabState::Grabbing(grab) = controller.state else {
        return false;
    };
    controller.state = GrabState::Idle;
    if !grab.joint.detach(world) {
        tracing::debug!("{} grab joint was already gone", controller.id());
    }
    true
}

/// Move the anchor end of a held constraint
pub fn refresh(grab: &ActiveGrab, world: &mut PhysicsWorld, anchor: Vec3) -> Result<(), GrabError> {
    grab.joint.refresh(world, anchor)?;
    Ok(())
}
