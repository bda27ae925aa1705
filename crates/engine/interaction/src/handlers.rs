//! Controller event handlers
//!
//! Each handler takes the controller and world it acts on explicitly.

use crate::constraint;
use crate::controller::{Controller, GrabState};
use handhold_physics::PhysicsWorld;

/// Begin a grab on the hovered body
///
/// Returns `true` when a grab started. Without a hover target, or while
/// already grabbing, this is a no-op.
pub fn on_select_start(controller: &mut Controller, world: &mut PhysicsWorld) -> bool {
    let target = match controller.state {
        GrabState::Hovering(target) => target,
        GrabState::Idle => {
            tracing::debug!("{} select ignored, nothing hovered", controller.id());
            return false;
        }
        GrabState::Grabbing(_) => {
            tracing::debug!("{} select ignored, already grabbing", controller.id());
            return false;
        }
    };

    let hit = controller.marker.world_position(&controller.transform);
    match constraint::create(controller, world, target.body, hit) {
        Ok(grab) => {
            let id = controller.id();
            controller.marker.attach_to(id, &controller.transform);
            tracing::info!(
                "{} grabbed {:?} at distance {:.2}",
                id,
                grab.body,
                target.distance
            );
            true
        }
        Err(e) => {
            tracing::warn!("{} grab failed: {}", controller.id(), e);
            false
        }
    }
}

/// Release the held body
///
/// Returns `true` when a grab ended.
pub fn on_select_end(controller: &mut Controller, world: &mut PhysicsWorld) -> bool {
    let Some(grab) = controller.grab() else {
        tracing::debug!("{} release ignored, not grabbing", controller.id());
        return false;
    };

    constraint::destroy(controller, world);
    controller.marker.detach(&controller.transform);
    controller.marker.hide();
    tracing::info!("{} released {:?}", controller.id(), grab.body);
    true
}

/// Tear down everything a controller owns in the world
pub fn on_disconnect(mut controller: Controller, world: &mut PhysicsWorld) {
    if constraint::destroy(&mut controller, world) {
        tracing::info!("{} disconnected while grabbing, grab released", controller.id());
    }
    controller.marker.detach(&controller.transform);
    controller.marker.hide();
    controller.anchor.remove(world);
    tracing::info!("{} disconnected", controller.id());
}
