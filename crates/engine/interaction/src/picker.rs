//! Nearest-hit ray picking against grab candidates

use crate::controller::{Controller, GrabState, HoverTarget};
use glam::Vec3;
use handhold_physics::{GrabBody, PhysicsWorld};

/// Ray distances for picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickSettings {
    /// Ray length shown when nothing is hit
    pub far_ray_length: f32,
    /// Furthest pickable distance
    pub max_distance: f32,
}

/// Find the candidate nearest along a ray
///
/// Misses are skipped. On exactly equal distances the earlier candidate wins,
/// so ties resolve the same way every tick.
pub fn pick(
    world: &PhysicsWorld,
    candidates: &[GrabBody],
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<HoverTarget> {
    let mut nearest: Option<HoverTarget> = None;

    for candidate in candidates {
        let Some(distance) = candidate.cast_ray(world, origin, direction, max_distance) else {
            continue;
        };
        if nearest.map_or(true, |best| distance < best.distance) {
            nearest = Some(HoverTarget {
                body: candidate.body_handle(),
                point: origin + direction * distance,
                distance,
            });
        }
    }

    nearest
}

/// Re-pick for a controller that is not grabbing
///
/// Updates hover target, marker and ray length. Does nothing while grabbing.
pub fn update_hover(
    controller: &mut Controller,
    world: &PhysicsWorld,
    candidates: &[GrabBody],
    settings: &PickSettings,
) {
    if controller.is_grabbing() {
        return;
    }

    let previous = controller.hover_target().map(|target| target.body);
    let (origin, direction) = controller.ray();

    match pick(world, candidates, origin, direction, settings.max_distance) {
        Some(target) => {
            controller.marker.show_at(target.point);
            controller.ray_length = target.distance;
            controller.state = GrabState::Hovering(target);
            if previous != Some(target.body) {
                tracing::debug!("{} hovering {:?}", controller.id(), target.body);
            }
        }
        None => {
            controller.marker.hide();
            controller.ray_length = settings.far_ray_length;
            controller.state = GrabState::Idle;
            if previous.is_some() {
                tracing::debug!("{} hover cleared", controller.id());
            }
        }
    }
}
