//! Demo scene: a ground plane and four boxes in front of the user

use glam::{Affine3A, Vec3};
use handhold_interaction::handhold_physics::rapier3d::prelude::RigidBodyHandle;
use handhold_interaction::handhold_physics::{BodyDesc, GrabBody};
use handhold_interaction::InteractionContext;

/// Starting centers of the demo boxes
pub const BOX_POSITIONS: [Vec3; 4] = [
    Vec3::new(0.0, 1.0, -3.0),
    Vec3::new(-1.5, 2.0, -3.0),
    Vec3::new(1.5, 2.0, -3.0),
    Vec3::new(0.0, 2.0, -3.0),
];

/// Where the scripted controller is held
pub const CONTROLLER_ORIGIN: Vec3 = Vec3::new(0.0, 1.6, 0.0);

/// Handles to the bodies of the demo scene
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub ground: RigidBodyHandle,
    pub boxes: Vec<GrabBody>,
}

impl DemoScene {
    /// Add the ground and the grabbable boxes to the context
    pub fn build(ctx: &mut InteractionContext) -> Self {
        let ground = ctx.add_ground(0.0);
        let boxes = BOX_POSITIONS
            .iter()
            .map(|position| ctx.add_candidate(&BodyDesc::cube_at(*position)))
            .collect();
        Self { ground, boxes }
    }
}

/// Controller transform at `origin` pointing at `target`
pub fn aim_at(origin: Vec3, target: Vec3) -> Affine3A {
    let direction = (target - origin).normalize_or_zero();
    if direction == Vec3::ZERO {
        return Affine3A::from_translation(origin);
    }
    // Avoid a degenerate basis when pointing straight up or down
    let up = if direction.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    Affine3A::look_to_rh(origin, direction, up).inverse()
}
