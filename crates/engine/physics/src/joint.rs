use crate::anchor::JointAnchor;
use crate::error::PhysicsError;
use crate::world::PhysicsWorld;
use glam::Vec3;
use rapier3d::prelude::*;

/// Point-to-point joint binding a body-local pivot to a joint anchor
///
/// The anchor end sits at the anchor's origin, so the joint's world anchor is
/// always the anchor body's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabJoint {
    handle: ImpulseJointHandle,
    body: RigidBodyHandle,
    anchor: RigidBodyHandle,
    local_pivot: Vec3,
}

impl GrabJoint {
    /// Bind `body` at `world_point` to `anchor`
    ///
    /// Moves the anchor onto the point first so the joint starts at rest.
    pub fn attach(
        world: &mut PhysicsWorld,
        body: RigidBodyHandle,
        anchor: &JointAnchor,
        world_point: Vec3,
    ) -> Result<Self, PhysicsError> {
        let local_pivot = world.world_to_local(body, world_point)?;
        anchor.set_position(world, world_point)?;

        let joint = SphericalJointBuilder::new()
            .local_anchor1(point![local_pivot.x, local_pivot.y, local_pivot.z])
            .local_anchor2(Point::origin())
            .build();
        let handle = world.add_joint(body, anchor.body_handle(), joint);

        Ok(Self {
            handle,
            body,
            anchor: anchor.body_handle(),
            local_pivot,
        })
    }

    /// Remove the joint from the world
    ///
    /// Returns `false` when it was already gone.
    pub fn detach(&self, world: &mut PhysicsWorld) -> bool {
        world.remove_joint(self.handle)
    }

    /// Move the anchor end and wake the bound body
    ///
    /// Must run every tick the joint exists so the solver tracks the anchor
    /// even while it sits still.
    pub fn refresh(&self, world: &mut PhysicsWorld, anchor_position: Vec3) -> Result<(), PhysicsError> {
        if !world.has_joint(self.handle) {
            tracing::warn!("Grab joint {:?} on body {:?} vanished", self.handle, self.body);
            return Err(PhysicsError::MissingJoint(self.handle));
        }
        world.set_body_translation(self.anchor, anchor_position)?;
        world.wake_body(self.body)
    }

    /// World position of the anchor end of the joint
    pub fn world_anchor(&self, world: &PhysicsWorld) -> Option<Vec3> {
        let joint = world.get_joint(self.handle)?;
        let local = joint.data.local_anchor2();
        world
            .local_to_world(self.anchor, Vec3::new(local.x, local.y, local.z))
            .ok()
    }

    /// World position of the pivot on the bound body
    pub fn pivot_world(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world.local_to_world(self.body, self.local_pivot).ok()
    }

    /// Check whether the joint is still registered in the world
    pub fn is_active(&self, world: &PhysicsWorld) -> bool {
        world.has_joint(self.handle)
    }

    pub fn handle(&self) -> ImpulseJointHandle {
        self.handle
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn anchor(&self) -> RigidBodyHandle {
        self.anchor
    }

    /// Pivot in the bound body's local frame
    pub fn local_pivot(&self) -> Vec3 {
        self.local_pivot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyDesc, GrabBody};

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> (PhysicsWorld, GrabBody, JointAnchor) {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -10.0, 0.0));
        GrabBody::spawn_ground(&mut world, 0.0);
        let anchor = JointAnchor::new(&mut world, Vec3::ZERO);
        let body = GrabBody::spawn(&mut world, &BodyDesc::cube_at(Vec3::new(0.0, 1.0, -3.0)));
        (world, body, anchor)
    }

    #[test]
    fn test_attach_computes_local_pivot() {
        let (mut world, body, anchor) = scene();
        let hit = Vec3::new(0.0, 1.0, -2.5);

        let joint = GrabJoint::attach(&mut world, body.body_handle(), &anchor, hit).unwrap();

        assert!((joint.local_pivot() - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
        assert_eq!(anchor.position(&world), Some(hit));
        assert!((joint.world_anchor(&world).unwrap() - hit).length() < 1e-5);
        assert_eq!(world.joint_count(), 1);
        assert_eq!(world.joints_on(body.body_handle()), 1);
    }

    #[test]
    fn test_joint_holds_body_up() {
        let (mut world, body, anchor) = scene();
        let hit = Vec3::new(0.0, 1.5, -3.0);
        let joint = GrabJoint::attach(&mut world, body.body_handle(), &anchor, hit).unwrap();

        let lifted = Vec3::new(0.0, 2.5, -3.0);
        for _ in 0..180 {
            joint.refresh(&mut world, lifted).unwrap();
            world.step(DT);
        }

        let pivot = joint.pivot_world(&world).unwrap();
        assert!((pivot - lifted).length() < 0.05, "pivot drifted to {pivot:?}");
    }

    #[test]
    fn test_detach_is_idempotent() {
        let (mut world, body, anchor) = scene();
        let joint =
            GrabJoint::attach(&mut world, body.body_handle(), &anchor, Vec3::new(0.0, 1.0, -2.5))
                .unwrap();

        assert!(joint.detach(&mut world));
        assert!(!joint.is_active(&world));
        assert!(!joint.detach(&mut world));
        assert_eq!(world.joint_count(), 0);
        assert!(matches!(
            joint.refresh(&mut world, Vec3::ZERO),
            Err(PhysicsError::MissingJoint(_))
        ));
    }

    #[test]
    fn test_attach_then_detach_leaves_no_bias() {
        let (mut grabbed_world, grabbed, anchor) = scene();
        let (mut control_world, control, _) = scene();

        let joint = GrabJoint::attach(
            &mut grabbed_world,
            grabbed.body_handle(),
            &anchor,
            Vec3::new(0.0, 1.0, -2.5),
        )
        .unwrap();
        joint.detach(&mut grabbed_world);

        for _ in 0..30 {
            grabbed_world.step(DT);
            control_world.step(DT);
        }

        let drift = grabbed.position(&grabbed_world) - control.position(&control_world);
        assert!(drift.length() < 1e-4, "released body drifted by {drift:?}");
        let dv = grabbed.velocity(&grabbed_world) - control.velocity(&control_world);
        assert!(dv.length() < 1e-4);
    }
}
