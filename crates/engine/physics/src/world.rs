use glam::{Quat, Vec3};
use rapier3d::parry::query::{Ray, RayCast};
use rapier3d::prelude::*;

use crate::error::PhysicsError;

/// World-space pose of a rigid body, as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Rapier world holding the scene bodies, joint anchors and grab joints
///
/// Everything outside this crate refers to world objects by handle only.
pub struct PhysicsWorld {
    pub(crate) rigid_body_set: RigidBodySet,
    pub(crate) collider_set: ColliderSet,
    pub(crate) impulse_joint_set: ImpulseJointSet,
    pub(crate) multibody_joint_set: MultibodyJointSet,
    pub(crate) integration_parameters: IntegrationParameters,
    pub(crate) physics_pipeline: PhysicsPipeline,
    pub(crate) island_manager: IslandManager,
    pub(crate) broad_phase: DefaultBroadPhase,
    pub(crate) narrow_phase: NarrowPhase,
    pub(crate) ccd_solver: CCDSolver,
    gravity: Vector<Real>,
}

impl PhysicsWorld {
    /// Empty world with the given gravity
    pub fn new(gravity: Vec3) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            gravity: vector![gravity.x, gravity.y, gravity.z],
        }
    }

    /// Advance the simulation by one step of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Insert a rigid body
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Remove a rigid body along with its colliders and every joint on it
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        let removed = self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        if removed.is_none() {
            tracing::debug!("remove_rigid_body: {:?} already gone", handle);
        }
    }

    /// Insert a collider attached to `parent`
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set.insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Insert an impulse joint between two bodies, waking both
    pub fn add_joint(
        &mut self,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        joint: impl Into<GenericJoint>,
    ) -> ImpulseJointHandle {
        self.impulse_joint_set.insert(body1, body2, joint, true)
    }

    /// Remove an impulse joint
    ///
    /// Returns `false` if the joint was not in the world.
    pub fn remove_joint(&mut self, handle: ImpulseJointHandle) -> bool {
        let removed = self.impulse_joint_set.remove(handle, true).is_some();
        if !removed {
            tracing::debug!("remove_joint: {:?} already gone", handle);
        }
        removed
    }

    /// Get a reference to an impulse joint
    pub fn get_joint(&self, handle: ImpulseJointHandle) -> Option<&ImpulseJoint> {
        self.impulse_joint_set.get(handle)
    }

    /// Check whether a joint is registered in the world
    pub fn has_joint(&self, handle: ImpulseJointHandle) -> bool {
        self.impulse_joint_set.get(handle).is_some()
    }

    /// Number of impulse joints currently in the world
    pub fn joint_count(&self) -> usize {
        self.impulse_joint_set.len()
    }

    /// Number of impulse joints attached to a body
    pub fn joints_on(&self, body: RigidBodyHandle) -> usize {
        self.impulse_joint_set.attached_joints(body).count()
    }

    /// Cast a ray against a single collider's shape at its current pose
    ///
    /// `direction` is expected to be normalized so the returned value is a
    /// distance. Returns `None` on a miss or when the collider is unknown.
    pub fn cast_ray_at(
        &self,
        collider: ColliderHandle,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<f32> {
        let collider = self.collider_set.get(collider)?;
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );
        collider
            .shape()
            .cast_ray(collider.position(), &ray, max_distance, true)
    }

    /// Convert a world-space point into a body's local frame
    pub fn world_to_local(&self, handle: RigidBodyHandle, point: Vec3) -> Result<Vec3, PhysicsError> {
        let body = self
            .rigid_body_set
            .get(handle)
            .ok_or(PhysicsError::MissingBody(handle))?;
        let local = body
            .position()
            .inverse_transform_point(&point![point.x, point.y, point.z]);
        Ok(Vec3::new(local.x, local.y, local.z))
    }

    /// Convert a body-local point into world space
    pub fn local_to_world(&self, handle: RigidBodyHandle, point: Vec3) -> Result<Vec3, PhysicsError> {
        let body = self
            .rigid_body_set
            .get(handle)
            .ok_or(PhysicsError::MissingBody(handle))?;
        let world = body.position() * point![point.x, point.y, point.z];
        Ok(Vec3::new(world.x, world.y, world.z))
    }

    /// Current world pose of a body
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<BodyPose> {
        let body = self.rigid_body_set.get(handle)?;
        let pos = body.translation();
        let rot = body.rotation();
        Some(BodyPose {
            position: Vec3::new(pos.x, pos.y, pos.z),
            rotation: Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w),
        })
    }

    /// Teleport a body, waking it
    pub fn set_body_translation(
        &mut self,
        handle: RigidBodyHandle,
        position: Vec3,
    ) -> Result<(), PhysicsError> {
        let body = self
            .rigid_body_set
            .get_mut(handle)
            .ok_or(PhysicsError::MissingBody(handle))?;
        let translation = vector![position.x, position.y, position.z];
        body.set_translation(translation, true);
        if body.is_kinematic() {
            // Keep the integrator from pulling the body back to a stale target
            body.set_next_kinematic_translation(translation);
        }
        Ok(())
    }

    /// Wake a sleeping body so the solver picks it up on the next step
    pub fn wake_body(&mut self, handle: RigidBodyHandle) -> Result<(), PhysicsError> {
        let body = self
            .rigid_body_set
            .get_mut(handle)
            .ok_or(PhysicsError::MissingBody(handle))?;
        body.wake_up(true);
        Ok(())
    }

    /// Number of rigid bodies in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Gravity the world was created with
    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_creation() {
        let world = PhysicsWorld::new(Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(world.gravity(), Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_body_pose_reports_rotation() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let handle = world.add_rigid_body(
            RigidBodyBuilder::dynamic()
                .translation(vector![0.0, 1.0, -3.0])
                .rotation(vector![0.0, std::f32::consts::FRAC_PI_2, 0.0])
                .build(),
        );

        let pose = world.body_pose(handle).unwrap();
        assert_eq!(pose.position, Vec3::new(0.0, 1.0, -3.0));
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(pose.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_kinematic_translation_survives_step() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -10.0, 0.0));
        let handle = world.add_rigid_body(RigidBodyBuilder::kinematic_position_based().build());

        world.set_body_translation(handle, Vec3::new(0.5, 1.5, -2.0)).unwrap();
        world.step(1.0 / 60.0);

        let pose = world.body_pose(handle).unwrap();
        assert!((pose.position - Vec3::new(0.5, 1.5, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_removing_body_drops_its_joints() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let a = world.add_rigid_body(RigidBodyBuilder::dynamic().build());
        let b = world.add_rigid_body(RigidBodyBuilder::kinematic_position_based().build());
        let joint = world.add_joint(a, b, SphericalJointBuilder::new().build());
        assert!(world.has_joint(joint));
        assert_eq!(world.joints_on(a), 1);

        world.remove_rigid_body(b);

        assert!(!world.has_joint(joint));
        assert_eq!(world.joint_count(), 0);
        assert!(!world.remove_joint(joint));
    }

    #[test]
    fn test_removing_body_twice_is_harmless() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let body = world.add_rigid_body(RigidBodyBuilder::dynamic().build());

        world.remove_rigid_body(body);
        world.remove_rigid_body(body);

        assert!(world.get_rigid_body(body).is_none());
    }

    #[test]
    fn test_cast_ray_at_collider() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let body = world.add_rigid_body(
            RigidBodyBuilder::dynamic()
                .translation(vector![0.0, 0.0, -3.0])
                .build(),
        );
        let collider = world.add_collider(ColliderBuilder::cuboid(0.5, 0.5, 0.5).build(), body);

        let hit = world.cast_ray_at(collider, Vec3::ZERO, Vec3::NEG_Z, 10.0);
        assert!((hit.unwrap() - 2.5).abs() < 1e-5);

        let miss = world.cast_ray_at(collider, Vec3::ZERO, Vec3::Z, 10.0);
        assert!(miss.is_none());

        let too_far = world.cast_ray_at(collider, Vec3::ZERO, Vec3::NEG_Z, 1.0);
        assert!(too_far.is_none());
    }

    #[test]
    fn test_local_world_round_trip() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let handle = world.add_rigid_body(
            RigidBodyBuilder::dynamic()
                .translation(vector![1.0, 2.0, -3.0])
                .rotation(vector![0.0, std::f32::consts::FRAC_PI_2, 0.0])
                .build(),
        );

        let world_point = Vec3::new(1.5, 2.5, -3.0);
        let local = world.world_to_local(handle, world_point).unwrap();
        let back = world.local_to_world(handle, local).unwrap();

        assert!((back - world_point).length() < 1e-5);
        assert!((local.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_missing_body_is_reported() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let handle = world.add_rigid_body(RigidBodyBuilder::fixed().build());
        world.remove_rigid_body(handle);

        assert!(matches!(
            world.world_to_local(handle, Vec3::ZERO),
            Err(PhysicsError::MissingBody(_))
        ));
        assert!(world.body_pose(handle).is_none());
    }
}
