use crate::collider::{create_ground_collider, create_shape_collider, BodyMaterial, BodyShape};
use crate::world::{BodyPose, PhysicsWorld};
use glam::Vec3;
use rapier3d::prelude::*;

/// Description of a dynamic scene body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub shape: BodyShape,
    pub position: Vec3,
    pub mass: f32,
    pub linear_damping: f32,
    pub material: BodyMaterial,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            shape: BodyShape::cube(0.5),
            position: Vec3::ZERO,
            mass: 5.0,
            linear_damping: 0.01,
            material: BodyMaterial::default(),
        }
    }
}

impl BodyDesc {
    /// Unit box at a position with the default mass and damping
    pub fn cube_at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sphere of radius 0.5 at a position with the default mass and damping
    pub fn ball_at(position: Vec3) -> Self {
        Self {
            shape: BodyShape::Ball { radius: 0.5 },
            position,
            ..Self::default()
        }
    }
}

/// A rigid body paired with its collider
///
/// The world owns the body; this only keeps the handles needed for picking
/// and constraining.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabBody {
    pub(crate) body_handle: RigidBodyHandle,
    pub(crate) collider_handle: ColliderHandle,
    shape: BodyShape,
}

impl GrabBody {
    /// Create a dynamic body from a description and add it to the world
    pub fn spawn(world: &mut PhysicsWorld, desc: &BodyDesc) -> Self {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![desc.position.x, desc.position.y, desc.position.z])
            .linear_damping(desc.linear_damping)
            .build();
        let body_handle = world.add_rigid_body(body);

        let collider = create_shape_collider(desc.shape, desc.mass, desc.material);
        let collider_handle = world.add_collider(collider, body_handle);

        Self {
            body_handle,
            collider_handle,
            shape: desc.shape,
        }
    }

    /// Create a static ground plane at the given height
    ///
    /// The ground collides with everything but is never a grab candidate.
    pub fn spawn_ground(world: &mut PhysicsWorld, height: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![0.0, height, 0.0])
            .build();
        let handle = world.add_rigid_body(body);
        world.add_collider(create_ground_collider(), handle);
        handle
    }

    /// World position of the body's center, or the origin once removed
    pub fn position(&self, world: &PhysicsWorld) -> Vec3 {
        world
            .body_pose(self.body_handle)
            .map(|pose| pose.position)
            .unwrap_or(Vec3::ZERO)
    }

    /// Position and rotation
    pub fn pose(&self, world: &PhysicsWorld) -> Option<BodyPose> {
        world.body_pose(self.body_handle)
    }

    /// Linear velocity, zero once removed
    pub fn velocity(&self, world: &PhysicsWorld) -> Vec3 {
        world
            .get_rigid_body(self.body_handle)
            .map(|body| {
                let v = body.linvel();
                Vec3::new(v.x, v.y, v.z)
            })
            .unwrap_or(Vec3::ZERO)
    }

    /// Cast a ray against this body's shape
    pub fn cast_ray(
        &self,
        world: &PhysicsWorld,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<f32> {
        world.cast_ray_at(self.collider_handle, origin, direction, max_distance)
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider_handle
    }

    /// Collision shape the body was created with
    pub fn shape(&self) -> BodyShape {
        self.shape
    }

    /// Whether the body is still in the world
    pub fn is_valid(&self, world: &PhysicsWorld) -> bool {
        world.get_rigid_body(self.body_handle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_body() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -10.0, 0.0));
        let body = GrabBody::spawn(&mut world, &BodyDesc::cube_at(Vec3::new(0.0, 1.0, -3.0)));

        assert_eq!(body.position(&world), Vec3::new(0.0, 1.0, -3.0));
        assert!(body.is_valid(&world));

        let rb = world.get_rigid_body(body.body_handle()).unwrap();
        assert!((rb.mass() - 5.0).abs() < 1e-4);
        assert_eq!(rb.linear_damping(), 0.01);
    }

    #[test]
    fn test_body_rests_on_ground() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -10.0, 0.0));
        GrabBody::spawn_ground(&mut world, 0.0);
        let body = GrabBody::spawn(&mut world, &BodyDesc::cube_at(Vec3::new(0.0, 2.0, 0.0)));

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }

        let y = body.position(&world).y;
        assert!(y > 0.4 && y < 0.6, "box should settle on the plane, got {y}");
    }

    #[test]
    fn test_cast_ray_hits_ball_front() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let ball = GrabBody::spawn(&mut world, &BodyDesc::ball_at(Vec3::new(0.0, 0.0, -4.0)));

        let hit = ball.cast_ray(&world, Vec3::ZERO, Vec3::NEG_Z, 10.0).unwrap();
        assert!((hit - 3.5).abs() < 1e-4);
    }
}
