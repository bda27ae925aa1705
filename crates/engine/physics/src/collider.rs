//! Collider construction for grabbable scene bodies
//!
//! Shapes mirror the visual proxies the renderer draws, so a ray that hits
//! a collider also hits what the user sees.

use glam::Vec3;
use rapier3d::prelude::*;

/// Radius of the collider carried by a joint anchor
pub const ANCHOR_RADIUS: f32 = 0.1;

/// Collision shape of a scene body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Box with the given half extents
    Cuboid { half_extents: Vec3 },
    /// Sphere with the given radius
    Ball { radius: f32 },
}

impl BodyShape {
    /// Axis-aligned box with equal half extents on every axis
    pub fn cube(half_extent: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec3::splat(half_extent),
        }
    }

    fn builder(&self) -> ColliderBuilder {
        match *self {
            BodyShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            BodyShape::Ball { radius } => ColliderBuilder::ball(radius),
        }
    }
}

/// Surface material of a scene body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self {
            friction: 0.3,
            restitution: 0.3,
        }
    }
}

/// Build a collider for a shape with explicit mass and material
pub fn create_shape_collider(shape: BodyShape, mass: f32, material: BodyMaterial) -> Collider {
    shape
        .builder()
        .mass(mass)
        .friction(material.friction)
        .restitution(material.restitution)
        .build()
}

/// Infinite ground plane facing +Y
pub fn create_ground_collider() -> Collider {
    ColliderBuilder::halfspace(Vector::y_axis()).build()
}

/// Collider for a joint anchor
///
/// Member of no collision or solver group, so nothing ever touches it.
pub fn create_anchor_collider() -> Collider {
    ColliderBuilder::ball(ANCHOR_RADIUS)
        .density(0.0)
        .collision_groups(InteractionGroups::none())
        .solver_groups(InteractionGroups::none())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_collider_mass() {
        let collider = create_shape_collider(BodyShape::cube(0.5), 5.0, BodyMaterial::default());
        assert!((collider.mass() - 5.0).abs() < 1e-4);
        assert_eq!(collider.friction(), 0.3);
    }

    #[test]
    fn test_anchor_collider_has_no_groups() {
        let collider = create_anchor_collider();
        assert_eq!(collider.collision_groups(), InteractionGroups::none());
        assert_eq!(collider.solver_groups(), InteractionGroups::none());
    }

    #[test]
    fn test_ball_shape() {
        let collider = create_shape_collider(
            BodyShape::Ball { radius: 0.5 },
            1.0,
            BodyMaterial::default(),
        );
        assert!(collider.shape().as_ball().is_some());
    }
}
