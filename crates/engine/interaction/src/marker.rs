//! Hit marker shown at the hovered or grabbed point

use crate::session::ControllerId;
use glam::{Affine3A, Vec3};

/// Which frame the marker position is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerParent {
    /// Position is in world space
    #[default]
    WorldSpace,
    /// Position is local to the controller, so the marker follows it
    AttachedTo(ControllerId),
}

/// Visual marker at a controller's pick point
///
/// Re-parenting converts the position between frames exactly once, at the
/// transition, so the marker does not jump.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker {
    position: Vec3,
    visible: bool,
    parent: MarkerParent,
}

impl Marker {
    /// Hidden marker at the world origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the marker at a world-space point
    ///
    /// Ignored while attached to a controller.
    pub fn show_at(&mut self, world_point: Vec3) {
        if self.parent == MarkerParent::WorldSpace {
            self.position = world_point;
            self.visible = true;
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Re-parent to a controller, keeping the world position
    pub fn attach_to(&mut self, id: ControllerId, controller: &Affine3A) {
        if self.parent == MarkerParent::WorldSpace {
            self.position = controller.inverse().transform_point3(self.position);
        }
        self.parent = MarkerParent::AttachedTo(id);
    }

    /// Re-parent to world space, keeping the world position
    pub fn detach(&mut self, controller: &Affine3A) {
        if let MarkerParent::AttachedTo(_) = self.parent {
            self.position = controller.transform_point3(self.position);
            self.parent = MarkerParent::WorldSpace;
        }
    }

    /// Move the marker within its controller's frame
    ///
    /// Ignored unless attached.
    pub fn set_local_position(&mut self, local: Vec3) {
        if self.is_attached() {
            self.position = local;
        }
    }

    /// Position in the parent's frame
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position in world space given the owning controller's transform
    pub fn world_position(&self, controller: &Affine3A) -> Vec3 {
        match self.parent {
            MarkerParent::WorldSpace => self.position,
            MarkerParent::AttachedTo(_) => controller.transform_point3(self.position),
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn parent(&self) -> MarkerParent {
        self.parent
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.parent, MarkerParent::AttachedTo(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn controller() -> Affine3A {
        Affine3A::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 1.5, 0.0),
        )
    }

    #[test]
    fn test_show_and_hide() {
        let mut marker = Marker::new();
        assert!(!marker.visible());

        marker.show_at(Vec3::new(0.0, 1.0, -2.0));
        assert!(marker.visible());
        assert_eq!(marker.position(), Vec3::new(0.0, 1.0, -2.0));

        marker.hide();
        assert!(!marker.visible());
    }

    #[test]
    fn test_reparent_keeps_world_position() {
        let transform = controller();
        let mut marker = Marker::new();
        let point = Vec3::new(-1.0, 1.5, 0.0);
        marker.show_at(point);

        marker.attach_to(ControllerId(0), &transform);
        assert_eq!(marker.parent(), MarkerParent::AttachedTo(ControllerId(0)));
        assert!((marker.world_position(&transform) - point).length() < 1e-5);
        // Two meters straight ahead of the controller
        assert!((marker.position() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);

        marker.detach(&transform);
        assert_eq!(marker.parent(), MarkerParent::WorldSpace);
        assert!((marker.position() - point).length() < 1e-5);
    }

    #[test]
    fn test_attached_marker_follows_controller() {
        let mut marker = Marker::new();
        marker.show_at(Vec3::new(0.0, 0.0, -1.0));
        marker.attach_to(ControllerId(3), &Affine3A::IDENTITY);

        let moved = Affine3A::from_translation(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(marker.world_position(&moved), Vec3::new(0.0, 2.0, -1.0));
    }

    #[test]
    fn test_show_at_ignored_while_attached() {
        let mut marker = Marker::new();
        marker.show_at(Vec3::new(0.0, 0.0, -1.0));
        marker.attach_to(ControllerId(0), &Affine3A::IDENTITY);

        marker.show_at(Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(marker.position(), Vec3::new(0.0, 0.0, -1.0));
    }
}
