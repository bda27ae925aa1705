//! Axis-driven grab depth

use crate::config::InteractionConfig;
use crate::constraint;
use crate::controller::{Controller, GrabState};
use crate::error::GrabError;
use devices::ControlState;
use glam::Vec3;
use handhold_physics::PhysicsWorld;

/// Pushes and pulls a held body along the controller's pointing line
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceAdjuster {
    gain: f32,
    control: String,
    min_depth: f32,
    max_depth: f32,
}

impl DistanceAdjuster {
    pub fn new(gain: f32, control: impl Into<String>, min_depth: f32, max_depth: f32) -> Self {
        Self {
            gain,
            control: control.into(),
            min_depth,
            max_depth,
        }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(
            config.depth_gain,
            config.depth_control.clone(),
            config.min_depth,
            config.max_depth,
        )
    }

    /// Depth change for this tick; pushing the stick forward (negative y)
    /// moves the body away
    pub fn delta(&self, state: Option<&ControlState>) -> f32 {
        let y_axis = state.map_or(0.0, |s| s.axes(&self.control).y);
        -self.gain * y_axis
    }

    /// Apply this tick's depth change and re-anchor the grab
    ///
    /// The depth bounds only stop travel toward them: a grab taken outside
    /// `[min_depth, max_depth]` still moves by exactly the delta on the way
    /// back in. The anchor is refreshed every tick, moved or not. Does
    /// nothing when the controller is not grabbing.
    pub fn apply(&self, controller: &mut Controller, world: &mut PhysicsWorld) -> Result<(), GrabError> {
        let GrabState::Grabbing(grab) = controller.state else {
            return Ok(());
        };

        let delta = self.delta(controller.control_state.as_ref());
        if delta != 0.0 {
            let depth = self.step_depth(controller.ray_length, delta);
            let direction = controller.marker.position().normalize_or_zero();
            if direction != Vec3::ZERO {
                controller.marker.set_local_position(direction * depth);
                controller.ray_length = depth;
            }
        }

        let anchor = controller.marker.world_position(&controller.transform);
        constraint::refresh(&grab, world, anchor)
    }

    fn step_depth(&self, current: f32, delta: f32) -> f32 {
        let target = current + delta;
        if delta > 0.0 {
            target.min(self.max_depth.max(current))
        } else {
            target.max(self.min_depth.min(current))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ControllerId;
    use devices::{ConnectionInfo, ControlBinding, ControlLayout, GamepadPoller, GamepadSnapshot};
    use glam::Affine3A;
    use handhold_physics::{BodyDesc, GrabBody, JointAnchor};

    fn thumbstick_state(y_axis: f32) -> ControlState {
        let layout = ControlLayout::from_bindings(
            "test",
            [(
                "xr_standard_thumbstick".to_string(),
                ControlBinding::Axis2D {
                    button: 3,
                    x_axis: 2,
                    y_axis: 3,
                },
            )],
        );
        let mut state = ControlState::new(layout);
        let mut snapshot = GamepadSnapshot::zeroed(4, 4);
        snapshot.set_axis(3, y_axis);
        GamepadPoller::new(0.0).poll_now(Some(&mut state), Some(&snapshot));
        state
    }

    fn grabbing_controller() -> (PhysicsWorld, Controller) {
        grabbing_controller_at(2.0)
    }

    fn grabbing_controller_at(depth: f32) -> (PhysicsWorld, Controller) {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let body = GrabBody::spawn(
            &mut world,
            &BodyDesc::cube_at(Vec3::new(0.0, 1.6, -(depth + 0.5))),
        );
        let anchor = JointAnchor::new(&mut world, Vec3::ZERO);
        let mut controller = Controller::new(
            ControllerId(0),
            1,
            &ConnectionInfo::default(),
            anchor,
            GamepadPoller::default(),
            10.0,
        );
        let transform = Affine3A::from_translation(Vec3::new(0.0, 1.6, 0.0));
        controller.set_transform(transform);

        let hit = Vec3::new(0.0, 1.6, -depth);
        controller.marker.show_at(hit);
        controller.ray_length = depth;
        constraint::create(&mut controller, &mut world, body.body_handle(), hit).unwrap();
        controller.marker.attach_to(ControllerId(0), &transform);
        (world, controller)
    }

    fn adjuster() -> DistanceAdjuster {
        DistanceAdjuster::from_config(&InteractionConfig::default())
    }

    #[test]
    fn test_delta_sign() {
        let adjuster = adjuster();
        assert!((adjuster.delta(Some(&thumbstick_state(-1.0))) - 0.04).abs() < 1e-6);
        assert!((adjuster.delta(Some(&thumbstick_state(1.0))) + 0.04).abs() < 1e-6);
        assert_eq!(adjuster.delta(Some(&thumbstick_state(0.0))), 0.0);
        assert_eq!(adjuster.delta(None), 0.0);
    }

    #[test]
    fn test_push_away() {
        let (mut world, mut controller) = grabbing_controller();
        controller.install_control_state(thumbstick_state(-1.0));

        adjuster().apply(&mut controller, &mut world).unwrap();

        assert!((controller.ray_length() - 2.04).abs() < 1e-5);
        let anchor = controller.anchor().position(&world).unwrap();
        assert!((anchor - Vec3::new(0.0, 1.6, -2.04)).length() < 1e-5);
    }

    #[test]
    fn test_centered_stick_keeps_depth() {
        let (mut world, mut controller) = grabbing_controller();
        controller.install_control_state(thumbstick_state(0.0));

        adjuster().apply(&mut controller, &mut world).unwrap();

        assert_eq!(controller.ray_length(), 2.0);
        let anchor = controller.anchor().position(&world).unwrap();
        assert!((anchor - Vec3::new(0.0, 1.6, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_depth_clamped() {
        let (mut world, mut controller) = grabbing_controller();
        controller.install_control_state(thumbstick_state(1.0));
        let adjuster = DistanceAdjuster::new(1.0, "xr_standard_thumbstick", 0.5, 3.0);

        for _ in 0..10 {
            adjuster.apply(&mut controller, &mut world).unwrap();
        }
        assert_eq!(controller.ray_length(), 0.5);
        assert!((controller.marker().position().length() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_far_grab_pulls_in_by_delta() {
        let (mut world, mut controller) = grabbing_controller_at(20.0);
        controller.install_control_state(thumbstick_state(1.0));

        adjuster().apply(&mut controller, &mut world).unwrap();

        assert!((controller.ray_length() - 19.96).abs() < 1e-4);
        let anchor = controller.anchor().position(&world).unwrap();
        assert!((anchor - Vec3::new(0.0, 1.6, -19.96)).length() < 1e-4);
    }

    #[test]
    fn test_far_grab_cannot_be_pushed_further() {
        let (mut world, mut controller) = grabbing_controller_at(20.0);
        controller.install_control_state(thumbstick_state(-1.0));

        adjuster().apply(&mut controller, &mut world).unwrap();

        assert_eq!(controller.ray_length(), 20.0);
    }

    #[test]
    fn test_near_grab_pushes_out_by_delta() {
        let (mut world, mut controller) = grabbing_controller_at(0.02);
        controller.install_control_state(thumbstick_state(-1.0));

        adjuster().apply(&mut controller, &mut world).unwrap();
        assert!((controller.ray_length() - 0.06).abs() < 1e-5);

        controller.install_control_state(thumbstick_state(1.0));
        for _ in 0..3 {
            adjuster().apply(&mut controller, &mut world).unwrap();
        }
        assert_eq!(controller.ray_length(), 0.05);
    }

    #[test]
    fn test_anchor_follows_controller() {
        let (mut world, mut controller) = grabbing_controller();
        controller.set_transform(Affine3A::from_translation(Vec3::new(1.0, 1.6, 0.0)));

        adjuster().apply(&mut controller, &mut world).unwrap();

        let anchor = controller.anchor().position(&world).unwrap();
        assert!((anchor - Vec3::new(1.0, 1.6, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_not_grabbing_is_noop() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let anchor = JointAnchor::new(&mut world, Vec3::ZERO);
        let mut controller = Controller::new(
            ControllerId(1),
            1,
            &ConnectionInfo::default(),
            anchor,
            GamepadPoller::default(),
            10.0,
        );
        controller.install_control_state(thumbstick_state(1.0));

        adjuster().apply(&mut controller, &mut world).unwrap();
        assert_eq!(controller.ray_length(), 10.0);
    }
}
