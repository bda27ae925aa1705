//! Per-controller interaction state

use crate::marker::Marker;
use crate::session::ControllerId;
use devices::{ConnectionInfo, ControlState, GamepadPoller, Handedness, TargetRayMode};
use glam::{Affine3A, Vec3};
use handhold_physics::rapier3d::prelude::RigidBodyHandle;
use handhold_physics::{GrabJoint, JointAnchor};

/// Nearest body under a controller's ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    pub body: RigidBodyHandle,
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the controller along the ray
    pub distance: f32,
}

/// A body held by a controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveGrab {
    pub body: RigidBodyHandle,
    pub joint: GrabJoint,
}

/// Interaction state of one controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrabState {
    #[default]
    Idle,
    Hovering(HoverTarget),
    Grabbing(ActiveGrab),
}

/// A connected controller and everything it owns
///
/// The joint anchor is created on connect and reused by every grab the
/// controller makes; it is removed on disconnect.
#[derive(Debug)]
pub struct Controller {
    id: ControllerId,
    epoch: u64,
    handedness: Handedness,
    target_ray_mode: TargetRayMode,
    pub(crate) transform: Affine3A,
    pub(crate) state: GrabState,
    pub(crate) control_state: Option<ControlState>,
    pub(crate) poller: GamepadPoller,
    pub(crate) marker: Marker,
    pub(crate) anchor: JointAnchor,
    pub(crate) ray_length: f32,
}

impl Controller {
    pub fn new(
        id: ControllerId,
        epoch: u64,
        info: &ConnectionInfo,
        anchor: JointAnchor,
        poller: GamepadPoller,
        ray_length: f32,
    ) -> Self {
        Self {
            id,
            epoch,
            handedness: info.handedness,
            target_ray_mode: info.target_ray_mode,
            transform: Affine3A::IDENTITY,
            state: GrabState::Idle,
            control_state: None,
            poller,
            marker: Marker::new(),
            anchor,
            ray_length,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Connection counter, bumped on every connect
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn target_ray_mode(&self) -> TargetRayMode {
        self.target_ray_mode
    }

    pub fn transform(&self) -> &Affine3A {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Affine3A) {
        self.transform = transform;
    }

    pub fn state(&self) -> GrabState {
        self.state
    }

    pub fn hover_target(&self) -> Option<HoverTarget> {
        match self.state {
            GrabState::Hovering(target) => Some(target),
            _ => None,
        }
    }

    pub fn grab(&self) -> Option<ActiveGrab> {
        match self.state {
            GrabState::Grabbing(grab) => Some(grab),
            _ => None,
        }
    }

    pub fn is_grabbing(&self) -> bool {
        matches!(self.state, GrabState::Grabbing(_))
    }

    /// Resolved control values, absent until the input profile resolves
    pub fn control_state(&self) -> Option<&ControlState> {
        self.control_state.as_ref()
    }

    pub fn install_control_state(&mut self, state: ControlState) {
        self.control_state = Some(state);
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn anchor(&self) -> &JointAnchor {
        &self.anchor
    }

    /// Length of the visual pointing ray
    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// World-space ray origin and normalized direction
    ///
    /// The ray points down the controller's local -Z axis.
    pub fn ray(&self) -> (Vec3, Vec3) {
        controller_ray(&self.transform)
    }
}

/// Ray origin and direction for a controller transform
pub fn controller_ray(transform: &Affine3A) -> (Vec3, Vec3) {
    let origin = Vec3::from(transform.translation);
    let direction = transform.transform_vector3(Vec3::NEG_Z).normalize_or_zero();
    (origin, direction)
}
