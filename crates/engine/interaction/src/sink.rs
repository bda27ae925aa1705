//! Output side of the interaction loop: what the renderer gets each tick

use crate::marker::MarkerParent;
use crate::session::ControllerId;
use devices::TargetRayMode;
use glam::Vec3;
use handhold_physics::rapier3d::prelude::RigidBodyHandle;
use handhold_physics::BodyPose;

/// Visual used for a controller's pointing ray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayVisual {
    /// Line from the controller, scaled to the ray length
    Line,
    /// Ring placed at the end of a gaze ray
    Reticle,
    /// Nothing drawn
    None,
}

impl From<TargetRayMode> for RayVisual {
    fn from(mode: TargetRayMode) -> Self {
        match mode {
            TargetRayMode::TrackedPointer => RayVisual::Line,
            TargetRayMode::Gaze => RayVisual::Reticle,
            TargetRayMode::Screen => RayVisual::None,
        }
    }
}

/// Marker state for one controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerView {
    pub controller: ControllerId,
    /// Position in the parent's frame
    pub position: Vec3,
    pub world_position: Vec3,
    pub visible: bool,
    pub parent: MarkerParent,
}

/// Receives poses and visuals from the interaction context
///
/// Every method defaults to doing nothing, so a renderer only implements
/// what it draws.
pub trait RenderSink {
    fn controller_connected(&mut self, _id: ControllerId, _visual: RayVisual) {}

    fn controller_disconnected(&mut self, _id: ControllerId) {}

    fn body_pose(&mut self, _body: RigidBodyHandle, _pose: BodyPose) {}

    fn marker(&mut self, _view: &MarkerView) {}

    fn controller_ray(&mut self, _id: ControllerId, _length: f32) {}
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}
