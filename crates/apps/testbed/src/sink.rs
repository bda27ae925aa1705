//! Render sink that logs instead of drawing

use handhold_interaction::handhold_physics::rapier3d::prelude::RigidBodyHandle;
use handhold_interaction::handhold_physics::BodyPose;
use handhold_interaction::{ControllerId, MarkerView, RayVisual, RenderSink};
use std::collections::BTreeMap;

/// Logs body poses every `every` frames, and marker changes as they happen
#[derive(Debug)]
pub struct LogSink {
    every: u64,
    frame: u64,
    markers: BTreeMap<ControllerId, bool>,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frame: 0,
            markers: BTreeMap::new(),
        }
    }

    /// Mark the start of a new frame
    pub fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    fn logging_frame(&self) -> bool {
        self.frame % self.every == 0
    }
}

impl RenderSink for LogSink {
    fn controller_connected(&mut self, id: ControllerId, visual: RayVisual) {
        tracing::info!("{} ray visual: {:?}", id, visual);
    }

    fn controller_disconnected(&mut self, id: ControllerId) {
        self.markers.remove(&id);
        tracing::info!("{} visuals removed", id);
    }

    fn body_pose(&mut self, body: RigidBodyHandle, pose: BodyPose) {
        if self.logging_frame() {
            let p = pose.position;
            tracing::info!(
                "Frame {}: body {:?} pos={:.3},{:.3},{:.3}",
                self.frame,
                body.into_raw_parts().0,
                p.x,
                p.y,
                p.z
            );
        }
    }

    fn marker(&mut self, view: &MarkerView) {
        let previous = self.markers.insert(view.controller, view.visible);
        if previous != Some(view.visible) {
            let p = view.world_position;
            tracing::info!(
                "Frame {}: {} marker {} at {:.3},{:.3},{:.3} ({:?})",
                self.frame,
                view.controller,
                if view.visible { "shown" } else { "hidden" },
                p.x,
                p.y,
                p.z,
                view.parent
            );
        }
    }

    fn controller_ray(&mut self, id: ControllerId, length: f32) {
        if self.logging_frame() {
            tracing::debug!("Frame {}: {} ray length {:.3}", self.frame, id, length);
        }
    }
}
