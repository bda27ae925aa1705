//! The interaction context: owns the world and every controller, and runs
//! one tick per rendered frame

use crate::config::HandholdConfig;
use crate::controller::Controller;
use crate::depth::DistanceAdjuster;
use crate::handlers;
use crate::picker::{self, PickSettings};
use crate::session::{ControllerId, FrameInput, SessionEvent};
use crate::sink::{MarkerView, RayVisual, RenderSink};
use crate::stepper::PhysicsStepper;
use devices::{ConnectionInfo, ControlLayout, ControlState, GamepadPoller, ProfileResolver, ProfileSource};
use glam::Vec3;
use handhold_physics::rapier3d::prelude::RigidBodyHandle;
use handhold_physics::{BodyDesc, GrabBody, JointAnchor, PhysicsWorld};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key for a profile resolution: which controller, and which connection of it
type ResolutionKey = (ControllerId, u64);

/// Grab interaction state for one session
///
/// Built explicitly and passed by reference to the frame callback and the
/// event handlers. `tick` and `handle_event` never fail; internal errors
/// are logged.
pub struct InteractionContext {
    world: PhysicsWorld,
    candidates: Vec<GrabBody>,
    scene_bodies: Vec<RigidBodyHandle>,
    controllers: BTreeMap<ControllerId, Controller>,
    resolver: ProfileResolver<ResolutionKey>,
    stepper: PhysicsStepper,
    adjuster: DistanceAdjuster,
    pick_settings: PickSettings,
    config: HandholdConfig,
    next_epoch: u64,
}

impl InteractionContext {
    pub fn new(config: HandholdConfig, profiles: Arc<dyn ProfileSource>) -> Self {
        let world = PhysicsWorld::new(config.physics.gravity());
        let stepper = PhysicsStepper::new(
            config.physics.timestep,
            config.physics.step_mode,
            config.physics.max_substeps,
        );
        let resolver = ProfileResolver::new(profiles, config.input.default_profile.clone());
        let adjuster = DistanceAdjuster::from_config(&config.interaction);
        let pick_settings = PickSettings {
            far_ray_length: config.interaction.far_ray_length,
            max_distance: config.interaction.max_pick_distance,
        };

        Self {
            world,
            candidates: Vec::new(),
            scene_bodies: Vec::new(),
            controllers: BTreeMap::new(),
            resolver,
            stepper,
            adjuster,
            pick_settings,
            config,
            next_epoch: 0,
        }
    }

    pub fn config(&self) -> &HandholdConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Spawn a grabbable body and register it as a pick candidate
    pub fn add_candidate(&mut self, desc: &BodyDesc) -> GrabBody {
        let body = GrabBody::spawn(&mut self.world, desc);
        self.register_candidate(body);
        body
    }

    /// Register a body already in the world as a pick candidate
    ///
    /// Candidates are tested in registration order.
    pub fn register_candidate(&mut self, body: GrabBody) {
        self.candidates.push(body);
        self.scene_bodies.push(body.body_handle());
    }

    /// Add the static ground plane
    pub fn add_ground(&mut self, height: f32) -> RigidBodyHandle {
        let handle = GrabBody::spawn_ground(&mut self.world, height);
        self.scene_bodies.push(handle);
        handle
    }

    pub fn candidates(&self) -> &[GrabBody] {
        &self.candidates
    }

    pub fn controller(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(&id)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.values()
    }

    /// Profile resolutions still running
    pub fn pending_resolutions(&self) -> usize {
        self.resolver.pending()
    }

    /// Install a control layout directly, bypassing profile resolution
    ///
    /// Returns `false` when the controller is not connected.
    pub fn install_control_layout(&mut self, id: ControllerId, layout: ControlLayout) -> bool {
        match self.controllers.get_mut(&id) {
            Some(controller) => {
                controller.install_control_state(ControlState::new(layout));
                true
            }
            None => false,
        }
    }

    /// Handle a discrete session event
    pub fn handle_event(&mut self, event: SessionEvent, sink: &mut dyn RenderSink) {
        match event {
            SessionEvent::Connected { id, info } => self.connect(id, info, sink),
            SessionEvent::Disconnected { id } => match self.controllers.remove(&id) {
                Some(controller) => {
                    handlers::on_disconnect(controller, &mut self.world);
                    sink.controller_disconnected(id);
                }
                None => tracing::debug!("Disconnect for unknown {}", id),
            },
            SessionEvent::SelectStart { id } => match self.controllers.get_mut(&id) {
                Some(controller) => {
                    handlers::on_select_start(controller, &mut self.world);
                }
                None => tracing::debug!("Select start for unknown {}", id),
            },
            SessionEvent::SelectEnd { id } => match self.controllers.get_mut(&id) {
                Some(controller) => {
                    handlers::on_select_end(controller, &mut self.world);
                }
                None => tracing::debug!("Select end for unknown {}", id),
            },
        }
    }

    fn connect(&mut self, id: ControllerId, info: ConnectionInfo, sink: &mut dyn RenderSink) {
        if let Some(previous) = self.controllers.remove(&id) {
            tracing::debug!("{} reconnected without disconnect, cleaning up", id);
            handlers::on_disconnect(previous, &mut self.world);
        }

        self.next_epoch += 1;
        let epoch = self.next_epoch;

        let anchor = JointAnchor::new(&mut self.world, Vec3::ZERO);
        let poller = GamepadPoller::with_deadzone(
            self.config.input.poll_interval,
            self.config.input.axis_deadzone,
        );
        let controller = Controller::new(
            id,
            epoch,
            &info,
            anchor,
            poller,
            self.pick_settings.far_ray_length,
        );

        tracing::info!(
            "{} connected ({} hand, {:?}, profiles {:?})",
            id,
            info.handedness,
            info.target_ray_mode,
            info.profiles
        );
        sink.controller_connected(id, RayVisual::from(info.target_ray_mode));
        self.controllers.insert(id, controller);
        self.resolver.request((id, epoch), info);
    }

    /// Run one frame: drive controllers, step physics, report to the sink
    pub fn tick(&mut self, input: &FrameInput, sink: &mut dyn RenderSink) {
        self.install_resolved_profiles();

        if input.session_active {
            for frame in &input.controllers {
                let Some(controller) = self.controllers.get_mut(&frame.id) else {
                    tracing::debug!("Frame for unknown {}", frame.id);
                    continue;
                };
                controller.transform = frame.transform;
                controller.poller.tick(
                    input.elapsed,
                    controller.control_state.as_mut(),
                    frame.gamepad.as_ref(),
                );

                if controller.is_grabbing() {
                    if let Err(e) = self.adjuster.apply(controller, &mut self.world) {
                        tracing::warn!("{} failed to update grab: {}", frame.id, e);
                    }
                } else {
                    picker::update_hover(
                        controller,
                        &self.world,
                        &self.candidates,
                        &self.pick_settings,
                    );
                }
            }
        }

        self.stepper.advance(&mut self.world, input.elapsed);
        self.report(sink);
    }

    fn install_resolved_profiles(&mut self) {
        for ((id, epoch), result) in self.resolver.poll_completed() {
            let Some(controller) = self
                .controllers
                .get_mut(&id)
                .filter(|controller| controller.epoch() == epoch)
            else {
                tracing::debug!("Discarding stale profile resolution for {}", id);
                continue;
            };

            match result {
                Ok(layout) => {
                    tracing::info!(
                        "{} using input profile {} ({} controls)",
                        id,
                        layout.profile_id(),
                        layout.len()
                    );
                    controller.install_control_state(ControlState::new(layout));
                }
                Err(e) => tracing::warn!("{} input profile unresolved: {}", id, e),
            }
        }
    }

    fn report(&self, sink: &mut dyn RenderSink) {
        for &handle in &self.scene_bodies {
            if let Some(pose) = self.world.body_pose(handle) {
                sink.body_pose(handle, pose);
            }
        }

        for controller in self.controllers.values() {
            let marker = controller.marker();
            sink.marker(&MarkerView {
                controller: controller.id(),
                position: marker.position(),
                world_position: marker.world_position(controller.transform()),
                visible: marker.visible(),
                parent: marker.parent(),
            });
            sink.controller_ray(controller.id(), controller.ray_length());
        }
    }
}
