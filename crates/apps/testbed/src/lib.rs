//! Handhold Testbed
//!
//! Runs a scripted, headless grab session against the demo scene:
//! - A right-handed tracked-pointer controller connects at head height
//! - It hovers the first box, grabs it, pulls it closer, lifts and drops it
//! - A logging sink prints body poses at a fixed frame cadence

pub mod scene;
pub mod script;
pub mod sink;

use glam::{Affine3A, Vec3};
use handhold_interaction::devices::{ConnectionInfo, GamepadSnapshot, Handedness, ProfileSource};
use handhold_interaction::{
    ControllerFrame, ControllerId, FrameInput, HandholdConfig, InteractionContext, SessionEvent,
};
use scene::{aim_at, DemoScene, CONTROLLER_ORIGIN};
use script::{script_frames, Action, Aim, Phase};
use sink::LogSink;
use std::sync::Arc;

/// Profiles the scripted controller advertises, most specific first
pub const CONTROLLER_PROFILES: [&str; 2] = ["generic-trigger-squeeze-thumbstick", "generic-trigger"];

/// Summary of a scripted run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    pub grabs: u32,
    pub releases: u32,
    /// Input profile the controller ended up using, if it resolved
    pub profile: Option<String>,
}

/// Scripted session over the demo scene
pub struct Testbed {
    ctx: InteractionContext,
    scene: DemoScene,
    controller: ControllerId,
    transform: Affine3A,
    connected: bool,
}

impl Testbed {
    pub fn new(config: HandholdConfig, profiles: Arc<dyn ProfileSource>) -> Self {
        let mut ctx = InteractionContext::new(config, profiles);
        let scene = DemoScene::build(&mut ctx);

        Self {
            ctx,
            scene,
            controller: ControllerId(0),
            transform: Affine3A::from_translation(CONTROLLER_ORIGIN),
            connected: false,
        }
    }

    pub fn context(&self) -> &InteractionContext {
        &self.ctx
    }

    pub fn scene(&self) -> &DemoScene {
        &self.scene
    }

    /// Play a script, stopping early after `max_frames` if given
    ///
    /// Yields to the runtime between frames so profile resolution can make
    /// progress.
    pub async fn run(
        &mut self,
        script: &[Phase],
        max_frames: Option<u64>,
        sink: &mut LogSink,
    ) -> RunReport {
        let limit = max_frames.unwrap_or_else(|| script_frames(script));
        let elapsed = self.ctx.config().physics.timestep;
        let mut report = RunReport::default();

        self.connect(sink);

        'script: for phase in script {
            tracing::info!("Phase {} ({} frames)", phase.name, phase.frames);
            if let Some(action) = phase.on_enter {
                self.fire(action, sink, &mut report);
            }

            for _ in 0..phase.frames {
                if report.frames >= limit {
                    break 'script;
                }
                self.transform = self.aim(phase);

                let controllers = if self.connected {
                    let mut gamepad = GamepadSnapshot::zeroed(4, 4);
                    gamepad.set_axis(3, phase.thumbstick_y);
                    vec![ControllerFrame::new(self.controller, self.transform).with_gamepad(gamepad)]
                } else {
                    Vec::new()
                };
                let input = FrameInput {
                    session_active: true,
                    elapsed,
                    controllers,
                };

                sink.begin_frame(report.frames);
                self.ctx.tick(&input, sink);
                self.record_profile(&mut report);
                report.frames += 1;

                tokio::task::yield_now().await;
            }
        }

        tracing::info!(
            "Session finished after {} frames: {} grab(s), {} release(s)",
            report.frames,
            report.grabs,
            report.releases
        );
        report
    }

    fn connect(&mut self, sink: &mut LogSink) {
        let info = ConnectionInfo::new(CONTROLLER_PROFILES, Handedness::Right);
        self.ctx.handle_event(
            SessionEvent::Connected {
                id: self.controller,
                info,
            },
            sink,
        );
        self.connected = true;
    }

    fn fire(&mut self, action: Action, sink: &mut LogSink, report: &mut RunReport) {
        if !self.connected {
            tracing::warn!("Skipping {:?}, controller is not connected", action);
            return;
        }

        let was_grabbing = self.is_grabbing();
        self.ctx.handle_event(action.event(self.controller), sink);
        let grabbing = self.is_grabbing();

        match action {
            Action::SelectStart if !was_grabbing && grabbing => report.grabs += 1,
            Action::SelectEnd if was_grabbing && !grabbing => report.releases += 1,
            Action::Disconnect => self.connected = false,
            _ => tracing::warn!("{:?} had no effect", action),
        }
    }

    fn is_grabbing(&self) -> bool {
        self.ctx
            .controller(self.controller)
            .is_some_and(|controller| controller.is_grabbing())
    }

    fn aim(&self, phase: &Phase) -> Affine3A {
        match phase.aim {
            Aim::Ahead => aim_at(CONTROLLER_ORIGIN, CONTROLLER_ORIGIN + Vec3::new(0.0, 0.5, -1.0)),
            Aim::FirstBox => match self.scene.boxes.first() {
                Some(target) => aim_at(CONTROLLER_ORIGIN, target.position(self.ctx.world())),
                None => self.transform,
            },
            Aim::Hold => self.transform,
            Aim::Raise(height) => {
                // Spread the lift evenly over the phase
                let per_frame = height / phase.frames.max(1) as f32;
                Affine3A::from_translation(Vec3::Y * per_frame) * self.transform
            }
        }
    }

    fn record_profile(&self, report: &mut RunReport) {
        if report.profile.is_some() {
            return;
        }
        report.profile = self
            .ctx
            .controller(self.controller)
            .and_then(|controller| controller.control_state())
            .map(|state| state.layout().profile_id().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handhold_interaction::devices::{resolve_layout, FileProfileSource, StaticProfileSource};
    use std::path::PathBuf;

    fn shipped_profiles() -> StaticProfileSource {
        let mut source = StaticProfileSource::new();
        source
            .insert_json(include_str!("../profiles/generic-trigger/profile.json"))
            .unwrap();
        source
            .insert_json(include_str!(
                "../profiles/generic-trigger-squeeze-thumbstick/profile.json"
            ))
            .unwrap();
        source
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let mut testbed = Testbed::new(HandholdConfig::default(), Arc::new(shipped_profiles()));
        let mut sink = LogSink::new(60);
        let script = script::default_script();

        let report = testbed.run(&script, None, &mut sink).await;

        assert_eq!(report.frames, script_frames(&script));
        assert_eq!(report.grabs, 1);
        assert_eq!(report.releases, 1);
        assert_eq!(
            report.profile.as_deref(),
            Some("generic-trigger-squeeze-thumbstick")
        );

        let ctx = testbed.context();
        assert_eq!(ctx.world().joint_count(), 0);
        assert_eq!(ctx.controllers().count(), 0);
        // The first box was pulled toward the user before being dropped
        let first = testbed.scene().boxes[0].position(ctx.world());
        assert!(first.z > scene::BOX_POSITIONS[0].z + 0.5, "box ended at {first:?}");
    }

    #[tokio::test]
    async fn test_frame_limit() {
        let mut testbed = Testbed::new(HandholdConfig::default(), Arc::new(shipped_profiles()));
        let mut sink = LogSink::new(60);

        let report = testbed.run(&script::default_script(), Some(100), &mut sink).await;

        assert_eq!(report.frames, 100);
        assert_eq!(report.grabs, 0);
    }

    #[tokio::test]
    async fn test_shipped_profiles_resolve_from_disk() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("profiles");
        let source = FileProfileSource::new(root);

        let info = ConnectionInfo::new(CONTROLLER_PROFILES, Handedness::Right);
        let layout = resolve_layout(&source, &info, Some("generic-trigger"))
            .await
            .unwrap();
        assert_eq!(layout.profile_id(), "generic-trigger-squeeze-thumbstick");
        assert!(layout.get("xr_standard_thumbstick").unwrap().is_axis());

        let info = ConnectionInfo::new(["some-vendor-device"], Handedness::Left);
        let layout = resolve_layout(&source, &info, Some("generic-trigger"))
            .await
            .unwrap();
        assert_eq!(layout.profile_id(), "generic-trigger");
    }
}
