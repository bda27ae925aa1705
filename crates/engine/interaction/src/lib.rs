//! Controller grab interaction for Handhold
//!
//! Lets a tracked pointing controller pick, hold and reposition rigid bodies.
//! A hovered body is bound to the controller with a point-to-point joint on
//! select, re-anchored every frame while held, and pushed or pulled along the
//! pointing line with a thumbstick.
//!
//! # Modules
//!
//! - [`context`]: Owns the world and controllers, runs one tick per frame
//! - [`controller`]: Per-controller state (idle, hovering, grabbing)
//! - [`handlers`]: Select and disconnect handlers
//! - [`picker`]: Nearest-hit ray picking
//! - [`constraint`]: Grab joint creation and teardown
//! - [`depth`]: Axis-driven grab depth
//! - [`marker`]: Hit marker and its parent frame
//! - [`stepper`]: Physics stepping per tick
//! - [`sink`]: Output to the renderer
//! - [`session`]: Session events and per-frame input
//! - [`config`]: TOML configuration

pub mod config;
pub mod constraint;
pub mod context;
pub mod controller;
pub mod depth;
pub mod error;
pub mod handlers;
pub mod marker;
pub mod picker;
pub mod session;
pub mod sink;
pub mod stepper;

pub use config::{HandholdConfig, InputConfig, InteractionConfig, PhysicsConfig};
pub use context::InteractionContext;
pub use controller::{controller_ray, ActiveGrab, Controller, GrabState, HoverTarget};
pub use depth::DistanceAdjuster;
pub use error::{ConfigError, GrabError};
pub use marker::{Marker, MarkerParent};
pub use picker::{pick, PickSettings};
pub use session::{ControllerFrame, ControllerId, FrameInput, SessionEvent};
pub use sink::{MarkerView, NullSink, RayVisual, RenderSink};
pub use stepper::{PhysicsStepper, StepMode, DEFAULT_TIMESTEP};

// Re-export for convenience
pub use devices;
pub use handhold_physics;
