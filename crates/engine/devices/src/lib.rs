//! Input device abstractions for Handhold
//!
//! Translates heterogeneous XR controller layouts into a uniform control
//! state.
//!
//! # Modules
//!
//! - [`profile`]: Input-profile descriptors, handedness and resolved layouts
//! - [`source`]: Where profile descriptors come from (disk, memory)
//! - [`resolver`]: Background resolution of a connecting device's layout
//! - [`control`]: Per-controller control values
//! - [`gamepad`]: Raw button/axis snapshots and analog processing
//! - [`poller`]: Throttled polling of snapshots into control state

pub mod control;
pub mod error;
pub mod gamepad;
pub mod poller;
pub mod profile;
pub mod resolver;
pub mod source;

// Re-export commonly used types at crate root
pub use control::{ControlState, ControlValue};
pub use error::{PollError, ProfileError};
pub use gamepad::GamepadSnapshot;
pub use poller::{GamepadPoller, PollOutcome, DEFAULT_POLL_INTERVAL};
pub use profile::{
    ControlBinding, ControlLayout, Handedness, ProfileDescriptor, TargetRayMode,
};
pub use resolver::{resolve_layout, ConnectionInfo, ProfileResolver, Resolution};
pub use source::{FileProfileSource, ProfileEntry, ProfileList, ProfileSource, StaticProfileSource};
