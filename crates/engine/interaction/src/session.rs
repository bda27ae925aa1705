//! Inputs from the immersive session: connection and select events plus
//! per-frame controller poses

use devices::{ConnectionInfo, GamepadSnapshot};
use glam::Affine3A;
use std::fmt;

/// Identifies one controller for the lifetime of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControllerId(pub u32);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller {}", self.0)
    }
}

/// Discrete controller events
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connected { id: ControllerId, info: ConnectionInfo },
    Disconnected { id: ControllerId },
    SelectStart { id: ControllerId },
    SelectEnd { id: ControllerId },
}

impl SessionEvent {
    pub fn controller(&self) -> ControllerId {
        match self {
            SessionEvent::Connected { id, .. }
            | SessionEvent::Disconnected { id }
            | SessionEvent::SelectStart { id }
            | SessionEvent::SelectEnd { id } => *id,
        }
    }
}

/// One controller's state for a frame
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerFrame {
    pub id: ControllerId,
    /// Controller-to-world transform
    pub transform: Affine3A,
    /// Raw gamepad values, when the device exposes a gamepad
    pub gamepad: Option<GamepadSnapshot>,
}

impl ControllerFrame {
    pub fn new(id: ControllerId, transform: Affine3A) -> Self {
        Self {
            id,
            transform,
            gamepad: None,
        }
    }

    pub fn with_gamepad(mut self, gamepad: GamepadSnapshot) -> Self {
        self.gamepad = Some(gamepad);
        self
    }
}

/// Everything the frame callback receives for one tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameInput {
    /// Whether an immersive session is presenting
    pub session_active: bool,
    /// Real seconds since the previous tick
    pub elapsed: f32,
    pub controllers: Vec<ControllerFrame>,
}
