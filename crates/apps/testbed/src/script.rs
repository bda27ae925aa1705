//! Scripted controller session

use handhold_interaction::{ControllerId, SessionEvent};

/// Where the scripted controller points during a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Straight ahead over the boxes
    Ahead,
    /// At the current center of the first box
    FirstBox,
    /// Held still where the previous phase left it
    Hold,
    /// Raised by the given height from where it was
    Raise(f32),
}

/// Discrete action fired when a phase starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectStart,
    SelectEnd,
    Disconnect,
}

impl Action {
    pub fn event(self, id: ControllerId) -> SessionEvent {
        match self {
            Action::SelectStart => SessionEvent::SelectStart { id },
            Action::SelectEnd => SessionEvent::SelectEnd { id },
            Action::Disconnect => SessionEvent::Disconnected { id },
        }
    }
}

/// A stretch of frames with a fixed controller input
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub name: &'static str,
    pub frames: u32,
    pub aim: Aim,
    /// Thumbstick y axis held for the whole phase
    pub thumbstick_y: f32,
    pub on_enter: Option<Action>,
}

impl Phase {
    fn new(name: &'static str, frames: u32, aim: Aim) -> Self {
        Self {
            name,
            frames,
            aim,
            thumbstick_y: 0.0,
            on_enter: None,
        }
    }

    fn with_thumbstick(mut self, y_axis: f32) -> Self {
        self.thumbstick_y = y_axis;
        self
    }

    fn on_enter(mut self, action: Action) -> Self {
        self.on_enter = Some(action);
        self
    }
}

/// Hover, grab, pull closer, lift, release, let fall
pub fn default_script() -> Vec<Phase> {
    vec![
        Phase::new("settle", 90, Aim::Ahead),
        Phase::new("hover", 30, Aim::FirstBox),
        Phase::new("grab", 30, Aim::Hold).on_enter(Action::SelectStart),
        Phase::new("pull", 60, Aim::Hold).with_thumbstick(1.0),
        Phase::new("lift", 60, Aim::Raise(0.5)),
        Phase::new("release", 90, Aim::Hold).on_enter(Action::SelectEnd),
        Phase::new("disconnect", 10, Aim::Hold).on_enter(Action::Disconnect),
    ]
}

/// Total frames a script runs for
pub fn script_frames(script: &[Phase]) -> u64 {
    script.iter().map(|phase| u64::from(phase.frames)).sum()
}
