//! Error types for profile resolution and gamepad polling

use crate::profile::Handedness;
use thiserror::Error;

/// Result type for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors that can occur while resolving an input profile
#[derive(Error, Debug)]
pub enum ProfileError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed profile or profile list JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// None of the device's profiles is known and no default is configured
    #[error("no matching profile among {0:?} and no default profile")]
    NoMatchingProfile(Vec<String>),

    /// Profile id is not present in the source
    #[error("profile not found: {0}")]
    UnknownProfile(String),

    /// Profile has no layout usable for this hand
    #[error("profile {profile} has no layout for handedness {handedness}")]
    MissingLayout {
        profile: String,
        handedness: Handedness,
    },

    /// A touchpad or thumbstick component lacks axis indices
    #[error("control {control} in profile {profile} is missing axis indices")]
    MissingAxis { profile: String, control: String },

    /// The resolution task ended without reporting a result
    #[error("profile resolution was cancelled")]
    Cancelled,

    /// Resolution was requested outside of a tokio runtime
    #[error("no async runtime available for profile resolution")]
    NoRuntime,
}

/// Errors that can occur while reading a gamepad snapshot
///
/// These never leave the poller; they are logged and reported in
/// [`PollOutcome`](crate::poller::PollOutcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PollError {
    /// The input source reported no gamepad this frame
    #[error("no gamepad snapshot available")]
    NoSnapshot,

    /// A button index points past the snapshot's button array
    #[error("button index {index} for {control} out of range (len {len})")]
    ButtonOutOfRange {
        control: String,
        index: usize,
        len: usize,
    },

    /// An axis index points past the snapshot's axis array
    #[error("axis index {index} for {control} out of range (len {len})")]
    AxisOutOfRange {
        control: String,
        index: usize,
        len: usize,
    },
}
