//! Asynchronous input-profile resolution
//!
//! Resolution runs on the tokio runtime, off the frame callback's timeline.
//! The frame callback drains finished resolutions without blocking through
//! [`ProfileResolver::poll_completed`].

use crate::error::{ProfileError, Result};
use crate::profile::{ControlLayout, Handedness, TargetRayMode};
use crate::source::ProfileSource;
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Device descriptor carried by a controller connection event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Profile ids, most specific first
    pub profiles: Vec<String>,
    pub handedness: Handedness,
    pub target_ray_mode: TargetRayMode,
}

impl ConnectionInfo {
    pub fn new(profiles: impl IntoIterator<Item = impl Into<String>>, handedness: Handedness) -> Self {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
            handedness,
            target_ray_mode: TargetRayMode::TrackedPointer,
        }
    }

    pub fn with_target_ray_mode(mut self, mode: TargetRayMode) -> Self {
        self.target_ray_mode = mode;
        self
    }
}

/// Resolve the control layout for a connecting device
///
/// Picks the first of the device's profiles the source knows, falling back to
/// `default_profile`, then reduces the layout for the device's hand.
pub async fn resolve_layout(
    source: &dyn ProfileSource,
    info: &ConnectionInfo,
    default_profile: Option<&str>,
) -> Result<ControlLayout> {
    let list = source.list().await?;

    let profile_id = match info.profiles.iter().find(|id| list.contains_key(id.as_str())) {
        Some(id) => id.clone(),
        None => match default_profile {
            Some(default) if list.contains_key(default) => default.to_string(),
            Some(default) => return Err(ProfileError::UnknownProfile(default.to_string())),
            None => return Err(ProfileError::NoMatchingProfile(info.profiles.clone())),
        },
    };

    let entry = &list[&profile_id];
    if entry.deprecated {
        tracing::warn!("Input profile {} is deprecated", profile_id);
    }

    let descriptor = source.fetch(&profile_id, entry).await?;
    let layout = descriptor.layout_for(info.handedness)?;
    ControlLayout::from_descriptor(&descriptor.profile_id, layout)
}

/// A finished resolution tagged with the caller's key
pub type Resolution<K> = (K, Result<ControlLayout>);

struct PendingResolution<K> {
    key: K,
    rx: oneshot::Receiver<Result<ControlLayout>>,
}

/// Spawns profile resolutions and hands back their results
///
/// `K` identifies the requester (e.g. a controller id plus connection
/// epoch). There is no cancellation: callers discard results for keys that
/// are no longer current.
pub struct ProfileResolver<K> {
    source: Arc<dyn ProfileSource>,
    default_profile: Option<String>,
    pending: Vec<PendingResolution<K>>,
    failed: Vec<Resolution<K>>,
}

impl<K> ProfileResolver<K> {
    pub fn new(source: Arc<dyn ProfileSource>, default_profile: Option<String>) -> Self {
        Self {
            source,
            default_profile,
            pending: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Start resolving a device's layout in the background
    ///
    /// Outside a tokio runtime the request fails immediately with
    /// [`ProfileError::NoRuntime`], reported on the next poll.
    pub fn request(&mut self, key: K, info: ConnectionInfo) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                self.failed.push((key, Err(ProfileError::NoRuntime)));
                return;
            }
        };

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        let default_profile = self.default_profile.clone();

        handle.spawn(async move {
            let result = resolve_layout(source.as_ref(), &info, default_profile.as_deref()).await;
            // Receiver gone means the resolver itself was dropped
            let _ = tx.send(result);
        });

        self.pending.push(PendingResolution { key, rx });
    }

    /// Collect every resolution that has finished, without blocking
    pub fn poll_completed(&mut self) -> Vec<Resolution<K>> {
        let mut done: Vec<Resolution<K>> = self.failed.drain(..).collect();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut pending in self.pending.drain(..) {
            match pending.rx.try_recv() {
                Ok(result) => done.push((pending.key, result)),
                Err(TryRecvError::Empty) => still_pending.push(pending),
                Err(TryRecvError::Closed) => done.push((pending.key, Err(ProfileError::Cancelled))),
            }
        }

        self.pending = still_pending;
        done
    }

    /// Number of resolutions still in flight
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
