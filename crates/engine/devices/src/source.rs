//! Profile descriptor sources
//!
//! A source lists the profiles it knows and fetches descriptors by id. The
//! file source follows the WebXR input-profile registry layout:
//! `<root>/profilesList.json` indexing `<root>/<id>/profile.json`.

use crate::error::{ProfileError, Result};
use crate::profile::ProfileDescriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// File name of the profile index inside a profile root
pub const PROFILES_LIST_FILE: &str = "profilesList.json";

/// Index entry for one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// Path of the profile JSON, relative to the source root
    pub path: String,
    #[serde(default)]
    pub deprecated: bool,
}

/// Profile index keyed by profile id
pub type ProfileList = BTreeMap<String, ProfileEntry>;

/// Asynchronous provider of profile descriptors
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// List every profile this source can serve
    async fn list(&self) -> Result<ProfileList>;

    /// Fetch one profile's descriptor
    async fn fetch(&self, profile_id: &str, entry: &ProfileEntry) -> Result<ProfileDescriptor>;
}

/// Reads profiles from a directory on disk
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    root: PathBuf,
}

impl FileProfileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl ProfileSource for FileProfileSource {
    async fn list(&self) -> Result<ProfileList> {
        let text = tokio::fs::read_to_string(self.root.join(PROFILES_LIST_FILE)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch(&self, profile_id: &str, entry: &ProfileEntry) -> Result<ProfileDescriptor> {
        let path = self.root.join(&entry.path);
        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProfileError::UnknownProfile(profile_id.to_string())
            } else {
                ProfileError::Io(e)
            }
        })?;
        ProfileDescriptor::from_json(&text)
    }
}

/// Serves descriptors held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    profiles: BTreeMap<String, ProfileDescriptor>,
}

impl StaticProfileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, replacing any profile with the same id
    pub fn insert(&mut self, descriptor: ProfileDescriptor) {
        self.profiles.insert(descriptor.profile_id.clone(), descriptor);
    }

    pub fn with_profile(mut self, descriptor: ProfileDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Add a descriptor from JSON text
    pub fn insert_json(&mut self, json: &str) -> Result<()> {
        self.insert(ProfileDescriptor::from_json(json)?);
        Ok(())
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn list(&self) -> Result<ProfileList> {
        Ok(self
            .profiles
            .keys()
            .map(|id| {
                (
                    id.clone(),
                    ProfileEntry {
                        path: format!("{id}/profile.json"),
                        deprecated: false,
                    },
                )
            })
            .collect())
    }

    async fn fetch(&self, profile_id: &str, _entry: &ProfileEntry) -> Result<ProfileDescriptor> {
        self.profiles
            .get(profile_id)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownProfile(profile_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::tests::{GENERIC_TRIGGER_PROFILE, THUMBSTICK_PROFILE};
    use std::fs;

    #[tokio::test]
    async fn test_static_source() {
        let mut source = StaticProfileSource::new();
        source.insert_json(GENERIC_TRIGGER_PROFILE).unwrap();

        let list = source.list().await.unwrap();
        let entry = list.get("generic-trigger").unwrap();
        let profile = source.fetch("generic-trigger", entry).await.unwrap();
        assert_eq!(profile.profile_id, "generic-trigger");

        let err = source.fetch("nope", entry).await.unwrap_err();
        assert!(matches!(err, ProfileError::UnknownProfile(_)));
    }

    #[tokio::test]
    async fn test_file_source_reads_registry_layout() {
        let dir = tempfile::tempdir().unwrap();
        let profile_dir = dir.path().join("generic-trigger-squeeze-thumbstick");
        fs::create_dir_all(&profile_dir).unwrap();
        fs::write(profile_dir.join("profile.json"), THUMBSTICK_PROFILE).unwrap();
        fs::write(
            dir.path().join(PROFILES_LIST_FILE),
            r#"{
                "generic-trigger-squeeze-thumbstick": {
                    "path": "generic-trigger-squeeze-thumbstick/profile.json"
                },
                "missing-device": { "path": "missing-device/profile.json", "deprecated": true }
            }"#,
        )
        .unwrap();

        let source = FileProfileSource::new(dir.path());
        let list = source.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list["missing-device"].deprecated);

        let entry = &list["generic-trigger-squeeze-thumbstick"];
        let profile = source
            .fetch("generic-trigger-squeeze-thumbstick", entry)
            .await
            .unwrap();
        assert_eq!(profile.layouts.len(), 2);

        let err = source
            .fetch("missing-device", &list["missing-device"])
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::UnknownProfile(_)));
    }

    #[tokio::test]
    async fn test_file_source_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileProfileSource::new(dir.path());
        assert!(matches!(source.list().await, Err(ProfileError::Io(_))));
    }
}
