//! Profil local — le seul etat persiste par ce client: le username en
//! cache. Ecrit a la soumission du sign-in et a la fin du callback,
//! efface au sign-out.
//!
//! Persisted as `{data_dir}/profile.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub updated_at: String,
}

const PROFILE_FILE: &str = "profile.json";

/// Load the cached username, or None if absent/corrupted.
pub fn cached_username(data_dir: &Path) -> Option<String> {
    let path = data_dir.join(PROFILE_FILE);
    let content = std::fs::read_to_string(&path).ok()?;
    let profile: Profile = serde_json::from_str(&content).ok()?;
    (!profile.username.is_empty()).then_some(profile.username)
}

/// Best-effort save.
pub fn save_username(data_dir: &Path, username: &str) {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        tracing::warn!(error = %e, "Failed to create data dir for profile");
        return;
    }
    let profile = Profile {
        username: username.to_string(),
        updated_at: crate::time_utils::now().to_rfc3339(),
    };
    let path = data_dir.join(PROFILE_FILE);
    match serde_json::to_string_pretty(&profile) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                tracing::warn!(error = %e, "Failed to write profile.json");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to serialize profile"),
    }
}

pub fn clear(data_dir: &Path) {
    let _ = std::fs::remove_file(data_dir.join(PROFILE_FILE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cached_username(dir.path()).is_none());
        save_username(dir.path(), "John Doe");
        assert_eq!(cached_username(dir.path()).as_deref(), Some("John Doe"));
        clear(dir.path());
        assert!(cached_username(dir.path()).is_none());
    }

    #[test]
    fn test_corrupted_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROFILE_FILE), "{not json").unwrap();
        assert!(cached_username(dir.path()).is_none());
    }

    #[test]
    fn test_empty_username_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        save_username(dir.path(), "");
        assert!(cached_username(dir.path()).is_none());
    }
}
