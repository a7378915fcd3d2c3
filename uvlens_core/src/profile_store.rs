//! Profile persistence with file locking.
//!
//! The profile is a flat JSON record of table indices. Unlike derived state,
//! a malformed profile is reported to the caller instead of being replaced
//! with defaults: the user has to fix or redo the setup.

use crate::{Error, Profile, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the stored profile inside the data directory
pub const PROFILE_FILE: &str = "uv_profile.json";

/// Load and save the user's profile
pub trait ProfileStore {
    /// `Ok(None)` when no profile has been set up yet
    fn load(&self) -> Result<Option<Profile>>;

    fn save(&self, profile: &Profile) -> Result<()>;
}

/// Profile stored as a JSON file
#[derive(Clone, Debug)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard location inside a data directory
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonProfileStore {
    /// Load the profile with shared locking
    fn load(&self) -> Result<Option<Profile>> {
        let path = &self.path;
        if !path.exists() {
            tracing::info!("No profile found at {:?}", path);
            return Ok(None);
        }

        let file = File::open(path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        match serde_json::from_str::<Profile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!("Failed to parse profile {:?}: {}", path, e);
                Err(Error::Profile(format!(
                    "stored profile at {} is malformed ({}); run setup again",
                    path.display(),
                    e
                )))
            }
        }
    }

    /// Save the profile, replacing any existing record whole
    ///
    /// Atomically writes the profile by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&self, profile: &Profile) -> Result<()> {
        let path = &self.path;
        let parent = path
            .parent()
            .ok_or_else(|| Error::Profile("profile path missing parent".into()))?;
        std::fs::create_dir_all(parent)?;

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(parent)?;

        // Each writer has its own temp file; the rename replaces the profile
        // whole, so concurrent saves are last-writer-wins
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(profile)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old profile
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::in_data_dir(temp_dir.path());

        let profile = Profile {
            skin_type: 0,
            sunscreen_usage: 3,
            time_outdoors: 4,
            environment: Some(4),
        };
        store.save(&profile).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, Some(profile));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(temp_dir.path().join("nonexistent.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupted_profile_returns_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::in_data_dir(temp_dir.path());

        std::fs::write(store.path(), "{ invalid json }").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::Profile(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_negative_index_is_malformed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::in_data_dir(temp_dir.path());

        std::fs::write(
            store.path(),
            r#"{"skinType":-1,"sunscreenUsage":0,"timeOutdoors":2}"#,
        )
        .unwrap();

        assert!(matches!(store.load(), Err(Error::Profile(_))));
    }

    #[test]
    fn test_reads_camel_case_record_without_environment() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::in_data_dir(temp_dir.path());

        std::fs::write(
            store.path(),
            r#"{"skinType":3,"sunscreenUsage":2,"timeOutdoors":1}"#,
        )
        .unwrap();

        let profile = store.load().unwrap().unwrap();
        assert_eq!(profile.skin_type, 3);
        assert_eq!(profile.environment, None);
        assert_eq!(profile.environment_index(), 1);
    }

    #[test]
    fn test_saved_file_uses_camel_case_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::in_data_dir(temp_dir.path());
        store.save(&Profile::default()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"skinType\""));
        assert!(raw.contains("\"sunscreenUsage\""));
        assert!(raw.contains("\"timeOutdoors\""));
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::in_data_dir(temp_dir.path());

        store.save(&Profile::default()).unwrap();
        store.save(&Profile::default()).unwrap();

        // Verify profile exists and no stray temp files remain
        assert!(store.path().exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != PROFILE_FILE)
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only {}, found extras: {:?}",
            PROFILE_FILE,
            extras
        );
    }
}
