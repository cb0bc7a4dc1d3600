//! Whole-profile blob persistence.
//!
//! One JSON file holds the entire profile; every mutation rewrites it
//! (last-write-wins, no merging of concurrent writers). A blob that fails to
//! parse is treated as "no profile" — the session starts logged out instead of
//! crashing on corrupt data.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::migrations::migrate_profile;
use crate::types::Profile;
use crate::util::atomic_write_str;

const PROFILE_FILE: &str = "profile.json";

/// File-backed store for the single profile blob.
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Store rooted at the default state directory (`~/.wombos`).
    pub fn open_default() -> Result<Self, String> {
        let home = dirs::home_dir().ok_or("Could not find home directory")?;
        Ok(Self::at(home.join(".wombos")))
    }

    /// Store rooted at an explicit directory. Used by tests and the
    /// `WOMBOS_DIR` override.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    /// Load the persisted profile, running schema migrations.
    ///
    /// Returns `None` when no blob exists or the blob fails to parse; the
    /// migrated result is persisted back immediately so the upgrade happens
    /// once per blob, not once per read.
    pub fn load(&self) -> Option<Profile> {
        let path = self.profile_path();
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read profile blob: {}. Treating as logged out.", e);
                return None;
            }
        };

        let mut profile: Profile = match serde_json::from_str(&content) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("Profile blob failed to parse: {}. Treating as logged out.", e);
                return None;
            }
        };

        if migrate_profile(&mut profile) {
            if let Err(e) = self.save(&profile) {
                log::warn!("Failed to persist migrated profile: {}", e);
            }
        }

        Some(profile)
    }

    /// Persist the whole profile atomically.
    pub fn save(&self, profile: &Profile) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(profile)?;
        atomic_write_str(&self.profile_path(), &content)?;
        Ok(())
    }

    /// Remove the persisted blob. Missing file is not an error.
    pub fn clear(&self) -> Result<(), AppError> {
        let path = self.profile_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Serialize the full profile to `dest` for user-initiated export.
    pub fn export_to(&self, profile: &Profile, dest: &Path) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(profile)?;
        fs::write(dest, content)?;
        Ok(())
    }
}
