//! File-backed profile store

use std::fs;
use std::path::{Path, PathBuf};

use super::ProfileStore;
use crate::error::PersistError;

/// JSON save file with a rotated backup next to it
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<save>.bak`
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, "bak")
    }

    fn tmp_path(&self) -> PathBuf {
        sibling(&self.path, "tmp")
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn read_optional(path: &Path) -> Result<Option<String>, PersistError> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| PersistError::CorruptSave(format!("read failed for {}: {}", path.display(), e)))
}

impl ProfileStore for FileStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        read_optional(&self.path)
    }

    fn write(&mut self, data: &str) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        // The live save is never missing: back it up by copy, then replace
        // it with a single rename of the fully written temp file
        let tmp = self.tmp_path();
        fs::write(&tmp, data)?;
        if self.path.exists() {
            fs::copy(&self.path, self.backup_path())?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read_backup(&self) -> Result<Option<String>, PersistError> {
        read_optional(&self.backup_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{load_profile, save_profile, try_load};
    use crate::profile::PlayerProfile;
    use crate::tuning::Tuning;

    #[test]
    fn test_paths() {
        let store = FileStore::new("saves/reel_quest.json");
        assert_eq!(store.backup_path(), PathBuf::from("saves/reel_quest.json.bak"));
        assert_eq!(store.tmp_path(), PathBuf::from("saves/reel_quest.json.tmp"));
    }

    #[test]
    fn test_file_round_trip_and_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("save.json"));
        let tuning = Tuning::default();

        assert_eq!(try_load(&store, &tuning).unwrap(), None);

        let first = PlayerProfile {
            coins: 10,
            ..Default::default()
        };
        let second = PlayerProfile {
            coins: 20,
            ..Default::default()
        };
        save_profile(&mut store, &first).unwrap();
        save_profile(&mut store, &second).unwrap();

        assert_eq!(try_load(&store, &tuning).unwrap(), Some(second));
        assert!(store.backup_path().exists());
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_missing_save_recovers_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("save.json"));
        let tuning = Tuning::default();

        let rich = PlayerProfile {
            coins: 5000,
            ..Default::default()
        };
        save_profile(&mut store, &rich).unwrap();
        save_profile(&mut store, &rich).unwrap();
        assert!(store.path().exists());

        // Interrupted write: only the backup survived
        fs::remove_file(store.path()).unwrap();
        assert!(store.backup_path().exists());
        assert_eq!(load_profile(&store, &tuning).coins, 5000);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "\u{0}\u{1}binary junk").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(load_profile(&store, &Tuning::default()), PlayerProfile::default());
    }

    #[test]
    fn test_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the save directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let mut store = FileStore::new(blocker.join("save.json"));
        let err = save_profile(&mut store, &PlayerProfile::default()).unwrap_err();
        assert!(matches!(err, PersistError::WriteError(_)));
    }
}
