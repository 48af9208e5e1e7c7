//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Backup rotation (old save copied to backup, tmp renamed over save)
//! - Missing/corrupt save recovery (backup, then a fresh profile)
//!
//! Writes are synchronous and small. A failed write is never fatal; the
//! caller keeps playing and retries on its next save.

pub mod envelope;
pub mod file;

pub use envelope::{SAVE_VERSION, SaveEnvelope};
pub use file::FileStore;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PersistError;
use crate::profile::PlayerProfile;
use crate::tuning::Tuning;

/// Storage backend for the encoded profile
pub trait ProfileStore {
    /// Read the current save, `Ok(None)` when none exists
    fn read(&self) -> Result<Option<String>, PersistError>;

    /// Replace the current save, keeping the previous one as a backup
    fn write(&mut self, data: &str) -> Result<(), PersistError>;

    /// Read the backup of the previous save, if the store keeps one
    fn read_backup(&self) -> Result<Option<String>, PersistError> {
        Ok(None)
    }
}

/// Seconds since the Unix epoch, 0 if the clock is before it
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Load the saved profile. `Ok(None)` when there is no save.
pub fn try_load(store: &dyn ProfileStore, tuning: &Tuning) -> Result<Option<PlayerProfile>, PersistError> {
    match store.read()? {
        Some(json) => envelope::decode(&json, tuning).map(Some),
        None => Ok(None),
    }
}

/// Load the saved profile, recovering from a missing or corrupt save.
///
/// A missing or corrupt save falls back to the backup, then to a fresh
/// profile.
pub fn load_profile(store: &dyn ProfileStore, tuning: &Tuning) -> PlayerProfile {
    match try_load(store, tuning) {
        Ok(Some(profile)) => {
            log::info!("Loaded profile ({} coins)", profile.coins);
            return profile;
        }
        Ok(None) => log::info!("No save found, checking backup"),
        Err(e) => log::warn!("{}", e),
    }

    let backup = store.read_backup().and_then(|backup| match backup {
        Some(json) => envelope::decode(&json, tuning).map(Some),
        None => Ok(None),
    });
    match backup {
        Ok(Some(profile)) => {
            log::warn!("Recovered profile from backup ({} coins)", profile.coins);
            profile
        }
        Ok(None) => {
            log::info!("No backup, starting fresh");
            PlayerProfile::default()
        }
        Err(e) => {
            log::warn!("Backup unusable ({}), starting fresh", e);
            PlayerProfile::default()
        }
    }
}

/// Encode and write the profile
pub fn save_profile(store: &mut dyn ProfileStore, profile: &PlayerProfile) -> Result<(), PersistError> {
    let json = envelope::encode(profile, now_secs())?;
    store.write(&json)?;
    log::info!("Profile saved ({} coins)", profile.coins);
    Ok(())
}

/// In-process store; also used to simulate unavailable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub data: Option<String>,
    pub backup: Option<String>,
    /// When set, every write fails with `WriteError`
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw save data
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }
}

impl ProfileStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, data: &str) -> Result<(), PersistError> {
        if self.fail_writes {
            return Err(PersistError::WriteError("storage unavailable".to_string()));
        }
        self.backup = self.data.replace(data.to_string());
        Ok(())
    }

    fn read_backup(&self) -> Result<Option<String>, PersistError> {
        Ok(self.backup.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LifetimeStats;
    use crate::sim::{CATALOG, CaughtFish, RoundEnd, RoundResult, Zone};
    use proptest::prelude::*;

    #[test]
    fn test_missing_save_gives_default() {
        let store = MemoryStore::new();
        assert_eq!(load_profile(&store, &Tuning::default()), PlayerProfile::default());
    }

    #[test]
    fn test_corrupt_save_gives_default() {
        let store = MemoryStore::with_data("{ this is not a save");
        let tuning = Tuning::default();
        assert!(matches!(try_load(&store, &tuning), Err(PersistError::CorruptSave(_))));

        let profile = load_profile(&store, &tuning);
        assert_eq!(profile.coins, 0);
        assert_eq!(profile.unlocked_zones, vec![Zone::Surface]);
        assert_eq!(profile, PlayerProfile::default());
    }

    #[test]
    fn test_corrupt_save_recovers_backup() {
        let tuning = Tuning::default();
        let mut store = MemoryStore::new();
        let good = PlayerProfile {
            coins: 77,
            ..Default::default()
        };
        save_profile(&mut store, &good).unwrap();
        save_profile(&mut store, &good).unwrap();
        store.data = Some("garbage".to_string());

        assert_eq!(load_profile(&store, &tuning), good);
    }

    #[test]
    fn test_missing_save_recovers_backup() {
        let good = PlayerProfile {
            coins: 5000,
            ..Default::default()
        };
        let mut store = MemoryStore::new();
        save_profile(&mut store, &good).unwrap();
        save_profile(&mut store, &good).unwrap();
        store.data = None;

        assert_eq!(load_profile(&store, &Tuning::default()), good);
    }

    #[test]
    fn test_write_error() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let err = save_profile(&mut store, &PlayerProfile::default()).unwrap_err();
        assert!(matches!(err, PersistError::WriteError(_)));
        assert!(store.data.is_none());
    }

    #[test]
    fn test_round_trip_with_stats() {
        let tuning = Tuning::default();
        let mut profile = PlayerProfile {
            coins: 1234,
            ..Default::default()
        };
        profile.upgrades.line_length = 3;
        profile.sync_unlocked_zones();
        profile.select_zone(Zone::DeepSea);
        let caught = vec![CaughtFish::from(&CATALOG[6]), CaughtFish::from(&CATALOG[2])];
        profile.apply_round(&RoundResult::new(Zone::DeepSea, caught, RoundEnd::HookFull), 600.0);

        let mut store = MemoryStore::new();
        save_profile(&mut store, &profile).unwrap();
        assert_eq!(try_load(&store, &tuning).unwrap(), Some(profile));
    }

    proptest! {
        #[test]
        fn prop_save_load_round_trip(
            coins in any::<u64>(),
            line in 0u8..=5,
            hook in 0u8..=5,
            timer in 0u8..=5,
            selected in 0usize..5,
            rounds in any::<u32>(),
            fish in any::<u64>(),
            earned in any::<u64>(),
            depth in any::<u32>(),
        ) {
            let tuning = Tuning::default();
            let mut profile = PlayerProfile { coins, ..Default::default() };
            profile.upgrades.line_length = line;
            profile.upgrades.hook_capacity = hook;
            profile.upgrades.round_timer = timer;
            profile.sync_unlocked_zones();
            let zone = Zone::ALL[selected.min(profile.unlocked_zones.len() - 1)];
            profile.select_zone(zone);
            profile.stats = LifetimeStats {
                rounds_played: rounds,
                total_fish_caught: fish,
                total_coins_earned: earned,
                deepest_depth: depth,
            };

            let mut store = MemoryStore::new();
            save_profile(&mut store, &profile).unwrap();
            prop_assert_eq!(try_load(&store, &tuning).unwrap(), Some(profile));
        }
    }
}
