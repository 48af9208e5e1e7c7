//! Versioned JSON save envelope

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::profile::PlayerProfile;
use crate::tuning::Tuning;

/// Current save schema version
pub const SAVE_VERSION: u32 = 1;

/// On-disk wrapper around the profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    /// Unix timestamp (secs) of the write
    pub saved_at: u64,
    pub profile: PlayerProfile,
}

/// Serialize a profile into a versioned envelope
pub fn encode(profile: &PlayerProfile, saved_at: u64) -> Result<String, PersistError> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        saved_at,
        profile: profile.clone(),
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|e| PersistError::WriteError(format!("serialization failed: {}", e)))
}

/// Parse and validate an envelope
pub fn decode(json: &str, tuning: &Tuning) -> Result<PlayerProfile, PersistError> {
    let envelope: SaveEnvelope = serde_json::from_str(json)?;

    if envelope.version == 0 {
        return Err(PersistError::CorruptSave("missing save version".to_string()));
    }
    // Newer saves are loaded as-is; unknown fields are ignored
    if envelope.version > SAVE_VERSION {
        log::warn!(
            "Save has version {} but current version is {}. Attempting to load anyway.",
            envelope.version,
            SAVE_VERSION
        );
    }

    envelope
        .profile
        .validate(tuning)
        .map_err(PersistError::CorruptSave)?;

    Ok(envelope.profile)
}
