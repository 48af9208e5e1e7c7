//! Error types: shop rejections and persistence failures

use thiserror::Error;

use crate::profile::UpgradeTrack;

/// Shop errors. Both leave the profile untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopError {
    #[error("insufficient funds: upgrade costs {cost} coins, balance is {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },
    #[error("{0} is already at its maximum tier")]
    MaxTierReached(UpgradeTrack),
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("save data is corrupt: {0}")]
    CorruptSave(String),
    #[error("could not write save data: {0}")]
    WriteError(String),
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::WriteError(e.to_string())
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::CorruptSave(e.to_string())
    }
}
