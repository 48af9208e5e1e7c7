//! Round simulation module
//!
//! All round logic lives here. This module must stay free of I/O:
//! - Time only advances through `tick`
//! - Randomness only through the injected RNG
//! - Stable iteration order (fish kept in spawn order)
//! - No rendering, audio or persistence dependencies

pub mod catalog;
pub mod fish;
pub mod reward;
pub mod spawner;
pub mod state;
pub mod tick;

pub use catalog::{CATALOG, FishSpecies, Rarity, SpeciesId, Zone, species};
pub use fish::FishInstance;
pub use reward::{CaughtFish, RarityCounts, Reward, RoundEnd, RoundResult, calculate};
pub use spawner::FishSpawner;
pub use state::{Loadout, RoundController, RoundEvent, RoundPhase, RoundSnapshot};
pub use tick::TickInput;
