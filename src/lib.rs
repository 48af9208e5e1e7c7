//! Reel Quest - A hover-to-catch arcade fishing game
//!
//! Core modules:
//! - `sim`: Round simulation (state machine, spawning, catching, rewards)
//! - `profile`: Player progression (coins, upgrade tiers, zones, stats)
//! - `shop`: Coin-gated upgrade purchases
//! - `persistence`: Save/load with versioned envelope and backup rotation
//! - `session`: Explicit game context owning the round and the profile
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod persistence;
pub mod profile;
pub mod session;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use error::{PersistError, ShopError};
pub use profile::{PlayerProfile, UpgradeTrack};
pub use session::{Command, CommandOutcome, GameSession};
pub use tuning::{AbortPolicy, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (screen pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Rod tip x position; the hook hangs below it
    pub const ROD_X: f32 = PLAYFIELD_WIDTH / 2.0;
    /// Hook stays at a fixed screen height while the water scrolls past
    pub const HOOK_Y: f32 = PLAYFIELD_HEIGHT / 2.0;

    /// Fish hitbox defaults
    pub const FISH_WIDTH: f32 = 40.0;
    pub const FISH_HEIGHT: f32 = 20.0;

    /// Fish further than this outside the playfield are culled
    pub const CULL_MARGIN: f32 = 100.0;
}

/// Distance between two points in playfield space
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Clamp a cursor x coordinate to the hook's reach around the rod
#[inline]
pub fn clamp_hook_x(cursor_x: f32, range: f32) -> f32 {
    cursor_x.clamp(consts::ROD_X - range, consts::ROD_X + range)
}
