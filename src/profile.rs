//! Player progression
//!
//! Everything that survives between sessions: coins, upgrade tiers, unlocked
//! zones, lifetime stats and best rounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{Loadout, RoundResult, Zone};
use crate::tuning::Tuning;

/// Upgrade tracks sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTrack {
    LineLength,
    HookCapacity,
    RoundTimer,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 3] = [
        UpgradeTrack::LineLength,
        UpgradeTrack::HookCapacity,
        UpgradeTrack::RoundTimer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeTrack::LineLength => "Line Length",
            UpgradeTrack::HookCapacity => "Hook Capacity",
            UpgradeTrack::RoundTimer => "Round Timer",
        }
    }
}

impl fmt::Display for UpgradeTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current tier on each upgrade track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub line_length: u8,
    pub hook_capacity: u8,
    pub round_timer: u8,
}

impl UpgradeLevels {
    pub fn get(&self, track: UpgradeTrack) -> u8 {
        match track {
            UpgradeTrack::LineLength => self.line_length,
            UpgradeTrack::HookCapacity => self.hook_capacity,
            UpgradeTrack::RoundTimer => self.round_timer,
        }
    }

    pub(crate) fn get_mut(&mut self, track: UpgradeTrack) -> &mut u8 {
        match track {
            UpgradeTrack::LineLength => &mut self.line_length,
            UpgradeTrack::HookCapacity => &mut self.hook_capacity,
            UpgradeTrack::RoundTimer => &mut self.round_timer,
        }
    }
}

/// Running totals across every round played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub rounds_played: u32,
    pub total_fish_caught: u64,
    pub total_coins_earned: u64,
    /// Deepest line depth reached (px)
    pub deepest_depth: u32,
}

/// Persisted player state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub coins: u64,
    pub upgrades: UpgradeLevels,
    /// Always a non-empty prefix of [`Zone::ALL`]
    pub unlocked_zones: Vec<Zone>,
    pub selected_zone: Zone,
    #[serde(default)]
    pub stats: LifetimeStats,
}

impl Default for PlayerProfile {
    /// Fresh profile: no coins, base tiers, only the surface unlocked
    fn default() -> Self {
        Self {
            coins: 0,
            upgrades: UpgradeLevels::default(),
            unlocked_zones: vec![Zone::Surface],
            selected_zone: Zone::Surface,
            stats: LifetimeStats::default(),
        }
    }
}

impl PlayerProfile {
    pub fn tier(&self, track: UpgradeTrack) -> u8 {
        self.upgrades.get(track)
    }

    /// Gameplay parameters for the next round
    pub fn loadout(&self, tuning: &Tuning) -> Loadout {
        Loadout {
            max_depth: tuning.max_depth(self.upgrades.line_length),
            descent_speed: tuning.descent_speed,
            reel_speed: tuning.reel_speed,
            hook_capacity: tuning.hook_capacity(self.upgrades.hook_capacity),
            round_secs: tuning.round_secs(self.upgrades.round_timer),
        }
    }

    pub fn is_unlocked(&self, zone: Zone) -> bool {
        self.unlocked_zones.contains(&zone)
    }

    /// Deepest zone unlocked so far
    pub fn deepest_zone(&self) -> Zone {
        self.unlocked_zones.last().copied().unwrap_or(Zone::Surface)
    }

    /// Select a zone to fish in. Locked zones are refused.
    pub fn select_zone(&mut self, zone: Zone) -> bool {
        if !self.is_unlocked(zone) {
            return false;
        }
        self.selected_zone = zone;
        true
    }

    /// Unlock zones up to the current line-length tier. Never re-locks.
    pub fn sync_unlocked_zones(&mut self) -> Vec<Zone> {
        let target = (self.upgrades.line_length as usize + 1).min(Zone::ALL.len());
        let mut newly = Vec::new();
        while self.unlocked_zones.len() < target {
            let zone = Zone::ALL[self.unlocked_zones.len()];
            self.unlocked_zones.push(zone);
            newly.push(zone);
        }
        newly
    }

    /// Credit a round's coins and fold the round into the lifetime stats
    pub fn apply_round(&mut self, result: &RoundResult, depth: f32) {
        self.coins = self.coins.saturating_add(result.coins);

        self.stats.rounds_played += 1;
        self.stats.total_fish_caught += result.fish_count() as u64;
        self.stats.total_coins_earned = self.stats.total_coins_earned.saturating_add(result.coins);
        self.stats.deepest_depth = self.stats.deepest_depth.max(depth.max(0.0) as u32);
    }

    /// Check the persisted invariants. Returns a description of the first
    /// violation.
    pub fn validate(&self, tuning: &Tuning) -> Result<(), String> {
        for track in UpgradeTrack::ALL {
            let tier = self.tier(track);
            let max = tuning.max_tier(track);
            if tier > max {
                return Err(format!("{} tier {} exceeds max {}", track, tier, max));
            }
        }

        if self.unlocked_zones.is_empty() {
            return Err("no zones unlocked".to_string());
        }
        if self.unlocked_zones.len() > Zone::ALL.len()
            || self.unlocked_zones[..] != Zone::ALL[..self.unlocked_zones.len()]
        {
            return Err(format!(
                "unlocked zones {:?} are not a prefix of the zone order",
                self.unlocked_zones
            ));
        }
        if !self.is_unlocked(self.selected_zone) {
            return Err(format!("selected zone {:?} is locked", self.selected_zone));
        }
        Ok(())
    }
}
