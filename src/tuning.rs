//! Game balance and tuning
//!
//! Every number that shapes a round or the economy lives here so a balance
//! pass can be done from a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::profile::UpgradeTrack;

/// What happens to catches when a round is aborted before retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AbortPolicy {
    /// Drop the in-progress catches; nothing is credited
    #[default]
    DiscardCatches,
    /// Score whatever is on the hook and credit it
    AwardPartial,
}

impl AbortPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortPolicy::DiscardCatches => "discard",
            AbortPolicy::AwardPartial => "award-partial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "discard" | "discard_catches" => Some(AbortPolicy::DiscardCatches),
            "award" | "award-partial" | "award_partial" => Some(AbortPolicy::AwardPartial),
            _ => None,
        }
    }
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round timer ===
    /// Round timer at tier 0 (seconds)
    pub base_round_secs: f32,
    /// Seconds added per round-timer tier
    pub round_secs_per_tier: f32,

    // === Hook ===
    /// Hook capacity at tier 0
    pub base_hook_capacity: u32,
    /// Capacity added per hook-capacity tier
    pub hook_capacity_per_tier: u32,
    /// Horizontal reach of the hook either side of the rod (px)
    pub hook_range: f32,
    /// Hover catches require the fish to be this close to the hook (px)
    pub catch_radius: f32,
    /// Fish this close to the hook are caught without hovering (px)
    pub auto_catch_radius: f32,

    // === Line ===
    /// Line depth at tier 0 (px)
    pub base_max_depth: f32,
    /// Depth added per line-length tier (px)
    pub depth_per_tier: f32,
    /// Descent speed while casting (px/s)
    pub descent_speed: f32,
    /// Retrieval speed while resolving (px/s)
    pub reel_speed: f32,

    // === Economy ===
    /// Cost of each line-length tier; length is the max tier
    pub line_length_costs: Vec<u64>,
    /// Cost of each hook-capacity tier
    pub hook_capacity_costs: Vec<u64>,
    /// Cost of each round-timer tier
    pub round_timer_costs: Vec<u64>,

    // === Spawning ===
    /// Seconds between spawns at the surface
    pub spawn_interval_secs: f32,
    /// Depth at which the spawn interval bottoms out (px)
    pub spawn_depth_cap: f32,
    /// Fraction the interval shrinks by at the depth cap
    pub spawn_depth_speedup: f32,
    /// Extra fish may spawn below this depth (px)
    pub extra_spawn_depth: f32,
    /// Chance of the extra fish
    pub extra_spawn_chance: f64,
    /// Hard ceiling on simultaneously live fish
    pub max_live_fish: usize,
    /// Fish placed in view when fishing begins
    pub opening_school: usize,
    /// Horizontal swim speed range (px/s)
    pub min_fish_speed: f32,
    pub max_fish_speed: f32,

    // === Rules ===
    pub abort_policy: AbortPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_round_secs: 10.0,
            round_secs_per_tier: 5.0,

            base_hook_capacity: 4,
            hook_capacity_per_tier: 1,
            hook_range: 350.0,
            catch_radius: 80.0,
            auto_catch_radius: 30.0,

            base_max_depth: 300.0,
            depth_per_tier: 100.0,
            descent_speed: 150.0,
            reel_speed: 300.0,

            line_length_costs: vec![100, 250, 500, 1000, 2000],
            hook_capacity_costs: vec![200, 400, 800, 1600, 3200],
            round_timer_costs: vec![150, 300, 600, 1200, 2400],

            spawn_interval_secs: 1.0,
            spawn_depth_cap: 500.0,
            spawn_depth_speedup: 0.5,
            extra_spawn_depth: 200.0,
            extra_spawn_chance: 0.3,
            max_live_fish: 24,
            opening_school: 3,
            min_fish_speed: 60.0,
            max_fish_speed: 180.0,

            abort_policy: AbortPolicy::DiscardCatches,
        }
    }
}

impl Tuning {
    /// Cost table for an upgrade track
    pub fn costs(&self, track: UpgradeTrack) -> &[u64] {
        match track {
            UpgradeTrack::LineLength => &self.line_length_costs,
            UpgradeTrack::HookCapacity => &self.hook_capacity_costs,
            UpgradeTrack::RoundTimer => &self.round_timer_costs,
        }
    }

    /// Highest tier reachable on a track
    pub fn max_tier(&self, track: UpgradeTrack) -> u8 {
        self.costs(track).len().min(u8::MAX as usize) as u8
    }

    /// Cost to go from `tier` to `tier + 1`, `None` at max tier
    pub fn tier_cost(&self, track: UpgradeTrack, tier: u8) -> Option<u64> {
        self.costs(track).get(tier as usize).copied()
    }

    /// Max line depth for a line-length tier (px)
    pub fn max_depth(&self, tier: u8) -> f32 {
        self.base_max_depth + self.depth_per_tier * tier as f32
    }

    /// Hook capacity for a hook-capacity tier
    pub fn hook_capacity(&self, tier: u8) -> u32 {
        self.base_hook_capacity + self.hook_capacity_per_tier * tier as u32
    }

    /// Round timer for a round-timer tier (seconds)
    pub fn round_secs(&self, tier: u8) -> f32 {
        self.base_round_secs + self.round_secs_per_tier * tier as f32
    }

    /// Check that values are usable by the simulation. Returns a description
    /// of the first bad value.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("descent_speed", self.descent_speed),
            ("reel_speed", self.reel_speed),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("spawn_depth_cap", self.spawn_depth_cap),
            ("base_round_secs", self.base_round_secs),
            ("base_max_depth", self.base_max_depth),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }

        let non_negative = [
            ("round_secs_per_tier", self.round_secs_per_tier),
            ("depth_per_tier", self.depth_per_tier),
            ("hook_range", self.hook_range),
            ("catch_radius", self.catch_radius),
            ("auto_catch_radius", self.auto_catch_radius),
            ("spawn_depth_speedup", self.spawn_depth_speedup),
            ("extra_spawn_depth", self.extra_spawn_depth),
            ("min_fish_speed", self.min_fish_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }

        if self.spawn_depth_speedup > 1.0 {
            return Err(format!(
                "spawn_depth_speedup must be at most 1, got {}",
                self.spawn_depth_speedup
            ));
        }
        if !(0.0..=1.0).contains(&self.extra_spawn_chance) {
            return Err(format!(
                "extra_spawn_chance must be within [0, 1], got {}",
                self.extra_spawn_chance
            ));
        }
        if !(self.max_fish_speed.is_finite() && self.min_fish_speed <= self.max_fish_speed) {
            return Err(format!(
                "fish speed range {}..={} is empty",
                self.min_fish_speed, self.max_fish_speed
            ));
        }
        Ok(())
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => match tuning.validate() {
                    Ok(()) => {
                        log::info!("Loaded tuning from {}", path.display());
                        tuning
                    }
                    Err(e) => {
                        log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }
}
