//! Fish spawning
//!
//! Species are drawn by cumulative weight over the species eligible for the
//! selected zone. The random source is always passed in so callers control
//! seeding.

use glam::Vec2;
use rand::Rng;

use super::catalog::{FishSpecies, Zone, eligible_species};
use super::fish::FishInstance;
use crate::consts::*;
use crate::tuning::Tuning;

/// Produces fish for the active round and enforces the live-fish ceiling
#[derive(Debug, Clone)]
pub struct FishSpawner {
    /// Seconds until the next scheduled spawn
    cooldown: f32,
    next_id: u32,
}

impl Default for FishSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl FishSpawner {
    pub fn new() -> Self {
        Self {
            cooldown: 0.0,
            next_id: 1,
        }
    }

    /// Clear the spawn schedule for a new round
    pub fn reset(&mut self, tuning: &Tuning) {
        self.cooldown = tuning.spawn_interval_secs;
        self.next_id = 1;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn interval at the given line depth. Deeper water spawns faster.
    pub fn spawn_interval(depth: f32, tuning: &Tuning) -> f32 {
        let depth_factor = (depth / tuning.spawn_depth_cap).clamp(0.0, 1.0);
        tuning.spawn_interval_secs * (1.0 - depth_factor * tuning.spawn_depth_speedup)
    }

    /// Weighted draw over species eligible for `zone`
    pub fn pick_species<R: Rng + ?Sized>(zone: Zone, rng: &mut R) -> Option<&'static FishSpecies> {
        let total: u32 = eligible_species(zone).map(|s| s.spawn_weight).sum();
        if total == 0 {
            return None;
        }

        let mut roll = rng.random_range(0..total);
        for s in eligible_species(zone) {
            if roll < s.spawn_weight {
                return Some(s);
            }
            roll -= s.spawn_weight;
        }

        // Unreachable while weights sum to `total`
        eligible_species(zone).last()
    }

    /// Create a fish entering from a random side in the lower band
    fn spawn_from_edge<R: Rng + ?Sized>(
        &mut self,
        zone: Zone,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<FishInstance> {
        let species = Self::pick_species(zone, rng)?;

        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let x = if dir > 0.0 {
            -FISH_WIDTH / 2.0
        } else {
            PLAYFIELD_WIDTH + FISH_WIDTH / 2.0
        };

        // Deeper zones enter a little higher (up to 50 px)
        let zone_offset = zone.index() as f32 / (Zone::ALL.len() - 1) as f32 * 50.0;
        let y = rng.random_range(
            PLAYFIELD_HEIGHT * 0.75 - zone_offset..=PLAYFIELD_HEIGHT + 50.0 - zone_offset,
        );

        let speed = rng.random_range(tuning.min_fish_speed..=tuning.max_fish_speed);
        let vel = Vec2::new(dir * speed, -speed * 0.5);

        Some(FishInstance::new(self.next_entity_id(), species.id, Vec2::new(x, y), vel))
    }

    /// Create a fish already in view, below the hook
    fn spawn_in_view<R: Rng + ?Sized>(
        &mut self,
        zone: Zone,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<FishInstance> {
        let species = Self::pick_species(zone, rng)?;

        let x = rng.random_range(FISH_WIDTH..=PLAYFIELD_WIDTH - FISH_WIDTH);
        let y = rng.random_range(PLAYFIELD_HEIGHT * 0.6..=PLAYFIELD_HEIGHT * 0.9);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = rng.random_range(tuning.min_fish_speed..=tuning.max_fish_speed);
        let vel = Vec2::new(dir * speed, -speed * 0.5);

        Some(FishInstance::new(self.next_entity_id(), species.id, Vec2::new(x, y), vel))
    }

    /// Place the opening school when fishing begins. Returns spawned ids.
    pub fn spawn_school<R: Rng + ?Sized>(
        &mut self,
        fish: &mut Vec<FishInstance>,
        zone: Zone,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Vec<u32> {
        let mut spawned = Vec::new();
        for _ in 0..tuning.opening_school {
            if fish.len() >= tuning.max_live_fish {
                break;
            }
            if let Some(f) = self.spawn_in_view(zone, rng, tuning) {
                spawned.push(f.id);
                fish.push(f);
            }
        }
        spawned
    }

    /// Run the spawn schedule for one tick. Returns spawned ids.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        fish: &mut Vec<FishInstance>,
        zone: Zone,
        depth: f32,
        dt: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Vec<u32> {
        let mut spawned = Vec::new();

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return spawned;
        }
        self.cooldown += Self::spawn_interval(depth, tuning);

        let count = if depth > tuning.extra_spawn_depth && rng.random_bool(tuning.extra_spawn_chance) {
            2
        } else {
            1
        };

        for _ in 0..count {
            if fish.len() >= tuning.max_live_fish {
                log::debug!("Live fish ceiling reached ({})", tuning.max_live_fish);
                break;
            }
            if let Some(f) = self.spawn_from_edge(zone, rng, tuning) {
                spawned.push(f.id);
                fish.push(f);
            }
        }
        spawned
    }
}
