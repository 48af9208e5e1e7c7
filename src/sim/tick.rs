//! Per-frame round tick
//!
//! Core loop that advances the round state machine by one timestep.

use glam::Vec2;
use rand::Rng;

use super::reward::{CaughtFish, RoundEnd, RoundResult};
use super::state::{RoundController, RoundEvent, RoundPhase};
use crate::consts::*;
use crate::{clamp_hook_x, distance};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in playfield space, `None` when outside the window
    pub cursor: Option<Vec2>,
    /// Idle/demo mode - the cursor chases the closest fish
    pub autopilot: bool,
}

impl<R: Rng> RoundController<R> {
    /// Advance the round by `dt` seconds. Returns the result on the tick the
    /// round finishes.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Option<RoundResult> {
        if self.phase == RoundPhase::Idle {
            return None;
        }
        self.time_ticks += 1;

        let cursor = if input.autopilot {
            self.autopilot_cursor().or(input.cursor)
        } else {
            input.cursor
        };

        match self.phase {
            RoundPhase::Idle => None,

            RoundPhase::Casting => {
                self.depth += self.loadout.descent_speed * dt;
                if self.depth >= self.loadout.max_depth {
                    self.depth = self.loadout.max_depth;
                    self.begin_fishing();
                }
                None
            }

            RoundPhase::Fishing => {
                self.time_left -= dt;

                if let Some(c) = cursor {
                    self.hook_x = clamp_hook_x(c.x, self.tuning.hook_range);
                }

                for fish in &mut self.fish {
                    fish.swim(dt);
                }
                self.fish.retain(|f| !f.out_of_bounds());

                let spawned = self.spawner.update(
                    &mut self.fish,
                    self.zone,
                    self.depth,
                    dt,
                    &mut self.rng,
                    &self.tuning,
                );
                self.push_spawned(&spawned);

                self.check_catches(cursor);

                // Hook full wins over the timer on the same tick
                if self.caught.len() >= self.loadout.hook_capacity as usize {
                    self.events.push(RoundEvent::HookFull);
                    self.begin_resolving(RoundEnd::HookFull);
                } else if self.time_left <= 0.0 {
                    self.events.push(RoundEvent::TimerExpired);
                    self.begin_resolving(RoundEnd::TimerExpired);
                }
                None
            }

            RoundPhase::Resolving => {
                for fish in &mut self.fish {
                    fish.swim(dt);
                }
                self.fish.retain(|f| !f.out_of_bounds());

                self.depth -= self.loadout.reel_speed * dt;
                if self.depth <= 0.0 {
                    self.depth = 0.0;
                    return Some(self.finish());
                }
                None
            }
        }
    }

    fn begin_fishing(&mut self) {
        self.phase = RoundPhase::Fishing;
        self.time_left = self.loadout.round_secs;

        let spawned =
            self.spawner
                .spawn_school(&mut self.fish, self.zone, &mut self.rng, &self.tuning);
        self.push_spawned(&spawned);

        log::info!("Line at depth {}, fishing for {}s", self.depth, self.loadout.round_secs);
        self.events.push(RoundEvent::FishingStarted {
            round_secs: self.loadout.round_secs,
        });
    }

    fn begin_resolving(&mut self, end: RoundEnd) {
        self.time_left = self.time_left.max(0.0);
        self.end = Some(end);
        self.phase = RoundPhase::Resolving;
        log::info!("Reeling in ({:?}) with {} fish", end, self.caught.len());
        self.events.push(RoundEvent::RetrieveStarted { end });
    }

    fn push_spawned(&mut self, ids: &[u32]) {
        for &id in ids {
            if let Some(f) = self.fish.iter().find(|f| f.id == id) {
                log::debug!("Spawned fish {} (species {})", id, f.species);
                self.events.push(RoundEvent::FishSpawned {
                    id,
                    species: f.species,
                });
            }
        }
    }

    /// Hover-to-catch: cursor on the fish and the fish near the hook, or the
    /// fish swimming right into the hook. Stops at hook capacity.
    fn check_catches(&mut self, cursor: Option<Vec2>) {
        let capacity = self.loadout.hook_capacity as usize;
        let hook = self.hook_position();
        let catch_radius = self.tuning.catch_radius;
        let auto_radius = self.tuning.auto_catch_radius;

        let mut i = 0;
        while i < self.fish.len() {
            if self.caught.len() >= capacity {
                break;
            }

            let fish = &self.fish[i];
            let dist = distance(fish.pos, hook);
            let hovered = cursor.is_some_and(|c| fish.contains(c)) && dist <= catch_radius;
            if !(hovered || dist <= auto_radius) {
                i += 1;
                continue;
            }

            // Removed from the live set, so it can never be caught twice
            let fish = self.fish.remove(i);
            if let Some(species) = fish.species() {
                self.caught.push(CaughtFish::from(species));
                log::debug!(
                    "Caught {} ({}), {}/{}",
                    species.name,
                    species.rarity.as_str(),
                    self.caught.len(),
                    capacity
                );
                self.events.push(RoundEvent::FishCaught {
                    id: fish.id,
                    species: fish.species,
                    caught_count: self.caught.len(),
                });
            }
        }
    }

    /// Demo mode: aim at the live fish closest to the hook's depth line
    fn autopilot_cursor(&self) -> Option<Vec2> {
        let range = self.tuning.hook_range;
        self.fish
            .iter()
            .filter(|f| (f.pos.x - ROD_X).abs() <= range)
            .min_by(|a, b| {
                let da = (a.pos.y - HOOK_Y).abs();
                let db = (b.pos.y - HOOK_Y).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|f| f.pos)
    }
}
