//! Round state and core simulation types
//!
//! One `RoundController` exists per session. It is advanced by
//! [`RoundController::tick`] and exposes read-only snapshots to whatever draws
//! the frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{SpeciesId, Zone};
use super::fish::FishInstance;
use super::reward::{CaughtFish, RoundEnd, RoundResult};
use super::spawner::FishSpawner;
use crate::consts::*;
use crate::tuning::{AbortPolicy, Tuning};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the player to start a round (shop is open)
    Idle,
    /// Line descending to max depth
    Casting,
    /// Timer running, fish can be caught
    Fishing,
    /// Line coming back up; reward is computed on arrival
    Resolving,
}

/// Gameplay parameters fixed for the duration of one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    /// Depth the line descends to (px)
    pub max_depth: f32,
    /// px/s while casting
    pub descent_speed: f32,
    /// px/s while retrieving
    pub reel_speed: f32,
    pub hook_capacity: u32,
    pub round_secs: f32,
}

impl Loadout {
    /// Seconds spent casting
    pub fn casting_secs(&self) -> f32 {
        self.max_depth / self.descent_speed
    }

    /// Seconds spent retrieving from max depth
    pub fn retrieve_secs(&self) -> f32 {
        self.max_depth / self.reel_speed
    }
}

/// Events emitted by the round for presentation (sound cues, popups)
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    CastStarted { zone: Zone, target_depth: f32 },
    FishingStarted { round_secs: f32 },
    FishSpawned { id: u32, species: SpeciesId },
    FishCaught { id: u32, species: SpeciesId, caught_count: usize },
    HookFull,
    TimerExpired,
    RetrieveStarted { end: RoundEnd },
    RoundFinished(RoundResult),
    RoundAborted { discarded: usize },
}

/// Read-only view of the round for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub zone: Zone,
    /// Seconds left on the round timer
    pub time_left: f32,
    /// Current line depth (px)
    pub depth: f32,
    pub max_depth: f32,
    pub hook: Vec2,
    pub fish: Vec<FishInstance>,
    pub caught_count: usize,
    pub hook_capacity: u32,
    /// Fixed steps since the round started
    pub ticks: u64,
}

/// Drives the Idle → Casting → Fishing → Resolving → Idle cycle
#[derive(Debug, Clone)]
pub struct RoundController<R = Pcg32> {
    pub(crate) phase: RoundPhase,
    pub(crate) zone: Zone,
    pub(crate) loadout: Loadout,
    pub(crate) depth: f32,
    pub(crate) time_left: f32,
    pub(crate) hook_x: f32,
    /// Live fish, in spawn order
    pub(crate) fish: Vec<FishInstance>,
    pub(crate) caught: Vec<CaughtFish>,
    pub(crate) end: Option<RoundEnd>,
    pub(crate) spawner: FishSpawner,
    pub(crate) rng: R,
    pub(crate) tuning: Tuning,
    pub(crate) events: Vec<RoundEvent>,
    /// Ticks advanced outside Idle
    pub(crate) time_ticks: u64,
}

impl RoundController<Pcg32> {
    /// Create a controller with a seeded spawn RNG
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundController<R> {
    /// Create a controller with an injected random source
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        let loadout = Loadout {
            max_depth: tuning.base_max_depth,
            descent_speed: tuning.descent_speed,
            reel_speed: tuning.reel_speed,
            hook_capacity: tuning.base_hook_capacity,
            round_secs: tuning.base_round_secs,
        };
        Self {
            phase: RoundPhase::Idle,
            zone: Zone::Surface,
            loadout,
            depth: 0.0,
            time_left: 0.0,
            hook_x: ROD_X,
            fish: Vec::new(),
            caught: Vec::new(),
            end: None,
            spawner: FishSpawner::new(),
            rng,
            tuning,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RoundPhase::Idle
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn caught_count(&self) -> usize {
        self.caught.len()
    }

    /// Begin a round. Ignored unless idle.
    pub fn start(&mut self, loadout: Loadout, zone: Zone) -> bool {
        if self.phase != RoundPhase::Idle {
            return false;
        }

        self.loadout = loadout;
        self.zone = zone;
        self.depth = 0.0;
        self.time_left = loadout.round_secs;
        self.hook_x = ROD_X;
        self.fish.clear();
        self.caught.clear();
        self.end = None;
        self.time_ticks = 0;
        self.spawner.reset(&self.tuning);
        self.phase = RoundPhase::Casting;

        log::info!(
            "Casting into {} (depth {}, capacity {}, timer {}s)",
            zone.as_str(),
            loadout.max_depth,
            loadout.hook_capacity,
            loadout.round_secs
        );
        self.events.push(RoundEvent::CastStarted {
            zone,
            target_depth: loadout.max_depth,
        });
        true
    }

    /// Abort the round between ticks.
    ///
    /// Casting/Fishing: catches are discarded, or scored under
    /// [`AbortPolicy::AwardPartial`]. Resolving: the retrieval is skipped and
    /// the round is scored normally. Returns the result if one is produced.
    pub fn abort(&mut self) -> Option<RoundResult> {
        match self.phase {
            RoundPhase::Idle => None,
            RoundPhase::Casting | RoundPhase::Fishing => match self.tuning.abort_policy {
                AbortPolicy::AwardPartial => {
                    self.end = Some(RoundEnd::Aborted);
                    log::info!("Round aborted, scoring {} catches", self.caught.len());
                    Some(self.finish())
                }
                AbortPolicy::DiscardCatches => {
                    let discarded = self.caught.len();
                    log::info!("Round aborted, discarding {} catches", discarded);
                    self.clear_round();
                    self.events.push(RoundEvent::RoundAborted { discarded });
                    None
                }
            },
            RoundPhase::Resolving => {
                log::info!("Retrieval skipped");
                Some(self.finish())
            }
        }
    }

    /// Drop live round data and return to Idle
    fn clear_round(&mut self) {
        self.fish.clear();
        self.caught.clear();
        self.end = None;
        self.depth = 0.0;
        self.time_left = 0.0;
        self.phase = RoundPhase::Idle;
    }

    /// Score the catches and return to Idle
    pub(crate) fn finish(&mut self) -> RoundResult {
        let end = self.end.unwrap_or(RoundEnd::TimerExpired);
        let caught = std::mem::take(&mut self.caught);
        let result = RoundResult::new(self.zone, caught, end);

        log::info!(
            "Round finished ({:?}): {} fish, {} coins",
            end,
            result.fish_count(),
            result.coins
        );
        self.clear_round();
        self.events.push(RoundEvent::RoundFinished(result.clone()));
        result
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hook_position(&self) -> Vec2 {
        Vec2::new(self.hook_x, HOOK_Y)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            zone: self.zone,
            time_left: self.time_left.max(0.0),
            depth: self.depth,
            max_depth: self.loadout.max_depth,
            hook: self.hook_position(),
            fish: self.fish.clone(),
            caught_count: self.caught.len(),
            hook_capacity: self.loadout.hook_capacity,
            ticks: self.time_ticks,
        }
    }
}
