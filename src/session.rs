//! Game session
//!
//! Owns the round controller, the player profile and the store, and is
//! ticked explicitly by whatever runs the frame loop. Commands are applied
//! between ticks.

use glam::Vec2;

use crate::consts::*;
use crate::error::{PersistError, ShopError};
use crate::persistence::{self, FileStore, ProfileStore};
use crate::profile::{PlayerProfile, UpgradeTrack};
use crate::shop::{Purchase, UpgradeShop};
use crate::sim::{
    RoundController, RoundEvent, RoundPhase, RoundResult, RoundSnapshot, TickInput, Zone,
};
use crate::tuning::Tuning;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartRound,
    Purchase(UpgradeTrack),
    SelectZone(Zone),
    /// Wipe progression back to a fresh profile
    ResetProgress,
    /// Quit/abort the current round
    Abort,
}

/// What a command did
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    Purchased(Purchase),
    /// Shop refused; nothing changed
    Rejected(ShopError),
    /// Not valid in the current state; treated as a no-op
    Ignored,
}

/// Explicit game context: one round controller plus the player's progression
pub struct GameSession<S = FileStore> {
    round: RoundController,
    profile: PlayerProfile,
    store: S,
    accumulator: f32,
    autopilot: bool,
    events: Vec<RoundEvent>,
    last_result: Option<RoundResult>,
    /// Set when the last save failed; cleared by the next successful one
    dirty: bool,
}

impl<S: ProfileStore> GameSession<S> {
    /// Load the profile from `store` and set up an idle round
    pub fn open(store: S, tuning: Tuning, seed: u64) -> Self {
        let profile = persistence::load_profile(&store, &tuning);
        Self {
            round: RoundController::new(tuning, seed),
            profile,
            store,
            accumulator: 0.0,
            autopilot: false,
            events: Vec::new(),
            last_result: None,
            dirty: false,
        }
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn tuning(&self) -> &Tuning {
        self.round.tuning()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn shop(&self) -> UpgradeShop<'_> {
        UpgradeShop::new(self.round.tuning())
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }

    /// Result of the most recent round, for the results screen
    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Drain round events since the last call
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// True while a failed save is waiting to be retried
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    /// Apply a command between ticks
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let idle = self.round.is_idle();
        match command {
            Command::StartRound => {
                if !idle {
                    return CommandOutcome::Ignored;
                }
                let loadout = self.profile.loadout(self.round.tuning());
                self.round.start(loadout, self.profile.selected_zone);
                self.drain_round_events();
                CommandOutcome::Applied
            }

            Command::Purchase(track) => {
                if !idle {
                    log::debug!("Ignoring purchase of {} mid-round", track);
                    return CommandOutcome::Ignored;
                }
                let shop = UpgradeShop::new(self.round.tuning());
                match shop.purchase(track, &mut self.profile) {
                    Ok(receipt) => {
                        self.persist();
                        CommandOutcome::Purchased(receipt)
                    }
                    Err(e) => {
                        log::info!("Purchase refused: {}", e);
                        CommandOutcome::Rejected(e)
                    }
                }
            }

            Command::SelectZone(zone) => {
                if !idle || !self.profile.select_zone(zone) {
                    log::debug!("Ignoring selection of {}", zone.as_str());
                    return CommandOutcome::Ignored;
                }
                self.persist();
                CommandOutcome::Applied
            }

            Command::ResetProgress => {
                if !idle {
                    return CommandOutcome::Ignored;
                }
                self.profile = PlayerProfile::default();
                self.last_result = None;
                log::info!("Progress reset");
                self.persist();
                CommandOutcome::Applied
            }

            Command::Abort => {
                if idle {
                    return CommandOutcome::Ignored;
                }
                let depth = self.depth_reached();
                match self.round.abort() {
                    Some(result) => self.complete_round(result, depth),
                    // Nothing to show for a discarded round
                    None => self.last_result = None,
                }
                self.drain_round_events();
                CommandOutcome::Applied
            }
        }
    }

    /// Advance by one rendered frame using fixed substeps
    pub fn update(&mut self, frame_dt: f32, cursor: Option<Vec2>) {
        let dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let input = TickInput {
            cursor,
            autopilot: self.autopilot,
        };

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let depth = self.depth_reached();
            if let Some(result) = self.round.tick(&input, SIM_DT) {
                self.complete_round(result, depth);
            }
            self.drain_round_events();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Retry a pending save (e.g. on quit)
    pub fn flush(&mut self) -> Result<(), PersistError> {
        if !self.dirty {
            return Ok(());
        }
        persistence::save_profile(&mut self.store, &self.profile)?;
        self.dirty = false;
        Ok(())
    }

    /// Deepest point the line has reached this round
    fn depth_reached(&self) -> f32 {
        match self.round.phase() {
            RoundPhase::Casting => self.round.snapshot().depth,
            _ => self.round.loadout().max_depth,
        }
    }

    fn drain_round_events(&mut self) {
        self.events.extend(self.round.take_events());
    }

    fn complete_round(&mut self, result: RoundResult, depth: f32) {
        self.profile.apply_round(&result, depth);
        self.last_result = Some(result);
        self.persist();
    }

    /// Save after a state-affecting action. Failures are logged and retried
    /// on the next action.
    fn persist(&mut self) {
        match persistence::save_profile(&mut self.store, &self.profile) {
            Ok(()) => {
                if self.dirty {
                    log::info!("Deferred save succeeded");
                }
                self.dirty = false;
            }
            Err(e) => {
                log::warn!("{}; will retry on next save", e);
                self.dirty = true;
            }
        }
    }
}
