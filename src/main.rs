//! Reel Quest entry point
//!
//! Runs a headless session on autopilot: plays a few rounds, spends coins
//! between them and dives into the deepest unlocked zone.
//!
//! Environment:
//! - `REEL_QUEST_ROUNDS`: rounds to play (default 5)
//! - `REEL_QUEST_SEED`: RNG seed (default: current time)
//! - `REEL_QUEST_ABORT`: abort policy override (`discard` / `award-partial`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use reel_quest::consts::*;
    use reel_quest::persistence::{FileStore, now_secs};
    use reel_quest::sim::RoundEvent;
    use reel_quest::{AbortPolicy, Command, CommandOutcome, GameSession, Tuning, UpgradeTrack};

    env_logger::init();
    log::info!("Reel Quest (headless) starting...");

    let mut tuning = Tuning::load(Path::new("tuning.json"));
    if let Ok(value) = std::env::var("REEL_QUEST_ABORT") {
        match AbortPolicy::from_str(&value) {
            Some(policy) => tuning.abort_policy = policy,
            None => log::warn!("Unknown abort policy '{}'", value),
        }
    }
    log::info!("Abort policy: {}", tuning.abort_policy.as_str());

    let rounds: u32 = std::env::var("REEL_QUEST_ROUNDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);
    let seed: u64 = std::env::var("REEL_QUEST_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(now_secs);
    log::info!("Seed: {}", seed);

    let store = FileStore::new("saves/reel_quest.json");
    let mut session = GameSession::open(store, tuning, seed);
    session.set_autopilot(true);

    for round in 1..=rounds {
        // Spend everything we can, cheapest first
        loop {
            let shop = session.shop();
            let profile = session.profile();
            let cheapest = UpgradeTrack::ALL
                .into_iter()
                .filter(|&t| shop.can_afford(t, profile))
                .min_by_key(|&t| shop.quote(t, profile));
            let Some(track) = cheapest else { break };
            if !matches!(session.apply(Command::Purchase(track)), CommandOutcome::Purchased(_)) {
                break;
            }
        }

        let zone = session.profile().deepest_zone();
        session.apply(Command::SelectZone(zone));
        session.apply(Command::StartRound);
        log::info!("Round {} in {}", round, zone.as_str());

        loop {
            session.update(SIM_DT, None);
            let finished = session
                .take_events()
                .into_iter()
                .any(|e| matches!(e, RoundEvent::RoundFinished(_)));
            if finished {
                break;
            }
        }

        if let Some(result) = session.last_result() {
            println!(
                "round {:>2} | {:<9} | {} fish | {:>4} coins | {:?}",
                round,
                result.zone.as_str(),
                result.fish_count(),
                result.coins,
                result.end
            );
        }
    }

    let profile = session.profile();
    println!(
        "balance {} coins, {} rounds played, {} fish caught, deepest line {} px",
        profile.coins,
        profile.stats.rounds_played,
        profile.stats.total_fish_caught,
        profile.stats.deepest_depth
    );

    if let Err(e) = session.flush() {
        log::error!("Could not save progress: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; embed `GameSession` from the host instead
}
