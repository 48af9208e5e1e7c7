//! Round scoring
//!
//! Scoring is a pure function of the catches and the zone. All randomness
//! lives in spawning and catching.

use serde::{Deserialize, Serialize};

use super::catalog::{FishSpecies, Rarity, SpeciesId, Zone};

/// A fish on the hook at the end of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtFish {
    pub species: SpeciesId,
    pub rarity: Rarity,
    pub base_value: u64,
}

impl From<&FishSpecies> for CaughtFish {
    fn from(s: &FishSpecies) -> Self {
        Self {
            species: s.id,
            rarity: s.rarity,
            base_value: s.base_value,
        }
    }
}

/// Catch count per rarity tier, indexed by [`Rarity::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RarityCounts(pub [u32; 5]);

impl RarityCounts {
    pub fn get(&self, rarity: Rarity) -> u32 {
        self.0[rarity.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Rarest tier with at least one catch
    pub fn best(&self) -> Option<Rarity> {
        Rarity::ALL.iter().rev().copied().find(|r| self.get(*r) > 0)
    }
}

/// Output of the reward calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reward {
    pub coins: u64,
    pub rarity_counts: RarityCounts,
}

/// Why a round stopped fishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    HookFull,
    TimerExpired,
    Aborted,
}

/// Summary of one finished round, shown once on the results screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub zone: Zone,
    pub caught: Vec<CaughtFish>,
    pub end: RoundEnd,
    pub coins: u64,
    pub rarity_counts: RarityCounts,
}

impl RoundResult {
    /// Score the catches and build the result
    pub fn new(zone: Zone, caught: Vec<CaughtFish>, end: RoundEnd) -> Self {
        let reward = calculate(&caught, zone);
        Self {
            zone,
            caught,
            end,
            coins: reward.coins,
            rarity_counts: reward.rarity_counts,
        }
    }

    /// Recompute the reward from this result's own catches
    pub fn rescore(&self) -> Reward {
        calculate(&self.caught, self.zone)
    }

    pub fn fish_count(&self) -> usize {
        self.caught.len()
    }
}

/// Coins = sum of base values, scaled by the zone multiplier (truncating)
pub fn calculate(caught: &[CaughtFish], zone: Zone) -> Reward {
    let mut rarity_counts = RarityCounts::default();
    let mut base_total: u64 = 0;
    for fish in caught {
        rarity_counts.0[fish.rarity.index()] += 1;
        base_total = base_total.saturating_add(fish.base_value);
    }

    let coins = base_total.saturating_mul(zone.reward_percent()) / 100;
    Reward {
        coins,
        rarity_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::CATALOG;
    use proptest::prelude::*;

    fn catch(id: usize) -> CaughtFish {
        CaughtFish::from(&CATALOG[id])
    }

    #[test]
    fn test_empty_round_pays_nothing() {
        let reward = calculate(&[], Zone::Abyss);
        assert_eq!(reward.coins, 0);
        assert_eq!(reward.rarity_counts.total(), 0);
        assert_eq!(reward.rarity_counts.best(), None);
    }

    #[test]
    fn test_zone_multiplier() {
        // Clownfish 10 + Blue Tang 15 + Grouper 35 = 60
        let caught = [catch(0), catch(1), catch(3)];
        assert_eq!(calculate(&caught, Zone::Surface).coins, 60);
        assert_eq!(calculate(&caught, Zone::Shallows).coins, 75);
        assert_eq!(calculate(&caught, Zone::DeepSea).coins, 120);

        // 15 * 125 / 100 = 18.75 truncates
        assert_eq!(calculate(&[catch(1)], Zone::Shallows).coins, 18);
    }

    #[test]
    fn test_rarity_counts() {
        let caught = [catch(0), catch(0), catch(4), catch(8)];
        let reward = calculate(&caught, Zone::Abyss);
        assert_eq!(reward.rarity_counts.get(Rarity::Common), 2);
        assert_eq!(reward.rarity_counts.get(Rarity::Rare), 1);
        assert_eq!(reward.rarity_counts.get(Rarity::Legendary), 1);
        assert_eq!(reward.rarity_counts.get(Rarity::Epic), 0);
        assert_eq!(reward.rarity_counts.best(), Some(Rarity::Legendary));
    }

    #[test]
    fn test_result_matches_rescore() {
        let result = RoundResult::new(Zone::MidWater, vec![catch(5), catch(2)], RoundEnd::HookFull);
        let reward = result.rescore();
        assert_eq!(result.coins, reward.coins);
        assert_eq!(result.rarity_counts, reward.rarity_counts);
        assert_eq!(result.fish_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_reward_is_pure(ids in proptest::collection::vec(0usize..9, 0..12), zone in 0usize..5) {
            let zone = Zone::from_index(zone).unwrap();
            let caught: Vec<_> = ids.iter().map(|&i| catch(i)).collect();
            let a = calculate(&caught, zone);
            let b = calculate(&caught.clone(), zone);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.rarity_counts.total() as usize, caught.len());
            let base: u64 = caught.iter().map(|c| c.base_value).sum();
            prop_assert!(a.coins >= base);
        }
    }
}
