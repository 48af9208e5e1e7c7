//! Upgrade shop
//!
//! Purchases are all-or-nothing: a rejected purchase leaves the profile
//! exactly as it was. Persisting after a purchase is the caller's job.
//!
//! Tier costs come from [`Tuning`]; the defaults are
//!
//! | track         | 1   | 2   | 3   | 4    | 5    |
//! |---------------|-----|-----|-----|------|------|
//! | line length   | 100 | 250 | 500 | 1000 | 2000 |
//! | hook capacity | 200 | 400 | 800 | 1600 | 3200 |
//! | round timer   | 150 | 300 | 600 | 1200 | 2400 |

use crate::error::ShopError;
use crate::profile::{PlayerProfile, UpgradeTrack};
use crate::sim::Zone;
use crate::tuning::Tuning;

/// Derived gameplay parameter after an upgrade
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeEffect {
    /// Line reaches this depth (px)
    MaxDepth(f32),
    /// Fish per round
    HookCapacity(u32),
    /// Round timer (seconds)
    RoundSecs(f32),
}

/// Receipt for a successful purchase
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub track: UpgradeTrack,
    pub new_tier: u8,
    pub cost: u64,
    pub effect: UpgradeEffect,
    /// Zones unlocked by this purchase
    pub unlocked: Vec<Zone>,
}

/// Coin-gated upgrade purchases
#[derive(Debug, Clone, Copy)]
pub struct UpgradeShop<'a> {
    tuning: &'a Tuning,
}

impl<'a> UpgradeShop<'a> {
    pub fn new(tuning: &'a Tuning) -> Self {
        Self { tuning }
    }

    /// Cost of the next tier on a track, `None` when maxed
    pub fn quote(&self, track: UpgradeTrack, profile: &PlayerProfile) -> Option<u64> {
        self.tuning.tier_cost(track, profile.tier(track))
    }

    /// Whether the next tier is affordable right now
    pub fn can_afford(&self, track: UpgradeTrack, profile: &PlayerProfile) -> bool {
        self.quote(track, profile)
            .is_some_and(|cost| profile.coins >= cost)
    }

    /// Buy the next tier on a track
    pub fn purchase(
        &self,
        track: UpgradeTrack,
        profile: &mut PlayerProfile,
    ) -> Result<Purchase, ShopError> {
        let tier = profile.tier(track);
        let cost = self
            .tuning
            .tier_cost(track, tier)
            .ok_or(ShopError::MaxTierReached(track))?;

        let balance = profile.coins;
        profile.coins = balance
            .checked_sub(cost)
            .ok_or(ShopError::InsufficientFunds { cost, balance })?;

        let new_tier = tier + 1;
        *profile.upgrades.get_mut(track) = new_tier;

        let unlocked = match track {
            UpgradeTrack::LineLength => profile.sync_unlocked_zones(),
            _ => Vec::new(),
        };

        let effect = self.effect(track, new_tier);
        log::info!(
            "Purchased {} tier {} for {} coins ({} left)",
            track,
            new_tier,
            cost,
            profile.coins
        );
        for zone in &unlocked {
            log::info!("Unlocked zone {}", zone.as_str());
        }

        Ok(Purchase {
            track,
            new_tier,
            cost,
            effect,
            unlocked,
        })
    }

    /// Gameplay parameter a track has at the given tier
    pub fn effect(&self, track: UpgradeTrack, tier: u8) -> UpgradeEffect {
        match track {
            UpgradeTrack::LineLength => UpgradeEffect::MaxDepth(self.tuning.max_depth(tier)),
            UpgradeTrack::HookCapacity => {
                UpgradeEffect::HookCapacity(self.tuning.hook_capacity(tier))
            }
            UpgradeTrack::RoundTimer => UpgradeEffect::RoundSecs(self.tuning.round_secs(tier)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_coins_insufficient_funds() {
        let tuning = Tuning {
            line_length_costs: vec![50, 100],
            ..Default::default()
        };
        let shop = UpgradeShop::new(&tuning);
        let mut profile = PlayerProfile::default();

        let err = shop.purchase(UpgradeTrack::LineLength, &mut profile).unwrap_err();
        assert_eq!(err, ShopError::InsufficientFunds { cost: 50, balance: 0 });
        assert_eq!(profile, PlayerProfile::default());
    }

    #[test]
    fn test_purchase_success() {
        let tuning = Tuning::default();
        let shop = UpgradeShop::new(&tuning);
        let mut profile = PlayerProfile {
            coins: 260,
            ..Default::default()
        };

        let receipt = shop.purchase(UpgradeTrack::HookCapacity, &mut profile).unwrap();
        assert_eq!(receipt.cost, 200);
        assert_eq!(receipt.new_tier, 1);
        assert_eq!(receipt.effect, UpgradeEffect::HookCapacity(5));
        assert!(receipt.unlocked.is_empty());
        assert_eq!(profile.coins, 60);
        assert_eq!(profile.upgrades.hook_capacity, 1);
        assert_eq!(profile.loadout(&tuning).hook_capacity, 5);
    }

    #[test]
    fn test_line_length_unlocks_next_zone() {
        let tuning = Tuning::default();
        let shop = UpgradeShop::new(&tuning);
        let mut profile = PlayerProfile {
            coins: 350,
            ..Default::default()
        };

        let first = shop.purchase(UpgradeTrack::LineLength, &mut profile).unwrap();
        assert_eq!(first.unlocked, vec![Zone::Shallows]);
        assert_eq!(first.effect, UpgradeEffect::MaxDepth(400.0));

        let second = shop.purchase(UpgradeTrack::LineLength, &mut profile).unwrap();
        assert_eq!(second.unlocked, vec![Zone::MidWater]);
        assert_eq!(profile.coins, 0);
        assert_eq!(profile.unlocked_zones.len(), 3);
    }

    #[test]
    fn test_max_tier_reached() {
        let tuning = Tuning::default();
        let shop = UpgradeShop::new(&tuning);
        let mut profile = PlayerProfile {
            coins: 1_000_000,
            ..Default::default()
        };
        profile.upgrades.round_timer = 5;

        assert_eq!(shop.quote(UpgradeTrack::RoundTimer, &profile), None);
        assert!(!shop.can_afford(UpgradeTrack::RoundTimer, &profile));
        let err = shop.purchase(UpgradeTrack::RoundTimer, &mut profile).unwrap_err();
        assert_eq!(err, ShopError::MaxTierReached(UpgradeTrack::RoundTimer));
        assert_eq!(profile.coins, 1_000_000);
        assert_eq!(profile.upgrades.round_timer, 5);
    }

    #[test]
    fn test_quote_follows_tier() {
        let tuning = Tuning::default();
        let shop = UpgradeShop::new(&tuning);
        let mut profile = PlayerProfile::default();
        assert_eq!(shop.quote(UpgradeTrack::RoundTimer, &profile), Some(150));
        profile.upgrades.round_timer = 3;
        assert_eq!(shop.quote(UpgradeTrack::RoundTimer, &profile), Some(1200));
    }

    fn track_strategy() -> impl Strategy<Value = UpgradeTrack> {
        prop_oneof![
            Just(UpgradeTrack::LineLength),
            Just(UpgradeTrack::HookCapacity),
            Just(UpgradeTrack::RoundTimer),
        ]
    }

    proptest! {
        #[test]
        fn prop_economy_invariants(
            ops in proptest::collection::vec((track_strategy(), 0u64..1500), 0..60)
        ) {
            let tuning = Tuning::default();
            let shop = UpgradeShop::new(&tuning);
            let mut profile = PlayerProfile::default();

            for (track, earned) in ops {
                profile.coins += earned;
                let before = profile.clone();
                match shop.purchase(track, &mut profile) {
                    Ok(receipt) => {
                        prop_assert_eq!(profile.coins + receipt.cost, before.coins);
                        prop_assert_eq!(profile.tier(track), before.tier(track) + 1);
                    }
                    Err(_) => prop_assert_eq!(&profile, &before),
                }
                for t in UpgradeTrack::ALL {
                    prop_assert!(profile.tier(t) <= tuning.max_tier(t));
                }
                prop_assert!(profile.validate(&tuning).is_ok());
                prop_assert!(profile.unlocked_zones.len() <= profile.upgrades.line_length as usize + 1);
            }
        }
    }
}
