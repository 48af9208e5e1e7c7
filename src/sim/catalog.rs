//! Fish catalog, rarity tiers and depth zones
//!
//! The catalog is a static table; nothing here changes at runtime.

use serde::{Deserialize, Serialize};

/// Rarity tier of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Default spawn weight for species of this tier
    pub fn spawn_weight(&self) -> u32 {
        match self {
            Rarity::Common => 60,
            Rarity::Uncommon => 25,
            Rarity::Rare => 12,
            Rarity::Epic => 5,
            Rarity::Legendary => 1,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Depth tier. Zones unlock in order and gate which species can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Surface,
    Shallows,
    MidWater,
    DeepSea,
    Abyss,
}

impl Zone {
    /// Global zone ordering, shallowest first
    pub const ALL: [Zone; 5] = [
        Zone::Surface,
        Zone::Shallows,
        Zone::MidWater,
        Zone::DeepSea,
        Zone::Abyss,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Zone> {
        Self::ALL.get(index).copied()
    }

    /// Reward multiplier in percent; deeper water pays more
    pub fn reward_percent(&self) -> u64 {
        match self {
            Zone::Surface => 100,
            Zone::Shallows => 125,
            Zone::MidWater => 150,
            Zone::DeepSea => 200,
            Zone::Abyss => 300,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Surface => "Surface",
            Zone::Shallows => "Shallows",
            Zone::MidWater => "Mid Water",
            Zone::DeepSea => "Deep Sea",
            Zone::Abyss => "Abyss",
        }
    }
}

/// Index into [`CATALOG`]
pub type SpeciesId = u16;

/// A fish species
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FishSpecies {
    pub id: SpeciesId,
    pub name: &'static str,
    pub rarity: Rarity,
    /// Coins paid per catch before the zone multiplier
    pub base_value: u64,
    pub spawn_weight: u32,
    /// Shallowest zone the species lives in
    pub min_zone: Zone,
}

impl FishSpecies {
    const fn new(
        id: SpeciesId,
        name: &'static str,
        rarity: Rarity,
        base_value: u64,
        spawn_weight: u32,
        min_zone: Zone,
    ) -> Self {
        Self {
            id,
            name,
            rarity,
            base_value,
            spawn_weight,
            min_zone,
        }
    }

    /// Whether the species can spawn while fishing in `zone`
    pub fn available_in(&self, zone: Zone) -> bool {
        self.min_zone <= zone
    }
}

/// Every species in the game, indexed by id
pub static CATALOG: [FishSpecies; 9] = [
    FishSpecies::new(0, "Clownfish", Rarity::Common, 10, 60, Zone::Surface),
    FishSpecies::new(1, "Blue Tang", Rarity::Common, 15, 60, Zone::Surface),
    FishSpecies::new(2, "Yellowtail", Rarity::Uncommon, 25, 25, Zone::Shallows),
    FishSpecies::new(3, "Grouper", Rarity::Uncommon, 35, 25, Zone::Shallows),
    FishSpecies::new(4, "Tuna", Rarity::Rare, 50, 12, Zone::MidWater),
    FishSpecies::new(5, "Swordfish", Rarity::Rare, 75, 12, Zone::MidWater),
    FishSpecies::new(6, "Angler", Rarity::Epic, 100, 5, Zone::DeepSea),
    FishSpecies::new(7, "Oarfish", Rarity::Epic, 150, 5, Zone::DeepSea),
    FishSpecies::new(8, "Kraken", Rarity::Legendary, 300, 1, Zone::Abyss),
];

/// Look up a species by id
pub fn species(id: SpeciesId) -> Option<&'static FishSpecies> {
    CATALOG.get(id as usize)
}

/// Species that may spawn in `zone`, in catalog order
pub fn eligible_species(zone: Zone) -> impl Iterator<Item = &'static FishSpecies> {
    CATALOG.iter().filter(move |s| s.available_in(zone))
}
