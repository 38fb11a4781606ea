//! Enumeration types for the Tanaman Tycoon simulation.
//!
//! Wire spellings match the persisted snapshot format: seeds and plot
//! states are lowercase, pet species are camelCase, and mutation tags are
//! `snake_case`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Seeds
// ---------------------------------------------------------------------------

/// A plantable seed type.
///
/// Ordered from cheapest to most expensive, which is also the order in
/// which the shop lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SeedType {
    /// Mangga.
    Mango,
    /// Kakao.
    Cacao,
    /// Anggur.
    Grape,
    /// Bambu. Single harvest.
    Bamboo,
    /// Stroberi.
    Strawberry,
    /// Apel.
    Apple,
    /// Kacang Ajaib. Single harvest.
    Beanstalk,
    /// Emberlily.
    Emberlily,
    /// Melati.
    Jasmine,
}

impl SeedType {
    /// Every seed type in catalog order.
    pub const ALL: [Self; 9] = [
        Self::Mango,
        Self::Cacao,
        Self::Grape,
        Self::Bamboo,
        Self::Strawberry,
        Self::Apple,
        Self::Beanstalk,
        Self::Emberlily,
        Self::Jasmine,
    ];

    /// Catalog identifier as used in snapshots.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Mango => "mango",
            Self::Cacao => "cacao",
            Self::Grape => "grape",
            Self::Bamboo => "bamboo",
            Self::Strawberry => "strawberry",
            Self::Apple => "apple",
            Self::Beanstalk => "beanstalk",
            Self::Emberlily => "emberlily",
            Self::Jasmine => "jasmine",
        }
    }

    /// Look a seed up by its catalog identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|seed| seed.id() == id)
    }
}

impl core::fmt::Display for SeedType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.definition().name)
    }
}

// ---------------------------------------------------------------------------
// Plots
// ---------------------------------------------------------------------------

/// Lifecycle phase of a plot.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum PlotStatus {
    /// Nothing planted.
    #[default]
    Empty,
    /// Seed planted, waiting for the plant to mature.
    Growing,
    /// Plant mature, waiting for fruit.
    Fruiting,
    /// Fruit ready to harvest.
    Ready,
}

impl PlotStatus {
    /// Whether the plot is waiting on a phase deadline.
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Growing | Self::Fruiting)
    }
}

/// Cosmetic variant rolled when a seed is planted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum PlantVariant {
    /// No variant.
    #[default]
    Normal,
    /// Golden plant.
    Gold,
    /// Rainbow plant.
    Rainbow,
}

/// Harvest mutation tag carried by a plot.
///
/// A plot holds each tag at most once; tags multiply the harvest price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MutationType {
    /// Applied by the griffin.
    Windy,
    /// Rare griffin blessing.
    Ascended,
    /// Applied by golden pets.
    Gold,
    /// Applied by the ulat.
    Gatal,
    /// Applied by diamond pets.
    Diamond,
    /// Applied by the glitch pet.
    Glitch,
    /// Applied by the golem glitch.
    GlitchInfected,
}

impl MutationType {
    /// Every mutation tag.
    pub const ALL: [Self; 7] = [
        Self::Windy,
        Self::Ascended,
        Self::Gold,
        Self::Gatal,
        Self::Diamond,
        Self::Glitch,
        Self::GlitchInfected,
    ];

    /// Snapshot spelling of the tag.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Windy => "windy",
            Self::Ascended => "ascended",
            Self::Gold => "gold",
            Self::Gatal => "gatal",
            Self::Diamond => "diamond",
            Self::Glitch => "glitch",
            Self::GlitchInfected => "glitch_infected",
        }
    }
}

impl core::fmt::Display for MutationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

/// A collectable pet species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PetSpecies {
    /// Steals fruit from imaginary neighbours.
    Racoon,
    /// Ascends ready fruit.
    Griffin,
    /// Speeds up growth passively.
    Chicken,
    /// Digs up seeds.
    Fox,
    /// Makes plots itch and ages the other pets faster.
    Ulat,
    /// Glitches fruit.
    Glitch,
    /// Blows wind over fruit and finds tools.
    GlitchFox,
    /// Infects fruit.
    GolemGlitch,
}

impl PetSpecies {
    /// Every species in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Racoon,
        Self::Griffin,
        Self::Chicken,
        Self::Fox,
        Self::Ulat,
        Self::Glitch,
        Self::GlitchFox,
        Self::GolemGlitch,
    ];

    /// Catalog identifier as used in snapshots.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Racoon => "racoon",
            Self::Griffin => "griffin",
            Self::Chicken => "chicken",
            Self::Fox => "fox",
            Self::Ulat => "ulat",
            Self::Glitch => "glitch",
            Self::GlitchFox => "glitchFox",
            Self::GolemGlitch => "golemGlitch",
        }
    }

    /// Look a species up by its catalog identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|species| species.id() == id)
    }
}

impl core::fmt::Display for PetSpecies {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.definition().name)
    }
}

/// A pet tier granted by a shard or the mutation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum PetTier {
    /// Golden tier.
    Gold,
    /// Diamond tier.
    Diamond,
    /// Rainbow tier. Supersedes gold and diamond.
    Rainbow,
}

impl PetTier {
    /// Every tier.
    pub const ALL: [Self; 3] = [Self::Gold, Self::Diamond, Self::Rainbow];
}

impl core::fmt::Display for PetTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Gold => "Gold",
            Self::Diamond => "Diamond",
            Self::Rainbow => "Rainbow",
        })
    }
}

/// Kind of egg sold by the egg shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum EggKind {
    /// The regular egg.
    Standard,
    /// The glitch egg.
    Glitch,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A consumable garden tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ToolKind {
    /// Halves the remaining phase time of one plot.
    WateringCan,
    /// Boosts one ready plot for extra harvest fruit.
    SizeBonus,
    /// Makes one growing plot ready immediately.
    SuperDuperSpeed,
}

impl core::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::WateringCan => "Watering Can",
            Self::SizeBonus => "Size Bonus",
            Self::SuperDuperSpeed => "Super Duper Speed",
        })
    }
}

/// Grade of harvested fruit held in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum FruitGrade {
    /// Ordinary fruit.
    Plain,
    /// Bonus fruit from boosted or variant plants.
    Bonus,
    /// Fruit stolen by the racoon.
    Infected,
}

// ---------------------------------------------------------------------------
// Environment and feedback
// ---------------------------------------------------------------------------

/// Current garden weather.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// Speeds up newly entered phases.
    Sunny,
    /// Grants a free watering can when it starts.
    Rainy,
    /// No effect.
    #[default]
    Cloudy,
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum NoticeLevel {
    /// An action succeeded.
    Success,
    /// An action was rejected.
    Error,
    /// Informational, e.g. a pet ability fired.
    Info,
}
