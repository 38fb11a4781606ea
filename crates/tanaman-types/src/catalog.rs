//! Static game catalog: seed and pet definitions, weights, prices and
//! starting values.
//!
//! Everything here is immutable data. The simulation crates never hard-code
//! a number that appears in this module.

use rust_decimal::Decimal;

use crate::enums::{EggKind, MutationType, PetSpecies, PetTier, SeedType};

// ---------------------------------------------------------------------------
// Starting state
// ---------------------------------------------------------------------------

/// Money a new game starts with.
pub const INITIAL_MONEY: u64 = 10;

/// Number of plots in a new garden.
pub const INITIAL_PLOTS: u32 = 6;

/// Seed handed out (one of) at the start of a new game.
pub const STARTER_SEED: SeedType = SeedType::Mango;

/// Cost of the first garden upgrade.
pub const INITIAL_UPGRADE_COST: u64 = 10;

/// Amount the upgrade cost grows by after each upgrade.
pub const UPGRADE_COST_STEP: u64 = 20;

/// Number of pet equip slots.
pub const EQUIP_SLOTS: usize = 3;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Period, in ticks, of the golden/diamond/rainbow passive tracks.
pub const PASSIVE_PERIOD_TICKS: u32 = 60;

/// Pets age once every this many ticks.
pub const AGING_INTERVAL_TICKS: u64 = 60;

/// Weather changes and shops restock once every this many ticks.
pub const SHOP_CYCLE_TICKS: u64 = 120;

/// Offline gaps longer than this count as a long absence.
pub const LONG_ABSENCE_MS: i64 = 10_000;

/// Minimum shared species age accepted by the mutation machine.
pub const MUTATION_MACHINE_MIN_AGE: u32 = 20;

/// Duration of one mutation machine run, in seconds.
///
/// Tuning default, not taken from the browser game's data. Adjust freely.
pub const MUTATION_MACHINE_SECONDS: u32 = 300;

/// Failure chance of a mutation machine run.
///
/// Tuning default, not taken from the browser game's data. Adjust freely.
pub const MUTATION_MACHINE_FAILURE_CHANCE: f64 = 0.4;

/// Tier weights rolled by a successful mutation machine run.
///
/// Tuning default, not taken from the browser game's data. Adjust freely.
pub const MUTATION_MACHINE_TIER_WEIGHTS: [(PetTier, u32); 3] = [
    (PetTier::Gold, 70),
    (PetTier::Diamond, 25),
    (PetTier::Rainbow, 5),
];

// ---------------------------------------------------------------------------
// Multipliers
// ---------------------------------------------------------------------------

/// Growth duration factor per equipped chicken (0.7).
pub const CHICKEN_GROWTH_FACTOR: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Growth duration factor per equipped rainbow-tier pet (0.5).
pub const RAINBOW_GROWTH_FACTOR: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Phase duration factor while sunny (0.8).
pub const SUNNY_GROWTH_FACTOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Active cooldown factor per equipped rainbow-tier pet (0.75).
pub const RAINBOW_COOLDOWN_FACTOR: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

impl MutationType {
    /// Harvest price multiplier carried by this tag.
    pub const fn price_multiplier(self) -> u64 {
        match self {
            Self::Windy => 11,
            Self::Ascended => 54,
            Self::Gold => 8,
            Self::Gatal => 100,
            Self::Diamond => 250,
            Self::Glitch => 19,
            Self::GlitchInfected => 114,
        }
    }
}

/// Sale multiplier for boosted (bonus) fruit.
pub const BONUS_FRUIT_MULTIPLIER: u64 = 5;

/// Sale multiplier for racoon-infected fruit.
pub const INFECTED_FRUIT_MULTIPLIER: u64 = 80;

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Price of one watering can.
pub const WATERING_CAN_PRICE: u64 = 50;

/// Price of one size bonus.
pub const SIZE_BONUS_PRICE: u64 = 200;

/// Price of one super duper speed charge.
pub const SUPER_DUPER_SPEED_PRICE: u64 = 100;

/// Seed that must be unlocked before super duper speed is sold.
pub const SUPER_DUPER_SPEED_UNLOCK: SeedType = SeedType::Grape;

impl PetTier {
    /// Price of one shard of this tier.
    pub const fn shard_price(self) -> u64 {
        match self {
            Self::Gold => 800,
            Self::Diamond => 1500,
            Self::Rainbow => 2000,
        }
    }
}

impl EggKind {
    /// Egg price.
    pub const fn price(self) -> u64 {
        match self {
            Self::Standard => 1500,
            Self::Glitch => 5000,
        }
    }

    /// Hatch weights for this egg.
    pub const fn hatch_weights(self) -> &'static [(PetSpecies, u32)] {
        match self {
            Self::Standard => &STANDARD_EGG_WEIGHTS,
            Self::Glitch => &GLITCH_EGG_WEIGHTS,
        }
    }
}

/// Hatch weights of the standard egg.
pub const STANDARD_EGG_WEIGHTS: [(PetSpecies, u32); 5] = [
    (PetSpecies::Racoon, 10),
    (PetSpecies::Griffin, 158),
    (PetSpecies::Chicken, 302),
    (PetSpecies::Fox, 525),
    (PetSpecies::Ulat, 5),
];

/// Hatch weights of the glitch egg, in hundredths.
pub const GLITCH_EGG_WEIGHTS: [(PetSpecies, u32); 3] = [
    (PetSpecies::Glitch, 4300),
    (PetSpecies::GlitchFox, 5657),
    (PetSpecies::GolemGlitch, 43),
];

// ---------------------------------------------------------------------------
// Seeds
// ---------------------------------------------------------------------------

/// Static definition of one seed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedDefinition {
    /// The seed this entry describes.
    pub seed: SeedType,
    /// Display name.
    pub name: &'static str,
    /// Shop price.
    pub cost: u64,
    /// Seconds from planting until the plant matures.
    pub plant_grow_seconds: u32,
    /// Seconds from maturity (or harvest) until fruit is ready; 0 for
    /// single-harvest seeds.
    pub fruit_grow_seconds: u32,
    /// Lowest base sale price.
    pub sell_min: u32,
    /// Highest base sale price.
    pub sell_max: u32,
    /// Whether harvesting clears the plot.
    pub single_harvest: bool,
    /// Relative rarity used when the fox digs up a seed.
    pub fox_weight: u32,
}

const fn seed(
    seed: SeedType,
    name: &'static str,
    cost: u64,
    grow: (u32, u32),
    sell: (u32, u32),
    single_harvest: bool,
    fox_weight: u32,
) -> SeedDefinition {
    SeedDefinition {
        seed,
        name,
        cost,
        plant_grow_seconds: grow.0,
        fruit_grow_seconds: grow.1,
        sell_min: sell.0,
        sell_max: sell.1,
        single_harvest,
        fox_weight,
    }
}

const MANGO: SeedDefinition = seed(SeedType::Mango, "Mangga", 10, (20, 120), (20, 25), false, 90);
const CACAO: SeedDefinition = seed(SeedType::Cacao, "Kakao", 50, (60, 240), (40, 43), false, 70);
const GRAPE: SeedDefinition =
    seed(SeedType::Grape, "Anggur", 100, (120, 300), (50, 80), false, 80);
const BAMBOO: SeedDefinition = seed(SeedType::Bamboo, "Bambu", 200, (240, 0), (90, 100), true, 60);
const STRAWBERRY: SeedDefinition = seed(
    SeedType::Strawberry,
    "Stroberi",
    500,
    (180, 360),
    (100, 300),
    false,
    45,
);
const APPLE: SeedDefinition = seed(SeedType::Apple, "Apel", 1200, (200, 400), (800, 865), false, 20);
const BEANSTALK: SeedDefinition = seed(
    SeedType::Beanstalk,
    "Kacang Ajaib",
    1500,
    (600, 0),
    (800, 900),
    true,
    12,
);
const EMBERLILY: SeedDefinition = seed(
    SeedType::Emberlily,
    "Emberlily",
    2300,
    (300, 600),
    (1000, 2900),
    false,
    10,
);
const JASMINE: SeedDefinition = seed(
    SeedType::Jasmine,
    "Melati",
    2900,
    (400, 800),
    (1900, 2999),
    false,
    8,
);

impl SeedType {
    /// Catalog entry for this seed.
    pub const fn definition(self) -> &'static SeedDefinition {
        match self {
            Self::Mango => &MANGO,
            Self::Cacao => &CACAO,
            Self::Grape => &GRAPE,
            Self::Bamboo => &BAMBOO,
            Self::Strawberry => &STRAWBERRY,
            Self::Apple => &APPLE,
            Self::Beanstalk => &BEANSTALK,
            Self::Emberlily => &EMBERLILY,
            Self::Jasmine => &JASMINE,
        }
    }
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

/// Static definition of one pet species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetDefinition {
    /// The species this entry describes.
    pub species: PetSpecies,
    /// Display name.
    pub name: &'static str,
    /// Base active-ability cooldown in seconds; `None` for passive-only
    /// species.
    pub base_cooldown_seconds: Option<u32>,
}

const fn pet(species: PetSpecies, name: &'static str, cooldown: Option<u32>) -> PetDefinition {
    PetDefinition {
        species,
        name,
        base_cooldown_seconds: cooldown,
    }
}

const RACOON: PetDefinition = pet(PetSpecies::Racoon, "Racoon", Some(240));
const GRIFFIN: PetDefinition = pet(PetSpecies::Griffin, "Griffin", Some(120));
const CHICKEN: PetDefinition = pet(PetSpecies::Chicken, "Chicken", None);
const FOX: PetDefinition = pet(PetSpecies::Fox, "Fox", Some(240));
const ULAT: PetDefinition = pet(PetSpecies::Ulat, "Ulat", Some(120));
const GLITCH: PetDefinition = pet(PetSpecies::Glitch, "Glitch Pet", Some(120));
const GLITCH_FOX: PetDefinition = pet(PetSpecies::GlitchFox, "Glitch Fox", Some(420));
const GOLEM_GLITCH: PetDefinition = pet(PetSpecies::GolemGlitch, "Golem Glitch", Some(120));

impl PetSpecies {
    /// Catalog entry for this species.
    pub const fn definition(self) -> &'static PetDefinition {
        match self {
            Self::Racoon => &RACOON,
            Self::Griffin => &GRIFFIN,
            Self::Chicken => &CHICKEN,
            Self::Fox => &FOX,
            Self::Ulat => &ULAT,
            Self::Glitch => &GLITCH,
            Self::GlitchFox => &GLITCH_FOX,
            Self::GolemGlitch => &GOLEM_GLITCH,
        }
    }
}
