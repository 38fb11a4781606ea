//! The player's ledger: money, countable holdings, and unlocked seeds.
//!
//! All counters are unsigned and all arithmetic is checked. Debits that
//! would go below zero are rejected, never clamped.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use tanaman_types::catalog::{INITIAL_MONEY, STARTER_SEED};
use tanaman_types::{FruitGrade, PetTier, SeedType, ToolKind};

use crate::error::LedgerError;

// ---------------------------------------------------------------------------
// Holding
// ---------------------------------------------------------------------------

/// Address of one countable holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Holding {
    /// Unplanted seeds.
    Seed(SeedType),
    /// Harvested fruit of a grade.
    Fruit(FruitGrade, SeedType),
    /// A consumable tool.
    Tool(ToolKind),
    /// A pet shard.
    Shard(PetTier),
}

impl core::fmt::Display for Holding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Seed(seed) => write!(f, "{seed} seed"),
            Self::Fruit(FruitGrade::Plain, seed) => write!(f, "{seed} fruit"),
            Self::Fruit(FruitGrade::Bonus, seed) => write!(f, "bonus {seed} fruit"),
            Self::Fruit(FruitGrade::Infected, seed) => write!(f, "infected {seed} fruit"),
            Self::Tool(tool) => write!(f, "{tool}"),
            Self::Shard(tier) => write!(f, "{tier} shard"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Money and every countable holding of the player.
///
/// Per-seed maps always carry an entry for every catalog seed, so snapshots
/// list zero counts explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    money: u64,
    seeds: BTreeMap<SeedType, u32>,
    fruits: BTreeMap<SeedType, u32>,
    bonus_fruits: BTreeMap<SeedType, u32>,
    infected_fruits: BTreeMap<SeedType, u32>,
    tools: BTreeMap<ToolKind, u32>,
    shards: BTreeMap<PetTier, u32>,
    unlocked: BTreeSet<SeedType>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// A map with a zero entry for every catalog seed.
pub fn zeroed_seed_map() -> BTreeMap<SeedType, u32> {
    SeedType::ALL.into_iter().map(|seed| (seed, 0)).collect()
}

impl Ledger {
    /// The ledger of a brand new game.
    pub fn new() -> Self {
        let mut seeds = zeroed_seed_map();
        seeds.insert(STARTER_SEED, 1);
        Self {
            money: INITIAL_MONEY,
            seeds,
            fruits: zeroed_seed_map(),
            bonus_fruits: zeroed_seed_map(),
            infected_fruits: zeroed_seed_map(),
            tools: BTreeMap::new(),
            shards: BTreeMap::new(),
            unlocked: BTreeSet::from([STARTER_SEED]),
        }
    }

    /// A ledger with no money and nothing held, except the starter seed
    /// being unlocked.
    pub fn empty() -> Self {
        Self {
            money: 0,
            seeds: zeroed_seed_map(),
            fruits: zeroed_seed_map(),
            bonus_fruits: zeroed_seed_map(),
            infected_fruits: zeroed_seed_map(),
            tools: BTreeMap::new(),
            shards: BTreeMap::new(),
            unlocked: BTreeSet::from([STARTER_SEED]),
        }
    }

    // --- Money ---

    /// Money on hand.
    pub const fn money(&self) -> u64 {
        self.money
    }

    /// Whether `amount` can be paid.
    pub const fn can_afford(&self, amount: u64) -> bool {
        self.money >= amount
    }

    /// Add money.
    pub fn credit_money(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.money = self
            .money
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Pay money; rejected if the player cannot afford it.
    pub fn debit_money(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.money = self
            .money
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                needed: amount,
                available: self.money,
            })?;
        Ok(())
    }

    /// Overwrite the money balance. Used when restoring a snapshot.
    pub const fn set_money(&mut self, amount: u64) {
        self.money = amount;
    }

    // --- Holdings ---

    /// Quantity held.
    pub fn count(&self, holding: Holding) -> u32 {
        match holding {
            Holding::Seed(seed) => self.seeds.get(&seed),
            Holding::Fruit(grade, seed) => self.fruit_map(grade).get(&seed),
            Holding::Tool(tool) => self.tools.get(&tool),
            Holding::Shard(tier) => self.shards.get(&tier),
        }
        .copied()
        .unwrap_or(0)
    }

    /// Whether at least one is held.
    pub fn has(&self, holding: Holding) -> bool {
        self.count(holding) > 0
    }

    /// Add to a holding.
    pub fn credit(&mut self, holding: Holding, amount: u32) -> Result<(), LedgerError> {
        let next = self
            .count(holding)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.set_count(holding, next);
        Ok(())
    }

    /// Add to a holding, stopping at the counter's ceiling.
    ///
    /// Used for rewards the player did not ask for (rain, pet finds), which
    /// must never fail a tick. Returns how many were actually added.
    pub fn credit_saturating(&mut self, holding: Holding, amount: u32) -> u32 {
        let current = self.count(holding);
        let next = current.saturating_add(amount);
        if next == current {
            debug!(%holding, "Holding full, reward dropped");
            return 0;
        }
        self.set_count(holding, next);
        next.saturating_sub(current)
    }

    /// Remove from a holding; rejected if not enough is held.
    pub fn debit(&mut self, holding: Holding, amount: u32) -> Result<(), LedgerError> {
        let available = self.count(holding);
        let next = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientHolding {
                holding,
                requested: amount,
                available,
            })?;
        self.set_count(holding, next);
        Ok(())
    }

    /// Overwrite a holding. Used when restoring a snapshot.
    pub fn set_count(&mut self, holding: Holding, amount: u32) {
        match holding {
            Holding::Seed(seed) => {
                self.seeds.insert(seed, amount);
            }
            Holding::Fruit(grade, seed) => {
                self.fruit_map_mut(grade).insert(seed, amount);
            }
            Holding::Tool(tool) => {
                self.tools.insert(tool, amount);
            }
            Holding::Shard(tier) => {
                self.shards.insert(tier, amount);
            }
        }
    }

    /// Seed counts, one entry per catalog seed.
    pub const fn seeds(&self) -> &BTreeMap<SeedType, u32> {
        &self.seeds
    }

    /// Fruit counts of a grade, one entry per catalog seed.
    pub const fn fruits(&self, grade: FruitGrade) -> &BTreeMap<SeedType, u32> {
        self.fruit_map(grade)
    }

    // --- Unlocks ---

    /// Seeds the player has bought at least once.
    pub const fn unlocked(&self) -> &BTreeSet<SeedType> {
        &self.unlocked
    }

    /// Whether a seed has been unlocked.
    pub fn is_unlocked(&self, seed: SeedType) -> bool {
        self.unlocked.contains(&seed)
    }

    /// Mark a seed as unlocked. Returns `true` if it was newly unlocked.
    pub fn unlock(&mut self, seed: SeedType) -> bool {
        self.unlocked.insert(seed)
    }

    // --- Internals ---

    const fn fruit_map(&self, grade: FruitGrade) -> &BTreeMap<SeedType, u32> {
        match grade {
            FruitGrade::Plain => &self.fruits,
            FruitGrade::Bonus => &self.bonus_fruits,
            FruitGrade::Infected => &self.infected_fruits,
        }
    }

    const fn fruit_map_mut(&mut self, grade: FruitGrade) -> &mut BTreeMap<SeedType, u32> {
        match grade {
            FruitGrade::Plain => &mut self.fruits,
            FruitGrade::Bonus => &mut self.bonus_fruits,
            FruitGrade::Infected => &mut self.infected_fruits,
        }
    }
}
