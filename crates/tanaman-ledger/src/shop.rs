//! Seed and gear shop stock.
//!
//! Stock is session state: it is rolled when a session starts and again
//! every shop cycle, and it is not persisted. Ancient-tree items (super
//! duper speed and shards) are never stocked.

use std::collections::BTreeMap;

use tracing::info;

use tanaman_types::{SeedType, ToolKind};
use tanaman_world::random::{RandomSource, chance, uniform_inclusive};

use crate::error::LedgerError;
use crate::ledger::{Holding, zeroed_seed_map};

/// Watering cans on the shelf after every restock.
pub const WATERING_CAN_RESTOCK: u32 = 3;

/// Current shop shelves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopStock {
    seeds: BTreeMap<SeedType, u32>,
    watering_cans: u32,
    size_bonus: u32,
}

impl Default for ShopStock {
    fn default() -> Self {
        Self::empty()
    }
}

impl ShopStock {
    /// Empty shelves.
    pub fn empty() -> Self {
        Self {
            seeds: zeroed_seed_map(),
            watering_cans: 0,
            size_bonus: 0,
        }
    }

    /// Units of a seed on the shelf.
    pub fn seed_stock(&self, seed: SeedType) -> u32 {
        self.seeds.get(&seed).copied().unwrap_or(0)
    }

    /// Units of a stocked tool on the shelf; `None` for unstocked tools.
    pub const fn tool_stock(&self, tool: ToolKind) -> Option<u32> {
        match tool {
            ToolKind::WateringCan => Some(self.watering_cans),
            ToolKind::SizeBonus => Some(self.size_bonus),
            ToolKind::SuperDuperSpeed => None,
        }
    }

    /// Take one unit of a seed off the shelf.
    pub fn take_seed(&mut self, seed: SeedType) -> Result<(), LedgerError> {
        let left = self
            .seed_stock(seed)
            .checked_sub(1)
            .ok_or(LedgerError::OutOfStock(Holding::Seed(seed)))?;
        self.seeds.insert(seed, left);
        Ok(())
    }

    /// Take one unit of a stocked tool off the shelf.
    pub fn take_tool(&mut self, tool: ToolKind) -> Result<(), LedgerError> {
        let shelf = self.tool_shelf(tool)?;
        *shelf = shelf
            .checked_sub(1)
            .ok_or(LedgerError::OutOfStock(Holding::Tool(tool)))?;
        Ok(())
    }

    /// Put extra seeds on the shelf.
    pub fn add_seed_stock(&mut self, seed: SeedType, amount: u32) -> Result<(), LedgerError> {
        let next = self
            .seed_stock(seed)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.seeds.insert(seed, next);
        Ok(())
    }

    /// Put extra units of a stocked tool on the shelf.
    pub fn add_tool_stock(&mut self, tool: ToolKind, amount: u32) -> Result<(), LedgerError> {
        let shelf = self.tool_shelf(tool)?;
        *shelf = shelf
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Replace every shelf with a fresh roll.
    pub fn restock(&mut self, source: &mut dyn RandomSource) {
        self.restock_seeds(source);
        self.restock_gear(source);
        info!(
            seeds = ?self.seeds,
            watering_cans = self.watering_cans,
            size_bonus = self.size_bonus,
            "Shop restocked"
        );
    }

    /// Roll the seed shelves.
    pub fn restock_seeds(&mut self, source: &mut dyn RandomSource) {
        for seed in SeedType::ALL {
            let amount = roll_seed_stock(seed, source);
            self.seeds.insert(seed, amount);
        }
    }

    /// Roll the gear shelves.
    pub fn restock_gear(&mut self, source: &mut dyn RandomSource) {
        self.watering_cans = WATERING_CAN_RESTOCK;
        let draw = source.next_unit();
        self.size_bonus = if draw < 0.01 {
            4
        } else if draw < 0.8 {
            1
        } else {
            0
        };
    }

    const fn tool_shelf(&mut self, tool: ToolKind) -> Result<&mut u32, LedgerError> {
        match tool {
            ToolKind::WateringCan => Ok(&mut self.watering_cans),
            ToolKind::SizeBonus => Ok(&mut self.size_bonus),
            ToolKind::SuperDuperSpeed => Err(LedgerError::NotForSale(Holding::Tool(tool))),
        }
    }
}

/// Roll the restock quantity of one seed.
///
/// Nested rolls draw only when the outer roll succeeds.
pub fn roll_seed_stock(seed: SeedType, source: &mut dyn RandomSource) -> u32 {
    match seed {
        SeedType::Mango => {
            if chance(source, 0.9) {
                5
            } else {
                2
            }
        }
        SeedType::Cacao => {
            if !chance(source, 0.9) {
                0
            } else if chance(source, 0.78) {
                2
            } else {
                1
            }
        }
        SeedType::Grape => {
            if !chance(source, 0.8) {
                0
            } else if chance(source, 0.01) {
                2
            } else {
                1
            }
        }
        SeedType::Bamboo => {
            let single = u32::from(chance(source, 0.78));
            let bundle = if chance(source, 0.75) { 4 } else { 0 };
            single.saturating_add(bundle)
        }
        SeedType::Strawberry => {
            if chance(source, 0.45) {
                uniform_inclusive(source, 1, 3)
            } else {
                0
            }
        }
        SeedType::Apple => u32::from(chance(source, 0.20)),
        SeedType::Beanstalk => u32::from(chance(source, 0.12)),
        SeedType::Emberlily => u32::from(chance(source, 0.10)),
        SeedType::Jasmine => u32::from(chance(source, 0.08)),
    }
}
