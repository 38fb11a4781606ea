//! Buying and selling.
//!
//! Stocked shops check stock before price; ancient-tree items check their
//! unlock requirement before price. Nothing is debited unless every check
//! passes.

use tracing::info;

use tanaman_types::catalog::{
    SIZE_BONUS_PRICE, SUPER_DUPER_SPEED_PRICE, SUPER_DUPER_SPEED_UNLOCK, WATERING_CAN_PRICE,
};
use tanaman_types::{FruitGrade, PetTier, SeedType, ToolKind};
use tanaman_world::mutation::sale_price;
use tanaman_world::random::RandomSource;

use crate::error::LedgerError;
use crate::ledger::{Holding, Ledger};
use crate::shop::ShopStock;

/// Shop price of a tool.
pub const fn tool_price(tool: ToolKind) -> u64 {
    match tool {
        ToolKind::WateringCan => WATERING_CAN_PRICE,
        ToolKind::SizeBonus => SIZE_BONUS_PRICE,
        ToolKind::SuperDuperSpeed => SUPER_DUPER_SPEED_PRICE,
    }
}

/// Buy one seed from the seed shop. Unlocks the seed.
pub fn buy_seed(ledger: &mut Ledger, shop: &mut ShopStock, seed: SeedType) -> Result<u64, LedgerError> {
    let holding = Holding::Seed(seed);
    if shop.seed_stock(seed) == 0 {
        return Err(LedgerError::OutOfStock(holding));
    }
    let price = seed.definition().cost;
    ensure_affordable(ledger, price)?;
    ensure_room(ledger, holding)?;

    shop.take_seed(seed)?;
    ledger.debit_money(price)?;
    ledger.credit(holding, 1)?;
    if ledger.unlock(seed) {
        info!(?seed, "Seed unlocked");
    }
    Ok(price)
}

/// Buy one tool.
///
/// Watering cans and size bonuses come from the gear shop's stock; super
/// duper speed comes from the ancient tree and needs grape unlocked.
pub fn buy_tool(ledger: &mut Ledger, shop: &mut ShopStock, tool: ToolKind) -> Result<u64, LedgerError> {
    let holding = Holding::Tool(tool);
    match shop.tool_stock(tool) {
        Some(0) => return Err(LedgerError::OutOfStock(holding)),
        Some(_) => {}
        None => {
            if !ledger.is_unlocked(SUPER_DUPER_SPEED_UNLOCK) {
                return Err(LedgerError::Locked {
                    holding,
                    requirement: "unlock Anggur first",
                });
            }
        }
    }
    let price = tool_price(tool);
    ensure_affordable(ledger, price)?;
    ensure_room(ledger, holding)?;

    if shop.tool_stock(tool).is_some() {
        shop.take_tool(tool)?;
    }
    ledger.debit_money(price)?;
    ledger.credit(holding, 1)?;
    Ok(price)
}

/// Buy one pet shard from the ancient tree.
///
/// Diamond shards are only sold once some species has the gold tier.
pub fn buy_shard(ledger: &mut Ledger, tier: PetTier, has_golden_pet: bool) -> Result<u64, LedgerError> {
    let holding = Holding::Shard(tier);
    if tier == PetTier::Diamond && !has_golden_pet {
        return Err(LedgerError::Locked {
            holding,
            requirement: "own a golden pet first",
        });
    }
    let price = tier.shard_price();
    ensure_affordable(ledger, price)?;
    ensure_room(ledger, holding)?;

    ledger.debit_money(price)?;
    ledger.credit(holding, 1)?;
    Ok(price)
}

/// Sell one fruit. One draw for the price.
pub fn sell_fruit(
    ledger: &mut Ledger,
    grade: FruitGrade,
    seed: SeedType,
    source: &mut dyn RandomSource,
) -> Result<u64, LedgerError> {
    let holding = Holding::Fruit(grade, seed);
    let available = ledger.count(holding);
    if available == 0 {
        return Err(LedgerError::InsufficientHolding {
            holding,
            requested: 1,
            available,
        });
    }
    let price = sale_price(seed, grade, source).ok_or(LedgerError::ArithmeticOverflow)?;
    ledger
        .money()
        .checked_add(price)
        .ok_or(LedgerError::ArithmeticOverflow)?;

    ledger.debit(holding, 1)?;
    ledger.credit_money(price)?;
    Ok(price)
}

/// Reject if the player cannot pay `price`.
pub const fn ensure_affordable(ledger: &Ledger, price: u64) -> Result<(), LedgerError> {
    if ledger.can_afford(price) {
        Ok(())
    } else {
        Err(LedgerError::InsufficientFunds {
            needed: price,
            available: ledger.money(),
        })
    }
}

fn ensure_room(ledger: &Ledger, holding: Holding) -> Result<(), LedgerError> {
    ledger
        .count(holding)
        .checked_add(1)
        .map(|_| ())
        .ok_or(LedgerError::ArithmeticOverflow)
}
