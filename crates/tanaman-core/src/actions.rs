//! Player actions.
//!
//! Every action validates against the current state first and only then
//! mutates, so an `Err` leaves the game exactly as it was. The error's
//! `Display` is the message shown to the player; a success returns a
//! [`Notice`].

use tracing::info;

use tanaman_ledger::{Holding, Ledger, LedgerError, ensure_affordable, market};
use tanaman_pets::{PetError, apply_shard as apply_pet_shard, buy_egg as hatch_egg};
use tanaman_types::{
    EggKind, EpochMillis, FruitGrade, Notice, PetSpecies, PetTier, PlotId, SeedType, ToolKind,
};
use tanaman_world::growth;
use tanaman_world::random::RandomSource;
use tanaman_world::{GardenError, HarvestYield, price_harvest, roll_variant};

use crate::state::GameState;

/// Why an action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// A plot precondition failed.
    #[error(transparent)]
    Garden(#[from] GardenError),

    /// Not enough money, stock or items.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A pet precondition failed.
    #[error(transparent)]
    Pet(#[from] PetError),
}

impl ActionError {
    /// The error as a user-facing notice.
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

fn require(ledger: &Ledger, holding: Holding) -> Result<(), LedgerError> {
    let available = ledger.count(holding);
    if available == 0 {
        return Err(LedgerError::InsufficientHolding {
            holding,
            requested: 1,
            available,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// Plant one seed on an empty plot. One draw for the variant.
pub fn plant(
    state: &mut GameState,
    plot_id: PlotId,
    seed: SeedType,
    now: EpochMillis,
    source: &mut dyn RandomSource,
) -> Result<Notice, ActionError> {
    if !state.garden.plot(plot_id)?.is_empty() {
        return Err(GardenError::PlotOccupied(plot_id).into());
    }
    let holding = Holding::Seed(seed);
    require(&state.ledger, holding)?;

    let factors = state.phase_factors();
    let variant = roll_variant(source);
    growth::plant(state.garden.plot_mut(plot_id)?, seed, variant, now, factors)?;
    state.ledger.debit(holding, 1)?;
    info!(plot_id = %plot_id, ?seed, ?variant, "Seed planted");
    Ok(Notice::success(format!("Planted {seed} on plot #{plot_id}")))
}

/// Harvest a ready plot.
///
/// Only mutated fruit draws (for its sale price).
pub fn harvest(
    state: &mut GameState,
    plot_id: PlotId,
    now: EpochMillis,
    source: &mut dyn RandomSource,
) -> Result<Notice, ActionError> {
    let factors = state.phase_factors();
    let plot = state.garden.plot(plot_id)?;
    let outcome = price_harvest(plot, source)?;
    let mut regrown = plot.clone();
    growth::regrow_after_harvest(&mut regrown, now, factors)?;

    let text = match outcome {
        HarvestYield::Money { seed, amount } => {
            state.ledger.credit_money(amount)?;
            format!("Sold mutated {seed} for {amount}!")
        }
        HarvestYield::BonusFruit { seed, count } => {
            state
                .ledger
                .credit(Holding::Fruit(FruitGrade::Bonus, seed), count)?;
            format!("Harvested {count} bonus {seed} fruit!")
        }
        HarvestYield::PlainFruit { seed } => {
            state.ledger.credit(Holding::Fruit(FruitGrade::Plain, seed), 1)?;
            format!("Harvested {seed}!")
        }
    };
    *state.garden.plot_mut(plot_id)? = regrown;
    info!(plot_id = %plot_id, ?outcome, "Plot harvested");
    Ok(Notice::success(text))
}

/// Halve the remaining phase time of a plot with a watering can.
pub fn water(state: &mut GameState, plot_id: PlotId, now: EpochMillis) -> Result<Notice, ActionError> {
    let holding = Holding::Tool(ToolKind::WateringCan);
    state.garden.plot(plot_id)?;
    require(&state.ledger, holding)?;
    growth::water(state.garden.plot_mut(plot_id)?, now)?;
    state.ledger.debit(holding, 1)?;
    Ok(Notice::success(format!("Watered plot #{plot_id}")))
}

/// Boost ready fruit with a size bonus.
pub fn use_size_bonus(state: &mut GameState, plot_id: PlotId) -> Result<Notice, ActionError> {
    let holding = Holding::Tool(ToolKind::SizeBonus);
    state.garden.plot(plot_id)?;
    require(&state.ledger, holding)?;
    growth::boost(state.garden.plot_mut(plot_id)?)?;
    state.ledger.debit(holding, 1)?;
    Ok(Notice::success(format!("Plot #{plot_id} got a size bonus!")))
}

/// Make a growing plant ready at once with super duper speed.
pub fn insta_grow(state: &mut GameState, plot_id: PlotId) -> Result<Notice, ActionError> {
    let holding = Holding::Tool(ToolKind::SuperDuperSpeed);
    state.garden.plot(plot_id)?;
    require(&state.ledger, holding)?;
    growth::insta_grow(state.garden.plot_mut(plot_id)?)?;
    state.ledger.debit(holding, 1)?;
    Ok(Notice::success(format!("Plot #{plot_id} is ready!")))
}

/// Dig up a plot.
pub fn shovel(state: &mut GameState, plot_id: PlotId) -> Result<Notice, ActionError> {
    growth::shovel(state.garden.plot_mut(plot_id)?)?;
    info!(plot_id = %plot_id, "Plot shoveled");
    Ok(Notice::info(format!("Plot #{plot_id} was cleared")))
}

/// Buy one more plot.
pub fn upgrade_garden(state: &mut GameState) -> Result<Notice, ActionError> {
    let price = state.garden.upgrade_cost();
    ensure_affordable(&state.ledger, price)?;
    let plot_id = state.garden.expand()?;
    state.ledger.debit_money(price)?;
    Ok(Notice::success(format!("Garden upgraded with plot #{plot_id}!")))
}

// ---------------------------------------------------------------------------
// Economy
// ---------------------------------------------------------------------------

/// Buy one seed from the seed shop.
pub fn buy_seed(state: &mut GameState, seed: SeedType) -> Result<Notice, ActionError> {
    let price = market::buy_seed(&mut state.ledger, &mut state.shop, seed)?;
    Ok(Notice::success(format!("Bought a {seed} seed for {price}")))
}

/// Buy one tool.
pub fn buy_tool(state: &mut GameState, tool: ToolKind) -> Result<Notice, ActionError> {
    let price = market::buy_tool(&mut state.ledger, &mut state.shop, tool)?;
    Ok(Notice::success(format!("Bought a {tool} for {price}")))
}

/// Buy one pet shard.
pub fn buy_shard(state: &mut GameState, tier: PetTier) -> Result<Notice, ActionError> {
    let has_golden = state.roster.has_any_golden();
    let price = market::buy_shard(&mut state.ledger, tier, has_golden)?;
    Ok(Notice::success(format!("Bought a {tier} shard for {price}")))
}

/// Sell one fruit. One draw for the price.
pub fn sell_fruit(
    state: &mut GameState,
    grade: FruitGrade,
    seed: SeedType,
    source: &mut dyn RandomSource,
) -> Result<Notice, ActionError> {
    let price = market::sell_fruit(&mut state.ledger, grade, seed, source)?;
    let holding = Holding::Fruit(grade, seed);
    Ok(Notice::success(format!("Sold {holding} for {price}")))
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

/// Buy and hatch an egg. One draw for the species.
pub fn buy_egg(
    state: &mut GameState,
    egg: EggKind,
    source: &mut dyn RandomSource,
) -> Result<Notice, ActionError> {
    let hatched = hatch_egg(&mut state.ledger, &mut state.roster, egg, source)?;
    Ok(match hatched {
        Some(species) => Notice::success(format!("You hatched a {species}!")),
        None => Notice::info("The egg was empty."),
    })
}

/// Equip one owned pet into the first empty slot.
pub fn equip(state: &mut GameState, species: PetSpecies) -> Result<Notice, ActionError> {
    let slot = state.roster.equip(species)?;
    state.scheduler.on_equip(slot, &state.roster)?;
    Ok(Notice::success(format!("{species} equipped")))
}

/// Empty an equip slot.
pub fn unequip(state: &mut GameState, slot: usize) -> Result<Notice, ActionError> {
    state.roster.slot(slot)?.ok_or(PetError::SlotEmpty(slot))?;
    state.scheduler.on_unequip(slot)?;
    let species = state.roster.unequip(slot)?;
    Ok(Notice::info(format!("{species} unequipped")))
}

/// Spend a shard on a species.
pub fn apply_shard(
    state: &mut GameState,
    species: PetSpecies,
    tier: PetTier,
) -> Result<Notice, ActionError> {
    apply_pet_shard(&mut state.roster, &mut state.ledger, species, tier)?;
    Ok(Notice::success(format!("{species} is now {tier}!")))
}

/// Put a species in the mutation machine.
pub fn start_mutation(
    state: &mut GameState,
    species: PetSpecies,
    now: EpochMillis,
) -> Result<Notice, ActionError> {
    state.machine.start(&state.roster, species, now)?;
    Ok(Notice::info(format!("{species} entered the mutation machine")))
}
