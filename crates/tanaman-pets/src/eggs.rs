//! Egg shop and hatching.

use tracing::info;

use tanaman_ledger::{Ledger, ensure_affordable};
use tanaman_types::{EggKind, PetSpecies};
use tanaman_world::random::{RandomSource, weighted_choice};

use crate::error::PetError;
use crate::roster::PetRoster;

/// Roll the species inside an egg. One draw.
pub fn hatch(egg: EggKind, source: &mut dyn RandomSource) -> Option<PetSpecies> {
    weighted_choice(source, egg.hatch_weights())
}

/// Buy and hatch one egg.
///
/// Returns the hatched species; `None` means the egg was empty, which
/// still costs the egg.
pub fn buy_egg(
    ledger: &mut Ledger,
    roster: &mut PetRoster,
    egg: EggKind,
    source: &mut dyn RandomSource,
) -> Result<Option<PetSpecies>, PetError> {
    let price = egg.price();
    ensure_affordable(ledger, price)?;
    let hatched = hatch(egg, source);
    if let Some(species) = hatched {
        roster
            .owned(species)
            .checked_add(1)
            .ok_or(PetError::ArithmeticOverflow)?;
    }

    ledger.debit_money(price)?;
    if let Some(species) = hatched {
        roster.add_pet(species)?;
    }
    info!(?egg, ?hatched, price, "Egg hatched");
    Ok(hatched)
}
