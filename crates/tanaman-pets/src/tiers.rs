//! Tier rules shared by pet shards and the mutation machine.
//!
//! A species holds gold, diamond, both, or rainbow. Rainbow replaces gold
//! and diamond, and nothing can be added on top of rainbow. Holding a
//! tier already is always a rejection, which caps gold plus diamond at
//! two.

use tracing::info;

use tanaman_ledger::{Holding, Ledger, LedgerError};
use tanaman_types::{PetSpecies, PetTier};

use crate::error::PetError;
use crate::roster::PetRoster;

/// Check whether `tier` may be granted to `species`.
pub fn check_grant(roster: &PetRoster, species: PetSpecies, tier: PetTier) -> Result<(), PetError> {
    if roster.has_tier(species, tier) {
        return Err(PetError::AlreadyTier { species, tier });
    }
    if tier == PetTier::Rainbow {
        return Ok(());
    }
    if roster.has_tier(species, PetTier::Rainbow) {
        return Err(PetError::RainbowLocked(species));
    }
    Ok(())
}

/// Grant a tier under the tier rules, with no shard cost.
pub fn grant_tier(roster: &mut PetRoster, species: PetSpecies, tier: PetTier) -> Result<(), PetError> {
    check_grant(roster, species, tier)?;
    if tier == PetTier::Rainbow {
        roster.remove_tier(species, PetTier::Gold);
        roster.remove_tier(species, PetTier::Diamond);
    }
    roster.insert_tier(species, tier);
    info!(%species, %tier, "Pet tier granted");
    Ok(())
}

/// Spend one shard of `tier` on an owned species.
pub fn apply_shard(
    roster: &mut PetRoster,
    ledger: &mut Ledger,
    species: PetSpecies,
    tier: PetTier,
) -> Result<(), PetError> {
    let holding = Holding::Shard(tier);
    let available = ledger.count(holding);
    if available == 0 {
        return Err(PetError::Ledger(LedgerError::InsufficientHolding {
            holding,
            requested: 1,
            available,
        }));
    }
    if roster.owned(species) == 0 {
        return Err(PetError::NotOwned(species));
    }
    check_grant(roster, species, tier)?;

    ledger.debit(holding, 1)?;
    grant_tier(roster, species, tier)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn setup() -> (PetRoster, Ledger) {
        let mut roster = PetRoster::new();
        roster.set_owned(PetSpecies::Fox, 1);
        let mut ledger = Ledger::new();
        for tier in PetTier::ALL {
            ledger.credit(Holding::Shard(tier), 2).unwrap();
        }
        (roster, ledger)
    }

    #[test]
    fn gold_then_diamond_stack() {
        let (mut roster, mut ledger) = setup();
        apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Gold).unwrap();
        apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Diamond).unwrap();
        assert!(roster.has_tier(PetSpecies::Fox, PetTier::Gold));
        assert!(roster.has_tier(PetSpecies::Fox, PetTier::Diamond));
        assert_eq!(ledger.count(Holding::Shard(PetTier::Gold)), 1);
        assert_eq!(
            apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Gold),
            Err(PetError::AlreadyTier {
                species: PetSpecies::Fox,
                tier: PetTier::Gold,
            })
        );
    }

    #[test]
    fn rainbow_replaces_gold_and_diamond() {
        let (mut roster, mut ledger) = setup();
        apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Gold).unwrap();
        apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Rainbow).unwrap();
        assert!(roster.has_tier(PetSpecies::Fox, PetTier::Rainbow));
        assert!(!roster.has_tier(PetSpecies::Fox, PetTier::Gold));
        assert!(!roster.has_any_golden());
    }

    #[test]
    fn nothing_goes_on_top_of_rainbow() {
        let (mut roster, mut ledger) = setup();
        apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Rainbow).unwrap();
        let before = (roster.clone(), ledger.clone());
        assert_eq!(
            apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Diamond),
            Err(PetError::RainbowLocked(PetSpecies::Fox))
        );
        assert!(matches!(
            apply_shard(&mut roster, &mut ledger, PetSpecies::Fox, PetTier::Rainbow),
            Err(PetError::AlreadyTier { .. })
        ));
        assert_eq!((roster, ledger), before);
    }

    #[test]
    fn shard_requires_stock_and_ownership() {
        let (mut roster, mut ledger) = setup();
        assert_eq!(
            apply_shard(&mut roster, &mut ledger, PetSpecies::Griffin, PetTier::Gold),
            Err(PetError::NotOwned(PetSpecies::Griffin))
        );
        let mut empty = Ledger::new();
        assert!(matches!(
            apply_shard(&mut roster, &mut empty, PetSpecies::Fox, PetTier::Gold),
            Err(PetError::Ledger(LedgerError::InsufficientHolding { .. }))
        ));
    }

    #[test]
    fn grant_tier_costs_nothing() {
        let mut roster = PetRoster::new();
        grant_tier(&mut roster, PetSpecies::Glitch, PetTier::Diamond).unwrap();
        assert!(roster.has_tier(PetSpecies::Glitch, PetTier::Diamond));
    }
}
