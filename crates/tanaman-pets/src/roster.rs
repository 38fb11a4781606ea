//! The pet roster: owned counts, shared ages, equip slots and tiers.
//!
//! Ages and tiers belong to a species, not to an individual: every owned
//! fox shares one age and one tier set. Equip slots hold species, and a
//! species may occupy several slots as long as enough individuals are
//! owned.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::{debug, info};

use tanaman_types::catalog::{EQUIP_SLOTS, RAINBOW_COOLDOWN_FACTOR};
use tanaman_types::{PetSpecies, PetTier};
use tanaman_world::growth_multiplier;

use crate::error::PetError;

/// A map with a zero entry for every species.
pub fn zeroed_species_map() -> BTreeMap<PetSpecies, u32> {
    PetSpecies::ALL.into_iter().map(|species| (species, 0)).collect()
}

/// Owned pets, their shared ages, the equip slots and tier membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRoster {
    owned: BTreeMap<PetSpecies, u32>,
    ages: BTreeMap<PetSpecies, u32>,
    slots: [Option<PetSpecies>; EQUIP_SLOTS],
    tiers: BTreeMap<PetTier, BTreeSet<PetSpecies>>,
}

impl Default for PetRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl PetRoster {
    /// An empty roster: nothing owned, nothing equipped.
    pub fn new() -> Self {
        Self {
            owned: zeroed_species_map(),
            ages: zeroed_species_map(),
            slots: [None; EQUIP_SLOTS],
            tiers: PetTier::ALL
                .into_iter()
                .map(|tier| (tier, BTreeSet::new()))
                .collect(),
        }
    }

    // --- Ownership ---

    /// Individuals owned of a species.
    pub fn owned(&self, species: PetSpecies) -> u32 {
        self.owned.get(&species).copied().unwrap_or(0)
    }

    /// Owned counts, one entry per species.
    pub const fn owned_map(&self) -> &BTreeMap<PetSpecies, u32> {
        &self.owned
    }

    /// Add one individual of a species.
    pub fn add_pet(&mut self, species: PetSpecies) -> Result<u32, PetError> {
        let next = self
            .owned(species)
            .checked_add(1)
            .ok_or(PetError::ArithmeticOverflow)?;
        self.owned.insert(species, next);
        info!(%species, owned = next, "Pet added");
        Ok(next)
    }

    /// Overwrite an owned count. Used when restoring a snapshot.
    pub fn set_owned(&mut self, species: PetSpecies, count: u32) {
        self.owned.insert(species, count);
    }

    // --- Ages ---

    /// Shared age of a species.
    pub fn age(&self, species: PetSpecies) -> u32 {
        self.ages.get(&species).copied().unwrap_or(0)
    }

    /// Ages, one entry per species.
    pub const fn ages(&self) -> &BTreeMap<PetSpecies, u32> {
        &self.ages
    }

    /// Overwrite the shared age of a species.
    pub fn set_age(&mut self, species: PetSpecies, age: u32) {
        self.ages.insert(species, age);
    }

    /// Age every owned species by one step.
    ///
    /// Each owned species gains `1 + equipped ulats`, except the ulat
    /// itself which always gains exactly 1. Returns the species that aged.
    pub fn age_all(&mut self) -> Vec<PetSpecies> {
        let ulat_bonus = self.equipped_count(PetSpecies::Ulat);
        let mut aged = Vec::new();
        for species in PetSpecies::ALL {
            if self.owned(species) == 0 {
                continue;
            }
            let step = if species == PetSpecies::Ulat {
                1
            } else {
                ulat_bonus.saturating_add(1)
            };
            let next = self.age(species).saturating_add(step);
            self.ages.insert(species, next);
            aged.push(species);
        }
        if !aged.is_empty() {
            debug!(count = aged.len(), ulat_bonus, "Pets aged");
        }
        aged
    }

    // --- Slots ---

    /// The equip slots.
    pub const fn slots(&self) -> &[Option<PetSpecies>; EQUIP_SLOTS] {
        &self.slots
    }

    /// The species in one slot.
    pub fn slot(&self, slot: usize) -> Result<Option<PetSpecies>, PetError> {
        self.slots
            .get(slot)
            .copied()
            .ok_or(PetError::SlotOutOfRange(slot))
    }

    /// Overwrite the equip slots. Used when restoring a snapshot; call
    /// [`Self::normalize`] afterwards.
    pub const fn set_slots(&mut self, slots: [Option<PetSpecies>; EQUIP_SLOTS]) {
        self.slots = slots;
    }

    /// Number of slots holding this species.
    pub fn equipped_count(&self, species: PetSpecies) -> u32 {
        let count = self
            .slots
            .iter()
            .filter(|slot| **slot == Some(species))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Number of equipped slots whose species holds `tier`.
    pub fn equipped_with_tier(&self, tier: PetTier) -> u32 {
        let count = self
            .slots
            .iter()
            .flatten()
            .filter(|species| self.has_tier(**species, tier))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Number of equipped rainbow-tier pets.
    pub fn rainbow_equipped(&self) -> u32 {
        self.equipped_with_tier(PetTier::Rainbow)
    }

    /// Growth duration multiplier from the equipped pets.
    pub fn growth_multiplier(&self) -> Decimal {
        growth_multiplier(self.equipped_count(PetSpecies::Chicken), self.rainbow_equipped())
    }

    /// Active cooldown factor: `0.75` per equipped rainbow pet.
    pub fn cooldown_factor(&self) -> Decimal {
        (0..self.rainbow_equipped()).fold(Decimal::ONE, |acc, _| {
            acc.checked_mul(RAINBOW_COOLDOWN_FACTOR).unwrap_or(acc)
        })
    }

    /// Put one owned individual in the first empty slot.
    ///
    /// Returns the slot index used.
    pub fn equip(&mut self, species: PetSpecies) -> Result<usize, PetError> {
        let owned = self.owned(species);
        if owned == 0 {
            return Err(PetError::NotOwned(species));
        }
        if self.equipped_count(species) >= owned {
            return Err(PetError::NoneAvailable(species));
        }
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(PetError::SlotsFull)?;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(PetError::SlotOutOfRange(index))?;
        *slot = Some(species);
        info!(%species, slot = index, "Pet equipped");
        Ok(index)
    }

    /// Empty a slot. Returns the species that was in it.
    pub fn unequip(&mut self, slot: usize) -> Result<PetSpecies, PetError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(PetError::SlotOutOfRange(slot))?;
        let species = entry.take().ok_or(PetError::SlotEmpty(slot))?;
        info!(%species, slot, "Pet unequipped");
        Ok(species)
    }

    // --- Tiers ---

    /// Whether a species holds a tier.
    pub fn has_tier(&self, species: PetSpecies, tier: PetTier) -> bool {
        self.tiers
            .get(&tier)
            .is_some_and(|members| members.contains(&species))
    }

    /// Species holding a tier.
    pub fn tier_members(&self, tier: PetTier) -> Vec<PetSpecies> {
        self.tiers
            .get(&tier)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether any species holds the gold tier.
    pub fn has_any_golden(&self) -> bool {
        self.tiers
            .get(&PetTier::Gold)
            .is_some_and(|members| !members.is_empty())
    }

    /// Add a species to a tier. No rule checks; see [`crate::tiers`].
    pub fn insert_tier(&mut self, species: PetSpecies, tier: PetTier) {
        self.tiers.entry(tier).or_default().insert(species);
    }

    /// Remove a species from a tier.
    pub fn remove_tier(&mut self, species: PetSpecies, tier: PetTier) {
        if let Some(members) = self.tiers.get_mut(&tier) {
            members.remove(&species);
        }
    }

    // --- Restore ---

    /// Repair a restored roster.
    ///
    /// Slots beyond the owned count are cleared (later slots first), and a
    /// rainbow species loses any gold or diamond membership.
    pub fn normalize(&mut self) {
        let mut budget = self.owned.clone();
        for slot in &mut self.slots {
            let Some(species) = *slot else { continue };
            let left = budget.entry(species).or_insert(0);
            if *left == 0 {
                debug!(%species, "Dropping equipped pet that is not owned");
                *slot = None;
            } else {
                *left = left.saturating_sub(1);
            }
        }
        for species in self.tier_members(PetTier::Rainbow) {
            self.remove_tier(species, PetTier::Gold);
            self.remove_tier(species, PetTier::Diamond);
        }
    }
}
