//! Ability cooldowns and the per-tick firing order.
//!
//! Each equip slot carries its own active cooldown in seconds. The three
//! tier passives each run on a fixed 60-tick track that only counts down
//! while some equipped pet holds the tier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tanaman_ledger::Ledger;
use tanaman_types::catalog::{EQUIP_SLOTS, PASSIVE_PERIOD_TICKS};
use tanaman_types::{PetSpecies, PetTier};
use tanaman_world::Garden;
use tanaman_world::random::RandomSource;

use crate::abilities::{AbilityEvent, fire_active, fire_rainbow_passive, fire_tier_passive};
use crate::error::PetError;
use crate::roster::PetRoster;

/// Ticks remaining on each tier passive track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveCooldowns {
    /// Gold track.
    pub gold: u32,
    /// Diamond track.
    pub diamond: u32,
    /// Rainbow track.
    pub rainbow: u32,
}

impl Default for PassiveCooldowns {
    fn default() -> Self {
        Self {
            gold: PASSIVE_PERIOD_TICKS,
            diamond: PASSIVE_PERIOD_TICKS,
            rainbow: PASSIVE_PERIOD_TICKS,
        }
    }
}

impl PassiveCooldowns {
    /// Count one tick down on a track. Returns `true` (and rewinds the
    /// track) when it reaches zero.
    fn step(&mut self, tier: PetTier) -> bool {
        let track = match tier {
            PetTier::Gold => &mut self.gold,
            PetTier::Diamond => &mut self.diamond,
            PetTier::Rainbow => &mut self.rainbow,
        };
        *track = track.saturating_sub(1);
        if *track == 0 {
            *track = PASSIVE_PERIOD_TICKS;
            true
        } else {
            false
        }
    }
}

/// Full cooldown of a species' active ability under a cooldown factor.
///
/// `None` for species without an active ability.
pub fn full_cooldown(species: PetSpecies, factor: Decimal) -> Option<Decimal> {
    species
        .definition()
        .base_cooldown_seconds
        .map(|seconds| Decimal::from(seconds).checked_mul(factor).unwrap_or(Decimal::from(seconds)))
}

/// Active and passive cooldown state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AbilityScheduler {
    active: [Option<Decimal>; EQUIP_SLOTS],
    passive: PassiveCooldowns,
}

impl AbilityScheduler {
    /// No active cooldowns; every passive track at its full period.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from restored cooldowns. Call [`Self::sync`] afterwards.
    pub const fn from_parts(active: [Option<Decimal>; EQUIP_SLOTS], passive: PassiveCooldowns) -> Self {
        Self { active, passive }
    }

    /// Remaining active cooldown of each slot.
    pub const fn active(&self) -> &[Option<Decimal>; EQUIP_SLOTS] {
        &self.active
    }

    /// Passive track counters.
    pub const fn passive(&self) -> PassiveCooldowns {
        self.passive
    }

    /// Start the cooldown of a freshly equipped slot.
    ///
    /// Call after the roster has equipped the pet, so a rainbow pet's own
    /// discount applies to itself.
    pub fn on_equip(&mut self, slot: usize, roster: &PetRoster) -> Result<(), PetError> {
        let species = roster.slot(slot)?.ok_or(PetError::SlotEmpty(slot))?;
        let cooldown = full_cooldown(species, roster.cooldown_factor());
        *self.slot_mut(slot)? = cooldown;
        Ok(())
    }

    /// Clear the cooldown of an emptied slot.
    pub fn on_unequip(&mut self, slot: usize) -> Result<(), PetError> {
        *self.slot_mut(slot)? = None;
        Ok(())
    }

    /// Make cooldowns agree with the roster's slots.
    ///
    /// Empty slots lose their cooldown; equipped active pets without one
    /// start a full cooldown.
    pub fn sync(&mut self, roster: &PetRoster) {
        let factor = roster.cooldown_factor();
        for (cooldown, species) in self.active.iter_mut().zip(roster.slots()) {
            match species {
                None => *cooldown = None,
                Some(species) => {
                    if species.definition().base_cooldown_seconds.is_none() {
                        *cooldown = None;
                    } else if cooldown.is_none() {
                        *cooldown = full_cooldown(*species, factor);
                    }
                }
            }
        }
    }

    /// Run one second of pet activity: active cooldowns first (slot
    /// order), then the gold, diamond and rainbow tracks.
    pub fn tick(
        &mut self,
        roster: &PetRoster,
        garden: &mut Garden,
        ledger: &mut Ledger,
        source: &mut dyn RandomSource,
    ) -> Result<Vec<AbilityEvent>, PetError> {
        let mut events = Vec::new();
        let factor = roster.cooldown_factor();

        for (index, cooldown) in self.active.iter_mut().enumerate() {
            let Some(species) = roster.slot(index)? else {
                continue;
            };
            let Some(remaining) = *cooldown else {
                continue;
            };
            let next = remaining
                .checked_sub(Decimal::ONE)
                .ok_or(PetError::ArithmeticOverflow)?;
            if next > Decimal::ZERO {
                *cooldown = Some(next);
                continue;
            }
            *cooldown = full_cooldown(species, factor);
            if let Some(event) = fire_active(species, garden, ledger, source)? {
                info!(%species, slot = index, "Pet ability fired");
                events.push(event);
            }
        }

        for tier in [PetTier::Gold, PetTier::Diamond] {
            if roster.equipped_with_tier(tier) == 0 || !self.passive.step(tier) {
                continue;
            }
            debug!(%tier, "Tier passive due");
            if let Some(event) = fire_tier_passive(tier, garden, source)? {
                events.push(event);
            }
        }

        let rainbow = roster.equipped_with_tier(PetTier::Rainbow);
        if rainbow > 0 && self.passive.step(PetTier::Rainbow) {
            debug!(rainbow, "Rainbow passive due");
            for _ in 0..rainbow {
                events.extend(fire_rainbow_passive(garden, source)?);
            }
        }

        Ok(events)
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut Option<Decimal>, PetError> {
        self.active.get_mut(slot).ok_or(PetError::SlotOutOfRange(slot))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use tanaman_ledger::Holding;
    use tanaman_types::{EpochMillis, Plot, PlotId, PlotStatus, SeedType, ToolKind};
    use tanaman_world::ScriptedRandom;

    use super::*;

    fn equipped(pets: &[PetSpecies]) -> (PetRoster, AbilityScheduler) {
        let mut roster = PetRoster::new();
        let mut scheduler = AbilityScheduler::new();
        for &species in pets {
            roster.set_owned(species, roster.owned(species).saturating_add(1));
            let slot = roster.equip(species).unwrap();
            scheduler.on_equip(slot, &roster).unwrap();
        }
        (roster, scheduler)
    }

    fn growing_garden() -> Garden {
        let mut plot = Plot::empty(PlotId::new(0));
        plot.seed_type = Some(SeedType::Mango);
        plot.status = PlotStatus::Growing;
        plot.next_phase_at = Some(EpochMillis::new(i64::MAX));
        Garden::from_parts(vec![plot], 10)
    }

    #[test]
    fn equip_starts_full_cooldown() {
        let (_, scheduler) = equipped(&[PetSpecies::Fox, PetSpecies::Chicken]);
        assert_eq!(scheduler.active(), &[Some(dec!(240)), None, None]);
    }

    #[test]
    fn rainbow_pet_discounts_its_own_cooldown() {
        let mut roster = PetRoster::new();
        roster.set_owned(PetSpecies::Griffin, 1);
        roster.insert_tier(PetSpecies::Griffin, PetTier::Rainbow);
        let mut scheduler = AbilityScheduler::new();
        let slot = roster.equip(PetSpecies::Griffin).unwrap();
        scheduler.on_equip(slot, &roster).unwrap();
        assert_eq!(scheduler.active()[0], Some(dec!(90)));
    }

    #[test]
    fn unequip_clears_cooldown() {
        let (mut roster, mut scheduler) = equipped(&[PetSpecies::Fox]);
        roster.unequip(0).unwrap();
        scheduler.on_unequip(0).unwrap();
        assert_eq!(scheduler.active()[0], None);
    }

    #[test]
    fn glitch_fox_fires_after_full_cooldown() {
        let (roster, mut scheduler) = equipped(&[PetSpecies::GlitchFox]);
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.1]);
        for _ in 0..419 {
            let events = scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap();
            assert!(events.is_empty());
        }
        let events = scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(ledger.count(Holding::Tool(ToolKind::WateringCan)), 1);
        assert_eq!(scheduler.active()[0], Some(dec!(420)));
    }

    #[test]
    fn fractional_cooldown_fires_when_crossing_zero() {
        let mut roster = PetRoster::new();
        roster.set_owned(PetSpecies::Racoon, 1);
        roster.set_slots([Some(PetSpecies::Racoon), None, None]);
        let mut scheduler =
            AbilityScheduler::from_parts([Some(dec!(1.5)), None, None], PassiveCooldowns::default());
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.0]);
        assert!(scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap().is_empty());
        assert_eq!(scheduler.active()[0], Some(dec!(0.5)));
        let events = scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn passive_track_only_counts_while_tier_equipped() {
        let (mut roster, mut scheduler) = equipped(&[PetSpecies::Chicken]);
        let mut garden = growing_garden();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::default().with_fallback(0.0);
        for _ in 0..10 {
            scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap();
        }
        assert_eq!(scheduler.passive().gold, 60);

        roster.insert_tier(PetSpecies::Chicken, PetTier::Gold);
        for _ in 0..59 {
            scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap();
        }
        assert_eq!(scheduler.passive().gold, 1);
        let events = scheduler.tick(&roster, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(scheduler.passive().gold, 60);
        assert_eq!(scheduler.passive().diamond, 60);
    }

    #[test]
    fn sync_repairs_restored_cooldowns() {
        let mut roster = PetRoster::new();
        roster.set_owned(PetSpecies::Fox, 1);
        roster.set_owned(PetSpecies::Chicken, 1);
        roster.set_slots([None, Some(PetSpecies::Fox), Some(PetSpecies::Chicken)]);
        let mut scheduler = AbilityScheduler::from_parts(
            [Some(dec!(12)), None, Some(dec!(3))],
            PassiveCooldowns::default(),
        );
        scheduler.sync(&roster);
        assert_eq!(scheduler.active(), &[None, Some(dec!(240)), None]);
    }
}
