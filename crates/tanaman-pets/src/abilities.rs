//! Pet ability effects.
//!
//! Active abilities belong to a species and fire from an equip slot when
//! its cooldown runs out. Passive abilities belong to a tier and fire on
//! fixed 60-tick tracks. An ability with nothing eligible does nothing and
//! draws nothing.

use tracing::debug;

use tanaman_ledger::{Holding, Ledger};
use tanaman_types::{
    FruitGrade, MutationType, Notice, PetSpecies, PetTier, Plot, PlotId, SeedType, ToolKind,
};
use tanaman_world::growth;
use tanaman_world::random::{RandomSource, chance, pick, weighted_choice};
use tanaman_world::{Garden, apply_mutation};

use crate::error::PetError;

/// Chance that a fox digs up super duper speed instead of a seed.
pub const FOX_SUPER_DUPER_SPEED_CHANCE: f64 = 0.01;

/// Chance that a griffin blessing is ascended rather than windy.
pub const GRIFFIN_ASCENDED_CHANCE: f64 = 0.04;

/// Chance that the glitch pet's ability does anything at all.
pub const GLITCH_CHANCE: f64 = 0.19;

/// Chance that the glitch fox finds a watering can rather than a size
/// bonus.
pub const GLITCH_FOX_WATERING_CAN_CHANCE: f64 = 0.8;

/// Chance that a gold or diamond passive blesses a plot.
pub const TIER_PASSIVE_CHANCE: f64 = 0.98;

/// Chance of each of the two rainbow passive rolls.
pub const RAINBOW_PASSIVE_CHANCE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// What triggered an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilitySource {
    /// An equipped pet's active ability.
    Pet(PetSpecies),
    /// A tier passive.
    Tier(PetTier),
}

impl core::fmt::Display for AbilitySource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pet(species) => write!(f, "{species}"),
            Self::Tier(PetTier::Gold) => f.write_str("Golden pet"),
            Self::Tier(tier) => write!(f, "{tier} pet"),
        }
    }
}

/// What an ability did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    /// A seed was added to the inventory.
    FoundSeed(SeedType),
    /// A tool was added to the inventory.
    FoundTool(ToolKind),
    /// An infected fruit was added to the inventory.
    StoleFruit(SeedType),
    /// A plot gained a mutation tag.
    Mutated {
        /// The plot.
        plot: PlotId,
        /// The tag applied.
        mutation: MutationType,
    },
    /// A ready plot was boosted.
    Boosted(PlotId),
}

/// One ability firing that changed the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityEvent {
    /// Who fired.
    pub source: AbilitySource,
    /// What happened.
    pub effect: AbilityEffect,
}

impl AbilityEvent {
    /// The user-facing notice for this event.
    pub fn notice(&self) -> Notice {
        let source = self.source;
        let text = match self.effect {
            AbilityEffect::FoundSeed(seed) => format!("{source} found a {seed} seed!"),
            AbilityEffect::FoundTool(tool) => format!("{source} found a {tool}!"),
            AbilityEffect::StoleFruit(seed) => {
                format!("{source} brought back an infected {seed} fruit!")
            }
            AbilityEffect::Mutated { plot, mutation } => {
                format!("{source} gave plot #{plot} the {mutation} mutation!")
            }
            AbilityEffect::Boosted(plot) => format!("{source} boosted plot #{plot}!"),
        };
        Notice::info(text)
    }
}

// ---------------------------------------------------------------------------
// Active abilities
// ---------------------------------------------------------------------------

/// Fire the active ability of a species.
///
/// Returns `None` when the ability fizzled. Chickens have no active
/// ability and always fizzle without drawing.
pub fn fire_active(
    species: PetSpecies,
    garden: &mut Garden,
    ledger: &mut Ledger,
    source: &mut dyn RandomSource,
) -> Result<Option<AbilityEvent>, PetError> {
    let effect = match species {
        PetSpecies::Fox => Some(fox(ledger, source)),
        PetSpecies::Racoon => racoon(ledger, source),
        PetSpecies::Griffin => griffin(garden, source)?,
        PetSpecies::Ulat => mutate_one(garden, source, MutationType::Gatal)?,
        PetSpecies::Glitch => {
            if chance(source, GLITCH_CHANCE) {
                mutate_one(garden, source, MutationType::Glitch)?
            } else {
                None
            }
        }
        PetSpecies::GolemGlitch => mutate_one(garden, source, MutationType::GlitchInfected)?,
        PetSpecies::GlitchFox => {
            let tool = if chance(source, GLITCH_FOX_WATERING_CAN_CHANCE) {
                ToolKind::WateringCan
            } else {
                ToolKind::SizeBonus
            };
            ledger.credit_saturating(Holding::Tool(tool), 1);
            Some(AbilityEffect::FoundTool(tool))
        }
        PetSpecies::Chicken => None,
    };
    let event = effect.map(|effect| AbilityEvent {
        source: AbilitySource::Pet(species),
        effect,
    });
    match &event {
        Some(event) => debug!(%species, effect = ?event.effect, "Active ability fired"),
        None => debug!(%species, "Active ability fizzled"),
    }
    Ok(event)
}

fn fox(ledger: &mut Ledger, source: &mut dyn RandomSource) -> AbilityEffect {
    let table = SeedType::ALL.map(|seed| (seed, seed.definition().fox_weight));
    let seed = weighted_choice(source, &table).unwrap_or(SeedType::Mango);
    if chance(source, FOX_SUPER_DUPER_SPEED_CHANCE) {
        ledger.credit_saturating(Holding::Tool(ToolKind::SuperDuperSpeed), 1);
        return AbilityEffect::FoundTool(ToolKind::SuperDuperSpeed);
    }
    ledger.credit_saturating(Holding::Seed(seed), 1);
    AbilityEffect::FoundSeed(seed)
}

fn racoon(ledger: &mut Ledger, source: &mut dyn RandomSource) -> Option<AbilityEffect> {
    let candidates: Vec<SeedType> = SeedType::ALL
        .into_iter()
        .filter(|seed| !seed.definition().single_harvest)
        .collect();
    let &seed = pick(source, &candidates)?;
    ledger.credit_saturating(Holding::Fruit(FruitGrade::Infected, seed), 1);
    Some(AbilityEffect::StoleFruit(seed))
}

fn griffin(garden: &mut Garden, source: &mut dyn RandomSource) -> Result<Option<AbilityEffect>, PetError> {
    let Some(id) = garden.pick_plot(source, Plot::is_ready) else {
        return Ok(None);
    };
    let mutation = if chance(source, GRIFFIN_ASCENDED_CHANCE) {
        MutationType::Ascended
    } else {
        MutationType::Windy
    };
    if apply_mutation(garden.plot_mut(id)?, mutation) {
        Ok(Some(AbilityEffect::Mutated { plot: id, mutation }))
    } else {
        Ok(None)
    }
}

/// Tag one planted plot that lacks `mutation`.
fn mutate_one(
    garden: &mut Garden,
    source: &mut dyn RandomSource,
    mutation: MutationType,
) -> Result<Option<AbilityEffect>, PetError> {
    let Some(id) = garden.pick_plot(source, |plot| lacks(plot, mutation)) else {
        return Ok(None);
    };
    apply_mutation(garden.plot_mut(id)?, mutation);
    Ok(Some(AbilityEffect::Mutated { plot: id, mutation }))
}

fn lacks(plot: &Plot, mutation: MutationType) -> bool {
    !plot.is_empty() && !plot.mutations.contains(&mutation)
}

// ---------------------------------------------------------------------------
// Passive abilities
// ---------------------------------------------------------------------------

/// Fire the gold or diamond passive once.
///
/// The 98% roll is only drawn when some plot is eligible.
pub fn fire_tier_passive(
    tier: PetTier,
    garden: &mut Garden,
    source: &mut dyn RandomSource,
) -> Result<Option<AbilityEvent>, PetError> {
    let mutation = match tier {
        PetTier::Gold => MutationType::Gold,
        PetTier::Diamond => MutationType::Diamond,
        PetTier::Rainbow => return Ok(None),
    };
    if garden.eligible(|plot| lacks(plot, mutation)).is_empty() {
        return Ok(None);
    }
    if !chance(source, TIER_PASSIVE_CHANCE) {
        return Ok(None);
    }
    let effect = mutate_one(garden, source, mutation)?;
    Ok(effect.map(|effect| AbilityEvent {
        source: AbilitySource::Tier(tier),
        effect,
    }))
}

/// Fire the rainbow passive for one equipped rainbow pet.
///
/// Two independent 1% rolls: gold on a planted plot lacking it, then a
/// boost on a ready unboosted plot.
pub fn fire_rainbow_passive(
    garden: &mut Garden,
    source: &mut dyn RandomSource,
) -> Result<Vec<AbilityEvent>, PetError> {
    let origin = AbilitySource::Tier(PetTier::Rainbow);
    let mut events = Vec::new();
    if chance(source, RAINBOW_PASSIVE_CHANCE) {
        if let Some(effect) = mutate_one(garden, source, MutationType::Gold)? {
            events.push(AbilityEvent {
                source: origin,
                effect,
            });
        }
    }
    if chance(source, RAINBOW_PASSIVE_CHANCE) {
        if let Some(id) = garden.pick_plot(source, |plot| plot.is_ready() && !plot.boosted) {
            growth::boost(garden.plot_mut(id)?)?;
            events.push(AbilityEvent {
                source: origin,
                effect: AbilityEffect::Boosted(id),
            });
        }
    }
    Ok(events)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tanaman_types::{EpochMillis, PlotStatus};
    use tanaman_world::ScriptedRandom;

    use super::*;

    fn garden_with(statuses: &[PlotStatus]) -> Garden {
        let plots = statuses
            .iter()
            .map(|&status| {
                let mut plot = Plot::empty(PlotId::new(0));
                if status != PlotStatus::Empty {
                    plot.seed_type = Some(SeedType::Mango);
                    plot.status = status;
                    if status.is_timed() {
                        plot.next_phase_at = Some(EpochMillis::new(1_000_000));
                    }
                }
                plot
            })
            .collect();
        Garden::from_parts(plots, 10)
    }

    #[test]
    fn fox_finds_weighted_seed() {
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        // First draw lands in the mango weight band, second misses the 1%.
        let mut source = ScriptedRandom::new([0.0, 0.5]);
        let event = fire_active(PetSpecies::Fox, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(event.effect, AbilityEffect::FoundSeed(SeedType::Mango));
        assert_eq!(ledger.count(Holding::Seed(SeedType::Mango)), 1);
        assert_eq!(source.consumed(), 2);
    }

    #[test]
    fn fox_rarely_finds_super_duper_speed() {
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.3, 0.001]);
        let event = fire_active(PetSpecies::Fox, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(event.effect, AbilityEffect::FoundTool(ToolKind::SuperDuperSpeed));
        assert_eq!(ledger.count(Holding::Tool(ToolKind::SuperDuperSpeed)), 1);
        assert_eq!(ledger.seeds().values().sum::<u32>(), 0);
    }

    #[test]
    fn racoon_never_steals_single_harvest_fruit() {
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.999]);
        let event = fire_active(PetSpecies::Racoon, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(event.effect, AbilityEffect::StoleFruit(SeedType::Jasmine));
        assert_eq!(
            ledger.count(Holding::Fruit(FruitGrade::Infected, SeedType::Jasmine)),
            1
        );
    }

    #[test]
    fn glitch_fox_find_with_full_cans_is_dropped_not_an_error() {
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let cans = Holding::Tool(ToolKind::WateringCan);
        ledger.set_count(cans, u32::MAX);
        let mut source = ScriptedRandom::new([0.1]);
        let event = fire_active(PetSpecies::GlitchFox, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(event.effect, AbilityEffect::FoundTool(ToolKind::WateringCan));
        assert_eq!(ledger.count(cans), u32::MAX);
    }

    #[test]
    fn griffin_needs_a_ready_plot() {
        let mut garden = garden_with(&[PlotStatus::Growing, PlotStatus::Empty]);
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::default();
        let event = fire_active(PetSpecies::Griffin, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(event, None);
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn griffin_blesses_ready_plot() {
        let mut garden = garden_with(&[PlotStatus::Growing, PlotStatus::Ready]);
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.0, 0.5]);
        let event = fire_active(PetSpecies::Griffin, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(
            event.effect,
            AbilityEffect::Mutated {
                plot: PlotId::new(1),
                mutation: MutationType::Windy,
            }
        );
        assert!(garden.plots()[1].mutations.contains(&MutationType::Windy));
    }

    #[test]
    fn griffin_fizzles_on_duplicate_tag() {
        let mut garden = garden_with(&[PlotStatus::Ready]);
        garden.plot_mut(PlotId::new(0)).unwrap().mutations.insert(MutationType::Windy);
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.0, 0.5]);
        let event = fire_active(PetSpecies::Griffin, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(event, None);
    }

    #[test]
    fn glitch_rolls_before_picking() {
        let mut garden = garden_with(&[PlotStatus::Growing]);
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.5]);
        let event = fire_active(PetSpecies::Glitch, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(event, None);
        assert_eq!(source.consumed(), 1);

        let mut source = ScriptedRandom::new([0.1, 0.0]);
        let event = fire_active(PetSpecies::Glitch, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(
            event.notice().text,
            "Glitch Pet gave plot #0 the glitch mutation!"
        );
    }

    #[test]
    fn ulat_skips_plots_already_itching() {
        let mut garden = garden_with(&[PlotStatus::Growing, PlotStatus::Fruiting]);
        garden.plot_mut(PlotId::new(0)).unwrap().mutations.insert(MutationType::Gatal);
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.0]);
        let event = fire_active(PetSpecies::Ulat, &mut garden, &mut ledger, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(
            event.effect,
            AbilityEffect::Mutated {
                plot: PlotId::new(1),
                mutation: MutationType::Gatal,
            }
        );
    }

    #[test]
    fn glitch_fox_finds_tools() {
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::new([0.1, 0.9]);
        fire_active(PetSpecies::GlitchFox, &mut garden, &mut ledger, &mut source).unwrap();
        fire_active(PetSpecies::GlitchFox, &mut garden, &mut ledger, &mut source).unwrap();
        assert_eq!(ledger.count(Holding::Tool(ToolKind::WateringCan)), 1);
        assert_eq!(ledger.count(Holding::Tool(ToolKind::SizeBonus)), 1);
    }

    #[test]
    fn chicken_has_no_active_ability() {
        let mut garden = Garden::new();
        let mut ledger = Ledger::empty();
        let mut source = ScriptedRandom::default();
        assert_eq!(
            fire_active(PetSpecies::Chicken, &mut garden, &mut ledger, &mut source).unwrap(),
            None
        );
    }

    #[test]
    fn gold_passive_draws_only_when_eligible() {
        let mut garden = garden_with(&[PlotStatus::Empty]);
        let mut source = ScriptedRandom::default();
        assert_eq!(fire_tier_passive(PetTier::Gold, &mut garden, &mut source).unwrap(), None);
        assert_eq!(source.consumed(), 0);

        let mut garden = garden_with(&[PlotStatus::Growing]);
        let mut source = ScriptedRandom::new([0.5, 0.0]);
        let event = fire_tier_passive(PetTier::Diamond, &mut garden, &mut source)
            .unwrap()
            .unwrap();
        assert_eq!(event.source, AbilitySource::Tier(PetTier::Diamond));
        assert!(garden.plots()[0].mutations.contains(&MutationType::Diamond));
    }

    #[test]
    fn rainbow_passive_can_gild_and_boost() {
        let mut garden = garden_with(&[PlotStatus::Ready]);
        let mut source = ScriptedRandom::new([0.001, 0.0, 0.001, 0.0]);
        let events = fire_rainbow_passive(&mut garden, &mut source).unwrap();
        assert_eq!(events.len(), 2);
        let plot = &garden.plots()[0];
        assert!(plot.mutations.contains(&MutationType::Gold));
        assert!(plot.boosted);
        assert_eq!(events[1].notice().text, "Rainbow pet boosted plot #0!");
    }

    #[test]
    fn rainbow_passive_usually_does_nothing() {
        let mut garden = garden_with(&[PlotStatus::Ready]);
        let mut source = ScriptedRandom::new([0.5, 0.5]);
        assert!(fire_rainbow_passive(&mut garden, &mut source).unwrap().is_empty());
        assert_eq!(source.consumed(), 2);
    }
}
