//! Variant rolls, mutation tags and harvest pricing.

use tanaman_types::catalog::{BONUS_FRUIT_MULTIPLIER, INFECTED_FRUIT_MULTIPLIER};
use tanaman_types::{FruitGrade, MutationType, PlantVariant, Plot, SeedType};

use crate::error::GardenError;
use crate::random::{RandomSource, uniform_inclusive};

/// Draws below this roll the rainbow variant.
pub const RAINBOW_VARIANT_BELOW: f64 = 0.002;

/// Draws below this (and not rainbow) roll the gold variant.
pub const GOLD_VARIANT_BELOW: f64 = 0.202;

/// Roll the cosmetic variant for a newly planted seed. One draw.
pub fn roll_variant(source: &mut dyn RandomSource) -> PlantVariant {
    let draw = source.next_unit();
    if draw < RAINBOW_VARIANT_BELOW {
        PlantVariant::Rainbow
    } else if draw < GOLD_VARIANT_BELOW {
        PlantVariant::Gold
    } else {
        PlantVariant::Normal
    }
}

/// Add a mutation tag to a planted plot.
///
/// Returns `false` (and leaves the plot alone) if the plot is empty or
/// already carries the tag.
pub fn apply_mutation(plot: &mut Plot, tag: MutationType) -> bool {
    if plot.is_empty() {
        return false;
    }
    plot.mutations.insert(tag)
}

/// Product of the price multipliers of every tag on a plot.
///
/// Returns `None` on overflow.
pub fn mutation_multiplier(plot: &Plot) -> Option<u64> {
    plot.mutations
        .iter()
        .try_fold(1_u64, |acc, tag| acc.checked_mul(tag.price_multiplier()))
}

/// What harvesting a ready plot yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestYield {
    /// Mutated fruit sells on the spot.
    Money {
        /// The harvested seed.
        seed: SeedType,
        /// Money credited.
        amount: u64,
    },
    /// Boosted or variant fruit becomes bonus fruit.
    BonusFruit {
        /// The harvested seed.
        seed: SeedType,
        /// Number of bonus fruit.
        count: u32,
    },
    /// A single ordinary fruit.
    PlainFruit {
        /// The harvested seed.
        seed: SeedType,
    },
}

/// Resolve the harvest of a ready plot.
///
/// Priority is strict: mutations pay money, then a boost pays two bonus
/// fruit, then a non-normal variant pays one bonus fruit, otherwise one
/// plain fruit. Only the money branch draws.
pub fn price_harvest(plot: &Plot, source: &mut dyn RandomSource) -> Result<HarvestYield, GardenError> {
    let seed = match (plot.is_ready(), plot.seed_type) {
        (true, Some(seed)) => seed,
        _ => {
            return Err(GardenError::NotReady {
                plot: plot.id,
                status: plot.status,
            });
        }
    };
    if !plot.mutations.is_empty() {
        let multiplier = mutation_multiplier(plot).ok_or(GardenError::ArithmeticOverflow)?;
        let definition = seed.definition();
        let base = uniform_inclusive(source, definition.sell_min, definition.sell_max);
        let amount = u64::from(base)
            .checked_mul(multiplier)
            .ok_or(GardenError::ArithmeticOverflow)?;
        return Ok(HarvestYield::Money { seed, amount });
    }
    if plot.boosted {
        return Ok(HarvestYield::BonusFruit { seed, count: 2 });
    }
    if plot.variant != PlantVariant::Normal {
        return Ok(HarvestYield::BonusFruit { seed, count: 1 });
    }
    Ok(HarvestYield::PlainFruit { seed })
}

/// Sale price of one fruit of the given grade. One draw.
///
/// Returns `None` on overflow.
pub fn sale_price(seed: SeedType, grade: FruitGrade, source: &mut dyn RandomSource) -> Option<u64> {
    let definition = seed.definition();
    let base = u64::from(uniform_inclusive(source, definition.sell_min, definition.sell_max));
    match grade {
        FruitGrade::Plain => Some(base),
        FruitGrade::Bonus => base.checked_mul(BONUS_FRUIT_MULTIPLIER),
        FruitGrade::Infected => base.checked_mul(INFECTED_FRUIT_MULTIPLIER),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tanaman_types::{PlotId, PlotStatus};

    use super::*;
    use crate::random::ScriptedRandom;

    fn ready(seed: SeedType) -> Plot {
        let mut plot = Plot::empty(PlotId::new(1));
        plot.seed_type = Some(seed);
        plot.status = PlotStatus::Ready;
        plot
    }

    #[test]
    fn variant_thresholds() {
        let mut source = ScriptedRandom::new([0.001, 0.002, 0.2, 0.202, 0.9]);
        assert_eq!(roll_variant(&mut source), PlantVariant::Rainbow);
        assert_eq!(roll_variant(&mut source), PlantVariant::Gold);
        assert_eq!(roll_variant(&mut source), PlantVariant::Gold);
        assert_eq!(roll_variant(&mut source), PlantVariant::Normal);
        assert_eq!(roll_variant(&mut source), PlantVariant::Normal);
    }

    #[test]
    fn apply_mutation_is_idempotent() {
        let mut plot = ready(SeedType::Mango);
        assert!(apply_mutation(&mut plot, MutationType::Gold));
        assert!(!apply_mutation(&mut plot, MutationType::Gold));
        assert_eq!(plot.mutations.len(), 1);
    }

    #[test]
    fn apply_mutation_skips_empty_plot() {
        let mut plot = Plot::empty(PlotId::new(0));
        assert!(!apply_mutation(&mut plot, MutationType::Windy));
        assert!(plot.mutations.is_empty());
    }

    #[test]
    fn mutations_take_priority_over_boost_and_variant() {
        let mut plot = ready(SeedType::Mango);
        plot.boosted = true;
        plot.variant = PlantVariant::Rainbow;
        apply_mutation(&mut plot, MutationType::Gold);
        apply_mutation(&mut plot, MutationType::Windy);
        let mut source = ScriptedRandom::new([0.0]);
        let outcome = price_harvest(&plot, &mut source).unwrap();
        assert_eq!(
            outcome,
            HarvestYield::Money {
                seed: SeedType::Mango,
                amount: 20 * 8 * 11,
            }
        );
    }

    #[test]
    fn boost_beats_variant() {
        let mut plot = ready(SeedType::Cacao);
        plot.boosted = true;
        plot.variant = PlantVariant::Gold;
        let mut source = ScriptedRandom::default();
        assert_eq!(
            price_harvest(&plot, &mut source).unwrap(),
            HarvestYield::BonusFruit {
                seed: SeedType::Cacao,
                count: 2,
            }
        );
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn variant_gives_one_bonus_fruit() {
        let mut plot = ready(SeedType::Cacao);
        plot.variant = PlantVariant::Gold;
        let mut source = ScriptedRandom::default();
        assert_eq!(
            price_harvest(&plot, &mut source).unwrap(),
            HarvestYield::BonusFruit {
                seed: SeedType::Cacao,
                count: 1,
            }
        );
    }

    #[test]
    fn plain_plot_gives_plain_fruit() {
        let plot = ready(SeedType::Grape);
        let mut source = ScriptedRandom::default();
        assert_eq!(
            price_harvest(&plot, &mut source).unwrap(),
            HarvestYield::PlainFruit {
                seed: SeedType::Grape,
            }
        );
    }

    #[test]
    fn harvest_requires_ready_plot() {
        let mut plot = ready(SeedType::Grape);
        plot.status = PlotStatus::Fruiting;
        let mut source = ScriptedRandom::default();
        assert!(matches!(
            price_harvest(&plot, &mut source),
            Err(GardenError::NotReady { .. })
        ));
    }

    #[test]
    fn sale_price_scales_by_grade() {
        let mut source = ScriptedRandom::new([0.0, 0.0, 0.0]);
        assert_eq!(sale_price(SeedType::Mango, FruitGrade::Plain, &mut source), Some(20));
        assert_eq!(sale_price(SeedType::Mango, FruitGrade::Bonus, &mut source), Some(100));
        assert_eq!(sale_price(SeedType::Mango, FruitGrade::Infected, &mut source), Some(1600));
    }

    #[test]
    fn full_mutation_stack_fits_in_u64() {
        let mut plot = ready(SeedType::Jasmine);
        for tag in MutationType::ALL {
            apply_mutation(&mut plot, tag);
        }
        let mut source = ScriptedRandom::new([0.999_999]);
        let outcome = price_harvest(&plot, &mut source).unwrap();
        let expected = 2999_u64 * 11 * 54 * 8 * 100 * 250 * 19 * 114;
        assert_eq!(
            outcome,
            HarvestYield::Money {
                seed: SeedType::Jasmine,
                amount: expected,
            }
        );
    }
}
