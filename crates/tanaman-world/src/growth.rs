//! Plot growth engine: phase deadlines, transitions and timer tools.
//!
//! A planted plot moves `growing -> fruiting -> ready`, or straight from
//! `growing` to `ready` for single-harvest seeds. Each timed phase has an
//! absolute deadline; [`advance`] catches a plot up to any instant, so the
//! same function serves the live tick and offline reconciliation.
//!
//! Durations scale by two factors bundled in [`PhaseFactors`]: the growth
//! multiplier from equipped pets ([`growth_multiplier`]) and the weather
//! multiplier at the moment a phase is entered ([`weather_multiplier`]).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use tanaman_types::catalog::{CHICKEN_GROWTH_FACTOR, RAINBOW_GROWTH_FACTOR, SUNNY_GROWTH_FACTOR};
use tanaman_types::{EpochMillis, PlantVariant, Plot, PlotStatus, SeedType, Weather};

use crate::error::GardenError;

// ---------------------------------------------------------------------------
// Multipliers
// ---------------------------------------------------------------------------

/// Phase duration multiplier from equipped pets:
/// `0.7^chickens * 0.5^rainbow_pets`.
pub fn growth_multiplier(chickens: u32, rainbow_pets: u32) -> Decimal {
    let mut multiplier = Decimal::ONE;
    for _ in 0..chickens {
        multiplier = multiplier.checked_mul(CHICKEN_GROWTH_FACTOR).unwrap_or(multiplier);
    }
    for _ in 0..rainbow_pets {
        multiplier = multiplier.checked_mul(RAINBOW_GROWTH_FACTOR).unwrap_or(multiplier);
    }
    multiplier
}

/// Phase duration multiplier for the given weather.
pub const fn weather_multiplier(weather: Weather) -> Decimal {
    match weather {
        Weather::Sunny => SUNNY_GROWTH_FACTOR,
        Weather::Rainy | Weather::Cloudy => Decimal::ONE,
    }
}

/// Multipliers applied to a phase at the moment it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseFactors {
    /// Pet growth multiplier.
    pub growth: Decimal,
    /// Weather multiplier.
    pub weather: Decimal,
}

impl PhaseFactors {
    /// Combine a growth multiplier with the current weather.
    pub const fn new(growth: Decimal, weather: Weather) -> Self {
        Self {
            growth,
            weather: weather_multiplier(weather),
        }
    }

    /// Growth multiplier only; used for offline catch-up.
    pub const fn without_weather(growth: Decimal) -> Self {
        Self {
            growth,
            weather: Decimal::ONE,
        }
    }

    /// Scaled length of a phase in whole milliseconds.
    ///
    /// Returns `None` on overflow.
    pub fn phase_millis(self, seconds: u32) -> Option<i64> {
        Decimal::from(seconds)
            .checked_mul(self.growth)?
            .checked_mul(self.weather)?
            .checked_mul(Decimal::ONE_THOUSAND)?
            .round()
            .to_i64()
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Advance a plot through every phase whose deadline is at or before `now`.
///
/// The fruiting deadline is chained from the growing deadline, not from
/// `now`, so a long absence is caught up exactly. Returns whether the plot
/// changed.
pub fn advance(plot: &mut Plot, now: EpochMillis, factors: PhaseFactors) -> Result<bool, GardenError> {
    let mut changed = false;
    while let Some(deadline) = plot.next_phase_at {
        if deadline > now {
            break;
        }
        match plot.status {
            PlotStatus::Growing => {
                let seed = planted_seed(plot)?;
                let definition = seed.definition();
                if definition.single_harvest {
                    mark_ready(plot);
                } else {
                    let millis = factors
                        .phase_millis(definition.fruit_grow_seconds)
                        .ok_or(GardenError::ArithmeticOverflow)?;
                    let next = deadline
                        .checked_add_millis(millis)
                        .ok_or(GardenError::ArithmeticOverflow)?;
                    plot.status = PlotStatus::Fruiting;
                    plot.next_phase_at = Some(next);
                }
            }
            PlotStatus::Fruiting => mark_ready(plot),
            PlotStatus::Empty | PlotStatus::Ready => {
                plot.next_phase_at = None;
                break;
            }
        }
        changed = true;
        debug!(plot_id = %plot.id, status = ?plot.status, "Plot advanced");
    }
    Ok(changed)
}

/// Plant a seed on an empty plot.
pub fn plant(
    plot: &mut Plot,
    seed: SeedType,
    variant: PlantVariant,
    now: EpochMillis,
    factors: PhaseFactors,
) -> Result<(), GardenError> {
    if !plot.is_empty() {
        return Err(GardenError::PlotOccupied(plot.id));
    }
    let millis = factors
        .phase_millis(seed.definition().plant_grow_seconds)
        .ok_or(GardenError::ArithmeticOverflow)?;
    let deadline = now
        .checked_add_millis(millis)
        .ok_or(GardenError::ArithmeticOverflow)?;
    plot.seed_type = Some(seed);
    plot.planted_at = Some(now);
    plot.next_phase_at = Some(deadline);
    plot.status = PlotStatus::Growing;
    plot.variant = variant;
    plot.boosted = false;
    plot.mutations.clear();
    Ok(())
}

/// Reset a plot after its fruit was collected.
///
/// Single-harvest plants leave the plot empty; everything else re-enters
/// the fruiting phase with boost, variant and mutations cleared.
pub fn regrow_after_harvest(
    plot: &mut Plot,
    now: EpochMillis,
    factors: PhaseFactors,
) -> Result<(), GardenError> {
    if !plot.is_ready() {
        return Err(GardenError::NotReady {
            plot: plot.id,
            status: plot.status,
        });
    }
    let definition = planted_seed(plot)?.definition();
    if definition.single_harvest {
        plot.clear();
        return Ok(());
    }
    let millis = factors
        .phase_millis(definition.fruit_grow_seconds)
        .ok_or(GardenError::ArithmeticOverflow)?;
    let deadline = now
        .checked_add_millis(millis)
        .ok_or(GardenError::ArithmeticOverflow)?;
    plot.status = PlotStatus::Fruiting;
    plot.next_phase_at = Some(deadline);
    plot.boosted = false;
    plot.variant = PlantVariant::Normal;
    plot.mutations.clear();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Halve the time left in the current phase.
pub fn water(plot: &mut Plot, now: EpochMillis) -> Result<(), GardenError> {
    let deadline = timed_deadline(plot)?;
    let remaining = now
        .millis_until(deadline)
        .ok_or(GardenError::ArithmeticOverflow)?
        .max(0);
    let halved = remaining.checked_div(2).ok_or(GardenError::ArithmeticOverflow)?;
    let next = now
        .checked_add_millis(halved)
        .ok_or(GardenError::ArithmeticOverflow)?;
    plot.next_phase_at = Some(next);
    Ok(())
}

/// Make a growing or fruiting plant ready immediately, with the rainbow
/// variant.
pub fn insta_grow(plot: &mut Plot) -> Result<(), GardenError> {
    timed_deadline(plot)?;
    mark_ready(plot);
    plot.variant = PlantVariant::Rainbow;
    plot.boosted = false;
    Ok(())
}

/// Apply a size bonus to ready fruit.
pub fn boost(plot: &mut Plot) -> Result<(), GardenError> {
    if !plot.is_ready() {
        return Err(GardenError::NotReady {
            plot: plot.id,
            status: plot.status,
        });
    }
    if plot.boosted {
        return Err(GardenError::AlreadyBoosted(plot.id));
    }
    plot.boosted = true;
    Ok(())
}

/// Dig up whatever is planted.
pub fn shovel(plot: &mut Plot) -> Result<(), GardenError> {
    if plot.is_empty() {
        return Err(GardenError::PlotEmpty(plot.id));
    }
    plot.clear();
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn planted_seed(plot: &Plot) -> Result<SeedType, GardenError> {
    plot.seed_type.ok_or(GardenError::PlotEmpty(plot.id))
}

fn timed_deadline(plot: &Plot) -> Result<EpochMillis, GardenError> {
    match (plot.status.is_timed(), plot.next_phase_at) {
        (true, Some(deadline)) => Ok(deadline),
        _ => Err(GardenError::NotGrowing {
            plot: plot.id,
            status: plot.status,
        }),
    }
}

fn mark_ready(plot: &mut Plot) {
    plot.status = PlotStatus::Ready;
    plot.next_phase_at = None;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use tanaman_types::PlotId;

    use super::*;

    const T0: EpochMillis = EpochMillis::new(1_000_000);

    fn at(seconds: i64) -> EpochMillis {
        T0.checked_add_millis(seconds * 1000).unwrap()
    }

    fn neutral() -> PhaseFactors {
        PhaseFactors::new(Decimal::ONE, Weather::Cloudy)
    }

    fn planted(seed: SeedType) -> Plot {
        let mut plot = Plot::empty(PlotId::new(0));
        plant(&mut plot, seed, PlantVariant::Normal, T0, neutral()).unwrap();
        plot
    }

    #[test]
    fn growth_multiplier_compounds() {
        assert_eq!(growth_multiplier(0, 0), dec!(1));
        assert_eq!(growth_multiplier(1, 0), dec!(0.7));
        assert_eq!(growth_multiplier(2, 0), dec!(0.49));
        assert_eq!(growth_multiplier(2, 1), dec!(0.245));
        assert_eq!(growth_multiplier(0, 3), dec!(0.125));
    }

    #[test]
    fn sunny_weather_shortens_phases() {
        let factors = PhaseFactors::new(dec!(0.7), Weather::Sunny);
        assert_eq!(factors.phase_millis(20), Some(11_200));
        assert_eq!(neutral().phase_millis(20), Some(20_000));
    }

    #[test]
    fn plant_sets_growing_deadline() {
        let mut plot = Plot::empty(PlotId::new(0));
        let factors = PhaseFactors::new(dec!(0.7), Weather::Cloudy);
        plant(&mut plot, SeedType::Mango, PlantVariant::Gold, T0, factors).unwrap();
        assert_eq!(plot.status, PlotStatus::Growing);
        assert_eq!(plot.next_phase_at, Some(at(14)));
        assert_eq!(plot.planted_at, Some(T0));
        assert_eq!(plot.variant, PlantVariant::Gold);
        assert!(plot.is_consistent());
    }

    #[test]
    fn plant_rejects_occupied_plot() {
        let mut plot = planted(SeedType::Mango);
        let before = plot.clone();
        let err = plant(&mut plot, SeedType::Cacao, PlantVariant::Normal, T0, neutral());
        assert_eq!(err, Err(GardenError::PlotOccupied(PlotId::new(0))));
        assert_eq!(plot, before);
    }

    #[test]
    fn advance_before_deadline_is_a_no_op() {
        let mut plot = planted(SeedType::Mango);
        assert!(!advance(&mut plot, at(19), neutral()).unwrap());
        assert_eq!(plot.status, PlotStatus::Growing);
    }

    #[test]
    fn fruiting_deadline_chains_from_growing_deadline() {
        let mut plot = planted(SeedType::Mango);
        assert!(advance(&mut plot, at(100), neutral()).unwrap());
        assert_eq!(plot.status, PlotStatus::Fruiting);
        assert_eq!(plot.next_phase_at, Some(at(140)));
    }

    #[test]
    fn long_gap_reaches_ready() {
        let mut plot = planted(SeedType::Mango);
        assert!(advance(&mut plot, at(500), neutral()).unwrap());
        assert_eq!(plot.status, PlotStatus::Ready);
        assert_eq!(plot.next_phase_at, None);
        assert!(plot.is_consistent());
    }

    #[test]
    fn ready_exactly_at_boundary() {
        let mut plot = planted(SeedType::Mango);
        advance(&mut plot, at(140), neutral()).unwrap();
        assert_eq!(plot.status, PlotStatus::Ready);
    }

    #[test]
    fn single_harvest_skips_fruiting() {
        let mut plot = planted(SeedType::Bamboo);
        advance(&mut plot, at(240), neutral()).unwrap();
        assert_eq!(plot.status, PlotStatus::Ready);
        assert_eq!(plot.next_phase_at, None);
    }

    #[test]
    fn watering_halves_remaining_time() {
        let mut plot = planted(SeedType::Cacao);
        water(&mut plot, at(20)).unwrap();
        assert_eq!(plot.next_phase_at, Some(at(40)));
    }

    #[test]
    fn watering_needs_a_timed_phase() {
        let mut plot = Plot::empty(PlotId::new(0));
        assert!(matches!(water(&mut plot, T0), Err(GardenError::NotGrowing { .. })));
    }

    #[test]
    fn insta_grow_forces_rainbow_ready() {
        let mut plot = planted(SeedType::Grape);
        insta_grow(&mut plot).unwrap();
        assert_eq!(plot.status, PlotStatus::Ready);
        assert_eq!(plot.variant, PlantVariant::Rainbow);
        assert_eq!(plot.next_phase_at, None);
        assert!(insta_grow(&mut plot).is_err());
    }

    #[test]
    fn boost_only_once_and_only_when_ready() {
        let mut plot = planted(SeedType::Mango);
        assert!(boost(&mut plot).is_err());
        advance(&mut plot, at(500), neutral()).unwrap();
        boost(&mut plot).unwrap();
        assert!(plot.boosted);
        assert_eq!(boost(&mut plot), Err(GardenError::AlreadyBoosted(PlotId::new(0))));
    }

    #[test]
    fn regrow_resets_rewards_and_reenters_fruiting() {
        let mut plot = planted(SeedType::Mango);
        advance(&mut plot, at(500), neutral()).unwrap();
        plot.boosted = true;
        plot.variant = PlantVariant::Gold;
        plot.mutations.insert(tanaman_types::MutationType::Windy);
        regrow_after_harvest(&mut plot, at(600), neutral()).unwrap();
        assert_eq!(plot.status, PlotStatus::Fruiting);
        assert_eq!(plot.next_phase_at, Some(at(720)));
        assert!(!plot.boosted);
        assert_eq!(plot.variant, PlantVariant::Normal);
        assert!(plot.mutations.is_empty());
    }

    #[test]
    fn regrow_under_sun_applies_weather_and_multiplier() {
        let mut plot = planted(SeedType::Mango);
        advance(&mut plot, at(500), neutral()).unwrap();
        let factors = PhaseFactors::new(dec!(0.7), Weather::Sunny);
        regrow_after_harvest(&mut plot, at(600), factors).unwrap();
        assert_eq!(plot.next_phase_at, at(600).checked_add_millis(67_200));
    }

    #[test]
    fn regrow_clears_single_harvest_plot() {
        let mut plot = planted(SeedType::Beanstalk);
        advance(&mut plot, at(600), neutral()).unwrap();
        regrow_after_harvest(&mut plot, at(600), neutral()).unwrap();
        assert_eq!(plot, Plot::empty(PlotId::new(0)));
    }

    #[test]
    fn shovel_clears_any_planted_plot() {
        let mut plot = planted(SeedType::Apple);
        shovel(&mut plot).unwrap();
        assert!(plot.is_empty());
        assert_eq!(shovel(&mut plot), Err(GardenError::PlotEmpty(PlotId::new(0))));
    }
}
