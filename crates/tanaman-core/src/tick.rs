//! One-second game tick.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Clock** -- bump the session tick counter.
//! 2. **Cycle** -- every [`SHOP_CYCLE_TICKS`] ticks, roll the weather (rain
//!    hands out a watering can) and restock both shops.
//! 3. **Growth** -- advance every plot whose phase deadline has passed.
//! 4. **Pets** -- count down active cooldowns and fire abilities, then the
//!    gold, diamond and rainbow passive tracks.
//! 5. **Aging** -- every [`AGING_INTERVAL_TICKS`] ticks, owned pets age.
//! 6. **Machine** -- complete the mutation machine run if it is due.
//!
//! The tick is deterministic given the state, `now` and the random draws.

use tracing::{debug, info};

use tanaman_ledger::Holding;
use tanaman_pets::PetError;
use tanaman_types::catalog::{AGING_INTERVAL_TICKS, SHOP_CYCLE_TICKS};
use tanaman_types::{EpochMillis, Notice, ToolKind, Weather};
use tanaman_world::GardenError;
use tanaman_world::random::RandomSource;

use crate::state::GameState;

/// Errors that can occur during tick execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    /// A plot could not be advanced.
    #[error("garden error: {source}")]
    Garden {
        /// The underlying garden error.
        #[from]
        source: GardenError,
    },

    /// A pet ability failed.
    #[error("pet error: {source}")]
    Pet {
        /// The underlying pet error.
        #[from]
        source: PetError,
    },

    /// The tick counter overflowed.
    #[error("tick counter overflow")]
    TickOverflow,
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// The weather after this tick.
    pub weather: Weather,
    /// Number of plots that changed phase.
    pub plots_advanced: u32,
    /// Whether the shops restocked this tick.
    pub restocked: bool,
    /// User-facing notices, in the order they happened.
    pub notices: Vec<Notice>,
}

/// Run one tick against the state.
pub fn run_tick(
    state: &mut GameState,
    now: EpochMillis,
    source: &mut dyn RandomSource,
) -> Result<TickSummary, TickError> {
    let tick = state.tick.checked_add(1).ok_or(TickError::TickOverflow)?;
    state.tick = tick;
    let mut notices = Vec::new();

    let restocked = tick.checked_rem(SHOP_CYCLE_TICKS) == Some(0);
    if restocked {
        let change = state.weather.change(source);
        if change.grants_watering_can
            && state.ledger.credit_saturating(Holding::Tool(ToolKind::WateringCan), 1) > 0
        {
            notices.push(Notice::info("It's raining! You got a free Watering Can."));
        }
        state.shop.restock(source);
        info!(tick, weather = ?change.current, "Shops restocked");
    }

    let factors = state.phase_factors();
    let plots_advanced = state.garden.advance_all(now, factors)?;

    let events = state.scheduler.tick(
        &state.roster,
        &mut state.garden,
        &mut state.ledger,
        source,
    )?;
    notices.extend(events.iter().map(tanaman_pets::AbilityEvent::notice));

    if tick.checked_rem(AGING_INTERVAL_TICKS) == Some(0) {
        state.roster.age_all();
    }

    if let Some(outcome) = state.machine.poll(&mut state.roster, now, source) {
        notices.push(outcome.notice());
    }

    debug!(tick, plots_advanced, notices = notices.len(), "Tick complete");
    Ok(TickSummary {
        tick,
        weather: state.weather.current(),
        plots_advanced,
        restocked,
        notices,
    })
}
