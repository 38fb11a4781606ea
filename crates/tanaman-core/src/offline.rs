//! Offline catch-up.
//!
//! Plots keep growing while the game is closed. On load every plot is
//! advanced to the present with the restored growth multiplier and neutral
//! weather. Pets do not act retroactively.

use tracing::info;

use tanaman_types::{EpochMillis, Notice};
use tanaman_world::{GardenError, PhaseFactors};

use crate::state::GameState;

/// Outcome of an offline catch-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfflineReport {
    /// Milliseconds since the last save. Zero if the clock went backwards.
    pub elapsed_ms: i64,
    /// Whether the gap exceeded the long-absence threshold.
    pub long_absence: bool,
    /// Plots that changed phase.
    pub plots_advanced: u32,
}

impl OfflineReport {
    /// The "welcome back" notice, shown only after a long absence in
    /// which something grew.
    pub fn notice(&self) -> Option<Notice> {
        if !self.long_absence || self.plots_advanced == 0 {
            return None;
        }
        let minutes = self.elapsed_ms.checked_div(60_000).unwrap_or(0);
        Some(Notice::info(format!(
            "Welcome back! While you were away (~{minutes} minutes): your plants grew."
        )))
    }
}

/// Advance the garden from `last_save` to `now`.
pub fn reconcile(
    state: &mut GameState,
    last_save: EpochMillis,
    now: EpochMillis,
    threshold_ms: i64,
) -> Result<OfflineReport, GardenError> {
    let elapsed_ms = last_save.millis_until(now).unwrap_or(0).max(0);
    let factors = PhaseFactors::without_weather(state.growth_multiplier());
    let plots_advanced = state.garden.advance_all(now, factors)?;
    let long_absence = elapsed_ms > threshold_ms;
    if long_absence {
        info!(elapsed_ms, plots_advanced, "Caught up after long absence");
    }
    Ok(OfflineReport {
        elapsed_ms,
        long_absence,
        plots_advanced,
    })
}
