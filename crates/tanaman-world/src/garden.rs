//! The garden: an ordered collection of plots plus the upgrade price.

use tracing::{debug, info};

use tanaman_types::catalog::{INITIAL_PLOTS, INITIAL_UPGRADE_COST, UPGRADE_COST_STEP};
use tanaman_types::{EpochMillis, Plot, PlotId};

use crate::error::GardenError;
use crate::growth::{self, PhaseFactors};
use crate::random::{RandomSource, pick};

/// Ordered plots. A plot's id always equals its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Garden {
    plots: Vec<Plot>,
    upgrade_cost: u64,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new()
    }
}

impl Garden {
    /// A starting garden of empty plots.
    pub fn new() -> Self {
        Self {
            plots: (0..INITIAL_PLOTS).map(|i| Plot::empty(PlotId::new(i))).collect(),
            upgrade_cost: INITIAL_UPGRADE_COST,
        }
    }

    /// Rebuild a garden from restored plots.
    ///
    /// Ids are renumbered to match positions.
    pub fn from_parts(plots: Vec<Plot>, upgrade_cost: u64) -> Self {
        let plots = plots
            .into_iter()
            .zip(0_u32..)
            .map(|(mut plot, ordinal)| {
                plot.id = PlotId::new(ordinal);
                plot
            })
            .collect();
        Self {
            plots,
            upgrade_cost,
        }
    }

    /// All plots in order.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Number of plots.
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    /// Whether the garden has no plots.
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Price of the next upgrade.
    pub const fn upgrade_cost(&self) -> u64 {
        self.upgrade_cost
    }

    /// Look up a plot.
    pub fn plot(&self, id: PlotId) -> Result<&Plot, GardenError> {
        self.plots
            .iter()
            .find(|plot| plot.id == id)
            .ok_or(GardenError::PlotNotFound(id))
    }

    /// Look up a plot mutably.
    pub fn plot_mut(&mut self, id: PlotId) -> Result<&mut Plot, GardenError> {
        self.plots
            .iter_mut()
            .find(|plot| plot.id == id)
            .ok_or(GardenError::PlotNotFound(id))
    }

    /// Append one empty plot and raise the upgrade price.
    ///
    /// Payment is the caller's concern.
    pub fn expand(&mut self) -> Result<PlotId, GardenError> {
        let ordinal = u32::try_from(self.plots.len())
            .map_err(|_overflow| GardenError::ArithmeticOverflow)?;
        let next_cost = self
            .upgrade_cost
            .checked_add(UPGRADE_COST_STEP)
            .ok_or(GardenError::ArithmeticOverflow)?;
        let id = PlotId::new(ordinal);
        self.plots.push(Plot::empty(id));
        self.upgrade_cost = next_cost;
        info!(plot_id = %id, next_cost, "Garden expanded");
        Ok(id)
    }

    /// Catch every plot up to `now`. Returns how many plots changed.
    pub fn advance_all(&mut self, now: EpochMillis, factors: PhaseFactors) -> Result<u32, GardenError> {
        let mut changed: u32 = 0;
        for plot in &mut self.plots {
            if growth::advance(plot, now, factors)? {
                changed = changed.saturating_add(1);
            }
        }
        if changed > 0 {
            debug!(changed, "Plots advanced");
        }
        Ok(changed)
    }

    /// Ids of plots matching a predicate.
    pub fn eligible(&self, predicate: impl Fn(&Plot) -> bool) -> Vec<PlotId> {
        self.plots
            .iter()
            .filter(|plot| predicate(*plot))
            .map(|plot| plot.id)
            .collect()
    }

    /// Pick one matching plot uniformly. Draws nothing if none match.
    pub fn pick_plot(
        &self,
        source: &mut dyn RandomSource,
        predicate: impl Fn(&Plot) -> bool,
    ) -> Option<PlotId> {
        pick(source, &self.eligible(predicate)).copied()
    }
}
