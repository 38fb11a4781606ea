//! Error types for the `tanaman-world` crate.
//!
//! Messages are phrased for the player: they are shown verbatim when a
//! garden action is rejected.

use tanaman_types::{PlotId, PlotStatus};

/// Errors raised by garden and growth operations.
///
/// Every operation validates before it mutates, so an error means the
/// plot was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GardenError {
    /// No plot with this id exists.
    #[error("plot {0} does not exist")]
    PlotNotFound(PlotId),

    /// The plot already holds a plant.
    #[error("plot {0} is already planted")]
    PlotOccupied(PlotId),

    /// The plot holds no plant.
    #[error("plot {0} is empty")]
    PlotEmpty(PlotId),

    /// The action needs a growing or fruiting plant.
    #[error("plot {plot} is not growing (it is {status:?})")]
    NotGrowing {
        /// The plot.
        plot: PlotId,
        /// Its current phase.
        status: PlotStatus,
    },

    /// The action needs ready fruit.
    #[error("plot {plot} is not ready to harvest (it is {status:?})")]
    NotReady {
        /// The plot.
        plot: PlotId,
        /// Its current phase.
        status: PlotStatus,
    },

    /// The fruit on this plot was already boosted.
    #[error("plot {0} is already boosted")]
    AlreadyBoosted(PlotId),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in garden calculation")]
    ArithmeticOverflow,
}
