//! Core data structs shared across the simulation crates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{MutationType, NoticeLevel, PlantVariant, PlotStatus, SeedType};
use crate::ids::{EpochMillis, PlotId};

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// One garden plot.
///
/// A plot is empty exactly when it holds no seed, and it carries a phase
/// deadline exactly while it is growing or fruiting. Empty plots are never
/// boosted, never carry mutations, and always have the normal variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Plot {
    /// Ordinal position in the garden.
    pub id: PlotId,
    /// The planted seed, if any.
    #[serde(rename = "type", default)]
    pub seed_type: Option<SeedType>,
    /// When the current seed was planted.
    #[serde(default)]
    pub planted_at: Option<EpochMillis>,
    /// Deadline of the current growing or fruiting phase.
    #[serde(default)]
    pub next_phase_at: Option<EpochMillis>,
    /// Lifecycle phase.
    #[serde(default)]
    pub status: PlotStatus,
    /// Whether a size bonus was applied to the ready fruit.
    #[serde(default)]
    pub boosted: bool,
    /// Variant rolled at planting.
    #[serde(default)]
    pub variant: PlantVariant,
    /// Mutation tags applied by pets.
    #[serde(default)]
    pub mutations: BTreeSet<MutationType>,
}

impl Plot {
    /// A fresh empty plot.
    pub const fn empty(id: PlotId) -> Self {
        Self {
            id,
            seed_type: None,
            planted_at: None,
            next_phase_at: None,
            status: PlotStatus::Empty,
            boosted: false,
            variant: PlantVariant::Normal,
            mutations: BTreeSet::new(),
        }
    }

    /// Whether nothing is planted.
    pub const fn is_empty(&self) -> bool {
        matches!(self.status, PlotStatus::Empty)
    }

    /// Whether the fruit can be harvested.
    pub const fn is_ready(&self) -> bool {
        matches!(self.status, PlotStatus::Ready)
    }

    /// Clear everything except the id.
    pub fn clear(&mut self) {
        *self = Self::empty(self.id);
    }

    /// Whether the plot satisfies the status/seed/deadline invariants.
    pub fn is_consistent(&self) -> bool {
        let empty = self.is_empty();
        if empty != self.seed_type.is_none() {
            return false;
        }
        if self.status.is_timed() != self.next_phase_at.is_some() {
            return false;
        }
        !empty
            || (!self.boosted
                && self.mutations.is_empty()
                && matches!(self.variant, PlantVariant::Normal))
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// A short user-facing message produced by an action, ability or admin
/// command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub text: String,
}

impl Notice {
    /// A success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// An error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// An informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}
