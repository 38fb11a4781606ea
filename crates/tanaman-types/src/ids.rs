//! Identifier and timestamp newtypes.
//!
//! Plots are addressed by their ordinal position in the garden, and every
//! absolute time in the simulation is a Unix timestamp in milliseconds.
//! Both are wrapped so they cannot be mixed with counters or prices.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Ordinal identifier of a garden plot.
///
/// Plot ids are assigned sequentially when the garden grows and are never
/// reused, so the id of a plot always equals its index in the garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct PlotId(pub u32);

impl PlotId {
    /// Wrap a raw ordinal.
    pub const fn new(ordinal: u32) -> Self {
        Self(ordinal)
    }

    /// Return the raw ordinal.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for PlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlotId {
    fn from(ordinal: u32) -> Self {
        Self(ordinal)
    }
}

/// A wall-clock instant as milliseconds since the Unix epoch.
///
/// Serialized as a bare integer. Deserialization also accepts fractional
/// numbers, rounded to the nearest millisecond, since browser saves
/// compute deadlines in floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct EpochMillis(#[ts(type = "number")] pub i64);

impl EpochMillis {
    /// Wrap a raw millisecond count.
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Convert a `chrono` UTC instant.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// Round a fractional millisecond count to the nearest millisecond.
    ///
    /// Returns `None` for NaN, infinities and out-of-range values.
    pub fn from_fractional(millis: f64) -> Option<Self> {
        Decimal::from_f64(millis)?.round().to_i64().map(Self)
    }

    /// Return the raw millisecond count.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Shift this instant forward (or backward, for negative input).
    ///
    /// Returns `None` on overflow.
    pub const fn checked_add_millis(self, millis: i64) -> Option<Self> {
        match self.0.checked_add(millis) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Milliseconds from `self` until `later`; negative if `later` is earlier.
    ///
    /// Returns `None` on overflow.
    pub const fn millis_until(self, later: Self) -> Option<i64> {
        later.0.checked_sub(self.0)
    }
}

impl core::fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl<'de> Deserialize<'de> for EpochMillis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EpochMillisVisitor)
    }
}

struct EpochMillisVisitor;

impl Visitor<'_> for EpochMillisVisitor {
    type Value = EpochMillis;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a Unix timestamp in milliseconds")
    }

    fn visit_i64<E: de::Error>(self, millis: i64) -> Result<Self::Value, E> {
        Ok(EpochMillis(millis))
    }

    fn visit_u64<E: de::Error>(self, millis: u64) -> Result<Self::Value, E> {
        i64::try_from(millis)
            .ok()
            .map(EpochMillis)
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(millis), &self))
    }

    fn visit_f64<E: de::Error>(self, millis: f64) -> Result<Self::Value, E> {
        EpochMillis::from_fractional(millis)
            .ok_or_else(|| E::invalid_value(Unexpected::Float(millis), &self))
    }
}
