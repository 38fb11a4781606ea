//! Wall-clock sources.
//!
//! Plot deadlines are absolute Unix milliseconds, so every component that
//! needs "now" reads it from a [`Clock`]. The live session uses
//! [`SystemClock`]; tests pin time with [`ManualClock`] or follow tokio's
//! pausable clock with [`TokioClock`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tanaman_types::EpochMillis;

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> EpochMillis;
}

/// The operating system's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        EpochMillis::from_datetime(Utc::now())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Start at the given instant.
    pub const fn new(start: EpochMillis) -> Self {
        Self {
            now: AtomicI64::new(start.as_millis()),
        }
    }

    /// Jump to an instant.
    pub fn set(&self, at: EpochMillis) {
        self.now.store(at.as_millis(), Ordering::SeqCst);
    }

    /// Move forward by `millis`.
    pub fn advance(&self, millis: i64) {
        let _previous = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(millis))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> EpochMillis {
        EpochMillis::new(self.now.load(Ordering::SeqCst))
    }
}

/// Wall-clock time anchored at an instant and advanced by tokio's clock.
///
/// Under a paused tokio runtime this moves exactly as far as the runtime
/// auto-advances, which keeps session tests deterministic.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    anchor: EpochMillis,
    started: tokio::time::Instant,
}

impl TokioClock {
    /// Anchor the clock at `anchor` as of now.
    pub fn new(anchor: EpochMillis) -> Self {
        Self {
            anchor,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> EpochMillis {
        let elapsed = i64::try_from(self.started.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.anchor
            .checked_add_millis(elapsed)
            .unwrap_or(EpochMillis::new(i64::MAX))
    }
}
