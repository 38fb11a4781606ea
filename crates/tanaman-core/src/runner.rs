//! Session loop runner.
//!
//! [`run_session`] owns the game state for the lifetime of a session and
//! drives it from one task:
//!
//! - **Ticks**: [`run_tick`] on a fixed interval; ticks never overlap. A
//!   failed tick is logged and counted, and the next tick runs as usual.
//! - **Autosave**: a snapshot is captured from `&GameState` on its own
//!   interval. A failed autosave is logged and the session goes on.
//! - **Shutdown**: when the shutdown future resolves the state is saved
//!   one final time and the loop returns.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};

use tanaman_world::random::RandomSource;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::snapshot::{self, SnapshotError};
use crate::state::GameState;
use crate::store::{SnapshotStore, StoreError};
use crate::tick::{self, TickSummary};

/// Errors that can occur during a session.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The state could not be serialized.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying snapshot error.
        #[from]
        source: SnapshotError,
    },

    /// The snapshot could not be written.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

/// Loop timing and the snapshot key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Time between ticks.
    pub tick_interval: Duration,
    /// Time between autosaves.
    pub autosave_interval: Duration,
    /// Key the snapshot is stored under.
    pub state_key: String,
}

impl From<&GameConfig> for RunnerSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.game.tick_interval_ms),
            autosave_interval: Duration::from_millis(config.game.autosave_interval_ms),
            state_key: config.storage.state_key.clone(),
        }
    }
}

/// How a session went.
#[derive(Debug)]
pub struct SessionResult {
    /// Ticks executed.
    pub total_ticks: u64,
    /// Ticks that failed and were skipped.
    pub failed_ticks: u64,
    /// Snapshots written, including the final one.
    pub saves: u64,
    /// Summary of the last tick, if any ran.
    pub final_summary: Option<TickSummary>,
}

/// Callback invoked after each tick completes.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &GameState) {}
}

/// Logs every notice a tick produces.
pub struct NoticeLogger;

impl TickCallback for NoticeLogger {
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState) {
        for notice in &summary.notices {
            info!(
                tick = summary.tick,
                level = ?notice.level,
                money = state.ledger.money(),
                "{}",
                notice.text
            );
        }
    }
}

/// Capture the state and write it to the store.
pub fn save_state(
    state: &GameState,
    store: &mut dyn SnapshotStore,
    key: &str,
    clock: &dyn Clock,
) -> Result<(), RunnerError> {
    let json = snapshot::capture(state, clock.now()).to_json()?;
    store.save(key, &json)?;
    Ok(())
}

/// Run the session loop until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`RunnerError`] only if the final save fails.
pub async fn run_session<S>(
    state: &mut GameState,
    clock: &dyn Clock,
    source: &mut dyn RandomSource,
    store: &mut dyn SnapshotStore,
    settings: &RunnerSettings,
    callback: &mut dyn TickCallback,
    shutdown: S,
) -> Result<SessionResult, RunnerError>
where
    S: Future<Output = ()>,
{
    let start = Instant::now();
    let first_tick = start.checked_add(settings.tick_interval).unwrap_or(start);
    let mut ticks = interval_at(first_tick, settings.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let first_save = start.checked_add(settings.autosave_interval).unwrap_or(start);
    let mut autosaves = interval_at(first_save, settings.autosave_interval);
    autosaves.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut total_ticks: u64 = 0;
    let mut failed_ticks: u64 = 0;
    let mut saves: u64 = 0;
    let mut final_summary: Option<TickSummary> = None;

    info!(
        tick_interval = ?settings.tick_interval,
        autosave_interval = ?settings.autosave_interval,
        "Session starting"
    );

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                info!(total_ticks, "Shutdown requested");
                break;
            }

            _ = ticks.tick() => {
                match tick::run_tick(state, clock.now(), source) {
                    Ok(summary) => {
                        total_ticks = total_ticks.saturating_add(1);
                        callback.on_tick(&summary, state);
                        final_summary = Some(summary);
                    }
                    Err(error) => {
                        failed_ticks = failed_ticks.saturating_add(1);
                        warn!(%error, tick = state.tick, "Tick failed, skipping");
                    }
                }
            }

            _ = autosaves.tick() => {
                match save_state(state, store, &settings.state_key, clock) {
                    Ok(()) => saves = saves.saturating_add(1),
                    Err(error) => warn!(%error, "Autosave failed"),
                }
            }
        }
    }

    save_state(state, store, &settings.state_key, clock)?;
    saves = saves.saturating_add(1);
    info!(total_ticks, failed_ticks, saves, "Session ended");

    Ok(SessionResult {
        total_ticks,
        failed_ticks,
        saves,
        final_summary,
    })
}
