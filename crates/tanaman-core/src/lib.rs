//! Game state, tick cycle, persistence, and session orchestration for the
//! Tanaman Tycoon simulation.
//!
//! This crate ties the garden, ledger and pet crates together into one
//! owned [`GameState`] and drives it: player actions, the one-second tick,
//! offline catch-up, snapshots and the async session loop.
//!
//! # Modules
//!
//! - [`actions`] -- Player actions; validate first, then mutate.
//! - [`admin`] -- Typed admin commands and item-name resolution.
//! - [`clock`] -- Wall-clock sources.
//! - [`config`] -- Configuration loading from `tanaman-config.yaml`.
//! - [`offline`] -- Catch-up of plot growth after an absence.
//! - [`runner`] -- Tokio session loop with autosave and shutdown save.
//! - [`snapshot`] -- The persisted snapshot contract.
//! - [`state`] -- The [`GameState`] aggregate.
//! - [`store`] -- Snapshot storage backends.
//! - [`tick`] -- The per-second tick cycle.

pub mod actions;
pub mod admin;
pub mod clock;
pub mod config;
pub mod offline;
pub mod runner;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod tick;

pub use actions::ActionError;
pub use admin::{AdminCommand, AdminError, AdminReply};
pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use config::{ConfigError, GameConfig};
pub use offline::{OfflineReport, reconcile};
pub use runner::{NoOpCallback, NoticeLogger, RunnerError, RunnerSettings, SessionResult, TickCallback, run_session, save_state};
pub use snapshot::{Restored, Snapshot, SnapshotError, capture, load_or_new, restore};
pub use state::GameState;
pub use store::{FileStore, MemoryStore, SnapshotStore, StoreError};
pub use tick::{TickError, TickSummary, run_tick};
