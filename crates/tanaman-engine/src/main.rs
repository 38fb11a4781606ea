//! Session binary for the Tanaman Tycoon simulation.
//!
//! Loads the saved game, catches plot growth up to the present, then runs
//! the one-second tick loop with periodic autosave until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tanaman-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Restore the snapshot from the save directory, or start fresh
//! 4. Reconcile offline growth and report a long absence
//! 5. Seed the random source and roll session weather and shop stock
//! 6. Run the session loop until Ctrl-C
//! 7. Log the result

mod error;

use std::path::Path;

use tanaman_core::clock::{Clock, SystemClock};
use tanaman_core::config::{GameConfig, LoggingConfig};
use tanaman_core::runner::{self, NoticeLogger, RunnerSettings};
use tanaman_core::store::{FileStore, SnapshotStore};
use tanaman_core::{offline, snapshot};
use tanaman_world::SeededRandom;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up relative to the working directory.
const CONFIG_PATH: &str = "tanaman-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, catch-up overflows, or
/// the final save fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_config(Path::new(CONFIG_PATH))?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    init_logging(&config.logging);
    info!("tanaman-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        tick_interval_ms = config.game.tick_interval_ms,
        autosave_interval_ms = config.game.autosave_interval_ms,
        save_dir = %config.storage.save_dir.display(),
        "Configuration loaded"
    );

    run(&config).await?;
    Ok(())
}

/// Restore, reconcile and play one session.
async fn run(config: &GameConfig) -> Result<(), EngineError> {
    let clock = SystemClock;
    let mut store = FileStore::new(&config.storage.save_dir);
    let saved = store.load(&config.storage.state_key);
    let restored = snapshot::load_or_new(saved.as_deref(), clock.now());
    let mut state = restored.state;
    info!(
        money = state.ledger.money(),
        plots = state.garden.len(),
        last_save = %restored.last_save,
        "Game state ready"
    );

    let report = offline::reconcile(
        &mut state,
        restored.last_save,
        clock.now(),
        config.game.offline_threshold_ms,
    )?;
    if let Some(notice) = report.notice() {
        info!(elapsed_ms = report.elapsed_ms, "{}", notice.text);
    }

    let mut source = config
        .game
        .rng_seed
        .map_or_else(SeededRandom::from_entropy, SeededRandom::from_seed);
    state.begin_session(&mut source);
    info!(weather = ?state.weather.current(), "Session weather rolled");

    let settings = RunnerSettings::from(config);
    let result = runner::run_session(
        &mut state,
        &clock,
        &mut source,
        &mut store,
        &settings,
        &mut NoticeLogger,
        shutdown_signal(),
    )
    .await?;

    info!(
        total_ticks = result.total_ticks,
        failed_ticks = result.failed_ticks,
        saves = result.saves,
        money = state.ledger.money(),
        "tanaman-engine shutdown complete"
    );
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the configuration file, or `None` if it does not exist.
fn load_config(path: &Path) -> Result<Option<GameConfig>, EngineError> {
    if path.exists() {
        Ok(Some(GameConfig::from_file(path)?))
    } else {
        Ok(None)
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the session
/// runs until killed.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
