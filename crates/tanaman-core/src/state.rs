//! The owned game state aggregate.
//!
//! One [`GameState`] holds everything a session mutates. It is owned by a
//! single task; actions and ticks borrow it mutably, autosave borrows it
//! immutably.

use rust_decimal::Decimal;
use tracing::info;

use tanaman_ledger::{Ledger, ShopStock};
use tanaman_pets::{AbilityScheduler, MutationMachine, PetRoster};
use tanaman_world::random::RandomSource;
use tanaman_world::{Garden, PhaseFactors, WeatherSystem};

/// Everything that changes while the game runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    /// Money and holdings.
    pub ledger: Ledger,
    /// Plots.
    pub garden: Garden,
    /// Owned and equipped pets.
    pub roster: PetRoster,
    /// Pet ability cooldowns.
    pub scheduler: AbilityScheduler,
    /// Shop shelves. Session-local.
    pub shop: ShopStock,
    /// Current weather. Session-local.
    pub weather: WeatherSystem,
    /// The pet mutation machine.
    pub machine: MutationMachine,
    /// Ticks run this session.
    pub tick: u64,
}

impl GameState {
    /// A brand new game.
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the session-local state: opening weather and shop shelves.
    ///
    /// The opening weather never grants a watering can.
    pub fn begin_session(&mut self, source: &mut dyn RandomSource) {
        let weather = self.weather.roll_initial(source);
        self.shop.restock(source);
        self.tick = 0;
        info!(?weather, "Session started");
    }

    /// Growth multiplier from the equipped pets.
    pub fn growth_multiplier(&self) -> Decimal {
        self.roster.growth_multiplier()
    }

    /// Factors for a phase entered right now.
    pub fn phase_factors(&self) -> PhaseFactors {
        PhaseFactors::new(self.growth_multiplier(), self.weather.current())
    }

    /// Whether every plot satisfies its invariants.
    pub fn plots_consistent(&self) -> bool {
        self.garden.plots().iter().all(tanaman_types::Plot::is_consistent)
    }
}
