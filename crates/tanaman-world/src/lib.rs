//! Garden simulation for Tanaman Tycoon.
//!
//! This crate owns everything that happens on the plots themselves: growth
//! timers, harvest resolution, mutation tags and weather, plus the random
//! outcome resolver every other crate draws from.
//!
//! # Modules
//!
//! - [`random`] -- [`RandomSource`] trait, seeded and scripted sources, draw helpers
//! - [`growth`] -- Phase deadlines, transitions, and timer tools
//! - [`mutation`] -- Variant rolls, mutation tags, harvest and sale pricing
//! - [`weather`] -- Weather rotation and rain rewards
//! - [`garden`] -- Ordered plot collection and garden upgrades
//! - [`error`] -- Error types for garden operations

pub mod error;
pub mod garden;
pub mod growth;
pub mod mutation;
pub mod random;
pub mod weather;

pub use error::GardenError;
pub use garden::Garden;
pub use growth::{PhaseFactors, growth_multiplier, weather_multiplier};
pub use mutation::{HarvestYield, apply_mutation, price_harvest, roll_variant, sale_price};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use weather::{WeatherChange, WeatherSystem};
