//! Pets for Tanaman Tycoon.
//!
//! Pets are owned per species, share one age and one tier set per
//! species, and act from three equip slots. Active abilities run on
//! per-slot cooldowns; tier passives run on fixed tracks.
//!
//! # Modules
//!
//! - [`roster`] -- [`PetRoster`]: ownership, ages, equip slots, tiers
//! - [`tiers`] -- Tier rules and pet shards
//! - [`abilities`] -- Active and passive ability effects
//! - [`scheduler`] -- [`AbilityScheduler`]: cooldowns and firing order
//! - [`eggs`] -- Egg shop and hatching
//! - [`machine`] -- [`MutationMachine`] runs
//! - [`error`] -- Error types for pet operations

pub mod abilities;
pub mod eggs;
pub mod error;
pub mod machine;
pub mod roster;
pub mod scheduler;
pub mod tiers;

pub use abilities::{AbilityEffect, AbilityEvent, AbilitySource};
pub use eggs::{buy_egg, hatch};
pub use error::PetError;
pub use machine::{MachineOutcome, MutationMachine, MutationRun};
pub use roster::{PetRoster, zeroed_species_map};
pub use scheduler::{AbilityScheduler, PassiveCooldowns, full_cooldown};
pub use tiers::{apply_shard, check_grant, grant_tier};
