//! Shared type definitions for the Tanaman Tycoon simulation.
//!
//! This crate is the single source of truth for the data shared by every
//! simulation crate. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the browser front end.
//!
//! # Modules
//!
//! - [`ids`] -- Plot identifiers and millisecond timestamps
//! - [`enums`] -- Seeds, plot phases, mutations, pets, tools, weather
//! - [`structs`] -- The [`Plot`] record and user-facing [`Notice`]
//! - [`catalog`] -- Immutable seed and pet tables, prices, starting values

pub mod catalog;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use catalog::{PetDefinition, SeedDefinition};
pub use enums::{
    EggKind, FruitGrade, MutationType, NoticeLevel, PetSpecies, PetTier, PlantVariant, PlotStatus,
    SeedType, ToolKind, Weather,
};
pub use ids::{EpochMillis, PlotId};
pub use structs::{Notice, Plot};
