//! Economy and inventory ledger for Tanaman Tycoon.
//!
//! Money is never created or destroyed except through the operations in
//! this crate and the harvest/ability paths that credit it. Every counter
//! is unsigned with checked arithmetic, and every rejected operation leaves
//! the ledger untouched.
//!
//! # Modules
//!
//! - [`ledger`] -- The [`Ledger`]: money, seeds, fruit, tools, shards, unlocks
//! - [`shop`] -- [`ShopStock`] shelves and the restock roll tables
//! - [`market`] -- Buying from shops and the ancient tree, selling fruit
//! - [`error`] -- Error types for ledger operations

pub mod error;
pub mod ledger;
pub mod market;
pub mod shop;

pub use error::LedgerError;
pub use ledger::{Holding, Ledger, zeroed_seed_map};
pub use market::{buy_seed, buy_shard, buy_tool, ensure_affordable, sell_fruit, tool_price};
pub use shop::ShopStock;
