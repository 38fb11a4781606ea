//! Error types for the `tanaman-ledger` crate.

use crate::ledger::Holding;

/// Errors raised by ledger and shop operations.
///
/// Every operation checks all preconditions before touching a counter, so
/// a returned error means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The player cannot afford the purchase.
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds {
        /// Price of the purchase.
        needed: u64,
        /// Money on hand.
        available: u64,
    },

    /// The player does not hold enough of an item.
    #[error("not enough {holding}: need {requested}, have {available}")]
    InsufficientHolding {
        /// The item.
        holding: Holding,
        /// Quantity required.
        requested: u32,
        /// Quantity held.
        available: u32,
    },

    /// The shop has none left of this item.
    #[error("{0} is out of stock")]
    OutOfStock(Holding),

    /// The item is not sold until a requirement is met.
    #[error("{holding} is locked: {requirement}")]
    Locked {
        /// The locked item.
        holding: Holding,
        /// What unlocks it.
        requirement: &'static str,
    },

    /// The item is never sold by a stocked shop.
    #[error("{0} is not sold here")]
    NotForSale(Holding),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in ledger calculation")]
    ArithmeticOverflow,
}
