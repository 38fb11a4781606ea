//! Error types for the `tanaman-pets` crate.

use tanaman_ledger::LedgerError;
use tanaman_types::{PetSpecies, PetTier};
use tanaman_world::GardenError;

/// Errors raised by pet operations.
///
/// As everywhere in the simulation, a returned error means no state
/// changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetError {
    /// The player owns none of this species.
    #[error("you do not own a {0}")]
    NotOwned(PetSpecies),

    /// Every owned individual of this species is already equipped.
    #[error("no more {0} left to equip")]
    NoneAvailable(PetSpecies),

    /// All equip slots are occupied.
    #[error("all pet slots are full")]
    SlotsFull,

    /// The slot index does not exist.
    #[error("pet slot {0} does not exist")]
    SlotOutOfRange(usize),

    /// The slot holds no pet.
    #[error("pet slot {0} is empty")]
    SlotEmpty(usize),

    /// The species already has this tier.
    #[error("{species} is already {tier}")]
    AlreadyTier {
        /// The species.
        species: PetSpecies,
        /// The tier it already holds.
        tier: PetTier,
    },

    /// Gold and diamond cannot be applied on top of rainbow.
    #[error("cannot apply to a rainbow {0}")]
    RainbowLocked(PetSpecies),

    /// The mutation machine is already running.
    #[error("the mutation machine is busy")]
    MachineBusy,

    /// The species is too young for the mutation machine.
    #[error("{species} is age {age}, needs at least {required}")]
    TooYoung {
        /// The species.
        species: PetSpecies,
        /// Its shared age.
        age: u32,
        /// Minimum age.
        required: u32,
    },

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A garden operation failed.
    #[error(transparent)]
    Garden(#[from] GardenError),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in pet calculation")]
    ArithmeticOverflow,
}
