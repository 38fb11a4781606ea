//! The pet mutation machine.
//!
//! One species at a time goes in for a fixed run. When the run's end time
//! has passed, the next poll rolls the outcome: a failure, or a tier
//! granted under the usual tier rules. Either way the species' shared age
//! starts over. The end time is absolute, so a run survives save and
//! reload and its outcome is only rolled once.

use serde::{Deserialize, Serialize};
use tracing::info;

use tanaman_types::catalog::{
    MUTATION_MACHINE_FAILURE_CHANCE, MUTATION_MACHINE_MIN_AGE, MUTATION_MACHINE_SECONDS,
    MUTATION_MACHINE_TIER_WEIGHTS,
};
use tanaman_types::{EpochMillis, Notice, PetSpecies, PetTier};
use tanaman_world::random::{RandomSource, chance, weighted_choice};

use crate::error::PetError;
use crate::roster::PetRoster;
use crate::tiers::grant_tier;

/// An in-flight machine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRun {
    /// Species inside the machine.
    pub species: PetSpecies,
    /// When the run completes.
    pub end_at: EpochMillis,
}

/// How a completed run turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineOutcome {
    /// The mutation failed.
    Failed(PetSpecies),
    /// The species gained a tier.
    Mutated {
        /// The species.
        species: PetSpecies,
        /// The tier gained.
        tier: PetTier,
    },
    /// A tier was rolled but the tier rules refused it.
    Refused {
        /// The species.
        species: PetSpecies,
        /// The tier rolled.
        tier: PetTier,
        /// Why it was refused.
        reason: PetError,
    },
}

impl MachineOutcome {
    /// The user-facing notice for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Failed(species) => Notice::error(format!("Mutation of {species} failed!")),
            Self::Mutated { species, tier } => {
                Notice::success(format!("{species} mutated into a {tier} pet!"))
            }
            Self::Refused {
                species,
                tier,
                reason,
            } => Notice::info(format!("{species} rolled {tier}, but {reason}")),
        }
    }
}

/// The machine and its current run, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationMachine {
    run: Option<MutationRun>,
}

impl MutationMachine {
    /// An idle machine.
    pub const fn new() -> Self {
        Self { run: None }
    }

    /// Restore a machine from a persisted run.
    pub const fn from_run(run: Option<MutationRun>) -> Self {
        Self { run }
    }

    /// The current run.
    pub const fn run(&self) -> Option<MutationRun> {
        self.run
    }

    /// Whether a run is in progress.
    pub const fn is_busy(&self) -> bool {
        self.run.is_some()
    }

    /// Put a species in the machine.
    pub fn start(
        &mut self,
        roster: &PetRoster,
        species: PetSpecies,
        now: EpochMillis,
    ) -> Result<MutationRun, PetError> {
        if self.is_busy() {
            return Err(PetError::MachineBusy);
        }
        if roster.owned(species) == 0 {
            return Err(PetError::NotOwned(species));
        }
        let age = roster.age(species);
        if age < MUTATION_MACHINE_MIN_AGE {
            return Err(PetError::TooYoung {
                species,
                age,
                required: MUTATION_MACHINE_MIN_AGE,
            });
        }
        let duration = i64::from(MUTATION_MACHINE_SECONDS)
            .checked_mul(1000)
            .ok_or(PetError::ArithmeticOverflow)?;
        let end_at = now
            .checked_add_millis(duration)
            .ok_or(PetError::ArithmeticOverflow)?;
        let run = MutationRun { species, end_at };
        self.run = Some(run);
        info!(%species, %end_at, "Mutation machine started");
        Ok(run)
    }

    /// Complete the run if it is due.
    ///
    /// Draws the failure roll, and on success one more draw for the tier.
    /// Returns `None` (and draws nothing) if idle or not yet due.
    pub fn poll(
        &mut self,
        roster: &mut PetRoster,
        now: EpochMillis,
        source: &mut dyn RandomSource,
    ) -> Option<MachineOutcome> {
        let run = self.run.filter(|run| now >= run.end_at)?;
        self.run = None;
        let species = run.species;
        roster.set_age(species, 0);

        let outcome = if chance(source, MUTATION_MACHINE_FAILURE_CHANCE) {
            MachineOutcome::Failed(species)
        } else {
            let tier = weighted_choice(source, &MUTATION_MACHINE_TIER_WEIGHTS).unwrap_or(PetTier::Gold);
            match grant_tier(roster, species, tier) {
                Ok(()) => MachineOutcome::Mutated { species, tier },
                Err(reason) => MachineOutcome::Refused {
                    species,
                    tier,
                    reason,
                },
            }
        };
        info!(%species, ?outcome, "Mutation machine finished");
        Some(outcome)
    }
}
