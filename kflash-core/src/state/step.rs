//! Effects produced by one state machine step

use super::machine::State;
use crate::flash::FlashCommand;
use crate::interface::Outcome;

/// Flash controller access requested by a step
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareOp {
    /// Write FCLKDIV
    SetClockDivider(u8),
    /// Load and launch a controller command
    Issue(FlashCommand),
}

/// Write to the command block requested by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mutation {
    /// Mark the block ready for the first time
    Initialize,
    /// Report the outcome of the current command
    Complete(Outcome),
}

/// Result of [`State::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State for the next tick
    pub next: State,
    /// Applied before `mutation`
    pub hardware: Option<HardwareOp>,
    pub mutation: Option<Mutation>,
}

impl Step {
    /// Move to `next` with no side effects
    pub const fn to(next: State) -> Self {
        Self {
            next,
            hardware: None,
            mutation: None,
        }
    }

    /// Remain in `state` with no side effects
    pub const fn stay(state: State) -> Self {
        Self::to(state)
    }

    pub fn with_hardware(mut self, op: HardwareOp) -> Self {
        self.hardware = Some(op);
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }
}
