//! Flash agent: the state machine wired to real effects

use kflash_hal::FlashRegisters;

use crate::config::AgentConfig;
use crate::flash::{issue, poll_completion};
use crate::interface::{CommandPort, Outcome};
use crate::state::{HardwareOp, Mutation, State};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// State at the start of the tick
    pub previous: State,
    /// State after the tick
    pub current: State,
    /// Hardware operation performed, if any
    pub issued: Option<HardwareOp>,
    /// Outcome reported to the host, if any
    pub outcome: Option<Outcome>,
}

impl Tick {
    /// Check if the state changed
    pub fn transitioned(&self) -> bool {
        self.previous != self.current
    }
}

/// Owns the loader state and applies each step's effects
#[derive(Debug, Clone)]
pub struct FlashAgent {
    state: State,
    config: AgentConfig,
}

impl FlashAgent {
    /// Create an agent in the initial state
    pub const fn new(config: AgentConfig) -> Self {
        Self {
            state: State::Init,
            config,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Advance the state machine by exactly one step
    ///
    /// Samples the controller once, evaluates the step, then performs the
    /// hardware operation before the command block write so the host can
    /// never see `ready` ahead of the controller being set up.
    pub fn tick<P, R>(&mut self, port: &mut P, regs: &mut R) -> Tick
    where
        P: CommandPort + ?Sized,
        R: FlashRegisters + ?Sized,
    {
        let previous = self.state;
        let completion = poll_completion(regs);
        let step = previous.step(port, completion, &self.config);

        if let Some(op) = &step.hardware {
            match op {
                HardwareOp::SetClockDivider(divider) => regs.set_clock_divider(*divider),
                HardwareOp::Issue(command) => issue(regs, command),
            }
        }

        let outcome = match step.mutation {
            Some(Mutation::Initialize) => {
                port.initialize();
                None
            }
            Some(Mutation::Complete(outcome)) => {
                port.complete(outcome);
                Some(outcome)
            }
            None => None,
        };

        self.state = step.next;
        Tick {
            previous,
            current: step.next,
            issued: step.hardware,
            outcome,
        }
    }
}

impl Default for FlashAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}
