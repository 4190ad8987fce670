//! Main loop body

use kflash_hal::{FlashRegisters, Watchdog};

use crate::agent::{FlashAgent, Tick};
use crate::config::AgentConfig;
use crate::interface::CommandPort;
use crate::safety::LivenessSupervisor;

/// One state machine plus the watchdog that guards it
pub struct Runtime<W> {
    agent: FlashAgent,
    supervisor: LivenessSupervisor<W>,
}

impl<W: Watchdog> Runtime<W> {
    pub const fn new(config: AgentConfig, watchdog: W) -> Self {
        Self {
            agent: FlashAgent::new(config),
            supervisor: LivenessSupervisor::new(watchdog),
        }
    }

    /// One pass of the main loop: a single tick, then a watchdog refresh
    pub fn iterate<P, R>(&mut self, port: &mut P, regs: &mut R) -> Tick
    where
        P: CommandPort + ?Sized,
        R: FlashRegisters + ?Sized,
    {
        let tick = self.agent.tick(port, regs);
        self.supervisor.service();
        tick
    }

    pub fn agent(&self) -> &FlashAgent {
        &self.agent
    }

    pub fn supervisor(&self) -> &LivenessSupervisor<W> {
        &self.supervisor
    }
}
