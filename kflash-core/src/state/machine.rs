//! State machine definition

use kflash_protocol::CommandCode;

use super::job::ProgramJob;
use super::step::{HardwareOp, Mutation, Step};
use crate::config::AgentConfig;
use crate::flash::{Completion, FlashCommand};
use crate::interface::{Outcome, RequestView};

/// Loader states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on, flash clock not configured yet
    #[default]
    Init,
    /// Waiting for the host to submit a command
    Ready,
    /// Program command accepted, next chunk about to be issued
    ProgramLoad(ProgramJob),
    /// Program chunk issued, waiting for the controller
    ProgramWait(ProgramJob),
    /// Last controller command issued, waiting to report the result
    Finish,
    /// Halted; no further commands are serviced
    Error(ErrorKind),
}

/// Reasons the loader halts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Host asked for a command this build does not service
    UnsupportedCommand(u8),
}

impl State {
    /// Check if the loader owns the command block in this state
    pub const fn is_busy(&self) -> bool {
        matches!(
            self,
            State::ProgramLoad(_) | State::ProgramWait(_) | State::Finish
        )
    }

    /// Check if this is the halted state
    pub const fn is_error(&self) -> bool {
        matches!(self, State::Error(_))
    }

    /// Advance by one tick
    ///
    /// `completion` is the controller status sampled for this tick; only
    /// states waiting on the controller look at it.
    pub fn step<V: RequestView + ?Sized>(
        self,
        view: &V,
        completion: Completion,
        config: &AgentConfig,
    ) -> Step {
        use State::*;

        match self {
            Init => Step::to(Ready)
                .with_hardware(HardwareOp::SetClockDivider(config.flash_clock_divider))
                .with_mutation(Mutation::Initialize),

            Ready if view.status().ready() => Step::stay(Ready),
            Ready => accept(view, config),

            ProgramLoad(job) if job.is_complete() => Step::to(Finish),
            ProgramLoad(job) => Step::to(ProgramWait(job)).with_hardware(HardwareOp::Issue(
                job.next_command(view, config.granularity),
            )),

            ProgramWait(job) => match completion {
                Completion::Pending => Step::stay(self),
                Completion::Done => Step::to(ProgramLoad(job.advance(config.granularity))),
                Completion::Failed(flags) => report(Outcome::flash_error(flags)),
            },

            Finish => match completion {
                Completion::Pending => Step::stay(self),
                Completion::Done => report(Outcome::ok()),
                Completion::Failed(flags) => report(Outcome::flash_error(flags)),
            },

            Error(_) => Step::stay(self),
        }
    }
}

/// Pick up a freshly submitted command
///
/// Reads `cmd` exactly once.
fn accept<V: RequestView + ?Sized>(view: &V, config: &AgentConfig) -> Step {
    let command = match view.status().command() {
        Ok(command) if config.capabilities.supports(command) => command,
        Ok(command) => return unsupported(command.as_u8(), config),
        Err(raw) => return unsupported(raw, config),
    };

    match command {
        CommandCode::Erase => {
            Step::to(State::Finish).with_hardware(HardwareOp::Issue(FlashCommand::EraseAll))
        }
        CommandCode::Program => match ProgramJob::from_request(view) {
            Ok(job) => Step::to(State::ProgramLoad(job)),
            Err(_) => report(Outcome::invalid_argument()),
        },
    }
}

fn unsupported(raw: u8, config: &AgentConfig) -> Step {
    let next = if config.halt_on_unsupported {
        State::Error(ErrorKind::UnsupportedCommand(raw))
    } else {
        State::Ready
    };
    Step::to(next).with_mutation(Mutation::Complete(Outcome::not_implemented()))
}

/// Hand the block back to the host with `outcome`
fn report(outcome: Outcome) -> Step {
    Step::to(State::Ready).with_mutation(Mutation::Complete(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Granularity;
    use kflash_protocol::{CommandBlock, ResultCode, StatusWord};

    fn idle_block() -> CommandBlock {
        let mut block = CommandBlock::new();
        block.status = StatusWord::idle().into_bits();
        block
    }

    fn submitted(status: u32, address: u32, length: u32) -> CommandBlock {
        let mut block = CommandBlock::new();
        block.status = status;
        block.address = address;
        block.length = length;
        for (i, word) in block.buffer.iter_mut().enumerate() {
            *word = 0xA000_0000 | i as u32;
        }
        block
    }

    fn completes_with(step: &Step, result: ResultCode, hw_flags: u8) -> bool {
        step.mutation == Some(Mutation::Complete(Outcome { result, hw_flags }))
    }

    #[test]
    fn test_init_configures_and_opens_interface() {
        let config = AgentConfig::new().with_flash_clock_divider(0x13);
        let step = State::Init.step(&CommandBlock::new(), Completion::Pending, &config);

        assert_eq!(step.next, State::Ready);
        assert_eq!(step.hardware, Some(HardwareOp::SetClockDivider(0x13)));
        assert_eq!(step.mutation, Some(Mutation::Initialize));
    }

    #[test]
    fn test_ready_idles_while_host_owns_block() {
        let step = State::Ready.step(&idle_block(), Completion::Done, &AgentConfig::new());
        assert_eq!(step, Step::stay(State::Ready));
    }

    #[test]
    fn test_erase_issued_then_finish() {
        let block = submitted(0x0, 0, 0);
        let step = State::Ready.step(&block, Completion::Done, &AgentConfig::new());

        assert_eq!(step.next, State::Finish);
        assert_eq!(step.hardware, Some(HardwareOp::Issue(FlashCommand::EraseAll)));
        assert_eq!(step.mutation, None);
    }

    #[test]
    fn test_program_accepted_with_cursor_zero() {
        let block = submitted(0x1, 0x1000, 4);
        let step = State::Ready.step(&block, Completion::Done, &AgentConfig::new());

        assert_eq!(step.next, State::ProgramLoad(ProgramJob::new(0x1000, 4)));
        assert_eq!(step.hardware, None);
        assert_eq!(step.mutation, None);
    }

    #[test]
    fn test_program_oversize_rejected() {
        let block = submitted(0x1, 0x1000, 65);
        let step = State::Ready.step(&block, Completion::Done, &AgentConfig::new());

        assert_eq!(step.next, State::Ready);
        assert_eq!(step.hardware, None);
        assert!(completes_with(&step, ResultCode::InvalidArgument, 0));
    }

    #[test]
    fn test_unknown_command_full_build() {
        for raw in 2..8 {
            let block = submitted(raw, 0, 0);
            let step = State::Ready.step(&block, Completion::Done, &AgentConfig::new());

            assert_eq!(step.next, State::Ready);
            assert_eq!(step.hardware, None);
            assert!(completes_with(&step, ResultCode::NotImplemented, 0));
        }
    }

    #[test]
    fn test_degraded_build_halts() {
        let config = AgentConfig::degraded();

        let step = State::Ready.step(&submitted(0x5, 0, 0), Completion::Done, &config);
        assert_eq!(step.next, State::Error(ErrorKind::UnsupportedCommand(5)));
        assert!(completes_with(&step, ResultCode::NotImplemented, 0));

        let step = State::Ready.step(&submitted(0x1, 0x1000, 4), Completion::Done, &config);
        assert_eq!(step.next, State::Error(ErrorKind::UnsupportedCommand(1)));
        assert_eq!(step.hardware, None);
    }

    #[test]
    fn test_error_is_absorbing() {
        let halted = State::Error(ErrorKind::UnsupportedCommand(5));
        for block in [idle_block(), submitted(0x0, 0, 0), submitted(0x1, 0, 2)] {
            for completion in [Completion::Pending, Completion::Done, Completion::Failed(0xA0)] {
                let step = halted.step(&block, completion, &AgentConfig::degraded());
                assert_eq!(step, Step::stay(halted));
            }
        }
    }

    #[test]
    fn test_program_load_issues_chunk() {
        let block = submitted(0x1, 0x1000, 4);
        let job = ProgramJob::new(0x1000, 4);
        let step = State::ProgramLoad(job).step(&block, Completion::Done, &AgentConfig::new());

        assert_eq!(step.next, State::ProgramWait(job));
        assert_eq!(
            step.hardware,
            Some(HardwareOp::Issue(FlashCommand::program(
                0x1000,
                &[0xA000_0000, 0xA000_0001]
            )))
        );
    }

    #[test]
    fn test_program_load_done_goes_to_finish() {
        let block = submitted(0x1, 0x1000, 4);
        let job = ProgramJob::new(0x1000, 4)
            .advance(Granularity::Double)
            .advance(Granularity::Double);
        let step = State::ProgramLoad(job).step(&block, Completion::Pending, &AgentConfig::new());

        assert_eq!(step, Step::to(State::Finish));
    }

    #[test]
    fn test_program_wait_outcomes() {
        let block = submitted(0x1, 0x1000, 4);
        let job = ProgramJob::new(0x1000, 4);
        let wait = State::ProgramWait(job);
        let config = AgentConfig::new();

        assert_eq!(wait.step(&block, Completion::Pending, &config), Step::stay(wait));

        let step = wait.step(&block, Completion::Done, &config);
        assert_eq!(step.next, State::ProgramLoad(job.advance(Granularity::Double)));
        assert_eq!(step.mutation, None);

        let step = wait.step(&block, Completion::Failed(0x90), &config);
        assert_eq!(step.next, State::Ready);
        assert!(completes_with(&step, ResultCode::FlashError, 0x90));
    }

    #[test]
    fn test_finish_outcomes() {
        let block = submitted(0x0, 0, 0);
        let config = AgentConfig::new();

        assert_eq!(
            State::Finish.step(&block, Completion::Pending, &config),
            Step::stay(State::Finish)
        );

        let step = State::Finish.step(&block, Completion::Done, &config);
        assert_eq!(step.next, State::Ready);
        assert!(completes_with(&step, ResultCode::Ok, 0));

        let step = State::Finish.step(&block, Completion::Failed(0xA0), &config);
        assert_eq!(step.next, State::Ready);
        assert!(completes_with(&step, ResultCode::FlashError, 0xA0));
    }

    #[test]
    fn test_busy_states() {
        assert!(!State::Init.is_busy());
        assert!(!State::Ready.is_busy());
        assert!(State::ProgramLoad(ProgramJob::new(0, 1)).is_busy());
        assert!(State::ProgramWait(ProgramJob::new(0, 1)).is_busy());
        assert!(State::Finish.is_busy());
        assert!(State::Error(ErrorKind::UnsupportedCommand(7)).is_error());
    }
}
