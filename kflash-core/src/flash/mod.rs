//! Flash controller driving
//!
//! [`sequencer`] loads and launches controller commands, [`detector`]
//! tells when they have finished. Neither ever waits on the hardware.

pub mod detector;
pub mod sequencer;

pub use detector::{poll_completion, Completion};
pub use sequencer::{
    issue, issue_erase, issue_program, FlashCommand, ProgramWords, MAX_FLASH_ADDRESS,
    MAX_PROGRAM_WORDS,
};
