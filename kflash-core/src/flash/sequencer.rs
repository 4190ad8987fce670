//! Flash command sequencer
//!
//! Loads one FTMRE command into the FCCOB words and launches it. The
//! controller takes commands as a list of 16-bit words selected through
//! FCCOBIX:
//!
//! ```text
//! Erase All Blocks        Program Flash
//! ┌────┬──────────┐       ┌────┬──────────────┐
//! │ 0  │ 0x08 00  │       │ 0  │ 0x06 A[23:16]│
//! └────┴──────────┘       │ 1  │ A[15:0]      │
//!                         │ 2  │ W0[15:0]     │
//!                         │ 3  │ W0[31:16]    │
//!                         │ 4  │ W1[15:0]     │
//!                         │ 5  │ W1[31:16]    │
//!                         └────┴──────────────┘
//! ```
//!
//! Issuing returns immediately; use the detector to find out when the
//! command has finished. FCLKDIV must have been written first or the
//! controller rejects the command with ACCERR.

use heapless::Vec;
use kflash_hal::{FlashRegisters, FlashStatus};

/// FCCOB command code: Erase All Blocks
pub const CMD_ERASE_ALL_BLOCKS: u8 = 0x08;

/// FCCOB command code: Program Flash
pub const CMD_PROGRAM_FLASH: u8 = 0x06;

/// Longwords one Program Flash command can carry
pub const MAX_PROGRAM_WORDS: usize = 2;

/// Highest byte address the controller's 24-bit address field can hold
pub const MAX_FLASH_ADDRESS: u32 = 0x00FF_FFFF;

/// FCCOB words for the largest command
const MAX_COMMAND_WORDS: usize = 2 + 2 * MAX_PROGRAM_WORDS;

/// Data carried by one Program Flash command
pub type ProgramWords = Vec<u32, MAX_PROGRAM_WORDS>;

/// A single flash controller command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashCommand {
    /// Mass erase every flash block
    EraseAll,
    /// Program one or two longwords starting at `address`
    Program { address: u32, words: ProgramWords },
}

#[cfg(feature = "defmt")]
impl defmt::Format for FlashCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            FlashCommand::EraseAll => defmt::write!(f, "EraseAll"),
            FlashCommand::Program { address, words } => defmt::write!(
                f,
                "Program {{ address: {=u32:#x}, words: {=[?]} }}",
                address,
                words.as_slice()
            ),
        }
    }
}

impl FlashCommand {
    /// Program command for the first (up to two) words of `data`
    pub fn program(address: u32, data: &[u32]) -> Self {
        let take = data.len().min(MAX_PROGRAM_WORDS);
        let mut words = ProgramWords::new();
        // Cannot fail: at most MAX_PROGRAM_WORDS elements
        let _ = words.extend_from_slice(&data[..take]);
        FlashCommand::Program { address, words }
    }

    /// FCCOB words in index order
    pub fn command_words(&self) -> Vec<u16, MAX_COMMAND_WORDS> {
        let mut out = Vec::new();
        match self {
            FlashCommand::EraseAll => {
                let _ = out.push(u16::from(CMD_ERASE_ALL_BLOCKS) << 8);
            }
            FlashCommand::Program { address, words } => {
                let [_, high, mid, low] = address.to_be_bytes();
                let _ = out.push(u16::from_be_bytes([CMD_PROGRAM_FLASH, high]));
                let _ = out.push(u16::from_be_bytes([mid, low]));
                for word in words {
                    let _ = out.push(*word as u16);
                    let _ = out.push((*word >> 16) as u16);
                }
            }
        }
        out
    }

    /// Number of longwords programmed by this command
    pub fn word_count(&self) -> usize {
        match self {
            FlashCommand::EraseAll => 0,
            FlashCommand::Program { words, .. } => words.len(),
        }
    }
}

/// Load `command` into the controller and launch it
pub fn issue<R: FlashRegisters + ?Sized>(regs: &mut R, command: &FlashCommand) {
    for (index, word) in command.command_words().iter().enumerate() {
        regs.select_command_word(index as u8);
        regs.write_command_word(*word);
    }
    regs.write_status(FlashStatus::launch());
}

/// Launch a mass erase of every flash block
pub fn issue_erase<R: FlashRegisters + ?Sized>(regs: &mut R) {
    issue(regs, &FlashCommand::EraseAll);
}

/// Launch a program of up to two longwords at `address`
///
/// Words past the second are ignored.
pub fn issue_program<R: FlashRegisters + ?Sized>(regs: &mut R, address: u32, words: &[u32]) {
    issue(regs, &FlashCommand::program(address, words));
}
