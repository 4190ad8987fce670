//! Program command progress tracking

use kflash_protocol::{BUFFER_LEN, WORD_BYTES};

use crate::config::Granularity;
use crate::flash::{FlashCommand, ProgramWords, MAX_FLASH_ADDRESS};
use crate::interface::RequestView;

/// Reasons a program request is rejected before touching the flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// More words than the buffer holds
    LengthTooLarge(u32),
    /// Start or end of the range does not fit the 24-bit flash address
    AddressOutOfRange(u32),
}

/// A program command being worked through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramJob {
    /// Byte address of buffer word 0
    pub address: u32,
    /// Buffer words to program
    pub length: u32,
    /// Next buffer word to program
    pub cursor: u32,
}

impl ProgramJob {
    pub const fn new(address: u32, length: u32) -> Self {
        Self {
            address,
            length,
            cursor: 0,
        }
    }

    /// Validate the request in `view` and start a job for it
    pub fn from_request<V: RequestView + ?Sized>(view: &V) -> Result<Self, RequestError> {
        let address = view.address();
        let length = view.length();

        if length as usize > BUFFER_LEN {
            return Err(RequestError::LengthTooLarge(length));
        }

        // length <= 64, so the byte count cannot overflow
        let last = match length {
            0 => Some(address),
            n => address.checked_add(n * WORD_BYTES as u32 - 1),
        };
        match last {
            Some(last) if last <= MAX_FLASH_ADDRESS => Ok(Self::new(address, length)),
            _ => Err(RequestError::AddressOutOfRange(address)),
        }
    }

    /// Check if every word has been issued
    pub const fn is_complete(&self) -> bool {
        self.cursor >= self.length
    }

    /// Flash byte address of the word at the cursor
    pub const fn target_address(&self) -> u32 {
        self.address + self.cursor * WORD_BYTES as u32
    }

    /// Words the next command carries
    pub fn chunk_len(&self, granularity: Granularity) -> u32 {
        granularity.words().min(self.length.saturating_sub(self.cursor))
    }

    /// Controller command for the words at the cursor
    pub fn next_command<V: RequestView + ?Sized>(
        &self,
        view: &V,
        granularity: Granularity,
    ) -> FlashCommand {
        let mut words = ProgramWords::new();
        for index in self.cursor..self.cursor + self.chunk_len(granularity) {
            // chunk_len never exceeds the vector's capacity
            let _ = words.push(view.word(index as usize));
        }
        FlashCommand::Program {
            address: self.target_address(),
            words,
        }
    }

    /// Job after the command at the cursor has finished
    ///
    /// Always moves by the full granularity, even past `length` on a
    /// short final chunk.
    pub const fn advance(self, granularity: Granularity) -> Self {
        Self {
            cursor: self.cursor + granularity.words(),
            ..self
        }
    }
}
