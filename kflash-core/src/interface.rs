//! Shared command interface
//!
//! The state machine sees the command block only through these two
//! traits. [`RequestView`] is everything it may read, [`CommandPort`] adds
//! the two status writes it is allowed to make. Nothing else in the block
//! is ever written by the loader.
//!
//! There is no lock: the host only touches the block while `ready` is 1,
//! and the loader only writes `ready` back to 1 once it is done with the
//! request.

use kflash_protocol::{CommandBlock, ResultCode, StatusWord};

/// Read side of the shared command block
pub trait RequestView {
    /// Current status word
    fn status(&self) -> StatusWord;

    /// Target flash byte address
    fn address(&self) -> u32;

    /// Number of buffer words to program
    fn length(&self) -> u32;

    /// Buffer word at `index`
    ///
    /// Indices past the end of the buffer read as zero.
    fn word(&self, index: usize) -> u32;
}

/// Write side of the shared command block
pub trait CommandPort: RequestView {
    /// Hand the block to the host for the first time (ready, result OK)
    fn initialize(&mut self);

    /// Report the outcome of the current command and set `ready`
    ///
    /// Must be a single status write. The `cmd` bits are kept as the host
    /// left them.
    fn complete(&mut self, outcome: Outcome);
}

/// Result of one command as reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    /// Result code
    pub result: ResultCode,
    /// Raw FSTAT captured on a flash error, zero otherwise
    pub hw_flags: u8,
}

impl Outcome {
    pub const fn ok() -> Self {
        Self {
            result: ResultCode::Ok,
            hw_flags: 0,
        }
    }

    pub const fn flash_error(hw_flags: u8) -> Self {
        Self {
            result: ResultCode::FlashError,
            hw_flags,
        }
    }

    pub const fn invalid_argument() -> Self {
        Self {
            result: ResultCode::InvalidArgument,
            hw_flags: 0,
        }
    }

    pub const fn not_implemented() -> Self {
        Self {
            result: ResultCode::NotImplemented,
            hw_flags: 0,
        }
    }

    /// Check if the command succeeded
    pub const fn is_ok(&self) -> bool {
        matches!(self.result, ResultCode::Ok)
    }

    /// Status word reporting this outcome for a request with status `request`
    pub const fn status_for(&self, request: StatusWord) -> StatusWord {
        request.completed(self.result, self.hw_flags)
    }
}

impl RequestView for CommandBlock {
    fn status(&self) -> StatusWord {
        self.status_word()
    }

    fn address(&self) -> u32 {
        self.address
    }

    fn length(&self) -> u32 {
        self.length
    }

    fn word(&self, index: usize) -> u32 {
        self.buffer.get(index).copied().unwrap_or(0)
    }
}

impl CommandPort for CommandBlock {
    fn initialize(&mut self) {
        self.status = StatusWord::idle().into_bits();
    }

    fn complete(&mut self, outcome: Outcome) {
        self.status = outcome.status_for(self.status_word()).into_bits();
    }
}
