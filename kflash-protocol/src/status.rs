//! Status word bit layout
//!
//! Bit positions are fixed by the host tooling and must not move.

use bitfield_struct::bitfield;

use crate::codes::{CommandCode, ResultCode};

/// Packed status register at offset 0 of the command block
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct StatusWord {
    /// Requested operation; meaningful only while a command is submitted
    #[bits(3)]
    pub cmd: u8,

    /// 1 = loader idle and the host owns the block
    #[bits(1)]
    pub ready: bool,

    /// Outcome of the last operation
    #[bits(4)]
    pub result: u8,

    /// Raw flash controller status captured when the operation failed
    #[bits(8)]
    pub hw_flags: u8,

    #[bits(16)]
    __: u16,
}

impl StatusWord {
    /// Mask of the `cmd` field
    pub const CMD_MASK: u32 = 0x7;
    /// Mask of the `ready` bit
    pub const READY_MASK: u32 = 1 << 3;
    /// Mask of the `result` field
    pub const RESULT_MASK: u32 = 0xF << 4;
    /// Mask of the `hw_flags` field
    pub const HW_FLAGS_MASK: u32 = 0xFF << 8;

    /// Status written by the loader once it is up and waiting for commands
    pub const fn idle() -> Self {
        Self::new().with_ready(true)
    }

    /// Status the host writes to hand a command to the loader
    pub const fn submit(command: CommandCode) -> Self {
        Self::new().with_cmd(command.as_u8())
    }

    /// Decode the `cmd` field
    ///
    /// Returns the raw value when it is not a known command.
    pub fn command(&self) -> Result<CommandCode, u8> {
        let raw = self.cmd();
        CommandCode::from_u8(raw).ok_or(raw)
    }

    /// Decode the `result` field
    pub fn result_code(&self) -> Option<ResultCode> {
        ResultCode::from_u8(self.result())
    }

    /// Check whether the loader has reported a failure for the last command
    pub fn has_error(&self) -> bool {
        self.result() != ResultCode::Ok.as_u8()
    }

    /// Status reporting a finished command
    ///
    /// Keeps the `cmd` bits of `self` so the host can still see what it
    /// asked for, and clears the reserved bits.
    pub const fn completed(self, result: ResultCode, hw_flags: u8) -> Self {
        Self::new()
            .with_cmd(self.cmd())
            .with_ready(true)
            .with_result(result.as_u8())
            .with_hw_flags(hw_flags)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusWord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusWord {{ cmd: {}, ready: {}, result: {}, hw_flags: {=u8:#x} }}",
            self.cmd(),
            self.ready(),
            self.result(),
            self.hw_flags()
        )
    }
}
