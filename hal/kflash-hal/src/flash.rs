//! Flash controller abstractions
//!
//! Models the register file of a command-buffer style flash controller
//! (Kinetis FTMRE): a clock divider, an index register selecting one
//! 16-bit command object word, the word itself split into high and low
//! bytes, and a status register whose write launches the loaded command.

use bitfield_struct::bitfield;

/// Flash status register (FSTAT)
///
/// Error flags are write-one-to-clear, and writing 1 to `ccif` launches
/// the command currently held in the command buffer.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct FlashStatus {
    /// Memory controller command completion status
    #[bits(2)]
    pub mgstat: u8,

    #[bits(1)]
    __: u8,

    /// Memory controller busy
    #[bits(1)]
    pub mgbusy: bool,

    /// Protection violation
    #[bits(1)]
    pub fpviol: bool,

    /// Access error
    #[bits(1)]
    pub accerr: bool,

    #[bits(1)]
    __: u8,

    /// Command complete; 0 while a command is executing
    #[bits(1)]
    pub ccif: bool,
}

impl FlashStatus {
    /// Mask of the command complete flag
    pub const CCIF_MASK: u8 = 1 << 7;

    /// Value that clears stale error flags and launches a command
    pub const fn launch() -> Self {
        Self::new().with_ccif(true).with_accerr(true).with_fpviol(true)
    }

    /// Check whether any flag other than "command complete" is set
    pub const fn has_fault(&self) -> bool {
        self.into_bits() & !Self::CCIF_MASK != 0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FlashStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FSTAT({=u8:#x})", self.into_bits())
    }
}

/// Flash controller register file
///
/// Every method maps onto a single register access. Sequencing those
/// accesses into a complete command is the caller's job.
pub trait FlashRegisters {
    /// Read the status register
    ///
    /// Reading has no side effects on the controller.
    fn status(&self) -> FlashStatus;

    /// Write the status register
    fn write_status(&mut self, status: FlashStatus);

    /// Write the flash clock divider (FCLKDIV)
    fn set_clock_divider(&mut self, divider: u8);

    /// Select the command object word addressed by the next data write (FCCOBIX)
    fn select_command_word(&mut self, index: u8);

    /// Write the selected command object word (FCCOBHI, then FCCOBLO)
    fn write_command_word(&mut self, value: u16);
}
