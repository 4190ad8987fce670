//! FTMRE flash controller
//!
//! All registers are byte wide. The command object (FCCOB) is a small
//! array of 16-bit words reached through FCCOBIX: select the word, then
//! write its high and low bytes.

use kflash_hal::flash::{FlashRegisters, FlashStatus};

use crate::mmio::Reg;

/// FTMRE base address
pub const FTMRE_BASE: usize = 0x4002_0000;

// SAFETY: FTMRE register map, KE04 reference manual
const FCCOBIX: Reg<u8> = unsafe { Reg::new(FTMRE_BASE + 0x01) };
const FCLKDIV: Reg<u8> = unsafe { Reg::new(FTMRE_BASE + 0x03) };
const FSTAT: Reg<u8> = unsafe { Reg::new(FTMRE_BASE + 0x05) };
const FCCOBLO: Reg<u8> = unsafe { Reg::new(FTMRE_BASE + 0x08) };
const FCCOBHI: Reg<u8> = unsafe { Reg::new(FTMRE_BASE + 0x09) };

/// FCLKDIV FDIV field
const FDIV_MASK: u8 = 0x3F;
/// FCLKDIV "divider loaded" flag
const FDIVLD: u8 = 1 << 7;

/// FCCOBIX is a 3-bit index
const FCCOBIX_MASK: u8 = 0x07;

/// The FTMRE flash controller
pub struct Ftmre {
    _private: (),
}

impl Ftmre {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }

    /// Check whether FCLKDIV has been written since reset
    ///
    /// Erase and program commands fail with ACCERR until it has.
    pub fn clock_divider_loaded(&self) -> bool {
        FCLKDIV.read() & FDIVLD != 0
    }
}

impl FlashRegisters for Ftmre {
    fn status(&self) -> FlashStatus {
        FlashStatus::from_bits(FSTAT.read())
    }

    fn write_status(&mut self, status: FlashStatus) {
        FSTAT.write(status.into_bits());
    }

    fn set_clock_divider(&mut self, divider: u8) {
        FCLKDIV.write(divider & FDIV_MASK);
    }

    fn select_command_word(&mut self, index: u8) {
        FCCOBIX.write(index & FCCOBIX_MASK);
    }

    fn write_command_word(&mut self, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        FCCOBHI.write(hi);
        FCCOBLO.write(lo);
    }
}
