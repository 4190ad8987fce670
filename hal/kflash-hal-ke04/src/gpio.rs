//! GPIO port A
//!
//! GPIOA covers pins PTA0-PTD7 as bits 0-31 of one 32-bit port. Set,
//! clear and toggle go through their own write-only registers, so an
//! [`Output`] never needs a read-modify-write to drive its pin.

use kflash_hal::gpio::OutputPin;

use crate::mmio::Reg;

/// GPIOA base address
pub const GPIOA_BASE: usize = 0x400F_F000;

/// Number of pins on the port
pub const PIN_COUNT: u8 = 32;

// SAFETY: GPIO register map, KE04 reference manual
const PSOR: Reg<u32> = unsafe { Reg::new(GPIOA_BASE + 0x04) };
const PCOR: Reg<u32> = unsafe { Reg::new(GPIOA_BASE + 0x08) };
const PTOR: Reg<u32> = unsafe { Reg::new(GPIOA_BASE + 0x0C) };
const PDDR: Reg<u32> = unsafe { Reg::new(GPIOA_BASE + 0x14) };
const PIDR: Reg<u32> = unsafe { Reg::new(GPIOA_BASE + 0x18) };

/// GPIO port A, tracking which pins have been handed out
pub struct GpioA {
    /// Bitmask of claimed pins
    claimed: u32,
}

impl GpioA {
    pub(crate) const fn new() -> Self {
        Self { claimed: 0 }
    }

    /// Claim a pin as a push-pull output, initially high
    ///
    /// Returns `None` if the pin does not exist or was already claimed.
    pub fn into_output(&mut self, pin: u8) -> Option<Output> {
        let mask = pin_mask(pin)?;
        if self.claimed & mask != 0 {
            return None;
        }
        self.claimed |= mask;

        // Disable the input buffer, drive high, then switch to output
        PIDR.modify(|v| v | mask);
        PSOR.write(mask);
        PDDR.modify(|v| v | mask);

        Some(Output { mask })
    }

    /// Check if a pin has been claimed
    pub fn is_claimed(&self, pin: u8) -> bool {
        pin_mask(pin).is_some_and(|mask| self.claimed & mask != 0)
    }
}

/// Bit of `pin` within the port registers
const fn pin_mask(pin: u8) -> Option<u32> {
    if pin < PIN_COUNT {
        Some(1 << pin)
    } else {
        None
    }
}

/// A claimed output pin
#[derive(Debug)]
pub struct Output {
    mask: u32,
}

impl OutputPin for Output {
    fn set_high(&mut self) {
        PSOR.write(self.mask);
    }

    fn set_low(&mut self) {
        PCOR.write(self.mask);
    }

    fn toggle(&mut self) {
        PTOR.write(self.mask);
    }
}
