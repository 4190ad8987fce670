//! Watchdog (WDOG)
//!
//! The WDOG is enabled out of reset and keeps running for the life of the
//! loader. It is refreshed by writing two keys to CNT back to back.

use kflash_hal::watchdog::Watchdog;

use crate::mmio::Reg;

/// WDOG base address
pub const WDOG_BASE: usize = 0x4005_2000;

// SAFETY: WDOG register map, KE04 reference manual
const CNT: Reg<u16> = unsafe { Reg::new(WDOG_BASE + 0x02) };

/// The KE04 watchdog
pub struct Wdog {
    _private: (),
}

impl Wdog {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl Watchdog for Wdog {
    const REFRESH_SEQUENCE: [u16; 2] = [0x02A6, 0x80B4];

    fn write_counter(&mut self, value: u16) {
        CNT.write(value);
    }
}
