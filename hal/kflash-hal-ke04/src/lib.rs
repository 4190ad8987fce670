//! Kinetis KE04 HAL for the kflash loader
//!
//! Register-level implementations of the `kflash-hal` traits for the
//! KE04 family. There is no maintained peripheral access crate for this
//! part, so registers are reached through the small [`mmio`] layer.
//!
//! # Peripherals
//!
//! - [`ftmre::Ftmre`] - Flash controller (implements `FlashRegisters`)
//! - [`wdog::Wdog`] - Watchdog (implements `Watchdog`)
//! - [`ics::Ics`] - Internal clock source, FEI bring-up
//! - [`gpio::GpioA`] - GPIO port A-D outputs (implements `OutputPin`)
//!
//! All of them come from [`Peripherals::take`], which hands them out once.

#![no_std]

use core::cell::Cell;

use critical_section::Mutex;

pub mod ftmre;
pub mod gpio;
pub mod ics;
pub mod mmio;
pub mod wdog;

pub use ftmre::Ftmre;
pub use gpio::{GpioA, Output};
pub use ics::{Clocks, Ics};
pub use wdog::Wdog;

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// The KE04 peripherals used by the loader
pub struct Peripherals {
    /// Flash controller
    pub ftmre: Ftmre,
    /// Watchdog
    pub wdog: Wdog,
    /// Internal clock source
    pub ics: Ics,
    /// GPIO port A (pins PTA0-PTD7)
    pub gpioa: GpioA,
}

impl Peripherals {
    /// Take the peripherals
    ///
    /// Returns `None` on every call after the first.
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = TAKEN.borrow(cs);
            if taken.get() {
                return None;
            }
            taken.set(true);
            // SAFETY: guarded by TAKEN, so this is the only instance
            Some(unsafe { Self::steal() })
        })
    }

    /// Create the peripherals without checking whether they were taken
    ///
    /// # Safety
    ///
    /// Two live instances drive the same registers. The caller must make
    /// sure that cannot cause conflicting accesses.
    pub unsafe fn steal() -> Self {
        Self {
            ftmre: Ftmre::new(),
            wdog: Wdog::new(),
            ics: Ics::new(),
            gpioa: GpioA::new(),
        }
    }
}
