//! Internal clock source (ICS)
//!
//! The loader runs in FLL Engaged Internal (FEI) mode: the trimmed
//! internal reference (nominally 37.5 kHz) is multiplied by the FLL to
//! 48 MHz. The core runs at the ICS output and the bus at half of it.

use bitfield_struct::bitfield;

use crate::mmio::Reg;

/// ICS base address
pub const ICS_BASE: usize = 0x4006_4000;

// SAFETY: ICS register map, KE04 reference manual
const C1: Reg<u8> = unsafe { Reg::new(ICS_BASE) };
const C2: Reg<u8> = unsafe { Reg::new(ICS_BASE + 0x01) };
const S: Reg<u8> = unsafe { Reg::new(ICS_BASE + 0x04) };

/// Nominal internal reference frequency
pub const IRC_HZ: u32 = 37_500;

/// FLL multiplication factor
pub const FLL_FACTOR: u32 = 1280;

/// Bus clock divider applied by SIM after reset
pub const BUS_DIVIDER: u32 = 2;

/// ICS control register 1
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct IcsC1 {
    /// Internal reference stop enable
    #[bits(1)]
    pub irefsten: bool,
    /// Internal reference clock enable
    #[bits(1)]
    pub irclken: bool,
    /// Internal reference select (1 = IRC feeds the FLL)
    #[bits(1)]
    pub irefs: bool,
    /// External reference divider
    #[bits(3)]
    pub rdiv: u8,
    /// Clock source select (0 = FLL output)
    #[bits(2)]
    pub clks: u8,
}

/// ICS control register 2
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct IcsC2 {
    #[bits(4)]
    __: u8,
    /// Low power select
    #[bits(1)]
    pub lp: bool,
    /// Bus frequency divider (ICSOUT = FLL / 2^bdiv)
    #[bits(3)]
    pub bdiv: u8,
}

/// ICS status register
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct IcsStatus {
    #[bits(2)]
    __: u8,
    /// Clock mode status
    #[bits(2)]
    pub clkst: u8,
    /// Internal reference status
    #[bits(1)]
    pub irefst: bool,
    #[bits(1)]
    __: u8,
    /// FLL lock status
    #[bits(1)]
    pub lock: bool,
    /// Loss of lock status
    #[bits(1)]
    pub lols: bool,
}

/// Clock frequencies after bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    /// Core clock in Hz
    pub core_hz: u32,
    /// Bus clock in Hz (clocks the flash controller)
    pub bus_hz: u32,
}

impl Clocks {
    /// Frequencies produced by FEI mode with the given BDIV
    pub const fn fei(bdiv: u8) -> Self {
        let core_hz = (IRC_HZ * FLL_FACTOR) >> bdiv;
        Self {
            core_hz,
            bus_hz: core_hz / BUS_DIVIDER,
        }
    }
}

/// Register values for FEI at full speed
const FEI_C2: IcsC2 = IcsC2::new().with_bdiv(0);
const FEI_C1: IcsC1 = IcsC1::new().with_irefs(true).with_clks(0);

/// The internal clock source
pub struct Ics {
    _private: (),
}

impl Ics {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }

    /// Switch to FEI mode at 48 MHz core / 24 MHz bus
    ///
    /// Must run once, before the flash controller is used. Does not wait
    /// for the FLL to lock; the part keeps running from the FLL while it
    /// settles.
    pub fn init_fei(&mut self) -> Clocks {
        C2.write(FEI_C2.into_bits());
        C1.write(FEI_C1.into_bits());
        Clocks::fei(FEI_C2.bdiv())
    }

    /// Read the status register
    pub fn status(&self) -> IcsStatus {
        IcsStatus::from_bits(S.read())
    }

    /// Check whether the FLL has locked
    pub fn is_locked(&self) -> bool {
        self.status().lock()
    }
}
