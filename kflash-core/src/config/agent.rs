//! Loader behavior configuration

use kflash_protocol::CommandCode;

use super::clock::DEFAULT_FLASH_CLOCK_DIVIDER;

/// Longwords programmed per controller command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Granularity {
    /// One longword per command
    Single,
    /// Two longwords (one phrase) per command
    #[default]
    Double,
}

impl Granularity {
    /// Words per command
    pub const fn words(self) -> u32 {
        match self {
            Granularity::Single => 1,
            Granularity::Double => 2,
        }
    }
}

/// Commands this build services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    pub erase: bool,
    pub program: bool,
}

impl Capabilities {
    /// Every command
    pub const fn all() -> Self {
        Self {
            erase: true,
            program: true,
        }
    }

    /// Check if `command` is serviced
    pub const fn supports(&self, command: CommandCode) -> bool {
        match command {
            CommandCode::Erase => self.erase,
            CommandCode::Program => self.program,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Loader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// FDIV value written to FCLKDIV during init
    pub flash_clock_divider: u8,
    /// Longwords per program command
    pub granularity: Granularity,
    /// Serviced commands
    pub capabilities: Capabilities,
    /// Stop servicing commands after an unsupported one
    ///
    /// When false the loader reports NOT_IMPLEMENTED and keeps going.
    pub halt_on_unsupported: bool,
}

impl AgentConfig {
    /// Full build: erase and program, two words per command
    pub const fn new() -> Self {
        Self {
            flash_clock_divider: DEFAULT_FLASH_CLOCK_DIVIDER,
            granularity: Granularity::Double,
            capabilities: Capabilities::all(),
            halt_on_unsupported: false,
        }
    }

    /// Erase-only build that halts on anything else
    pub const fn degraded() -> Self {
        Self {
            flash_clock_divider: DEFAULT_FLASH_CLOCK_DIVIDER,
            granularity: Granularity::Double,
            capabilities: Capabilities {
                erase: true,
                program: false,
            },
            halt_on_unsupported: true,
        }
    }

    /// Replace the flash clock divider
    pub const fn with_flash_clock_divider(mut self, divider: u8) -> Self {
        self.flash_clock_divider = divider;
        self
    }

    /// Replace the program granularity
    pub const fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
