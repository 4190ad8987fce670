//! Build-time settings for the KE04 loader

use defmt::warn;
use kflash_core::config::{flash_clock_divider, AgentConfig, DEFAULT_FLASH_CLOCK_DIVIDER};
use kflash_hal_ke04::Clocks;

/// Debug LED: PTB0 (bit 8 of GPIOA)
#[cfg(feature = "debug-blink")]
pub const DEBUG_LED_PIN: u8 = 8;

/// LED toggles per second
#[cfg(feature = "debug-blink")]
pub const BLINK_TOGGLE_HZ: u32 = 4;

/// Largest SysTick reload value (24-bit counter)
#[cfg(feature = "debug-blink")]
const SYST_RELOAD_MAX: u32 = 0x00FF_FFFF;

/// Loader configuration for the clocks we ended up with
pub fn agent_config(clocks: &Clocks) -> AgentConfig {
    let divider = match flash_clock_divider(clocks.bus_hz) {
        Some(divider) => divider,
        None => {
            warn!(
                "No flash clock divider for bus at {} Hz, using {=u8:#x}",
                clocks.bus_hz, DEFAULT_FLASH_CLOCK_DIVIDER
            );
            DEFAULT_FLASH_CLOCK_DIVIDER
        }
    };

    let config = if cfg!(feature = "erase-only") {
        AgentConfig::degraded()
    } else {
        AgentConfig::new()
    };
    config.with_flash_clock_divider(divider)
}

/// SysTick reload for the blink rate
#[cfg(feature = "debug-blink")]
pub fn blink_reload(clocks: &Clocks) -> u32 {
    (clocks.core_hz / BLINK_TOGGLE_HZ).min(SYST_RELOAD_MAX + 1) - 1
}
