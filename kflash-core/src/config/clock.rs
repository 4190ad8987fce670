//! Flash clock divider selection
//!
//! The flash controller needs its own clock between 0.8 and 1.05 MHz,
//! derived from the bus clock through FCLKDIV (divide by FDIV + 1).

/// Lowest flash clock the controller accepts
pub const FLASH_CLOCK_MIN_HZ: u32 = 800_000;

/// Highest flash clock the controller accepts
pub const FLASH_CLOCK_MAX_HZ: u32 = 1_050_000;

/// Flash clock the divider aims for
pub const FLASH_CLOCK_TARGET_HZ: u32 = 1_000_000;

/// Largest division FCLKDIV can express (6-bit FDIV field)
pub const MAX_CLOCK_DIVISION: u32 = 64;

/// Divider for the 24 MHz bus clock of the default clock setup
pub const DEFAULT_FLASH_CLOCK_DIVIDER: u8 = 0x17;

/// Compute the FDIV value for a bus clock
///
/// Picks the smallest division that brings the flash clock to 1 MHz or
/// below. Returns `None` if the result falls outside the accepted range.
pub const fn flash_clock_divider(bus_hz: u32) -> Option<u8> {
    let division = bus_hz.div_ceil(FLASH_CLOCK_TARGET_HZ);
    if division == 0 || division > MAX_CLOCK_DIVISION {
        return None;
    }

    let flash_hz = bus_hz / division;
    if flash_hz < FLASH_CLOCK_MIN_HZ || flash_hz > FLASH_CLOCK_MAX_HZ {
        return None;
    }

    Some((division - 1) as u8)
}
