//! Watchdog abstractions

/// Hardware watchdog refreshed by writing a fixed key sequence
///
/// The keys must reach the counter back to back. Anything that runs
/// between the writes (an interrupt handler, say) can break the unlock
/// window and the part resets. Callers are responsible for masking
/// interrupts around [`REFRESH_SEQUENCE`](Watchdog::REFRESH_SEQUENCE).
pub trait Watchdog {
    /// Values written to the counter register, in order, to refresh it
    const REFRESH_SEQUENCE: [u16; 2];

    /// Write one value to the refresh counter register
    fn write_counter(&mut self, value: u16);
}
