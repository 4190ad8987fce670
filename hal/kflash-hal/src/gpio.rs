//! GPIO pin abstractions
//!
//! The loader only drives outputs, and only for the debug blink.

/// Push-pull digital output
pub trait OutputPin {
    /// Drive the pin to logic 1
    fn set_high(&mut self);

    /// Drive the pin to logic 0
    fn set_low(&mut self);

    /// Invert the driven level
    fn toggle(&mut self);
}
