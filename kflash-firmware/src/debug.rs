//! Debug LED blink
//!
//! SysTick toggles the LED on its own; the main loop never touches it.
//! Shows at a glance that the loader is running and not stuck in a
//! watchdog reset loop.

use core::cell::RefCell;

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use critical_section::Mutex;
use defmt::{info, warn};
use kflash_hal::OutputPin;
use kflash_hal_ke04::{Clocks, GpioA, Output};

use crate::config::{blink_reload, DEBUG_LED_PIN};

static LED: Mutex<RefCell<Option<Output>>> = Mutex::new(RefCell::new(None));

/// Claim the LED pin and start SysTick
pub fn start(gpioa: &mut GpioA, mut syst: SYST, clocks: &Clocks) {
    let Some(led) = gpioa.into_output(DEBUG_LED_PIN) else {
        warn!("Debug LED pin {} unavailable", DEBUG_LED_PIN);
        return;
    };
    critical_section::with(|cs| *LED.borrow(cs).borrow_mut() = Some(led));

    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(blink_reload(clocks));
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
    info!("Debug blink on pin {}", DEBUG_LED_PIN);
}

#[exception]
fn SysTick() {
    critical_section::with(|cs| {
        if let Some(led) = LED.borrow(cs).borrow_mut().as_mut() {
            led.toggle();
        }
    });
}
