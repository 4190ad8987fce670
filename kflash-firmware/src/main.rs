//! kflash - KE04 flash loader
//!
//! Downloaded into SRAM and started by the host over SWD. Brings the
//! clocks up, then services erase and program requests the host leaves
//! in the `flash_api_state` block until the part is reset.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use {defmt_rtt as _, panic_probe as _};

use kflash_core::agent::Tick;
use kflash_core::state::{HardwareOp, State};
use kflash_core::Runtime;
use kflash_hal_ke04::Peripherals;

use crate::shared::SharedBlock;

mod config;
#[cfg(feature = "debug-blink")]
mod debug;
mod shared;

#[entry]
fn main() -> ! {
    info!("kflash loader starting...");

    let mut p = unwrap!(Peripherals::take());
    let mut block = unwrap!(SharedBlock::take());

    let clocks = p.ics.init_fei();
    info!("Clocks: core {} Hz, bus {} Hz", clocks.core_hz, clocks.bus_hz);
    if !p.ics.is_locked() {
        debug!("FLL not locked yet, running while it settles");
    }

    let config = config::agent_config(&clocks);
    info!(
        "Flash clock divider {=u8:#x}, config {}",
        config.flash_clock_divider, config
    );

    #[cfg(feature = "debug-blink")]
    {
        let core = unwrap!(cortex_m::Peripherals::take());
        debug::start(&mut p.gpioa, core.SYST, &clocks);
    }

    let mut ftmre = p.ftmre;
    let mut runtime = Runtime::new(config, p.wdog);
    info!("Command block at {=usize:#x}", block.location());

    loop {
        let tick = runtime.iterate(&mut block, &mut ftmre);
        if tick.previous == State::Init && !ftmre.clock_divider_loaded() {
            error!("FCLKDIV did not latch, flash commands will fail");
        }
        log_tick(&tick);
    }
}

fn log_tick(tick: &Tick) {
    if tick.transitioned() {
        match (tick.previous, tick.current) {
            (State::Init, State::Ready) => info!("Ready for commands"),
            (State::Ready, State::ProgramLoad(job)) => {
                info!("Program {} words at {=u32:#x}", job.length, job.address)
            }
            (State::Ready, State::Finish) => info!("Erase all blocks"),
            (_, State::Error(kind)) => error!("Halted: {}", kind),
            (previous, current) => debug!("{} -> {}", previous, current),
        }
    }

    if let Some(HardwareOp::Issue(command)) = &tick.issued {
        trace!("Issued {}", command);
    }

    if let Some(outcome) = tick.outcome {
        if outcome.is_ok() {
            info!("Command complete");
        } else {
            warn!(
                "Command failed: {}, FSTAT {=u8:#x}",
                outcome.result, outcome.hw_flags
            );
        }
    }
}
