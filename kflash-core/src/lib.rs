//! Board-agnostic core of the kflash loader
//!
//! Everything that decides what the loader does, with no register access
//! of its own:
//!
//! - [`interface`] - read/write ports onto the shared command block
//! - [`flash`] - flash controller command sequencing and completion polling
//! - [`state`] - the command state machine as a pure step function
//! - [`agent`] - applies state machine steps to real hardware
//! - [`safety`] - watchdog supervision
//! - [`runtime`] - one main loop iteration
//! - [`config`] - build configuration and flash clock divider selection
//!
//! Hardware comes in through the `kflash-hal` traits, so the whole crate
//! runs under `cargo test` on the host against fakes.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod agent;
pub mod config;
pub mod flash;
pub mod interface;
pub mod runtime;
pub mod safety;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{FlashAgent, Tick};
pub use config::AgentConfig;
pub use interface::{CommandPort, Outcome, RequestView};
pub use runtime::Runtime;
pub use state::State;
