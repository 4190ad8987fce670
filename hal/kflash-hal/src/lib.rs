//! kflash Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the loader core is written
//! against. Chip-specific crates implement them on real registers; the
//! core's tests implement them on plain memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kflash-firmware                        │
//! └─────────────────────────────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │  kflash-core    │   │ kflash-hal-ke04 │
//! └─────────────────┘   └─────────────────┘
//!          │                     │
//!          └──────────┬──────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kflash-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::FlashRegisters`] - Flash controller register file
//! - [`watchdog::Watchdog`] - Watchdog refresh counter
//! - [`gpio::OutputPin`] - Digital output (debug blink)

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use flash::{FlashRegisters, FlashStatus};
pub use gpio::OutputPin;
pub use watchdog::Watchdog;
