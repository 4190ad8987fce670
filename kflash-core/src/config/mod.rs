//! Configuration types
//!
//! Everything that differs between builds of the loader: the flash clock
//! divider, how many words one program command carries, and which commands
//! the build services.

pub mod agent;
pub mod clock;

pub use agent::*;
pub use clock::*;
