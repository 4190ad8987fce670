//! Liveness supervision
//!
//! The watchdog must be refreshed on every pass through the main loop,
//! whatever the state machine is doing. A long program job that starves
//! it resets the part with flash half written.

mod supervisor;

pub use supervisor::LivenessSupervisor;
