//! Command state machine
//!
//! [`State::step`] is a pure function of the current state, the request
//! block, the flash controller's completion status and the configuration.
//! It returns the next state plus at most one hardware operation and one
//! write to the request block; applying those is up to the caller (see
//! [`crate::agent::FlashAgent`]).

pub mod job;
pub mod machine;
pub mod step;

pub use job::{ProgramJob, RequestError};
pub use machine::{ErrorKind, State};
pub use step::{HardwareOp, Mutation, Step};
