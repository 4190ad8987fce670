//! Flash loader command block protocol
//!
//! This crate defines the memory-mapped structure shared between the
//! resident flash loader and the host driving it over SWD. The host never
//! talks to the firmware any other way: it pokes words into the block and
//! polls the status word until the loader hands the block back.
//!
//! # Block layout
//!
//! ```text
//! ┌────────┬─────────┬────────┬──────────────────────┐
//! │ STATUS │ ADDRESS │ LENGTH │ BUFFER               │
//! │ u32    │ u32     │ u32    │ 64 × u32             │
//! └────────┴─────────┴────────┴──────────────────────┘
//!   +0x00    +0x04     +0x08    +0x0C
//! ```
//!
//! # Status word
//!
//! ```text
//!  31            16 15        8 7      4  3   2   0
//! ┌────────────────┬───────────┬────────┬───┬─────┐
//! │ reserved       │ hw_flags  │ result │ R │ cmd │
//! └────────────────┴───────────┴────────┴───┴─────┘
//! ```
//!
//! The host owns every field while `R` (ready) is 1. It submits a command by
//! filling in `address`/`length`/`buffer` and then writing a status word
//! with `R` = 0 and the command code. From then on the loader owns the
//! status word until it writes the result back with `R` = 1.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod block;
pub mod codes;
pub mod status;

pub use block::{pack_words, CommandBlock, BUFFER_LEN, WORD_BYTES};
pub use codes::{CommandCode, ResultCode};
pub use status::StatusWord;
