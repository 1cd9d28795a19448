//! Command implementations.
//!
//! Each subcommand has its own module with a `run` function.

pub mod demo;
pub mod range;
pub mod slice;
