//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions - no business logic.
//! All command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use dynvar::RenderConfig;

/// dynvar - Exercise the dynamic value from the command line
#[derive(Parser, Debug)]
#[command(name = "dynvar", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub render: RenderArgs,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the demonstration scenario
    Demo,

    /// Print a range of integers: `range END` or `range START END`
    Range(RangeArgs),

    /// Print a slice of the given integers
    Slice(SliceArgs),
}

/// Options controlling how values are printed.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Print Mapping entries in hash order instead of key order
    #[arg(long, global = true)]
    pub unsorted: bool,

    /// Print Object kinds without their type name
    #[arg(long, global = true)]
    pub hide_object_types: bool,

    /// Nesting depth past which values print as `...`; unbounded by default
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,
}

impl RenderArgs {
    pub fn config(&self) -> RenderConfig {
        RenderConfig {
            sort_keys: !self.unsorted,
            show_object_type: !self.hide_object_types,
            max_depth: self.max_depth,
        }
    }
}

/// Arguments for the `range` command.
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// `END`, or `START END`
    #[arg(required = true, num_args = 1..=2, allow_negative_numbers = true)]
    pub bounds: Vec<i64>,

    /// Distance between consecutive values
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub step: i64,
}

/// Arguments for the `slice` command.
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Integers to slice
    #[arg(allow_negative_numbers = true)]
    pub items: Vec<i64>,

    /// First index; negative counts from the end
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub start: i64,

    /// Index to stop before; defaults to the length
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<i64>,

    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub step: i64,
}
