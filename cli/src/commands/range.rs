//! The `range` command - print a range of integers.

use dynvar::{RenderConfig, ops};

use crate::cli::RangeArgs;
use crate::common::CliResult;

/// Run the range command.
pub fn run(args: RangeArgs, config: RenderConfig) -> CliResult<()> {
    let (start, end) = match args.bounds.as_slice() {
        [end] => (0, *end),
        [start, end, ..] => (*start, *end),
        [] => (0, 0),
    };
    tracing::debug!(start, end, step = args.step, "Building range");
    let value = ops::range(start, end, args.step)?;
    println!("{}", value.display(config));
    Ok(())
}
