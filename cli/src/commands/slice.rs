//! The `slice` command - print a slice of the given integers.

use dynvar::{RenderConfig, Value, ops};

use crate::cli::SliceArgs;
use crate::common::CliResult;

/// Run the slice command.
pub fn run(args: SliceArgs, config: RenderConfig) -> CliResult<()> {
    let len = i64::try_from(args.items.len()).unwrap_or(i64::MAX);
    let end = args.end.unwrap_or(len);
    let items: Value = args.items.into_iter().map(Value::int).collect();

    tracing::debug!(len, start = args.start, end, step = args.step, "Slicing");
    let value = ops::slice(&items, args.start, end, args.step)?;
    println!("{}", value.display(config));
    Ok(())
}
