//! dynvar CLI - Exercise the dynamic value from the command line.

mod cli;
mod commands;
mod common;

use clap::Parser;
use cli::{Cli, Command};

fn main() {
    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    let config = cli.render.config();

    let (name, result) = match cli.command {
        Command::Demo => ("demo", commands::demo::run(config)),
        Command::Range(args) => ("range", commands::range::run(args, config)),
        Command::Slice(args) => ("slice", commands::slice::run(args, config)),
    };

    if let Err(e) = result {
        common::error::render_and_exit(e, name, cli.no_color);
    }
}
