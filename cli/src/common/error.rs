//! Error handling utilities for the CLI.

use dynvar::{Error, ReportConfig, render_error_to};

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, Error>;

/// Render an error to stderr and exit with code 1.
pub fn render_and_exit(error: Error, command: &str, no_color: bool) -> ! {
    let config = ReportConfig {
        color: !no_color,
        context: Some(command),
        ..Default::default()
    };
    render_error_to(&error, &mut std::io::stderr(), &config).ok();
    std::process::exit(1);
}
