//! Error report rendering
//!
//! This module renders [`Error`]s as short terminal reports with an error
//! code, the message, the failing operation and a help line.

use crate::{Error, Kind};
use nu_ansi_term::{Color, Style};
use std::io::Write;

/// Character set for rendering error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Use Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Use ASCII-only characters for compatibility.
    Ascii,
}

/// Configuration for error reports.
#[derive(Debug, Clone)]
pub struct ReportConfig<'a> {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// What was being done when the error happened, e.g. the CLI command.
    pub context: Option<&'a str>,
    /// The character set to use for rendering.
    pub charset: CharSet,
}

impl Default for ReportConfig<'_> {
    fn default() -> Self {
        ReportConfig::default()
    }
}

impl ReportConfig<'_> {
    const fn default() -> Self {
        Self {
            color: true,
            context: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Render an error to stderr using the default config.
///
/// # Example
/// ```no_run
/// use dynvar::{Value, render_error};
///
/// if let Err(e) = Value::int(1).as_text() {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to(error, &mut std::io::stderr(), &ReportConfig::default()).ok();
}

/// Render an error to a writer with the given configuration.
///
/// # Example
/// ```
/// use dynvar::{ReportConfig, ops::range, render_error_to};
///
/// let err = range(0, 10, 0).unwrap_err();
/// let mut buf = Vec::new();
/// let config = ReportConfig { color: false, ..Default::default() };
/// render_error_to(&err, &mut buf, &config).unwrap();
/// assert!(String::from_utf8_lossy(&buf).starts_with("[E005] Error: invalid argument"));
/// ```
pub fn render_error_to(
    error: &Error,
    writer: &mut dyn Write,
    config: &ReportConfig,
) -> std::io::Result<()> {
    let (branch, last) = match config.charset {
        CharSet::Unicode => ("├─", "╰─"),
        CharSet::Ascii => ("|-", "`-"),
    };
    let paint = |style: Style, text: &str| {
        if config.color {
            style.paint(text).to_string()
        } else {
            text.to_owned()
        }
    };

    writeln!(
        writer,
        "[{}] {}: {}",
        code(error),
        paint(Color::Red.bold(), "Error"),
        error
    )?;
    if let Some(context) = config.context {
        writeln!(writer, " {branch} in {}", paint(Style::new().bold(), context))?;
    }
    writeln!(
        writer,
        " {last} {}: {}",
        paint(Color::Cyan.normal(), "help"),
        help(error)
    )
}

fn code(error: &Error) -> &'static str {
    match error {
        Error::TypeMismatch { .. } => "E001",
        Error::DowncastFailed { .. } => "E002",
        Error::IndexOutOfRange { .. } => "E003",
        Error::KeyNotFound(_) => "E004",
        Error::InvalidArgument(_) => "E005",
        Error::InvalidOperation { .. } => "E006",
    }
}

fn help(error: &Error) -> String {
    match error {
        Error::TypeMismatch { expected, .. } => {
            format!("check `kind()` before reading the value as {expected}")
        }
        Error::DowncastFailed { .. } => {
            "the payload was built from a different type; check `is::<T>()` first".to_owned()
        }
        Error::IndexOutOfRange { len, .. } => match len {
            0 => "the sequence is empty".to_owned(),
            len => format!("valid indices are 0..={}", len - 1),
        },
        Error::KeyNotFound(_) => "use `set_key` to add the entry first".to_owned(),
        Error::InvalidArgument(msg) if msg.contains("step") => {
            "use a positive or negative step".to_owned()
        }
        Error::InvalidArgument(_) => "the argument is outside the supported range".to_owned(),
        Error::InvalidOperation { op, .. } => {
            let target = match *op {
                "get_key" | "get_key_mut" | "set_key" => Kind::Mapping.name(),
                "len" => "a Sequence or Mapping",
                _ => Kind::Sequence.name(),
            };
            format!("`{op}` needs {target}")
        }
    }
}
