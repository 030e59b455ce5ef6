//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::infrastructure::{InfraError, InfraResult};

/// Print failure (red ✗) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", checkmark(msg));
}

/// Success line (green checkmark) for composing into rendered output
pub fn checkmark(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("{} {}", "✓".green(), msg)
}

/// Print section header (bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().bold());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a value as pretty JSON (2-space indent, key order preserved)
pub fn json(value: &Value) -> InfraResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| InfraError::io("serialize JSON output", e.into()))?;
    lines(&[text])
}

/// Print pre-rendered lines to stdout
pub fn lines(lines: &[String]) -> InfraResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line).map_err(|e| InfraError::io("write output", e))?;
    }
    out.flush().map_err(|e| InfraError::io("write output", e))
}

/// Run `f` behind a stderr spinner; the spinner is hidden when stderr is not a terminal.
pub fn with_spinner<T, E>(message: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = f();
    spinner.finish_and_clear();
    result
}
