//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, printed only with `--verbose`
//! - `error` helper for failures surfaced by the CLI
//!
//! # Example
//!
//! ```ignore
//! log!("write"; "{}", "sitemap.xml");
//! debug!("sitemap"; "{} urls in chunk {}", count, index);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Global quiet flag: suppresses `log!` output (debug output follows verbose)
static QUIET: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Silence regular log lines (set by `--quiet`)
pub fn set_quiet(q: bool) {
    QUIET.store(q, Ordering::SeqCst);
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::write_line($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    if QUIET.load(Ordering::SeqCst) {
        return;
    }
    write_line(module, message);
}

/// Write a prefixed line to stdout regardless of the quiet flag
pub fn write_line(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Print an error chain to stderr
pub fn error(err: &anyhow::Error) {
    let prefix = paint("[error]", Style::new().bright_red().bold(), Stream::Stderr);
    eprintln!("{prefix} {err}");
    for cause in err.chain().skip(1) {
        let label = paint("caused by:", Style::new().dimmed(), Stream::Stderr);
        eprintln!("  {label} {cause}");
    }
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let style = match module_lower {
        "build" | "done" => Style::new().bright_green(),
        "submit" => Style::new().bright_blue(),
        "error" => Style::new().bright_red(),
        "warning" | "hint" => Style::new().bright_magenta(),
        _ => Style::new().bright_yellow(),
    };
    paint(&format!("[{module}]"), style.bold(), Stream::Stdout)
}

/// Style text when the stream supports color (honors `--color`)
fn paint(text: &str, style: Style, stream: Stream) -> String {
    text.if_supports_color(stream, |t| t.style(style)).to_string()
}
