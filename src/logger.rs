//! Logging utilities with colored output and progress display.
//!
//! Everything here writes to stderr. Stdout is reserved for defect lines,
//! index output and JSON dumps so they can be piped.
//!
//! # Example
//!
//! ```ignore
//! log!("check"; "{} pages, {} anchors", pages, anchors);
//!
//! let progress = ProgressLine::new(&[("pages", 120)]);
//! progress.inc("pages");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream};
use parking_lot::Mutex;
use std::{
    io::{IsTerminal, Write, stderr},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Whether a progress line currently owns the last terminal row.
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Last progress line drawn, redrawn below interleaved log output.
static BAR_LINE: Mutex<String> = Mutex::new(String::new());

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
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut err = stderr().lock();

    if BAR_ACTIVE.load(Ordering::SeqCst) {
        // Progress line has no trailing newline; wipe it before printing
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(err, "{prefix} {message}").ok();

    if let Some(bar) = active_bar() {
        write!(err, "{bar}").ok();
    }
    err.flush().ok();
}

/// Progress line to redraw under a log message, if one is on screen.
fn active_bar() -> Option<String> {
    if !BAR_ACTIVE.load(Ordering::SeqCst) {
        return None;
    }
    let line = BAR_LINE.lock();
    (!line.is_empty()).then(|| line.clone())
}

/// Apply color to a module prefix based on module type
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    let module = module.to_ascii_lowercase();
    prefix
        .if_supports_color(Stream::Stderr, |p| match module.as_str() {
            "error" => p.bright_red().bold().to_string(),
            "warn" | "config" => p.bright_magenta().bold().to_string(),
            "check" => p.bright_green().bold().to_string(),
            _ => p.bright_yellow().bold().to_string(),
        })
        .to_string()
}

// ============================================================================
// Progress Line (single-line counters)
// ============================================================================

/// Single-line progress display with multiple counters
///
/// Displays: `[parse] pages(42/69) assets(3/3)`
///
/// Updates use `try_lock`, so worker threads never block on the terminal.
/// When stderr is not a terminal nothing is drawn.
pub struct ProgressLine {
    counters: Vec<Counter>,
    lock: Mutex<()>,
    enabled: bool,
}

struct Counter {
    name: &'static str,
    total: usize,
    current: AtomicUsize,
}

impl ProgressLine {
    /// Create a progress display. Counters with a zero total are dropped.
    pub fn new(items: &[(&'static str, usize)]) -> Self {
        let counters: Vec<_> = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|(name, total)| Counter {
                name,
                total: *total,
                current: AtomicUsize::new(0),
            })
            .collect();

        let enabled = !counters.is_empty() && stderr().is_terminal();
        BAR_ACTIVE.store(enabled, Ordering::SeqCst);

        let progress = Self {
            counters,
            lock: Mutex::new(()),
            enabled,
        };
        progress.display();
        progress
    }

    /// Increment the counter with the given name.
    pub fn inc(&self, name: &str) {
        let Some(counter) = self.counters.iter().find(|c| c.name == name) else {
            return;
        };
        counter.current.fetch_add(1, Ordering::Relaxed);
        if self.lock.try_lock().is_some() {
            self.display();
        }
    }

    fn line(&self) -> String {
        let parts: Vec<_> = self
            .counters
            .iter()
            .map(|c| {
                format!(
                    "{}({}/{})",
                    c.name,
                    c.current.load(Ordering::Relaxed),
                    c.total
                )
            })
            .collect();
        format!("{} {}", colorize_prefix("parse"), parts.join(" "))
    }

    fn display(&self) {
        if !self.enabled {
            return;
        }
        let line = self.line();
        let mut err = stderr().lock();
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        write!(err, "{line}").ok();
        err.flush().ok();
        *BAR_LINE.lock() = line;
    }

    /// Finish progress display, keeping the final counts on screen.
    pub fn finish(self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);

        if self.enabled {
            BAR_LINE.lock().clear();
            let _guard = self.lock.lock();
            let mut err = stderr().lock();
            execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
            writeln!(err, "{}", self.line()).ok();
            err.flush().ok();
        }

        std::mem::forget(self);
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);
        if !self.enabled {
            return;
        }
        BAR_LINE.lock().clear();
        let mut err = stderr().lock();
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        err.flush().ok();
    }
}
