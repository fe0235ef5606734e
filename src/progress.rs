// src/progress.rs
//! Progress reporting sink injected into the orchestrator, so scans stay
//! independently testable instead of writing to process-global state.

use colored::Colorize;

pub trait Progress: Sync {
    /// A phase has begun.
    fn start(&self, msg: &str);
    /// A phase finished successfully.
    fn succeed(&self, msg: &str);
    /// Informational note.
    fn info(&self, msg: &str);
    /// Non-fatal problem.
    fn warn(&self, msg: &str);
}

/// Console sink used by the CLI.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn start(&self, msg: &str) {
        println!("{} {msg}", "...".blue());
    }

    fn succeed(&self, msg: &str) {
        println!("{} {msg}", "ok".green().bold());
    }

    fn info(&self, msg: &str) {
        println!("{} {msg}", "i".cyan());
    }

    fn warn(&self, msg: &str) {
        eprintln!("{} {msg}", "WARN".yellow().bold());
    }
}

/// Discards everything. Used by tests and JSON output mode, where stdout
/// must stay machine-readable.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn start(&self, _msg: &str) {}
    fn succeed(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
}
