//! User interface module - status line and diagnostic output.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_outcome, display_status, display_success,
    display_usage, status_line,
};

/// Prints progress lines only when verbose output was requested
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    pub verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Reporter { verbose }
    }

    pub fn status(&self, message: &str) {
        if self.verbose {
            display_status(message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbose {
            display_success(message);
        }
    }
}
