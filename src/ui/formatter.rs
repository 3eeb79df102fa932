//! Formatting functions for UI output.
//!
//! Diagnostics (errors, warnings, progress) go to stderr so stdout carries
//! nothing but the final status line. Colors come from `console`, which turns
//! them off when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::version::BumpOutcome;

/// The one-line summary printed on success.
///
/// `<name> set to <version> (...)` when the manifest changed, `<name> is at
/// <version> (...)` otherwise; the suffix is `published` when the registry
/// already has this version and `to publish` when it does not.
pub fn status_line(name: &str, outcome: &BumpOutcome) -> String {
    let verb = if outcome.local_changed {
        "set to"
    } else {
        "is at"
    };
    let state = if outcome.remote_current {
        "published"
    } else {
        "to publish"
    };
    format!("{} {} {} ({})", name, verb, outcome.version, state)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a usage line for an argument error.
pub fn display_usage(usage: &str) {
    eprintln!("{}", usage);
}

/// Print the success status line on stdout.
pub fn display_outcome(name: &str, outcome: &BumpOutcome) {
    println!("{}", status_line(name, outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    fn outcome(version: &str, local_changed: bool, remote_current: bool) -> BumpOutcome {
        BumpOutcome {
            version: Version::parse(version).unwrap(),
            local_changed,
            remote_current,
        }
    }

    #[test]
    fn test_status_line_unchanged_published() {
        assert_eq!(
            status_line("pkg", &outcome("1.2.3", false, true)),
            "pkg is at 1.2.3 (published)"
        );
    }

    #[test]
    fn test_status_line_changed_to_publish() {
        assert_eq!(
            status_line("pkg", &outcome("1.3.0", true, false)),
            "pkg set to 1.3.0 (to publish)"
        );
    }

    #[test]
    fn test_status_line_changed_published() {
        assert_eq!(
            status_line("@xutl/json", &outcome("2.0.0", true, true)),
            "@xutl/json set to 2.0.0 (published)"
        );
    }

    #[test]
    fn test_display_functions() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
        display_status("test status");
        display_success("test success");
    }
}
