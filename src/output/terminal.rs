//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use colored::Colorize;

/// Width of the `=` rule around warnings.
const RULE_WIDTH: usize = 50;

/// Format a titled, numbered list of steps.
///
/// # Arguments
/// * `name` - Title, printed upper case after a blank line
/// * `steps` - The steps, numbered from 1
///
/// # Returns
/// The list without a trailing newline
pub fn format_steps<S: AsRef<str>>(name: &str, steps: &[S]) -> String {
    let mut out = format!("\n{}:", name.to_uppercase());
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("\nStep {}: {}", i + 1, step.as_ref()));
    }
    out
}

/// Format `message` between two `=` rules, in red when the terminal supports it.
pub fn large_warning(message: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{message}\n{rule}").red().to_string()
}
