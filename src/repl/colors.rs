//! ANSI color helpers for pretty terminal output
//!
//! Simple, tasteful colors that work on most terminals.

/// ANSI escape codes
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    // Colors
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

use ansi::*;

/// Format a success message (green)
pub fn success(msg: &str) -> String {
    format!("{}{}{}", GREEN, msg, RESET)
}

/// Format an error message (red)
pub fn error(msg: &str) -> String {
    format!("{}{}{}", RED, msg, RESET)
}

/// Format a warning message (yellow)
pub fn warning(msg: &str) -> String {
    format!("{}{}{}", YELLOW, msg, RESET)
}

/// Format a status/info message (gray/dim)
pub fn status(msg: &str) -> String {
    format!("{}{}{}", GRAY, msg, RESET)
}

/// Format a header (bold)
pub fn header(msg: &str) -> String {
    format!("{}{}{}", BOLD, msg, RESET)
}

/// Format the user prompt
pub fn prompt() -> String {
    format!("{}{}>>> {}", BOLD, MAGENTA, RESET)
}

/// A dim horizontal separator
pub fn separator(width: usize) -> String {
    format!("{}{}{}", DIM, "─".repeat(width), RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_resets() {
        assert!(success("ok").ends_with(ansi::RESET));
        assert!(error("bad").starts_with(ansi::RED));
    }

    #[test]
    fn test_separator_width() {
        assert!(separator(3).contains("───"));
    }
}
