//! Shared helper functions for CLI commands
//!
//! This module contains small formatting utilities used by the renderers and
//! the status lines printed by commands.

use console::style;

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Counts characters rather than bytes, since labels carry `–` and accented
/// names.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Horizontal bar proportional to `value / max`, at most `width` cells
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

/// Print an informational status line to stderr unless quiet
pub fn info(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{} {}", style("→").blue(), message);
    }
}

/// Print a success status line to stderr unless quiet
pub fn success(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{} {}", style("✓").green(), message);
    }
}

/// Print a warning to stderr (never suppressed)
pub fn warn(message: &str) {
    eprintln!("{} {}", style("!").yellow(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("DN 200 – Método", 10), "DN 200 ...");
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(10.0, 10.0, 4), "████");
        assert_eq!(bar(5.0, 10.0, 4), "██");
        assert_eq!(bar(0.1, 10.0, 4), "█");
        assert_eq!(bar(0.0, 10.0, 4), "");
        assert_eq!(bar(5.0, 0.0, 4), "");
    }
}
