//! ANSI color codes for terminal output.
//!
//! One slot per highlight category family:
//! - Magenta: keywords, language codes
//! - Red: tag identifiers, macro values
//! - Yellow: regular expressions
//! - Cyan: numbers, operators
//! - Blue: set variables
//! - Green: macros
//! - Dim: brackets, comments
//! - Reset: Return to default

/// ANSI color palette for highlighted OQL.
///
/// Uses only standard 16-color ANSI codes (no RGB).
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub magenta: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub bold: &'static str,
    pub invalid: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        magenta: "\x1b[35m",
        red: "\x1b[31m",
        yellow: "\x1b[33m",
        cyan: "\x1b[36m",
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        bold: "\x1b[1m",
        invalid: "\x1b[4;91m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        magenta: "",
        red: "",
        yellow: "",
        cyan: "",
        blue: "",
        green: "",
        dim: "",
        bold: "",
        invalid: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wrap `text` in `color` and a reset, or return it unchanged when disabled.
    pub fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            return text.to_string();
        }
        format!("{color}{text}{}", self.reset)
    }
}
