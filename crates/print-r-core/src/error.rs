//! Error types for `print_r()` parsing.
//!
//! Every failure is terminal for the parse call that produced it: the caller
//! receives exactly one error and no partially built tree.

use std::fmt;
use thiserror::Error;

/// The main error type for `print_r()` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct PrintRError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The 1-based line where the error was detected, or 0 when no line applies.
    pub line: usize,
    /// Optional context about what was being parsed.
    pub context: Option<String>,
    /// The offending line, for debugging.
    pub input_preview: Option<String>,
}

impl fmt::Display for PrintRError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)?;
        } else {
            write!(f, "{} at line {}", self.kind, self.line)?;
        }
        if let Some(ref ctx) = self.context {
            write!(f, " ({})", ctx)?;
        }
        if let Some(ref preview) = self.input_preview {
            write!(f, "\n{}", preview)?;
        }
        Ok(())
    }
}

/// Specific kinds of parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not text.
    #[error("input must be a non-empty string")]
    InvalidInput,

    /// The input is empty or whitespace only.
    #[error("empty input")]
    EmptyInput,

    /// The first non-blank line is not an `Array` header.
    #[error("expected Array declaration at top level")]
    TopLevelNotArray,

    /// No `(` line follows an `Array` header.
    #[error("missing opening parenthesis for Array")]
    MissingOpenParen,

    /// Input ended before a container's closing `)`.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A bare `Array` line appeared inside a container with no key to own it.
    #[error("unexpected Array declaration without key")]
    AmbiguousNestedArray,

    /// Nesting depth exceeded the configured limit.
    #[error("maximum nesting depth ({0}) exceeded")]
    MaxDepthExceeded(usize),

    /// An unrecognized line inside a container, reported only in strict mode.
    #[error("unexpected line: {0}")]
    UnexpectedLine(String),
}

impl PrintRError {
    /// Create a new error with the given kind at a 1-based line.
    #[inline]
    pub fn new(kind: ErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            context: None,
            input_preview: None,
        }
    }

    /// Add context to the error.
    #[inline]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach the offending line, with a caret under its first non-blank character.
    #[cold]
    pub fn with_input_preview(mut self, line: &str) -> Self {
        let indent = line.len() - line.trim_start().len();
        let mut result = String::with_capacity(line.len() + indent + 2);
        result.push_str(line);
        result.push('\n');
        result.push_str(&" ".repeat(indent));
        result.push('^');
        self.input_preview = Some(result);
        self
    }
}

/// Result type alias for `print_r()` parsing.
pub type Result<T> = std::result::Result<T, PrintRError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = PrintRError::new(ErrorKind::UnexpectedEndOfInput, 4);
        assert_eq!(err.to_string(), "unexpected end of input at line 4");
    }

    #[test]
    fn test_display_without_line() {
        let err = PrintRError::new(ErrorKind::EmptyInput, 0);
        assert_eq!(err.to_string(), "empty input");
    }

    #[test]
    fn test_display_context_and_preview() {
        let err = PrintRError::new(ErrorKind::AmbiguousNestedArray, 3)
            .with_context("inside container opened at line 2")
            .with_input_preview("    Array");
        assert_eq!(
            err.to_string(),
            "unexpected Array declaration without key at line 3 \
             (inside container opened at line 2)\n    Array\n    ^"
        );
    }
}
