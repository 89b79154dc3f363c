//! Error types for parsing and grammar construction
//!
//! Matching itself never produces these. Nodes report failure through the
//! complemented-position encoding, and only the entry points turn a final
//! failure into a [`ParseError`]. Grammar misuse is caught while building and
//! reported as a [`BuildError`] from the offending builder call.
//!
//! # Example Output
//!
//! ```text
//! Parsing failed at index 5:
//! 2024-1x-05
//!      ^
//! ```

use std::fmt;

/// Result alias used by the builder API
pub type BuildResult<T> = Result<T, BuildError>;

/// Result alias returned by the parse entry points
pub type ParseOutcome<T> = Result<T, ParseError>;

/// A number exceeded the range of `i64` while digits were being accumulated
///
/// This is the only condition that aborts matching outright. It is never
/// treated as an ordinary mismatch, so optional blocks and alternations do
/// not swallow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOverflow {
    /// Char index where the offending number began
    pub position: usize,
}

impl fmt::Display for NumberOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsed number exceeds the max i64 value")
    }
}

impl std::error::Error for NumberOverflow {}

/// Error returned when text can't be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No node in the grammar could match at some index
    Failed {
        /// Char index where parsing failed
        index: usize,
        /// The text that was being parsed
        text: String,
    },

    /// The grammar matched but left characters unconsumed
    UnexpectedCharacter {
        /// Char index of the first unconsumed character
        index: usize,
        /// The text that was being parsed
        text: String,
    },

    /// A number didn't fit in an `i64`
    Overflow {
        /// Char index where the number began
        index: usize,
        /// The text that was being parsed
        text: String,
        /// The underlying arithmetic failure
        cause: NumberOverflow,
    },
}

impl ParseError {
    /// The char index where parsing stopped
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            ParseError::Failed { index, .. }
            | ParseError::UnexpectedCharacter { index, .. }
            | ParseError::Overflow { index, .. } => *index,
        }
    }

    /// The text that was being parsed when the error occurred
    #[inline]
    pub fn parsed_text(&self) -> &str {
        match self {
            ParseError::Failed { text, .. }
            | ParseError::UnexpectedCharacter { text, .. }
            | ParseError::Overflow { text, .. } => text,
        }
    }

    /// Render the parsed text with a caret under the failing character
    pub fn format_with_source(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.to_string());
        output.push_str(":\n");
        output.push_str(self.parsed_text());
        output.push('\n');

        for _ in 0..self.index() {
            output.push(' ');
        }
        output.push_str("^\n");

        output
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Failed { index, .. } => {
                write!(f, "Parsing failed at index {}", index)
            }
            ParseError::UnexpectedCharacter { index, .. } => {
                write!(f, "Unexpected character at index {}", index)
            }
            ParseError::Overflow { index, cause, .. } => {
                write!(f, "{} (number starting at index {})", cause, index)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Overflow { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Error raised when a grammar is assembled incorrectly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An alternation was given fewer than two branches
    TooFewAlternatives {
        /// Number of branches supplied
        count: usize,
    },

    /// A length or length range falls outside what a node supports
    InvalidLength {
        /// What the length describes, e.g. "fraction length"
        what: &'static str,
        /// Requested minimum
        min: usize,
        /// Requested maximum
        max: usize,
        /// Supported bounds, e.g. "1-19"
        allowed: &'static str,
    },

    /// A fraction scale is out of range or can't hold the fraction digits
    InvalidScale {
        /// Requested scale
        scale: usize,
        /// Maximum number of fraction digits requested
        max_length: usize,
    },

    /// A localized node was given no text styles
    EmptyStyles,

    /// A time zone name node was built without a disambiguation strategy
    MissingDisambiguation,

    /// A number style is missing required characters
    InvalidNumberStyle {
        /// Reason the style was rejected
        reason: &'static str,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::TooFewAlternatives { count } => {
                write!(f, "anyOf requires at least 2 child parsers, got {}", count)
            }
            BuildError::InvalidLength {
                what,
                min,
                max,
                allowed,
            } => {
                if min > max {
                    write!(f, "minimum {} {} must be <= maximum {}", what, min, max)
                } else {
                    write!(f, "{} {}..={} must be within {}", what, min, max, allowed)
                }
            }
            BuildError::InvalidScale { scale, max_length } => {
                write!(
                    f,
                    "fraction scale {} must be from 1-9 and hold up to {} digits",
                    scale, max_length
                )
            }
            BuildError::EmptyStyles => write!(f, "at least one text style is required"),
            BuildError::MissingDisambiguation => {
                write!(f, "time zone name parsing requires a disambiguation strategy")
            }
            BuildError::InvalidNumberStyle { reason } => {
                write!(f, "invalid number style: {}", reason)
            }
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_overflow_keeps_cause() {
        let error = ParseError::Overflow {
            index: 3,
            text: "abc99999999999999999999".to_string(),
            cause: NumberOverflow { position: 3 },
        };

        assert_eq!(error.index(), 3);
        let source = error.source().expect("overflow should carry a cause");
        assert!(source.to_string().contains("max i64"));
    }

    #[test]
    fn test_format_with_source() {
        let error = ParseError::Failed {
            index: 5,
            text: "2024-1x-05".to_string(),
        };

        let formatted = error.format_with_source();
        assert!(formatted.starts_with("Parsing failed at index 5"));
        assert!(formatted.ends_with("2024-1x-05\n     ^\n"));
    }

    #[test]
    fn test_build_error_messages() {
        let error = BuildError::InvalidLength {
            what: "length",
            min: 5,
            max: 2,
            allowed: "1-19",
        };
        assert_eq!(error.to_string(), "minimum length 5 must be <= maximum 2");

        let error = BuildError::TooFewAlternatives { count: 1 };
        assert!(error.to_string().contains("at least 2"));
    }
}
