//! Parser handles and the parse entry point
//!
//! A [`TemporalParser`] is a cheap, clonable handle to an immutable node
//! tree. Build one once and reuse it for every parse, from any thread.
//!
//! # Example
//!
//! ```rust
//! use chronoparse::{fields, TemporalParser};
//!
//! let parser = TemporalParser::build(|p| {
//!     p.whole_number(1..=2, |n| n.associate_with(fields::MONTH_OF_YEAR))?;
//!     p.optional(|p| {
//!         p.literal("/");
//!         p.whole_number(4..=4, |n| n.associate_with(fields::YEAR))?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let result = parser.parse("13/2012").unwrap();
//! assert_eq!(result.int(fields::MONTH_OF_YEAR), Some(13));
//! assert_eq!(result.int(fields::YEAR), Some(2012));
//! ```

use super::builder::ParserBuilder;
use super::context::ParseContext;
use super::error::{BuildResult, ParseError, ParseOutcome};
use super::node::{decode, Attempt, Node};
use super::result::ParseResult;
use super::settings::ParseSettings;
use crate::macros::log_debug;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A reusable, thread-safe grammar
#[derive(Clone)]
pub struct TemporalParser(Arc<Node>);

impl TemporalParser {
    /// Wrap a node
    pub fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// The canonical no-op parser
    pub fn empty() -> Self {
        static EMPTY: OnceLock<TemporalParser> = OnceLock::new();
        EMPTY
            .get_or_init(|| TemporalParser::from_node(Node::Empty))
            .clone()
    }

    /// Assemble a parser with a [`ParserBuilder`]
    pub fn build<F>(f: F) -> BuildResult<Self>
    where
        F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
    {
        let mut builder = ParserBuilder::new();
        f(&mut builder)?;
        Ok(builder.build())
    }

    #[inline]
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Whether this is the no-op parser
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(*self.0, Node::Empty)
    }

    /// Whether matching never writes to the result
    #[inline]
    pub fn is_const(&self) -> bool {
        self.0.is_const()
    }

    /// Whether this parser matches fixed literal text
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.0.is_literal()
    }

    /// Whether two handles share the same tree
    #[inline]
    pub fn ptr_eq(&self, other: &TemporalParser) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Match against `text` starting at `position`
    ///
    /// Returns the encoded end position; see [`decode`].
    #[inline]
    pub fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        self.0.attempt(ctx, text, position)
    }

    /// Parse `text` with default settings
    pub fn parse(&self, text: &str) -> ParseOutcome<ParseResult> {
        self.parse_with(text, &ParseSettings::DEFAULT)
    }

    /// Parse `text`, which must be consumed entirely
    pub fn parse_with(&self, text: &str, settings: &ParseSettings) -> ParseOutcome<ParseResult> {
        let chars: Vec<char> = text.chars().collect();
        let mut ctx = ParseContext::new(settings);

        log_debug!("parsing {:?} ({} chars)", text, chars.len());

        let end = self
            .attempt(&mut ctx, &chars, 0)
            .map_err(|cause| overflow_error(text, cause))?;
        check_end(end, chars.len(), text)?;

        let result = ctx.into_result();
        log_debug!("parsed {} field(s)", result.len());
        Ok(result)
    }

    /// Render the node tree as indented text
    pub fn describe(&self) -> String {
        super::debug::TreePrinter::new().print(self)
    }
}

impl fmt::Debug for TemporalParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemporalParser({})", self.0.kind())
    }
}

impl Default for TemporalParser {
    fn default() -> Self {
        Self::empty()
    }
}

pub(crate) fn overflow_error(text: &str, cause: super::error::NumberOverflow) -> ParseError {
    log_debug!("number overflow at {}", cause.position);
    ParseError::Overflow {
        index: cause.position,
        text: text.to_string(),
        cause,
    }
}

/// Turn a final encoded position into an error unless it consumed everything
pub(crate) fn check_end(end: isize, length: usize, text: &str) -> ParseOutcome<()> {
    match decode(end) {
        Err(index) => {
            log_debug!("parsing failed at {}", index);
            Err(ParseError::Failed {
                index,
                text: text.to_string(),
            })
        }
        Ok(index) if index < length => {
            log_debug!("unexpected character at {}", index);
            Err(ParseError::UnexpectedCharacter {
                index,
                text: text.to_string(),
            })
        }
        Ok(_) => Ok(()),
    }
}
