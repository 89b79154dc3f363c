//! Grouped parsing
//!
//! A [`GroupedParser`] splits its output into several independent
//! [`ParseResult`]s, one per declared group, so the same field can appear
//! more than once in a single input (the start and end of an interval, say).
//!
//! ```rust
//! use chronoparse::{fields, GroupedParser};
//!
//! let parser = GroupedParser::build(|g| {
//!     g.group(|p| {
//!         p.month_number(1..=2, |n| n)?;
//!         Ok(())
//!     })?;
//!     g.literal("-");
//!     g.group(|p| {
//!         p.month_number(1..=2, |n| n)?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let results = parser.parse("3-11").unwrap();
//! assert_eq!(results[0].int(fields::MONTH_OF_YEAR), Some(3));
//! assert_eq!(results[1].int(fields::MONTH_OF_YEAR), Some(11));
//! ```

use super::builder::ParserBuilder;
use super::context::ParseContext;
use super::error::{BuildError, BuildResult, NumberOverflow, ParseOutcome};
use super::node::failed;
use super::parser::{check_end, overflow_error, TemporalParser};
use super::result::ParseResult;
use super::settings::ParseSettings;
use crate::macros::{log_debug, log_trace};
use std::fmt;
use std::sync::Arc;

/// One element of a grouped grammar
#[derive(Clone)]
pub enum GroupedChild {
    /// Produces its own result
    Group(TemporalParser),
    /// Consumes text without producing a result
    Literal(TemporalParser),
    /// A nested grouped grammar, typically an alternation
    Nested(GroupedParser),
}

struct GroupedInner {
    children: Vec<GroupedChild>,
    is_any_of: bool,
}

/// A grammar that yields one [`ParseResult`] per group
#[derive(Clone)]
pub struct GroupedParser(Arc<GroupedInner>);

type GroupedAttempt = Result<(isize, Vec<ParseResult>), NumberOverflow>;

impl GroupedParser {
    fn new(children: Vec<GroupedChild>, is_any_of: bool) -> Self {
        Self(Arc::new(GroupedInner {
            children,
            is_any_of,
        }))
    }

    /// Assemble a grouped parser with a [`GroupedParserBuilder`]
    pub fn build<F>(f: F) -> BuildResult<Self>
    where
        F: FnOnce(&mut GroupedParserBuilder) -> BuildResult<()>,
    {
        let mut builder = GroupedParserBuilder::new();
        f(&mut builder)?;
        Ok(builder.build())
    }

    #[inline]
    pub fn children(&self) -> &[GroupedChild] {
        &self.0.children
    }

    /// Whether the children are alternatives rather than a sequence
    #[inline]
    pub fn is_any_of(&self) -> bool {
        self.0.is_any_of
    }

    /// Parse `text` with default settings
    pub fn parse(&self, text: &str) -> ParseOutcome<Vec<ParseResult>> {
        self.parse_with(text, &ParseSettings::DEFAULT)
    }

    /// Parse `text`, which must be consumed entirely, into one result per group
    pub fn parse_with(&self, text: &str, settings: &ParseSettings) -> ParseOutcome<Vec<ParseResult>> {
        let chars: Vec<char> = text.chars().collect();
        let mut ctx = ParseContext::new(settings);

        log_debug!("grouped parsing {:?} ({} chars)", text, chars.len());

        let (end, results) = self
            .attempt(&mut ctx, &chars, 0)
            .map_err(|cause| overflow_error(text, cause))?;
        check_end(end, chars.len(), text)?;

        log_debug!("parsed {} group(s)", results.len());
        Ok(results)
    }

    fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> GroupedAttempt {
        let is_any_of = self.0.is_any_of;
        let mut current = position as isize;
        let mut results = Vec::new();

        for (index, child) in self.0.children.iter().enumerate() {
            if index > 0 {
                ctx.replace_result(ParseResult::new());
            }

            let end = match child {
                GroupedChild::Nested(nested) => {
                    let (end, nested_results) = nested.attempt(ctx, text, current as usize)?;
                    if end >= 0 {
                        results.extend(nested_results);
                    }
                    end
                }
                GroupedChild::Group(parser) => {
                    let end = parser.attempt(ctx, text, current as usize)?;
                    if end >= 0 {
                        results.push(ctx.replace_result(ParseResult::new()));
                    }
                    end
                }
                GroupedChild::Literal(parser) => parser.attempt(ctx, text, current as usize)?,
            };

            if is_any_of {
                if end >= 0 {
                    return Ok((end, results));
                }
                log_trace!("grouped anyOf branch {} failed at {}", index, !end);
            } else {
                current = end;
                if end < 0 {
                    break;
                }
            }
        }

        if is_any_of {
            return Ok((failed(position), Vec::new()));
        }
        Ok((current, results))
    }

    /// Render the grammar as indented text
    pub fn describe(&self) -> String {
        super::debug::TreePrinter::new().print_grouped(self)
    }
}

impl fmt::Debug for GroupedParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedParser")
            .field("children", &self.0.children.len())
            .field("is_any_of", &self.0.is_any_of)
            .finish()
    }
}

/// Append-only builder for a [`GroupedParser`]
#[derive(Default)]
pub struct GroupedParserBuilder {
    children: Vec<GroupedChild>,
}

impl GroupedParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group built in place
    pub fn group<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
    {
        let parser = TemporalParser::build(f)?;
        Ok(self.group_parser(parser))
    }

    /// Add a previously built parser as a group
    pub fn group_parser(&mut self, parser: TemporalParser) -> &mut Self {
        self.children.push(GroupedChild::Group(parser));
        self
    }

    /// Add `count` groups that match nothing and yield empty results
    pub fn groups(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.group_parser(TemporalParser::empty());
        }
        self
    }

    /// Match `literal` between groups
    pub fn literal(&mut self, literal: &str) -> &mut Self {
        let mut builder = ParserBuilder::new();
        builder.literal(literal);
        self.children.push(GroupedChild::Literal(builder.build()));
        self
    }

    /// Splice in a previously built grouped parser
    pub fn use_parser(&mut self, parser: &GroupedParser) -> &mut Self {
        self.children.push(GroupedChild::Nested(parser.clone()));
        self
    }

    /// The first of `parsers` to match wins; at least two are required
    pub fn any_of<I>(&mut self, parsers: I) -> BuildResult<&mut Self>
    where
        I: IntoIterator<Item = GroupedParser>,
    {
        let children: Vec<GroupedChild> = parsers.into_iter().map(GroupedChild::Nested).collect();
        if children.len() < 2 {
            return Err(BuildError::TooFewAlternatives {
                count: children.len(),
            });
        }
        self.children
            .push(GroupedChild::Nested(GroupedParser::new(children, true)));
        Ok(self)
    }

    /// Like [`any_of`](Self::any_of), with each branch built in place
    pub fn any_of_with<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut GroupedAlternatives) -> BuildResult<()>,
    {
        let mut alternatives = GroupedAlternatives::default();
        f(&mut alternatives)?;
        self.any_of(alternatives.branches)
    }

    /// Nothing for a single nested grammar, a sequence otherwise
    pub fn build(self) -> GroupedParser {
        let mut children = self.children;
        if children.len() == 1 {
            if let GroupedChild::Nested(nested) = &children[0] {
                return nested.clone();
            }
        }
        children.shrink_to_fit();
        GroupedParser::new(children, false)
    }
}

/// Collects the branches of a grouped alternation
#[derive(Default)]
pub struct GroupedAlternatives {
    branches: Vec<GroupedParser>,
}

impl GroupedAlternatives {
    /// Add a branch built in place
    pub fn branch<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut GroupedParserBuilder) -> BuildResult<()>,
    {
        self.branches.push(GroupedParser::build(f)?);
        Ok(self)
    }

    /// Add a previously built branch
    pub fn parser(&mut self, parser: &GroupedParser) -> &mut Self {
        self.branches.push(parser.clone());
        self
    }
}
