//! Structural nodes
//!
//! Sequencing, optional blocks, ordered alternation and case-sensitivity
//! scopes. Optional blocks and alternation backtrack by snapshotting the
//! live result and swapping the snapshot back in when a branch fails.

use super::context::ParseContext;
use super::error::{BuildError, BuildResult};
use super::node::{failed, Attempt};
use super::parser::TemporalParser;
use crate::macros::log_trace;

/// Runs children in order, stopping at the first failure
pub struct Sequence {
    children: Vec<TemporalParser>,
    is_const: bool,
}

impl Sequence {
    pub fn new(children: Vec<TemporalParser>) -> Self {
        let is_const = children.iter().all(TemporalParser::is_const);
        Self { children, is_const }
    }

    #[inline]
    pub fn children(&self) -> &[TemporalParser] {
        &self.children
    }

    #[inline]
    pub(crate) fn is_const(&self) -> bool {
        self.is_const
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        let mut current = position as isize;

        for child in &self.children {
            current = child.attempt(ctx, text, current as usize)?;
            if current < 0 {
                break;
            }
        }

        Ok(current)
    }
}

/// Tries its child; on failure, undoes any writes and consumes nothing
pub struct Optional {
    child: TemporalParser,
}

impl Optional {
    pub fn new(child: TemporalParser) -> Self {
        Self { child }
    }

    #[inline]
    pub fn child(&self) -> &TemporalParser {
        &self.child
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        if position >= text.len() {
            return Ok(position as isize);
        }

        let snapshot = (!self.child.is_const()).then(|| ctx.result().snapshot());
        let end = self.child.attempt(ctx, text, position)?;

        if end < 0 {
            if let Some(snapshot) = snapshot {
                ctx.replace_result(snapshot);
            }
            return Ok(position as isize);
        }

        Ok(end)
    }
}

/// Ordered alternation: the first child to succeed wins
///
/// When every child fails the failure is reported at the starting position,
/// not at the deepest point any branch reached.
pub struct AnyOf {
    children: Vec<TemporalParser>,
    is_const: bool,
}

impl AnyOf {
    pub fn new(children: Vec<TemporalParser>) -> BuildResult<Self> {
        if children.len() < 2 {
            return Err(BuildError::TooFewAlternatives {
                count: children.len(),
            });
        }
        let is_const = children.iter().all(TemporalParser::is_const);
        Ok(Self { children, is_const })
    }

    #[inline]
    pub fn children(&self) -> &[TemporalParser] {
        &self.children
    }

    #[inline]
    pub(crate) fn is_const(&self) -> bool {
        self.is_const
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        for child in &self.children {
            let snapshot = (!self.is_const).then(|| ctx.result().snapshot());
            let end = child.attempt(ctx, text, position)?;

            if end >= 0 {
                return Ok(end);
            }

            log_trace!("anyOf branch failed at {}", !end);
            if let Some(snapshot) = snapshot {
                ctx.replace_result(snapshot);
            }
        }

        Ok(failed(position))
    }
}

/// Forces a case-sensitivity for everything inside it
pub struct CaseScope {
    case_sensitive: bool,
    child: TemporalParser,
}

impl CaseScope {
    pub fn new(case_sensitive: bool, child: TemporalParser) -> Self {
        Self {
            case_sensitive,
            child,
        }
    }

    #[inline]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn child(&self) -> &TemporalParser {
        &self.child
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        let previous = ctx.swap_case_sensitive(self.case_sensitive);
        let outcome = self.child.attempt(ctx, text, position);
        ctx.swap_case_sensitive(previous);
        outcome
    }
}
