//! The parser node tree
//!
//! Every grammar is a tree of [`Node`]s. A node is immutable once built and
//! may be shared by any number of concurrent parses; all mutable state lives
//! in the [`ParseContext`] passed alongside it.
//!
//! # Position encoding
//!
//! Matching returns an `isize`. A non-negative value is the position just
//! past the consumed span. A negative value is the bitwise complement of the
//! position where the mismatch was detected, so failure still carries its
//! location without allocating. Only numeric overflow aborts with `Err`.

use super::context::ParseContext;
use super::error::NumberOverflow;
use super::localized::{LocalizedOffset, LocalizedText, TimeZoneName};
use super::primitive::{
    CharLiteral, DecimalNumber, FixedNumber, Fraction, SignNode, StringLiteral, TextNode,
    VariableNumber,
};
use super::structural::{AnyOf, CaseScope, Optional, Sequence};

/// Outcome of matching one node: an encoded position, or a fatal overflow
pub type Attempt = Result<isize, NumberOverflow>;

/// Largest digit count that always fits in an `i64`
pub const MAX_LONG_DIGITS: usize = 19;

/// Largest fraction digit count and scale
pub const MAX_FRACTION_DIGITS: usize = 9;

/// `FACTOR[i]` is `10^(i-1)`, so the digit `i` places from the right is
/// weighted by `FACTOR[i]`
pub(crate) const FACTOR: [i64; MAX_LONG_DIGITS + 1] = [
    0,
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

/// Encode a successful match ending at `position`
#[inline]
pub(crate) fn matched(position: usize) -> isize {
    position as isize
}

/// Encode a mismatch detected at `position`
#[inline]
pub(crate) fn failed(position: usize) -> isize {
    !(position as isize)
}

/// Decode a returned position into `Ok(end)` or `Err(failure index)`
#[inline]
pub fn decode(encoded: isize) -> Result<usize, usize> {
    if encoded >= 0 {
        Ok(encoded as usize)
    } else {
        Err((!encoded) as usize)
    }
}

/// Compare two characters under the given case-sensitivity
#[inline]
pub(crate) fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Whether `pattern` occurs in `text` starting at `position`
pub(crate) fn region_matches(
    text: &[char],
    position: usize,
    pattern: &[char],
    case_sensitive: bool,
) -> bool {
    match text.get(position..position + pattern.len()) {
        Some(region) => region
            .iter()
            .zip(pattern)
            .all(|(&a, &b)| chars_match(a, b, case_sensitive)),
        None => false,
    }
}

// ============================================================================
// Callbacks
// ============================================================================

/// Invoked when a literal matches
pub type LiteralAction = Box<dyn Fn(&mut ParseContext<'_>) + Send + Sync>;

/// Invoked with `1` or `-1` when a sign matches
pub type SignAction = Box<dyn Fn(&mut ParseContext<'_>, i64) + Send + Sync>;

/// Invoked with the value of a whole number or fraction
pub type NumberAction = Box<dyn Fn(&mut ParseContext<'_>, i64) + Send + Sync>;

/// Invoked with the whole and scaled fraction parts of a decimal number
pub type DecimalAction = Box<dyn Fn(&mut ParseContext<'_>, i64, i64) + Send + Sync>;

/// Invoked with the captured run of free-form text
pub type TextAction = Box<dyn Fn(&mut ParseContext<'_>, &str) + Send + Sync>;

/// Decides, per character, whether free-form text continues
pub type CharPredicate = Box<dyn Fn(&ParseContext<'_>, char, usize) -> CharAction + Send + Sync>;

/// Verdict of a [`CharPredicate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharAction {
    /// The character belongs to the text, keep scanning
    AcceptAndContinue,
    /// The text ends before this character
    RejectAndStop,
}

// ============================================================================
// Node
// ============================================================================

/// One unit of grammar
pub enum Node {
    /// Consumes nothing and always succeeds
    Empty,
    CharLiteral(CharLiteral),
    StringLiteral(StringLiteral),
    Sign(SignNode),
    FixedNumber(FixedNumber),
    VariableNumber(VariableNumber),
    Decimal(DecimalNumber),
    Fraction(Fraction),
    Text(TextNode),
    LocalizedText(LocalizedText),
    LocalizedOffset(LocalizedOffset),
    TimeZoneName(TimeZoneName),
    Sequence(Sequence),
    Optional(Optional),
    AnyOf(AnyOf),
    CaseScope(CaseScope),
}

impl Node {
    /// Match this node against `text` starting at `position`
    pub fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        match self {
            Node::Empty => Ok(matched(position)),
            Node::CharLiteral(node) => Ok(node.attempt(ctx, text, position)),
            Node::StringLiteral(node) => Ok(node.attempt(ctx, text, position)),
            Node::Sign(node) => Ok(node.attempt(ctx, text, position)),
            Node::FixedNumber(node) => node.attempt(ctx, text, position),
            Node::VariableNumber(node) => node.attempt(ctx, text, position),
            Node::Decimal(node) => node.attempt(ctx, text, position),
            Node::Fraction(node) => Ok(node.attempt(ctx, text, position)),
            Node::Text(node) => Ok(node.attempt(ctx, text, position)),
            Node::LocalizedText(node) => Ok(node.attempt(ctx, text, position)),
            Node::LocalizedOffset(node) => Ok(node.attempt(ctx, text, position)),
            Node::TimeZoneName(node) => Ok(node.attempt(ctx, text, position)),
            Node::Sequence(node) => node.attempt(ctx, text, position),
            Node::Optional(node) => node.attempt(ctx, text, position),
            Node::AnyOf(node) => node.attempt(ctx, text, position),
            Node::CaseScope(node) => node.attempt(ctx, text, position),
        }
    }

    /// Whether matching never writes to the result
    pub fn is_const(&self) -> bool {
        match self {
            Node::Empty => true,
            Node::CharLiteral(node) => node.actions.is_empty(),
            Node::StringLiteral(node) => node.actions.is_empty(),
            Node::Sign(node) => node.actions.is_empty(),
            Node::FixedNumber(node) => node.actions.is_empty(),
            Node::VariableNumber(node) => node.actions.is_empty(),
            Node::Decimal(node) => node.actions.is_empty(),
            Node::Fraction(node) => node.actions.is_empty(),
            Node::Text(_)
            | Node::LocalizedText(_)
            | Node::LocalizedOffset(_)
            | Node::TimeZoneName(_) => false,
            Node::Sequence(node) => node.is_const(),
            Node::Optional(node) => node.child().is_const(),
            Node::AnyOf(node) => node.is_const(),
            Node::CaseScope(node) => node.child().is_const(),
        }
    }

    /// Whether this node matches fixed literal text
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::CharLiteral(_) | Node::StringLiteral(_))
    }

    /// Short name of the node kind
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Empty => "Empty",
            Node::CharLiteral(_) => "CharLiteral",
            Node::StringLiteral(_) => "StringLiteral",
            Node::Sign(_) => "Sign",
            Node::FixedNumber(_) => "FixedNumber",
            Node::VariableNumber(_) => "VariableNumber",
            Node::Decimal(_) => "Decimal",
            Node::Fraction(_) => "Fraction",
            Node::Text(_) => "Text",
            Node::LocalizedText(_) => "LocalizedText",
            Node::LocalizedOffset(_) => "LocalizedOffset",
            Node::TimeZoneName(_) => "TimeZoneName",
            Node::Sequence(_) => "Sequence",
            Node::Optional(_) => "Optional",
            Node::AnyOf(_) => "AnyOf",
            Node::CaseScope(_) => "CaseScope",
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::debug::TreePrinter::new().print_node(self))
    }
}
