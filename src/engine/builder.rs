//! Grammar construction
//!
//! [`ParserBuilder`] is an append-only list of nodes. Each call adds one
//! primitive or structural node; [`ParserBuilder::build`] collapses the list
//! into the smallest tree that matches it.
//!
//! Per-node configuration (callbacks, sign style, ...) goes through small
//! by-value builders handed to a closure:
//!
//! ```rust
//! use chronoparse::{fields, SignStyle, TemporalParser};
//!
//! let parser = TemporalParser::build(|p| {
//!     p.whole_number(4..=9, |n| {
//!         n.enforce_sign_style(SignStyle::NegativeOnly)
//!             .associate_with(fields::YEAR)
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(parser.parse("-0044").unwrap().int(fields::YEAR), Some(-44));
//! ```

use super::context::ParseContext;
use super::error::{BuildError, BuildResult};
use super::field::Field;
use super::localized::{
    Disambiguation, LocalizedOffset, LocalizedText, OffsetFormat, TimeZoneName,
};
use super::node::{
    CharAction, CharPredicate, DecimalAction, LiteralAction, Node, NumberAction, SignAction,
    TextAction,
};
use super::parser::TemporalParser;
use super::primitive::{
    CharLiteral, DecimalNumber, FixedNumber, Fraction, SignNode, StringLiteral, TextNode,
    VariableNumber,
};
use super::settings::SignStyle;
use super::structural::{AnyOf, CaseScope, Optional, Sequence};
use super::text::{
    EnglishTextProvider, TextProvider, TextStyle, TimeZoneNameProvider, TimeZoneNameStyle,
};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Append-only builder for a [`TemporalParser`]
#[derive(Debug, Default)]
pub struct ParserBuilder {
    parsers: Vec<TemporalParser>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes appended so far
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    fn push(&mut self, node: Node) -> &mut Self {
        self.parsers.push(TemporalParser::from_node(node));
        self
    }

    /// Nothing for zero nodes, the node itself for one, a sequence otherwise
    pub fn build(self) -> TemporalParser {
        let mut parsers = self.parsers;
        match parsers.len() {
            0 => TemporalParser::empty(),
            1 => parsers.remove(0),
            _ => TemporalParser::from_node(Node::Sequence(Sequence::new(parsers))),
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Match `literal` exactly
    pub fn literal(&mut self, literal: &str) -> &mut Self {
        self.literal_with(literal, |l| l)
    }

    /// Match one character
    pub fn literal_char(&mut self, ch: char) -> &mut Self {
        self.push(Node::CharLiteral(CharLiteral::new(ch, Vec::new())))
    }

    /// Match `literal`, running callbacks when it does
    pub fn literal_with<F>(&mut self, literal: &str, configure: F) -> &mut Self
    where
        F: FnOnce(LiteralBuilder) -> LiteralBuilder,
    {
        let actions = configure(LiteralBuilder::default()).actions;
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.push(Node::CharLiteral(CharLiteral::new(ch, actions))),
            _ => self.push(Node::StringLiteral(StringLiteral::new(literal, actions))),
        }
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    /// Match a single plus or minus sign
    pub fn sign<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(SignBuilder) -> SignBuilder,
    {
        let actions = configure(SignBuilder::default()).actions;
        self.push(Node::Sign(SignNode::new(actions)))
    }

    /// Match a whole number with a digit count in `length` (1-19)
    ///
    /// A single-value range builds the fixed-width node.
    pub fn whole_number<F>(&mut self, length: RangeInclusive<usize>, configure: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(WholeNumberBuilder) -> WholeNumberBuilder,
    {
        let config = configure(WholeNumberBuilder::default());
        let (min, max) = (*length.start(), *length.end());

        let node = if min == max {
            Node::FixedNumber(FixedNumber::new(min, config.sign_style, config.actions)?)
        } else {
            Node::VariableNumber(VariableNumber::new(min, max, config.sign_style, config.actions)?)
        };
        Ok(self.push(node))
    }

    /// Match a decimal number: whole digits, then optionally a separator and
    /// fraction digits scaled to `fraction_scale` places
    pub fn decimal_number<F>(
        &mut self,
        whole_length: RangeInclusive<usize>,
        fraction_length: RangeInclusive<usize>,
        fraction_scale: usize,
        configure: F,
    ) -> BuildResult<&mut Self>
    where
        F: FnOnce(DecimalNumberBuilder) -> DecimalNumberBuilder,
    {
        let config = configure(DecimalNumberBuilder::default());
        let node = DecimalNumber::new(
            (*whole_length.start(), *whole_length.end()),
            (*fraction_length.start(), *fraction_length.end()),
            fraction_scale,
            config.sign_style,
            config.actions,
        )?;
        Ok(self.push(Node::Decimal(node)))
    }

    /// Match fraction digits with no leading whole part or separator
    pub fn fraction<F>(&mut self, length: RangeInclusive<usize>, scale: usize, configure: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(FractionBuilder) -> FractionBuilder,
    {
        let config = configure(FractionBuilder::default());
        let node = Fraction::new(*length.start(), *length.end(), scale, config.actions)?;
        Ok(self.push(Node::Fraction(node)))
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Match free-form text whose extent is decided per character
    pub fn text<F>(&mut self, length: RangeInclusive<usize>, configure: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(TextBuilder) -> TextBuilder,
    {
        let config = configure(TextBuilder::default());
        let node = TextNode::new(*length.start(), *length.end(), config.predicates, config.actions)?;
        Ok(self.push(Node::Text(node)))
    }

    /// Match localized text for `field` using the built-in English provider
    pub fn localized_text(&mut self, field: Field, styles: &[TextStyle]) -> BuildResult<&mut Self> {
        let provider: Arc<dyn TextProvider> = EnglishTextProvider::shared();
        self.localized_text_with(field, styles, provider)
    }

    /// Match localized text for `field` from `provider`
    pub fn localized_text_with(
        &mut self,
        field: Field,
        styles: &[TextStyle],
        provider: Arc<dyn TextProvider>,
    ) -> BuildResult<&mut Self> {
        let node = LocalizedText::new(field, styles.to_vec(), provider)?;
        Ok(self.push(Node::LocalizedText(node)))
    }

    /// Match "GMT" with an optional offset
    ///
    /// With `long_format_only`, the offset must be written `+hh:mm[:ss]`.
    pub fn localized_offset(&mut self, long_format_only: bool) -> &mut Self {
        let format = if long_format_only {
            OffsetFormat::Long
        } else {
            OffsetFormat::Short
        };
        self.push(Node::LocalizedOffset(LocalizedOffset::new(format)))
    }

    /// Match a time zone name or region id from `provider`
    ///
    /// A disambiguation strategy is required.
    pub fn time_zone_name<F>(&mut self, provider: Arc<dyn TimeZoneNameProvider>, configure: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(TimeZoneNameBuilder) -> TimeZoneNameBuilder,
    {
        let config = configure(TimeZoneNameBuilder::default());
        let disambiguation = config.disambiguation.ok_or(BuildError::MissingDisambiguation)?;
        let node = TimeZoneName::new(config.styles, disambiguation, provider)?;
        Ok(self.push(Node::TimeZoneName(node)))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Append a previously built parser
    pub fn use_parser(&mut self, parser: &TemporalParser) -> &mut Self {
        self.parsers.push(parser.clone());
        self
    }

    /// Everything built by `f` may be absent
    pub fn optional<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
    {
        let child = nested(f)?;
        Ok(self.optional_parser(child))
    }

    /// `parser` may be absent
    pub fn optional_parser(&mut self, parser: TemporalParser) -> &mut Self {
        if !parser.is_empty() {
            self.push(Node::Optional(Optional::new(parser)));
        }
        self
    }

    /// The first of `parsers` to match wins; at least two are required
    pub fn any_of<I>(&mut self, parsers: I) -> BuildResult<&mut Self>
    where
        I: IntoIterator<Item = TemporalParser>,
    {
        let node = AnyOf::new(parsers.into_iter().collect())?;
        Ok(self.push(Node::AnyOf(node)))
    }

    /// Like [`any_of`](Self::any_of), with each branch built in place
    pub fn any_of_with<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut Alternatives) -> BuildResult<()>,
    {
        let mut alternatives = Alternatives::default();
        f(&mut alternatives)?;
        self.any_of(alternatives.branches)
    }

    /// Literals and text inside `f` match case-sensitively
    pub fn case_sensitive<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
    {
        let child = nested(f)?;
        Ok(self.case_scope(true, child))
    }

    /// Literals and text inside `f` ignore case
    pub fn case_insensitive<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
    {
        let child = nested(f)?;
        Ok(self.case_scope(false, child))
    }

    fn case_scope(&mut self, case_sensitive: bool, child: TemporalParser) -> &mut Self {
        if !child.is_empty() {
            self.push(Node::CaseScope(CaseScope::new(case_sensitive, child)));
        }
        self
    }
}

fn nested<F>(f: F) -> BuildResult<TemporalParser>
where
    F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
{
    let mut builder = ParserBuilder::new();
    f(&mut builder)?;
    Ok(builder.build())
}

/// Collects the branches of an alternation
#[derive(Default)]
pub struct Alternatives {
    branches: Vec<TemporalParser>,
}

impl Alternatives {
    /// Add a branch built in place
    pub fn branch<F>(&mut self, f: F) -> BuildResult<&mut Self>
    where
        F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
    {
        self.branches.push(nested(f)?);
        Ok(self)
    }

    /// Add a previously built branch
    pub fn parser(&mut self, parser: &TemporalParser) -> &mut Self {
        self.branches.push(parser.clone());
        self
    }
}

// ============================================================================
// Node configuration
// ============================================================================

/// Callbacks for a literal
#[derive(Default)]
pub struct LiteralBuilder {
    actions: Vec<LiteralAction>,
}

impl LiteralBuilder {
    pub fn on_parsed<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    /// Set a boolean field to `true` when the literal matches
    pub fn associate_with(self, field: Field) -> Self {
        self.on_parsed(move |ctx| ctx.result_mut().set_bool(field, true))
    }
}

/// Callbacks for a sign
#[derive(Default)]
pub struct SignBuilder {
    actions: Vec<SignAction>,
}

impl SignBuilder {
    pub fn on_parsed<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>, i64) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    /// Store `1` or `-1` in `field`
    pub fn associate_with(self, field: Field) -> Self {
        self.on_parsed(move |ctx, sign| ctx.result_mut().set_int(field, sign))
    }
}

/// Sign style and callbacks for a whole number
#[derive(Default)]
pub struct WholeNumberBuilder {
    sign_style: Option<SignStyle>,
    actions: Vec<NumberAction>,
}

impl WholeNumberBuilder {
    pub fn enforce_sign_style(mut self, sign_style: SignStyle) -> Self {
        self.sign_style = Some(sign_style);
        self
    }

    pub fn on_parsed<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>, i64) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    pub fn associate_with(self, field: Field) -> Self {
        self.on_parsed(move |ctx, value| ctx.result_mut().set_int(field, value))
    }
}

/// Sign style and callbacks for a decimal number
#[derive(Default)]
pub struct DecimalNumberBuilder {
    sign_style: Option<SignStyle>,
    actions: Vec<DecimalAction>,
}

impl DecimalNumberBuilder {
    pub fn enforce_sign_style(mut self, sign_style: SignStyle) -> Self {
        self.sign_style = Some(sign_style);
        self
    }

    pub fn on_parsed<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>, i64, i64) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    /// Store the whole part in `whole` and the scaled fraction in `fraction`
    pub fn associate_with(self, whole: Field, fraction: Field) -> Self {
        self.on_parsed(move |ctx, whole_value, fraction_value| {
            let result = ctx.result_mut();
            result.set_int(whole, whole_value);
            result.set_int(fraction, fraction_value);
        })
    }
}

/// Callbacks for a fraction
#[derive(Default)]
pub struct FractionBuilder {
    actions: Vec<NumberAction>,
}

impl FractionBuilder {
    pub fn on_parsed<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>, i64) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    pub fn associate_with(self, field: Field) -> Self {
        self.on_parsed(move |ctx, value| ctx.result_mut().set_int(field, value))
    }
}

/// Character predicates and callbacks for free-form text
#[derive(Default)]
pub struct TextBuilder {
    predicates: Vec<CharPredicate>,
    actions: Vec<TextAction>,
}

impl TextBuilder {
    /// Decide for each character, by its index in the run, whether it belongs
    pub fn on_each_char<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ParseContext<'_>, char, usize) -> CharAction + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn on_parsed<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>, &str) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    /// Store the captured text in `field`
    pub fn associate_with(self, field: Field) -> Self {
        self.on_parsed(move |ctx, text| ctx.result_mut().set_text(field, text))
    }
}

/// Styles and disambiguation for time zone names
pub struct TimeZoneNameBuilder {
    styles: Vec<TimeZoneNameStyle>,
    disambiguation: Option<Disambiguation>,
}

impl Default for TimeZoneNameBuilder {
    fn default() -> Self {
        Self {
            styles: TimeZoneNameStyle::ALL.to_vec(),
            disambiguation: None,
        }
    }
}

impl TimeZoneNameBuilder {
    /// Name styles to match; all of them by default
    pub fn styles(mut self, styles: &[TimeZoneNameStyle]) -> Self {
        self.styles = styles.to_vec();
        self
    }

    pub fn disambiguate(mut self, disambiguation: Disambiguation) -> Self {
        self.disambiguation = Some(disambiguation);
        self
    }
}
