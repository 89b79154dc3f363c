//! Primitive nodes
//!
//! Literals, signs, numbers, fractions and free-form text. These are the
//! leaves of every grammar. Numeric nodes read digits through the active
//! [`NumberStyle`], so locale digit blocks and alternate sign characters work
//! without any change to the grammar.

use super::context::ParseContext;
use super::error::{BuildError, BuildResult, NumberOverflow};
use super::node::{
    chars_match, failed, matched, region_matches, Attempt, CharAction, CharPredicate,
    DecimalAction, LiteralAction, NumberAction, SignAction, TextAction, FACTOR,
    MAX_FRACTION_DIGITS, MAX_LONG_DIGITS,
};
use super::settings::{NumberStyle, SignStyle};

// ============================================================================
// Literals
// ============================================================================

/// Matches a single character
pub struct CharLiteral {
    pub(crate) ch: char,
    pub(crate) actions: Vec<LiteralAction>,
}

impl CharLiteral {
    pub fn new(ch: char, actions: Vec<LiteralAction>) -> Self {
        Self { ch, actions }
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        match text.get(position) {
            Some(&found) if chars_match(found, self.ch, ctx.is_case_sensitive()) => {
                for action in &self.actions {
                    action(ctx);
                }
                matched(position + 1)
            }
            _ => failed(position),
        }
    }
}

/// Matches a fixed string
pub struct StringLiteral {
    pub(crate) literal: String,
    chars: Vec<char>,
    pub(crate) actions: Vec<LiteralAction>,
}

impl StringLiteral {
    pub fn new(literal: impl Into<String>, actions: Vec<LiteralAction>) -> Self {
        let literal = literal.into();
        let chars = literal.chars().collect();
        Self {
            literal,
            chars,
            actions,
        }
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        if position >= text.len()
            || !region_matches(text, position, &self.chars, ctx.is_case_sensitive())
        {
            return failed(position);
        }

        for action in &self.actions {
            action(ctx);
        }
        matched(position + self.chars.len())
    }
}

// ============================================================================
// Sign
// ============================================================================

/// Matches one plus or minus character
pub struct SignNode {
    pub(crate) actions: Vec<SignAction>,
}

impl SignNode {
    pub fn new(actions: Vec<SignAction>) -> Self {
        Self { actions }
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        let Some(&ch) = text.get(position) else {
            return failed(position);
        };

        let style = ctx.number_style();
        let sign = if style.is_plus(ch) {
            1
        } else if style.is_minus(ch) {
            -1
        } else {
            return failed(position);
        };

        for action in &self.actions {
            action(ctx, sign);
        }
        matched(position + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignRead {
    Positive,
    Negative,
    Absent,
    Rejected,
}

/// Classify the character in front of a number under an optional sign style
fn read_sign(sign_style: Option<SignStyle>, style: &NumberStyle, ch: char) -> SignRead {
    if style.is_plus(ch) {
        match sign_style {
            Some(SignStyle::Never) | Some(SignStyle::NegativeOnly) => SignRead::Rejected,
            _ => SignRead::Positive,
        }
    } else if style.is_minus(ch) {
        match sign_style {
            Some(SignStyle::Never) => SignRead::Rejected,
            _ => SignRead::Negative,
        }
    } else {
        match sign_style {
            Some(SignStyle::Always) => SignRead::Rejected,
            _ => SignRead::Absent,
        }
    }
}

/// Read the optional sign at `position`, returning it with the digit start
fn leading_sign(
    sign_style: Option<SignStyle>,
    ctx: &ParseContext<'_>,
    text: &[char],
    position: usize,
) -> Result<(SignRead, usize), isize> {
    let Some(&ch) = text.get(position) else {
        return Err(failed(position));
    };

    match read_sign(sign_style, ctx.number_style(), ch) {
        SignRead::Rejected => Err(failed(position)),
        SignRead::Absent => Ok((SignRead::Absent, position)),
        sign => Ok((sign, position + 1)),
    }
}

// ============================================================================
// Digit helpers
// ============================================================================

/// Count consecutive digits starting at `start`
fn count_digits(style: &NumberStyle, text: &[char], start: usize) -> usize {
    text.get(start..)
        .map(|rest| rest.iter().take_while(|&&ch| style.digit(ch).is_some()).count())
        .unwrap_or(0)
}

/// Accumulate `length` digits at `start` into a whole number
///
/// The caller has already checked that every character in the span is a
/// digit. `origin` is where the number (including any sign) began.
fn accumulate(
    style: &NumberStyle,
    text: &[char],
    start: usize,
    length: usize,
    negative: bool,
    origin: usize,
) -> Result<i64, NumberOverflow> {
    let overflow = NumberOverflow { position: origin };
    let mut value: i64 = 0;

    for (offset, &ch) in text[start..start + length].iter().enumerate() {
        let digit = style.digit(ch).unwrap_or(0) as i64;
        let weighted = digit
            .checked_mul(FACTOR[length - offset])
            .ok_or(overflow)?;
        value = value.checked_add(weighted).ok_or(overflow)?;
    }

    if negative {
        value = value.checked_neg().ok_or(overflow)?;
    }
    Ok(value)
}

/// Scale `length` fraction digits at `start` so the first digit is worth
/// `10^(scale-1)`
fn scale_fraction(style: &NumberStyle, text: &[char], start: usize, length: usize, scale: usize) -> i64 {
    text[start..start + length]
        .iter()
        .enumerate()
        .map(|(offset, &ch)| style.digit(ch).unwrap_or(0) as i64 * FACTOR[scale - offset])
        .sum()
}

fn check_range(
    what: &'static str,
    min: usize,
    max: usize,
    low: usize,
    high: usize,
    allowed: &'static str,
) -> BuildResult<()> {
    if min > max || min < low || max > high || max == 0 {
        return Err(BuildError::InvalidLength {
            what,
            min,
            max,
            allowed,
        });
    }
    Ok(())
}

// ============================================================================
// Whole numbers
// ============================================================================

/// Matches exactly `length` digits with an optional sign
pub struct FixedNumber {
    pub(crate) length: usize,
    pub(crate) sign_style: Option<SignStyle>,
    pub(crate) actions: Vec<NumberAction>,
}

impl FixedNumber {
    pub fn new(
        length: usize,
        sign_style: Option<SignStyle>,
        actions: Vec<NumberAction>,
    ) -> BuildResult<Self> {
        check_range("length", length, length, 1, MAX_LONG_DIGITS, "1-19")?;
        Ok(Self {
            length,
            sign_style,
            actions,
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        let (sign, start) = match leading_sign(self.sign_style, ctx, text, position) {
            Ok(read) => read,
            Err(failure) => return Ok(failure),
        };

        let style = ctx.number_style();
        let mut current = start;
        while current < start + self.length {
            match text.get(current) {
                Some(&ch) if style.digit(ch).is_some() => current += 1,
                _ => return Ok(failed(current)),
            }
        }

        let value = accumulate(
            style,
            text,
            start,
            self.length,
            sign == SignRead::Negative,
            position,
        )?;

        for action in &self.actions {
            action(ctx, value);
        }
        Ok(matched(current))
    }
}

/// Matches between `min_length` and `max_length` digits with an optional sign
///
/// A run longer than `max_length` is a failure, not a truncated match.
pub struct VariableNumber {
    pub(crate) min_length: usize,
    pub(crate) max_length: usize,
    pub(crate) sign_style: Option<SignStyle>,
    pub(crate) actions: Vec<NumberAction>,
}

impl VariableNumber {
    pub fn new(
        min_length: usize,
        max_length: usize,
        sign_style: Option<SignStyle>,
        actions: Vec<NumberAction>,
    ) -> BuildResult<Self> {
        check_range("length", min_length, max_length, 1, MAX_LONG_DIGITS, "1-19")?;
        Ok(Self {
            min_length,
            max_length,
            sign_style,
            actions,
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        let (sign, start) = match leading_sign(self.sign_style, ctx, text, position) {
            Ok(read) => read,
            Err(failure) => return Ok(failure),
        };

        let style = ctx.number_style();
        let length = count_digits(style, text, start);

        if length < self.min_length {
            return Ok(failed(start + length));
        } else if length > self.max_length {
            return Ok(failed(start + self.max_length));
        }

        let value = accumulate(style, text, start, length, sign == SignRead::Negative, position)?;

        for action in &self.actions {
            action(ctx, value);
        }
        Ok(matched(start + length))
    }
}

// ============================================================================
// Decimal numbers and fractions
// ============================================================================

/// A whole part, then optionally a decimal separator and a fraction
pub struct DecimalNumber {
    pub(crate) min_whole_length: usize,
    pub(crate) max_whole_length: usize,
    pub(crate) min_fraction_length: usize,
    pub(crate) max_fraction_length: usize,
    pub(crate) fraction_scale: usize,
    pub(crate) sign_style: Option<SignStyle>,
    pub(crate) actions: Vec<DecimalAction>,
}

impl DecimalNumber {
    pub fn new(
        whole_length: (usize, usize),
        fraction_length: (usize, usize),
        fraction_scale: usize,
        sign_style: Option<SignStyle>,
        actions: Vec<DecimalAction>,
    ) -> BuildResult<Self> {
        let (min_whole_length, max_whole_length) = whole_length;
        let (min_fraction_length, max_fraction_length) = fraction_length;

        check_range(
            "whole length",
            min_whole_length,
            max_whole_length,
            0,
            MAX_LONG_DIGITS,
            "0-19",
        )?;
        if min_fraction_length > max_fraction_length || max_fraction_length > MAX_FRACTION_DIGITS {
            return Err(BuildError::InvalidLength {
                what: "fraction length",
                min: min_fraction_length,
                max: max_fraction_length,
                allowed: "0-9",
            });
        }
        if !(1..=MAX_FRACTION_DIGITS).contains(&fraction_scale)
            || max_fraction_length > fraction_scale
        {
            return Err(BuildError::InvalidScale {
                scale: fraction_scale,
                max_length: max_fraction_length,
            });
        }

        Ok(Self {
            min_whole_length,
            max_whole_length,
            min_fraction_length,
            max_fraction_length,
            fraction_scale,
            sign_style,
            actions,
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Attempt {
        let (sign, start) = match leading_sign(self.sign_style, ctx, text, position) {
            Ok(read) => read,
            Err(failure) => return Ok(failure),
        };
        let negative = sign == SignRead::Negative;

        let style = ctx.number_style();
        let whole_length = count_digits(style, text, start);

        if whole_length < self.min_whole_length {
            return Ok(failed(start + whole_length));
        } else if whole_length > self.max_whole_length {
            return Ok(failed(start + self.max_whole_length));
        }

        let whole = accumulate(style, text, start, whole_length, negative, position)?;
        let mut current = start + whole_length;

        let separator = text
            .get(current)
            .filter(|&&ch| self.max_fraction_length > 0 && style.is_decimal_separator(ch));

        if separator.is_some() {
            let separator_position = current;
            current += 1;

            let fraction_length = count_digits(style, text, current);

            if fraction_length == 0 && self.min_fraction_length > 0 {
                return Ok(failed(separator_position));
            } else if current >= text.len() {
                // A separator may not end the input
                return Ok(failed(current));
            } else if fraction_length < self.min_fraction_length {
                return Ok(failed(current + fraction_length));
            } else if fraction_length > self.max_fraction_length {
                return Ok(failed(current + self.max_fraction_length));
            } else if fraction_length == 0 && whole_length == 0 {
                return Ok(failed(current));
            }

            let mut fraction =
                scale_fraction(style, text, current, fraction_length, self.fraction_scale);
            if negative {
                fraction = -fraction;
            }

            for action in &self.actions {
                action(ctx, whole, fraction);
            }
            return Ok(matched(current + fraction_length));
        }

        if self.min_fraction_length > 0 || whole_length == 0 {
            return Ok(failed(current));
        }

        for action in &self.actions {
            action(ctx, whole, 0);
        }
        Ok(matched(current))
    }
}

/// Fraction digits alone, scaled like the fraction part of a decimal
pub struct Fraction {
    pub(crate) min_length: usize,
    pub(crate) max_length: usize,
    pub(crate) scale: usize,
    pub(crate) actions: Vec<NumberAction>,
}

impl Fraction {
    pub fn new(
        min_length: usize,
        max_length: usize,
        scale: usize,
        actions: Vec<NumberAction>,
    ) -> BuildResult<Self> {
        check_range(
            "fraction length",
            min_length,
            max_length,
            1,
            MAX_FRACTION_DIGITS,
            "1-9",
        )?;
        if !(1..=MAX_FRACTION_DIGITS).contains(&scale) || max_length > scale {
            return Err(BuildError::InvalidScale {
                scale,
                max_length,
            });
        }
        Ok(Self {
            min_length,
            max_length,
            scale,
            actions,
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        if position >= text.len() {
            return failed(position);
        }

        let style = ctx.number_style();
        let length = count_digits(style, text, position);

        if length < self.min_length {
            return failed(position + length);
        } else if length > self.max_length {
            return failed(position + self.max_length);
        }

        let fraction = scale_fraction(style, text, position, length, self.scale);
        for action in &self.actions {
            action(ctx, fraction);
        }
        matched(position + length)
    }
}

// ============================================================================
// Free-form text
// ============================================================================

/// A run of characters whose extent is decided by per-character predicates
///
/// With no predicates the run is always empty.
pub struct TextNode {
    pub(crate) min_length: usize,
    pub(crate) max_length: usize,
    pub(crate) predicates: Vec<CharPredicate>,
    pub(crate) actions: Vec<TextAction>,
}

impl TextNode {
    pub fn new(
        min_length: usize,
        max_length: usize,
        predicates: Vec<CharPredicate>,
        actions: Vec<TextAction>,
    ) -> BuildResult<Self> {
        if min_length > max_length {
            return Err(BuildError::InvalidLength {
                what: "text length",
                min: min_length,
                max: max_length,
                allowed: "0-usize::MAX",
            });
        }
        Ok(Self {
            min_length,
            max_length,
            predicates,
            actions,
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        if position >= text.len() {
            return failed(position);
        }

        let mut current = position;
        while current < text.len() && current - position <= self.max_length {
            let index = current - position;
            let view: &ParseContext<'_> = ctx;
            let rejected = self.predicates.is_empty()
                || self.predicates.iter().any(|predicate| {
                    predicate(view, text[current], index) == CharAction::RejectAndStop
                });
            if rejected {
                break;
            }
            current += 1;
        }

        let length = current - position;
        if length < self.min_length || length > self.max_length {
            return failed(position);
        }

        let captured: String = text[position..current].iter().collect();
        for action in &self.actions {
            action(ctx, &captured);
        }
        matched(current)
    }
}
