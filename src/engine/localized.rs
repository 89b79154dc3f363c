//! Locale-aware nodes
//!
//! Localized text (month names and the like), localized GMT offsets, and
//! time zone names. Candidate text comes from injected providers; these nodes
//! only match it.

use super::context::ParseContext;
use super::error::{BuildError, BuildResult};
use super::field::{fields, Field};
use super::node::{chars_match, failed, matched, region_matches};
use super::text::{TextProvider, TextStyle, TimeZoneNameProvider, TimeZoneNameStyle};
use std::fmt;
use std::sync::Arc;

const GMT: [char; 3] = ['G', 'M', 'T'];

/// ASCII digit value, used by the GMT offset forms which are never localized
#[inline]
fn ascii_digit(ch: char) -> Option<i64> {
    ch.to_digit(10).map(i64::from)
}

#[inline]
fn two_digits(text: &[char], at: usize) -> Option<i64> {
    let tens = ascii_digit(*text.get(at)?)?;
    let ones = ascii_digit(*text.get(at + 1)?)?;
    Some(tens * 10 + ones)
}

// ============================================================================
// Localized text
// ============================================================================

/// Longest-match lookup of a field value by its localized text
pub struct LocalizedText {
    pub(crate) field: Field,
    pub(crate) styles: Vec<TextStyle>,
    provider: Arc<dyn TextProvider>,
}

impl LocalizedText {
    pub fn new(field: Field, styles: Vec<TextStyle>, provider: Arc<dyn TextProvider>) -> BuildResult<Self> {
        if styles.is_empty() {
            return Err(BuildError::EmptyStyles);
        }
        Ok(Self {
            field,
            styles,
            provider,
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        if position >= text.len() {
            return failed(position);
        }

        let candidates = self
            .provider
            .parsable_text_for(self.field, &self.styles, ctx.locale());

        let case_sensitive = ctx.is_case_sensitive();
        for candidate in candidates.iter() {
            if region_matches(text, position, candidate.chars(), case_sensitive) {
                ctx.result_mut().set_int(self.field, candidate.value());
                return matched(position + candidate.chars().len());
            }
        }

        failed(position)
    }
}

// ============================================================================
// Localized offset
// ============================================================================

/// Which GMT offset forms are accepted after "GMT"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetFormat {
    /// `+hh:mm` with optional `:ss`
    Long,
    /// `+h` or `+hh`, with optional `:mm` and `:ss`
    Short,
}

/// "GMT" optionally followed by a signed offset
///
/// A bare "GMT", or one followed by an offset that doesn't parse, yields a
/// zero total offset and consumes only the three letters.
pub struct LocalizedOffset {
    pub(crate) format: OffsetFormat,
}

impl LocalizedOffset {
    pub fn new(format: OffsetFormat) -> Self {
        Self { format }
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        if !region_matches(text, position, &GMT, ctx.is_case_sensitive()) {
            return failed(position);
        }

        let current = position + GMT.len();

        if let Some(&sign) = text.get(current) {
            if sign == '-' || sign == '+' {
                let sign = if sign == '-' { -1 } else { 1 };
                let end = match self.format {
                    OffsetFormat::Long => long_offset(ctx, sign, text, current + 1),
                    OffsetFormat::Short => short_offset(ctx, sign, text, current + 1),
                };
                if end >= 0 {
                    return end;
                }
            }
        }

        ctx.result_mut().set_int(fields::UTC_OFFSET_TOTAL_SECONDS, 0);
        matched(current)
    }
}

fn long_offset(ctx: &mut ParseContext<'_>, sign: i64, text: &[char], position: usize) -> isize {
    if position + 2 >= text.len() {
        return failed(position);
    }

    let Some(hours) = two_digits(text, position) else {
        return failed(position);
    };
    let mut current = position + 2;

    if current + 2 >= text.len() || text[current] != ':' {
        return failed(current);
    }
    let Some(minutes) = two_digits(text, current + 1) else {
        return failed(current);
    };
    current += 3;

    let result = ctx.result_mut();
    result.set_int(fields::UTC_OFFSET_SIGN, sign);
    result.set_int(fields::UTC_OFFSET_HOURS, hours);
    result.set_int(fields::UTC_OFFSET_MINUTES, minutes);

    if current + 2 < text.len() && text[current] == ':' {
        if let Some(seconds) = two_digits(text, current + 1) {
            result.set_int(fields::UTC_OFFSET_SECONDS, seconds);
            current += 3;
        }
    }

    matched(current)
}

fn short_offset(ctx: &mut ParseContext<'_>, sign: i64, text: &[char], position: usize) -> isize {
    let Some(mut hours) = text.get(position).copied().and_then(ascii_digit) else {
        return failed(position);
    };
    let mut current = position + 1;
    let result = ctx.result_mut();

    if current < text.len() {
        if let Some(digit) = ascii_digit(text[current]) {
            hours = hours * 10 + digit;
            current += 1;
        }

        if current + 2 < text.len() && text[current] == ':' {
            if let Some(minutes) = two_digits(text, current + 1) {
                result.set_int(fields::UTC_OFFSET_MINUTES, minutes);
                current += 3;

                if current + 2 < text.len() && text[current] == ':' {
                    if let Some(seconds) = two_digits(text, current + 1) {
                        result.set_int(fields::UTC_OFFSET_SECONDS, seconds);
                        current += 3;
                    }
                }
            }
        }
    }

    result.set_int(fields::UTC_OFFSET_SIGN, sign);
    result.set_int(fields::UTC_OFFSET_HOURS, hours);
    matched(current)
}

// ============================================================================
// Time zone names
// ============================================================================

/// Picks one region id when a name matches several
pub type Resolver = Arc<dyn Fn(&ParseContext<'_>, &str, &[String]) -> Option<String> + Send + Sync>;

/// How to settle a zone name shared by several regions
#[derive(Clone)]
pub enum Disambiguation {
    /// Treat the ambiguity as a mismatch
    RaiseError,
    /// Take the first id in sorted order
    PickFirst,
    /// Ask the resolver; `None` is a mismatch
    Custom(Resolver),
}

impl Disambiguation {
    /// Wrap a closure as a custom resolver
    pub fn custom<F>(resolver: F) -> Self
    where
        F: Fn(&ParseContext<'_>, &str, &[String]) -> Option<String> + Send + Sync + 'static,
    {
        Disambiguation::Custom(Arc::new(resolver))
    }

    fn resolve(&self, ctx: &ParseContext<'_>, name: &str, ids: &[String]) -> Option<String> {
        match self {
            Disambiguation::RaiseError => None,
            Disambiguation::PickFirst => ids.first().cloned(),
            Disambiguation::Custom(resolver) => resolver(ctx, name, ids),
        }
    }
}

impl fmt::Debug for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disambiguation::RaiseError => f.write_str("RaiseError"),
            Disambiguation::PickFirst => f.write_str("PickFirst"),
            Disambiguation::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Matches a zone display name or region id, falling back to a GMT offset
pub struct TimeZoneName {
    pub(crate) styles: Vec<TimeZoneNameStyle>,
    pub(crate) disambiguation: Disambiguation,
    provider: Arc<dyn TimeZoneNameProvider>,
    fallback: LocalizedOffset,
}

impl TimeZoneName {
    pub fn new(
        styles: Vec<TimeZoneNameStyle>,
        disambiguation: Disambiguation,
        provider: Arc<dyn TimeZoneNameProvider>,
    ) -> BuildResult<Self> {
        if styles.is_empty() {
            return Err(BuildError::EmptyStyles);
        }
        Ok(Self {
            styles,
            disambiguation,
            provider,
            fallback: LocalizedOffset::new(OffsetFormat::Short),
        })
    }

    pub(crate) fn attempt(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> isize {
        if position >= text.len() {
            return failed(position);
        }

        let case_sensitive = ctx.is_case_sensitive();
        let names = self.provider.parsable_names_for(&self.styles, ctx.locale());
        let found = names
            .iter()
            .find(|candidate| region_matches(text, position, candidate.chars(), case_sensitive));

        let gmt_like = found.map_or(true, |candidate| {
            candidate.chars().len() >= GMT.len()
                && candidate
                    .chars()
                    .iter()
                    .zip(GMT.iter())
                    .all(|(&a, &b)| chars_match(a, b, case_sensitive))
        });

        if gmt_like {
            let end = self.fallback.attempt(ctx, text, position);
            if end > 0 {
                return end;
            }
        }

        let Some(candidate) = found else {
            return failed(position);
        };

        let id = match candidate.ids() {
            [only] => only.clone(),
            ids => match self.disambiguation.resolve(ctx, candidate.name(), ids) {
                Some(id) => id,
                None => return failed(position),
            },
        };

        ctx.result_mut().set_text(fields::TIME_ZONE_ID, id);
        matched(position + candidate.chars().len())
    }
}
