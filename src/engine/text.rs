//! Localized text resolution
//!
//! The engine never looks up month names or zone names itself. Localized
//! nodes ask an injected [`TextProvider`] or [`TimeZoneNameProvider`] for a
//! candidate list and match against it.
//!
//! Candidate lists are ordered longest first, so "May" is tried before "M".
//! Text that would map to more than one value is dropped entirely: in English
//! the narrow month "M" is both March and May, so it can never be parsed.

use super::field::{fields, Field};
use super::settings::Locale;
use ahash::RandomState;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

// ============================================================================
// Styles
// ============================================================================

/// Width and context of localized text
///
/// Standalone variants are used when the text appears on its own rather than
/// inside a full date, which matters in languages that inflect month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TextStyle {
    Full,
    FullStandalone,
    Short,
    ShortStandalone,
    Narrow,
    NarrowStandalone,
}

impl TextStyle {
    pub const ALL: [TextStyle; 6] = [
        TextStyle::Full,
        TextStyle::FullStandalone,
        TextStyle::Short,
        TextStyle::ShortStandalone,
        TextStyle::Narrow,
        TextStyle::NarrowStandalone,
    ];

    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            TextStyle::FullStandalone | TextStyle::ShortStandalone | TextStyle::NarrowStandalone
        )
    }

    pub fn as_standalone(self) -> TextStyle {
        match self {
            TextStyle::Full => TextStyle::FullStandalone,
            TextStyle::Short => TextStyle::ShortStandalone,
            TextStyle::Narrow => TextStyle::NarrowStandalone,
            other => other,
        }
    }

    pub fn as_normal(self) -> TextStyle {
        match self {
            TextStyle::FullStandalone => TextStyle::Full,
            TextStyle::ShortStandalone => TextStyle::Short,
            TextStyle::NarrowStandalone => TextStyle::Narrow,
            other => other,
        }
    }
}

/// Style of a time zone display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeZoneNameStyle {
    LongStandard,
    ShortStandard,
    LongDaylight,
    ShortDaylight,
    LongGeneric,
    ShortGeneric,
}

impl TimeZoneNameStyle {
    pub const ALL: [TimeZoneNameStyle; 6] = [
        TimeZoneNameStyle::LongStandard,
        TimeZoneNameStyle::ShortStandard,
        TimeZoneNameStyle::LongDaylight,
        TimeZoneNameStyle::ShortDaylight,
        TimeZoneNameStyle::LongGeneric,
        TimeZoneNameStyle::ShortGeneric,
    ];

    pub fn is_short(self) -> bool {
        matches!(
            self,
            TimeZoneNameStyle::ShortStandard
                | TimeZoneNameStyle::ShortDaylight
                | TimeZoneNameStyle::ShortGeneric
        )
    }

    pub fn is_long(self) -> bool {
        !self.is_short()
    }

    pub fn is_generic(self) -> bool {
        matches!(
            self,
            TimeZoneNameStyle::LongGeneric | TimeZoneNameStyle::ShortGeneric
        )
    }

    pub fn is_daylight(self) -> bool {
        matches!(
            self,
            TimeZoneNameStyle::LongDaylight | TimeZoneNameStyle::ShortDaylight
        )
    }

    /// The matching width for ordinary localized text
    pub fn to_text_style(self) -> TextStyle {
        if self.is_short() {
            TextStyle::Short
        } else {
            TextStyle::Full
        }
    }
}

/// Normalize a style list for use as a cache key
fn style_key<S: Copy + Ord>(styles: &[S]) -> Vec<S> {
    let set: BTreeSet<S> = styles.iter().copied().collect();
    set.into_iter().collect()
}

// ============================================================================
// Parsable text
// ============================================================================

/// One candidate string and the value it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCandidate {
    text: String,
    chars: Vec<char>,
    value: i64,
}

impl TextCandidate {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// Candidate strings for one field, longest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsableText {
    candidates: Vec<TextCandidate>,
}

impl ParsableText {
    /// Build a list from raw (text, value) pairs
    ///
    /// Duplicates with the same value collapse into one candidate. Text that
    /// appears with different values is excluded. Empty text is ignored.
    pub fn from_candidates<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut values: BTreeMap<String, Option<i64>> = BTreeMap::new();

        for (text, value) in pairs {
            let text = text.into();
            if text.is_empty() {
                continue;
            }
            values
                .entry(text)
                .and_modify(|existing| {
                    if *existing != Some(value) {
                        *existing = None;
                    }
                })
                .or_insert(Some(value));
        }

        let mut candidates: Vec<TextCandidate> = values
            .into_iter()
            .filter_map(|(text, value)| {
                value.map(|value| TextCandidate {
                    chars: text.chars().collect(),
                    text,
                    value,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.chars
                .len()
                .cmp(&a.chars.len())
                .then_with(|| a.text.cmp(&b.text))
        });

        Self { candidates }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextCandidate> + '_ {
        self.candidates.iter()
    }
}

// ============================================================================
// Text provider
// ============================================================================

/// Source of localized text for numeric fields
pub trait TextProvider: Send + Sync {
    /// The text for `value` of `field`, if the provider knows it
    fn text_for(&self, field: Field, value: i64, style: TextStyle, locale: &Locale) -> Option<String>;

    /// Values of `field` that have localized text
    fn value_range(&self, field: Field) -> Option<RangeInclusive<i64>> {
        match field {
            f if f == fields::MONTH_OF_YEAR => Some(1..=12),
            f if f == fields::DAY_OF_WEEK => Some(1..=7),
            f if f == fields::AM_PM_OF_DAY => Some(0..=1),
            f if f == fields::ERA => Some(0..=1),
            _ => None,
        }
    }

    /// All parsable text for `field` across `styles`
    fn parsable_text_for(&self, field: Field, styles: &[TextStyle], locale: &Locale) -> Arc<ParsableText> {
        Arc::new(collect_parsable_text(self, field, styles, locale))
    }
}

/// Gathers every known text of `field` in `styles` into a [`ParsableText`]
pub(crate) fn collect_parsable_text<P>(provider: &P, field: Field, styles: &[TextStyle], locale: &Locale) -> ParsableText
where
    P: TextProvider + ?Sized,
{
    let Some(range) = provider.value_range(field) else {
        return ParsableText::default();
    };

    let pairs = styles.iter().flat_map(|&style| {
        range
            .clone()
            .filter_map(move |value| provider.text_for(field, value, style, locale).map(|text| (text, value)))
    });
    ParsableText::from_candidates(pairs)
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const AM_PM: [&str; 2] = ["AM", "PM"];

const ERAS_FULL: [&str; 2] = ["Before Christ", "Anno Domini"];
const ERAS_SHORT: [&str; 2] = ["BC", "AD"];
const ERAS_NARROW: [&str; 2] = ["B", "A"];

type TextCacheKey = (Field, Vec<TextStyle>, Locale);

/// Built-in English text for months, days of the week, AM/PM and eras
///
/// The locale is ignored. Computed candidate lists are cached.
#[derive(Debug, Default)]
pub struct EnglishTextProvider {
    cache: Mutex<HashMap<TextCacheKey, Arc<ParsableText>, RandomState>>,
}

impl EnglishTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide shared instance
    pub fn shared() -> Arc<EnglishTextProvider> {
        static SHARED: OnceLock<Arc<EnglishTextProvider>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(EnglishTextProvider::new())).clone()
    }

    fn abbreviate(text: &str, style: TextStyle) -> String {
        match style.as_normal() {
            TextStyle::Full => text.to_string(),
            TextStyle::Short => text.chars().take(3).collect(),
            _ => text.chars().take(1).collect(),
        }
    }
}

impl TextProvider for EnglishTextProvider {
    fn text_for(&self, field: Field, value: i64, style: TextStyle, _locale: &Locale) -> Option<String> {
        let index = usize::try_from(value).ok()?;

        if field == fields::MONTH_OF_YEAR {
            let name = MONTHS.get(index.checked_sub(1)?)?;
            Some(Self::abbreviate(name, style))
        } else if field == fields::DAY_OF_WEEK {
            let name = DAYS_OF_WEEK.get(index.checked_sub(1)?)?;
            Some(Self::abbreviate(name, style))
        } else if field == fields::AM_PM_OF_DAY {
            AM_PM.get(index).map(|text| text.to_string())
        } else if field == fields::ERA {
            let table = match style.as_normal() {
                TextStyle::Full => &ERAS_FULL,
                TextStyle::Short => &ERAS_SHORT,
                _ => &ERAS_NARROW,
            };
            table.get(index).map(|text| text.to_string())
        } else {
            None
        }
    }

    fn parsable_text_for(&self, field: Field, styles: &[TextStyle], locale: &Locale) -> Arc<ParsableText> {
        let styles = style_key(styles);

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry((field, styles.clone(), locale.clone()))
            .or_insert_with(|| Arc::new(collect_parsable_text(self, field, &styles, locale)))
            .clone()
    }
}

// ============================================================================
// Time zone names
// ============================================================================

/// A zone display name and every region id it could refer to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneNameCandidate {
    name: String,
    chars: Vec<char>,
    ids: Vec<String>,
}

impl ZoneNameCandidate {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Matching region ids, sorted
    #[inline]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[inline]
    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// Zone names and ids, longest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneNames {
    candidates: Vec<ZoneNameCandidate>,
}

impl ZoneNames {
    /// Collect every id and its display names in `styles`
    ///
    /// Each region id is a candidate for itself. A display name shared by
    /// several regions keeps all of them for later disambiguation.
    pub fn collect<P>(provider: &P, styles: &[TimeZoneNameStyle], locale: &Locale) -> Self
    where
        P: TimeZoneNameProvider + ?Sized,
    {
        let mut names: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for id in provider.region_ids() {
            names.entry(id.clone()).or_default().insert(id.clone());

            for &style in styles {
                match provider.name_for(&id, style, locale) {
                    Some(name) if !name.is_empty() => {
                        names.entry(name).or_default().insert(id.clone());
                    }
                    _ => {}
                }
            }
        }

        let mut candidates: Vec<ZoneNameCandidate> = names
            .into_iter()
            .map(|(name, ids)| ZoneNameCandidate {
                chars: name.chars().collect(),
                name,
                ids: ids.into_iter().collect(),
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.chars
                .len()
                .cmp(&a.chars.len())
                .then_with(|| a.name.cmp(&b.name))
        });

        Self { candidates }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneNameCandidate> + '_ {
        self.candidates.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Source of region ids and their display names
pub trait TimeZoneNameProvider: Send + Sync {
    /// Every region id known to the provider
    fn region_ids(&self) -> Vec<String>;

    /// Display name of `id` in `style`, if any
    fn name_for(&self, id: &str, style: TimeZoneNameStyle, locale: &Locale) -> Option<String>;

    /// Candidate names for matching
    fn parsable_names_for(&self, styles: &[TimeZoneNameStyle], locale: &Locale) -> Arc<ZoneNames> {
        Arc::new(ZoneNames::collect(self, styles, locale))
    }
}

type ZoneCacheKey = (Vec<TimeZoneNameStyle>, Locale);

/// An in-memory table of zones and their names, for one language
#[derive(Debug, Default)]
pub struct ZoneNameTable {
    zones: BTreeMap<String, Vec<(TimeZoneNameStyle, String)>>,
    cache: Mutex<HashMap<ZoneCacheKey, Arc<ZoneNames>, RandomState>>,
}

impl ZoneNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region id along with its display names
    pub fn with_zone<I, S>(mut self, id: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = (TimeZoneNameStyle, S)>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|(style, name)| (style, name.into()))
            .collect();
        self.zones.insert(id.into(), names);
        self
    }
}

impl TimeZoneNameProvider for ZoneNameTable {
    fn region_ids(&self) -> Vec<String> {
        self.zones.keys().cloned().collect()
    }

    fn name_for(&self, id: &str, style: TimeZoneNameStyle, _locale: &Locale) -> Option<String> {
        self.zones
            .get(id)?
            .iter()
            .find(|(candidate, _)| *candidate == style)
            .map(|(_, name)| name.clone())
    }

    fn parsable_names_for(&self, styles: &[TimeZoneNameStyle], locale: &Locale) -> Arc<ZoneNames> {
        let key = (style_key(styles), locale.clone());

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(key)
            .or_insert_with(|| Arc::new(ZoneNames::collect(self, styles, locale)))
            .clone()
    }
}
