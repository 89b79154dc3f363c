//! Parse settings
//!
//! Settings are immutable and shared by reference with every node during a
//! parse. They carry the characters accepted as digits, signs, and decimal
//! separators, the locale handed to text providers, and the default
//! case-sensitivity.
//!
//! # Example
//!
//! ```rust
//! use chronoparse::{Locale, NumberStyle, ParseSettings};
//!
//! let settings = ParseSettings::new()
//!     .with_locale(Locale::new("en-US"))
//!     .with_case_sensitive(false);
//!
//! assert_eq!(settings.number_style(), &NumberStyle::ISO);
//! ```

use super::error::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Policy for the sign character in front of a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignStyle {
    /// A sign character is rejected
    Never,
    /// `-` is accepted, `+` is rejected, and absence is allowed
    NegativeOnly,
    /// A sign character is required
    Always,
}

/// The characters used to write numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberStyle {
    zero_digit: char,
    plus_sign: Cow<'static, [char]>,
    minus_sign: Cow<'static, [char]>,
    decimal_separator: Cow<'static, [char]>,
}

impl NumberStyle {
    /// The locale-invariant style used by ISO-8601
    pub const ISO: NumberStyle = NumberStyle {
        zero_digit: '0',
        plus_sign: Cow::Borrowed(&['+']),
        minus_sign: Cow::Borrowed(&['-', '\u{2212}']),
        decimal_separator: Cow::Borrowed(&['.', ',']),
    };

    /// Create a style, rejecting empty sign or separator sets
    pub fn new(
        zero_digit: char,
        plus_sign: impl Into<Vec<char>>,
        minus_sign: impl Into<Vec<char>>,
        decimal_separator: impl Into<Vec<char>>,
    ) -> BuildResult<Self> {
        let plus_sign = plus_sign.into();
        let minus_sign = minus_sign.into();
        let decimal_separator = decimal_separator.into();

        if plus_sign.is_empty() {
            return Err(BuildError::InvalidNumberStyle {
                reason: "at least one plus sign is required",
            });
        }
        if minus_sign.is_empty() {
            return Err(BuildError::InvalidNumberStyle {
                reason: "at least one minus sign is required",
            });
        }
        if decimal_separator.is_empty() {
            return Err(BuildError::InvalidNumberStyle {
                reason: "at least one decimal separator is required",
            });
        }
        if char::from_u32(zero_digit as u32 + 9).is_none() {
            return Err(BuildError::InvalidNumberStyle {
                reason: "zero digit must start a run of ten digits",
            });
        }

        Ok(Self {
            zero_digit,
            plus_sign: Cow::Owned(plus_sign),
            minus_sign: Cow::Owned(minus_sign),
            decimal_separator: Cow::Owned(decimal_separator),
        })
    }

    /// The character representing zero
    #[inline]
    pub fn zero_digit(&self) -> char {
        self.zero_digit
    }

    /// Accepted plus sign characters
    #[inline]
    pub fn plus_sign(&self) -> &[char] {
        &self.plus_sign
    }

    /// Accepted minus sign characters
    #[inline]
    pub fn minus_sign(&self) -> &[char] {
        &self.minus_sign
    }

    /// Accepted decimal separator characters
    #[inline]
    pub fn decimal_separator(&self) -> &[char] {
        &self.decimal_separator
    }

    /// The value of `ch` as a digit in this style, if it is one
    #[inline]
    pub fn digit(&self, ch: char) -> Option<u32> {
        let value = (ch as u32).wrapping_sub(self.zero_digit as u32);
        if value < 10 {
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn is_plus(&self, ch: char) -> bool {
        self.plus_sign.contains(&ch)
    }

    #[inline]
    pub(crate) fn is_minus(&self, ch: char) -> bool {
        self.minus_sign.contains(&ch)
    }

    #[inline]
    pub(crate) fn is_decimal_separator(&self, ch: char) -> bool {
        self.decimal_separator.contains(&ch)
    }
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self::ISO
    }
}

/// A BCP-47 language tag handed to text providers
///
/// The engine never interprets the tag itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// The root locale, used when nothing more specific is requested
    pub const ROOT: Locale = Locale(Cow::Borrowed(""));

    /// Create a locale from a language tag such as `en-US`
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// The language tag
    #[inline]
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `en` for `en-US`
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or("")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings that control parsing behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSettings {
    number_style: NumberStyle,
    locale: Locale,
    case_sensitive: bool,
}

impl ParseSettings {
    /// ISO number style, root locale, case-sensitive
    pub const DEFAULT: ParseSettings = ParseSettings {
        number_style: NumberStyle::ISO,
        locale: Locale::ROOT,
        case_sensitive: true,
    };

    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number style
    pub fn with_number_style(mut self, number_style: NumberStyle) -> Self {
        self.number_style = number_style;
        self
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the default case-sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[inline]
    pub fn number_style(&self) -> &NumberStyle {
        &self.number_style
    }

    #[inline]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[inline]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
