//! Field identities
//!
//! A [`Field`] names one semantic date-time quantity. Two fields are equal
//! only when they are the same identity: the name is carried for display and
//! serialization but never takes part in comparisons, so a custom field named
//! "year" is still distinct from [`fields::YEAR`].
//!
//! Built-in identities live in [`fields`]. Collaborators that need their own
//! quantities mint fresh ones with [`Field::custom`].

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

/// First id handed out by [`Field::custom`]; everything below is reserved
const FIRST_CUSTOM_ID: u32 = 1000;

static NEXT_CUSTOM_ID: AtomicU32 = AtomicU32::new(FIRST_CUSTOM_ID);

/// The category of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// A signed 64-bit integer
    Number,
    /// A boolean flag
    Boolean,
    /// An opaque textual value, such as a time zone id
    Text,
}

/// An opaque, globally unique key for a parsed quantity
#[derive(Clone, Copy)]
pub struct Field {
    id: u32,
    name: &'static str,
    kind: FieldKind,
}

impl Field {
    const fn reserved(id: u32, name: &'static str, kind: FieldKind) -> Self {
        Self { id, name, kind }
    }

    /// Mint a new field identity, distinct from every other field
    ///
    /// ```
    /// use chronoparse::{Field, FieldKind};
    ///
    /// let week_of_quarter = Field::custom("WeekOfQuarter", FieldKind::Number);
    /// assert_ne!(week_of_quarter, Field::custom("WeekOfQuarter", FieldKind::Number));
    /// ```
    pub fn custom(name: &'static str, kind: FieldKind) -> Self {
        let id = NEXT_CUSTOM_ID.fetch_add(1, Ordering::Relaxed);
        Self { id, name, kind }
    }

    /// Numeric identity of the field
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name of the field
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The kind of value stored under this field
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

impl PartialEq for Field {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Field {}

impl Hash for Field {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// The built-in field identities
pub mod fields {
    use super::{Field, FieldKind};

    // ========================================================================
    // Date
    // ========================================================================

    /// Proleptic year, may be negative
    pub const YEAR: Field = Field::reserved(1, "Year", FieldKind::Number);
    /// Year within the era
    pub const YEAR_OF_ERA: Field = Field::reserved(2, "YearOfEra", FieldKind::Number);
    /// Era, `0` for BCE and `1` for CE
    pub const ERA: Field = Field::reserved(3, "Era", FieldKind::Number);
    /// Month number, 1-12
    pub const MONTH_OF_YEAR: Field = Field::reserved(4, "MonthOfYear", FieldKind::Number);
    /// Day of the year, 1-366
    pub const DAY_OF_YEAR: Field = Field::reserved(5, "DayOfYear", FieldKind::Number);
    /// Day of the month, 1-31
    pub const DAY_OF_MONTH: Field = Field::reserved(6, "DayOfMonth", FieldKind::Number);
    /// ISO day of week, Monday (1) to Sunday (7)
    pub const DAY_OF_WEEK: Field = Field::reserved(7, "DayOfWeek", FieldKind::Number);
    /// Days since 1970-01-01
    pub const DAY_OF_UNIX_EPOCH: Field = Field::reserved(8, "DayOfUnixEpoch", FieldKind::Number);
    /// Set when an interval start is unbounded
    pub const IS_FAR_PAST: Field = Field::reserved(9, "IsFarPast", FieldKind::Boolean);
    /// Set when an interval end is unbounded
    pub const IS_FAR_FUTURE: Field = Field::reserved(10, "IsFarFuture", FieldKind::Boolean);

    // ========================================================================
    // Time
    // ========================================================================

    /// `0` for AM, `1` for PM
    pub const AM_PM_OF_DAY: Field = Field::reserved(20, "AmPmOfDay", FieldKind::Number);
    /// Hour within AM or PM, 0-11
    pub const HOUR_OF_AM_PM: Field = Field::reserved(21, "HourOfAmPm", FieldKind::Number);
    /// Clock hour within AM or PM, 1-12
    pub const CLOCK_HOUR_OF_AM_PM: Field =
        Field::reserved(22, "ClockHourOfAmPm", FieldKind::Number);
    /// Hour of the day, 0-23
    pub const HOUR_OF_DAY: Field = Field::reserved(23, "HourOfDay", FieldKind::Number);
    /// Clock hour of the day, 1-24
    pub const CLOCK_HOUR_OF_DAY: Field = Field::reserved(24, "ClockHourOfDay", FieldKind::Number);
    /// Minute of the hour, 0-59
    pub const MINUTE_OF_HOUR: Field = Field::reserved(25, "MinuteOfHour", FieldKind::Number);
    /// Second of the minute, 0-59
    pub const SECOND_OF_MINUTE: Field = Field::reserved(26, "SecondOfMinute", FieldKind::Number);
    /// Second of the day
    pub const SECOND_OF_DAY: Field = Field::reserved(27, "SecondOfDay", FieldKind::Number);
    /// Nanosecond of the second, 0-999,999,999
    pub const NANOSECOND_OF_SECOND: Field =
        Field::reserved(28, "NanosecondOfSecond", FieldKind::Number);
    /// Nanosecond of the day
    pub const NANOSECOND_OF_DAY: Field = Field::reserved(29, "NanosecondOfDay", FieldKind::Number);
    /// Microsecond of the second
    pub const MICROSECOND_OF_SECOND: Field =
        Field::reserved(30, "MicrosecondOfSecond", FieldKind::Number);
    /// Millisecond of the second
    pub const MILLISECOND_OF_SECOND: Field =
        Field::reserved(31, "MillisecondOfSecond", FieldKind::Number);

    // ========================================================================
    // UTC offset
    // ========================================================================

    /// Offset sign, `-1` or `1`
    pub const UTC_OFFSET_SIGN: Field = Field::reserved(40, "UtcOffsetSign", FieldKind::Number);
    /// Offset hours, 0-18
    pub const UTC_OFFSET_HOURS: Field = Field::reserved(41, "UtcOffsetHours", FieldKind::Number);
    /// Offset minutes, 0-59
    pub const UTC_OFFSET_MINUTES: Field =
        Field::reserved(42, "UtcOffsetMinutes", FieldKind::Number);
    /// Offset seconds, 0-59
    pub const UTC_OFFSET_SECONDS: Field =
        Field::reserved(43, "UtcOffsetSeconds", FieldKind::Number);
    /// Whole offset in seconds
    pub const UTC_OFFSET_TOTAL_SECONDS: Field =
        Field::reserved(44, "UtcOffsetTotalSeconds", FieldKind::Number);

    // ========================================================================
    // Time zone
    // ========================================================================

    /// Region id, such as `America/New_York`
    pub const TIME_ZONE_ID: Field = Field::reserved(50, "TimeZoneId", FieldKind::Text);
    /// Set when the zone is a fixed offset
    pub const TIME_ZONE_IS_FIXED_OFFSET: Field =
        Field::reserved(51, "TimeZoneIsFixedOffset", FieldKind::Boolean);

    // ========================================================================
    // Duration
    // ========================================================================

    /// Duration sign, `-1` or `1`
    pub const DURATION_SIGN: Field = Field::reserved(60, "DurationSign", FieldKind::Number);
    /// Whole years
    pub const DURATION_YEARS: Field = Field::reserved(61, "DurationYears", FieldKind::Number);
    /// Whole months
    pub const DURATION_MONTHS: Field = Field::reserved(62, "DurationMonths", FieldKind::Number);
    /// Whole weeks
    pub const DURATION_WEEKS: Field = Field::reserved(63, "DurationWeeks", FieldKind::Number);
    /// Whole days
    pub const DURATION_DAYS: Field = Field::reserved(64, "DurationDays", FieldKind::Number);
    /// Whole hours
    pub const DURATION_HOURS: Field = Field::reserved(65, "DurationHours", FieldKind::Number);
    /// Whole minutes
    pub const DURATION_MINUTES: Field = Field::reserved(66, "DurationMinutes", FieldKind::Number);
    /// Whole seconds
    pub const DURATION_SECONDS: Field = Field::reserved(67, "DurationSeconds", FieldKind::Number);
    /// Nanoseconds of the seconds component
    pub const DURATION_NANOSECONDS: Field =
        Field::reserved(68, "DurationNanoseconds", FieldKind::Number);
    /// Set when the duration is explicitly zero
    pub const DURATION_IS_ZERO: Field = Field::reserved(69, "DurationIsZero", FieldKind::Boolean);
}
