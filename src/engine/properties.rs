//! Builder shortcuts that store into the standard fields
//!
//! Each numeric shortcut takes the digit range and a configuration closure,
//! the same shape as [`ParserBuilder::whole_number`]; the field association
//! is applied first so the closure can add more callbacks.

use super::builder::{DecimalNumberBuilder, ParserBuilder, WholeNumberBuilder};
use super::error::BuildResult;
use super::field::{fields, Field};
use super::node::CharAction;
use super::text::TextStyle;
use std::ops::RangeInclusive;

/// Longest region id accepted by [`ParserBuilder::time_zone_id`]
pub const MAX_TIME_ZONE_ID_LENGTH: usize = 50;

fn is_zone_id_char(ch: char, index: usize) -> bool {
    if index == 0 {
        ch.is_ascii_alphabetic()
    } else {
        ch.is_ascii_alphabetic() || ('-'..='9').contains(&ch) || matches!(ch, '~' | '_' | '+')
    }
}

macro_rules! whole_number_shortcut {
    ($(#[$doc:meta])* $name:ident => $field:expr) => {
        $(#[$doc])*
        pub fn $name<F>(&mut self, length: RangeInclusive<usize>, configure: F) -> BuildResult<&mut Self>
        where
            F: FnOnce(WholeNumberBuilder) -> WholeNumberBuilder,
        {
            self.whole_number(length, |n| configure(n.associate_with($field)))
        }
    };
}

impl ParserBuilder {
    // ========================================================================
    // Date
    // ========================================================================

    whole_number_shortcut!(
        /// Year, into [`fields::YEAR`]
        year => fields::YEAR
    );
    whole_number_shortcut!(
        /// Year of era, into [`fields::YEAR_OF_ERA`]
        year_of_era => fields::YEAR_OF_ERA
    );
    whole_number_shortcut!(
        /// Month number, into [`fields::MONTH_OF_YEAR`]
        month_number => fields::MONTH_OF_YEAR
    );
    whole_number_shortcut!(day_of_month => fields::DAY_OF_MONTH);
    whole_number_shortcut!(day_of_year => fields::DAY_OF_YEAR);
    whole_number_shortcut!(
        /// ISO day of week number, 1 (Monday) to 7
        day_of_week_number => fields::DAY_OF_WEEK
    );

    /// Era name in any of `styles`
    pub fn era(&mut self, styles: &[TextStyle]) -> BuildResult<&mut Self> {
        self.localized_text(fields::ERA, styles)
    }

    /// Month name in any of `styles`
    pub fn localized_month(&mut self, styles: &[TextStyle]) -> BuildResult<&mut Self> {
        self.localized_text(fields::MONTH_OF_YEAR, styles)
    }

    /// Day of week name in any of `styles`
    pub fn localized_day_of_week(&mut self, styles: &[TextStyle]) -> BuildResult<&mut Self> {
        self.localized_text(fields::DAY_OF_WEEK, styles)
    }

    /// "AM" or "PM", into [`fields::AM_PM_OF_DAY`] as 0 or 1
    pub fn am_pm(&mut self) -> BuildResult<&mut Self> {
        self.localized_text(fields::AM_PM_OF_DAY, &[TextStyle::Full])
    }

    // ========================================================================
    // Time
    // ========================================================================

    whole_number_shortcut!(hour_of_day => fields::HOUR_OF_DAY);
    whole_number_shortcut!(minute_of_hour => fields::MINUTE_OF_HOUR);
    whole_number_shortcut!(second_of_minute => fields::SECOND_OF_MINUTE);

    /// Seconds with an optional fraction
    ///
    /// Whole seconds go to [`fields::SECOND_OF_MINUTE`], the fraction to
    /// [`fields::NANOSECOND_OF_SECOND`].
    pub fn fractional_second_of_minute<F>(
        &mut self,
        whole_length: RangeInclusive<usize>,
        configure: F,
    ) -> BuildResult<&mut Self>
    where
        F: FnOnce(DecimalNumberBuilder) -> DecimalNumberBuilder,
    {
        self.decimal_number(whole_length, 0..=9, 9, |d| {
            configure(d.associate_with(fields::SECOND_OF_MINUTE, fields::NANOSECOND_OF_SECOND))
        })
    }

    // ========================================================================
    // UTC offset
    // ========================================================================

    /// Offset sign, into [`fields::UTC_OFFSET_SIGN`]
    pub fn utc_offset_sign(&mut self) -> &mut Self {
        self.sign(|s| s.associate_with(fields::UTC_OFFSET_SIGN))
    }

    whole_number_shortcut!(utc_offset_hours => fields::UTC_OFFSET_HOURS);
    whole_number_shortcut!(utc_offset_minutes => fields::UTC_OFFSET_MINUTES);
    whole_number_shortcut!(utc_offset_seconds => fields::UTC_OFFSET_SECONDS);

    /// The letter 'Z', meaning a zero offset
    pub fn utc_designator(&mut self) -> &mut Self {
        self.literal_with("Z", |l| {
            l.on_parsed(|ctx| ctx.result_mut().set_int(fields::UTC_OFFSET_TOTAL_SECONDS, 0))
        })
    }

    // ========================================================================
    // Time zone
    // ========================================================================

    /// An IANA-style region id such as `America/New_York`, into
    /// [`fields::TIME_ZONE_ID`]
    pub fn time_zone_id(&mut self) -> BuildResult<&mut Self> {
        self.text(1..=MAX_TIME_ZONE_ID_LENGTH, |t| {
            t.on_each_char(|_, ch, index| {
                if is_zone_id_char(ch, index) {
                    CharAction::AcceptAndContinue
                } else {
                    CharAction::RejectAndStop
                }
            })
            .associate_with(fields::TIME_ZONE_ID)
        })
    }

    // ========================================================================
    // Durations
    // ========================================================================

    /// Duration sign, into [`fields::DURATION_SIGN`]
    pub fn period_sign(&mut self) -> &mut Self {
        self.sign(|s| s.associate_with(fields::DURATION_SIGN))
    }

    whole_number_shortcut!(period_of_years => fields::DURATION_YEARS);
    whole_number_shortcut!(period_of_months => fields::DURATION_MONTHS);
    whole_number_shortcut!(period_of_weeks => fields::DURATION_WEEKS);
    whole_number_shortcut!(period_of_days => fields::DURATION_DAYS);
    whole_number_shortcut!(duration_of_hours => fields::DURATION_HOURS);
    whole_number_shortcut!(duration_of_minutes => fields::DURATION_MINUTES);
    whole_number_shortcut!(duration_of_seconds => fields::DURATION_SECONDS);

    /// Seconds with an optional nanosecond fraction, into
    /// [`fields::DURATION_SECONDS`] and [`fields::DURATION_NANOSECONDS`]
    pub fn duration_of_fractional_seconds<F>(
        &mut self,
        whole_length: RangeInclusive<usize>,
        configure: F,
    ) -> BuildResult<&mut Self>
    where
        F: FnOnce(DecimalNumberBuilder) -> DecimalNumberBuilder,
    {
        self.decimal_number(whole_length, 0..=9, 9, |d| {
            configure(d.associate_with(fields::DURATION_SECONDS, fields::DURATION_NANOSECONDS))
        })
    }

    // ========================================================================
    // Intervals
    // ========================================================================

    /// The text "..", marking an open interval end in `field`
    pub fn unbounded_designator(&mut self, field: Field) -> &mut Self {
        self.literal_with("..", |l| l.associate_with(field))
    }
}
