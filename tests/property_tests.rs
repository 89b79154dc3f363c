//! Property-based tests using proptest
//!
//! These tests check the engine's invariants across a wide range of inputs.

use chronoparse::{fields, iso, parse_batch, parse_batch_parallel, ParseSettings, TemporalParser};
use proptest::prelude::*;

fn whole_seconds() -> TemporalParser {
    TemporalParser::build(|p| {
        p.whole_number(1..=19, |n| n.associate_with(fields::DURATION_SECONDS))?;
        Ok(())
    })
    .unwrap()
}

fn nanoseconds() -> TemporalParser {
    TemporalParser::build(|p| {
        p.fraction(1..=9, 9, |f| f.associate_with(fields::NANOSECOND_OF_SECOND))?;
        Ok(())
    })
    .unwrap()
}

// =============================================================================
// Number Tests
// =============================================================================

proptest! {
    /// Any i64 except MIN is read back exactly
    #[test]
    fn test_whole_number_reads_back(value in -i64::MAX..=i64::MAX) {
        let result = whole_seconds().parse(&value.to_string()).unwrap();
        prop_assert_eq!(result.int(fields::DURATION_SECONDS), Some(value));
    }

    /// An explicit plus sign never changes the value
    #[test]
    fn test_plus_sign_is_neutral(value in 0..=i64::MAX) {
        let plain = whole_seconds().parse(&value.to_string()).unwrap();
        let signed = whole_seconds().parse(&format!("+{}", value)).unwrap();
        prop_assert_eq!(plain, signed);
    }

    /// Fraction digits scale to nanoseconds as if right-padded with zeros
    #[test]
    fn test_fraction_scales_to_nanos(digits in "[0-9]{1,9}") {
        let padded = format!("{:0<9}", digits);
        let expected: i64 = padded.parse().unwrap();

        let result = nanoseconds().parse(&digits).unwrap();
        prop_assert_eq!(result.int(fields::NANOSECOND_OF_SECOND), Some(expected));
    }

    /// Runs longer than nineteen digits always fail
    #[test]
    fn test_too_many_digits_fail(digits in "[1-9][0-9]{19,25}") {
        let error = whole_seconds().parse(&digits).unwrap_err();
        prop_assert_eq!(error.index(), 19);
    }
}

// =============================================================================
// ISO Tests
// =============================================================================

proptest! {
    /// Basic and extended dates describe the same fields
    #[test]
    fn test_date_formats_agree(year in 0..=9999i64, month in 1..=12i64, day in 1..=31i64) {
        let basic = iso::date().parse(&format!("{:04}{:02}{:02}", year, month, day)).unwrap();
        let extended = iso::date().parse(&format!("{:04}-{:02}-{:02}", year, month, day)).unwrap();

        prop_assert_eq!(basic.int(fields::YEAR), Some(year));
        prop_assert_eq!(basic.int(fields::MONTH_OF_YEAR), Some(month));
        prop_assert_eq!(basic.int(fields::DAY_OF_MONTH), Some(day));
        prop_assert_eq!(basic, extended);
    }

    /// Times with any precision parse the same either way
    #[test]
    fn test_time_formats_agree(hour in 0..24i64, minute in 0..60i64, second in 0..60i64, fraction in "[0-9]{1,9}") {
        let basic = iso::time().parse(&format!("{:02}{:02}{:02}.{}", hour, minute, second, fraction)).unwrap();
        let extended = iso::time().parse(&format!("{:02}:{:02}:{:02}.{}", hour, minute, second, fraction)).unwrap();

        prop_assert_eq!(basic.int(fields::HOUR_OF_DAY), Some(hour));
        prop_assert_eq!(basic.int(fields::SECOND_OF_MINUTE), Some(second));
        prop_assert_eq!(basic, extended);
    }

    /// Arbitrary text never panics and errors point inside the input
    #[test]
    fn test_errors_stay_in_bounds(text in "\\PC{0,40}") {
        if let Err(error) = iso::offset_date_time().parse(&text) {
            prop_assert!(error.index() <= text.chars().count());
            prop_assert_eq!(error.parsed_text(), text.as_str());
        }
    }

    /// Interval ends parse like standalone dates
    #[test]
    fn test_interval_ends(start in 1000..=9999i64, end in 1000..=9999i64) {
        let text = format!("{}-01-01/{}-12-31", start, end);
        let ends = iso::date_range().parse(&text).unwrap();

        prop_assert_eq!(ends.len(), 2);
        prop_assert_eq!(ends[0].int(fields::YEAR), Some(start));
        prop_assert_eq!(ends[1].int(fields::YEAR), Some(end));
    }
}

// =============================================================================
// Settings and Batch Tests
// =============================================================================

proptest! {
    /// Case-insensitive settings accept any casing of a literal
    #[test]
    fn test_case_insensitive_literal(text in "[pP][tT][0-9]{1,3}[hH]") {
        let parser = TemporalParser::build(|p| {
            p.literal("PT");
            p.duration_of_hours(1..=3, |n| n)?;
            p.literal("H");
            Ok(())
        })
        .unwrap();
        let settings = ParseSettings::new().with_case_sensitive(false);

        prop_assert!(parser.parse_with(&text, &settings).is_ok());
        prop_assert_eq!(parser.parse(&text).is_ok(), text == text.to_uppercase());
    }

    /// Batch parsing gives the same results in parallel
    #[test]
    fn test_batch_matches_parallel(inputs in prop::collection::vec("[0-9:T-]{0,12}", 0..20)) {
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
        let sequential = parse_batch(iso::date_time(), &inputs);
        let parallel = parse_batch_parallel(iso::date_time(), &inputs);

        prop_assert_eq!(sequential, parallel);
    }
}
