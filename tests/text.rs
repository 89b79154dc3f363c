//! Integration tests for localized matching
//!
//! Covers month and weekday names, eras, AM/PM, GMT offsets and time zone
//! names with their disambiguation strategies.

use chronoparse::engine::{ParsableText, TextCandidate, ZoneNameTable};
use chronoparse::{
    fields, BuildError, Disambiguation, Field, Locale, ParseError, ParseSettings, TemporalParser,
    TextProvider, TextStyle, TimeZoneNameProvider, TimeZoneNameStyle,
};
use std::sync::Arc;

fn build<F>(f: F) -> TemporalParser
where
    F: FnOnce(&mut chronoparse::ParserBuilder) -> chronoparse::BuildResult<()>,
{
    TemporalParser::build(f).expect("grammar should build")
}

// ============================================================================
// Localized Text Tests
// ============================================================================

#[test]
fn test_longest_month_name_wins() {
    let parser = build(|p| {
        p.localized_month(&[TextStyle::Full, TextStyle::Short])?;
        Ok(())
    });

    assert_eq!(parser.parse("January").unwrap().int(fields::MONTH_OF_YEAR), Some(1));
    assert_eq!(parser.parse("Jan").unwrap().int(fields::MONTH_OF_YEAR), Some(1));
    assert_eq!(parser.parse("May").unwrap().int(fields::MONTH_OF_YEAR), Some(5));
}

#[test]
fn test_partial_name_leaves_trailing_input() {
    let parser = build(|p| {
        p.localized_month(&[TextStyle::Full, TextStyle::Short])?;
        Ok(())
    });

    let error = parser.parse("Sept").unwrap_err();
    assert!(matches!(error, ParseError::UnexpectedCharacter { index: 3, .. }));
}

#[test]
fn test_ambiguous_narrow_names_excluded() {
    let parser = build(|p| {
        p.localized_month(&[TextStyle::Narrow])?;
        Ok(())
    });

    assert_eq!(parser.parse("F").unwrap().int(fields::MONTH_OF_YEAR), Some(2));
    assert_eq!(parser.parse("D").unwrap().int(fields::MONTH_OF_YEAR), Some(12));
    assert!(matches!(parser.parse("M"), Err(ParseError::Failed { index: 0, .. })));
    assert!(matches!(parser.parse("J"), Err(ParseError::Failed { index: 0, .. })));
}

#[test]
fn test_conflicting_candidates() {
    let text = ParsableText::from_candidates([("March", 3), ("M", 3), ("May", 5), ("M", 5)]);
    let order: Vec<&str> = text.iter().map(TextCandidate::text).collect();
    assert_eq!(order, ["March", "May"]);
}

#[test]
fn test_day_of_week_and_month() {
    let parser = build(|p| {
        p.localized_day_of_week(&[TextStyle::Short])?;
        p.literal(", ");
        p.localized_month(&[TextStyle::Full])?;
        p.literal(" ");
        p.day_of_month(1..=2, |n| n)?;
        Ok(())
    });

    let result = parser.parse("Wed, September 4").unwrap();
    assert_eq!(result.int(fields::DAY_OF_WEEK), Some(3));
    assert_eq!(result.int(fields::MONTH_OF_YEAR), Some(9));
    assert_eq!(result.int(fields::DAY_OF_MONTH), Some(4));
}

#[test]
fn test_am_pm_case_insensitive() {
    let parser = build(|p| {
        p.hour_of_day(1..=2, |n| n)?;
        p.literal(" ");
        p.case_insensitive(|p| {
            p.am_pm()?;
            Ok(())
        })?;
        Ok(())
    });

    let result = parser.parse("7 pm").unwrap();
    assert_eq!(result.int(fields::HOUR_OF_DAY), Some(7));
    assert_eq!(result.int(fields::AM_PM_OF_DAY), Some(1));
}

#[test]
fn test_era_names() {
    let parser = build(|p| {
        p.year_of_era(1..=4, |n| n)?;
        p.literal(" ");
        p.era(&[TextStyle::Full, TextStyle::Short])?;
        Ok(())
    });

    let result = parser.parse("44 BC").unwrap();
    assert_eq!(result.int(fields::YEAR_OF_ERA), Some(44));
    assert_eq!(result.int(fields::ERA), Some(0));

    let result = parser.parse("2024 Anno Domini").unwrap();
    assert_eq!(result.int(fields::ERA), Some(1));
}

#[test]
fn test_empty_styles_rejected() {
    let error = TemporalParser::build(|p| {
        p.localized_month(&[])?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(error, BuildError::EmptyStyles);
}

struct FrenchMonths;

impl TextProvider for FrenchMonths {
    fn text_for(&self, field: Field, value: i64, style: TextStyle, locale: &Locale) -> Option<String> {
        if field != fields::MONTH_OF_YEAR || locale.language() != "fr" {
            return None;
        }
        let name = match value {
            1 => "janvier",
            2 => "février",
            7 => "juillet",
            _ => return None,
        };
        match style {
            TextStyle::Full => Some(name.to_string()),
            _ => Some(name.chars().take(4).collect()),
        }
    }
}

#[test]
fn test_custom_provider_uses_locale() {
    let parser = build(|p| {
        p.localized_text_with(
            fields::MONTH_OF_YEAR,
            &[TextStyle::Full, TextStyle::Short],
            Arc::new(FrenchMonths),
        )?;
        Ok(())
    });
    let french = ParseSettings::new().with_locale(Locale::new("fr-FR"));

    assert_eq!(
        parser.parse_with("février", &french).unwrap().int(fields::MONTH_OF_YEAR),
        Some(2)
    );
    assert_eq!(
        parser.parse_with("juil", &french).unwrap().int(fields::MONTH_OF_YEAR),
        Some(7)
    );
    assert!(parser.parse("février").is_err());
}

// ============================================================================
// Localized Offset Tests
// ============================================================================

#[test]
fn test_short_gmt_offset() {
    let parser = build(|p| {
        p.localized_offset(false);
        Ok(())
    });

    let result = parser.parse("GMT+5").unwrap();
    assert_eq!(result.int(fields::UTC_OFFSET_SIGN), Some(1));
    assert_eq!(result.int(fields::UTC_OFFSET_HOURS), Some(5));

    let result = parser.parse("GMT-09:30").unwrap();
    assert_eq!(result.int(fields::UTC_OFFSET_SIGN), Some(-1));
    assert_eq!(result.int(fields::UTC_OFFSET_HOURS), Some(9));
    assert_eq!(result.int(fields::UTC_OFFSET_MINUTES), Some(30));
}

#[test]
fn test_long_gmt_offset() {
    let parser = build(|p| {
        p.localized_offset(true);
        Ok(())
    });

    let result = parser.parse("GMT+05:45").unwrap();
    assert_eq!(result.int(fields::UTC_OFFSET_HOURS), Some(5));
    assert_eq!(result.int(fields::UTC_OFFSET_MINUTES), Some(45));

    // Falls back to bare "GMT", leaving the short form unconsumed
    let error = parser.parse("GMT+5").unwrap_err();
    assert!(matches!(error, ParseError::UnexpectedCharacter { index: 3, .. }));
}

#[test]
fn test_bare_gmt_is_zero() {
    let parser = build(|p| {
        p.localized_offset(false);
        Ok(())
    });

    let result = parser.parse("GMT").unwrap();
    assert_eq!(result.int(fields::UTC_OFFSET_TOTAL_SECONDS), Some(0));
    assert!(parser.parse("UTC").is_err());
}

// ============================================================================
// Time Zone Name Tests
// ============================================================================

fn zones() -> Arc<dyn TimeZoneNameProvider> {
    let table = ZoneNameTable::new()
        .with_zone(
            "America/New_York",
            [
                (TimeZoneNameStyle::LongStandard, "Eastern Standard Time"),
                (TimeZoneNameStyle::ShortStandard, "EST"),
            ],
        )
        .with_zone(
            "America/Detroit",
            [
                (TimeZoneNameStyle::LongStandard, "Eastern Standard Time"),
                (TimeZoneNameStyle::ShortStandard, "EST"),
            ],
        )
        .with_zone(
            "Europe/Paris",
            [
                (TimeZoneNameStyle::LongStandard, "Central European Standard Time"),
                (TimeZoneNameStyle::ShortStandard, "CET"),
            ],
        );
    Arc::new(table)
}

fn zone_parser(disambiguation: Disambiguation) -> TemporalParser {
    build(|p| {
        p.time_zone_name(zones(), |z| z.disambiguate(disambiguation))?;
        Ok(())
    })
}

#[test]
fn test_zone_by_region_id() {
    let result = zone_parser(Disambiguation::RaiseError)
        .parse("Europe/Paris")
        .unwrap();
    assert_eq!(result.text(fields::TIME_ZONE_ID), Some("Europe/Paris"));
}

#[test]
fn test_unique_zone_name() {
    let parser = zone_parser(Disambiguation::RaiseError);
    assert_eq!(
        parser.parse("CET").unwrap().text(fields::TIME_ZONE_ID),
        Some("Europe/Paris")
    );
    assert_eq!(
        parser
            .parse("Central European Standard Time")
            .unwrap()
            .text(fields::TIME_ZONE_ID),
        Some("Europe/Paris")
    );
}

#[test]
fn test_ambiguous_zone_raise_error() {
    let error = zone_parser(Disambiguation::RaiseError).parse("EST").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 0, .. }));
}

#[test]
fn test_ambiguous_zone_pick_first() {
    let result = zone_parser(Disambiguation::PickFirst).parse("EST").unwrap();
    assert_eq!(result.text(fields::TIME_ZONE_ID), Some("America/Detroit"));
}

#[test]
fn test_ambiguous_zone_custom_resolver() {
    let parser = zone_parser(Disambiguation::custom(|_, name, ids| {
        assert_eq!(name, "Eastern Standard Time");
        ids.iter().find(|id| id.ends_with("New_York")).cloned()
    }));

    let result = parser.parse("Eastern Standard Time").unwrap();
    assert_eq!(result.text(fields::TIME_ZONE_ID), Some("America/New_York"));
}

#[test]
fn test_resolver_declining_is_a_mismatch() {
    let parser = zone_parser(Disambiguation::custom(|_, _, _| None));
    assert!(parser.parse("EST").is_err());
    assert!(parser.parse("CET").is_ok());
}

#[test]
fn test_zone_falls_back_to_gmt_offset() {
    let result = zone_parser(Disambiguation::RaiseError).parse("GMT+3").unwrap();
    assert_eq!(result.int(fields::UTC_OFFSET_SIGN), Some(1));
    assert_eq!(result.int(fields::UTC_OFFSET_HOURS), Some(3));
    assert!(!result.contains(fields::TIME_ZONE_ID));
}

#[test]
fn test_zone_styles_restrict_names() {
    let parser = build(|p| {
        p.time_zone_name(zones(), |z| {
            z.styles(&[TimeZoneNameStyle::ShortStandard])
                .disambiguate(Disambiguation::PickFirst)
        })?;
        Ok(())
    });

    assert!(parser.parse("CET").is_ok());
    assert!(parser.parse("Central European Standard Time").is_err());
}

#[test]
fn test_zone_name_after_time() {
    let parser = build(|p| {
        p.hour_of_day(2..=2, |n| n)?;
        p.literal(":");
        p.minute_of_hour(2..=2, |n| n)?;
        p.literal(" ");
        p.time_zone_name(zones(), |z| z.disambiguate(Disambiguation::PickFirst))?;
        Ok(())
    });

    let result = parser.parse("09:30 CET").unwrap();
    assert_eq!(result.int(fields::MINUTE_OF_HOUR), Some(30));
    assert_eq!(result.text(fields::TIME_ZONE_ID), Some("Europe/Paris"));
}
