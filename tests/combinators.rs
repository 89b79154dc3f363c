//! Integration tests for the combinator engine
//!
//! These tests cover the building blocks of every grammar:
//! - Literals and case sensitivity
//! - Signs and sign styles
//! - Whole numbers, decimals and fractions
//! - Optional blocks and ordered alternation
//! - Error positions reported by the entry point

use chronoparse::engine::{CharAction, Node};
use chronoparse::{
    fields, BuildError, Field, FieldKind, NumberStyle, ParseError, ParseSettings, SignStyle,
    TemporalParser,
};

fn build<F>(f: F) -> TemporalParser
where
    F: FnOnce(&mut chronoparse::ParserBuilder) -> chronoparse::BuildResult<()>,
{
    TemporalParser::build(f).expect("grammar should build")
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_build_nothing_is_empty() {
    let parser = build(|_| Ok(()));
    assert!(parser.is_empty());
    assert!(parser.ptr_eq(&TemporalParser::empty()));
}

#[test]
fn test_build_one_is_unwrapped() {
    let parser = build(|p| {
        p.literal("abc");
        Ok(())
    });
    assert!(matches!(parser.node(), Node::StringLiteral(_)));
}

#[test]
fn test_build_many_is_sequence() {
    let parser = build(|p| {
        p.literal("a").literal("b");
        Ok(())
    });
    match parser.node() {
        Node::Sequence(sequence) => assert_eq!(sequence.children().len(), 2),
        other => panic!("expected a sequence, got {other:?}"),
    }
}

#[test]
fn test_any_of_needs_two_branches() {
    let error = TemporalParser::build(|p| {
        p.any_of(Vec::new())?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(error, BuildError::TooFewAlternatives { count: 0 });

    let error = TemporalParser::build(|p| {
        p.any_of_with(|alt| {
            alt.branch(|p| {
                p.literal("x");
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(error, BuildError::TooFewAlternatives { count: 1 });
}

#[test]
fn test_construction_is_repeatable() {
    let make = || {
        build(|p| {
            p.month_number(1..=2, |n| n)?;
            p.optional(|p| {
                p.literal("/");
                p.year(4..=4, |n| n)?;
                Ok(())
            })?;
            Ok(())
        })
    };
    let (first, second) = (make(), make());

    for input in ["1", "12", "12/2020", "123", "12/", "12/20", "", "x"] {
        assert_eq!(first.parse(input), second.parse(input), "input {input:?}");
    }
}

// ============================================================================
// Optional Tests
// ============================================================================

fn month_then_optional_year() -> TemporalParser {
    build(|p| {
        p.whole_number(1..=2, |n| n.associate_with(fields::MONTH_OF_YEAR))?;
        p.optional(|p| {
            p.literal("/");
            p.whole_number(4..=4, |n| n.associate_with(fields::YEAR))?;
            Ok(())
        })?;
        Ok(())
    })
}

#[test]
fn test_optional_absent() {
    let result = month_then_optional_year().parse("13").unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.int(fields::MONTH_OF_YEAR), Some(13));
}

#[test]
fn test_optional_present() {
    let result = month_then_optional_year().parse("13/2012").unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.int(fields::MONTH_OF_YEAR), Some(13));
    assert_eq!(result.int(fields::YEAR), Some(2012));
}

#[test]
fn test_optional_rolls_back_partial_writes() {
    let parser = build(|p| {
        p.optional(|p| {
            p.whole_number(2..=2, |n| n.associate_with(fields::HOUR_OF_DAY))?;
            p.literal("h");
            Ok(())
        })?;
        p.whole_number(2..=2, |n| n.associate_with(fields::MINUTE_OF_HOUR))?;
        Ok(())
    });

    let result = parser.parse("45").unwrap();
    assert_eq!(result.int(fields::MINUTE_OF_HOUR), Some(45));
    assert!(!result.contains(fields::HOUR_OF_DAY));
}

#[test]
fn test_optional_failure_leaves_position() {
    // The optional block fails after "/", so "/20" is left for the entry point
    let error = month_then_optional_year().parse("12/20").unwrap_err();
    assert!(matches!(error, ParseError::UnexpectedCharacter { index: 2, .. }));
}

// ============================================================================
// Alternation Tests
// ============================================================================

#[test]
fn test_any_of_first_success_wins() {
    let parser = build(|p| {
        p.any_of_with(|alt| {
            alt.branch(|p| {
                p.literal_with("ab", |l| l.associate_with(fields::IS_FAR_PAST));
                Ok(())
            })?;
            alt.branch(|p| {
                p.literal_with("a", |l| l.associate_with(fields::IS_FAR_FUTURE));
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    });

    let result = parser.parse("ab").unwrap();
    assert_eq!(result.bool(fields::IS_FAR_PAST), Some(true));
    assert!(!result.contains(fields::IS_FAR_FUTURE));

    let result = parser.parse("a").unwrap();
    assert_eq!(result.bool(fields::IS_FAR_FUTURE), Some(true));
}

#[test]
fn test_any_of_restores_between_branches() {
    let parser = build(|p| {
        p.any_of_with(|alt| {
            alt.branch(|p| {
                p.year(4..=4, |n| n)?;
                p.literal("-");
                p.month_number(2..=2, |n| n)?;
                Ok(())
            })?;
            alt.branch(|p| {
                p.day_of_year(4..=4, |n| n)?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    });

    let result = parser.parse("2024").unwrap();
    assert_eq!(result.int(fields::DAY_OF_YEAR), Some(2024));
    assert!(!result.contains(fields::YEAR));
}

#[test]
fn test_any_of_fails_at_start() {
    let parser = build(|p| {
        p.literal("x");
        p.any_of_with(|alt| {
            alt.branch(|p| {
                p.literal("abc");
                Ok(())
            })?;
            alt.branch(|p| {
                p.literal("abd");
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    });

    let error = parser.parse("xabe").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 1, .. }));
}

// ============================================================================
// Case Sensitivity Tests
// ============================================================================

fn nested_case_scopes() -> TemporalParser {
    build(|p| {
        p.case_insensitive(|p| {
            p.literal("T");
            p.case_sensitive(|p| {
                p.literal("T");
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
}

#[test]
fn test_case_scopes_nest() {
    let parser = nested_case_scopes();
    assert!(parser.parse("tT").is_ok());
    assert!(parser.parse("TT").is_ok());

    let error = parser.parse("tt").unwrap_err();
    assert_eq!(error.index(), 1);
}

#[test]
fn test_case_scope_restored_after_failure() {
    let parser = build(|p| {
        p.optional(|p| {
            p.case_insensitive(|p| {
                p.literal("ab");
                Ok(())
            })?;
            Ok(())
        })?;
        p.literal("Z");
        Ok(())
    });

    assert!(parser.parse("ABZ").is_ok());
    assert!(parser.parse("Z").is_ok());
    assert_eq!(parser.parse("z").unwrap_err().index(), 0);
}

#[test]
fn test_settings_case_insensitive() {
    let parser = build(|p| {
        p.literal("PT");
        Ok(())
    });
    let settings = ParseSettings::new().with_case_sensitive(false);

    assert!(parser.parse("pt").is_err());
    assert!(parser.parse_with("pt", &settings).is_ok());
}

// ============================================================================
// Sign Tests
// ============================================================================

fn one_digit(sign_style: SignStyle) -> TemporalParser {
    build(|p| {
        p.whole_number(1..=1, |n| {
            n.enforce_sign_style(sign_style)
                .associate_with(fields::DAY_OF_MONTH)
        })?;
        Ok(())
    })
}

#[test]
fn test_sign_style_always() {
    let parser = one_digit(SignStyle::Always);
    assert!(parser.parse("9").is_err());
    assert_eq!(parser.parse("+9").unwrap().int(fields::DAY_OF_MONTH), Some(9));
    assert_eq!(parser.parse("-9").unwrap().int(fields::DAY_OF_MONTH), Some(-9));
}

#[test]
fn test_sign_style_never() {
    let parser = one_digit(SignStyle::Never);
    assert!(parser.parse("+9").is_err());
    assert!(parser.parse("-9").is_err());
    assert_eq!(parser.parse("9").unwrap().int(fields::DAY_OF_MONTH), Some(9));
}

#[test]
fn test_sign_style_negative_only() {
    let parser = one_digit(SignStyle::NegativeOnly);
    assert!(parser.parse("+9").is_err());
    assert_eq!(parser.parse("-9").unwrap().int(fields::DAY_OF_MONTH), Some(-9));
    assert_eq!(parser.parse("9").unwrap().int(fields::DAY_OF_MONTH), Some(9));
}

#[test]
fn test_unicode_minus_sign() {
    let parser = build(|p| {
        p.utc_offset_sign();
        p.utc_offset_hours(2..=2, |n| n)?;
        Ok(())
    });

    let result = parser.parse("\u{2212}05").unwrap();
    assert_eq!(result.int(fields::UTC_OFFSET_SIGN), Some(-1));
    assert_eq!(result.int(fields::UTC_OFFSET_HOURS), Some(5));
}

#[test]
fn test_sign_node_requires_a_sign() {
    let parser = build(|p| {
        p.sign(|s| s.associate_with(fields::DURATION_SIGN));
        p.literal("P");
        Ok(())
    });
    assert_eq!(parser.parse("-P").unwrap().int(fields::DURATION_SIGN), Some(-1));
    assert_eq!(parser.parse("P").unwrap_err().index(), 0);
}

// ============================================================================
// Number Tests
// ============================================================================

#[test]
fn test_trailing_input_rejected() {
    let parser = build(|p| {
        p.whole_number(1..=1, |n| n)?;
        Ok(())
    });

    let error = parser.parse("1 ").unwrap_err();
    assert!(matches!(error, ParseError::UnexpectedCharacter { index: 1, .. }));
    assert_eq!(error.to_string(), "Unexpected character at index 1");
}

#[test]
fn test_variable_number_too_long_fails_at_max() {
    let parser = build(|p| {
        p.whole_number(1..=3, |n| n)?;
        p.whole_number(1..=3, |n| n)?;
        Ok(())
    });

    let error = parser.parse("12345").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 3, .. }));
}

#[test]
fn test_variable_number_too_short_fails_after_digits() {
    let parser = build(|p| {
        p.literal("Y");
        p.whole_number(3..=5, |n| n)?;
        Ok(())
    });

    let error = parser.parse("Y12").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 3, .. }));
}

#[test]
fn test_fixed_number_reads_exact_width() {
    let parser = build(|p| {
        p.year(4..=4, |n| n)?;
        p.month_number(2..=2, |n| n)?;
        Ok(())
    });

    let result = parser.parse("202402").unwrap();
    assert_eq!(result.int(fields::YEAR), Some(2024));
    assert_eq!(result.int(fields::MONTH_OF_YEAR), Some(2));
}

#[test]
fn test_max_width_number() {
    let parser = build(|p| {
        p.whole_number(1..=19, |n| n.associate_with(fields::DURATION_SECONDS))?;
        Ok(())
    });

    let result = parser.parse("9223372036854775807").unwrap();
    assert_eq!(result.int(fields::DURATION_SECONDS), Some(i64::MAX));

    let result = parser.parse("-9223372036854775807").unwrap();
    assert_eq!(result.int(fields::DURATION_SECONDS), Some(-i64::MAX));
}

#[test]
fn test_overflow_is_fatal() {
    let parser = build(|p| {
        p.optional(|p| {
            p.whole_number(1..=19, |n| n.associate_with(fields::DURATION_SECONDS))?;
            Ok(())
        })?;
        p.literal_char('S');
        Ok(())
    });

    let error = parser.parse("9999999999999999999S").unwrap_err();
    match &error {
        ParseError::Overflow { index, cause, .. } => {
            assert_eq!(*index, 0);
            assert_eq!(cause.position, 0);
        }
        other => panic!("expected overflow, got {other:?}"),
    }
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_locale_digits() {
    let arabic = NumberStyle::new('\u{0660}', vec!['+'], vec!['-'], vec!['\u{066B}']).unwrap();
    let settings = ParseSettings::new().with_number_style(arabic);
    let parser = build(|p| {
        p.fractional_second_of_minute(2..=2, |d| d)?;
        Ok(())
    });

    let result = parser
        .parse_with("\u{0664}\u{0665}\u{066B}\u{0661}", &settings)
        .unwrap();
    assert_eq!(result.int(fields::SECOND_OF_MINUTE), Some(45));
    assert_eq!(result.int(fields::NANOSECOND_OF_SECOND), Some(100_000_000));
}

// ============================================================================
// Decimal and Fraction Tests
// ============================================================================

fn seconds() -> TemporalParser {
    build(|p| {
        p.decimal_number(1..=19, 0..=9, 9, |d| {
            d.associate_with(fields::DURATION_SECONDS, fields::DURATION_NANOSECONDS)
        })?;
        Ok(())
    })
}

#[test]
fn test_decimal_fraction_scaled() {
    let result = seconds().parse("0.1").unwrap();
    assert_eq!(result.int(fields::DURATION_SECONDS), Some(0));
    assert_eq!(result.int(fields::DURATION_NANOSECONDS), Some(100_000_000));
}

#[test]
fn test_decimal_sign_applies_to_both_parts() {
    let result = seconds().parse("-5.000000001").unwrap();
    assert_eq!(result.int(fields::DURATION_SECONDS), Some(-5));
    assert_eq!(result.int(fields::DURATION_NANOSECONDS), Some(-1));
}

#[test]
fn test_decimal_comma_separator() {
    let result = seconds().parse("12,5").unwrap();
    assert_eq!(result.int(fields::DURATION_SECONDS), Some(12));
    assert_eq!(result.int(fields::DURATION_NANOSECONDS), Some(500_000_000));
}

#[test]
fn test_decimal_without_fraction() {
    let result = seconds().parse("30").unwrap();
    assert_eq!(result.int(fields::DURATION_SECONDS), Some(30));
    assert_eq!(result.int(fields::DURATION_NANOSECONDS), Some(0));
}

#[test]
fn test_decimal_separator_cannot_end_input() {
    let error = seconds().parse("12.").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 3, .. }));

    let parser = build(|p| {
        p.decimal_number(1..=19, 0..=9, 9, |d| d)?;
        p.literal("S");
        Ok(())
    });
    assert!(parser.parse("1.S").is_ok());
}

#[test]
fn test_decimal_custom_scale() {
    let parser = build(|p| {
        p.decimal_number(1..=3, 1..=2, 2, |d| {
            d.associate_with(fields::DURATION_SECONDS, fields::DURATION_NANOSECONDS)
        })?;
        Ok(())
    });

    let result = parser.parse("1.5").unwrap();
    assert_eq!(result.int(fields::DURATION_NANOSECONDS), Some(50));

    let error = parser.parse("1").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 1, .. }));

    let error = parser.parse("1.").unwrap_err();
    assert!(matches!(error, ParseError::Failed { index: 1, .. }));
}

#[test]
fn test_decimal_with_nothing() {
    let parser = build(|p| {
        p.decimal_number(0..=2, 0..=9, 9, |d| d)?;
        p.literal("S");
        Ok(())
    });

    assert!(parser.parse(".5S").is_ok());
    assert!(parser.parse("S").is_err());
    assert!(parser.parse(".S").is_err());
}

#[test]
fn test_decimal_invalid_scale() {
    let error = TemporalParser::build(|p| {
        p.decimal_number(1..=2, 0..=9, 6, |d| d)?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(
        error,
        BuildError::InvalidScale {
            scale: 6,
            max_length: 9
        }
    );
}

#[test]
fn test_fraction() {
    let parser = build(|p| {
        p.literal(".");
        p.fraction(1..=9, 9, |f| f.associate_with(fields::NANOSECOND_OF_SECOND))?;
        Ok(())
    });

    assert_eq!(
        parser.parse(".25").unwrap().int(fields::NANOSECOND_OF_SECOND),
        Some(250_000_000)
    );
    assert_eq!(
        parser.parse(".123456789").unwrap().int(fields::NANOSECOND_OF_SECOND),
        Some(123_456_789)
    );
    assert!(matches!(
        parser.parse(".1234567890").unwrap_err(),
        ParseError::Failed { index: 10, .. }
    ));
}

// ============================================================================
// Free-form Text Tests
// ============================================================================

#[test]
fn test_text_run() {
    let word = Field::custom("Word", FieldKind::Text);
    let parser = build(|p| {
        p.text(1..=5, |t| {
            t.on_each_char(|_, ch, _| {
                if ch.is_alphabetic() {
                    CharAction::AcceptAndContinue
                } else {
                    CharAction::RejectAndStop
                }
            })
            .associate_with(word)
        })?;
        p.literal("!");
        Ok(())
    });

    assert_eq!(parser.parse("hello!").unwrap().text(word), Some("hello"));
    assert_eq!(parser.parse("!").unwrap_err().index(), 0);
    assert_eq!(parser.parse("toolong!").unwrap_err().index(), 0);
}

#[test]
fn test_text_predicate_sees_index() {
    let code = Field::custom("Code", FieldKind::Text);
    let parser = build(|p| {
        p.text(0..=10, |t| {
            t.on_each_char(|_, _, index| {
                if index < 2 {
                    CharAction::AcceptAndContinue
                } else {
                    CharAction::RejectAndStop
                }
            })
            .associate_with(code)
        })?;
        p.literal("-x");
        Ok(())
    });

    assert_eq!(parser.parse("ab-x").unwrap().text(code), Some("ab"));
}

// ============================================================================
// Callback Tests
// ============================================================================

#[test]
fn test_callbacks_run_in_order() {
    let parser = build(|p| {
        p.whole_number(1..=2, |n| {
            n.on_parsed(|ctx, value| ctx.result_mut().set_int(fields::HOUR_OF_DAY, value))
                .on_parsed(|ctx, value| ctx.result_mut().set_int(fields::HOUR_OF_DAY, value * 10))
        })?;
        Ok(())
    });

    assert_eq!(parser.parse("7").unwrap().int(fields::HOUR_OF_DAY), Some(70));
}

#[test]
fn test_error_formatting() {
    let error = month_then_optional_year().parse("x").unwrap_err();
    assert_eq!(error.to_string(), "Parsing failed at index 0");
    assert_eq!(error.parsed_text(), "x");
    assert!(error.format_with_source().contains('^'));
}
