//! Predefined ISO-8601 grammars
//!
//! Every grammar is built on first use and shared from then on. The
//! functions at the top level accept both the basic (`20240229T1345`) and
//! extended (`2024-02-29T13:45`) formats; [`basic`] and [`extended`] accept
//! only one.
//!
//! ```rust
//! use chronoparse::{fields, iso};
//!
//! let basic = iso::date().parse("20240229").unwrap();
//! let extended = iso::date().parse("2024-02-29").unwrap();
//! assert_eq!(basic, extended);
//!
//! let ordinal = iso::date().parse("2024-060").unwrap();
//! assert_eq!(ordinal.int(fields::DAY_OF_YEAR), Some(60));
//! ```
//!
//! Intervals are grouped grammars. Either end may be `..` to mark it open:
//!
//! ```rust
//! use chronoparse::{fields, iso};
//!
//! let ends = iso::date_range().parse("2024-01-01/..").unwrap();
//! assert_eq!(ends[0].int(fields::YEAR), Some(2024));
//! assert_eq!(ends[1].bool(fields::IS_FAR_FUTURE), Some(true));
//! ```

use crate::engine::{
    fields, BuildResult, GroupedParser, GroupedParserBuilder, ParserBuilder, SignStyle,
    TemporalParser, WholeNumberBuilder,
};
use std::sync::OnceLock;

fn grammar<F>(f: F) -> TemporalParser
where
    F: FnOnce(&mut ParserBuilder) -> BuildResult<()>,
{
    TemporalParser::build(f).expect("predefined ISO grammar must be well formed")
}

fn grouped_grammar<F>(f: F) -> GroupedParser
where
    F: FnOnce(&mut GroupedParserBuilder) -> BuildResult<()>,
{
    GroupedParser::build(f).expect("predefined ISO interval grammar must be well formed")
}

fn unsigned(n: WholeNumberBuilder) -> WholeNumberBuilder {
    n.enforce_sign_style(SignStyle::Never)
}

macro_rules! shared {
    ($(#[$doc:meta])* $name:ident => $init:expr) => {
        $(#[$doc])*
        pub fn $name() -> &'static TemporalParser {
            static PARSER: OnceLock<TemporalParser> = OnceLock::new();
            PARSER.get_or_init(|| $init)
        }
    };
}

macro_rules! shared_grouped {
    ($(#[$doc:meta])* $name:ident => $init:expr) => {
        $(#[$doc])*
        pub fn $name() -> &'static GroupedParser {
            static PARSER: OnceLock<GroupedParser> = OnceLock::new();
            PARSER.get_or_init(|| $init)
        }
    };
}

/// `start/end`, where either end may be `..`
fn bounded_interval(element: &TemporalParser) -> GroupedParser {
    grouped_grammar(|g| {
        g.group(|p| {
            p.any_of_with(|alt| {
                alt.branch(|p| {
                    p.unbounded_designator(fields::IS_FAR_PAST);
                    Ok(())
                })?;
                alt.parser(element);
                Ok(())
            })?;
            Ok(())
        })?;
        g.literal("/");
        g.group(|p| {
            p.any_of_with(|alt| {
                alt.branch(|p| {
                    p.unbounded_designator(fields::IS_FAR_FUTURE);
                    Ok(())
                })?;
                alt.parser(element);
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
}

/// An interval of any one of `elements`; empty text yields two empty results
///
/// The empty fallback comes last so it can't shadow a later format.
fn interval(elements: &[&TemporalParser]) -> GroupedParser {
    let mut branches: Vec<GroupedParser> = elements.iter().map(|element| bounded_interval(element)).collect();
    branches.push(grouped_grammar(|g| {
        g.groups(2);
        Ok(())
    }));

    grouped_grammar(|g| {
        g.any_of(branches)?;
        Ok(())
    })
}

fn either(basic: &TemporalParser, extended: &TemporalParser) -> TemporalParser {
    grammar(|p| {
        p.any_of([basic.clone(), extended.clone()])?;
        Ok(())
    })
}

/// Date and time separator: `T` or a space
fn date_time_separator(p: &mut ParserBuilder) -> BuildResult<()> {
    p.any_of_with(|alt| {
        alt.branch(|p| {
            p.literal("T");
            Ok(())
        })?;
        alt.branch(|p| {
            p.literal(" ");
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

/// Bracketed region id after a zoned date-time
fn zone_suffix(p: &mut ParserBuilder) -> BuildResult<()> {
    p.optional(|p| {
        p.literal("[");
        p.time_zone_id()?;
        p.literal("]");
        Ok(())
    })?;
    Ok(())
}

// ============================================================================
// Basic format
// ============================================================================

/// ISO-8601 basic format, without separators
pub mod basic {
    use super::*;

    shared!(
        /// `yyyyMMdd`
        calendar_date => grammar(|p| {
            p.year(4..=4, unsigned)?;
            p.month_number(2..=2, unsigned)?;
            p.day_of_month(2..=2, unsigned)?;
            Ok(())
        })
    );

    shared!(
        /// `yyyyDDD`
        ordinal_date => grammar(|p| {
            p.year(4..=4, unsigned)?;
            p.day_of_year(3..=3, unsigned)?;
            Ok(())
        })
    );

    shared!(date => either(calendar_date(), ordinal_date()));

    shared!(
        /// `HH[mm[ss[.fffffffff]]]`
        time => grammar(|p| {
            p.hour_of_day(2..=2, unsigned)?;
            p.optional(|p| {
                p.minute_of_hour(2..=2, unsigned)?;
                p.optional(|p| {
                    p.fractional_second_of_minute(2..=2, |d| d.enforce_sign_style(SignStyle::Never))?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
    );

    shared!(
        /// `Z` or `±HH[mm[ss]]`
        utc_offset => grammar(|p| {
            p.any_of_with(|alt| {
                alt.branch(|p| {
                    p.utc_designator();
                    Ok(())
                })?;
                alt.branch(|p| {
                    p.utc_offset_sign();
                    p.utc_offset_hours(2..=2, unsigned)?;
                    p.optional(|p| {
                        p.utc_offset_minutes(2..=2, unsigned)?;
                        p.optional(|p| {
                            p.utc_offset_seconds(2..=2, unsigned)?;
                            Ok(())
                        })?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
    );

    shared!(date_time => grammar(|p| {
        p.use_parser(calendar_date());
        date_time_separator(p)?;
        p.use_parser(time());
        Ok(())
    }));

    shared!(offset_time => grammar(|p| {
        p.use_parser(time()).use_parser(utc_offset());
        Ok(())
    }));

    shared!(offset_date_time => grammar(|p| {
        p.use_parser(date_time()).use_parser(utc_offset());
        Ok(())
    }));

    shared!(zoned_date_time => grammar(|p| {
        p.use_parser(date_time()).use_parser(utc_offset());
        zone_suffix(p)
    }));

    shared!(instant => grammar(|p| {
        p.use_parser(date_time()).utc_designator();
        Ok(())
    }));

    shared_grouped!(date_range => interval(&[calendar_date()]));
    shared_grouped!(date_time_interval => interval(&[date_time()]));
    shared_grouped!(offset_date_time_interval => interval(&[offset_date_time()]));
    shared_grouped!(zoned_date_time_interval => interval(&[zoned_date_time()]));
    shared_grouped!(instant_interval => interval(&[instant()]));
}

// ============================================================================
// Extended format
// ============================================================================

/// ISO-8601 extended format, with `-` and `:` separators
pub mod extended {
    use super::*;

    shared!(
        /// `yyyy-MM-dd`
        calendar_date => grammar(|p| {
            p.year(4..=4, unsigned)?;
            p.literal("-");
            p.month_number(2..=2, unsigned)?;
            p.literal("-");
            p.day_of_month(2..=2, unsigned)?;
            Ok(())
        })
    );

    shared!(
        /// `yyyy-DDD`
        ordinal_date => grammar(|p| {
            p.year(4..=4, unsigned)?;
            p.literal("-");
            p.day_of_year(3..=3, unsigned)?;
            Ok(())
        })
    );

    shared!(date => either(calendar_date(), ordinal_date()));

    shared!(
        /// `HH[:mm[:ss[.fffffffff]]]`
        time => grammar(|p| {
            p.hour_of_day(2..=2, unsigned)?;
            p.optional(|p| {
                p.literal(":");
                p.minute_of_hour(2..=2, unsigned)?;
                p.optional(|p| {
                    p.literal(":");
                    p.fractional_second_of_minute(2..=2, |d| d.enforce_sign_style(SignStyle::Never))?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
    );

    shared!(
        /// `Z` or `±HH[:mm[:ss]]`
        utc_offset => grammar(|p| {
            p.any_of_with(|alt| {
                alt.branch(|p| {
                    p.utc_designator();
                    Ok(())
                })?;
                alt.branch(|p| {
                    p.utc_offset_sign();
                    p.utc_offset_hours(2..=2, unsigned)?;
                    p.optional(|p| {
                        p.literal(":");
                        p.utc_offset_minutes(2..=2, unsigned)?;
                        p.optional(|p| {
                            p.literal(":");
                            p.utc_offset_seconds(2..=2, unsigned)?;
                            Ok(())
                        })?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
    );

    shared!(date_time => grammar(|p| {
        p.use_parser(calendar_date());
        date_time_separator(p)?;
        p.use_parser(time());
        Ok(())
    }));

    shared!(offset_time => grammar(|p| {
        p.use_parser(time()).use_parser(utc_offset());
        Ok(())
    }));

    shared!(offset_date_time => grammar(|p| {
        p.use_parser(date_time()).use_parser(utc_offset());
        Ok(())
    }));

    shared!(zoned_date_time => grammar(|p| {
        p.use_parser(date_time()).use_parser(utc_offset());
        zone_suffix(p)
    }));

    shared!(instant => grammar(|p| {
        p.use_parser(date_time()).utc_designator();
        Ok(())
    }));

    shared!(
        /// `yyyy-MM`
        year_month => grammar(|p| {
            p.year(4..=4, unsigned)?;
            p.literal("-");
            p.month_number(2..=2, unsigned)?;
            Ok(())
        })
    );

    shared_grouped!(date_range => interval(&[calendar_date()]));
    shared_grouped!(date_time_interval => interval(&[date_time()]));
    shared_grouped!(offset_date_time_interval => interval(&[offset_date_time()]));
    shared_grouped!(zoned_date_time_interval => interval(&[zoned_date_time()]));
    shared_grouped!(instant_interval => interval(&[instant()]));
}

// ============================================================================
// Either format
// ============================================================================

shared!(calendar_date => either(basic::calendar_date(), extended::calendar_date()));
shared!(ordinal_date => either(basic::ordinal_date(), extended::ordinal_date()));
shared!(
    /// Calendar or ordinal date in either format
    date => either(calendar_date(), ordinal_date())
);
shared!(
    /// `HH`, then minutes and seconds with or without `:`
    time => grammar(|p| {
        p.hour_of_day(2..=2, unsigned)?;
        p.optional(|p| {
            p.any_of_with(|alt| {
                alt.branch(|p| {
                    p.literal(":");
                    p.minute_of_hour(2..=2, unsigned)?;
                    p.optional(|p| {
                        p.literal(":");
                        p.fractional_second_of_minute(2..=2, |d| d.enforce_sign_style(SignStyle::Never))?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                alt.branch(|p| {
                    p.minute_of_hour(2..=2, unsigned)?;
                    p.optional(|p| {
                        p.fractional_second_of_minute(2..=2, |d| d.enforce_sign_style(SignStyle::Never))?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
);

shared!(
    /// `Z` or `±HH`, then minutes and seconds with or without `:`
    utc_offset => grammar(|p| {
        p.any_of_with(|alt| {
            alt.branch(|p| {
                p.utc_designator();
                Ok(())
            })?;
            alt.branch(|p| {
                p.utc_offset_sign();
                p.utc_offset_hours(2..=2, unsigned)?;
                p.optional(|p| {
                    p.any_of_with(|alt| {
                        alt.branch(|p| {
                            p.utc_offset_minutes(2..=2, unsigned)?;
                            p.optional(|p| {
                                p.utc_offset_seconds(2..=2, unsigned)?;
                                Ok(())
                            })?;
                            Ok(())
                        })?;
                        alt.branch(|p| {
                            p.literal(":");
                            p.utc_offset_minutes(2..=2, unsigned)?;
                            p.optional(|p| {
                                p.literal(":");
                                p.utc_offset_seconds(2..=2, unsigned)?;
                                Ok(())
                            })?;
                            Ok(())
                        })?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
);

shared!(date_time => either(basic::date_time(), extended::date_time()));
shared!(offset_time => either(basic::offset_time(), extended::offset_time()));
shared!(offset_date_time => either(basic::offset_date_time(), extended::offset_date_time()));
shared!(zoned_date_time => either(basic::zoned_date_time(), extended::zoned_date_time()));

shared!(
    /// Date-time ending in `Z`, such as `2001-05-10T00:24Z`
    instant => either(basic::instant(), extended::instant())
);

/// `yyyy-MM`; only the extended form exists
pub fn year_month() -> &'static TemporalParser {
    extended::year_month()
}

shared!(
    /// Four-digit year
    year => grammar(|p| {
        p.year(4..=4, unsigned)?;
        Ok(())
    })
);

shared!(
    /// `P[nY][nM][nD]`
    period => grammar(|p| {
        p.literal("P");
        p.optional(|p| {
            p.period_of_years(1..=10, |n| n)?;
            p.literal("Y");
            Ok(())
        })?;
        p.optional(|p| {
            p.period_of_months(1..=10, |n| n)?;
            p.literal("M");
            Ok(())
        })?;
        p.optional(|p| {
            p.period_of_days(1..=10, |n| n)?;
            p.literal("D");
            Ok(())
        })?;
        Ok(())
    })
);

shared!(
    /// `P[nD][T[nH][nM][n[.f]S]]`
    duration => grammar(|p| {
        p.literal("P");
        p.optional(|p| {
            p.period_of_days(1..=10, |n| n)?;
            p.literal("D");
            Ok(())
        })?;
        p.optional(|p| {
            p.literal("T");
            p.optional(|p| {
                p.duration_of_hours(1..=19, |n| n)?;
                p.literal("H");
                Ok(())
            })?;
            p.optional(|p| {
                p.duration_of_minutes(1..=19, |n| n)?;
                p.literal("M");
                Ok(())
            })?;
            p.optional(|p| {
                p.duration_of_fractional_seconds(1..=19, |d| d)?;
                p.literal("S");
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
);

shared_grouped!(date_range => interval(&[basic::calendar_date(), extended::calendar_date()]));
shared_grouped!(date_time_interval => interval(&[basic::date_time(), extended::date_time()]));
shared_grouped!(
    offset_date_time_interval => interval(&[basic::offset_date_time(), extended::offset_date_time()])
);
shared_grouped!(
    zoned_date_time_interval => interval(&[basic::zoned_date_time(), extended::zoned_date_time()])
);
shared_grouped!(instant_interval => interval(&[basic::instant(), extended::instant()]));
