//! Chronoparse - Backtracking Date-Time Parsing Combinators
//!
//! Chronoparse turns date-time text into field values. A grammar is built once
//! from small combinators and then shared freely between threads. It provides:
//! - Literal, sign, whole number, decimal and fraction primitives
//! - Free-form and localized text, GMT offsets and time zone names
//! - Sequence, optional, ordered alternation and case-sensitivity scopes
//! - Grouped grammars that yield one result per group (intervals)
//! - Predefined ISO-8601 grammars
//!
//! Parsing yields a [`ParseResult`], a bag of [`Field`] values. Turning those
//! into concrete dates is up to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use chronoparse::{fields, iso};
//!
//! let result = iso::date_time().parse("2024-02-29T13:45:30.25").unwrap();
//! assert_eq!(result.int(fields::YEAR), Some(2024));
//! assert_eq!(result.int(fields::SECOND_OF_MINUTE), Some(30));
//! assert_eq!(result.int(fields::NANOSECOND_OF_SECOND), Some(250_000_000));
//! ```
//!
//! ## Building a Grammar
//!
//! ```rust
//! use chronoparse::{fields, TemporalParser, TextStyle};
//!
//! let parser = TemporalParser::build(|p| {
//!     p.localized_month(&[TextStyle::Full, TextStyle::Short])?;
//!     p.literal(" ");
//!     p.day_of_month(1..=2, |n| n)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let result = parser.parse("September 4").unwrap();
//! assert_eq!(result.int(fields::MONTH_OF_YEAR), Some(9));
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Parse batches on rayon's thread pool

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

mod macros;

// Prelude module for convenient imports
pub mod prelude;

pub mod engine;
pub mod iso;

/// Re-export commonly used types for convenience
pub use engine::{
    fields, parse_batch, parse_batch_parallel, BuildError, BuildResult, Disambiguation, Field,
    FieldKind, FieldValue, GroupedParser, Locale, NumberStyle, ParseError, ParseOutcome,
    ParseResult, ParseSettings, ParserBuilder, SignStyle, TemporalParser, TextProvider,
    TextStyle, TimeZoneNameProvider, TimeZoneNameStyle,
};
