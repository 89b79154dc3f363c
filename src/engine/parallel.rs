//! Batch parsing
//!
//! A [`TemporalParser`] is immutable and every parse gets its own context, so
//! one parser can be shared across any number of threads.
//!
//! # Feature Flag
//!
//! [`parse_batch_parallel`] spreads work over rayon's pool when the
//! `parallel` feature is enabled and runs sequentially otherwise:
//!
//! ```toml
//! [dependencies]
//! chronoparse = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chronoparse::{iso, parse_batch_parallel};
//!
//! let results = parse_batch_parallel(iso::date(), &["2024-02-29", "2024-13", "20240301"]);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! assert!(results[2].is_ok());
//! ```

use super::error::ParseOutcome;
use super::parser::TemporalParser;
use super::result::ParseResult;
use super::settings::ParseSettings;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parse each input in order on the calling thread
pub fn parse_batch(parser: &TemporalParser, inputs: &[&str]) -> Vec<ParseOutcome<ParseResult>> {
    parse_batch_with(parser, inputs, &ParseSettings::DEFAULT)
}

/// [`parse_batch`] with explicit settings
pub fn parse_batch_with(
    parser: &TemporalParser,
    inputs: &[&str],
    settings: &ParseSettings,
) -> Vec<ParseOutcome<ParseResult>> {
    inputs
        .iter()
        .map(|input| parser.parse_with(input, settings))
        .collect()
}

/// Parse multiple inputs in parallel
///
/// Results come back in the same order as `inputs`.
#[cfg(feature = "rayon")]
pub fn parse_batch_parallel(parser: &TemporalParser, inputs: &[&str]) -> Vec<ParseOutcome<ParseResult>> {
    inputs
        .par_iter()
        .map(|input| parser.parse_with(input, &ParseSettings::DEFAULT))
        .collect()
}

/// Parse multiple inputs sequentially (fallback when rayon is not available)
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_parallel(parser: &TemporalParser, inputs: &[&str]) -> Vec<ParseOutcome<ParseResult>> {
    parse_batch(parser, inputs)
}

/// Parse multiple owned inputs in parallel
#[cfg(feature = "rayon")]
pub fn parse_batch_parallel_owned(
    parser: &TemporalParser,
    inputs: Vec<String>,
) -> Vec<ParseOutcome<ParseResult>> {
    inputs
        .into_par_iter()
        .map(|input| parser.parse_with(&input, &ParseSettings::DEFAULT))
        .collect()
}

/// Parse multiple owned inputs sequentially (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_parallel_owned(
    parser: &TemporalParser,
    inputs: Vec<String>,
) -> Vec<ParseOutcome<ParseResult>> {
    inputs
        .into_iter()
        .map(|input| parser.parse_with(&input, &ParseSettings::DEFAULT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::field::fields;

    fn hour() -> TemporalParser {
        TemporalParser::build(|p| {
            p.hour_of_day(2..=2, |n| n)?;
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn test_parse_batch_with_failures() {
        let results = parse_batch(&hour(), &["08", "8", "23"]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().int(fields::HOUR_OF_DAY), Some(8));
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().int(fields::HOUR_OF_DAY), Some(23));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs: Vec<String> = (0..200).map(|n| format!("{:02}", n % 120)).collect();
        let borrowed: Vec<&str> = inputs.iter().map(String::as_str).collect();
        let parser = hour();

        let sequential = parse_batch(&parser, &borrowed);
        let parallel = parse_batch_parallel(&parser, &borrowed);
        let owned = parse_batch_parallel_owned(&parser, inputs);

        assert_eq!(sequential, parallel);
        assert_eq!(sequential, owned);
    }

    #[test]
    fn test_settings_applied() {
        let settings = ParseSettings::DEFAULT.with_case_sensitive(false);
        let parser = TemporalParser::build(|p| {
            p.literal("T");
            Ok(())
        })
        .unwrap();

        let results = parse_batch_with(&parser, &["t", "T"], &settings);
        assert!(results.iter().all(Result::is_ok));
    }
}
