//! The parsing engine
//!
//! Everything needed to describe a date-time grammar and run it.
//!
//! # Module Organization
//!
//! ## Core Types
//! - [`TemporalParser`] - Shared, immutable grammar handle
//! - [`Node`] - One unit of grammar
//! - [`ParseContext`] - Per-parse mutable state
//! - [`ParseResult`] - Field values collected by a parse
//!
//! ## Construction
//! - [`ParserBuilder`] - Append-only grammar builder
//! - [`GroupedParserBuilder`] - Builder for multi-result grammars
//!
//! ## Localization
//! - [`TextProvider`] - Localized names for field values
//! - [`TimeZoneNameProvider`] - Localized time zone names
//!
//! ## Errors
//! - [`ParseError`] - Returned by every parse entry point
//! - [`BuildError`] - Returned when a grammar is assembled incorrectly

// ============================================================================
// Module Declarations
// ============================================================================

pub mod builder;
pub mod context;
pub mod debug;
pub mod error;
pub mod field;
pub mod grouped;
pub mod localized;
pub mod node;
pub mod parser;
pub mod primitive;
pub mod properties;
pub mod result;
pub mod settings;
pub mod structural;
pub mod text;

// Batch parsing (always available, uses rayon when feature is enabled)
pub mod parallel;

// ============================================================================
// Core Types
// ============================================================================

pub use context::ParseContext;
pub use field::{fields, Field, FieldKind};
pub use node::{decode, Attempt, CharAction, Node};
pub use parser::TemporalParser;
pub use result::{FieldValue, ParseResult};

// ============================================================================
// Construction
// ============================================================================

pub use builder::{
    Alternatives, DecimalNumberBuilder, FractionBuilder, LiteralBuilder, ParserBuilder,
    SignBuilder, TextBuilder, TimeZoneNameBuilder, WholeNumberBuilder,
};
pub use grouped::{GroupedAlternatives, GroupedChild, GroupedParser, GroupedParserBuilder};
pub use properties::MAX_TIME_ZONE_ID_LENGTH;

// ============================================================================
// Settings
// ============================================================================

pub use settings::{Locale, NumberStyle, ParseSettings, SignStyle};

// ============================================================================
// Localization
// ============================================================================

pub use localized::{Disambiguation, OffsetFormat, Resolver};
pub use text::{
    EnglishTextProvider, ParsableText, TextCandidate, TextProvider, TextStyle,
    TimeZoneNameProvider, TimeZoneNameStyle, ZoneNameCandidate, ZoneNameTable, ZoneNames,
};

// ============================================================================
// Errors and diagnostics
// ============================================================================

pub use debug::TreePrinter;
pub use error::{BuildError, BuildResult, NumberOverflow, ParseError, ParseOutcome};

// ============================================================================
// Batch parsing
// ============================================================================

pub use parallel::{parse_batch, parse_batch_parallel, parse_batch_parallel_owned, parse_batch_with};
