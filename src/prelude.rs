//! Prelude module for convenient imports
//!
//! Importing this module with a wildcard import brings the core types into scope:
//!
//! ```
//! use chronoparse::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Core Types
//! - [`TemporalParser`] - Shared, immutable grammar
//! - [`GroupedParser`] - Grammar yielding one result per group
//! - [`ParseResult`] - Field values collected by a parse
//! - [`Field`] and [`fields`] - Field identities
//!
//! ## Construction
//! - [`ParserBuilder`] - Append-only grammar builder
//! - [`SignStyle`] - Sign handling for numbers
//! - [`TextStyle`] - Width of localized text
//!
//! ## Error Handling
//! - [`ParseError`] - Returned by every parse entry point
//! - [`BuildError`] - Returned when a grammar is assembled incorrectly

// ============================================================================
// Core Types
// ============================================================================

pub use crate::engine::{fields, Field, FieldKind, FieldValue, GroupedParser, ParseResult, TemporalParser};

// ============================================================================
// Construction
// ============================================================================

pub use crate::engine::{
    CharAction, Disambiguation, GroupedParserBuilder, ParserBuilder, SignStyle, TextStyle,
    TimeZoneNameStyle,
};

// ============================================================================
// Settings
// ============================================================================

pub use crate::engine::{Locale, NumberStyle, ParseSettings};

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::engine::{BuildError, BuildResult, ParseError, ParseOutcome};

// ============================================================================
// Predefined grammars
// ============================================================================

pub use crate::iso;
