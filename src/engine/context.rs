//! Per-call parsing state
//!
//! A [`ParseContext`] is created fresh for every parse call and threaded
//! through every node. It borrows the shared [`ParseSettings`] and owns the
//! live [`ParseResult`], which backtracking nodes swap out wholesale.

use super::result::ParseResult;
use super::settings::{Locale, NumberStyle, ParseSettings};

/// Mutable state for a single parse
#[derive(Debug)]
pub struct ParseContext<'s> {
    settings: &'s ParseSettings,
    case_sensitive: bool,
    result: ParseResult,
}

impl<'s> ParseContext<'s> {
    /// Start a parse with an empty result
    pub fn new(settings: &'s ParseSettings) -> Self {
        Self {
            settings,
            case_sensitive: settings.is_case_sensitive(),
            result: ParseResult::new(),
        }
    }

    #[inline]
    pub fn settings(&self) -> &'s ParseSettings {
        self.settings
    }

    #[inline]
    pub fn number_style(&self) -> &'s NumberStyle {
        self.settings.number_style()
    }

    #[inline]
    pub fn locale(&self) -> &'s Locale {
        self.settings.locale()
    }

    /// Case-sensitivity of the innermost enclosing scope
    #[inline]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Replace the active case-sensitivity, returning the previous value
    #[inline]
    pub(crate) fn swap_case_sensitive(&mut self, case_sensitive: bool) -> bool {
        std::mem::replace(&mut self.case_sensitive, case_sensitive)
    }

    #[inline]
    pub fn result(&self) -> &ParseResult {
        &self.result
    }

    #[inline]
    pub fn result_mut(&mut self) -> &mut ParseResult {
        &mut self.result
    }

    /// Install `result` as the live result, returning the one it replaces
    #[inline]
    pub fn replace_result(&mut self, result: ParseResult) -> ParseResult {
        std::mem::replace(&mut self.result, result)
    }

    /// Consume the context, yielding the live result
    #[inline]
    pub fn into_result(self) -> ParseResult {
        self.result
    }
}
