//! All kinds of errors in this crate.

use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// B0 rules are not supported on an infinite plane.
    B0Error,
    /// Invalid character {ch:?} in pattern at line {line}, column {column}.
    PatternCharError {
        /// The offending character.
        ch: char,
        /// 1-indexed line.
        line: usize,
        /// 1-indexed column.
        column: usize,
    },
    /// Pattern does not fit in the coordinate range.
    PatternSizeError,
    /// Soup density must be between 0 and 1, got {0}.
    DensityError(f64),
}
