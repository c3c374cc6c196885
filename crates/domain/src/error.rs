// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur while building or mutating a plan configuration.
///
/// Every variant names the offending field so the boundary layer can
/// report it without guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required numeric field is missing, non-positive or negative.
    InvalidParameter {
        /// The field that was rejected.
        field: &'static str,
        /// A human-readable description of the problem.
        reason: String,
    },
    /// A bounded field violates its bound.
    OutOfRange {
        /// The field that was rejected.
        field: &'static str,
        /// A human-readable description of the bound.
        reason: String,
    },
    /// A date pair is not a well-formed range.
    InvalidRange {
        /// The field that was rejected.
        field: &'static str,
        /// The supplied start date.
        start: Date,
        /// The supplied end date.
        end: Date,
    },
    /// A sub-period exceeds the bounds of the planning period.
    RangeNotContained {
        /// The field that was rejected.
        field: &'static str,
        /// The sub-period start date.
        start: Date,
        /// The sub-period end date.
        end: Date,
        /// The planning period start date.
        period_start: Date,
        /// The planning period end date.
        period_end: Date,
    },
    /// A field requires a companion field that is absent.
    MissingDependency {
        /// The field being assigned.
        field: &'static str,
        /// The companion field that must be set first.
        requires: &'static str,
    },
    /// The forbidden weekday set leaves no admissible check-in day.
    TooRestrictive {
        /// The field that was rejected.
        field: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { field, reason } => {
                write!(f, "Invalid parameter '{field}': {reason}")
            }
            Self::OutOfRange { field, reason } => {
                write!(f, "Parameter '{field}' is out of range: {reason}")
            }
            Self::InvalidRange { field, start, end } => {
                write!(
                    f,
                    "Parameter '{field}' is not a valid date range: {start} is after {end}"
                )
            }
            Self::RangeNotContained {
                field,
                start,
                end,
                period_start,
                period_end,
            } => {
                write!(
                    f,
                    "Parameter '{field}' ({start} to {end}) must lie within the planning period ({period_start} to {period_end})"
                )
            }
            Self::MissingDependency { field, requires } => {
                write!(f, "Parameter '{field}' requires '{requires}' to be set")
            }
            Self::TooRestrictive { field } => {
                write!(
                    f,
                    "Parameter '{field}' must leave at least one weekday open for check-in"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Returns the name of the field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidParameter { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidRange { field, .. }
            | Self::RangeNotContained { field, .. }
            | Self::MissingDependency { field, .. }
            | Self::TooRestrictive { field } => *field,
        }
    }
}
