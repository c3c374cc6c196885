// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules shared by the plan configuration.
//!
//! Numeric inputs arrive as raw `i64` values so that negative and oversized
//! values supplied by an external job are rejected here rather than being
//! silently wrapped.

use crate::error::DomainError;
use crate::types::DateRange;
use time::Date;

/// Validates that `value` is a positive integer that fits in a `u32`.
///
/// # Arguments
///
/// * `field` - The field name reported on failure
/// * `value` - The raw value
///
/// # Errors
///
/// Returns an error if:
/// - The value is zero or negative (`InvalidParameter`)
/// - The value exceeds `u32::MAX` (`OutOfRange`)
pub fn require_positive(field: &'static str, value: i64) -> Result<u32, DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidParameter {
            field,
            reason: format!("must be a positive integer, got {value}"),
        });
    }
    narrow(field, value)
}

/// Validates that `value` is zero or a positive integer that fits in a `u32`.
///
/// # Errors
///
/// Returns an error if:
/// - The value is negative (`InvalidParameter`)
/// - The value exceeds `u32::MAX` (`OutOfRange`)
pub fn require_non_negative(field: &'static str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::InvalidParameter {
            field,
            reason: format!("must be zero or a positive integer, got {value}"),
        });
    }
    narrow(field, value)
}

fn narrow(field: &'static str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| DomainError::OutOfRange {
        field,
        reason: format!("must not exceed {}, got {value}", u32::MAX),
    })
}

/// Validates that a date pair forms an ordered range.
///
/// # Errors
///
/// Returns `DomainError::InvalidRange` if `start` is after `end`.
pub fn validate_date_range(
    field: &'static str,
    start: Date,
    end: Date,
) -> Result<DateRange, DomainError> {
    if start > end {
        return Err(DomainError::InvalidRange { field, start, end });
    }
    Ok(DateRange::from_ordered(start, end))
}

/// Validates that `range` lies entirely within the planning `period`.
///
/// # Errors
///
/// Returns `DomainError::RangeNotContained` if any day of `range` falls
/// outside `period`.
pub fn validate_contained(
    field: &'static str,
    range: &DateRange,
    period: &DateRange,
) -> Result<(), DomainError> {
    if !period.contains_range(range) {
        return Err(DomainError::RangeNotContained {
            field,
            start: range.start(),
            end: range.end(),
            period_start: period.start(),
            period_end: period.end(),
        });
    }
    Ok(())
}
