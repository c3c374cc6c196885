// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validated arrival plan configuration.
//!
//! A `PlanConfig` can only be obtained through [`PlanConfig::new`], and every
//! setter validates the new value together with the invariants that depend
//! on it before anything is assigned. A rejected mutation leaves the
//! configuration exactly as it was, so the generator never observes a
//! partially-valid configuration.
//!
//! ## Invariants
//!
//! - `bed_capacity`, `stay_days` are positive
//! - `0 < arrival_days <= stay_days`
//! - closure and reduction periods lie within the planning period
//! - a reduction period implies a reduced bed count
//! - `0 < reduced_bed_count <= bed_capacity`
//! - at least one weekday remains open for check-in
//! - `starting_voucher_number >= 1`

use crate::error::DomainError;
use crate::types::{DateRange, ForbiddenWeekdays, PlanType};
use crate::validation::{
    require_non_negative, require_positive, validate_contained, validate_date_range,
};
use serde::Serialize;
use time::Date;

/// The complete set of parameters for one arrival plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanConfig {
    /// Selects the per-day voucher formula.
    plan_type: PlanType,
    /// Total beds available absent reductions.
    bed_capacity: u32,
    /// Length of stay per voucher, in days.
    stay_days: u32,
    /// Number of admitted check-in days composing one arrival cycle.
    arrival_days: u32,
    /// The planning horizon.
    period: DateRange,
    /// Dates on which no stay may begin or be in progress.
    closure_period: Option<DateRange>,
    /// Dates during which capacity is reduced.
    reduction_period: Option<DateRange>,
    /// Beds removed from service during the reduction period.
    reduced_bed_count: Option<u32>,
    /// Gap in days inserted after the final check-in day of a cycle.
    sanitary_days: u32,
    /// Display-only spacing hint between cycles.
    min_days_between_arrivals: u32,
    /// Weekdays on which check-in never starts.
    forbidden_weekdays: ForbiddenWeekdays,
    /// First voucher number issued by this plan.
    starting_voucher_number: u64,
}

impl PlanConfig {
    /// Creates a new `PlanConfig` with no optional constraints.
    ///
    /// Optional parameters start out empty: no closure, no reduction,
    /// no sanitary days, no forbidden weekdays, voucher numbering from 1.
    ///
    /// # Arguments
    ///
    /// * `plan_type` - The per-day voucher formula
    /// * `bed_capacity` - Total beds (must be positive)
    /// * `stay_days` - Length of stay (must be positive)
    /// * `arrival_days` - Check-in days per cycle (`1..=stay_days`)
    /// * `period` - The planning horizon
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `bed_capacity` or `stay_days` is not positive (`InvalidParameter`)
    /// - `arrival_days` is not within `1..=stay_days` (`OutOfRange`)
    pub fn new(
        plan_type: PlanType,
        bed_capacity: i64,
        stay_days: i64,
        arrival_days: i64,
        period: DateRange,
    ) -> Result<Self, DomainError> {
        let bed_capacity: u32 = require_positive("bed_capacity", bed_capacity)?;
        let stay_days: u32 = require_positive("stay_days", stay_days)?;
        let arrival_days: u32 = check_arrival_days(arrival_days, stay_days)?;

        Ok(Self {
            plan_type,
            bed_capacity,
            stay_days,
            arrival_days,
            period,
            closure_period: None,
            reduction_period: None,
            reduced_bed_count: None,
            sanitary_days: 0,
            min_days_between_arrivals: 0,
            forbidden_weekdays: ForbiddenWeekdays::none(),
            starting_voucher_number: 1,
        })
    }

    /// Returns the plan type.
    #[must_use]
    pub const fn plan_type(&self) -> PlanType {
        self.plan_type
    }

    /// Returns the total bed capacity.
    #[must_use]
    pub const fn bed_capacity(&self) -> u32 {
        self.bed_capacity
    }

    /// Returns the length of stay in days.
    #[must_use]
    pub const fn stay_days(&self) -> u32 {
        self.stay_days
    }

    /// Returns the number of check-in days per arrival cycle.
    #[must_use]
    pub const fn arrival_days(&self) -> u32 {
        self.arrival_days
    }

    /// Returns the planning period.
    #[must_use]
    pub const fn period(&self) -> DateRange {
        self.period
    }

    /// Returns the closure period, if any.
    #[must_use]
    pub const fn closure_period(&self) -> Option<DateRange> {
        self.closure_period
    }

    /// Returns the reduction period, if any.
    #[must_use]
    pub const fn reduction_period(&self) -> Option<DateRange> {
        self.reduction_period
    }

    /// Returns the number of beds removed during the reduction period, if set.
    #[must_use]
    pub const fn reduced_bed_count(&self) -> Option<u32> {
        self.reduced_bed_count
    }

    /// Returns the number of sanitary days after each cycle.
    #[must_use]
    pub const fn sanitary_days(&self) -> u32 {
        self.sanitary_days
    }

    /// Returns the display-only spacing hint between cycles.
    #[must_use]
    pub const fn min_days_between_arrivals(&self) -> u32 {
        self.min_days_between_arrivals
    }

    /// Returns the forbidden check-in weekdays.
    #[must_use]
    pub const fn forbidden_weekdays(&self) -> ForbiddenWeekdays {
        self.forbidden_weekdays
    }

    /// Returns the first voucher number issued by this plan.
    #[must_use]
    pub const fn starting_voucher_number(&self) -> u64 {
        self.starting_voucher_number
    }

    /// Sets the bed capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not positive (`InvalidParameter`)
    /// - The value is below the configured reduced bed count (`OutOfRange`)
    pub fn set_bed_capacity(&mut self, value: i64) -> Result<(), DomainError> {
        let bed_capacity: u32 = require_positive("bed_capacity", value)?;
        if let Some(reduced) = self
            .reduced_bed_count
            .filter(|reduced| *reduced > bed_capacity)
        {
            return Err(DomainError::OutOfRange {
                field: "bed_capacity",
                reason: format!(
                    "must not be below reduced_bed_count ({reduced}), got {bed_capacity}"
                ),
            });
        }
        self.bed_capacity = bed_capacity;
        Ok(())
    }

    /// Sets the length of stay.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not positive (`InvalidParameter`)
    /// - The value is below the configured arrival days (`OutOfRange`)
    pub fn set_stay_days(&mut self, value: i64) -> Result<(), DomainError> {
        let stay_days: u32 = require_positive("stay_days", value)?;
        if self.arrival_days > stay_days {
            return Err(DomainError::OutOfRange {
                field: "stay_days",
                reason: format!(
                    "must not be below arrival_days ({}), got {stay_days}",
                    self.arrival_days
                ),
            });
        }
        self.stay_days = stay_days;
        Ok(())
    }

    /// Sets the number of check-in days per arrival cycle.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `0 < value <= stay_days`.
    pub fn set_arrival_days(&mut self, value: i64) -> Result<(), DomainError> {
        self.arrival_days = check_arrival_days(value, self.stay_days)?;
        Ok(())
    }

    /// Sets the planning period.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `start` is after `end` (`InvalidRange`)
    /// - A configured closure or reduction period would fall outside the
    ///   new period (`RangeNotContained`)
    pub fn set_period(&mut self, start: Date, end: Date) -> Result<(), DomainError> {
        let period: DateRange = validate_date_range("period", start, end)?;
        if let Some(closure) = &self.closure_period {
            validate_contained("closure_period", closure, &period)?;
        }
        if let Some(reduction) = &self.reduction_period {
            validate_contained("reduction_period", reduction, &period)?;
        }
        self.period = period;
        Ok(())
    }

    /// Sets the closure period.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `start` is after `end` (`InvalidRange`)
    /// - The range is not within the planning period (`RangeNotContained`)
    pub fn set_closure_period(&mut self, start: Date, end: Date) -> Result<(), DomainError> {
        let closure: DateRange = validate_date_range("closure_period", start, end)?;
        validate_contained("closure_period", &closure, &self.period)?;
        self.closure_period = Some(closure);
        Ok(())
    }

    /// Removes the closure period.
    pub fn clear_closure_period(&mut self) {
        self.closure_period = None;
    }

    /// Sets the reduction period.
    ///
    /// The reduced bed count must be set first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `start` is after `end` (`InvalidRange`)
    /// - The range is not within the planning period (`RangeNotContained`)
    /// - No reduced bed count is configured (`MissingDependency`)
    pub fn set_reduction_period(&mut self, start: Date, end: Date) -> Result<(), DomainError> {
        let reduction: DateRange = validate_date_range("reduction_period", start, end)?;
        validate_contained("reduction_period", &reduction, &self.period)?;
        if self.reduced_bed_count.is_none() {
            return Err(DomainError::MissingDependency {
                field: "reduction_period",
                requires: "reduced_bed_count",
            });
        }
        self.reduction_period = Some(reduction);
        Ok(())
    }

    /// Removes the reduction period.
    pub fn clear_reduction_period(&mut self) {
        self.reduction_period = None;
    }

    /// Sets the number of beds removed during the reduction period.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not positive (`InvalidParameter`)
    /// - The value exceeds the bed capacity (`OutOfRange`)
    pub fn set_reduced_bed_count(&mut self, value: i64) -> Result<(), DomainError> {
        let reduced: u32 = require_positive("reduced_bed_count", value)?;
        if reduced > self.bed_capacity {
            return Err(DomainError::OutOfRange {
                field: "reduced_bed_count",
                reason: format!(
                    "must not exceed bed_capacity ({}), got {reduced}",
                    self.bed_capacity
                ),
            });
        }
        self.reduced_bed_count = Some(reduced);
        Ok(())
    }

    /// Removes the reduced bed count.
    ///
    /// # Errors
    ///
    /// Returns `MissingDependency` while a reduction period is configured.
    pub fn clear_reduced_bed_count(&mut self) -> Result<(), DomainError> {
        if self.reduction_period.is_some() {
            return Err(DomainError::MissingDependency {
                field: "reduction_period",
                requires: "reduced_bed_count",
            });
        }
        self.reduced_bed_count = None;
        Ok(())
    }

    /// Sets the number of sanitary days after each cycle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is negative.
    pub fn set_sanitary_days(&mut self, value: i64) -> Result<(), DomainError> {
        self.sanitary_days = require_non_negative("sanitary_days", value)?;
        Ok(())
    }

    /// Sets the display-only spacing hint between cycles.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is negative.
    pub fn set_min_days_between_arrivals(&mut self, value: i64) -> Result<(), DomainError> {
        self.min_days_between_arrivals = require_non_negative("min_days_between_arrivals", value)?;
        Ok(())
    }

    /// Sets the forbidden check-in weekdays from ordinals (Monday = 0).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any ordinal is outside `0..=7` (`InvalidParameter`)
    /// - All seven weekdays would be forbidden (`TooRestrictive`)
    pub fn set_forbidden_weekdays<I>(&mut self, ordinals: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = i64>,
    {
        self.forbidden_weekdays = ForbiddenWeekdays::from_ordinals(ordinals)?;
        Ok(())
    }

    /// Sets the first voucher number issued by this plan.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is below 1.
    pub fn set_starting_voucher_number(&mut self, value: i64) -> Result<(), DomainError> {
        let number: u64 = u64::try_from(value)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| DomainError::InvalidParameter {
                field: "starting_voucher_number",
                reason: format!("must be at least 1, got {value}"),
            })?;
        self.starting_voucher_number = number;
        Ok(())
    }

    /// Returns the divisor of the per-day voucher formula for this plan type.
    const fn voucher_divisor(&self) -> u32 {
        match self.plan_type {
            PlanType::ArrivalBased => self.arrival_days,
            PlanType::DailyBased => self.stay_days,
        }
    }

    /// Returns the standard number of vouchers issued per check-in day.
    #[must_use]
    pub const fn tours_per_day(&self) -> u32 {
        self.bed_capacity / self.voucher_divisor()
    }

    /// Returns the number of vouchers issued per check-in day while the
    /// reduction period is in force.
    ///
    /// The per-day share of the removed beds is subtracted from the
    /// standard per-day count, using the same divisor.
    #[must_use]
    pub const fn reduced_tours_per_day(&self) -> u32 {
        let removed: u32 = match self.reduced_bed_count {
            Some(reduced) => reduced / self.voucher_divisor(),
            None => 0,
        };
        self.tours_per_day().saturating_sub(removed)
    }

    /// Returns the capacity ceiling while the reduction period is in force.
    #[must_use]
    pub const fn reduced_capacity(&self) -> u32 {
        match self.reduced_bed_count {
            Some(reduced) => self.bed_capacity.saturating_sub(reduced),
            None => self.bed_capacity,
        }
    }
}

impl std::fmt::Display for PlanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start: Date = self.period.start();
        let end: Date = self.period.end();
        write!(
            f,
            "Arrival plan from {:02}.{:02}.{} to {:02}.{:02}.{}",
            start.day(),
            u8::from(start.month()),
            start.year(),
            end.day(),
            u8::from(end.month()),
            end.year()
        )
    }
}

/// Validates the arrival day count against the stay length.
fn check_arrival_days(value: i64, stay_days: u32) -> Result<u32, DomainError> {
    if value <= 0 || value > i64::from(stay_days) {
        return Err(DomainError::OutOfRange {
            field: "arrival_days",
            reason: format!("must be between 1 and stay_days ({stay_days}), got {value}"),
        });
    }
    // Bounded by stay_days above.
    Ok(u32::try_from(value).unwrap_or(stay_days))
}
