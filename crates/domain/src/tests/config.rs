// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::reference_config;
use crate::{DateRange, DomainError, PlanConfig, PlanType};
use time::macros::date;

fn reference_period() -> DateRange {
    DateRange::new(date!(2026 - 01 - 01), date!(2026 - 04 - 09)).unwrap()
}

#[test]
fn test_new_config_has_empty_optional_parameters() {
    let config: PlanConfig = reference_config();

    assert_eq!(config.plan_type(), PlanType::ArrivalBased);
    assert_eq!(config.bed_capacity(), 300);
    assert_eq!(config.stay_days(), 14);
    assert_eq!(config.arrival_days(), 5);
    assert_eq!(config.closure_period(), None);
    assert_eq!(config.reduction_period(), None);
    assert_eq!(config.reduced_bed_count(), None);
    assert_eq!(config.sanitary_days(), 0);
    assert_eq!(config.min_days_between_arrivals(), 0);
    assert!(config.forbidden_weekdays().is_empty());
    assert_eq!(config.starting_voucher_number(), 1);
}

#[test]
fn test_new_rejects_non_positive_capacity() {
    let result: Result<PlanConfig, DomainError> =
        PlanConfig::new(PlanType::ArrivalBased, 0, 14, 5, reference_period());
    assert!(matches!(
        result,
        Err(DomainError::InvalidParameter {
            field: "bed_capacity",
            ..
        })
    ));
}

#[test]
fn test_new_rejects_negative_stay_days() {
    let result: Result<PlanConfig, DomainError> =
        PlanConfig::new(PlanType::ArrivalBased, 300, -14, 5, reference_period());
    assert!(matches!(
        result,
        Err(DomainError::InvalidParameter {
            field: "stay_days",
            ..
        })
    ));
}

#[test]
fn test_new_rejects_arrival_days_above_stay_days() {
    let result: Result<PlanConfig, DomainError> =
        PlanConfig::new(PlanType::ArrivalBased, 300, 14, 15, reference_period());
    assert!(matches!(
        result,
        Err(DomainError::OutOfRange {
            field: "arrival_days",
            ..
        })
    ));
}

#[test]
fn test_set_arrival_days_bounds() {
    let mut config: PlanConfig = reference_config();

    assert!(matches!(
        config.set_arrival_days(0),
        Err(DomainError::OutOfRange { .. })
    ));
    assert!(matches!(
        config.set_arrival_days(15),
        Err(DomainError::OutOfRange { .. })
    ));
    assert_eq!(config.arrival_days(), 5);

    config.set_arrival_days(14).unwrap();
    assert_eq!(config.arrival_days(), 14);
}

#[test]
fn test_set_stay_days_rechecks_arrival_days() {
    let mut config: PlanConfig = reference_config();

    let result: Result<(), DomainError> = config.set_stay_days(4);
    assert!(matches!(
        result,
        Err(DomainError::OutOfRange {
            field: "stay_days",
            ..
        })
    ));
    assert_eq!(config.stay_days(), 14);

    config.set_stay_days(21).unwrap();
    assert_eq!(config.stay_days(), 21);
}

#[test]
fn test_set_bed_capacity_rechecks_reduced_bed_count() {
    let mut config: PlanConfig = reference_config();
    config.set_reduced_bed_count(50).unwrap();

    assert!(matches!(
        config.set_bed_capacity(40),
        Err(DomainError::OutOfRange {
            field: "bed_capacity",
            ..
        })
    ));
    assert!(matches!(
        config.set_bed_capacity(-1),
        Err(DomainError::InvalidParameter { .. })
    ));
    assert_eq!(config.bed_capacity(), 300);

    config.set_bed_capacity(50).unwrap();
    assert_eq!(config.bed_capacity(), 50);
}

// Period ordering is enforced for every date pair.
#[test]
fn test_set_period_rejects_reversed_range() {
    let mut config: PlanConfig = reference_config();

    let result: Result<(), DomainError> =
        config.set_period(date!(2026 - 04 - 09), date!(2026 - 01 - 01));
    assert!(matches!(
        result,
        Err(DomainError::InvalidRange { field: "period", .. })
    ));
    assert_eq!(config.period(), reference_period());
}

#[test]
fn test_set_period_keeps_sub_periods_contained() {
    let mut config: PlanConfig = reference_config();
    config
        .set_closure_period(date!(2026 - 03 - 01), date!(2026 - 03 - 10))
        .unwrap();

    let result: Result<(), DomainError> =
        config.set_period(date!(2026 - 01 - 01), date!(2026 - 02 - 28));
    assert!(matches!(
        result,
        Err(DomainError::RangeNotContained {
            field: "closure_period",
            ..
        })
    ));
    assert_eq!(config.period(), reference_period());
}

#[test]
fn test_set_closure_period_must_be_contained() {
    let mut config: PlanConfig = reference_config();

    assert!(matches!(
        config.set_closure_period(date!(2025 - 12 - 25), date!(2026 - 01 - 05)),
        Err(DomainError::RangeNotContained { .. })
    ));
    assert!(matches!(
        config.set_closure_period(date!(2026 - 04 - 01), date!(2026 - 04 - 10)),
        Err(DomainError::RangeNotContained { .. })
    ));
    assert!(matches!(
        config.set_closure_period(date!(2026 - 02 - 10), date!(2026 - 02 - 01)),
        Err(DomainError::InvalidRange { .. })
    ));
    assert_eq!(config.closure_period(), None);

    config
        .set_closure_period(date!(2026 - 01 - 01), date!(2026 - 04 - 09))
        .unwrap();
    assert_eq!(config.closure_period(), Some(reference_period()));

    config.clear_closure_period();
    assert_eq!(config.closure_period(), None);
}

#[test]
fn test_set_reduction_period_requires_reduced_bed_count() {
    let mut config: PlanConfig = reference_config();

    let result: Result<(), DomainError> =
        config.set_reduction_period(date!(2026 - 02 - 01), date!(2026 - 02 - 10));
    assert!(matches!(
        result,
        Err(DomainError::MissingDependency {
            field: "reduction_period",
            requires: "reduced_bed_count",
        })
    ));

    config.set_reduced_bed_count(50).unwrap();
    config
        .set_reduction_period(date!(2026 - 02 - 01), date!(2026 - 02 - 10))
        .unwrap();
    assert!(config.reduction_period().is_some());
}

#[test]
fn test_set_reduction_period_must_be_contained() {
    let mut config: PlanConfig = reference_config();
    config.set_reduced_bed_count(50).unwrap();

    assert!(matches!(
        config.set_reduction_period(date!(2026 - 04 - 01), date!(2026 - 05 - 01)),
        Err(DomainError::RangeNotContained {
            field: "reduction_period",
            ..
        })
    ));
}

#[test]
fn test_reduced_bed_count_bounds() {
    let mut config: PlanConfig = reference_config();

    assert!(matches!(
        config.set_reduced_bed_count(0),
        Err(DomainError::InvalidParameter { .. })
    ));
    assert!(matches!(
        config.set_reduced_bed_count(301),
        Err(DomainError::OutOfRange { .. })
    ));
    config.set_reduced_bed_count(300).unwrap();
    assert_eq!(config.reduced_bed_count(), Some(300));
}

#[test]
fn test_clear_reduced_bed_count_blocked_by_reduction_period() {
    let mut config: PlanConfig = reference_config();
    config.set_reduced_bed_count(50).unwrap();
    config
        .set_reduction_period(date!(2026 - 02 - 01), date!(2026 - 02 - 10))
        .unwrap();

    assert!(matches!(
        config.clear_reduced_bed_count(),
        Err(DomainError::MissingDependency { .. })
    ));
    assert_eq!(config.reduced_bed_count(), Some(50));

    config.clear_reduction_period();
    config.clear_reduced_bed_count().unwrap();
    assert_eq!(config.reduced_bed_count(), None);
}

#[test]
fn test_non_negative_setters_reject_negative_values() {
    let mut config: PlanConfig = reference_config();

    assert!(matches!(
        config.set_sanitary_days(-1),
        Err(DomainError::InvalidParameter {
            field: "sanitary_days",
            ..
        })
    ));
    assert!(matches!(
        config.set_min_days_between_arrivals(-1),
        Err(DomainError::InvalidParameter {
            field: "min_days_between_arrivals",
            ..
        })
    ));

    config.set_sanitary_days(0).unwrap();
    config.set_sanitary_days(2).unwrap();
    config.set_min_days_between_arrivals(1).unwrap();
    assert_eq!(config.sanitary_days(), 2);
    assert_eq!(config.min_days_between_arrivals(), 1);
}

#[test]
fn test_set_forbidden_weekdays_failure_keeps_previous_set() {
    let mut config: PlanConfig = reference_config();
    config.set_forbidden_weekdays([0, 1]).unwrap();

    assert!(matches!(
        config.set_forbidden_weekdays([0, 1, 2, 3, 4, 5, 6]),
        Err(DomainError::TooRestrictive { .. })
    ));
    assert!(matches!(
        config.set_forbidden_weekdays([9]),
        Err(DomainError::InvalidParameter { .. })
    ));
    assert_eq!(config.forbidden_weekdays().ordinals(), vec![0, 1]);
}

#[test]
fn test_set_starting_voucher_number() {
    let mut config: PlanConfig = reference_config();

    assert!(matches!(
        config.set_starting_voucher_number(0),
        Err(DomainError::InvalidParameter { .. })
    ));
    config.set_starting_voucher_number(1001).unwrap();
    assert_eq!(config.starting_voucher_number(), 1001);
}

#[test]
fn test_tours_per_day_depends_on_plan_type() {
    let arrival_based: PlanConfig = reference_config();
    assert_eq!(arrival_based.tours_per_day(), 60);

    let daily_based: PlanConfig =
        PlanConfig::new(PlanType::DailyBased, 300, 14, 5, reference_period()).unwrap();
    assert_eq!(daily_based.tours_per_day(), 21);
}

#[test]
fn test_reduced_tours_per_day() {
    let mut config: PlanConfig = reference_config();
    assert_eq!(config.reduced_tours_per_day(), 60);
    assert_eq!(config.reduced_capacity(), 300);

    config.set_reduced_bed_count(50).unwrap();
    assert_eq!(config.reduced_tours_per_day(), 50);
    assert_eq!(config.reduced_capacity(), 250);
}

#[test]
fn test_config_display_summary() {
    let config: PlanConfig = reference_config();
    assert_eq!(
        config.to_string(),
        "Arrival plan from 01.01.2026 to 09.04.2026"
    );
}
