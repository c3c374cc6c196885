// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job intake: JSON decoding and translation into a plan configuration.
//!
//! Decoding runs in two phases. The plan id is extracted first so that a
//! job with a malformed body can still be answered against its plan.

use arrival_plan_domain::{DateRange, PlanConfig, PlanLabels, PlanType, validate_date_range};
use serde_json::Value;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{ApiError, RequestDecodeError, translate_domain_error};
use crate::request_response::{
    ARRIVAL_BASED_PLAN_CODE, DatePeriod, OperationalPlan, PlanJobRequest,
};

const JOB_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Extracts the plan id from a decoded job body.
///
/// # Errors
///
/// Returns `RequestDecodeError::MissingPlanId` if `id` is absent, not an
/// integer, or not positive.
pub fn extract_plan_id(body: &Value) -> Result<i64, RequestDecodeError> {
    body.get("id")
        .and_then(Value::as_i64)
        .filter(|id| *id > 0)
        .ok_or(RequestDecodeError::MissingPlanId)
}

/// Decodes a raw job body.
///
/// # Arguments
///
/// * `body` - The raw JSON bytes
///
/// # Returns
///
/// The plan id (0 when it could not be determined) together with the
/// decoded job or the decode failure.
pub fn decode_job(body: &[u8]) -> (i64, Result<PlanJobRequest, RequestDecodeError>) {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return (0, Err(RequestDecodeError::MalformedJson(e.to_string()))),
    };
    let plan_id: i64 = match extract_plan_id(&value) {
        Ok(id) => id,
        Err(e) => return (0, Err(e)),
    };
    let job: Result<PlanJobRequest, RequestDecodeError> = serde_json::from_value(value)
        .map_err(|e| RequestDecodeError::InvalidShape(e.to_string()));
    (plan_id, job)
}

/// Parses a `YYYY-MM-DD` job date.
///
/// # Errors
///
/// Returns `RequestDecodeError::InvalidDate` naming `field` on failure.
pub fn parse_job_date(field: &'static str, value: &str) -> Result<Date, RequestDecodeError> {
    Date::parse(value.trim(), JOB_DATE_FORMAT).map_err(|_| RequestDecodeError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Maps a job plan type code to a plan type.
#[must_use]
pub const fn plan_type_from_code(code: i64) -> PlanType {
    if code == ARRIVAL_BASED_PLAN_CODE {
        PlanType::ArrivalBased
    } else {
        PlanType::DailyBased
    }
}

/// Collects the job's weekday codes as ordinals.
///
/// Codes already are ordinals (0 = Monday .. 6 = Sunday, 7 also Sunday), so
/// they pass through unchanged and the validator rejects anything else.
#[must_use]
pub fn weekday_ordinals(job: &PlanJobRequest) -> Vec<i64> {
    job.non_arrival_days.iter().map(|day| day.code).collect()
}

fn parse_period(
    from_field: &'static str,
    to_field: &'static str,
    period: &DatePeriod,
) -> Result<(Date, Date), RequestDecodeError> {
    Ok((
        parse_job_date(from_field, &period.date_from)?,
        parse_job_date(to_field, &period.date_to)?,
    ))
}

/// Builds a validated plan configuration from a decoded job.
///
/// # Arguments
///
/// * `job` - The decoded job
/// * `starting_voucher_number` - First voucher number of the plan
///
/// # Errors
///
/// Returns an error if any date cannot be parsed or any parameter violates
/// a configuration rule.
pub fn build_config(
    job: &PlanJobRequest,
    starting_voucher_number: u64,
) -> Result<PlanConfig, ApiError> {
    let operational: &OperationalPlan = &job.operational_plan;
    let start: Date = parse_job_date("operational_plan.date_from", &operational.date_from)?;
    let end: Date = parse_job_date("operational_plan.date_to", &operational.date_to)?;
    let period: DateRange =
        validate_date_range("period", start, end).map_err(translate_domain_error)?;

    let mut config: PlanConfig = PlanConfig::new(
        plan_type_from_code(job.plan_type.code),
        operational.department.num_of_beds,
        job.number_stay_days.count,
        job.number_arrival_days,
        period,
    )
    .map_err(translate_domain_error)?;

    config
        .set_forbidden_weekdays(weekday_ordinals(job))
        .map_err(translate_domain_error)?;
    config
        .set_sanitary_days(job.sanitary_days)
        .map_err(translate_domain_error)?;
    config
        .set_min_days_between_arrivals(job.number_days_between_arrivals)
        .map_err(translate_domain_error)?;

    if let Some(stop) = &job.stop_period {
        let (from, to): (Date, Date) =
            parse_period("stop_period.date_from", "stop_period.date_to", stop)?;
        config
            .set_closure_period(from, to)
            .map_err(translate_domain_error)?;
    }

    // Reduced beds must be in place before the reducing period.
    if let Some(reduce_beds) = job.reduce_beds {
        config
            .set_reduced_bed_count(reduce_beds)
            .map_err(translate_domain_error)?;
    }
    if let Some(reducing) = &job.reducing_period {
        let (from, to): (Date, Date) = parse_period(
            "reducing_period.date_from",
            "reducing_period.date_to",
            reducing,
        )?;
        config
            .set_reduction_period(from, to)
            .map_err(translate_domain_error)?;
    }

    let seed: i64 = i64::try_from(starting_voucher_number).map_err(|_| ApiError::Internal {
        message: format!("Voucher number {starting_voucher_number} is out of range"),
    })?;
    config
        .set_starting_voucher_number(seed)
        .map_err(translate_domain_error)?;

    Ok(config)
}

/// Returns the display labels of a job, falling back to identifiers.
#[must_use]
pub fn job_labels(job: &PlanJobRequest) -> PlanLabels {
    let operational: &OperationalPlan = &job.operational_plan;
    PlanLabels {
        sanatorium: operational
            .sanatorium_name
            .clone()
            .unwrap_or_else(|| operational.sanatorium_id.to_string()),
        department: operational
            .department
            .name
            .clone()
            .unwrap_or_else(|| operational.department.department_id.to_string()),
    }
}
