// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod csv_export;
mod error;
mod intake;
mod request_response;
mod seed;

#[cfg(test)]
mod tests;

use arrival_plan_domain::{
    ArrivalBatchRecord, ArrivalCycles, DisplayLocale, PlanConfig, PlanLabels, PlanTable,
    render_plan,
};
use tracing::{debug, info, warn};

pub use csv_export::{plan_csv_string, write_plan_csv};
pub use error::{ApiError, RequestDecodeError, translate_domain_error};
pub use intake::{
    build_config, decode_job, extract_plan_id, job_labels, parse_job_date, plan_type_from_code,
    weekday_ordinals,
};
pub use request_response::{
    ARRIVAL_BASED_PLAN_CODE, CodeRef, CountRef, DRAFT_ROW_STATUS, DatePeriod, Department,
    ErrorData, OperationalPlan, PlanJobRequest, PlanResponse, PlanResponseData, PlanRow,
    PlanTableResponse,
};
pub use seed::{InMemoryVoucherRegistry, NoVoucherHistory, VoucherSeedSource, next_voucher_number};

/// A successfully generated plan together with the job context it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlan {
    /// The plan identifier.
    pub plan_id: i64,
    /// The sanatorium identifier.
    pub sanatorium_id: i64,
    /// The department identifier.
    pub department_id: i64,
    /// The validated configuration.
    pub config: PlanConfig,
    /// Display labels for rendering.
    pub labels: PlanLabels,
    /// Every record of the plan, in generation order.
    pub records: Vec<ArrivalBatchRecord>,
}

impl GeneratedPlan {
    /// Returns the highest voucher number issued by this plan.
    #[must_use]
    pub fn last_voucher_number(&self) -> Option<u64> {
        self.records.last().map(|record| record.voucher_number_to)
    }

    /// Returns the number of arrival cycles in this plan.
    #[must_use]
    pub fn cycle_count(&self) -> u32 {
        self.records.last().map_or(0, |record| record.arrival_index)
    }
}

/// A failed job: the error plus the plan it belongs to (0 when unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFailure {
    /// The plan identifier, or 0.
    pub plan_id: i64,
    /// What went wrong.
    pub error: ApiError,
}

impl std::fmt::Display for PlanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Plan {}: {}", self.plan_id, self.error)
    }
}

impl std::error::Error for PlanFailure {}

/// Decodes a job, validates it and generates the whole plan.
///
/// # Arguments
///
/// * `body` - The raw JSON job
/// * `seeds` - Source of the last issued voucher number per sanatorium
///
/// # Errors
///
/// Returns a `PlanFailure` if the job cannot be decoded, fails validation,
/// or produces no arrivals.
pub fn generate_job_plan<S: VoucherSeedSource + ?Sized>(
    body: &[u8],
    seeds: &S,
) -> Result<GeneratedPlan, PlanFailure> {
    let (plan_id, decoded): (i64, Result<PlanJobRequest, RequestDecodeError>) = decode_job(body);
    let fail = |error: ApiError| {
        warn!(plan_id = plan_id, error = %error, "Plan job rejected");
        PlanFailure { plan_id, error }
    };

    let job: PlanJobRequest = decoded.map_err(|e| fail(ApiError::from(e)))?;
    let sanatorium_id: i64 = job.operational_plan.sanatorium_id;
    let department_id: i64 = job.operational_plan.department.department_id;

    let starting_voucher: u64 = next_voucher_number(seeds, sanatorium_id);
    info!(
        plan_id = plan_id,
        sanatorium_id = sanatorium_id,
        department_id = department_id,
        starting_voucher = starting_voucher,
        "Generating arrival plan"
    );

    let config: PlanConfig = build_config(&job, starting_voucher).map_err(fail)?;
    debug!(plan_id = plan_id, summary = %config, "Plan configuration validated");

    let mut cycles: ArrivalCycles<'_> = ArrivalCycles::new(&config);
    for cycle in cycles.by_ref() {
        debug!(
            plan_id = plan_id,
            arrival = cycle.first().map_or(0, |record| record.arrival_index),
            records = cycle.len(),
            "Generated arrival cycle"
        );
    }
    let records: Vec<ArrivalBatchRecord> = cycles.into_history();

    if records.is_empty() {
        return Err(fail(ApiError::EmptyPlan { plan_id }));
    }

    let plan: GeneratedPlan = GeneratedPlan {
        plan_id,
        sanatorium_id,
        department_id,
        labels: job_labels(&job),
        config,
        records,
    };
    info!(
        plan_id = plan_id,
        records = plan.records.len(),
        cycles = plan.cycle_count(),
        "Arrival plan generated"
    );
    Ok(plan)
}

/// Converts one record into a response row.
#[must_use]
pub fn plan_row(plan: &GeneratedPlan, record: &ArrivalBatchRecord) -> PlanRow {
    PlanRow {
        voucher_release_plan_id: plan.plan_id,
        sanatorium_id: plan.sanatorium_id,
        department_id: plan.department_id,
        arrival_number: record.arrival_index,
        arrival_day_number: record.day_in_arrival,
        arrival_date: record.check_in_date.to_string(),
        days_of_stay_count: plan.config.stay_days(),
        departure_date: record.check_out_date.to_string(),
        vouchers_count: record.vouchers_issued,
        voucher_number_from: record.voucher_number_from,
        voucher_number_to: record.voucher_number_to,
        days_between_arrivals_count: plan.config.min_days_between_arrivals(),
        sanitary_days_count: record.post_cycle_skip_days,
        status: DRAFT_ROW_STATUS,
    }
}

/// Builds the success payload for a generated plan.
#[must_use]
pub fn success_response(plan: &GeneratedPlan) -> PlanResponse {
    let rows: Vec<PlanRow> = plan
        .records
        .iter()
        .map(|record| plan_row(plan, record))
        .collect();
    PlanResponse {
        success: true,
        data: PlanResponseData::Rows(rows),
    }
}

/// Builds the error payload for a failed job.
#[must_use]
pub fn failure_response(failure: &PlanFailure) -> PlanResponse {
    PlanResponse {
        success: false,
        data: PlanResponseData::Error(ErrorData {
            error_msg: failure.error.to_string(),
            voucher_release_plan_id: failure.plan_id,
        }),
    }
}

/// Builds the payload for either outcome of a job.
#[must_use]
pub fn plan_response(result: &Result<GeneratedPlan, PlanFailure>) -> PlanResponse {
    match result {
        Ok(plan) => success_response(plan),
        Err(failure) => failure_response(failure),
    }
}

/// Processes one job end to end and always returns a payload.
#[must_use]
pub fn process_plan_request<S: VoucherSeedSource + ?Sized>(body: &[u8], seeds: &S) -> PlanResponse {
    plan_response(&generate_job_plan(body, seeds))
}

/// Renders a generated plan into a display table.
#[must_use]
pub fn plan_table(plan: &GeneratedPlan, locale: DisplayLocale) -> PlanTable {
    render_plan(&plan.config, &plan.labels, &plan.records, locale)
}

/// Builds the table payload for a generated plan.
#[must_use]
pub fn plan_table_response(plan: &GeneratedPlan, locale: DisplayLocale) -> PlanTableResponse {
    let table: PlanTable = plan_table(plan, locale);
    PlanTableResponse {
        voucher_release_plan_id: plan.plan_id,
        summary: plan.config.to_string(),
        plan_type: table.plan_type.as_str().to_string(),
        columns: table.columns,
        rows: table.rows,
    }
}
