// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! The job and response shapes are the wire contract of the plan worker and
//! are kept distinct from the domain types.

use serde::{Deserialize, Serialize};

/// Plan type code that selects an arrival-based plan. Any other code
/// selects a daily-based plan.
pub const ARRIVAL_BASED_PLAN_CODE: i64 = 2;

/// Status assigned to every generated row (draft).
pub const DRAFT_ROW_STATUS: u8 = 1;

/// A plan generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanJobRequest {
    /// The voucher release plan identifier.
    pub id: i64,
    /// Facility and planning period.
    pub operational_plan: OperationalPlan,
    /// The plan type selector.
    pub plan_type: CodeRef,
    /// Length of one stay.
    pub number_stay_days: CountRef,
    /// Display-only spacing between arrivals.
    pub number_days_between_arrivals: i64,
    /// Weekdays on which check-in is not allowed (0 = Monday .. 6 = Sunday,
    /// 7 also Sunday).
    pub non_arrival_days: Vec<CodeRef>,
    /// Gap after each arrival cycle.
    pub sanitary_days: i64,
    /// Check-in days per arrival cycle.
    pub number_arrival_days: i64,
    /// Period during which the sanatorium is closed.
    #[serde(default)]
    pub stop_period: Option<DatePeriod>,
    /// Period during which part of the beds are unavailable.
    #[serde(default)]
    pub reducing_period: Option<DatePeriod>,
    /// Number of beds removed during the reducing period.
    #[serde(default)]
    pub reduce_beds: Option<i64>,
}

/// The facility and planning period of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalPlan {
    /// The sanatorium identifier.
    pub sanatorium_id: i64,
    /// Display name of the sanatorium.
    #[serde(default)]
    pub sanatorium_name: Option<String>,
    /// First day of the planning period (`YYYY-MM-DD`).
    pub date_from: String,
    /// Last day of the planning period (`YYYY-MM-DD`).
    pub date_to: String,
    /// The department the plan is for.
    pub department: Department,
}

/// A sanatorium department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// The department identifier.
    pub department_id: i64,
    /// Display name of the department.
    #[serde(default)]
    pub name: Option<String>,
    /// Bed capacity of the department.
    pub num_of_beds: i64,
}

/// A `{ "code": n }` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    /// The referenced code.
    pub code: i64,
}

/// A `{ "count": n }` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRef {
    /// The referenced count.
    pub count: i64,
}

/// A `{ "date_from", "date_to" }` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    /// First day (`YYYY-MM-DD`).
    pub date_from: String,
    /// Last day (`YYYY-MM-DD`).
    pub date_to: String,
}

/// The reply to a plan job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Whether the plan was generated.
    pub success: bool,
    /// Rows on success, error details on failure.
    pub data: PlanResponseData,
}

/// Payload of a [`PlanResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanResponseData {
    /// One row per admitted check-in day.
    Rows(Vec<PlanRow>),
    /// The failure description.
    Error(ErrorData),
}

/// Error details of a failed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    /// A human-readable description of the failure.
    pub error_msg: String,
    /// The plan the failure belongs to, or 0 when unknown.
    pub voucher_release_plan_id: i64,
}

/// One row of a generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    /// The plan identifier.
    pub voucher_release_plan_id: i64,
    /// The sanatorium identifier.
    pub sanatorium_id: i64,
    /// The department identifier.
    pub department_id: i64,
    /// The 1-based arrival cycle ordinal.
    pub arrival_number: u32,
    /// The 1-based day ordinal within the cycle.
    pub arrival_day_number: u32,
    /// Check-in date (`YYYY-MM-DD`).
    pub arrival_date: String,
    /// Length of stay.
    pub days_of_stay_count: u32,
    /// Check-out date (`YYYY-MM-DD`).
    pub departure_date: String,
    /// Vouchers issued for the day.
    pub vouchers_count: u32,
    /// First voucher number (inclusive).
    pub voucher_number_from: u64,
    /// Last voucher number (inclusive).
    pub voucher_number_to: u64,
    /// Display-only spacing between arrivals.
    pub days_between_arrivals_count: u32,
    /// Sanitary gap after this day.
    pub sanitary_days_count: u32,
    /// Row status.
    pub status: u8,
}

/// A rendered plan table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTableResponse {
    /// The plan identifier.
    pub voucher_release_plan_id: i64,
    /// One-line description of the plan period.
    pub summary: String,
    /// The plan type (`arrival_based` or `daily_based`).
    pub plan_type: String,
    /// Column captions.
    pub columns: Vec<String>,
    /// Row cells.
    pub rows: Vec<Vec<String>>,
}
