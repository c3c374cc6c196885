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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod error;
mod generator;
mod renderer;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use config::PlanConfig;
pub use error::DomainError;
pub use generator::{ArrivalBatchRecord, ArrivalCycles, generate_next_arrival, generate_plan};
pub use renderer::{
    DisplayLocale, PlanLabels, PlanTable, format_short_date, plan_columns, render_plan,
};
pub use types::{DateRange, ForbiddenWeekdays, PlanType};
pub use validation::{
    require_non_negative, require_positive, validate_contained, validate_date_range,
};
