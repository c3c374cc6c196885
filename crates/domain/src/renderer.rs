// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabular rendering of generated plans.
//!
//! Rendering is a pure mapping from records to display rows. The column set
//! depends on the plan type; captions and weekday names depend on the
//! display locale passed by the caller.

use crate::config::PlanConfig;
use crate::error::DomainError;
use crate::generator::ArrivalBatchRecord;
use crate::types::PlanType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const SHORT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day].[month].[year repr:last_two]");

/// Language used for column captions and weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayLocale {
    /// English captions.
    #[default]
    En,
    /// Russian captions.
    Ru,
}

impl DisplayLocale {
    /// Converts this locale to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    const fn weekday_names(self) -> [&'static str; 7] {
        match self {
            Self::En => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            Self::Ru => ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"],
        }
    }
}

impl FromStr for DisplayLocale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            _ => Err(DomainError::InvalidParameter {
                field: "locale",
                reason: format!("unsupported display locale '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Facility labels shown in the first two columns of every row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanLabels {
    /// The sanatorium name.
    pub sanatorium: String,
    /// The department name.
    pub department: String,
}

/// A rendered plan: captions plus one row of cells per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTable {
    /// The plan type the column set was chosen for.
    pub plan_type: PlanType,
    /// Column captions, in display order.
    pub columns: Vec<String>,
    /// Row cells; every row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

const ARRIVAL_BASED_EN: [&str; 12] = [
    "Sanatorium",
    "Department",
    "Arrival",
    "Arrival day",
    "Arrival start",
    "Stay days",
    "Arrival end",
    "Vouchers",
    "Voucher no. from",
    "Voucher no. to",
    "Occupancy",
    "Sanitary days",
];

const ARRIVAL_BASED_RU: [&str; 12] = [
    "Здравница",
    "Отделение",
    "Заезд",
    "День заезда",
    "Начало заезда",
    "Кол-во дней",
    "Окончание заезда",
    "Кол-во путёвок",
    "№ путёвок с",
    "№ путёвок по",
    "Заполненность санатория",
    "Санитарных дн.",
];

const DAILY_BASED_EN: [&str; 9] = [
    "Sanatorium",
    "Department",
    "Arrival",
    "Arrival start",
    "Stay days",
    "Arrival end",
    "Vouchers",
    "Occupancy",
    "Days between arrivals",
];

const DAILY_BASED_RU: [&str; 9] = [
    "Здравница",
    "Отделение",
    "Заезд",
    "Начало заезда",
    "Кол-во дней",
    "Окончание заезда",
    "Кол-во путёвок",
    "Заполненность санатория",
    "Между заездом дн.",
];

/// Returns the column captions for a plan type, in display order.
#[must_use]
pub const fn plan_columns(plan_type: PlanType, locale: DisplayLocale) -> &'static [&'static str] {
    match (plan_type, locale) {
        (PlanType::ArrivalBased, DisplayLocale::En) => &ARRIVAL_BASED_EN,
        (PlanType::ArrivalBased, DisplayLocale::Ru) => &ARRIVAL_BASED_RU,
        (PlanType::DailyBased, DisplayLocale::En) => &DAILY_BASED_EN,
        (PlanType::DailyBased, DisplayLocale::Ru) => &DAILY_BASED_RU,
    }
}

/// Formats a date as `DD.MM.YY`, optionally followed by the weekday name.
#[must_use]
pub fn format_short_date(date: Date, locale: DisplayLocale, with_weekday: bool) -> String {
    let short: String = date
        .format(SHORT_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string());
    if !with_weekday {
        return short;
    }
    let names: [&str; 7] = locale.weekday_names();
    let weekday: &str = names[usize::from(date.weekday().number_days_from_monday())];
    format!("{short} - {weekday}")
}

/// Renders generated records into a display table.
///
/// # Arguments
///
/// * `config` - The configuration the records were generated from
/// * `labels` - Facility labels for the first two columns
/// * `records` - Every record of the plan, in generation order
/// * `locale` - Language for captions and weekday names
#[must_use]
pub fn render_plan(
    config: &PlanConfig,
    labels: &PlanLabels,
    records: &[ArrivalBatchRecord],
    locale: DisplayLocale,
) -> PlanTable {
    let plan_type: PlanType = config.plan_type();
    let columns: Vec<String> = plan_columns(plan_type, locale)
        .iter()
        .map(|caption| (*caption).to_string())
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| match plan_type {
            PlanType::ArrivalBased => arrival_based_row(config, labels, record),
            PlanType::DailyBased => daily_based_row(config, labels, record, locale),
        })
        .collect();

    PlanTable {
        plan_type,
        columns,
        rows,
    }
}

fn occupancy_fraction(record: &ArrivalBatchRecord) -> String {
    format!("{}/{}", record.occupancy_after, record.effective_capacity)
}

fn arrival_based_row(
    config: &PlanConfig,
    labels: &PlanLabels,
    record: &ArrivalBatchRecord,
) -> Vec<String> {
    vec![
        labels.sanatorium.clone(),
        labels.department.clone(),
        record.arrival_index.to_string(),
        record.day_in_arrival.to_string(),
        record.check_in_date.to_string(),
        config.stay_days().to_string(),
        record.check_out_date.to_string(),
        record.vouchers_issued.to_string(),
        record.voucher_number_from.to_string(),
        record.voucher_number_to.to_string(),
        occupancy_fraction(record),
        record.post_cycle_skip_days.to_string(),
    ]
}

fn daily_based_row(
    config: &PlanConfig,
    labels: &PlanLabels,
    record: &ArrivalBatchRecord,
    locale: DisplayLocale,
) -> Vec<String> {
    vec![
        labels.sanatorium.clone(),
        labels.department.clone(),
        record.arrival_index.to_string(),
        format_short_date(record.check_in_date, locale, true),
        config.stay_days().to_string(),
        format_short_date(record.check_out_date, locale, false),
        record.vouchers_issued.to_string(),
        occupancy_fraction(record),
        config.min_days_between_arrivals().to_string(),
    ]
}
