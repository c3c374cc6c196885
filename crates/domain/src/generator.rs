// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Arrival cycle generation.
//!
//! This module walks calendar days forward from the end of the previous
//! cycle and admits check-in days until a full cycle of `arrival_days`
//! records has been produced, or until a closure or the end of the planning
//! period stops the cycle early.
//!
//! ## Invariants
//!
//! - Every stay lies within the planning period and never touches the closure
//! - `occupancy_after <= effective_capacity` for every record
//! - No check-in falls on a forbidden weekday
//! - Voucher numbers are strictly increasing and never overlap; a day that
//!   issues no vouchers carries the empty window `from = to + 1`
//! - Only the final day of a cycle is topped up to capacity
//!
//! ## Admission rules (per candidate day, in order)
//!
//! 1. The stay intersects the closure: stop the cycle. If nothing has been
//!    admitted yet, resume the walk the day after the closure instead.
//! 2. The stay ends after the planning period: stop the cycle.
//! 3. The stay intersects the reduction period: use the reduced capacity
//!    and the reduced per-day voucher count.
//! 4. The check-in falls on a forbidden weekday, or admitting the day would
//!    overbook: skip the day without consuming a cycle slot.

use crate::config::PlanConfig;
use crate::types::DateRange;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// One admitted check-in day within an arrival cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalBatchRecord {
    /// The 1-based ordinal of the arrival cycle.
    pub arrival_index: u32,
    /// The 1-based ordinal of the check-in day within the cycle.
    pub day_in_arrival: u32,
    /// The check-in date.
    pub check_in_date: Date,
    /// The check-out date (`check_in_date + stay_days - 1`).
    pub check_out_date: Date,
    /// Vouchers issued for this check-in day.
    pub vouchers_issued: u32,
    /// Beds occupied immediately after this check-in.
    pub occupancy_after: u32,
    /// Capacity ceiling in force for this check-in.
    pub effective_capacity: u32,
    /// Sanitary gap applied after this day (non-zero only on a cycle's last day).
    pub post_cycle_skip_days: u32,
    /// First voucher number issued this day (inclusive).
    pub voucher_number_from: u64,
    /// Last voucher number issued this day (inclusive). One less than
    /// `voucher_number_from` when no vouchers were issued.
    pub voucher_number_to: u64,
}

impl ArrivalBatchRecord {
    /// Returns the stay interval of this record.
    #[must_use]
    pub const fn stay(&self) -> DateRange {
        DateRange::from_ordered(self.check_in_date, self.check_out_date)
    }

    /// Returns whether the guests of this record hold their beds on `day`.
    ///
    /// Beds are released on the check-out date.
    fn occupies(&self, day: Date) -> bool {
        self.check_in_date <= day && day < self.check_out_date
    }
}

/// Capacity and voucher count in force for one candidate day.
struct DayTerms {
    capacity: u32,
    vouchers: u32,
}

fn day_terms(config: &PlanConfig, stay: &DateRange) -> DayTerms {
    match config.reduction_period() {
        Some(reduction) if stay.intersects(&reduction) => DayTerms {
            capacity: config.reduced_capacity(),
            vouchers: config.reduced_tours_per_day(),
        },
        _ => DayTerms {
            capacity: config.bed_capacity(),
            vouchers: config.tours_per_day(),
        },
    }
}

/// Sums the beds held on `day` by guests of earlier cycles.
fn in_house(cohorts: &[&ArrivalBatchRecord], day: Date) -> u32 {
    cohorts
        .iter()
        .filter(|record| record.occupies(day))
        .fold(0_u32, |acc, record| acc.saturating_add(record.vouchers_issued))
}

/// Determines where the next cycle's walk begins.
///
/// The first cycle starts on the first day of the planning period. Later
/// cycles start the day after the previous cycle's last check-out plus its
/// sanitary gap.
fn cycle_start(config: &PlanConfig, last: Option<&ArrivalBatchRecord>) -> Option<Date> {
    match last {
        None => Some(config.period().start()),
        Some(record) => record
            .check_out_date
            .checked_add(Duration::days(i64::from(record.post_cycle_skip_days) + 1)),
    }
}

/// Generates the next arrival cycle.
///
/// The generator is stateless: everything it needs about earlier cycles is
/// derived from `history`, which is never modified.
///
/// # Arguments
///
/// * `config` - The validated plan configuration
/// * `history` - Every record produced so far, in generation order
///
/// # Returns
///
/// The records of the next cycle. The list may be shorter than
/// `arrival_days` when a closure or the end of the period cut the cycle
/// short. An empty list means the plan is complete.
#[must_use]
pub fn generate_next_arrival(
    config: &PlanConfig,
    history: &[ArrivalBatchRecord],
) -> Vec<ArrivalBatchRecord> {
    let period: DateRange = config.period();
    let closure: Option<DateRange> = config.closure_period();
    let arrival_days: u32 = config.arrival_days();
    let last: Option<&ArrivalBatchRecord> = history.last();

    let arrival_index: u32 = last.map_or(1, |record| record.arrival_index + 1);
    let mut next_voucher: u64 = last.map_or(config.starting_voucher_number(), |record| {
        record.voucher_number_to + 1
    });

    let Some(mut candidate) = cycle_start(config, last) else {
        return Vec::new();
    };
    let mut carry_over: bool = true;

    // A cycle truncated by the closure resumes after the closure ends.
    if let (Some(closure), Some(last)) = (closure, last) {
        let last_cycle_len: usize = history
            .iter()
            .rev()
            .take_while(|record| record.arrival_index == last.arrival_index)
            .count();
        let truncated: bool = u32::try_from(last_cycle_len).is_ok_and(|n| n < arrival_days);
        if truncated && candidate < closure.end() {
            let Some(resume) = closure.end().next_day() else {
                return Vec::new();
            };
            candidate = resume;
            carry_over = false;
        }
    }

    let mut cohorts: Vec<&ArrivalBatchRecord> = if carry_over {
        history
            .iter()
            .filter(|record| record.check_out_date > candidate)
            .collect()
    } else {
        Vec::new()
    };

    let stay_offset: Duration = Duration::days(i64::from(config.stay_days()) - 1);
    let mut records: Vec<ArrivalBatchRecord> = Vec::new();
    let mut admitted: u32 = 0;
    let mut cycle_occupancy: u32 = 0;

    while admitted < arrival_days {
        let Some(check_out) = candidate.checked_add(stay_offset) else {
            break;
        };
        let stay: DateRange = DateRange::from_ordered(candidate, check_out);

        if let Some(closure) = closure.filter(|closure| stay.intersects(closure)) {
            if admitted > 0 {
                break;
            }
            let Some(resume) = closure.end().next_day() else {
                break;
            };
            candidate = resume;
            cohorts.clear();
            continue;
        }

        if check_out > period.end() {
            break;
        }

        let terms: DayTerms = day_terms(config, &stay);
        let occupied: u32 = in_house(&cohorts, candidate).saturating_add(cycle_occupancy);
        let forbidden: bool = config.forbidden_weekdays().contains(candidate.weekday());
        let fits: bool = occupied.saturating_add(terms.vouchers) <= terms.capacity;

        if !forbidden && fits {
            let day_in_arrival: u32 = admitted + 1;
            let is_last_day: bool = day_in_arrival == arrival_days;

            let mut vouchers: u32 = terms.vouchers;
            let mut occupancy_after: u32 = occupied + vouchers;
            if is_last_day && occupancy_after < terms.capacity {
                vouchers += terms.capacity - occupancy_after;
                occupancy_after = terms.capacity;
            }

            // A day issuing nothing keeps an empty window: `to == from - 1`.
            let voucher_number_end: u64 = next_voucher + u64::from(vouchers);
            records.push(ArrivalBatchRecord {
                arrival_index,
                day_in_arrival,
                check_in_date: candidate,
                check_out_date: check_out,
                vouchers_issued: vouchers,
                occupancy_after,
                effective_capacity: terms.capacity,
                post_cycle_skip_days: if is_last_day {
                    config.sanitary_days()
                } else {
                    0
                },
                voucher_number_from: next_voucher,
                voucher_number_to: voucher_number_end.saturating_sub(1),
            });
            next_voucher = voucher_number_end;
            cycle_occupancy += vouchers;
            admitted = day_in_arrival;
        }

        let Some(next_day) = candidate.next_day() else {
            break;
        };
        candidate = next_day;
    }

    records
}

/// Iterator over the successive cycles of a plan.
///
/// Each item is one non-empty cycle; iteration ends when the generator
/// returns an empty cycle.
#[derive(Debug, Clone)]
pub struct ArrivalCycles<'a> {
    config: &'a PlanConfig,
    history: Vec<ArrivalBatchRecord>,
}

impl<'a> ArrivalCycles<'a> {
    /// Creates an iterator starting from an empty history.
    #[must_use]
    pub const fn new(config: &'a PlanConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
        }
    }

    /// Returns every record produced so far.
    #[must_use]
    pub fn history(&self) -> &[ArrivalBatchRecord] {
        &self.history
    }

    /// Consumes the iterator and returns the accumulated records.
    #[must_use]
    pub fn into_history(self) -> Vec<ArrivalBatchRecord> {
        self.history
    }
}

impl Iterator for ArrivalCycles<'_> {
    type Item = Vec<ArrivalBatchRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let cycle: Vec<ArrivalBatchRecord> = generate_next_arrival(self.config, &self.history);
        if cycle.is_empty() {
            return None;
        }
        self.history.extend(cycle.iter().cloned());
        Some(cycle)
    }
}

/// Generates the whole plan.
///
/// Repeats [`generate_next_arrival`] with the accumulated history until it
/// returns an empty cycle, and returns every record in generation order.
#[must_use]
pub fn generate_plan(config: &PlanConfig) -> Vec<ArrivalBatchRecord> {
    let mut cycles: ArrivalCycles<'_> = ArrivalCycles::new(config);
    cycles.by_ref().for_each(drop);
    cycles.into_history()
}
