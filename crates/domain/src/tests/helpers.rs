// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ArrivalBatchRecord, DateRange, PlanConfig, PlanType};
use time::macros::date;

/// The reference configuration: 300 beds, 14-day stays, 5 arrival days,
/// planning from January 1 to April 9, 2026.
pub fn reference_config() -> PlanConfig {
    let period: DateRange = DateRange::new(date!(2026 - 01 - 01), date!(2026 - 04 - 09)).unwrap();
    PlanConfig::new(PlanType::ArrivalBased, 300, 14, 5, period).unwrap()
}

/// Asserts the invariants every generated plan must satisfy.
pub fn assert_plan_invariants(config: &PlanConfig, records: &[ArrivalBatchRecord]) {
    let period: DateRange = config.period();
    let mut previous_to: Option<u64> = None;

    for record in records {
        assert!(
            period.contains_range(&record.stay()),
            "stay {} escapes the planning period",
            record.stay()
        );
        if let Some(closure) = config.closure_period() {
            assert!(
                !record.stay().intersects(&closure),
                "stay {} touches the closure",
                record.stay()
            );
        }
        assert!(
            record.occupancy_after <= record.effective_capacity,
            "overbooked: {}/{}",
            record.occupancy_after,
            record.effective_capacity
        );
        assert!(
            !config
                .forbidden_weekdays()
                .contains(record.check_in_date.weekday()),
            "check-in on forbidden weekday {}",
            record.check_in_date
        );
        assert_eq!(
            (record.check_out_date - record.check_in_date).whole_days(),
            i64::from(config.stay_days()) - 1
        );
        // An empty window has `to + 1 == from`.
        assert_eq!(
            record.voucher_number_to + 1 - record.voucher_number_from,
            u64::from(record.vouchers_issued)
        );
        if let Some(to) = previous_to {
            assert_eq!(record.voucher_number_from, to + 1);
        }
        previous_to = Some(record.voucher_number_to);
    }
}
