// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Starting voucher numbers.
//!
//! Voucher numbers are unique per sanatorium across plans. A new plan starts
//! one past the highest number already issued for its sanatorium.

use std::collections::HashMap;

/// Source of the last voucher number issued for a sanatorium.
pub trait VoucherSeedSource {
    /// Returns the highest voucher number issued for `sanatorium_id`, if any.
    fn last_issued(&self, sanatorium_id: i64) -> Option<u64>;
}

/// Returns the first voucher number of the next plan for `sanatorium_id`.
///
/// Defaults to 1 when the source knows no earlier voucher.
#[must_use]
pub fn next_voucher_number<S: VoucherSeedSource + ?Sized>(source: &S, sanatorium_id: i64) -> u64 {
    source
        .last_issued(sanatorium_id)
        .map_or(1, |last| last.saturating_add(1))
}

/// A seed source with no history: every plan starts at voucher 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVoucherHistory;

impl VoucherSeedSource for NoVoucherHistory {
    fn last_issued(&self, _sanatorium_id: i64) -> Option<u64> {
        None
    }
}

/// In-memory record of the highest voucher issued per sanatorium.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryVoucherRegistry {
    last_issued: HashMap<i64, u64>,
}

impl InMemoryVoucherRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `voucher_number` was issued for `sanatorium_id`.
    ///
    /// The registry only moves forward; a lower number is ignored.
    pub fn record_issued(&mut self, sanatorium_id: i64, voucher_number: u64) {
        let entry: &mut u64 = self.last_issued.entry(sanatorium_id).or_insert(0);
        *entry = (*entry).max(voucher_number);
    }

    /// Returns the number of sanatoriums with recorded vouchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.last_issued.len()
    }

    /// Returns whether no voucher has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_issued.is_empty()
    }
}

impl VoucherSeedSource for InMemoryVoucherRegistry {
    fn last_issued(&self, sanatorium_id: i64) -> Option<u64> {
        self.last_issued.get(&sanatorium_id).copied()
    }
}
