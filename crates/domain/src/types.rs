// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Weekday};

/// Selects how the number of vouchers issued per check-in day is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// Batch size is driven by the number of arrival days in a cycle.
    ///
    /// Each check-in day receives `bed_capacity / arrival_days` vouchers.
    ArrivalBased,
    /// Batch size is driven by the length of stay.
    ///
    /// Each check-in day receives `bed_capacity / stay_days` vouchers.
    DailyBased,
}

impl PlanType {
    /// Converts this plan type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArrivalBased => "arrival_based",
            Self::DailyBased => "daily_based",
        }
    }
}

impl FromStr for PlanType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrival_based" => Ok(Self::ArrivalBased),
            "daily_based" => Ok(Self::DailyBased),
            _ => Err(DomainError::InvalidParameter {
                field: "plan_type",
                reason: format!("unknown plan type '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inclusive range of calendar dates.
///
/// The start date is never after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    /// The first day of the range (inclusive).
    start: Date,
    /// The last day of the range (inclusive).
    end: Date,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Arguments
    ///
    /// * `start` - The first day of the range (inclusive)
    /// * `end` - The last day of the range (inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        crate::validation::validate_date_range("date_range", start, end)
    }

    /// Builds a range from dates already known to be ordered.
    pub(crate) const fn from_ordered(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns the number of days covered, both ends included.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Returns whether `date` falls within this range.
    #[must_use]
    pub fn contains_date(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns whether `other` lies entirely within this range.
    #[must_use]
    pub fn contains_range(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns whether the two ranges share at least one day.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Bit set covering every day of the week.
const ALL_WEEKDAYS: u8 = 0b0111_1111;

/// The set of weekdays on which no check-in may start.
///
/// Weekdays are addressed by ordinal, `0` for Monday through `6` for
/// Sunday. The ordinal `7` is accepted as the ISO alias of Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ForbiddenWeekdays {
    /// Bit `n` is set when the weekday `n` days from Monday is forbidden.
    mask: u8,
}

impl ForbiddenWeekdays {
    /// Returns an empty set: check-in is allowed on every weekday.
    #[must_use]
    pub const fn none() -> Self {
        Self { mask: 0 }
    }

    /// Builds the set from weekday ordinals.
    ///
    /// Duplicate ordinals are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any ordinal lies outside `0..=7` (`InvalidParameter`)
    /// - The ordinals cover all seven weekdays (`TooRestrictive`)
    pub fn from_ordinals<I>(ordinals: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut mask: u8 = 0;
        for ordinal in ordinals {
            let offset: u8 = match ordinal {
                0..=6 => u8::try_from(ordinal).unwrap_or(6),
                7 => 6,
                _ => {
                    return Err(DomainError::InvalidParameter {
                        field: "forbidden_weekdays",
                        reason: format!("weekday ordinal must be between 0 and 7, got {ordinal}"),
                    });
                }
            };
            mask |= 1 << offset;
        }

        if mask == ALL_WEEKDAYS {
            return Err(DomainError::TooRestrictive {
                field: "forbidden_weekdays",
            });
        }

        Ok(Self { mask })
    }

    /// Returns whether check-in is forbidden on `weekday`.
    #[must_use]
    pub const fn contains(&self, weekday: Weekday) -> bool {
        self.mask & (1 << weekday.number_days_from_monday()) != 0
    }

    /// Returns the forbidden ordinals in ascending order (Monday = 0).
    #[must_use]
    pub fn ordinals(&self) -> Vec<u8> {
        (0..7_u8).filter(|n| self.mask & (1 << n) != 0).collect()
    }

    /// Returns the number of forbidden weekdays.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Returns whether every weekday is open for check-in.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }
}
