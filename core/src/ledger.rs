// src/ledger.rs

//! Profile aggregate arithmetic.
//!
//! Every change to a user's carbon profile is expressed as a [`ProfileDelta`]
//! computed from a single activity. The storage layer applies the delta and
//! the activity row inside one transaction, so the aggregate can only move in
//! step with the log.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::activity::ActivityKind;
use crate::category::is_eco_friendly;

/// A calendar month, the granularity at which profile buckets accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
  pub year: i32,
  pub month: u32,
}

impl MonthPeriod {
  pub fn of(at: DateTime<Utc>) -> Self {
    MonthPeriod {
      year: at.year(),
      month: at.month(),
    }
  }

  pub fn from_date(date: NaiveDate) -> Self {
    MonthPeriod {
      year: date.year(),
      month: date.month(),
    }
  }

  /// Whether the instant falls inside this calendar month.
  pub fn contains(&self, at: DateTime<Utc>) -> bool {
    at.year() == self.year && at.month() == self.month
  }
}

impl fmt::Display for MonthPeriod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}-{:02}", self.year, self.month)
  }
}

/// The exact contribution of one activity to the profile aggregate.
///
/// `emissions` is signed and feeds the month total, the month bucket for
/// `kind`, and the lifetime total alike. `savings` and `eco_products` are
/// only ever non-zero on the recording side: removals reverse totals and
/// counts but never claw back savings or eco-purchase credit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileDelta {
  pub kind: ActivityKind,
  pub emissions: f64,
  pub activities: i64,
  pub savings: f64,
  pub eco_products: i64,
}

impl ProfileDelta {
  /// Delta applied when an activity is recorded.
  ///
  /// Savings accrue when the activity is eco-friendly, whether by computed
  /// negative emissions or by an explicit flag (the purchase path may force
  /// the flag on a positive-emission product). Eco-purchase credit goes to
  /// eco-friendly shopping activities.
  pub fn record(kind: ActivityKind, emissions: f64, eco_flag: bool) -> Self {
    let eco = eco_flag || is_eco_friendly(emissions);
    ProfileDelta {
      kind,
      emissions,
      activities: 1,
      savings: if eco { emissions.abs() } else { 0.0 },
      eco_products: if eco && kind == ActivityKind::Shopping {
        1
      } else {
        0
      },
    }
  }

  /// Delta applied when an activity is deleted. Savings and eco-product
  /// counters stay where they are.
  pub fn removal(kind: ActivityKind, emissions: f64) -> Self {
    ProfileDelta {
      kind,
      emissions: -emissions,
      activities: -1,
      savings: 0.0,
      eco_products: 0,
    }
  }
}

/// Streak length after an activity on `today`, given the previous activity
/// date and the streak it had built. Same-day activity keeps the streak,
/// the next calendar day extends it, anything else starts over at 1.
pub fn streak_after(previous: Option<NaiveDate>, current_streak: i64, today: NaiveDate) -> i64 {
  match previous {
    Some(prev) if prev == today => current_streak.max(1),
    Some(prev) if prev.succ_opt() == Some(today) => current_streak + 1,
    _ => 1,
  }
}
