// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers across the test binaries

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use shizuka_carbon::{ActivityKind, ActivityObservation};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Tolerance for float assertions; factor products carry f64 noise
/// (-2.1 * 3 is -6.300000000000001).
pub const EPSILON: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < EPSILON,
    "expected {expected}, got {actual}"
  );
}

/// Observation with the eco flag derived from the sign, as activity
/// recording does.
pub fn obs(kind: ActivityKind, emissions: f64) -> ActivityObservation {
  ActivityObservation {
    kind,
    emissions,
    is_eco_friendly: emissions < 0.0,
  }
}

/// Observation with the eco flag forced on, as the purchase override does.
pub fn eco_obs(kind: ActivityKind, emissions: f64) -> ActivityObservation {
  ActivityObservation {
    kind,
    emissions,
    is_eco_friendly: true,
  }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}
