// src/impact.rs

//! Purchase impact summaries.
//!
//! Turns the signed emissions of a purchase into the shopper-facing payload:
//! an absolute kg figure, a positive/negative verdict with its message, the
//! tree-year equivalence and an impact band for the storefront to color.

use serde::Serialize;
use std::fmt;

/// Kg of CO2 an average tree absorbs in a year.
pub const TREE_ABSORPTION_KG_PER_YEAR: f64 = 22.0;

/// Trees needed for a year to offset the given emissions, rounded up.
pub fn trees_equivalent(emissions: f64) -> i64 {
  (emissions.abs() / TREE_ABSORPTION_KG_PER_YEAR).ceil() as i64
}

/// Direction of a purchase's footprint contribution. Zero-emission
/// purchases count as negative, matching the shopper-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactKind {
  Positive,
  Negative,
}

/// Severity band for a single purchase, thresholds in kg CO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImpactLevel {
  #[serde(rename = "Positive Impact")]
  Positive,
  #[serde(rename = "Low Impact")]
  Low,
  #[serde(rename = "Medium Impact")]
  Medium,
  #[serde(rename = "High Impact")]
  High,
}

impl ImpactLevel {
  pub fn for_emissions(emissions: f64) -> Self {
    if emissions < 0.0 {
      ImpactLevel::Positive
    } else if emissions < 1.0 {
      ImpactLevel::Low
    } else if emissions < 5.0 {
      ImpactLevel::Medium
    } else {
      ImpactLevel::High
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ImpactLevel::Positive => "Positive Impact",
      ImpactLevel::Low => "Low Impact",
      ImpactLevel::Medium => "Medium Impact",
      ImpactLevel::High => "High Impact",
    }
  }
}

impl fmt::Display for ImpactLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Impact summary returned alongside a recorded purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseImpact {
  /// Absolute kg CO2 moved by the purchase.
  pub emissions: f64,
  #[serde(rename = "type")]
  pub kind: ImpactKind,
  pub message: String,
  pub trees_equivalent: i64,
  pub level: ImpactLevel,
}

impl PurchaseImpact {
  pub fn summarize(emissions: f64) -> Self {
    let kind = if emissions < 0.0 {
      ImpactKind::Positive
    } else {
      ImpactKind::Negative
    };
    let message = match kind {
      ImpactKind::Positive => format!(
        "Great choice! You saved {:.1} kg CO₂ with this eco-friendly purchase.",
        emissions.abs()
      ),
      ImpactKind::Negative => format!(
        "This purchase added {:.1} kg CO₂ to your footprint. Consider eco-alternatives next time.",
        emissions
      ),
    };
    PurchaseImpact {
      emissions: emissions.abs(),
      kind,
      message,
      trees_equivalent: trees_equivalent(emissions),
      level: ImpactLevel::for_emissions(emissions),
    }
  }
}
