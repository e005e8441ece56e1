// src/report.rs

//! Derived, stateless views over activity slices.
//!
//! Everything here recomputes from a fetched slice of the log on each call:
//! the dashboard's month snapshot, the 30-day per-kind breakdown, insight
//! generation and tips. None of it reads or writes the profile aggregate, so
//! a snapshot can legitimately disagree with the ledger by exactly the
//! contribution of activities outside the fetched window.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::activity::ActivityKind;

/// Read-side view of one logged activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityObservation {
  pub kind: ActivityKind,
  pub emissions: f64,
  pub is_eco_friendly: bool,
}

/// Positive/negative split over a fetched slice, the dashboard's month
/// stats. Gross emissions and savings are reported separately rather than
/// netted: `total_emissions` sums only positive values, `saved_emissions`
/// the magnitudes of negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
  pub total_emissions: f64,
  pub saved_emissions: f64,
  pub eco_products_purchased: i64,
  pub activities_count: i64,
}

impl MonthlySnapshot {
  pub fn from_observations(observations: &[ActivityObservation]) -> Self {
    let mut snapshot = MonthlySnapshot {
      total_emissions: 0.0,
      saved_emissions: 0.0,
      eco_products_purchased: 0,
      activities_count: observations.len() as i64,
    };
    for observation in observations {
      snapshot.total_emissions += observation.emissions.max(0.0);
      snapshot.saved_emissions += observation.emissions.min(0.0).abs();
      if observation.is_eco_friendly && observation.kind == ActivityKind::Shopping {
        snapshot.eco_products_purchased += 1;
      }
    }
    snapshot
  }
}

/// Per-kind accumulation over a slice: gross emissions, gross savings and
/// the activity count.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KindBreakdown {
  pub emissions: f64,
  pub count: i64,
  pub savings: f64,
}

/// Buckets a slice by kind. Only kinds present in the slice appear; the map
/// serializes with the kind's snake_case label as the key.
pub fn category_breakdown(
  observations: &[ActivityObservation],
) -> BTreeMap<ActivityKind, KindBreakdown> {
  let mut breakdown: BTreeMap<ActivityKind, KindBreakdown> = BTreeMap::new();
  for observation in observations {
    let entry = breakdown.entry(observation.kind).or_default();
    entry.emissions += observation.emissions.max(0.0);
    entry.savings += observation.emissions.min(0.0).abs();
    entry.count += 1;
  }
  breakdown
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
  HighImpact,
  PositiveTrend,
}

/// One generated insight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
  #[serde(rename = "type")]
  pub kind: InsightKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<ActivityKind>,
  pub message: String,
  pub recommendation: String,
  pub priority: &'static str,
}

/// Insight rules over a chronologically ordered slice.
///
/// Any kind carrying more than 30% of the slice's gross emissions yields a
/// high-impact insight. Five or more eco-friendly activities among the last
/// ten yield a positive-trend insight. An empty or all-zero slice yields no
/// percentage insights rather than dividing by zero.
pub fn generate_insights(observations: &[ActivityObservation]) -> Vec<Insight> {
  let breakdown = category_breakdown(observations);
  let total: f64 = breakdown.values().map(|entry| entry.emissions).sum();

  let mut insights = Vec::new();
  if total > 0.0 {
    for (kind, entry) in &breakdown {
      let percentage = entry.emissions / total * 100.0;
      if percentage > 30.0 {
        insights.push(Insight {
          kind: InsightKind::HighImpact,
          category: Some(*kind),
          message: format!(
            "{} accounts for {:.1}% of your carbon footprint",
            kind, percentage
          ),
          recommendation: format!("Consider eco-friendly alternatives for {} activities", kind),
          priority: "high",
        });
      }
    }
  }

  let recent = &observations[observations.len().saturating_sub(10)..];
  let eco_count = recent
    .iter()
    .filter(|observation| observation.is_eco_friendly)
    .count();
  if eco_count >= 5 {
    insights.push(Insight {
      kind: InsightKind::PositiveTrend,
      category: None,
      message: "Great job! You've made several eco-friendly choices recently".to_string(),
      recommendation: "Keep up the sustainable lifestyle!".to_string(),
      priority: "positive",
    });
  }

  insights
}

/// The full insights payload over a trailing 30-day slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
  pub category_breakdown: BTreeMap<ActivityKind, KindBreakdown>,
  pub insights: Vec<Insight>,
  pub total_emissions: f64,
  pub total_savings: f64,
  pub period: &'static str,
}

impl InsightReport {
  pub fn over_thirty_days(observations: &[ActivityObservation]) -> Self {
    let breakdown = category_breakdown(observations);
    let total_emissions = breakdown.values().map(|entry| entry.emissions).sum();
    let total_savings = breakdown.values().map(|entry| entry.savings).sum();
    InsightReport {
      insights: generate_insights(observations),
      category_breakdown: breakdown,
      total_emissions,
      total_savings,
      period: "30 days",
    }
  }
}

/// A behavioral tip surfaced on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
  pub category: &'static str,
  pub tip: &'static str,
  pub icon: &'static str,
  pub priority: &'static str,
}

/// Tips derived from the profile's month block. Empty when nothing stands
/// out; callers fall back to [`default_tips`].
pub fn personalized_tips(
  transport_emissions: f64,
  energy_emissions: f64,
  total_emissions: f64,
  carbon_savings: f64,
) -> Vec<Tip> {
  let mut tips = Vec::new();
  if transport_emissions > total_emissions * 0.4 {
    tips.push(Tip {
      category: "transport",
      tip: "Your transport emissions are high. Consider carpooling, public transport, or cycling.",
      icon: "car",
      priority: "high",
    });
  }
  if energy_emissions > total_emissions * 0.3 {
    tips.push(Tip {
      category: "energy",
      tip: "Switch to renewable energy sources or invest in energy-efficient appliances.",
      icon: "bolt",
      priority: "medium",
    });
  }
  if carbon_savings < 50.0 {
    tips.push(Tip {
      category: "shopping",
      tip: "Choose more eco-friendly products to increase your carbon savings.",
      icon: "shopping-cart",
      priority: "medium",
    });
  }
  tips
}

/// The two standing tips shown when nothing personalized applies.
pub fn default_tips() -> Vec<Tip> {
  vec![
    Tip {
      category: "transport",
      tip: "Consider using public transport or cycling for short trips",
      icon: "car",
      priority: "medium",
    },
    Tip {
      category: "shopping",
      tip: "Choose sustainable products to reduce your carbon footprint",
      icon: "shopping-cart",
      priority: "high",
    },
  ]
}
