// src/profile.rs

//! Profile defaults, lifestyle targets and achievement badges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CarbonError;

/// Monthly kg CO2 target a fresh profile starts with.
pub const DEFAULT_MONTHLY_TARGET: f64 = 1000.0;
/// Annual kg CO2 target a fresh profile starts with.
pub const DEFAULT_ANNUAL_TARGET: f64 = 12000.0;

/// Self-declared lifestyle, mapped to a suggested monthly target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
  Minimal,
  #[default]
  Moderate,
  Active,
}

impl Lifestyle {
  pub fn monthly_target(&self) -> f64 {
    match self {
      Lifestyle::Minimal => 800.0,
      Lifestyle::Moderate => 1000.0,
      Lifestyle::Active => 1200.0,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Lifestyle::Minimal => "minimal",
      Lifestyle::Moderate => "moderate",
      Lifestyle::Active => "active",
    }
  }
}

impl fmt::Display for Lifestyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Lifestyle {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "minimal" => Ok(Lifestyle::Minimal),
      "moderate" => Ok(Lifestyle::Moderate),
      "active" => Ok(Lifestyle::Active),
      other => Err(CarbonError::UnknownLifestyle(other.to_string())),
    }
  }
}

/// Achievement badges a profile can carry. The ledger awards the first four
/// from aggregates it maintains; the rest are reserved names a future
/// campaign can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
  FirstWeek,
  GoalAchiever,
  EcoShopper,
  CarbonSaver,
  GreenTransport,
  EnergyEfficient,
  TreePlanter,
  SustainabilityChampion,
}

impl Badge {
  pub const ALL: [Badge; 8] = [
    Badge::FirstWeek,
    Badge::GoalAchiever,
    Badge::EcoShopper,
    Badge::CarbonSaver,
    Badge::GreenTransport,
    Badge::EnergyEfficient,
    Badge::TreePlanter,
    Badge::SustainabilityChampion,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Badge::FirstWeek => "first_week",
      Badge::GoalAchiever => "goal_achiever",
      Badge::EcoShopper => "eco_shopper",
      Badge::CarbonSaver => "carbon_saver",
      Badge::GreenTransport => "green_transport",
      Badge::EnergyEfficient => "energy_efficient",
      Badge::TreePlanter => "tree_planter",
      Badge::SustainabilityChampion => "sustainability_champion",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Badge::FirstWeek => "Logged an activity every day for a week",
      Badge::GoalAchiever => "Completed a carbon reduction goal",
      Badge::EcoShopper => "Bought 10 eco-friendly products in one month",
      Badge::CarbonSaver => "Saved more than 100 kg of CO₂",
      Badge::GreenTransport => "Favors zero-emission transport",
      Badge::EnergyEfficient => "Keeps household energy emissions low",
      Badge::TreePlanter => "Offset emissions worth a grove of trees",
      Badge::SustainabilityChampion => "Earned every other badge",
    }
  }
}

impl fmt::Display for Badge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A badge as stored on the profile, with when and why it was earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
  #[serde(rename = "type")]
  pub badge: Badge,
  pub earned_at: DateTime<Utc>,
  pub description: String,
}

impl AchievementRecord {
  pub fn new(badge: Badge, earned_at: DateTime<Utc>) -> Self {
    AchievementRecord {
      badge,
      earned_at,
      description: badge.description().to_string(),
    }
  }
}

/// Aggregate readings badge awards are judged against, taken after the
/// current activity's delta has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BadgeSignals {
  pub streak_days: i64,
  pub month_eco_products: i64,
  pub total_savings: f64,
  pub goal_completed: bool,
}

/// Badges the signals justify that the profile does not already hold.
pub fn newly_earned(earned: &[Badge], signals: BadgeSignals) -> Vec<Badge> {
  let candidates = [
    (Badge::FirstWeek, signals.streak_days >= 7),
    (Badge::EcoShopper, signals.month_eco_products >= 10),
    (Badge::CarbonSaver, signals.total_savings >= 100.0),
    (Badge::GoalAchiever, signals.goal_completed),
  ];
  let mut awarded = Vec::new();
  for (badge, qualifies) in candidates {
    if qualifies && !earned.contains(&badge) {
      tracing::debug!(target: "carbon_badges", badge = %badge, "badge earned");
      awarded.push(badge);
    }
  }
  awarded
}
