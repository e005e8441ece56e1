// server/src/models/carbon_profile.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use shizuka_carbon::{ActivityKind, AchievementRecord, Badge, MonthPeriod};

/// The per-user aggregate row. Month buckets accumulate the calendar month
/// named by `period_year`/`period_month`; lifetime stats never reset.
#[derive(Debug, Clone, FromRow)]
pub struct CarbonProfile {
  pub user_id: String,
  pub period_year: i32,
  pub period_month: i32,
  pub month_total_emissions: f64,
  pub month_transport_emissions: f64,
  pub month_energy_emissions: f64,
  pub month_shopping_emissions: f64,
  pub month_home_emissions: f64,
  pub month_travel_emissions: f64,
  pub month_food_emissions: f64,
  pub month_waste_emissions: f64,
  pub month_carbon_savings: f64,
  pub month_eco_products: i32,
  pub month_activities: i32,
  pub monthly_target: f64,
  pub annual_target: f64,
  pub lifestyle: String,
  pub total_activities: i64,
  pub total_emissions: f64,
  pub total_savings: f64,
  pub best_month_year: Option<i32>,
  pub best_month_month: Option<i32>,
  pub best_month_emissions: Option<f64>,
  pub streak_days: i64,
  pub last_activity_date: Option<NaiveDate>,
  pub achievements: serde_json::Value,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl CarbonProfile {
  pub fn period(&self) -> MonthPeriod {
    MonthPeriod {
      year: self.period_year,
      month: self.period_month as u32,
    }
  }

  pub fn bucket_for(&self, kind: ActivityKind) -> f64 {
    match kind {
      ActivityKind::Transport => self.month_transport_emissions,
      ActivityKind::Energy => self.month_energy_emissions,
      ActivityKind::Shopping => self.month_shopping_emissions,
      ActivityKind::Home => self.month_home_emissions,
      ActivityKind::Travel => self.month_travel_emissions,
      ActivityKind::Food => self.month_food_emissions,
      ActivityKind::Waste => self.month_waste_emissions,
    }
  }

  /// Badges recorded on the profile. A malformed achievements document reads
  /// as no badges rather than failing the request.
  pub fn earned_badges(&self) -> Vec<Badge> {
    serde_json::from_value::<Vec<AchievementRecord>>(self.achievements.clone())
      .map(|records| records.into_iter().map(|r| r.badge).collect())
      .unwrap_or_default()
  }
}

/// Column holding the month bucket for a kind. The closed match keeps the
/// identifier safe to interpolate into SQL.
pub fn month_bucket_column(kind: ActivityKind) -> &'static str {
  match kind {
    ActivityKind::Transport => "month_transport_emissions",
    ActivityKind::Energy => "month_energy_emissions",
    ActivityKind::Shopping => "month_shopping_emissions",
    ActivityKind::Home => "month_home_emissions",
    ActivityKind::Travel => "month_travel_emissions",
    ActivityKind::Food => "month_food_emissions",
    ActivityKind::Waste => "month_waste_emissions",
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthView {
  pub year: i32,
  pub month: i32,
  pub total_emissions: f64,
  pub transport_emissions: f64,
  pub energy_emissions: f64,
  pub shopping_emissions: f64,
  pub home_emissions: f64,
  pub travel_emissions: f64,
  pub food_emissions: f64,
  pub waste_emissions: f64,
  pub carbon_savings: f64,
  pub eco_products_purchased: i32,
  pub activities_count: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsView {
  pub monthly_target: f64,
  pub annual_target: f64,
  pub lifestyle: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMonthView {
  pub year: i32,
  pub month: i32,
  pub emissions: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
  pub total_activities: i64,
  pub total_emissions: f64,
  pub total_savings: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub best_month: Option<BestMonthView>,
  pub streak_days: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_activity_date: Option<NaiveDate>,
}

/// An archived month, read from `carbon_profile_history`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
  pub year: i32,
  pub month: i32,
  pub total_emissions: f64,
  pub carbon_savings: f64,
  pub eco_products: i32,
  pub activities: i32,
  pub goal_achieved: bool,
}

/// The profile as the API serves it: current month buckets, targets,
/// lifetime stats, badges and the archived months.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
  pub user_id: String,
  pub current_month: CurrentMonthView,
  pub goals: GoalsView,
  pub stats: StatsView,
  pub achievements: serde_json::Value,
  pub monthly_history: Vec<HistoryEntry>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl ProfileView {
  pub fn assemble(profile: CarbonProfile, history: Vec<HistoryEntry>) -> Self {
    let best_month = match (
      profile.best_month_year,
      profile.best_month_month,
      profile.best_month_emissions,
    ) {
      (Some(year), Some(month), Some(emissions)) => Some(BestMonthView {
        year,
        month,
        emissions,
      }),
      _ => None,
    };
    ProfileView {
      user_id: profile.user_id,
      current_month: CurrentMonthView {
        year: profile.period_year,
        month: profile.period_month,
        total_emissions: profile.month_total_emissions,
        transport_emissions: profile.month_transport_emissions,
        energy_emissions: profile.month_energy_emissions,
        shopping_emissions: profile.month_shopping_emissions,
        home_emissions: profile.month_home_emissions,
        travel_emissions: profile.month_travel_emissions,
        food_emissions: profile.month_food_emissions,
        waste_emissions: profile.month_waste_emissions,
        carbon_savings: profile.month_carbon_savings,
        eco_products_purchased: profile.month_eco_products,
        activities_count: profile.month_activities,
      },
      goals: GoalsView {
        monthly_target: profile.monthly_target,
        annual_target: profile.annual_target,
        lifestyle: profile.lifestyle,
      },
      stats: StatsView {
        total_activities: profile.total_activities,
        total_emissions: profile.total_emissions,
        total_savings: profile.total_savings,
        best_month,
        streak_days: profile.streak_days,
        last_activity_date: profile.last_activity_date,
      },
      achievements: profile.achievements,
      monthly_history: history,
      created_at: profile.created_at,
      updated_at: profile.updated_at,
    }
  }
}
