// server/src/models/carbon_goal.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A reduction goal row. `milestones` holds the serialized milestone array
/// (see `shizuka_carbon::Milestone`); progress fields are maintained by the
/// ledger as matching activities arrive.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CarbonGoal {
  pub id: Uuid,
  pub user_id: String,
  pub title: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub target_reduction: f64,
  pub target_type: String,
  pub category: String,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub status: String,
  pub progress: f64,
  pub current_value: f64,
  pub baseline_value: f64,
  pub milestones: serde_json::Value,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
