// server/src/models/carbon_activity.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the append-only activity log. `kind` and `category` are stored
/// as their wire labels; the domain crate parses them where arithmetic needs
/// the closed enums.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CarbonActivity {
  pub id: Uuid,
  pub user_id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub category: String,
  pub description: String,
  pub amount: f64,
  pub unit: String,
  pub emissions: f64,
  pub is_eco_friendly: bool,
  #[serde(rename = "date")]
  pub occurred_at: DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub product_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

/// Flat row shape for the activity listing's LEFT JOIN onto products.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityWithProductRow {
  pub id: Uuid,
  pub user_id: String,
  pub kind: String,
  pub category: String,
  pub description: String,
  pub amount: f64,
  pub unit: String,
  pub emissions: f64,
  pub is_eco_friendly: bool,
  pub occurred_at: DateTime<Utc>,
  pub product_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub product_name: Option<String>,
  pub product_image: Option<String>,
}

impl ActivityWithProductRow {
  pub fn into_view(self) -> ActivityView {
    let product = match (self.product_name, self.product_image) {
      (Some(name), Some(image)) => Some(LinkedProduct { name, image }),
      _ => None,
    };
    ActivityView {
      id: self.id,
      user_id: self.user_id,
      kind: self.kind,
      category: self.category,
      description: self.description,
      amount: self.amount,
      unit: self.unit,
      emissions: self.emissions,
      is_eco_friendly: self.is_eco_friendly,
      occurred_at: self.occurred_at,
      created_at: self.created_at,
      product,
    }
  }
}

/// Referenced product fields surfaced alongside a purchase activity.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedProduct {
  pub name: String,
  pub image: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
  pub id: Uuid,
  pub user_id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub category: String,
  pub description: String,
  pub amount: f64,
  pub unit: String,
  pub emissions: f64,
  pub is_eco_friendly: bool,
  #[serde(rename = "date")]
  pub occurred_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub product: Option<LinkedProduct>,
}

/// Paginated activity listing payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
  pub activities: Vec<ActivityView>,
  pub current_page: i64,
  pub total_pages: i64,
  pub total_activities: i64,
}
