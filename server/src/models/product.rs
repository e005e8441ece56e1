// server/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub image: String,
  pub price_cents: i32,
  pub mrp_cents: i32,
  pub discount: Option<String>,
  pub category: String,
  pub inventory: i32,
  pub featured: bool,
  pub rating: f64,
  pub rating_count: i32,
  pub emissions_factor: f64,
  pub is_eco_friendly: bool,
  pub carbon_savings: f64,
  pub sustainability_score: i16,
  pub materials: Vec<String>,
  pub certifications: Vec<String>,
  pub created_at: DateTime<Utc>,
}

/// One row of the category listing: the display name, a representative
/// image and a URL-safe slug derived from the name.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
  pub name: String,
  pub image: String,
  pub slug: String,
}

impl CategorySummary {
  pub fn new(name: String, image: Option<String>) -> Self {
    let slug = name.to_lowercase().replace(' ', "-");
    Self {
      image: image.unwrap_or_else(|| "/images/default.jpg".to_string()),
      name,
      slug,
    }
  }
}
