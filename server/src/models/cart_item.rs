// server/src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A cart line. Name, price and image are denormalized from the product at
/// add time so the cart renders without a join.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub id: Uuid,
  pub user_id: String,
  pub product_id: Uuid,
  pub name: String,
  pub price_cents: i32,
  pub mrp_cents: i32,
  pub discount: Option<String>,
  pub image: String,
  pub rating: f64,
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
}
