// server/src/models/wishlist_item.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
  pub id: Uuid,
  pub user_id: String,
  pub product_id: Uuid,
  pub name: String,
  pub price_cents: i32,
  pub image: String,
  pub added_at: DateTime<Utc>,
}
