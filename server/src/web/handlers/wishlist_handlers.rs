// server/src/web/handlers/wishlist_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Product, WishlistItem};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
  pub user_id: Option<String>,
  pub product_id: Option<Uuid>,
}

fn required_pair(payload: &WishlistRequest) -> Result<(String, Uuid), AppError> {
  match (
    payload.user_id.as_deref().filter(|id| !id.is_empty()),
    payload.product_id,
  ) {
    (Some(user_id), Some(product_id)) => Ok((user_id.to_string(), product_id)),
    _ => Err(AppError::Validation(
      "Missing userId or productId".to_string(),
    )),
  }
}

/// Adds the product to the wishlist, or removes it when already present.
#[instrument(name = "handler::toggle_wishlist", skip(app_state, payload))]
pub async fn toggle_wishlist_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<WishlistRequest>,
) -> Result<HttpResponse, AppError> {
  let (user_id, product_id) = required_pair(&payload)?;

  let product: Option<Product> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
    .bind(product_id)
    .fetch_optional(&app_state.db_pool)
    .await?;
  let product = match product {
    Some(product) => product,
    None => {
      warn!(%product_id, "Wishlist toggle for unknown product.");
      return Err(AppError::NotFound("Product not found".to_string()));
    }
  };

  let removed = sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
    .bind(&user_id)
    .bind(product_id)
    .execute(&app_state.db_pool)
    .await?;
  if removed.rows_affected() > 0 {
    info!("Wishlist item removed by toggle.");
    return Ok(HttpResponse::Ok().json(json!({
      "message": "Removed from wishlist",
      "removed": true
    })));
  }

  sqlx::query(
    "INSERT INTO wishlist_items (id, user_id, product_id, name, price_cents, image) \
     VALUES ($1, $2, $3, $4, $5, $6)",
  )
  .bind(Uuid::new_v4())
  .bind(&user_id)
  .bind(product_id)
  .bind(&product.name)
  .bind(product.price_cents)
  .bind(&product.image)
  .execute(&app_state.db_pool)
  .await?;

  info!("Wishlist item added by toggle.");
  Ok(HttpResponse::Created().json(json!({
    "message": "Added to wishlist",
    "removed": false
  })))
}

#[instrument(name = "handler::get_wishlist", skip(app_state, path))]
pub async fn get_wishlist_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let items: Vec<WishlistItem> =
    sqlx::query_as("SELECT * FROM wishlist_items WHERE user_id = $1 ORDER BY added_at DESC")
      .bind(&user_id)
      .fetch_all(&app_state.db_pool)
      .await?;
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::remove_from_wishlist", skip(app_state, payload))]
pub async fn remove_from_wishlist_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<WishlistRequest>,
) -> Result<HttpResponse, AppError> {
  let (user_id, product_id) = required_pair(&payload)?;

  let removed = sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
    .bind(&user_id)
    .bind(product_id)
    .execute(&app_state.db_pool)
    .await?;
  if removed.rows_affected() == 0 {
    return Err(AppError::NotFound("Item not found in wishlist".to_string()));
  }
  info!("Wishlist item removed.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Removed from wishlist" })))
}
