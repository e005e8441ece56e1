// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CartItem, Product};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
  pub user_id: Option<String>,
  pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
  pub user_id: Option<String>,
  pub product_id: Option<Uuid>,
  pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
  pub user_id: Option<String>,
}

fn required_pair(user_id: &Option<String>, product_id: &Option<Uuid>) -> Result<(), AppError> {
  let missing_user = user_id.as_deref().map_or(true, |id| id.is_empty());
  if missing_user || product_id.is_none() {
    return Err(AppError::Validation(
      "Missing userId or productId".to_string(),
    ));
  }
  Ok(())
}

/// Adds a product to the cart. An existing line bumps its quantity by one
/// instead of duplicating.
#[instrument(name = "handler::add_to_cart", skip(app_state, payload))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
  required_pair(&payload.user_id, &payload.product_id)?;
  let user_id = payload.user_id.clone().unwrap_or_default();
  let product_id = payload.product_id.unwrap_or_default();

  let product: Option<Product> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
    .bind(product_id)
    .fetch_optional(&app_state.db_pool)
    .await?;
  let product = match product {
    Some(product) => product,
    None => {
      warn!(%product_id, "Add to cart for unknown product.");
      return Err(AppError::NotFound("Product not found!".to_string()));
    }
  };

  let bumped: Option<CartItem> = sqlx::query_as(
    "UPDATE cart_items SET quantity = quantity + 1 \
     WHERE user_id = $1 AND product_id = $2 \
     RETURNING *",
  )
  .bind(&user_id)
  .bind(product_id)
  .fetch_optional(&app_state.db_pool)
  .await?;
  if let Some(cart_item) = bumped {
    info!(quantity = cart_item.quantity, "Cart quantity increased.");
    return Ok(HttpResponse::Ok().json(json!({
      "message": "Cart updated: Quantity increased!",
      "cartItem": cart_item
    })));
  }

  let cart_item: CartItem = sqlx::query_as(
    "INSERT INTO cart_items (id, user_id, product_id, name, price_cents, mrp_cents, discount, image, rating, quantity) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1) \
     RETURNING *",
  )
  .bind(Uuid::new_v4())
  .bind(&user_id)
  .bind(product_id)
  .bind(&product.name)
  .bind(product.price_cents)
  .bind(product.mrp_cents)
  .bind(&product.discount)
  .bind(&product.image)
  .bind(product.rating)
  .fetch_one(&app_state.db_pool)
  .await?;

  info!("Item added to cart.");
  Ok(HttpResponse::Created().json(json!({
    "message": "Item added to cart!",
    "cartItem": cart_item
  })))
}

/// Sets a cart line's quantity. Zero removes the line; negatives are
/// rejected.
#[instrument(name = "handler::update_cart", skip(app_state, payload))]
pub async fn update_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<UpdateCartRequest>,
) -> Result<HttpResponse, AppError> {
  required_pair(&payload.user_id, &payload.product_id)?;
  let quantity = match payload.quantity {
    Some(quantity) => quantity,
    None => {
      return Err(AppError::Validation(
        "Missing userId or productId".to_string(),
      ))
    }
  };
  if quantity < 0 {
    return Err(AppError::Validation(
      "Quantity cannot be negative!".to_string(),
    ));
  }
  let user_id = payload.user_id.clone().unwrap_or_default();
  let product_id = payload.product_id.unwrap_or_default();

  if quantity == 0 {
    let removed = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
      .bind(&user_id)
      .bind(product_id)
      .execute(&app_state.db_pool)
      .await?;
    if removed.rows_affected() == 0 {
      return Err(AppError::NotFound("Item not found in cart!".to_string()));
    }
    info!("Cart item removed via zero quantity.");
    return Ok(HttpResponse::Ok().json(json!({ "message": "Item removed from cart!" })));
  }

  let updated: Option<CartItem> = sqlx::query_as(
    "UPDATE cart_items SET quantity = $3 \
     WHERE user_id = $1 AND product_id = $2 \
     RETURNING *",
  )
  .bind(&user_id)
  .bind(product_id)
  .bind(quantity)
  .fetch_optional(&app_state.db_pool)
  .await?;
  match updated {
    Some(cart_item) => {
      info!(quantity, "Cart quantity set.");
      Ok(HttpResponse::Ok().json(json!({
        "message": "Cart updated successfully!",
        "cartItem": cart_item
      })))
    }
    None => Err(AppError::NotFound("Item not found in cart!".to_string())),
  }
}

#[instrument(name = "handler::get_cart", skip(app_state, path))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let items: Vec<CartItem> =
    sqlx::query_as("SELECT * FROM cart_items WHERE user_id = $1 ORDER BY added_at DESC")
      .bind(&user_id)
      .fetch_all(&app_state.db_pool)
      .await?;
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, path, payload))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<RemoveFromCartRequest>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let user_id = match payload.user_id.as_deref().filter(|id| !id.is_empty()) {
    Some(user_id) => user_id.to_string(),
    None => {
      return Err(AppError::Validation(
        "Missing userId or productId".to_string(),
      ))
    }
  };

  let removed = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
    .bind(&user_id)
    .bind(product_id)
    .execute(&app_state.db_pool)
    .await?;
  if removed.rows_affected() == 0 {
    return Err(AppError::NotFound("Item not found in cart!".to_string()));
  }
  info!("Cart item removed.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Item removed from cart!" })))
}
