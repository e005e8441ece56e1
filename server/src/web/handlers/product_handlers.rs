// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::{CategorySummary, Product};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  pub search: Option<String>,
}

/// In-stock products, optionally narrowed to a category and a free-text
/// search over name, description and category.
#[instrument(name = "handler::list_products", skip(app_state, query))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let category = query.category.as_deref().filter(|c| !c.is_empty());
  let pattern = query
    .search
    .as_deref()
    .filter(|s| !s.is_empty())
    .map(|s| format!("%{}%", s));

  let products: Vec<Product> = sqlx::query_as(
    "SELECT * FROM products \
     WHERE inventory > 0 \
       AND ($1::text IS NULL OR category = $1) \
       AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2 OR category ILIKE $2) \
     ORDER BY created_at DESC",
  )
  .bind(category)
  .bind(pattern)
  .fetch_all(&app_state.db_pool)
  .await?;

  info!(count = products.len(), "Products listed.");
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::featured_products", skip(app_state))]
pub async fn featured_products_handler(
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let products: Vec<Product> =
    sqlx::query_as("SELECT * FROM products WHERE featured ORDER BY created_at DESC")
      .fetch_all(&app_state.db_pool)
      .await?;
  Ok(HttpResponse::Ok().json(products))
}

/// Distinct categories of in-stock products, each with a representative
/// image and a URL slug.
#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let rows: Vec<(String, Option<String>)> = sqlx::query_as(
    "SELECT category, MIN(image) FROM products WHERE inventory > 0 GROUP BY category ORDER BY category",
  )
  .fetch_all(&app_state.db_pool)
  .await?;

  let categories: Vec<CategorySummary> = rows
    .into_iter()
    .map(|(name, image)| CategorySummary::new(name, image))
    .collect();
  Ok(HttpResponse::Ok().json(categories))
}
