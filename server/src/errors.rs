// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use shizuka_carbon::CarbonError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  // Unknown kinds, categories, statuses and the like. These come from
  // client input, so they answer as 400 with the parse message.
  #[error("Domain Error: {0}")]
  Domain(#[from] CarbonError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in functions that use `?` on anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<sqlx::Error>() {
      // We already have `From<sqlx::Error>`, but this handles if it was wrapped in anyhow
      return AppError::Sqlx(err.downcast::<sqlx::Error>().unwrap());
    }
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response. Internal detail
    // stays in the logs; clients only ever see a flat `{message}` body.
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({ "message": m })),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({ "message": m })),
      AppError::Domain(e) => HttpResponse::BadRequest().json(json!({ "message": e.to_string() })),
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => {
        HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" }))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
