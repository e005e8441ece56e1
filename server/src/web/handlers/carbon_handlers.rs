// server/src/web/handlers/carbon_handlers.rs

//! Handlers for the carbon API: profile, activities, dashboard, purchase
//! impact and insights. Validation mirrors the original wire contract:
//! missing fields answer a static 400 message, unknown enum labels surface
//! the domain parse error as a 400.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use shizuka_carbon::{ActivityKind, EmissionCategory, PurchaseImpact, ShoppingCategory};

use crate::errors::AppError;
use crate::models::ProfileView;
use crate::services::carbon_ledger::{self, NewActivity};
use crate::services::carbon_reports::{self, ActivityFilter};
use crate::state::AppState;

/// Shared demo identity the original frontend falls back to when nobody is
/// signed in. Reads resolve to it rather than failing.
pub(crate) const DEFAULT_USER_ID: &str = "default_user_id";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
  pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActivityRequest {
  pub user_id: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
  pub category: Option<String>,
  pub description: Option<String>,
  pub amount: Option<f64>,
  pub unit: Option<String>,
  pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivitiesQuery {
  pub user_id: Option<String>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseImpactRequest {
  pub user_id: Option<String>,
  pub product_id: Option<Uuid>,
  pub product_name: Option<String>,
  pub product_category: Option<String>,
  pub quantity: Option<f64>,
  pub is_eco_friendly: Option<bool>,
}

#[instrument(name = "handler::get_carbon_profile", skip(app_state, query))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
  let user_id = resolved_user(&query.user_id);
  let profile = carbon_ledger::fetch_or_create_profile(&app_state.db_pool, &user_id).await?;
  let history = carbon_ledger::fetch_history(&app_state.db_pool, &user_id).await?;
  Ok(HttpResponse::Ok().json(ProfileView::assemble(profile, history)))
}

#[instrument(name = "handler::rebuild_carbon_profile", skip(app_state, query))]
pub async fn rebuild_profile_handler(
  app_state: web::Data<AppState>,
  query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
  let user_id = resolved_user(&query.user_id);
  let profile = carbon_ledger::rebuild_profile(&app_state.db_pool, &user_id).await?;
  let history = carbon_ledger::fetch_history(&app_state.db_pool, &user_id).await?;
  Ok(HttpResponse::Ok().json(ProfileView::assemble(profile, history)))
}

#[instrument(name = "handler::record_activity", skip(app_state, payload))]
pub async fn record_activity_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<RecordActivityRequest>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let (user_id, kind_label, category_label, description) = match (
    non_empty(payload.user_id),
    non_empty(payload.kind),
    non_empty(payload.category),
    non_empty(payload.description),
  ) {
    (Some(user_id), Some(kind), Some(category), Some(description)) => {
      (user_id, kind, category, description)
    }
    _ => return Err(missing_fields()),
  };
  // Zero is a legitimate amount (a walk, a zero-rated purchase); only its
  // absence fails validation.
  let amount = match payload.amount {
    Some(amount) => amount,
    None => return Err(missing_fields()),
  };

  let kind: ActivityKind = kind_label.parse()?;
  let category = EmissionCategory::parse(kind, &category_label)?;
  let emissions = category.emissions_for(amount);

  let activity = carbon_ledger::record_activity(
    &app_state.db_pool,
    NewActivity {
      user_id,
      kind,
      category_label: category.label().to_string(),
      description,
      amount,
      unit: non_empty(payload.unit).unwrap_or_else(|| "unit".to_string()),
      emissions,
      eco_override: false,
      product_id: payload.product_id,
    },
  )
  .await?;

  Ok(HttpResponse::Created().json(activity))
}

#[instrument(name = "handler::list_activities", skip(app_state, query))]
pub async fn list_activities_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListActivitiesQuery>,
) -> Result<HttpResponse, AppError> {
  let user_id = resolved_user(&query.user_id);
  let kind = match query.kind.as_deref().filter(|label| !label.is_empty()) {
    Some(label) => Some(label.parse::<ActivityKind>()?),
    None => None,
  };
  let filter = ActivityFilter {
    kind,
    start_date: parse_date_param(query.start_date.as_deref(), "startDate")?,
    end_date: parse_date_param(query.end_date.as_deref(), "endDate")?,
    page: query.page.unwrap_or(1),
    limit: query.limit.unwrap_or(20),
  };

  let page = carbon_reports::list_activities(&app_state.db_pool, &user_id, filter).await?;
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::carbon_dashboard", skip(app_state, query))]
pub async fn dashboard_handler(
  app_state: web::Data<AppState>,
  query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
  let user_id = resolved_user(&query.user_id);
  let dashboard = carbon_reports::dashboard(&app_state.db_pool, &user_id).await?;
  Ok(HttpResponse::Ok().json(dashboard))
}

/// Records a purchase as a shopping activity and answers with the activity
/// plus its impact summary.
#[instrument(name = "handler::purchase_impact", skip(app_state, payload))]
pub async fn purchase_impact_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<PurchaseImpactRequest>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let (user_id, product_name, category_label) = match (
    non_empty(payload.user_id),
    non_empty(payload.product_name),
    non_empty(payload.product_category),
  ) {
    (Some(user_id), Some(name), Some(category)) => (user_id, name, category),
    _ => return Err(missing_fields()),
  };
  let quantity = match payload.quantity {
    Some(quantity) if quantity != 0.0 => quantity,
    _ => return Err(missing_fields()),
  };

  let category: ShoppingCategory = category_label.parse()?;
  let emissions = category.factor() * quantity;
  let description = format!("Purchased {} ({} items)", product_name, quantity);

  let activity = carbon_ledger::record_activity(
    &app_state.db_pool,
    NewActivity {
      user_id,
      kind: ActivityKind::Shopping,
      category_label: category.as_str().to_string(),
      description,
      amount: quantity,
      unit: "items".to_string(),
      emissions,
      eco_override: payload.is_eco_friendly.unwrap_or(false),
      product_id: payload.product_id,
    },
  )
  .await?;
  let impact = PurchaseImpact::summarize(emissions);

  Ok(HttpResponse::Created().json(json!({ "activity": activity, "impact": impact })))
}

#[instrument(name = "handler::carbon_insights", skip(app_state, query))]
pub async fn insights_handler(
  app_state: web::Data<AppState>,
  query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
  let user_id = resolved_user(&query.user_id);
  let report = carbon_reports::insights(&app_state.db_pool, &user_id).await?;
  Ok(HttpResponse::Ok().json(report))
}

#[instrument(name = "handler::delete_activity", skip(app_state, path, query))]
pub async fn delete_activity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
  let activity_id = path.into_inner();
  let user_id = resolved_user(&query.user_id);
  let deleted = carbon_ledger::delete_activity(&app_state.db_pool, &user_id, activity_id).await?;
  if !deleted {
    return Err(AppError::NotFound("Activity not found".to_string()));
  }
  Ok(HttpResponse::Ok().json(json!({ "message": "Activity deleted successfully" })))
}

fn missing_fields() -> AppError {
  AppError::Validation("Missing required fields".to_string())
}

/// Treats absent and empty-string fields the same, as the original API did.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|value| !value.is_empty())
}

pub(crate) fn resolved_user(user_id: &Option<String>) -> String {
  user_id
    .as_deref()
    .filter(|id| !id.is_empty())
    .unwrap_or(DEFAULT_USER_ID)
    .to_string()
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (read as midnight
/// UTC), the two formats the frontend sends.
pub(crate) fn parse_flexible_datetime(raw: &str) -> Option<DateTime<Utc>> {
  if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
    return Some(parsed.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_date_param(raw: Option<&str>, name: &str) -> Result<Option<DateTime<Utc>>, AppError> {
  match raw.filter(|value| !value.is_empty()) {
    None => Ok(None),
    Some(value) => parse_flexible_datetime(value)
      .map(Some)
      .ok_or_else(|| AppError::Validation(format!("Invalid {} value", name))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Timelike;

  #[test]
  fn test_parses_rfc3339_timestamps() {
    let parsed = parse_flexible_datetime("2025-03-04T10:30:00Z").unwrap();
    assert_eq!(parsed.hour(), 10);
    assert_eq!(parsed.minute(), 30);
  }

  #[test]
  fn test_parses_bare_dates_as_midnight_utc() {
    let parsed = parse_flexible_datetime("2025-03-04").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-03-04T00:00:00+00:00");
  }

  #[test]
  fn test_offset_timestamps_normalize_to_utc() {
    let parsed = parse_flexible_datetime("2025-03-04T05:30:00+05:30").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-03-04T00:00:00+00:00");
  }

  #[test]
  fn test_rejects_garbage_dates() {
    assert!(parse_flexible_datetime("yesterday").is_none());
    assert!(parse_flexible_datetime("04/03/2025").is_none());
  }

  #[test]
  fn test_empty_user_falls_back_to_default() {
    assert_eq!(resolved_user(&None), DEFAULT_USER_ID);
    assert_eq!(resolved_user(&Some(String::new())), DEFAULT_USER_ID);
    assert_eq!(resolved_user(&Some("u-7".to_string())), "u-7");
  }
}
