// server/src/web/handlers/goal_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

use shizuka_carbon::{GoalCategory, GoalStatus, TargetKind};

use crate::errors::AppError;
use crate::services::carbon_goals::{self, NewGoal};
use crate::state::AppState;
use crate::web::handlers::carbon_handlers::{non_empty, parse_flexible_datetime, resolved_user};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
  pub user_id: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  pub target_reduction: Option<f64>,
  pub target_type: Option<String>,
  pub category: Option<String>,
  pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGoalsQuery {
  pub user_id: Option<String>,
  pub status: Option<String>,
}

#[instrument(name = "handler::create_goal", skip(app_state, payload))]
pub async fn create_goal_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateGoalRequest>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let (user_id, title) = match (non_empty(payload.user_id), non_empty(payload.title)) {
    (Some(user_id), Some(title)) => (user_id, title),
    _ => return Err(AppError::Validation("Missing required fields".to_string())),
  };
  let target_reduction = match payload.target_reduction {
    Some(value) if value != 0.0 => value,
    _ => return Err(AppError::Validation("Missing required fields".to_string())),
  };
  let end_date = match non_empty(payload.end_date) {
    Some(raw) => parse_flexible_datetime(&raw)
      .ok_or_else(|| AppError::Validation("Invalid endDate value".to_string()))?,
    None => return Err(AppError::Validation("Missing required fields".to_string())),
  };

  let target_kind: TargetKind = payload
    .target_type
    .as_deref()
    .filter(|value| !value.is_empty())
    .unwrap_or("percentage")
    .parse()?;
  let category: GoalCategory = payload
    .category
    .as_deref()
    .filter(|value| !value.is_empty())
    .unwrap_or("overall")
    .parse()?;

  let goal = carbon_goals::create_goal(
    &app_state.db_pool,
    NewGoal {
      user_id,
      title,
      description: non_empty(payload.description),
      target_reduction,
      target_kind,
      category,
      end_date,
    },
  )
  .await?;

  Ok(HttpResponse::Created().json(goal))
}

#[instrument(name = "handler::list_goals", skip(app_state, query))]
pub async fn list_goals_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListGoalsQuery>,
) -> Result<HttpResponse, AppError> {
  let user_id = resolved_user(&query.user_id);
  let status = match query.status.as_deref().filter(|label| !label.is_empty()) {
    Some(label) => Some(label.parse::<GoalStatus>()?),
    None => None,
  };
  let goals = carbon_goals::list_goals(&app_state.db_pool, &user_id, status).await?;
  Ok(HttpResponse::Ok().json(goals))
}
