// server/src/services/carbon_goals.rs

//! Reduction goals: creation against a fresh baseline, listing with the lazy
//! expiry sweep, and the progress updates the ledger drives as matching
//! activities arrive.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use shizuka_carbon::{
  default_milestones, evaluate_progress, ActivityKind, GoalCategory, GoalStatus, Milestone,
  TargetKind,
};

use crate::errors::{AppError, Result};
use crate::models::CarbonGoal;

/// A validated goal creation request.
#[derive(Debug, Clone)]
pub struct NewGoal {
  pub user_id: String,
  pub title: String,
  pub description: Option<String>,
  pub target_reduction: f64,
  pub target_kind: TargetKind,
  pub category: GoalCategory,
  pub end_date: DateTime<Utc>,
}

/// Creates a goal. The baseline is the category's emission sum for the
/// calendar month of creation, measured at creation time; `current_value`
/// starts at the baseline so a fresh goal reads 0% progress.
#[instrument(name = "carbon_goals::create_goal", skip(pool, new), fields(user_id = %new.user_id, category = %new.category), err(Display))]
pub async fn create_goal(pool: &PgPool, new: NewGoal) -> Result<CarbonGoal> {
  let now = Utc::now();
  let kind_filter: Option<&str> = match new.category {
    GoalCategory::Overall => None,
    scoped => Some(scoped.as_str()),
  };

  let baseline: f64 = sqlx::query_scalar(
    "SELECT COALESCE(SUM(emissions), 0) FROM carbon_activities \
     WHERE user_id = $1 AND occurred_at >= date_trunc('month', $2::timestamptz) \
       AND ($3::text IS NULL OR kind = $3)",
  )
  .bind(&new.user_id)
  .bind(now)
  .bind(kind_filter)
  .fetch_one(pool)
  .await?;

  let milestones = serde_json::to_value(default_milestones())
    .map_err(|e| AppError::Internal(format!("Milestone serialization failed: {}", e)))?;

  let goal = sqlx::query_as::<_, CarbonGoal>(
    "INSERT INTO carbon_goals (id, user_id, title, description, target_reduction, target_type, category, start_date, end_date, status, progress, current_value, baseline_value, milestones, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active', 0, $10, $10, $11, $8, $8) \
     RETURNING *",
  )
  .bind(Uuid::new_v4())
  .bind(&new.user_id)
  .bind(&new.title)
  .bind(&new.description)
  .bind(new.target_reduction)
  .bind(new.target_kind.as_str())
  .bind(new.category.as_str())
  .bind(now)
  .bind(new.end_date)
  .bind(baseline)
  .bind(milestones)
  .fetch_one(pool)
  .await?;

  info!(goal_id = %goal.id, baseline, "Goal created.");
  Ok(goal)
}

/// Lists a user's goals, newest first. Active goals past their end date are
/// marked failed before the listing query runs.
#[instrument(name = "carbon_goals::list_goals", skip(pool), err(Display))]
pub async fn list_goals(
  pool: &PgPool,
  user_id: &str,
  status: Option<GoalStatus>,
) -> Result<Vec<CarbonGoal>> {
  let now = Utc::now();
  let expired = sqlx::query(
    "UPDATE carbon_goals SET status = 'failed', updated_at = $2 \
     WHERE user_id = $1 AND status = 'active' AND end_date < $2",
  )
  .bind(user_id)
  .bind(now)
  .execute(pool)
  .await?;
  if expired.rows_affected() > 0 {
    debug!(count = expired.rows_affected(), "Expired goals marked failed.");
  }

  let goals = sqlx::query_as::<_, CarbonGoal>(
    "SELECT * FROM carbon_goals \
     WHERE user_id = $1 AND ($2::text IS NULL OR status = $2) \
     ORDER BY created_at DESC",
  )
  .bind(user_id)
  .bind(status.map(|s| s.as_str()))
  .fetch_all(pool)
  .await?;

  Ok(goals)
}

/// Applies one activity's emissions to every active goal it matches, inside
/// the caller's transaction. `emissions` is signed: the recording path passes
/// the activity's value, the deletion path its negation. Returns whether any
/// goal reached completion.
pub async fn apply_activity_to_goals(
  tx: &mut Transaction<'_, Postgres>,
  user_id: &str,
  kind: ActivityKind,
  emissions: f64,
  occurred_at: DateTime<Utc>,
  now: DateTime<Utc>,
) -> Result<bool> {
  let goals = sqlx::query_as::<_, CarbonGoal>(
    "SELECT * FROM carbon_goals \
     WHERE user_id = $1 AND status = 'active' AND start_date <= $2 \
     FOR UPDATE",
  )
  .bind(user_id)
  .bind(occurred_at)
  .fetch_all(&mut **tx)
  .await?;

  let mut any_completed = false;
  for goal in goals {
    let category: GoalCategory = goal.category.parse()?;
    if !category.matches(kind) {
      continue;
    }
    let target_kind: TargetKind = goal.target_type.parse()?;
    let mut milestones: Vec<Milestone> =
      serde_json::from_value(goal.milestones.clone()).unwrap_or_else(|_| default_milestones());

    let current = goal.current_value + emissions;
    let evaluation = evaluate_progress(
      goal.baseline_value,
      current,
      target_kind,
      goal.target_reduction,
      &mut milestones,
      now,
    );
    let status = if evaluation.completed {
      GoalStatus::Completed
    } else {
      GoalStatus::Active
    };

    let milestones_json = serde_json::to_value(&milestones)
      .map_err(|e| AppError::Internal(format!("Milestone serialization failed: {}", e)))?;
    sqlx::query(
      "UPDATE carbon_goals SET current_value = $2, progress = $3, milestones = $4, status = $5, updated_at = $6 \
       WHERE id = $1",
    )
    .bind(goal.id)
    .bind(current)
    .bind(evaluation.progress)
    .bind(milestones_json)
    .bind(status.as_str())
    .bind(now)
    .execute(&mut **tx)
    .await?;

    if evaluation.completed {
      info!(goal_id = %goal.id, progress = evaluation.progress, "Goal completed.");
      any_completed = true;
    }
  }

  Ok(any_completed)
}
