// server/src/services/carbon_ledger.rs

//! The transactional write path for the carbon ledger.
//!
//! Recording an activity inserts the log row and applies its
//! [`ProfileDelta`] to the profile aggregate in a single transaction, along
//! with the month rollover, streak, goal progress and badge awards that flow
//! from it. Nothing here updates the profile outside a transaction, so the
//! aggregate can only move in step with the log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use shizuka_carbon::{
  is_eco_friendly, newly_earned, streak_after, AchievementRecord, ActivityKind, Badge,
  BadgeSignals, MonthPeriod, ProfileDelta, DEFAULT_ANNUAL_TARGET, DEFAULT_MONTHLY_TARGET,
};

use crate::errors::{AppError, Result};
use crate::models::{month_bucket_column, CarbonActivity, CarbonProfile, HistoryEntry};
use crate::services::carbon_goals;

/// A validated activity ready to be recorded. `emissions` is already
/// resolved from the category factor table by the caller.
#[derive(Debug, Clone)]
pub struct NewActivity {
  pub user_id: String,
  pub kind: ActivityKind,
  pub category_label: String,
  pub description: String,
  pub amount: f64,
  pub unit: String,
  pub emissions: f64,
  /// Caller-asserted eco flag; the purchase path may force it on a
  /// positive-emission product. Negative emissions imply it regardless.
  pub eco_override: bool,
  pub product_id: Option<Uuid>,
}

/// Records an activity and applies its full profile contribution.
///
/// One transaction covers the log insert, the profile upsert and rollover,
/// the delta, the streak, goal progress on every matching active goal, and
/// any badge that the updated aggregates justify.
#[instrument(
  name = "carbon_ledger::record_activity",
  skip(pool, new),
  fields(user_id = %new.user_id, kind = %new.kind),
  err(Display)
)]
pub async fn record_activity(pool: &PgPool, new: NewActivity) -> Result<CarbonActivity> {
  let now = Utc::now();
  let eco = new.eco_override || is_eco_friendly(new.emissions);
  let mut tx = pool.begin().await?;

  let activity = sqlx::query_as::<_, CarbonActivity>(
    "INSERT INTO carbon_activities (id, user_id, kind, category, description, amount, unit, emissions, is_eco_friendly, occurred_at, product_id, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $10) \
     RETURNING *",
  )
  .bind(Uuid::new_v4())
  .bind(&new.user_id)
  .bind(new.kind.as_str())
  .bind(&new.category_label)
  .bind(&new.description)
  .bind(new.amount)
  .bind(&new.unit)
  .bind(new.emissions)
  .bind(eco)
  .bind(now)
  .bind(new.product_id)
  .fetch_one(&mut *tx)
  .await?;

  let profile = ensure_profile(&mut tx, &new.user_id, now).await?;
  let delta = ProfileDelta::record(new.kind, new.emissions, eco);

  let goal_completed =
    carbon_goals::apply_activity_to_goals(&mut tx, &new.user_id, new.kind, new.emissions, now, now)
      .await?;

  let streak = streak_after(profile.last_activity_date, profile.streak_days, now.date_naive());
  let signals = BadgeSignals {
    streak_days: streak,
    month_eco_products: profile.month_eco_products as i64 + delta.eco_products,
    total_savings: profile.total_savings + delta.savings,
    goal_completed,
  };
  let new_badges = newly_earned(&profile.earned_badges(), signals);
  let achievements = if new_badges.is_empty() {
    profile.achievements.clone()
  } else {
    with_new_badges(&profile, &new_badges, now)?
  };

  let update = format!(
    "UPDATE carbon_profiles SET \
       month_total_emissions = month_total_emissions + $2, \
       {bucket} = {bucket} + $2, \
       month_carbon_savings = month_carbon_savings + $3, \
       month_eco_products = month_eco_products + $4, \
       month_activities = month_activities + $5, \
       total_activities = total_activities + $6, \
       total_emissions = total_emissions + $2, \
       total_savings = total_savings + $3, \
       streak_days = $7, \
       last_activity_date = $8, \
       achievements = $9, \
       updated_at = $10 \
     WHERE user_id = $1",
    bucket = month_bucket_column(delta.kind),
  );
  sqlx::query(&update)
    .bind(&new.user_id)
    .bind(delta.emissions)
    .bind(delta.savings)
    .bind(delta.eco_products as i32)
    .bind(delta.activities as i32)
    .bind(delta.activities)
    .bind(streak)
    .bind(now.date_naive())
    .bind(&achievements)
    .bind(now)
    .execute(&mut *tx)
    .await?;

  tx.commit().await?;
  info!(activity_id = %activity.id, emissions = activity.emissions, "Activity recorded.");
  Ok(activity)
}

/// Deletes an activity and reverses its profile contribution. Month buckets
/// are only touched when the activity belongs to the profile's current
/// period; lifetime totals always reverse; savings and eco-product counters
/// never do. Returns `false` when no (id, user) row exists.
#[instrument(name = "carbon_ledger::delete_activity", skip(pool), err(Display))]
pub async fn delete_activity(pool: &PgPool, user_id: &str, activity_id: Uuid) -> Result<bool> {
  let now = Utc::now();
  let mut tx = pool.begin().await?;

  let deleted = sqlx::query_as::<_, CarbonActivity>(
    "DELETE FROM carbon_activities WHERE id = $1 AND user_id = $2 RETURNING *",
  )
  .bind(activity_id)
  .bind(user_id)
  .fetch_optional(&mut *tx)
  .await?;
  let activity = match deleted {
    Some(activity) => activity,
    None => return Ok(false),
  };

  let kind: ActivityKind = activity.kind.parse()?;
  let profile = ensure_profile(&mut tx, user_id, now).await?;
  let delta = ProfileDelta::removal(kind, activity.emissions);

  if profile.period().contains(activity.occurred_at) {
    let update = format!(
      "UPDATE carbon_profiles SET \
         month_total_emissions = month_total_emissions + $2, \
         {bucket} = {bucket} + $2, \
         month_activities = month_activities + $3, \
         total_emissions = total_emissions + $2, \
         total_activities = total_activities + $4, \
         updated_at = $5 \
       WHERE user_id = $1",
      bucket = month_bucket_column(kind),
    );
    sqlx::query(&update)
      .bind(user_id)
      .bind(delta.emissions)
      .bind(delta.activities as i32)
      .bind(delta.activities)
      .bind(now)
      .execute(&mut *tx)
      .await?;
  } else {
    sqlx::query(
      "UPDATE carbon_profiles SET \
         total_emissions = total_emissions + $2, \
         total_activities = total_activities + $3, \
         updated_at = $4 \
       WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(delta.emissions)
    .bind(delta.activities)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    warn!(activity_id = %activity.id, "Deleted activity from an archived month; month buckets left untouched.");
  }

  // Withdrawing an emitting activity lowers a matching goal's current value,
  // which can complete the goal.
  let goal_completed = carbon_goals::apply_activity_to_goals(
    &mut tx,
    user_id,
    kind,
    -activity.emissions,
    activity.occurred_at,
    now,
  )
  .await?;
  if goal_completed {
    award_goal_badge(&mut tx, &profile, now).await?;
  }

  tx.commit().await?;
  info!(activity_id = %activity.id, "Activity deleted and profile contribution reversed.");
  Ok(true)
}

/// Loads a user's profile, creating the default one when absent and rolling
/// the month over when stale. Runs its own transaction.
#[instrument(name = "carbon_ledger::fetch_or_create_profile", skip(pool), err(Display))]
pub async fn fetch_or_create_profile(pool: &PgPool, user_id: &str) -> Result<CarbonProfile> {
  let now = Utc::now();
  let mut tx = pool.begin().await?;
  let profile = ensure_profile(&mut tx, user_id, now).await?;
  tx.commit().await?;
  Ok(profile)
}

/// Archived months, oldest first.
pub async fn fetch_history(pool: &PgPool, user_id: &str) -> Result<Vec<HistoryEntry>> {
  let history = sqlx::query_as::<_, HistoryEntry>(
    "SELECT year, month, total_emissions, carbon_savings, eco_products, activities, goal_achieved \
     FROM carbon_profile_history WHERE user_id = $1 ORDER BY year, month",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;
  Ok(history)
}

/// Recomputes the current-month block from the activity log. The log is the
/// source of truth; this restores the profile invariant after any drift.
/// Lifetime stats, streak and achievements are left as they are.
#[instrument(name = "carbon_ledger::rebuild_profile", skip(pool), err(Display))]
pub async fn rebuild_profile(pool: &PgPool, user_id: &str) -> Result<CarbonProfile> {
  let now = Utc::now();
  let mut tx = pool.begin().await?;
  ensure_profile(&mut tx, user_id, now).await?;

  let rows = sqlx::query_as::<_, CarbonActivity>(
    "SELECT * FROM carbon_activities \
     WHERE user_id = $1 AND occurred_at >= date_trunc('month', $2::timestamptz) \
     ORDER BY occurred_at",
  )
  .bind(user_id)
  .bind(now)
  .fetch_all(&mut *tx)
  .await?;

  let mut month_total = 0.0;
  let mut by_kind: BTreeMap<ActivityKind, f64> = BTreeMap::new();
  let mut savings = 0.0;
  let mut eco_products: i32 = 0;
  for row in &rows {
    let kind: ActivityKind = row.kind.parse()?;
    let delta = ProfileDelta::record(kind, row.emissions, row.is_eco_friendly);
    month_total += delta.emissions;
    *by_kind.entry(kind).or_insert(0.0) += delta.emissions;
    savings += delta.savings;
    eco_products += delta.eco_products as i32;
  }

  let rebuilt = sqlx::query_as::<_, CarbonProfile>(
    "UPDATE carbon_profiles SET \
       month_total_emissions = $2, \
       month_transport_emissions = $3, \
       month_energy_emissions = $4, \
       month_shopping_emissions = $5, \
       month_home_emissions = $6, \
       month_travel_emissions = $7, \
       month_food_emissions = $8, \
       month_waste_emissions = $9, \
       month_carbon_savings = $10, \
       month_eco_products = $11, \
       month_activities = $12, \
       updated_at = $13 \
     WHERE user_id = $1 \
     RETURNING *",
  )
  .bind(user_id)
  .bind(month_total)
  .bind(by_kind.get(&ActivityKind::Transport).copied().unwrap_or(0.0))
  .bind(by_kind.get(&ActivityKind::Energy).copied().unwrap_or(0.0))
  .bind(by_kind.get(&ActivityKind::Shopping).copied().unwrap_or(0.0))
  .bind(by_kind.get(&ActivityKind::Home).copied().unwrap_or(0.0))
  .bind(by_kind.get(&ActivityKind::Travel).copied().unwrap_or(0.0))
  .bind(by_kind.get(&ActivityKind::Food).copied().unwrap_or(0.0))
  .bind(by_kind.get(&ActivityKind::Waste).copied().unwrap_or(0.0))
  .bind(savings)
  .bind(eco_products)
  .bind(rows.len() as i32)
  .bind(now)
  .fetch_one(&mut *tx)
  .await?;

  tx.commit().await?;
  info!(user_id, activities = rows.len(), "Profile month block rebuilt from the log.");
  Ok(rebuilt)
}

/// Upserts the profile row, locks it for the transaction and rolls the month
/// over if the stored period is stale.
async fn ensure_profile(
  tx: &mut Transaction<'_, Postgres>,
  user_id: &str,
  now: DateTime<Utc>,
) -> Result<CarbonProfile> {
  let period = MonthPeriod::of(now);
  sqlx::query(
    "INSERT INTO carbon_profiles (user_id, period_year, period_month, monthly_target, annual_target, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $6) \
     ON CONFLICT (user_id) DO NOTHING",
  )
  .bind(user_id)
  .bind(period.year)
  .bind(period.month as i32)
  .bind(DEFAULT_MONTHLY_TARGET)
  .bind(DEFAULT_ANNUAL_TARGET)
  .bind(now)
  .execute(&mut **tx)
  .await?;

  let profile =
    sqlx::query_as::<_, CarbonProfile>("SELECT * FROM carbon_profiles WHERE user_id = $1 FOR UPDATE")
      .bind(user_id)
      .fetch_one(&mut **tx)
      .await?;

  rollover_if_stale(tx, profile, now).await
}

/// Archives the stored month into `carbon_profile_history` and resets the
/// month buckets when the profile's period is not the current calendar
/// month. The archive upserts, so replays are idempotent.
async fn rollover_if_stale(
  tx: &mut Transaction<'_, Postgres>,
  profile: CarbonProfile,
  now: DateTime<Utc>,
) -> Result<CarbonProfile> {
  let current = MonthPeriod::of(now);
  if profile.period() == current {
    return Ok(profile);
  }

  let goal_achieved = profile.month_total_emissions <= profile.monthly_target;
  sqlx::query(
    "INSERT INTO carbon_profile_history (user_id, year, month, total_emissions, carbon_savings, eco_products, activities, goal_achieved, archived_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     ON CONFLICT (user_id, year, month) DO UPDATE SET \
       total_emissions = EXCLUDED.total_emissions, \
       carbon_savings = EXCLUDED.carbon_savings, \
       eco_products = EXCLUDED.eco_products, \
       activities = EXCLUDED.activities, \
       goal_achieved = EXCLUDED.goal_achieved, \
       archived_at = EXCLUDED.archived_at",
  )
  .bind(&profile.user_id)
  .bind(profile.period_year)
  .bind(profile.period_month)
  .bind(profile.month_total_emissions)
  .bind(profile.month_carbon_savings)
  .bind(profile.month_eco_products)
  .bind(profile.month_activities)
  .bind(goal_achieved)
  .bind(now)
  .execute(&mut **tx)
  .await?;

  // Best month is the lowest archived monthly total.
  let improves_best = profile
    .best_month_emissions
    .map_or(true, |best| profile.month_total_emissions < best);

  info!(
    user_id = %profile.user_id,
    archived = %profile.period(),
    goal_achieved,
    "Month rolled over; buckets reset."
  );

  let updated = sqlx::query_as::<_, CarbonProfile>(
    "UPDATE carbon_profiles SET \
       period_year = $2, \
       period_month = $3, \
       month_total_emissions = 0, \
       month_transport_emissions = 0, \
       month_energy_emissions = 0, \
       month_shopping_emissions = 0, \
       month_home_emissions = 0, \
       month_travel_emissions = 0, \
       month_food_emissions = 0, \
       month_waste_emissions = 0, \
       month_carbon_savings = 0, \
       month_eco_products = 0, \
       month_activities = 0, \
       best_month_year = CASE WHEN $4 THEN $5 ELSE best_month_year END, \
       best_month_month = CASE WHEN $4 THEN $6 ELSE best_month_month END, \
       best_month_emissions = CASE WHEN $4 THEN $7 ELSE best_month_emissions END, \
       updated_at = $8 \
     WHERE user_id = $1 \
     RETURNING *",
  )
  .bind(&profile.user_id)
  .bind(current.year)
  .bind(current.month as i32)
  .bind(improves_best)
  .bind(profile.period_year)
  .bind(profile.period_month)
  .bind(profile.month_total_emissions)
  .bind(now)
  .fetch_one(&mut **tx)
  .await?;

  Ok(updated)
}

/// Serializes the profile's achievement list with `badges` appended.
fn with_new_badges(
  profile: &CarbonProfile,
  badges: &[Badge],
  now: DateTime<Utc>,
) -> Result<serde_json::Value> {
  let mut records: Vec<AchievementRecord> =
    serde_json::from_value(profile.achievements.clone()).unwrap_or_default();
  for badge in badges {
    info!(user_id = %profile.user_id, badge = %badge, "Achievement earned.");
    records.push(AchievementRecord::new(*badge, now));
  }
  serde_json::to_value(&records)
    .map_err(|e| AppError::Internal(format!("Achievement serialization failed: {}", e)))
}

/// Awards the goal-completion badge outside the recording path (deletion can
/// complete a goal too).
async fn award_goal_badge(
  tx: &mut Transaction<'_, Postgres>,
  profile: &CarbonProfile,
  now: DateTime<Utc>,
) -> Result<()> {
  let signals = BadgeSignals {
    goal_completed: true,
    ..BadgeSignals::default()
  };
  let new_badges = newly_earned(&profile.earned_badges(), signals);
  if new_badges.is_empty() {
    return Ok(());
  }
  let achievements = with_new_badges(profile, &new_badges, now)?;
  sqlx::query("UPDATE carbon_profiles SET achievements = $2, updated_at = $3 WHERE user_id = $1")
    .bind(&profile.user_id)
    .bind(achievements)
    .bind(now)
    .execute(&mut **tx)
    .await?;
  Ok(())
}
