// server/src/services/carbon_reports.rs

//! Read-side carbon queries: the paginated activity listing, the dashboard
//! bundle and the 30-day insights report. Everything recomputes from fetched
//! slices of the log; nothing here writes.

use chrono::{DateTime, Duration, Utc};
use futures_util::try_join;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use shizuka_carbon::{
  default_tips, personalized_tips, ActivityKind, ActivityObservation, InsightReport,
  MonthlySnapshot, Tip,
};

use crate::errors::Result;
use crate::models::{ActivityPage, ActivityWithProductRow, CarbonActivity, ProfileView};
use crate::services::carbon_ledger;

/// Filters for the activity listing. Page and limit arrive as the client
/// sent them; the query clamps.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
  pub kind: Option<ActivityKind>,
  pub start_date: Option<DateTime<Utc>>,
  pub end_date: Option<DateTime<Utc>>,
  pub page: i64,
  pub limit: i64,
}

/// One row of the dashboard's month breakdown, grouped by kind in SQL.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
  #[serde(rename = "type")]
  pub kind: String,
  pub total_emissions: f64,
  pub count: i64,
}

/// One week of the 30-day emission trend.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
  pub week_start: DateTime<Utc>,
  pub total_emissions: f64,
  pub activities: i64,
}

/// Month stats the dashboard shows: the snapshot over the fetched slice plus
/// the profile's monthly target.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
  #[serde(flatten)]
  pub snapshot: MonthlySnapshot,
  pub carbon_goal: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  pub profile: ProfileView,
  pub monthly_stats: MonthlyStats,
  pub recent_activities: Vec<CarbonActivity>,
  pub monthly_breakdown: Vec<BreakdownRow>,
  pub weekly_trend: Vec<TrendRow>,
  pub tips: Vec<Tip>,
}

/// Pages through a user's activities, newest first, with optional kind and
/// date-range filters. Each row carries the linked product when one exists.
#[instrument(name = "carbon_reports::list_activities", skip(pool, filter), err(Display))]
pub async fn list_activities(
  pool: &PgPool,
  user_id: &str,
  filter: ActivityFilter,
) -> Result<ActivityPage> {
  let page = filter.page.max(1);
  let limit = filter.limit.clamp(1, 100);
  let offset = (page - 1) * limit;
  let kind = filter.kind.map(|k| k.as_str());

  let rows = sqlx::query_as::<_, ActivityWithProductRow>(
    "SELECT a.id, a.user_id, a.kind, a.category, a.description, a.amount, a.unit, a.emissions, \
            a.is_eco_friendly, a.occurred_at, a.product_id, a.created_at, \
            p.name AS product_name, p.image AS product_image \
     FROM carbon_activities a \
     LEFT JOIN products p ON p.id = a.product_id \
     WHERE a.user_id = $1 \
       AND ($2::text IS NULL OR a.kind = $2) \
       AND ($3::timestamptz IS NULL OR a.occurred_at >= $3) \
       AND ($4::timestamptz IS NULL OR a.occurred_at <= $4) \
     ORDER BY a.occurred_at DESC \
     LIMIT $5 OFFSET $6",
  )
  .bind(user_id)
  .bind(kind)
  .bind(filter.start_date)
  .bind(filter.end_date)
  .bind(limit)
  .bind(offset)
  .fetch_all(pool)
  .await?;

  let total: i64 = sqlx::query_scalar(
    "SELECT COUNT(*) FROM carbon_activities \
     WHERE user_id = $1 \
       AND ($2::text IS NULL OR kind = $2) \
       AND ($3::timestamptz IS NULL OR occurred_at >= $3) \
       AND ($4::timestamptz IS NULL OR occurred_at <= $4)",
  )
  .bind(user_id)
  .bind(kind)
  .bind(filter.start_date)
  .bind(filter.end_date)
  .fetch_one(pool)
  .await?;

  Ok(ActivityPage {
    activities: rows
      .into_iter()
      .map(ActivityWithProductRow::into_view)
      .collect(),
    current_page: page,
    total_pages: (total + limit - 1) / limit,
    total_activities: total,
  })
}

/// Assembles the dashboard: the profile (rolled over if stale), month stats
/// over the latest ten activities, the recent five, the SQL month breakdown,
/// the weekly trend and tips.
#[instrument(name = "carbon_reports::dashboard", skip(pool), err(Display))]
pub async fn dashboard(pool: &PgPool, user_id: &str) -> Result<Dashboard> {
  // Profile first: fetching may roll the month over, which the reads below
  // should observe.
  let profile = carbon_ledger::fetch_or_create_profile(pool, user_id).await?;

  let now = Utc::now();
  let thirty_days_ago = now - Duration::days(30);
  let (month_activities, monthly_breakdown, weekly_trend, history) = try_join!(
    fetch_month_activities(pool, user_id, now),
    fetch_month_breakdown(pool, user_id, now),
    fetch_weekly_trend(pool, user_id, thirty_days_ago),
    carbon_ledger::fetch_history(pool, user_id),
  )?;

  let observations = month_activities
    .iter()
    .map(observation_of)
    .collect::<Result<Vec<_>>>()?;
  let monthly_stats = MonthlyStats {
    snapshot: MonthlySnapshot::from_observations(&observations),
    carbon_goal: profile.monthly_target,
  };

  let mut tips = personalized_tips(
    profile.bucket_for(ActivityKind::Transport),
    profile.bucket_for(ActivityKind::Energy),
    profile.month_total_emissions,
    profile.month_carbon_savings,
  );
  if tips.is_empty() {
    tips = default_tips();
  }

  let mut recent_activities = month_activities;
  recent_activities.truncate(5);

  Ok(Dashboard {
    profile: ProfileView::assemble(profile, history),
    monthly_stats,
    recent_activities,
    monthly_breakdown,
    weekly_trend,
    tips,
  })
}

/// The 30-day insight report: per-kind breakdown, generated insights and
/// gross totals.
#[instrument(name = "carbon_reports::insights", skip(pool), err(Display))]
pub async fn insights(pool: &PgPool, user_id: &str) -> Result<InsightReport> {
  let since = Utc::now() - Duration::days(30);
  let rows = sqlx::query_as::<_, CarbonActivity>(
    "SELECT * FROM carbon_activities \
     WHERE user_id = $1 AND occurred_at >= $2 \
     ORDER BY occurred_at",
  )
  .bind(user_id)
  .bind(since)
  .fetch_all(pool)
  .await?;

  let observations = rows
    .iter()
    .map(observation_of)
    .collect::<Result<Vec<_>>>()?;
  Ok(InsightReport::over_thirty_days(&observations))
}

async fn fetch_month_activities(
  pool: &PgPool,
  user_id: &str,
  now: DateTime<Utc>,
) -> Result<Vec<CarbonActivity>> {
  let rows = sqlx::query_as::<_, CarbonActivity>(
    "SELECT * FROM carbon_activities \
     WHERE user_id = $1 AND occurred_at >= date_trunc('month', $2::timestamptz) \
     ORDER BY occurred_at DESC \
     LIMIT 10",
  )
  .bind(user_id)
  .bind(now)
  .fetch_all(pool)
  .await?;
  Ok(rows)
}

async fn fetch_month_breakdown(
  pool: &PgPool,
  user_id: &str,
  now: DateTime<Utc>,
) -> Result<Vec<BreakdownRow>> {
  let rows = sqlx::query_as::<_, BreakdownRow>(
    "SELECT kind, COALESCE(SUM(emissions), 0) AS total_emissions, COUNT(*) AS count \
     FROM carbon_activities \
     WHERE user_id = $1 AND occurred_at >= date_trunc('month', $2::timestamptz) \
     GROUP BY kind \
     ORDER BY total_emissions DESC",
  )
  .bind(user_id)
  .bind(now)
  .fetch_all(pool)
  .await?;
  Ok(rows)
}

async fn fetch_weekly_trend(
  pool: &PgPool,
  user_id: &str,
  since: DateTime<Utc>,
) -> Result<Vec<TrendRow>> {
  let rows = sqlx::query_as::<_, TrendRow>(
    "SELECT date_trunc('week', occurred_at) AS week_start, \
            COALESCE(SUM(emissions), 0) AS total_emissions, COUNT(*) AS activities \
     FROM carbon_activities \
     WHERE user_id = $1 AND occurred_at >= $2 \
     GROUP BY date_trunc('week', occurred_at) \
     ORDER BY week_start",
  )
  .bind(user_id)
  .bind(since)
  .fetch_all(pool)
  .await?;
  Ok(rows)
}

fn observation_of(activity: &CarbonActivity) -> Result<ActivityObservation> {
  let kind: ActivityKind = activity.kind.parse()?;
  Ok(ActivityObservation {
    kind,
    emissions: activity.emissions,
    is_eco_friendly: activity.is_eco_friendly,
  })
}
