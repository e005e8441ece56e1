// tests/report_tests.rs
mod common;

use common::*;
use shizuka_carbon::{
  category_breakdown, default_tips, generate_insights, personalized_tips, ActivityKind,
  InsightKind, InsightReport, MonthlySnapshot, ProfileDelta,
};

#[test]
fn test_monthly_snapshot_splits_gross_emissions_and_savings() {
  setup_tracing();

  let observations = vec![
    obs(ActivityKind::Transport, 5.5),
    obs(ActivityKind::Shopping, -6.3),
    obs(ActivityKind::Energy, 8.2),
    eco_obs(ActivityKind::Shopping, 4.2),
  ];
  let snapshot = MonthlySnapshot::from_observations(&observations);

  assert_close(snapshot.total_emissions, 17.9);
  assert_close(snapshot.saved_emissions, 6.3);
  assert_eq!(snapshot.eco_products_purchased, 2);
  assert_eq!(snapshot.activities_count, 4);
}

#[test]
fn test_empty_snapshot_is_all_zero() {
  setup_tracing();

  let snapshot = MonthlySnapshot::from_observations(&[]);
  assert_close(snapshot.total_emissions, 0.0);
  assert_close(snapshot.saved_emissions, 0.0);
  assert_eq!(snapshot.eco_products_purchased, 0);
  assert_eq!(snapshot.activities_count, 0);
}

#[test]
fn test_breakdown_buckets_by_kind_and_splits_signs() {
  setup_tracing();

  let observations = vec![
    obs(ActivityKind::Transport, 5.5),
    obs(ActivityKind::Transport, -1.0),
    obs(ActivityKind::Shopping, -8.5),
  ];
  let breakdown = category_breakdown(&observations);

  assert_eq!(breakdown.len(), 2);
  let transport = &breakdown[&ActivityKind::Transport];
  assert_close(transport.emissions, 5.5);
  assert_close(transport.savings, 1.0);
  assert_eq!(transport.count, 2);
  let shopping = &breakdown[&ActivityKind::Shopping];
  assert_close(shopping.emissions, 0.0);
  assert_close(shopping.savings, 8.5);
  assert_eq!(shopping.count, 1);
}

#[test]
fn test_high_impact_insight_requires_more_than_thirty_percent() {
  setup_tracing();

  let observations = vec![
    obs(ActivityKind::Transport, 30.0),
    obs(ActivityKind::Transport, 30.0),
    obs(ActivityKind::Energy, 30.0),
    obs(ActivityKind::Home, 10.0),
  ];
  let insights = generate_insights(&observations);

  // Transport sits at 60%; energy at exactly 30% does not qualify.
  assert_eq!(insights.len(), 1);
  let insight = &insights[0];
  assert_eq!(insight.kind, InsightKind::HighImpact);
  assert_eq!(insight.category, Some(ActivityKind::Transport));
  assert_eq!(
    insight.message,
    "transport accounts for 60.0% of your carbon footprint"
  );
  assert_eq!(
    insight.recommendation,
    "Consider eco-friendly alternatives for transport activities"
  );
  assert_eq!(insight.priority, "high");
}

#[test]
fn test_all_negative_slice_generates_no_percentage_insights() {
  setup_tracing();

  let observations = vec![
    obs(ActivityKind::Shopping, -8.5),
    obs(ActivityKind::Shopping, -2.1),
  ];
  let insights = generate_insights(&observations);
  assert!(insights
    .iter()
    .all(|insight| insight.kind != InsightKind::HighImpact));

  assert!(generate_insights(&[]).is_empty());
}

#[test]
fn test_positive_trend_counts_eco_choices_in_the_last_ten() {
  setup_tracing();

  // Two eco observations ahead of the window must not count.
  let mut observations = vec![
    obs(ActivityKind::Shopping, -2.1),
    obs(ActivityKind::Shopping, -2.1),
  ];
  for _ in 0..6 {
    observations.push(obs(ActivityKind::Transport, 1.0));
  }
  for _ in 0..4 {
    observations.push(obs(ActivityKind::Shopping, -2.1));
  }

  // Four eco among the last ten: no trend yet.
  assert!(generate_insights(&observations)
    .iter()
    .all(|insight| insight.kind != InsightKind::PositiveTrend));

  // A fifth tips it over.
  observations.push(obs(ActivityKind::Shopping, -2.1));
  let insights = generate_insights(&observations);
  let trend = insights
    .iter()
    .find(|insight| insight.kind == InsightKind::PositiveTrend)
    .expect("expected a positive trend insight");
  assert_eq!(trend.category, None);
  assert_eq!(
    trend.message,
    "Great job! You've made several eco-friendly choices recently"
  );
  assert_eq!(trend.recommendation, "Keep up the sustainable lifestyle!");
  assert_eq!(trend.priority, "positive");
}

#[test]
fn test_insight_report_payload_shape() {
  setup_tracing();

  let observations = vec![
    obs(ActivityKind::Transport, 30.0),
    obs(ActivityKind::Transport, 30.0),
    obs(ActivityKind::Energy, 30.0),
    obs(ActivityKind::Home, 10.0),
    obs(ActivityKind::Shopping, -8.5),
  ];
  let report = InsightReport::over_thirty_days(&observations);

  assert_close(report.total_emissions, 100.0);
  assert_close(report.total_savings, 8.5);
  assert_eq!(report.period, "30 days");

  let value = serde_json::to_value(&report).unwrap();
  assert_eq!(value["categoryBreakdown"]["transport"]["emissions"], 60.0);
  assert_eq!(value["categoryBreakdown"]["shopping"]["savings"], 8.5);
  assert_eq!(value["totalEmissions"], 100.0);
  assert_eq!(value["totalSavings"], 8.5);
  assert_eq!(value["insights"][0]["type"], "high_impact");
  assert_eq!(value["insights"][0]["category"], "transport");
}

#[test]
fn test_snapshot_diverges_from_the_ledger_by_the_unfetched_tail() {
  setup_tracing();

  // Fifteen activities in the month; the dashboard only fetches the ten
  // most recent. The ledger sees them all.
  let mut log = Vec::new();
  for _ in 0..5 {
    log.push(obs(ActivityKind::Home, 2.0));
  }
  for index in 0..10 {
    if index % 2 == 0 {
      log.push(obs(ActivityKind::Transport, 5.5));
    } else {
      log.push(obs(ActivityKind::Shopping, -2.1));
    }
  }

  let ledger_net: f64 = log
    .iter()
    .map(|o| ProfileDelta::record(o.kind, o.emissions, o.is_eco_friendly).emissions)
    .sum();

  let window = &log[5..];
  let snapshot = MonthlySnapshot::from_observations(window);
  let snapshot_net = snapshot.total_emissions - snapshot.saved_emissions;

  let unfetched_net: f64 = log[..5].iter().map(|o| o.emissions).sum();
  assert_close(ledger_net - snapshot_net, unfetched_net);
}

#[test]
fn test_personalized_tips_fire_on_their_thresholds() {
  setup_tracing();

  // Transport-heavy month with healthy savings: one tip.
  let tips = personalized_tips(50.0, 10.0, 100.0, 60.0);
  assert_eq!(tips.len(), 1);
  assert_eq!(tips[0].category, "transport");
  assert_eq!(
    tips[0].tip,
    "Your transport emissions are high. Consider carpooling, public transport, or cycling."
  );
  assert_eq!(tips[0].priority, "high");

  // Energy above 30% of the total.
  let tips = personalized_tips(10.0, 40.0, 100.0, 60.0);
  assert_eq!(tips.len(), 1);
  assert_eq!(tips[0].category, "energy");

  // Low savings alone still earns the shopping nudge.
  let tips = personalized_tips(10.0, 10.0, 100.0, 20.0);
  assert_eq!(tips.len(), 1);
  assert_eq!(tips[0].category, "shopping");
  assert_eq!(
    tips[0].tip,
    "Choose more eco-friendly products to increase your carbon savings."
  );

  // Nothing stands out.
  assert!(personalized_tips(10.0, 10.0, 100.0, 60.0).is_empty());
}

#[test]
fn test_default_tips_are_the_two_standing_ones() {
  setup_tracing();

  let tips = default_tips();
  assert_eq!(tips.len(), 2);
  assert_eq!(tips[0].category, "transport");
  assert_eq!(
    tips[0].tip,
    "Consider using public transport or cycling for short trips"
  );
  assert_eq!(tips[1].category, "shopping");
  assert_eq!(tips[1].priority, "high");
}
