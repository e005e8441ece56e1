// tests/badge_tests.rs
mod common;

use common::*;
use shizuka_carbon::{newly_earned, AchievementRecord, Badge, BadgeSignals, Lifestyle};

#[test]
fn test_badges_award_on_their_thresholds() {
  setup_tracing();

  let signals = BadgeSignals {
    streak_days: 7,
    month_eco_products: 10,
    total_savings: 100.0,
    goal_completed: true,
  };
  assert_eq!(
    newly_earned(&[], signals),
    vec![
      Badge::FirstWeek,
      Badge::EcoShopper,
      Badge::CarbonSaver,
      Badge::GoalAchiever,
    ]
  );
}

#[test]
fn test_badges_below_threshold_stay_unearned() {
  setup_tracing();

  let signals = BadgeSignals {
    streak_days: 6,
    month_eco_products: 9,
    total_savings: 99.9,
    goal_completed: false,
  };
  assert!(newly_earned(&[], signals).is_empty());
}

#[test]
fn test_badges_are_not_awarded_twice() {
  setup_tracing();

  let signals = BadgeSignals {
    streak_days: 30,
    month_eco_products: 2,
    total_savings: 250.0,
    goal_completed: false,
  };
  let earned = vec![Badge::FirstWeek];
  assert_eq!(newly_earned(&earned, signals), vec![Badge::CarbonSaver]);

  let earned = vec![Badge::FirstWeek, Badge::CarbonSaver];
  assert!(newly_earned(&earned, signals).is_empty());
}

#[test]
fn test_achievement_record_serialization() {
  setup_tracing();

  let record = AchievementRecord::new(Badge::CarbonSaver, instant(2025, 3, 15));
  assert_eq!(record.description, "Saved more than 100 kg of CO₂");

  let value = serde_json::to_value(&record).unwrap();
  assert_eq!(value["type"], "carbon_saver");
  assert!(value.get("earnedAt").is_some());
  assert!(value.get("earned_at").is_none());

  let parsed: AchievementRecord = serde_json::from_value(value).unwrap();
  assert_eq!(parsed.badge, Badge::CarbonSaver);
}

#[test]
fn test_badge_labels_are_stable() {
  setup_tracing();

  for badge in Badge::ALL {
    let value = serde_json::to_value(badge).unwrap();
    assert_eq!(value, badge.as_str());
  }
  assert_eq!(Badge::SustainabilityChampion.as_str(), "sustainability_champion");
}

#[test]
fn test_lifestyle_targets() {
  setup_tracing();

  assert_eq!(Lifestyle::default(), Lifestyle::Moderate);
  assert_close(Lifestyle::Minimal.monthly_target(), 800.0);
  assert_close(Lifestyle::Moderate.monthly_target(), 1000.0);
  assert_close(Lifestyle::Active.monthly_target(), 1200.0);

  assert_eq!("minimal".parse::<Lifestyle>().unwrap(), Lifestyle::Minimal);
  assert!("vegan".parse::<Lifestyle>().is_err());
}
