// tests/goal_progress_tests.rs
mod common;

use common::*;
use shizuka_carbon::{
  default_milestones, evaluate_progress, ActivityKind, GoalCategory, GoalStatus, TargetKind,
};

#[test]
fn test_goals_start_with_four_unachieved_milestones() {
  setup_tracing();

  let milestones = default_milestones();
  let steps: Vec<f64> = milestones.iter().map(|m| m.percentage).collect();
  assert_eq!(steps, vec![25.0, 50.0, 75.0, 100.0]);
  assert!(milestones.iter().all(|m| !m.achieved && m.achieved_at.is_none()));
}

#[test]
fn test_percentage_goal_progress() {
  setup_tracing();

  // Reduce by 10% of a 200 kg baseline, so the target is 20 kg.
  let mut milestones = default_milestones();
  let now = instant(2025, 3, 15);
  let eval = evaluate_progress(200.0, 190.0, TargetKind::Percentage, 10.0, &mut milestones, now);

  assert_close(eval.progress, 50.0);
  assert!(!eval.completed);
  assert!(milestones[0].achieved);
  assert_eq!(milestones[0].achieved_at, Some(now));
  assert!(milestones[1].achieved);
  assert!(!milestones[2].achieved);
  assert!(!milestones[3].achieved);
}

#[test]
fn test_absolute_goal_completes_at_its_target() {
  setup_tracing();

  let mut milestones = default_milestones();
  let eval = evaluate_progress(
    200.0,
    150.0,
    TargetKind::Absolute,
    50.0,
    &mut milestones,
    instant(2025, 3, 15),
  );

  assert_close(eval.progress, 100.0);
  assert!(eval.completed);
  assert!(milestones.iter().all(|m| m.achieved));
}

#[test]
fn test_progress_floors_at_zero_when_emissions_grow() {
  setup_tracing();

  let mut milestones = default_milestones();
  let eval = evaluate_progress(
    200.0,
    250.0,
    TargetKind::Percentage,
    10.0,
    &mut milestones,
    instant(2025, 3, 15),
  );

  assert_close(eval.progress, 0.0);
  assert!(!eval.completed);
  assert!(milestones.iter().all(|m| !m.achieved));
}

#[test]
fn test_milestones_latch_and_keep_their_timestamps() {
  setup_tracing();

  let mut milestones = default_milestones();
  let first = instant(2025, 3, 15);
  evaluate_progress(200.0, 188.0, TargetKind::Percentage, 10.0, &mut milestones, first);
  assert!(milestones[0].achieved && milestones[1].achieved);

  // Emissions creep back up; achieved milestones stay achieved.
  let later = instant(2025, 3, 20);
  let eval = evaluate_progress(200.0, 198.0, TargetKind::Percentage, 10.0, &mut milestones, later);
  assert_close(eval.progress, 10.0);
  assert!(milestones[0].achieved);
  assert!(milestones[1].achieved);
  assert_eq!(milestones[0].achieved_at, Some(first));
  assert_eq!(milestones[1].achieved_at, Some(first));
}

#[test]
fn test_empty_baseline_percentage_goal_cannot_progress() {
  setup_tracing();

  // A percentage goal created against an empty month has a zero target;
  // even net savings leave it at zero rather than dividing by zero.
  let mut milestones = default_milestones();
  let eval = evaluate_progress(
    0.0,
    -12.0,
    TargetKind::Percentage,
    20.0,
    &mut milestones,
    instant(2025, 3, 15),
  );

  assert_close(eval.progress, 0.0);
  assert!(!eval.completed);
  assert!(milestones.iter().all(|m| !m.achieved));
}

#[test]
fn test_milestone_serialization_uses_camel_case() {
  setup_tracing();

  let mut milestones = default_milestones();
  evaluate_progress(100.0, 70.0, TargetKind::Absolute, 30.0, &mut milestones, instant(2025, 3, 15));

  let value = serde_json::to_value(&milestones[0]).unwrap();
  assert_eq!(value["percentage"], 25.0);
  assert_eq!(value["achieved"], true);
  assert!(value.get("achievedAt").is_some());
  assert!(value.get("achieved_at").is_none());
}

#[test]
fn test_goal_category_scoping() {
  setup_tracing();

  assert!(GoalCategory::Overall.matches(ActivityKind::Food));
  assert!(GoalCategory::Overall.matches(ActivityKind::Transport));
  assert!(GoalCategory::Transport.matches(ActivityKind::Transport));
  assert!(!GoalCategory::Transport.matches(ActivityKind::Energy));
  assert!(!GoalCategory::Home.matches(ActivityKind::Shopping));
}

#[test]
fn test_goal_enums_parse_their_wire_labels() {
  setup_tracing();

  assert_eq!("overall".parse::<GoalCategory>().unwrap(), GoalCategory::Overall);
  assert!("food".parse::<GoalCategory>().is_err());

  assert_eq!("percentage".parse::<TargetKind>().unwrap(), TargetKind::Percentage);
  assert_eq!("absolute".parse::<TargetKind>().unwrap(), TargetKind::Absolute);
  assert!("relative".parse::<TargetKind>().is_err());

  assert_eq!("active".parse::<GoalStatus>().unwrap(), GoalStatus::Active);
  assert_eq!("paused".parse::<GoalStatus>().unwrap(), GoalStatus::Paused);
  assert!("done".parse::<GoalStatus>().is_err());
}
