// src/goal.rs

//! Reduction goal and milestone math.
//!
//! A goal captures a baseline (the month's emission sum for its category at
//! creation time) and a reduction target, either a percentage of the baseline
//! or an absolute kg figure. Progress is a pure function of baseline versus
//! the category's current month value; milestones latch once crossed and are
//! never taken back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;
use crate::error::CarbonError;

/// Fixed milestone thresholds every goal is seeded with.
pub const MILESTONE_STEPS: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

/// Scope of a goal: one tracked kind, or the whole footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
  Transport,
  Energy,
  Shopping,
  Home,
  Overall,
}

impl GoalCategory {
  pub const ALL: [GoalCategory; 5] = [
    GoalCategory::Transport,
    GoalCategory::Energy,
    GoalCategory::Shopping,
    GoalCategory::Home,
    GoalCategory::Overall,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      GoalCategory::Transport => "transport",
      GoalCategory::Energy => "energy",
      GoalCategory::Shopping => "shopping",
      GoalCategory::Home => "home",
      GoalCategory::Overall => "overall",
    }
  }

  /// Whether an activity of `kind` counts toward this goal.
  pub fn matches(&self, kind: ActivityKind) -> bool {
    match self {
      GoalCategory::Overall => true,
      GoalCategory::Transport => kind == ActivityKind::Transport,
      GoalCategory::Energy => kind == ActivityKind::Energy,
      GoalCategory::Shopping => kind == ActivityKind::Shopping,
      GoalCategory::Home => kind == ActivityKind::Home,
    }
  }
}

impl fmt::Display for GoalCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for GoalCategory {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .find(|category| category.as_str() == s)
      .copied()
      .ok_or_else(|| CarbonError::UnknownGoalCategory(s.to_string()))
  }
}

/// How `target_reduction` is read: percent of baseline, or kg outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
  Percentage,
  Absolute,
}

impl TargetKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TargetKind::Percentage => "percentage",
      TargetKind::Absolute => "absolute",
    }
  }
}

impl fmt::Display for TargetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TargetKind {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "percentage" => Ok(TargetKind::Percentage),
      "absolute" => Ok(TargetKind::Absolute),
      other => Err(CarbonError::UnknownTargetKind(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
  Active,
  Completed,
  Failed,
  Paused,
}

impl GoalStatus {
  pub const ALL: [GoalStatus; 4] = [
    GoalStatus::Active,
    GoalStatus::Completed,
    GoalStatus::Failed,
    GoalStatus::Paused,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      GoalStatus::Active => "active",
      GoalStatus::Completed => "completed",
      GoalStatus::Failed => "failed",
      GoalStatus::Paused => "paused",
    }
  }
}

impl fmt::Display for GoalStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for GoalStatus {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .find(|status| status.as_str() == s)
      .copied()
      .ok_or_else(|| CarbonError::UnknownGoalStatus(s.to_string()))
  }
}

/// One milestone of a goal. Serialized into the goal's milestone list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
  pub percentage: f64,
  pub achieved: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub achieved_at: Option<DateTime<Utc>>,
}

/// The 25/50/75/100 set every new goal starts with, all unachieved.
pub fn default_milestones() -> Vec<Milestone> {
  MILESTONE_STEPS
    .iter()
    .map(|&percentage| Milestone {
      percentage,
      achieved: false,
      achieved_at: None,
    })
    .collect()
}

/// Outcome of a progress evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalEvaluation {
  /// Percent of the reduction target achieved, floored at 0 and uncapped.
  pub progress: f64,
  /// `true` once progress reaches 100.
  pub completed: bool,
}

/// Recomputes progress from the baseline and the category's current value,
/// latching any milestone the new progress crosses.
///
/// The reduction target is `baseline * target_reduction / 100` for
/// percentage goals and `target_reduction` itself for absolute ones. A
/// non-positive target (a percentage goal created against an empty month)
/// cannot make progress and evaluates to 0.
pub fn evaluate_progress(
  baseline: f64,
  current: f64,
  target_kind: TargetKind,
  target_reduction: f64,
  milestones: &mut [Milestone],
  now: DateTime<Utc>,
) -> GoalEvaluation {
  let target = match target_kind {
    TargetKind::Percentage => baseline * target_reduction / 100.0,
    TargetKind::Absolute => target_reduction,
  };

  let progress = if target > 0.0 {
    ((baseline - current) / target * 100.0).max(0.0)
  } else {
    0.0
  };

  for milestone in milestones.iter_mut() {
    if !milestone.achieved && progress >= milestone.percentage {
      milestone.achieved = true;
      milestone.achieved_at = Some(now);
      tracing::debug!(target: "carbon_goals", percentage = milestone.percentage, progress, "milestone reached");
    }
  }

  GoalEvaluation {
    progress,
    completed: progress >= 100.0,
  }
}
