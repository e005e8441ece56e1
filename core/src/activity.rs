// src/activity.rs

//! The seven top-level buckets every logged action falls into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CarbonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  Transport,
  Energy,
  Shopping,
  Home,
  Travel,
  Food,
  Waste,
}

impl ActivityKind {
  pub const ALL: [ActivityKind; 7] = [
    ActivityKind::Transport,
    ActivityKind::Energy,
    ActivityKind::Shopping,
    ActivityKind::Home,
    ActivityKind::Travel,
    ActivityKind::Food,
    ActivityKind::Waste,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      ActivityKind::Transport => "transport",
      ActivityKind::Energy => "energy",
      ActivityKind::Shopping => "shopping",
      ActivityKind::Home => "home",
      ActivityKind::Travel => "travel",
      ActivityKind::Food => "food",
      ActivityKind::Waste => "waste",
    }
  }

  /// Kinds backed by an emission factor table. The remaining kinds always
  /// resolve to a zero factor (see `category::EmissionCategory`).
  pub fn has_factor_table(&self) -> bool {
    matches!(
      self,
      ActivityKind::Transport | ActivityKind::Energy | ActivityKind::Shopping | ActivityKind::Home
    )
  }
}

impl fmt::Display for ActivityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ActivityKind {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "transport" => Ok(ActivityKind::Transport),
      "energy" => Ok(ActivityKind::Energy),
      "shopping" => Ok(ActivityKind::Shopping),
      "home" => Ok(ActivityKind::Home),
      "travel" => Ok(ActivityKind::Travel),
      "food" => Ok(ActivityKind::Food),
      "waste" => Ok(ActivityKind::Waste),
      other => Err(CarbonError::UnknownKind(other.to_string())),
    }
  }
}
