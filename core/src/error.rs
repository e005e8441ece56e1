// src/error.rs
use thiserror::Error;

use crate::activity::ActivityKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarbonError {
  #[error("Unknown activity type: {0}")]
  UnknownKind(String),

  #[error("Unknown {kind} category: {label}")]
  UnknownCategory { kind: ActivityKind, label: String },

  #[error("Unknown goal category: {0}")]
  UnknownGoalCategory(String),

  #[error("Unknown goal status: {0}")]
  UnknownGoalStatus(String),

  #[error("Unknown target type: {0}")]
  UnknownTargetKind(String),

  #[error("Unknown lifestyle: {0}")]
  UnknownLifestyle(String),
}

pub type CarbonResult<T, E = CarbonError> = std::result::Result<T, E>;
