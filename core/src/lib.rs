// src/lib.rs

//! Shizuka carbon accounting: the pure domain rules behind the storefront's
//! carbon tracker.
//!
//! Everything in this crate is synchronous and side-effect free:
//!  - Emission factor tables as closed enumerations, one per activity kind.
//!  - Ledger arithmetic (`ProfileDelta`) applied to the per-user aggregate
//!    whenever the activity log changes.
//!  - Goal progress and milestone evaluation.
//!  - Derived reports: monthly snapshots, 30-day breakdowns, insights, tips.
//!  - Purchase impact summaries and achievement badges.
//!
//! The server crate owns persistence and applies these rules inside its
//! transactions.

pub mod activity;
pub mod category;
pub mod error;
pub mod goal;
pub mod impact;
pub mod ledger;
pub mod profile;
pub mod report;

// --- Re-exports for the Public API ---

pub use crate::activity::ActivityKind;
pub use crate::category::{
  is_eco_friendly, EmissionCategory, EnergySource, HomeUse, ShoppingCategory, TransportMode,
};
pub use crate::error::{CarbonError, CarbonResult};
pub use crate::goal::{
  default_milestones, evaluate_progress, GoalCategory, GoalEvaluation, GoalStatus, Milestone, TargetKind,
};
pub use crate::impact::{trees_equivalent, ImpactKind, ImpactLevel, PurchaseImpact};
pub use crate::ledger::{streak_after, MonthPeriod, ProfileDelta};
pub use crate::profile::{
  newly_earned, AchievementRecord, Badge, BadgeSignals, Lifestyle, DEFAULT_ANNUAL_TARGET,
  DEFAULT_MONTHLY_TARGET,
};
pub use crate::report::{
  category_breakdown, default_tips, generate_insights, personalized_tips, ActivityObservation,
  Insight, InsightKind, InsightReport, KindBreakdown, MonthlySnapshot, Tip,
};
