// server/src/models/mod.rs

//! Row types for the catalog, cart, wishlist and carbon tables, plus the
//! view structs the API serializes them into.

pub mod carbon_activity;
pub mod carbon_goal;
pub mod carbon_profile;
pub mod cart_item;
pub mod product;
pub mod wishlist_item;

pub use carbon_activity::{
  ActivityPage, ActivityView, ActivityWithProductRow, CarbonActivity, LinkedProduct,
};
pub use carbon_goal::CarbonGoal;
pub use carbon_profile::{
  month_bucket_column, BestMonthView, CarbonProfile, CurrentMonthView, GoalsView, HistoryEntry,
  ProfileView, StatsView,
};
pub use cart_item::CartItem;
pub use product::{CategorySummary, Product};
pub use wishlist_item::WishlistItem;
