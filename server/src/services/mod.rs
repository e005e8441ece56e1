// server/src/services/mod.rs

//! Business logic between the HTTP handlers and the database.

pub mod carbon_goals;
pub mod carbon_ledger;
pub mod carbon_reports;
