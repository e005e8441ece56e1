// server/src/lib.rs

//! Library surface of the storefront server. The binary in `main.rs` wires
//! these modules together; integration tests assemble the same app from
//! here.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
