// server/src/web/handlers/mod.rs

// Declare handler modules
pub mod carbon_handlers;
pub mod cart_handlers;
pub mod goal_handlers;
pub mod product_handlers;
pub mod wishlist_handlers;
