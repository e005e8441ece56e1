// server/src/web/routes.rs

use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Mounted without a version prefix; paths match what the storefront frontend
// already calls. Specific routes register before the parameterized ones.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .route(
          "",
          web::get().to(crate::web::handlers::product_handlers::list_products_handler),
        )
        .route(
          "/featured",
          web::get().to(crate::web::handlers::product_handlers::featured_products_handler),
        )
        .route(
          "/categories",
          web::get().to(crate::web::handlers::product_handlers::list_categories_handler),
        ),
    )
    .service(
      web::scope("/cart")
        .route(
          "/add",
          web::post().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
        )
        .route(
          "/update",
          web::post().to(crate::web::handlers::cart_handlers::update_cart_handler),
        )
        .route(
          "/remove/{product_id}",
          web::delete().to(crate::web::handlers::cart_handlers::remove_from_cart_handler),
        )
        .route(
          "/{user_id}",
          web::get().to(crate::web::handlers::cart_handlers::get_cart_handler),
        ),
    )
    .service(
      web::scope("/wishlist")
        .route(
          "/toggle",
          web::post().to(crate::web::handlers::wishlist_handlers::toggle_wishlist_handler),
        )
        .route(
          "/remove",
          web::post().to(crate::web::handlers::wishlist_handlers::remove_from_wishlist_handler),
        )
        .route(
          "/{user_id}",
          web::get().to(crate::web::handlers::wishlist_handlers::get_wishlist_handler),
        ),
    )
    .service(
      web::scope("/api/carbon")
        .route(
          "/profile",
          web::get().to(crate::web::handlers::carbon_handlers::get_profile_handler),
        )
        .route(
          "/profile/rebuild",
          web::post().to(crate::web::handlers::carbon_handlers::rebuild_profile_handler),
        )
        .route(
          "/activity",
          web::post().to(crate::web::handlers::carbon_handlers::record_activity_handler),
        )
        .route(
          "/activity/{id}",
          web::delete().to(crate::web::handlers::carbon_handlers::delete_activity_handler),
        )
        .route(
          "/activities",
          web::get().to(crate::web::handlers::carbon_handlers::list_activities_handler),
        )
        .route(
          "/dashboard",
          web::get().to(crate::web::handlers::carbon_handlers::dashboard_handler),
        )
        .route(
          "/goal",
          web::post().to(crate::web::handlers::goal_handlers::create_goal_handler),
        )
        .route(
          "/goals",
          web::get().to(crate::web::handlers::goal_handlers::list_goals_handler),
        )
        .route(
          "/purchase-impact",
          web::post().to(crate::web::handlers::carbon_handlers::purchase_impact_handler),
        )
        .route(
          "/insights",
          web::get().to(crate::web::handlers::carbon_handlers::insights_handler),
        ),
    );
}
