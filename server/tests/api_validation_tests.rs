// tests/api_validation_tests.rs
mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::*;
use serde_json::{json, Value};
use uuid::Uuid;

use shizuka_server::web::configure_app_routes;

// Every request below is answered by routing or input validation, so the
// suites run against the lazy pool without a live Postgres.

#[actix_web::test]
async fn test_health_answers_ok() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get().uri("/health").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn test_activity_with_missing_fields_is_rejected() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  // No category, description or amount.
  let req = test::TestRequest::post()
    .uri("/api/carbon/activity")
    .set_json(json!({ "userId": "u-1", "type": "transport" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));

  // Amount absent while every text field is present.
  let req = test::TestRequest::post()
    .uri("/api/carbon/activity")
    .set_json(json!({
      "userId": "u-1",
      "type": "transport",
      "category": "car_petrol",
      "description": "Morning commute"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));

  // Empty strings count as missing, as the original API treated them.
  let req = test::TestRequest::post()
    .uri("/api/carbon/activity")
    .set_json(json!({
      "userId": "",
      "type": "transport",
      "category": "car_petrol",
      "description": "Morning commute",
      "amount": 12.0
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));
}

#[actix_web::test]
async fn test_activity_with_unknown_type_is_rejected() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/carbon/activity")
    .set_json(json!({
      "userId": "u-1",
      "type": "teleport",
      "category": "car_petrol",
      "description": "Morning commute",
      "amount": 12.0
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Unknown activity type: teleport" }));
}

#[actix_web::test]
async fn test_activity_with_unknown_category_is_rejected() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/carbon/activity")
    .set_json(json!({
      "userId": "u-1",
      "type": "transport",
      "category": "hoverboard",
      "description": "Morning commute",
      "amount": 12.0
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(
    body,
    json!({ "message": "Unknown transport category: hoverboard" })
  );
}

#[actix_web::test]
async fn test_activity_list_filters_must_parse() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/carbon/activities?startDate=yesterday")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Invalid startDate value" }));

  let req = test::TestRequest::get()
    .uri("/api/carbon/activities?endDate=31-12-2025")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Invalid endDate value" }));

  let req = test::TestRequest::get()
    .uri("/api/carbon/activities?type=plane")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Unknown activity type: plane" }));
}

#[actix_web::test]
async fn test_goal_requires_its_core_fields() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/carbon/goal")
    .set_json(json!({ "userId": "u-1", "title": "Cut my commute" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));

  // A zero reduction target is treated as absent.
  let req = test::TestRequest::post()
    .uri("/api/carbon/goal")
    .set_json(json!({
      "userId": "u-1",
      "title": "Cut my commute",
      "targetReduction": 0,
      "endDate": "2026-12-31"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));

  let req = test::TestRequest::post()
    .uri("/api/carbon/goal")
    .set_json(json!({
      "userId": "u-1",
      "title": "Cut my commute",
      "targetReduction": 20.0,
      "endDate": "soon"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Invalid endDate value" }));
}

#[actix_web::test]
async fn test_goal_with_unknown_category_is_rejected() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/carbon/goal")
    .set_json(json!({
      "userId": "u-1",
      "title": "Cut my commute",
      "targetReduction": 20.0,
      "endDate": "2026-12-31",
      "category": "aviation"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Unknown goal category: aviation" }));
}

#[actix_web::test]
async fn test_goal_list_with_unknown_status_is_rejected() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/carbon/goals?status=archived")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Unknown goal status: archived" }));
}

#[actix_web::test]
async fn test_purchase_impact_requires_a_nonzero_quantity() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/carbon/purchase-impact")
    .set_json(json!({
      "userId": "u-1",
      "productName": "Bamboo Toothbrush",
      "productCategory": "bamboo_toothbrush"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));

  let req = test::TestRequest::post()
    .uri("/api/carbon/purchase-impact")
    .set_json(json!({
      "userId": "u-1",
      "productName": "Bamboo Toothbrush",
      "productCategory": "bamboo_toothbrush",
      "quantity": 0
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing required fields" }));
}

#[actix_web::test]
async fn test_purchase_impact_with_unknown_category_is_rejected() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/carbon/purchase-impact")
    .set_json(json!({
      "userId": "u-1",
      "productName": "Uranium Rod",
      "productCategory": "uranium_rod",
      "quantity": 1
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(
    body,
    json!({ "message": "Unknown shopping category: uranium_rod" })
  );
}

#[actix_web::test]
async fn test_cart_mutations_require_user_and_product() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/cart/add")
    .set_json(json!({}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing userId or productId" }));

  let req = test::TestRequest::post()
    .uri("/cart/add")
    .set_json(json!({ "userId": "u-1" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing userId or productId" }));

  // Update reports a missing quantity with the same static message.
  let req = test::TestRequest::post()
    .uri("/cart/update")
    .set_json(json!({
      "userId": "u-1",
      "productId": Uuid::new_v4().to_string()
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing userId or productId" }));

  let req = test::TestRequest::delete()
    .uri(&format!("/cart/remove/{}", Uuid::new_v4()))
    .set_json(json!({ "userId": "" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing userId or productId" }));
}

#[actix_web::test]
async fn test_cart_update_rejects_negative_quantities() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/cart/update")
    .set_json(json!({
      "userId": "u-1",
      "productId": Uuid::new_v4().to_string(),
      "quantity": -1
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Quantity cannot be negative!" }));
}

#[actix_web::test]
async fn test_wishlist_toggle_requires_user_and_product() {
  setup_tracing();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(test_state()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/wishlist/toggle")
    .set_json(json!({ "userId": "" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "Missing userId or productId" }));
}
