use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use restaurant_engine::{
    db_types::{FulfillmentType, NewOrder, NewOrderLine, Order, OrderLineDetail, OrderStatusType, OrderWithLines},
    OrderFlowApi,
    OrderFlowError,
};
use rms_common::Cents;
use serde_json::json;

use super::{
    helpers::{bearer, json, send_request, test_verifier, CUSTOMER_ID, CUSTOMER_TOKEN},
    mocks::MockOrderManager,
};
use crate::{
    config::ApiOptions,
    routes::{CreateOrderRoute, MyOrdersRoute, OrderByIdRoute},
};

fn configure(db: MockOrderManager, options: ApiOptions) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(OrderFlowApi::new(db)))
            .app_data(web::Data::new(options))
            .service(CreateOrderRoute::<MockOrderManager>::new())
            .service(MyOrdersRoute::<MockOrderManager>::new())
            .service(OrderByIdRoute::<MockOrderManager>::new());
    }
}

fn cart() -> serde_json::Value {
    json!({
        "id_restaurante": 3,
        "tipo": "en restaurante",
        "productos": [{"id_producto": 5, "cantidad": 2}, {"id_producto": 6, "cantidad": 1}]
    })
}

fn sample_order() -> OrderWithLines {
    OrderWithLines {
        order: Order {
            id: 42,
            customer_id: CUSTOMER_ID,
            restaurant_id: 3,
            fulfillment: FulfillmentType::DineIn,
            status: OrderStatusType::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap(),
        },
        products: vec![OrderLineDetail { product_id: 5, name: "Tacos".into(), quantity: 2, subtotal: Cents::from(2598) }],
    }
}

#[actix_web::test]
async fn place_order_with_token() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_insert_order()
        .withf(|order: &NewOrder| {
            order.customer_id == CUSTOMER_ID &&
                order.restaurant_id == 3 &&
                order.fulfillment == FulfillmentType::DineIn &&
                order.lines ==
                    vec![NewOrderLine { product_id: 5, quantity: 2 }, NewOrderLine { product_id: 6, quantity: 1 }]
        })
        .times(1)
        .returning(|_| Ok(42));
    let req = TestRequest::post().uri("/orders").insert_header(bearer(CUSTOMER_TOKEN)).set_json(cart());
    let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["order_id"], 42);
    assert_eq!(body["message"], "Order created");
}

#[actix_web::test]
async fn place_order_without_token() {
    let _ = env_logger::try_init().ok();
    let verifier = test_verifier();
    // No expectations: the mock panics if the ledger is touched
    let db = MockOrderManager::new();
    let req = TestRequest::post().uri("/orders").set_json(cart());
    let (status, body) = send_request(req, verifier.clone(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json(&body)["error"].is_string());
    assert_eq!(verifier.call_count(), 0);
}

#[actix_web::test]
async fn place_order_with_bad_token() {
    let _ = env_logger::try_init().ok();
    let verifier = test_verifier();
    let db = MockOrderManager::new();
    let req = TestRequest::post().uri("/orders").insert_header(bearer("forged")).set_json(cart());
    let (status, body) = send_request(req, verifier.clone(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. Invalid or expired access token"}"#);
    assert_eq!(verifier.call_count(), 1);
}

#[actix_web::test]
async fn explicit_customer_id_needs_the_option() {
    let _ = env_logger::try_init().ok();
    let mut request = cart();
    request["id_usuario"] = json!(17);

    let db = MockOrderManager::new();
    let req = TestRequest::post().uri("/orders").set_json(request.clone());
    let (status, _) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut db = MockOrderManager::new();
    db.expect_insert_order().withf(|order: &NewOrder| order.customer_id == 17).times(1).returning(|_| Ok(8));
    let options = ApiOptions { allow_explicit_customer_id: true };
    let req = TestRequest::post().uri("/orders").set_json(request);
    let (status, body) = send_request(req, test_verifier(), configure(db, options)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body)["order_id"], 8);
}

#[actix_web::test]
async fn token_identity_beats_explicit_customer_id() {
    let _ = env_logger::try_init().ok();
    let mut request = cart();
    request["customer_id"] = json!(17);
    let mut db = MockOrderManager::new();
    db.expect_insert_order().withf(|order: &NewOrder| order.customer_id == CUSTOMER_ID).times(1).returning(|_| Ok(9));
    let options = ApiOptions { allow_explicit_customer_id: true };
    let req = TestRequest::post().uri("/orders").insert_header(bearer(CUSTOMER_TOKEN)).set_json(request);
    let (status, _) = send_request(req, test_verifier(), configure(db, options)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn invalid_carts_are_rejected_before_any_write() {
    let _ = env_logger::try_init().ok();
    let bad_carts = [
        json!({"id_restaurante": 3, "tipo": "delivery", "productos": [{"id_producto": 5, "cantidad": 2}]}),
        json!({"id_restaurante": 3, "tipo": "para recoger", "productos": []}),
        json!({"id_restaurante": 3, "tipo": "para recoger", "productos": [{"id_producto": 5, "cantidad": 0}]}),
        json!({"tipo": "para recoger", "productos": [{"id_producto": 5, "cantidad": 1}]}),
    ];
    for cart in bad_carts {
        let db = MockOrderManager::new();
        let req = TestRequest::post().uri("/orders").insert_header(bearer(CUSTOMER_TOKEN)).set_json(cart.clone());
        let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{cart}");
        assert!(json(&body)["error"].is_string());
    }
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let db = MockOrderManager::new();
    let req = TestRequest::post()
        .uri("/orders")
        .insert_header(bearer(CUSTOMER_TOKEN))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"productos\": ");
    let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[actix_web::test]
async fn unknown_product_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_insert_order().times(1).returning(|_| Err(OrderFlowError::ProductNotFound(6)));
    let req = TestRequest::post().uri("/orders").insert_header(bearer(CUSTOMER_TOKEN)).set_json(cart());
    let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(&body)["error"].as_str().unwrap().contains("Product #6 does not exist"));
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_order_with_lines().withf(|id| *id == 42).times(1).returning(|_| Ok(Some(sample_order())));
    let req = TestRequest::get().uri("/orders/42").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["order"]["id"], 42);
    assert_eq!(body["order"]["type"], "en restaurante");
    assert_eq!(body["order"]["status"], "pendiente");
    assert_eq!(body["products"][0]["name"], "Tacos");
    assert_eq!(body["products"][0]["cantidad"], 2);
    assert_eq!(body["products"][0]["subtotal"], 2598);
}

#[actix_web::test]
async fn fetch_missing_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_order_with_lines().times(1).returning(|_| Ok(None));
    let req = TestRequest::get().uri("/orders/7").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"The data was not found. Order #7"}"#);
}

#[actix_web::test]
async fn fetch_order_needs_a_token() {
    let _ = env_logger::try_init().ok();
    let db = MockOrderManager::new();
    let req = TestRequest::get().uri("/orders/42");
    let (status, _) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn fetch_my_orders() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_fetch_orders_for_customer()
        .withf(|id| *id == CUSTOMER_ID)
        .times(1)
        .returning(|_| Ok(vec![sample_order().order]));
    let req = TestRequest::get().uri("/orders").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, body) = send_request(req, test_verifier(), configure(db, ApiOptions::default())).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["customer_id"], CUSTOMER_ID);
}
