use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App, HttpResponse};
use restaurant_engine::db_types::Role;

use super::helpers::{bearer, json, send_request, test_verifier, ADMIN_ID, ADMIN_TOKEN, CUSTOMER_ID, CUSTOMER_TOKEN};
use crate::{auth::JwtClaims, middleware::TokenAuthFactory, route};

route!(whoami => Get "/whoami" requires token);
async fn whoami(claims: JwtClaims) -> HttpResponse {
    HttpResponse::Ok().json(claims)
}

async fn maybe_whoami(claims: Option<JwtClaims>) -> HttpResponse {
    match claims {
        Some(claims) => HttpResponse::Ok().body(format!("user #{}", claims.id)),
        None => HttpResponse::Ok().body("anonymous"),
    }
}

fn configure(cfg: &mut ServiceConfig) {
    cfg.service(WhoamiRoute::new()).service(
        web::resource("/maybe").route(web::get().to(maybe_whoami)).wrap(TokenAuthFactory::optional()),
    );
}

#[actix_web::test]
async fn claims_reach_the_handler() {
    let _ = env_logger::try_init().ok();
    let verifier = test_verifier();
    let req = TestRequest::get().uri("/whoami").insert_header(bearer(ADMIN_TOKEN));
    let (status, body) = send_request(req, verifier.clone(), configure).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["id"], ADMIN_ID);
    assert_eq!(body["role"], "administrator");
    assert_eq!(verifier.call_count(), 1);
}

#[actix_web::test]
async fn token_without_bearer_prefix() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::get().uri("/whoami").insert_header(("Authorization", CUSTOMER_TOKEN));
    let (status, body) = send_request(req, test_verifier(), configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["id"], CUSTOMER_ID);
}

#[actix_web::test]
async fn missing_header_is_rejected_without_verification() {
    let _ = env_logger::try_init().ok();
    let verifier = test_verifier();
    let req = TestRequest::get().uri("/whoami");
    let (status, body) = send_request(req, verifier.clone(), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. No access token was provided"}"#);
    assert_eq!(verifier.call_count(), 0);
}

#[actix_web::test]
async fn unknown_token_is_rejected() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::get().uri("/whoami").insert_header(bearer("not-a-token"));
    let (status, body) = send_request(req, test_verifier(), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. Invalid or expired access token"}"#);
}

#[actix_web::test]
async fn optional_mode_passes_anonymous_requests() {
    let _ = env_logger::try_init().ok();
    let verifier = test_verifier();
    let req = TestRequest::get().uri("/maybe");
    let (status, body) = send_request(req, verifier.clone(), configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "anonymous");
    assert_eq!(verifier.call_count(), 0);

    let req = TestRequest::get().uri("/maybe").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, body) = send_request(req, verifier.clone(), configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("user #{CUSTOMER_ID}"));
}

#[actix_web::test]
async fn optional_mode_still_rejects_bad_tokens() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::get().uri("/maybe").insert_header(bearer("forged"));
    let (status, _) = send_request(req, test_verifier(), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_verifier_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure)).await;
    let req = TestRequest::get().uri("/whoami").insert_header(bearer(CUSTOMER_TOKEN)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn claims_map_to_actors() {
    let claims = JwtClaims {
        id: 4,
        name: "Ana".into(),
        email: "ana@example.com".into(),
        role: Role::Administrator,
        iat: 0,
        exp: 0,
    };
    let actor = claims.actor();
    assert_eq!(actor.id, 4);
    assert!(actor.is_admin());
}
