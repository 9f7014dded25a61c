use std::sync::Arc;

use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use restaurant_engine::{
    db_types::{NewUser, Role, User, UserUpdate},
    helpers::hash_password,
    AuthApi,
};
use serde_json::json;

use super::{
    helpers::{
        account,
        bearer,
        get_auth_config,
        json,
        send_request,
        test_verifier,
        ADMIN_ID,
        ADMIN_TOKEN,
        CUSTOMER_ID,
        CUSTOMER_TOKEN,
    },
    mocks::MockUserManager,
};
use crate::{
    auth::TokenIssuer,
    auth_routes::{verify, DeleteUserRoute, LoginRoute, MyAccountRoute, RegisterRoute, UpdateUserRoute},
    verifier::TokenVerifier,
};

fn configure(db: MockUserManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(AuthApi::new(db)))
            .app_data(web::Data::new(TokenIssuer::new(&get_auth_config())))
            .service(verify)
            .service(RegisterRoute::<MockUserManager>::new())
            .service(LoginRoute::<MockUserManager>::new())
            .service(MyAccountRoute::<MockUserManager>::new())
            .service(UpdateUserRoute::<MockUserManager>::new())
            .service(DeleteUserRoute::<MockUserManager>::new());
    }
}

fn verifier_data() -> web::Data<dyn TokenVerifier> {
    let verifier: Arc<dyn TokenVerifier> = test_verifier();
    web::Data::from(verifier)
}

fn test_user(id: i64) -> User {
    account(id, Role::Customer, "").public()
}

//----------------------------------------------   Register  ----------------------------------------------------

#[actix_web::test]
async fn register_new_user() {
    let _ = env_logger::try_init().ok();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_email().withf(|email| email == "ana@example.com").times(1).returning(|_| Ok(None));
    db.expect_create_user()
        .withf(|user: &NewUser| {
            user.name == "Ana" && user.role == Role::Administrator && user.password_hash.starts_with("$argon2")
        })
        .times(1)
        .returning(|user| {
            let mut account = account(5, user.role, &user.password_hash);
            account.name = user.name;
            account.email = user.email;
            Ok(account)
        });
    let req = TestRequest::post().uri("/auth/register").set_json(json!({
        "nombre": "Ana",
        "email": "ana@example.com",
        "contrasena": "hunter22",
        "rol": "administrador"
    }));
    let (status, body) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["message"], "User registered");
    assert_eq!(body["user"]["id"], 5);
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert_eq!(body["user"]["role"], "administrator");
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn register_duplicate_email() {
    let _ = env_logger::try_init().ok();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_email().times(1).returning(|_| Ok(Some(account(5, Role::Customer, "x"))));
    let req = TestRequest::post().uri("/auth/register").set_json(json!({
        "name": "Ana",
        "email": "user5@example.com",
        "password": "hunter22",
        "role": "customer"
    }));
    let (status, body) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"The email address is already registered"}"#);
}

#[actix_web::test]
async fn register_missing_fields() {
    let _ = env_logger::try_init().ok();
    let db = MockUserManager::new();
    let req = TestRequest::post().uri("/auth/register").set_json(json!({"name": "Ana", "email": "ana@example.com"}));
    let (status, _) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

//----------------------------------------------   Login  ----------------------------------------------------

#[actix_web::test]
async fn login_issues_a_valid_token() {
    let _ = env_logger::try_init().ok();
    let hash = hash_password("hunter22").unwrap();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_email().times(1).returning(move |_| Ok(Some(account(5, Role::Customer, &hash))));
    let req = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "user5@example.com", "contrasena": "hunter22"}));
    let (status, body) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["id"], 5);
    let token = body["token"].as_str().unwrap();
    let claims = TokenIssuer::new(&get_auth_config()).validate(token).unwrap();
    assert_eq!(claims.id, 5);
    assert_eq!(claims.email, "user5@example.com");
    assert_eq!(claims.role, Role::Customer);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[actix_web::test]
async fn login_failures_look_the_same() {
    let _ = env_logger::try_init().ok();
    let hash = hash_password("hunter22").unwrap();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_email()
        .withf(|email| email == "user5@example.com")
        .returning(move |_| Ok(Some(account(5, Role::Customer, &hash))));
    db.expect_fetch_user_by_email().withf(|email| email == "nobody@example.com").returning(|_| Ok(None));
    let configure = configure(db);
    let wrong_password = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "user5@example.com", "password": "letmein"}));
    let unknown_email = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "nobody@example.com", "password": "hunter22"}));
    let service = test::init_service(App::new().app_data(verifier_data()).configure(configure)).await;
    let mut bodies = vec![];
    for req in [wrong_password, unknown_email] {
        let res = test::call_service(&service, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        bodies.push(test::read_body(res).await);
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0], r#"{"error":"Invalid email or password"}"#);
}

//----------------------------------------------   Verify  ----------------------------------------------------

#[actix_web::test]
async fn verify_returns_the_claims() {
    let _ = env_logger::try_init().ok();
    let token = TokenIssuer::new(&get_auth_config()).issue_token(&test_user(5)).unwrap();
    for header in [format!("Bearer {token}"), token.clone()] {
        let req = TestRequest::get().uri("/auth/verify").insert_header(("Authorization", header));
        let (status, body) = send_request(req, test_verifier(), configure(MockUserManager::new())).await;
        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["user"]["id"], 5);
        assert_eq!(body["user"]["role"], "customer");
    }
}

#[actix_web::test]
async fn verify_rejects_bad_tokens() {
    let _ = env_logger::try_init().ok();
    let issuer = TokenIssuer::new(&get_auth_config());
    let expired = issuer.issue_token_with_lifetime(&test_user(5), -10).unwrap();
    let mut tampered = issuer.issue_token(&test_user(5)).unwrap();
    tampered.push('x');
    let headers = [Some(format!("Bearer {expired}")), Some(format!("Bearer {tampered}")), Some("Bearer".into()), None];
    for header in headers {
        let mut req = TestRequest::get().uri("/auth/verify");
        if let Some(header) = header.clone() {
            req = req.insert_header(("Authorization", header));
        }
        let (status, body) = send_request(req, test_verifier(), configure(MockUserManager::new())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header:?}");
        assert!(json(&body)["error"].is_string());
    }
}

//----------------------------------------------   Users  ----------------------------------------------------

#[actix_web::test]
async fn fetch_my_account() {
    let _ = env_logger::try_init().ok();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_id()
        .withf(|id| *id == CUSTOMER_ID)
        .times(1)
        .returning(|id| Ok(Some(account(id, Role::Customer, "secret-hash"))));
    let req = TestRequest::get().uri("/users/me").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, body) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("secret-hash"));
    assert_eq!(json(&body)["user"]["id"], CUSTOMER_ID);
}

#[actix_web::test]
async fn deleted_account_is_not_found() {
    let _ = env_logger::try_init().ok();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_id().times(1).returning(|_| Ok(None));
    let req = TestRequest::get().uri("/users/me").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, _) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn users_routes_need_a_token() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::get().uri("/users/me");
    let (status, _) = send_request(req, test_verifier(), configure(MockUserManager::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn update_own_name() {
    let _ = env_logger::try_init().ok();
    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_id().times(1).returning(|id| Ok(Some(account(id, Role::Customer, ""))));
    db.expect_update_user()
        .withf(|id, update: &UserUpdate| *id == CUSTOMER_ID && update.name.as_deref() == Some("Bea"))
        .times(1)
        .returning(|id, _| {
            let mut account = account(id, Role::Customer, "");
            account.name = "Bea".into();
            Ok(Some(account))
        });
    let req = TestRequest::put()
        .uri(&format!("/users/{CUSTOMER_ID}"))
        .insert_header(bearer(CUSTOMER_TOKEN))
        .set_json(json!({"nombre": "Bea"}));
    let (status, body) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["user"]["name"], "Bea");
}

#[actix_web::test]
async fn customers_cannot_update_others_or_promote_themselves() {
    let _ = env_logger::try_init().ok();
    // Updating someone else is refused before the database is consulted
    let req =
        TestRequest::put().uri("/users/2").insert_header(bearer(CUSTOMER_TOKEN)).set_json(json!({"name": "Eve"}));
    let (status, _) = send_request(req, test_verifier(), configure(MockUserManager::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut db = MockUserManager::new();
    db.expect_fetch_user_by_id().times(1).returning(|id| Ok(Some(account(id, Role::Customer, ""))));
    let req = TestRequest::put()
        .uri(&format!("/users/{CUSTOMER_ID}"))
        .insert_header(bearer(CUSTOMER_TOKEN))
        .set_json(json!({"rol": "administrador"}));
    let (status, _) = send_request(req, test_verifier(), configure(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn delete_rules() {
    let _ = env_logger::try_init().ok();
    // Customers cannot delete accounts
    let req = TestRequest::delete().uri("/users/2").insert_header(bearer(CUSTOMER_TOKEN));
    let (status, _) = send_request(req, test_verifier(), configure(MockUserManager::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Administrators cannot delete themselves
    let req = TestRequest::delete().uri(&format!("/users/{ADMIN_ID}")).insert_header(bearer(ADMIN_TOKEN));
    let (status, _) = send_request(req, test_verifier(), configure(MockUserManager::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut db = MockUserManager::new();
    db.expect_delete_user().withf(|id| *id == 2).times(1).returning(|_| Ok(true));
    db.expect_delete_user().withf(|id| *id == 3).times(1).returning(|_| Ok(false));
    let service = test::init_service(App::new().app_data(verifier_data()).configure(configure(db))).await;
    let req = TestRequest::delete().uri("/users/2").insert_header(bearer(ADMIN_TOKEN)).to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let req = TestRequest::delete().uri("/users/3").insert_header(bearer(ADMIN_TOKEN)).to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
