use std::{sync::Arc, time::Duration};

use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use log::debug;
use restaurant_engine::db_types::{Role, UserAccount};
use serde_json::Value;

use crate::{
    auth::JwtClaims,
    config::AuthConfig,
    server::{json_config, path_config},
    verifier::{InMemoryTokenVerifier, TokenVerifier},
};

pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_ID: i64 = 1;
pub const ADMIN_ID: i64 = 99;

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new("925842e11914fdd0c9a2ab8a38dac9de57b3e392372cde1661b1a84b1d8e430e", Duration::from_secs(3600))
}

pub fn claims(id: i64, role: Role) -> JwtClaims {
    JwtClaims { id, name: format!("User {id}"), email: format!("user{id}@example.com"), role, iat: 0, exp: 0 }
}

pub fn account(id: i64, role: Role, password_hash: &str) -> UserAccount {
    UserAccount {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        password_hash: password_hash.to_string(),
        role,
        created_at: Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap(),
    }
}

/// A verifier that knows a customer token and an administrator token.
pub fn test_verifier() -> Arc<InMemoryTokenVerifier> {
    let verifier = InMemoryTokenVerifier::new()
        .with_token(CUSTOMER_TOKEN, claims(CUSTOMER_ID, Role::Customer))
        .with_token(ADMIN_TOKEN, claims(ADMIN_ID, Role::Administrator));
    Arc::new(verifier)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Sends `req` to an app configured by `configure`, with `verifier` checking bearer tokens.
pub async fn send_request<F>(
    req: TestRequest,
    verifier: Arc<InMemoryTokenVerifier>,
    configure: F,
) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
{
    let verifier: Arc<dyn TokenVerifier> = verifier;
    let app = App::new()
        .app_data(json_config())
        .app_data(path_config())
        .app_data(web::Data::from(verifier))
        .configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {body}"))
}
