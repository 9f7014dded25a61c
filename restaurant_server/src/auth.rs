//! Access tokens.
//!
//! The authentication authority signs a [`JwtClaims`] bundle with a shared secret (HS256) when a user logs in. Tokens
//! are stateless: there is no revocation list, and a token stays valid until it expires.
use std::{
    future::{ready, Ready},
    time::Duration,
};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::Utc;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use restaurant_engine::db_types::{Actor, Role, User};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// The identity carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Issued-at, in seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, in seconds since the Unix epoch.
    pub exp: i64,
}

impl JwtClaims {
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// Handlers take `JwtClaims` as an argument to require an authenticated caller, or `Option<JwtClaims>` when the
/// caller may be anonymous. The claims are placed in the request extensions by the token auth middleware.
impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned();
        ready(claims.ok_or(ServerError::AuthenticationError(AuthError::MissingToken)))
    }
}

/// Removes the optional `Bearer ` scheme from an `Authorization` header value.
pub fn strip_bearer(authorization: &str) -> &str {
    let value = authorization.trim();
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim_start(),
        None if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    }
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            lifetime: config.token_lifetime,
        }
    }

    /// Issue a new access token for the given user.
    /// This method DOES NOT check the user's credentials. This must be done prior to calling `issue_token`.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let lifetime = i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX);
        self.issue_token_with_lifetime(user, lifetime)
    }

    /// Issues a token that expires `lifetime` seconds from now. A negative lifetime produces an expired token.
    pub fn issue_token_with_lifetime(&self, user: &User, lifetime: i64) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let claims = JwtClaims {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat,
            exp: iat.saturating_add(lifetime),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::CouldNotIssueToken(e.to_string()))?;
        trace!("🔐️ Issued access token for user #{}", user.id);
        Ok(token)
    }

    /// Checks the signature and expiry of a token and returns its claims. The `Bearer ` prefix is optional.
    pub fn validate(&self, authorization: &str) -> Result<JwtClaims, AuthError> {
        let token = strip_bearer(authorization);
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);
        jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &validation).map(|data| data.claims).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken(e.to_string()),
            },
        )
    }
}
