//! Token verification.
//!
//! The resource service has no notion of identity of its own. Every bearer token it receives is handed to a
//! [`TokenVerifier`], and the request only proceeds once a verdict comes back.
//!
//! * [`RemoteTokenVerifier`] forwards the `Authorization` header to the authentication authority's `/auth/verify`
//!   endpoint. This is what the resource service runs with.
//! * [`LocalTokenVerifier`] checks the signature in-process. The authority uses it to guard its own `/users` routes.
//! * [`InMemoryTokenVerifier`] maps opaque tokens to fixed identities, for tests.
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use log::*;
use reqwest::{header::AUTHORIZATION, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    auth::{strip_bearer, JwtClaims, TokenIssuer},
    config::{AuthConfig, VerifierConfig},
};

#[derive(Debug, Clone, Error)]
pub enum VerifyError {
    #[error("The token was rejected. {0}")]
    Rejected(String),
    #[error("The authentication service did not answer in time")]
    Timeout,
    #[error("Could not reach the authentication service. {0}")]
    Unreachable(String),
    #[error("The authentication service sent an unexpected response. {0}")]
    MalformedResponse(String),
    #[error("Could not configure the token verifier. {0}")]
    Configuration(String),
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Checks the value of an `Authorization` header and returns the identity it carries.
    async fn verify(&self, authorization: &str) -> Result<JwtClaims, VerifyError>;
}

/// The body returned by `GET /auth/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: JwtClaims,
}

//-------------------------------------------  RemoteTokenVerifier  ----------------------------------------------------
pub struct RemoteTokenVerifier {
    client: Client,
    verify_url: String,
}

impl RemoteTokenVerifier {
    /// Builds the verifier and its connection pool. Every call shares the pool and is bounded by `config.timeout`.
    pub fn new(config: &VerifierConfig) -> Result<Self, VerifyError> {
        let client =
            Client::builder().timeout(config.timeout).build().map_err(|e| VerifyError::Configuration(e.to_string()))?;
        let verify_url = format!("{}/auth/verify", config.auth_service_url.trim_end_matches('/'));
        info!("🛂️ Bearer tokens will be verified at {verify_url}");
        Ok(Self { client, verify_url })
    }

    pub fn verify_url(&self) -> &str {
        self.verify_url.as_str()
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, authorization: &str) -> Result<JwtClaims, VerifyError> {
        trace!("🛂️ Forwarding token to {}", self.verify_url);
        let response =
            self.client.get(&self.verify_url).header(AUTHORIZATION, authorization).send().await.map_err(|e| {
                if e.is_timeout() {
                    VerifyError::Timeout
                } else {
                    VerifyError::Unreachable(e.to_string())
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::Rejected(format!("The authority answered with {status}")));
        }
        let body =
            response.json::<VerifyResponse>().await.map_err(|e| VerifyError::MalformedResponse(e.to_string()))?;
        trace!("🛂️ Token verified for user #{}", body.user.id);
        Ok(body.user)
    }
}

//-------------------------------------------  LocalTokenVerifier  -----------------------------------------------------
pub struct LocalTokenVerifier {
    issuer: TokenIssuer,
}

impl LocalTokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self { issuer: TokenIssuer::new(config) }
    }
}

#[async_trait]
impl TokenVerifier for LocalTokenVerifier {
    async fn verify(&self, authorization: &str) -> Result<JwtClaims, VerifyError> {
        self.issuer.validate(authorization).map_err(|e| VerifyError::Rejected(e.to_string()))
    }
}

//-------------------------------------------  InMemoryTokenVerifier  --------------------------------------------------
#[derive(Default)]
pub struct InMemoryTokenVerifier {
    tokens: HashMap<String, JwtClaims>,
    calls: AtomicUsize,
}

impl InMemoryTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, claims: JwtClaims) -> Self {
        self.tokens.insert(token.to_string(), claims);
        self
    }

    /// The number of times [`TokenVerifier::verify`] has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for InMemoryTokenVerifier {
    async fn verify(&self, authorization: &str) -> Result<JwtClaims, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .get(strip_bearer(authorization))
            .cloned()
            .ok_or_else(|| VerifyError::Rejected("Unknown token".into()))
    }
}
