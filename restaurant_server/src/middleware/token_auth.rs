//! Bearer token middleware.
//!
//! Place this on any route or service that needs to know who the caller is. The `Authorization` header is handed to
//! the [`TokenVerifier`] registered as app data, and on success the resulting [`JwtClaims`] are stored in the request
//! extensions, where handlers can extract them.
//!
//! Every verification failure is answered with 401. The cause is logged, never returned to the client.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web,
    Error,
    HttpMessage,
    ResponseError,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;

use crate::{
    errors::{AuthError, ServerError},
    verifier::TokenVerifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Requests without an `Authorization` header are refused.
    Required,
    /// Requests without an `Authorization` header continue anonymously. A header that is present must still verify.
    Optional,
}

pub struct TokenAuthFactory {
    mode: AuthMode,
}

impl TokenAuthFactory {
    pub fn required() -> Self {
        Self { mode: AuthMode::Required }
    }

    pub fn optional() -> Self {
        Self { mode: AuthMode::Optional }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuthFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = TokenAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(TokenAuthService { mode: self.mode, service: Rc::new(service) })
    }
}

pub struct TokenAuthService<S> {
    mode: AuthMode,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mode = self.mode;
        Box::pin(async move {
            let header = req.headers().get(AUTHORIZATION).map(|v| v.to_str().map(String::from));
            let authorization = match (header, mode) {
                (Some(Ok(value)), _) => value,
                (Some(Err(e)), _) => {
                    warn!("🛂️ Unreadable Authorization header on {}. {e}", req.path());
                    return Ok(reject(req, AuthError::Unauthorized));
                },
                (None, AuthMode::Optional) => {
                    trace!("🛂️ Anonymous request to {}", req.path());
                    return service.call(req).await.map(ServiceResponse::map_into_left_body);
                },
                (None, AuthMode::Required) => {
                    debug!("🛂️ No Authorization header on {}", req.path());
                    return Ok(reject(req, AuthError::MissingToken));
                },
            };
            let Some(verifier) = req.app_data::<web::Data<dyn TokenVerifier>>().cloned() else {
                error!("🛂️ No token verifier has been configured. Refusing {}", req.path());
                let err = ServerError::BackendError("Token verification is not available".into());
                let response = err.error_response();
                return Ok(req.into_response(response).map_into_right_body());
            };
            match verifier.verify(&authorization).await {
                Ok(claims) => {
                    trace!("🛂️ Request to {} authenticated as user #{}", req.path(), claims.id);
                    req.extensions_mut().insert(claims);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                },
                Err(e) => {
                    warn!("🛂️ Token verification failed for {}. {e}", req.path());
                    Ok(reject(req, AuthError::Unauthorized))
                },
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, reason: AuthError) -> ServiceResponse<EitherBody<B>> {
    let response = ServerError::AuthenticationError(reason).error_response();
    req.into_response(response).map_into_right_body()
}
