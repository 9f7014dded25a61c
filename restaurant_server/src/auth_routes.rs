//! Request handler definitions for the authentication authority
//!
//! Registration and login are public. `/auth/verify` is the endpoint the resource services call to check a bearer
//! token, and the `/users` routes are guarded by the token middleware running a local verifier.
use actix_web::{get, http::header::AUTHORIZATION, web, web::ServiceConfig, HttpRequest, HttpResponse};
use log::*;
use restaurant_engine::{
    traits::UserManagement,
    user_objects::{LoginRequest, RegisterRequest, UpdateUserRequest},
    AuthApi,
};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::{JsonResponse, LoginResponse, RegisterResponse, UserResponse},
    errors::{AuthError, ServerError},
    route,
    routes::health,
    verifier::VerifyResponse,
};

/// Registers every authentication authority route for backend `B`.
pub fn configure_auth_routes<B>(cfg: &mut ServiceConfig)
where B: UserManagement + 'static {
    cfg.service(health)
        .service(verify)
        .service(RegisterRoute::<B>::new())
        .service(LoginRoute::<B>::new())
        .service(MyAccountRoute::<B>::new())
        .service(UpdateUserRoute::<B>::new())
        .service(DeleteUserRoute::<B>::new());
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register => Post "/auth/register" impl UserManagement);
/// Route handler for registration
///
/// Expects `name`, `email`, `password` and `role` (`customer` or `administrator`). Responds with 201 and the new
/// user, or 400 if a field is missing or the email is already registered.
pub async fn register<B: UserManagement>(
    api: web::Data<AuthApi<B>>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received registration request");
    let user = api.register(body.into_inner()).await?;
    let response = RegisterResponse { message: "User registered".into(), user };
    Ok(HttpResponse::Created().json(response))
}

route!(login => Post "/auth/login" impl UserManagement);
/// Route handler for login
///
/// Checks an email and password pair and issues a signed access token. An unknown email and a wrong password get the
/// same 400 response.
pub async fn login<B: UserManagement>(
    api: web::Data<AuthApi<B>>,
    signer: web::Data<TokenIssuer>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received login request");
    let user = api.check_credentials(body.into_inner()).await?;
    let token = signer.issue_token(&user)?;
    debug!("💻️ Issued access token to user #{}", user.id);
    let response = LoginResponse { message: "Login successful".into(), token, user };
    Ok(HttpResponse::Ok().json(response))
}

/// Route handler for token verification
///
/// Checks the signature and expiry of the token in the `Authorization` header and returns its claims as
/// `{"user": {...}}`. The `Bearer ` prefix is optional. No database access happens here.
#[get("/auth/verify")]
pub async fn verify(req: HttpRequest, signer: web::Data<TokenIssuer>) -> Result<HttpResponse, ServerError> {
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let authorization = header.to_str().map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    let user = signer.validate(authorization).map_err(|e| {
        debug!("💻️ Token verification failed. {e}");
        e
    })?;
    trace!("💻️ Token verified for user #{}", user.id);
    Ok(HttpResponse::Ok().json(VerifyResponse { user }))
}

//----------------------------------------------   Users  ----------------------------------------------------
route!(my_account => Get "/users/me" impl UserManagement where requires token);
/// The public profile of the caller. 404 if the account was deleted after the token was issued.
pub async fn my_account<B: UserManagement>(
    claims: JwtClaims,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.user_by_id(claims.id).await?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

route!(update_user => Put "/users/{id}" impl UserManagement where requires token);
/// Updates a user's name, email or role. Users may update their own name and email; only administrators may update
/// other accounts or change roles.
pub async fn update_user<B: UserManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT user #{id} by user #{}", claims.id);
    let user = api.update_user(claims.actor(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

route!(delete_user => Delete "/users/{id}" impl UserManagement where requires token);
/// Deletes a user. Administrators only, and never their own account.
pub async fn delete_user<B: UserManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE user #{id} by user #{}", claims.id);
    api.delete_user(claims.actor(), id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::new(format!("User #{id} deleted"))))
}
