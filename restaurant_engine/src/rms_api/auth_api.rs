//! The authentication authority's user administration API.
//!
//! Token issuing is not done here. The engine only establishes *who* a principal is; the server turns a successful
//! [`AuthApi::check_credentials`] call into a signed token.
use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::UserManagement,
    db_types::{Actor, NewUser, Role, User, UserUpdate},
    helpers::{hash_password_off_thread, verify_password_off_thread},
    rms_api::{
        non_blank,
        user_objects::{LoginRequest, RegisterRequest, UpdateUserRequest},
        AuthApiError,
    },
};

pub struct AuthApi<B> {
    db: B,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

impl<B> AuthApi<B>
where B: UserManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Registers a new principal and returns its public projection.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthApiError> {
        let (Some(name), Some(email), Some(password), Some(role)) = (
            non_blank(request.name),
            non_blank(request.email),
            request.password.filter(|p| !p.is_empty()),
            non_blank(request.role),
        ) else {
            return Err(AuthApiError::ValidationError("name, email, password and role are all required".into()));
        };
        let role = role.parse::<Role>().map_err(|e| AuthApiError::ValidationError(e.to_string()))?;
        validate_email(&email)?;
        if self.db.fetch_user_by_email(&email).await?.is_some() {
            debug!("🔐️ Registration refused. {email} is already registered");
            return Err(AuthApiError::EmailAlreadyRegistered);
        }
        let password_hash = hash_password_off_thread(password).await?;
        let account = self.db.create_user(NewUser { name, email, password_hash, role }).await?;
        info!("🔐️ New {} account #{} registered", account.role, account.id);
        Ok(account.public())
    }

    /// Checks an email and password pair. An unknown email and a wrong password produce the same error.
    pub async fn check_credentials(&self, request: LoginRequest) -> Result<User, AuthApiError> {
        let (Some(email), Some(password)) = (non_blank(request.email), request.password.filter(|p| !p.is_empty()))
        else {
            return Err(AuthApiError::ValidationError("email and password are required".into()));
        };
        let account = self.db.fetch_user_by_email(&email).await?;
        let hash = account.as_ref().map(|a| a.password_hash.clone());
        if !verify_password_off_thread(password, hash).await {
            debug!("🔐️ Failed login attempt for {email}");
            return Err(AuthApiError::InvalidCredentials);
        }
        match account {
            Some(account) => Ok(account.public()),
            None => Err(AuthApiError::InvalidCredentials),
        }
    }

    /// Fetches the public projection of a principal. Fails with `UserNotFound` if the account was deleted after the
    /// caller's token was issued.
    pub async fn user_by_id(&self, id: i64) -> Result<User, AuthApiError> {
        self.db.fetch_user_by_id(id).await?.map(|u| u.public()).ok_or(AuthApiError::UserNotFound(id))
    }

    /// Updates the name, email or role of user `id` on behalf of `actor`.
    ///
    /// Checks run in this order:
    /// 1. at least one field is given and the role, if any, is valid (`ValidationError`);
    /// 2. a non-administrator may only update their own account (`Forbidden`);
    /// 3. the account exists (`UserNotFound`);
    /// 4. a non-administrator may not change the stored role (`Forbidden`);
    /// 5. the new email is not in use by another account (`EmailAlreadyRegistered`).
    pub async fn update_user(&self, actor: Actor, id: i64, request: UpdateUserRequest) -> Result<User, AuthApiError> {
        let role = match non_blank(request.role) {
            Some(r) => Some(r.parse::<Role>().map_err(|e| AuthApiError::ValidationError(e.to_string()))?),
            None => None,
        };
        let update = UserUpdate { name: non_blank(request.name), email: non_blank(request.email), role };
        if update.is_empty() {
            return Err(AuthApiError::ValidationError("at least one of name, email or role is required".into()));
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        if !actor.is_admin() && actor.id != id {
            warn!("🔐️ User #{} tried to update account #{id}", actor.id);
            return Err(AuthApiError::Forbidden("You may only update your own account".into()));
        }
        let existing = self.db.fetch_user_by_id(id).await?.ok_or(AuthApiError::UserNotFound(id))?;
        if let Some(role) = update.role {
            if !actor.is_admin() && role != existing.role {
                warn!("🔐️ User #{} tried to change their role to {role}", actor.id);
                return Err(AuthApiError::Forbidden("Only an administrator may change roles".into()));
            }
        }
        if let Some(email) = &update.email {
            if let Some(other) = self.db.fetch_user_by_email(email).await? {
                if other.id != id {
                    return Err(AuthApiError::EmailAlreadyRegistered);
                }
            }
        }
        let updated = self.db.update_user(id, update).await?.ok_or(AuthApiError::UserNotFound(id))?;
        info!("🔐️ Account #{id} updated by #{}", actor.id);
        Ok(updated.public())
    }

    /// Deletes user `id` on behalf of `actor`. Only administrators may delete accounts, and never their own.
    pub async fn delete_user(&self, actor: Actor, id: i64) -> Result<(), AuthApiError> {
        if !actor.is_admin() {
            warn!("🔐️ User #{} tried to delete account #{id} without administrator rights", actor.id);
            return Err(AuthApiError::Forbidden("Only an administrator may delete accounts".into()));
        }
        if actor.id == id {
            return Err(AuthApiError::Forbidden("Administrators may not delete their own account".into()));
        }
        if !self.db.delete_user(id).await? {
            return Err(AuthApiError::UserNotFound(id));
        }
        info!("🔐️ Account #{id} deleted by administrator #{}", actor.id);
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), AuthApiError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AuthApiError::ValidationError(format!("'{email}' is not a valid email address"))),
    }
}
