use crate::{
    db_types::{NewUser, UserAccount, UserUpdate},
    rms_api::AuthApiError,
};

/// The credential store. Emails are unique; an attempt to store a duplicate email must fail with
/// [`AuthApiError::EmailAlreadyRegistered`].
#[allow(async_fn_in_trait)]
pub trait UserManagement {
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, AuthApiError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthApiError>;

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserAccount>, AuthApiError>;

    /// Returns `None` if the user does not exist.
    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<UserAccount>, AuthApiError>;

    /// Returns `false` if the user does not exist.
    async fn delete_user(&self, id: i64) -> Result<bool, AuthApiError>;
}
