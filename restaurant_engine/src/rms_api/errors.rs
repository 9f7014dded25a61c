use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("The email address is already registered")]
    EmailAlreadyRegistered,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User #{0} does not exist")]
    UserNotFound(i64),
    #[error("{0}")]
    Forbidden(String),
    #[error("Could not process password. {0}")]
    PasswordHashError(String),
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("A customer identity is required to place an order")]
    Unauthenticated,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Product #{0} does not exist")]
    ProductNotFound(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Restaurant #{0} does not exist")]
    RestaurantNotFound(i64),
    #[error("Menu #{0} does not exist")]
    MenuNotFound(i64),
    #[error("Product #{0} does not exist")]
    ProductNotFound(i64),
    #[error("{0}")]
    InUse(String),
}

#[derive(Debug, Clone, Error)]
pub enum ReservationApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Restaurant #{0} does not exist")]
    RestaurantNotFound(i64),
    #[error("Reservation #{0} does not exist")]
    ReservationNotFound(i64),
}
