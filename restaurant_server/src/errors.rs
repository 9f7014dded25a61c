use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use restaurant_engine::{AuthApiError, CatalogApiError, OrderFlowError, ReservationApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("The email address is already registered")]
    Conflict,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
                AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
                AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
                AuthError::CouldNotIssueToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was provided")]
    MissingToken,
    #[error("The access token is invalid. {0}")]
    InvalidToken(String),
    #[error("The access token has expired")]
    ExpiredToken,
    #[error("Invalid or expired access token")]
    Unauthorized,
    #[error("Could not issue an access token. {0}")]
    CouldNotIssueToken(String),
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::ValidationError(s) => Self::InvalidInput(s),
            AuthApiError::EmailAlreadyRegistered => Self::Conflict,
            AuthApiError::InvalidCredentials => Self::InvalidCredentials,
            AuthApiError::UserNotFound(_) => Self::NoRecordFound(e.to_string()),
            AuthApiError::Forbidden(s) => Self::InsufficientPermissions(s),
            AuthApiError::DatabaseError(_) | AuthApiError::PasswordHashError(_) => {
                error!("🔐️ {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::Unauthenticated => Self::AuthenticationError(AuthError::MissingToken),
            OrderFlowError::InvalidInput(s) => Self::InvalidInput(s),
            OrderFlowError::ProductNotFound(_) => Self::BackendError(e.to_string()),
            OrderFlowError::DatabaseError(_) => {
                error!("📦️ {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::ValidationError(s) | CatalogApiError::InUse(s) => Self::InvalidInput(s),
            CatalogApiError::RestaurantNotFound(_)
            | CatalogApiError::MenuNotFound(_)
            | CatalogApiError::ProductNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogApiError::DatabaseError(_) => {
                error!("🍽️ {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<ReservationApiError> for ServerError {
    fn from(e: ReservationApiError) -> Self {
        match e {
            ReservationApiError::ValidationError(s) => Self::InvalidInput(s),
            ReservationApiError::RestaurantNotFound(_) | ReservationApiError::ReservationNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            ReservationApiError::DatabaseError(_) => {
                error!("📅️ {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}
