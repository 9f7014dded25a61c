use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::rms_api::{AuthApiError, CatalogApiError, OrderFlowError, ReservationApiError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(sqlx::Error),
    #[error("Database query error: {0}")]
    QueryError(String),
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("Check constraint violated: {0}")]
    CheckViolation(String),
}

impl From<sqlx::Error> for SqliteDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(de) => match de.kind() {
                ErrorKind::UniqueViolation => Self::UniqueViolation(de.message().to_string()),
                ErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(de.message().to_string()),
                ErrorKind::CheckViolation => Self::CheckViolation(de.message().to_string()),
                _ => Self::DriverError(e),
            },
            _ => Self::DriverError(e),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for SqliteDatabaseError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::QueryError(format!("Migration failed. {e}"))
    }
}

impl From<SqliteDatabaseError> for AuthApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::UniqueViolation(_) => Self::EmailAlreadyRegistered,
            e => Self::DatabaseError(e.to_string()),
        }
    }
}

impl From<SqliteDatabaseError> for OrderFlowError {
    fn from(e: SqliteDatabaseError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for CatalogApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for ReservationApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        SqliteDatabaseError::from(e).into()
    }
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        SqliteDatabaseError::from(e).into()
    }
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        SqliteDatabaseError::from(e).into()
    }
}

impl From<sqlx::Error> for ReservationApiError {
    fn from(e: sqlx::Error) -> Self {
        SqliteDatabaseError::from(e).into()
    }
}
