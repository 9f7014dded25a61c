//! Restaurant Engine
//!
//! The core of the restaurant management services. This library is independent of the HTTP layer.
//!
//! The library is divided into two main sections:
//! 1. Storage ([`mod@db`]). SQLite is the supported backend. You should never need to access the database directly.
//!    Instead, use the public APIs below. The exception is the data types used in the database. These are defined in
//!    the [`db_types`] module and are public.
//! 2. The public API ([`mod@rms_api`]). This provides user administration for the authentication authority, the
//!    atomic order placement workflow, and the catalog and reservation operations of the resource service. Storage
//!    backends implement the traits in [`traits`] to act as a backend for these APIs.
mod db;

pub mod db_types;
pub mod helpers;
pub mod rms_api;

#[cfg(feature = "test_utils")]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use db::traits;
pub use rms_api::{
    auth_api::AuthApi,
    catalog_api::CatalogApi,
    catalog_objects,
    errors::{AuthApiError, CatalogApiError, OrderFlowError, ReservationApiError},
    order_flow_api::OrderFlowApi,
    order_objects,
    reservation_api::ReservationApi,
    reservation_objects,
    user_objects,
};
