//! # Restaurant engine public API
//!
//! The `rms_api` module exposes the programmatic API for the restaurant management services. Each API is generic over
//! the storage traits it needs, so the authentication authority and the resource service can each hold only the
//! parts they use.
//!
//! * [`auth_api`] is the authentication authority's view of the credential store: registration, credential checks,
//!   and the user administration rules.
//! * [`order_flow_api`] validates carts and places orders atomically.
//! * [`catalog_api`] manages restaurants, menus and products.
//! * [`reservation_api`] manages table reservations.
//!
//! # API usage
//!
//! ```rust,ignore
//! use restaurant_engine::{OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/rms.db", 25).await?;
//! // SqliteDatabase implements OrderManagement
//! let api = OrderFlowApi::new(db);
//! let order_id = api.place_order(Some(customer_id), request).await?;
//! ```

pub mod auth_api;
pub mod catalog_api;
pub mod catalog_objects;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod reservation_api;
pub mod reservation_objects;
pub mod user_objects;

pub use errors::{AuthApiError, CatalogApiError, OrderFlowError, ReservationApiError};
pub use order_objects::{CartLine, OrderRequest};

/// Returns the trimmed value of a text field, or `None` if it is missing or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
