//! # Storage interfaces
//!
//! This module defines the contracts that database backends must fulfil in order to serve the restaurant engine.
//!
//! * [`UserManagement`] is the credential store owned by the authentication authority.
//! * [`CatalogManagement`] covers restaurants, the menus they publish, and the priced products on those menus.
//! * [`OrderManagement`] is the order ledger. Its [`OrderManagement::insert_order`] method is the only place where
//!   orders are written, and implementations must write the header and all of its lines atomically.
//! * [`ReservationManagement`] stores table reservations.
//!
//! The public APIs in [`crate::rms_api`] are generic over these traits, so that tests can substitute mocks for the
//! SQLite backend.
mod catalog_management;
mod order_management;
mod reservation_management;
mod user_management;

pub use catalog_management::CatalogManagement;
pub use order_management::OrderManagement;
pub use reservation_management::ReservationManagement;
pub use user_management::UserManagement;
