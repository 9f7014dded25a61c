//! # Restaurant management servers
//! This crate hosts the HTTP layer for the two restaurant management services:
//!
//! * The **authentication authority** (`rms_auth_server`) registers users, checks credentials and issues signed,
//!   time-limited access tokens. Other services send it bearer tokens at `/auth/verify` to learn who a caller is.
//! * The **resource API service** (`rms_api_server`) serves restaurants, menus, products, reservations and orders. It
//!   has no notion of identity of its own: every bearer token is checked by a [`verifier::TokenVerifier`], which in
//!   production is a round trip to the authority.
//!
//! ## Configuration
//! Both servers are configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response (both servers).
//! * `/auth/register`, `/auth/login`, `/auth/verify` and `/users/...`: see [`auth_routes`].
//! * `/orders`, `/restaurants`, `/menus`, `/products` and `/reservations`: see [`routes`].

pub mod auth;
pub mod auth_routes;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod verifier;

#[cfg(test)]
mod endpoint_tests;
