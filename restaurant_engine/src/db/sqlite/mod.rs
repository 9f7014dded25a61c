mod errors;
mod sqlite_impl;

pub mod menus;
pub mod orders;
pub mod products;
pub mod reservations;
pub mod restaurants;
pub mod users;

use std::{env, str::FromStr};

pub use errors::SqliteDatabaseError;
use log::info;
pub use sqlite_impl::SqliteDatabase;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

const SQLITE_DB_URL: &str = "sqlite://data/rms.db";

pub fn db_url() -> String {
    let result = env::var("RMS_DATABASE_URL").unwrap_or_else(|_| {
        info!("🗃️ RMS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("🗃️ Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
