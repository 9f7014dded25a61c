use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::*;
use rand::{thread_rng, RngCore};
use rms_common::{parse_boolean_flag, Secret};

const DEFAULT_AUTH_HOST: &str = "127.0.0.1";
const DEFAULT_AUTH_PORT: u16 = 4000;
const DEFAULT_API_HOST: &str = "127.0.0.1";
const DEFAULT_API_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/rms.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(2 * 60 * 60);
const DEFAULT_AUTH_SERVICE_URL: &str = "http://127.0.0.1:4000";
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_millis(5000);

//-----------------------------------------------  DatabaseConfig  -----------------------------------------------------
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Apply pending migrations when the server starts.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: DEFAULT_DATABASE_URL.into(), max_connections: DEFAULT_MAX_CONNECTIONS, run_migrations: true }
    }
}

impl DatabaseConfig {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string(), ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let url = env::var("RMS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ RMS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.into()
        });
        let max_connections = parse_env("RMS_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let run_migrations = parse_boolean_flag(env::var("RMS_RUN_MIGRATIONS").ok(), true);
        Self { url, max_connections, run_migrations }
    }
}

//-----------------------------------------------  AuthServerConfig  ---------------------------------------------------
/// Configuration for the authentication authority.
#[derive(Clone, Debug)]
pub struct AuthServerConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Default for AuthServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_AUTH_HOST.to_string(),
            port: DEFAULT_AUTH_PORT,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AuthServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("RMS_AUTH_HOST").ok().unwrap_or_else(|| DEFAULT_AUTH_HOST.into());
        let port = parse_env("RMS_AUTH_PORT", DEFAULT_AUTH_PORT);
        let database = DatabaseConfig::from_env_or_default();
        let auth = AuthConfig::from_env_or_default();
        Self { host, port, database, auth }
    }
}

//-----------------------------------------------  ApiServerConfig  ----------------------------------------------------
/// Configuration for the resource API service.
#[derive(Clone, Debug)]
pub struct ApiServerConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub verifier: VerifierConfig,
    pub options: ApiOptions,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
            database: DatabaseConfig::default(),
            verifier: VerifierConfig::default(),
            options: ApiOptions::default(),
        }
    }
}

impl ApiServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("RMS_API_HOST").ok().unwrap_or_else(|| DEFAULT_API_HOST.into());
        let port = parse_env("RMS_API_PORT", DEFAULT_API_PORT);
        let database = DatabaseConfig::from_env_or_default();
        let verifier = VerifierConfig::from_env_or_default();
        let options = ApiOptions::from_env_or_default();
        Self { host, port, database, verifier, options }
    }
}

/// Runtime switches for the resource API handlers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiOptions {
    /// If true, unauthenticated callers may name the customer of an order in the request body. Only enable this when
    /// the API is reachable by trusted services alone. **DANGER**
    pub allow_explicit_customer_id: bool,
}

impl ApiOptions {
    pub fn from_env_or_default() -> Self {
        let allow_explicit_customer_id = parse_boolean_flag(env::var("RMS_ALLOW_EXPLICIT_CUSTOMER_ID").ok(), false);
        if allow_explicit_customer_id {
            warn!(
                "🚨️ RMS_ALLOW_EXPLICIT_CUSTOMER_ID is enabled. Anyone who can reach this server can place orders on \
                 behalf of any customer."
            );
        }
        Self { allow_explicit_customer_id }
    }
}

//-------------------------------------------------  VerifierConfig  ---------------------------------------------------
/// Where the resource service sends bearer tokens to be checked.
#[derive(Clone, Debug)]
pub struct VerifierConfig {
    /// Base URL of the authentication authority, e.g. `http://127.0.0.1:4000`.
    pub auth_service_url: String,
    /// Upper bound on a single verification round trip.
    pub timeout: Duration,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { auth_service_url: DEFAULT_AUTH_SERVICE_URL.into(), timeout: DEFAULT_AUTH_TIMEOUT }
    }
}

impl VerifierConfig {
    pub fn from_env_or_default() -> Self {
        let auth_service_url = env::var("RMS_AUTH_SERVICE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ RMS_AUTH_SERVICE_URL is not set. Using the default, {DEFAULT_AUTH_SERVICE_URL}.");
            DEFAULT_AUTH_SERVICE_URL.into()
        });
        let timeout_ms = parse_env("RMS_AUTH_TIMEOUT_MS", DEFAULT_AUTH_TIMEOUT.as_millis() as u64);
        let auth_service_url = auth_service_url.trim_end_matches('/').to_string();
        Self { auth_service_url, timeout: Duration::from_millis(timeout_ms) }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared secret used to sign and check access tokens (HMAC-SHA256).
    pub jwt_secret: Secret<String>,
    /// How long an access token stays valid after login.
    pub token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. DO NOT operate \
             in production like this, since every token becomes invalid when the server restarts. 🚨️🚨️🚨️"
        );
        Self { jwt_secret: Secret::new(random_secret()), token_lifetime: DEFAULT_TOKEN_LIFETIME }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: &str, token_lifetime: Duration) -> Self {
        Self { jwt_secret: Secret::new(jwt_secret.to_string()), token_lifetime }
    }

    pub fn from_env_or_default() -> Self {
        let token_lifetime = Duration::from_secs(parse_env("RMS_TOKEN_LIFETIME", DEFAULT_TOKEN_LIFETIME.as_secs()));
        match env::var("RMS_JWT_SECRET").ok().filter(|s| !s.trim().is_empty()) {
            Some(secret) => Self::new(&secret, token_lifetime),
            None => Self { token_lifetime, ..Self::default() },
        }
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Reads and parses an environment variable, logging and falling back to `default` when it is missing or invalid.
fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => default,
    }
}
