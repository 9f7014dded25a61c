use std::{sync::Arc, time::Duration};

use actix_web::{
    dev::Server,
    error::{JsonPayloadError, PathError},
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    Error,
    HttpRequest,
    HttpServer,
};
use log::*;
use restaurant_engine::{AuthApi, CatalogApi, OrderFlowApi, ReservationApi, SqliteDatabase};

use crate::{
    auth::TokenIssuer,
    auth_routes::configure_auth_routes,
    config::{ApiServerConfig, AuthServerConfig, DatabaseConfig},
    errors::ServerError,
    routes::configure_api_routes,
    verifier::{LocalTokenVerifier, RemoteTokenVerifier, TokenVerifier},
};

const ACCESS_LOG_FORMAT: &str = "%t (%D ms) %s %a %{Host}i %U";
const ACCESS_LOG_TARGET: &str = "rms::access_log";

pub async fn run_auth_server(config: AuthServerConfig) -> Result<(), ServerError> {
    let db = connect(&config.database).await?;
    let srv = create_auth_server(config, db.clone())?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    db.close().await;
    result
}

pub async fn run_api_server(config: ApiServerConfig) -> Result<(), ServerError> {
    let db = connect(&config.database).await?;
    let srv = create_api_server(config, db.clone())?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    db.close().await;
    result
}

/// Opens the connection pool, applying migrations first if so configured.
pub async fn connect(config: &DatabaseConfig) -> Result<SqliteDatabase, ServerError> {
    let db = SqliteDatabase::new_with_url(&config.url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    Ok(db)
}

/// Creates the authentication authority. The server does not start until the returned future is polled.
pub fn create_auth_server(config: AuthServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let issuer = web::Data::new(TokenIssuer::new(&config.auth));
    let verifier: Arc<dyn TokenVerifier> = Arc::new(LocalTokenVerifier::new(&config.auth));
    let verifier = web::Data::from(verifier);
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(db.clone());
        App::new()
            .wrap(Logger::new(ACCESS_LOG_FORMAT).log_target(ACCESS_LOG_TARGET))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(web::Data::new(auth_api))
            .app_data(issuer.clone())
            .app_data(verifier.clone())
            .configure(configure_auth_routes::<SqliteDatabase>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    info!("🚀️ Authentication server listening on {}:{}", config.host, config.port);
    Ok(srv)
}

/// Creates the resource API service. Bearer tokens are checked against the authority at
/// `config.verifier.auth_service_url`.
pub fn create_api_server(config: ApiServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let verifier = RemoteTokenVerifier::new(&config.verifier).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let verifier: Arc<dyn TokenVerifier> = Arc::new(verifier);
    let verifier = web::Data::from(verifier);
    let options = config.options;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let reservation_api = ReservationApi::new(db.clone());
        App::new()
            .wrap(Logger::new(ACCESS_LOG_FORMAT).log_target(ACCESS_LOG_TARGET))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(reservation_api))
            .app_data(web::Data::new(options))
            .app_data(verifier.clone())
            .configure(configure_api_routes::<SqliteDatabase>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    info!("🚀️ Resource API server listening on {}:{}", config.host, config.port);
    Ok(srv)
}

/// Malformed JSON bodies get the same `{"error": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| -> Error {
        debug!("💻️ Rejected request body. {err}");
        ServerError::InvalidInput(format!("Invalid request body. {err}")).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| -> Error {
        ServerError::InvalidInput(format!("Invalid request path. {err}")).into()
    })
}
