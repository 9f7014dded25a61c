use dotenvy::dotenv;
use log::info;
use restaurant_server::{cli::handle_command_line_args, config::AuthServerConfig, server::run_auth_server};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = AuthServerConfig::from_env_or_default();

    info!("🚀️ Starting authentication server on {}:{}", config.host, config.port);
    match run_auth_server(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
