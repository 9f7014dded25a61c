use dotenvy::dotenv;
use log::info;
use restaurant_server::{cli::handle_command_line_args, config::ApiServerConfig, server::run_api_server};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = ApiServerConfig::from_env_or_default();

    info!("🚀️ Starting resource API server on {}:{}", config.host, config.port);
    match run_api_server(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
