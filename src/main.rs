//! Login Portal - Entry Point
//!
//! Serves a login form, checks credentials against a configured user table
//! and gates a dashboard behind a signed session cookie.

use env_logger::Env;
use log::{error, info};

use login_portal::Server;
use login_portal::config::ServerConfig;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Launching login portal...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
