use frontier_path::web::{start_server_with_config, ServerConfig};
use log::{info, warn};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut config = ServerConfig::default();
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config.port = port,
            Err(_) => warn!("Ignoring invalid port {:?}, using {}", arg, config.port),
        }
    }

    info!("Configuration:");
    info!("  Port: {}", config.port);
    info!("  CORS enabled: {}", config.enable_cors);
    info!("  Max sessions: {}", config.max_sessions);
    info!("  Max nodes per graph: {}", config.max_nodes);
    info!("  Session timeout: {} minutes", config.session_timeout_minutes);

    start_server_with_config(config).await?;

    Ok(())
}
