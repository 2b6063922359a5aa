use std::sync::Arc;

use log::{error, info};

use hornet::configuration::config::Config;
use hornet::presentation::ConsoleSurface;
use hornet::session_management::SessionController;
use hornet::web_interface::WebServer;

#[tokio::main]
async fn main() {
    // Example how to log
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
██╗  ██╗ ██████╗ ██████╗ ███╗   ██╗███████╗████████╗
██║  ██║██╔═══██╗██╔══██╗████╗  ██║██╔════╝╚══██╔══╝
███████║██║   ██║██████╔╝██╔██╗ ██║█████╗     ██║
██╔══██║██║   ██║██╔══██╗██║╚██╗██║██╔══╝     ██║
██║  ██║╚██████╔╝██║  ██║██║ ╚████║███████╗   ██║
╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═══╝╚══════╝   ╚═╝
====================================================
     DoS/DDoS attack campaign console v0.1.0
====================================================
"
    );

    info!("Importing configuration");

    let mut config = Config::from_args();
    if let Some(path) = config.config_file.clone() {
        config = match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Unable to import configuration from file: {:?}", e);
                std::process::exit(1);
            }
        };
    }
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:?}", e);
        std::process::exit(1);
    }

    info!("Configuration imported successfully");
    info!("Upstream attack engine at {}", config.upstream_url);

    let surface = Arc::new(ConsoleSurface);
    let controller = match SessionController::new(&config, surface) {
        Ok(controller) => Arc::new(controller),
        Err(e) => {
            error!("Unable to create a session controller: {:?}, exiting...", e);
            std::process::exit(1);
        }
    };

    let server = WebServer::new(Arc::clone(&controller));
    let port = config.dashboard_port;
    let result = tokio::spawn(async move {
        info!("Spawning the dashboard server");
        if let Err(e) = server.start(port).await {
            error!("Error occured in the dashboard server: {:?}, exiting...", e);
        }
    });

    let _ = result.await.map_err(|e| {
        error!("Error joining at the end of execution: {:?}", e);
        std::process::exit(1);
    });
}
