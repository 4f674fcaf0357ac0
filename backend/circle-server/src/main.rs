use circle_server::{
    AppState, DartcounterGateway, SSE_LOG_TARGET, build_router, logger, registered_routes,
};
use circle_sse::{SessionConfig, ShutdownCoordinator, SseServer};

use std::error::Error;
use std::net::SocketAddr;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = circle_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = circle_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting circle-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let sse = SseServer::with_config(
        SSE_LOG_TARGET,
        config.sse.queue_capacity,
        SessionConfig {
            send_buffer_size: config.sse.send_buffer_size,
        },
    );
    let shutdown = ShutdownCoordinator::new();

    // Demo data for the dartcounter clients
    let ticker = if config.demo.enabled {
        let gateway = DartcounterGateway::new(sse.clone(), config.demo.clone());
        Some(gateway.spawn_demo_ticker(shutdown.subscribe_guard()))
    } else {
        warn!("Demo ticker disabled, no events will be published");
        None
    };

    let app = build_router(
        AppState {
            sse: sse.clone(),
            shutdown: shutdown.clone(),
        },
        &config.sse.path,
    );

    // Create TCP listener
    let listener = TcpListener::bind(config.bind_addr()).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    for route in registered_routes(&config.sse.path) {
        info!("dartcounter route: {}", route);
    }
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    let mut guard = shutdown.subscribe_guard();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        guard.wait().await;
        // Event streams never end on their own; release them so open
        // connections can drain
        sse.shutdown();
    })
    .await?;

    if let Some(ticker) = ticker
        && let Err(e) = ticker.await
    {
        warn!("Demo ticker ended abnormally: {}", e);
    }

    info!("Graceful shutdown complete");
    Ok(())
}
