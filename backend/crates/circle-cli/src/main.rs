//! circle - maintenance CLI
//!
//! # Examples
//!
//! ```bash
//! # Follow the dartcounter stream of a local server
//! circle watch --url http://localhost:8888
//!
//! # Check camera 2 for 5 seconds
//! circle camera --camera 2 --seconds 5
//! ```

use circle_cli::{Cli, CliResult, Commands, run_camera_check, watch};
use circle_sse::SseClient;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> CliResult<()> {
    let config = circle_config::Config::load()?;
    config.validate()?;

    match command {
        Commands::Watch { url, path } => {
            let base_url = url.unwrap_or(config.client.base_url);
            let path = path.unwrap_or(config.client.path);
            let client =
                SseClient::new(&base_url).with_queue_capacity(config.client.queue_capacity);

            watch(&client, &path, &mut std::io::stdout()).await?;
        }
        Commands::Camera { camera, seconds } => {
            let report =
                run_camera_check(&config.camera, camera, Duration::from_secs(seconds)).await?;

            println!(
                "camera {}: {} frame(s), {} byte(s) in {}s",
                report.camera_id, report.frames, report.bytes, seconds
            );
        }
    }

    Ok(())
}
