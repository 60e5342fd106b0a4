use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use video_wall::config::Config;
use video_wall::sys_core::{AppState, run_server};
use video_wall::sys_videoapi::core::VideoLibrary;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let library = VideoLibrary::new(config.upload_dir.clone(), config.db_file.clone());
    if let Err(e) = library.ensure_initialized().await {
        error!(error = %e, "could not prepare upload dir / metadata file");
        std::process::exit(1);
    }

    info!(
        port = config.port,
        upload_dir = %config.upload_dir.display(),
        db_file = %config.db_file.display(),
        "video wall starting"
    );

    let port = config.port;
    run_server(port, Arc::new(AppState { config, library })).await;
}
