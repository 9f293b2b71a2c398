pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

pub use state::AppState;

use crate::config;
use crate::error::AppError;
use tokio_util::sync::CancellationToken;

/// Application entry point. Initializes tracing, configuration, and starts the server.
pub async fn run() -> Result<(), AppError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration()?;
    ::tracing::info!(
        http_port = settings.http_port,
        max_results = settings.search_max_results,
        page_size = settings.search_page_size,
        cache_ttl_secs = settings.search_cache_ttl.as_secs(),
        "Loaded settings"
    );

    // Shared shutdown token: used by the session sweeper and the server
    let shutdown_token = CancellationToken::new();

    let app_state = AppState::from_settings(&settings, shutdown_token.clone()).await?;
    let app = router::api_router(app_state);

    server::serve(app, settings.http_port, shutdown_token).await
}
