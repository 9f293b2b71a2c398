use tracing::info;

/// Handler for GET /api/health
pub async fn health_handler() -> &'static str {
    info!("Health check requested");
    "Healthy"
}
