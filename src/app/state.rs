use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::adapter::memory::InMemorySessionStore;
use crate::adapter::postgres::{self, PgSongCatalog};
use crate::config::Settings;
use crate::error::AppError;
use crate::port::{SessionStore, SongCatalog};
use crate::search::{RankedSearchCache, SearchRanker, SearchService};

/// Shared state of the search routes.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    /// Ceiling applied to `totalRequested`.
    pub max_results: usize,
}

impl AppState {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn SongCatalog>,
        store: Arc<dyn SessionStore>,
        page_size: usize,
        max_results: usize,
    ) -> Self {
        let cache = RankedSearchCache::new(SearchRanker::new(catalog), store);
        Self {
            search: Arc::new(SearchService::new(cache, page_size)),
            max_results,
        }
    }

    /// Create `AppState` from configuration settings.
    ///
    /// Opens the Postgres pool lazily, applies migrations when enabled, and
    /// spawns the session sweeper, which stops when `shutdown_token` is
    /// cancelled.
    pub async fn from_settings(
        settings: &Settings,
        shutdown_token: CancellationToken,
    ) -> Result<Self, AppError> {
        let pool = postgres::connect_lazy(settings)?;
        if settings.database_run_migrations {
            postgres::run_migrations(&pool).await?;
            info!("Catalog migrations applied");
        }

        let store = Arc::new(InMemorySessionStore::new(settings.search_cache_ttl));
        store
            .clone()
            .spawn_sweeper(settings.search_cache_sweep_interval, shutdown_token);

        Ok(Self::new(
            Arc::new(PgSongCatalog::new(pool)),
            store,
            settings.search_page_size,
            settings.search_max_results,
        ))
    }
}
