//! Shared test support utilities
//!
//! Provides a `MockCatalog` implementing `SongCatalog` for use in unit and
//! integration tests. Matching is delegated to `InMemorySongCatalog`.

use crate::adapter::memory::InMemorySongCatalog;
use crate::domain::Song;
use crate::error::SearchError;
use crate::port::SongCatalog;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Mock catalog that serves a fixed song list and records the queries it sees.
pub struct MockCatalog {
    inner: InMemorySongCatalog,
    queries: AtomicUsize,
    last_query: Mutex<Option<Vec<String>>>,
    should_fail: AtomicBool,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::with_songs(Vec::new())
    }

    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self {
            inner: InMemorySongCatalog::new(songs),
            queries: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of queries that reached the catalog, failed ones included.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<Vec<String>> {
        self.last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SongCatalog for MockCatalog {
    fn find_by_genres<'a>(
        &'a self,
        genres: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Song>, SearchError>> + Send + 'a>> {
        Box::pin(async move {
            self.queries.fetch_add(1, Ordering::SeqCst);
            *self
                .last_query
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(genres.to_vec());

            if self.should_fail.load(Ordering::SeqCst) {
                return Err(SearchError::CatalogUnavailable(
                    "mock catalog failure".to_string(),
                ));
            }

            Ok(self.inner.matching(genres))
        })
    }
}
