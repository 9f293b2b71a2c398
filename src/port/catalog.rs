use crate::domain::Song;
use crate::error::SearchError;
use std::future::Future;
use std::pin::Pin;

/// Read-only song catalog queried by the ranker.
///
/// This trait is dyn-compatible by using boxed futures instead of `impl Future`.
pub trait SongCatalog: Send + Sync {
    /// Every song carrying at least one of `genres` (normalized, lower-case),
    /// with its complete genre and arrangement lists.
    ///
    /// Failures are reported as [`SearchError::CatalogUnavailable`].
    fn find_by_genres<'a>(
        &'a self,
        genres: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Song>, SearchError>> + Send + 'a>>;
}
