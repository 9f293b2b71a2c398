use tracing::info;

use super::cache::RankedSearchCache;
use super::pagination::paginate;
use super::request::SearchRequest;
use super::types::{SearchPage, SongResult};
use crate::error::SearchError;

/// Entry point of the two genre-search endpoints: cache lookup, ranking on a
/// miss, then the requested page.
#[derive(Clone)]
pub struct SearchService {
    cache: RankedSearchCache,
    page_size: usize,
}

impl SearchService {
    pub fn new(cache: RankedSearchCache, page_size: usize) -> Self {
        Self {
            cache,
            page_size: page_size.max(1),
        }
    }

    pub async fn search(
        &self,
        session_id: &str,
        request: &SearchRequest,
    ) -> Result<SearchPage, SearchError> {
        let ranked = self.cache.get_or_compute(session_id, request).await?;
        let window = paginate(&ranked.songs, request.page, self.page_size);

        info!(
            variant = request.variant.as_str(),
            genres = request.weights.len(),
            page = window.current_page,
            returned = window.items.len(),
            total = ranked.total,
            "served search page"
        );

        Ok(SearchPage {
            songs: window.items.iter().map(SongResult::from).collect(),
            total: ranked.total,
            current_page: window.current_page,
            total_pages: window.total_pages,
            has_more: window.has_more,
        })
    }

    /// Forgets every cached search of the session.
    pub async fn clear_session(&self, session_id: &str) -> Result<usize, SearchError> {
        self.cache.invalidate(session_id).await
    }
}
