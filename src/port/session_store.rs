use crate::domain::RankedSearch;
use crate::error::SearchError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SearchError>> + Send + 'a>>;

/// Values kept in a caller's session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEntry {
    /// Name of the slot holding the ranked set for a search fingerprint.
    SlotRef(String),
    /// A materialized ranked result set.
    Results(Arc<RankedSearch>),
}

/// Key/value storage scoped to a caller session, with expiry owned by the store.
///
/// Expired entries behave exactly like missing ones.
pub trait SessionStore: Send + Sync {
    fn get<'a>(&'a self, session_id: &'a str, key: &'a str)
    -> StoreFuture<'a, Option<SessionEntry>>;

    fn set<'a>(
        &'a self,
        session_id: &'a str,
        key: String,
        entry: SessionEntry,
    ) -> StoreFuture<'a, ()>;

    fn exists<'a>(&'a self, session_id: &'a str, key: &'a str) -> StoreFuture<'a, bool>;

    /// Drops everything stored for `session_id`. Returns the number of entries removed.
    fn remove_session<'a>(&'a self, session_id: &'a str) -> StoreFuture<'a, usize>;

    /// Drops expired entries across all sessions. Returns the number removed.
    fn purge_expired(&self) -> StoreFuture<'_, usize>;
}
