//! Session-scoped cache of ranked result sets.
//!
//! Each session keeps, per search fingerprint, a pointer to a result slot.
//! The slot holds the complete ranked set so that every page of one search is
//! cut from the same snapshot. A pointer whose slot has disappeared (expired or
//! cleared behind our back) is treated as a miss and the ranking is rebuilt.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::SearchRanker;
use super::request::SearchRequest;
use crate::domain::RankedSearch;
use crate::error::SearchError;
use crate::port::{SessionEntry, SessionStore};

/// Attempts at drawing an unused random slot suffix before giving up.
const SLOT_ALLOCATION_ATTEMPTS: usize = 8;

pub(crate) fn pointer_key(fingerprint: u64) -> String {
    format!("search:{fingerprint:016x}")
}

fn slot_key(session_id: &str, suffix: u32) -> String {
    format!("results:{session_id}:{suffix:08x}")
}

#[derive(Clone)]
pub struct RankedSearchCache {
    ranker: SearchRanker,
    store: Arc<dyn SessionStore>,
}

impl RankedSearchCache {
    pub fn new(ranker: SearchRanker, store: Arc<dyn SessionStore>) -> Self {
        Self { ranker, store }
    }

    /// Returns the cached ranked set for this session and request, computing
    /// and storing it on a miss.
    pub async fn get_or_compute(
        &self,
        session_id: &str,
        request: &SearchRequest,
    ) -> Result<Arc<RankedSearch>, SearchError> {
        let fingerprint = request.fingerprint();
        let pointer = pointer_key(fingerprint);

        if let Some(cached) = self.lookup(session_id, &pointer, fingerprint).await? {
            debug!(
                fingerprint,
                total = cached.total,
                age_secs = (Utc::now() - cached.created_at).num_seconds(),
                "ranked search cache hit"
            );
            return Ok(cached);
        }

        let songs = self
            .ranker
            .compute_ranking(&request.weights, request.max_results)
            .await?;
        let search = Arc::new(RankedSearch::new(fingerprint, songs));

        let slot = self.allocate_slot(session_id).await?;
        self.store
            .set(session_id, slot.clone(), SessionEntry::Results(Arc::clone(&search)))
            .await?;
        self.store
            .set(session_id, pointer, SessionEntry::SlotRef(slot.clone()))
            .await?;

        info!(
            variant = request.variant.as_str(),
            fingerprint,
            slot = %slot,
            total = search.total,
            "ranked search cached"
        );
        Ok(search)
    }

    /// Drops every cached search of the session.
    pub async fn invalidate(&self, session_id: &str) -> Result<usize, SearchError> {
        let removed = self.store.remove_session(session_id).await?;
        debug!(removed, "session search cache cleared");
        Ok(removed)
    }

    async fn lookup(
        &self,
        session_id: &str,
        pointer: &str,
        fingerprint: u64,
    ) -> Result<Option<Arc<RankedSearch>>, SearchError> {
        let slot = match self.store.get(session_id, pointer).await? {
            Some(SessionEntry::SlotRef(slot)) => slot,
            Some(SessionEntry::Results(_)) => {
                warn!(key = %pointer, "cache pointer holds a result set, rebuilding");
                return Ok(None);
            }
            None => return Ok(None),
        };

        if !self.store.exists(session_id, &slot).await? {
            warn!(slot = %slot, "cached result slot vanished, recomputing ranking");
            return Ok(None);
        }

        match self.store.get(session_id, &slot).await? {
            Some(SessionEntry::Results(search)) if search.fingerprint == fingerprint => {
                Ok(Some(search))
            }
            _ => {
                warn!(slot = %slot, "cached result slot unusable, recomputing ranking");
                Ok(None)
            }
        }
    }

    async fn allocate_slot(&self, session_id: &str) -> Result<String, SearchError> {
        for _ in 0..SLOT_ALLOCATION_ATTEMPTS {
            let key = slot_key(session_id, rand::random::<u32>());
            if !self.store.exists(session_id, &key).await? {
                return Ok(key);
            }
        }
        Err(SearchError::SessionStore(
            "could not allocate a free result slot".into(),
        ))
    }
}
