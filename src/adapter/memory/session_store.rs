// In-process session store. Entries live for a fixed TTL from their last
// write; expired entries are invisible to readers and physically removed by
// the sweeper task or the next write to the same session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::port::session_store::StoreFuture;
use crate::port::{SessionEntry, SessionStore};

struct StoredEntry {
    entry: SessionEntry,
    expires_at: Instant,
}

impl StoredEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

type Sessions = HashMap<String, HashMap<String, StoredEntry>>;

pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<Sessions>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn entry_count(&self) -> usize {
        self.sessions.read().await.values().map(HashMap::len).sum()
    }

    /// Spawn a task purging expired entries every `interval` until `shutdown_token` is cancelled.
    pub fn spawn_sweeper(
        self: Arc<Self>,
        interval: Duration,
        shutdown_token: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = shutdown_token.cancelled() => {
                        info!("Session sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = self.sweep(Instant::now()).await;
                        if removed > 0 {
                            debug!(removed, "swept expired session entries");
                        }
                    }
                }
            }
        })
    }

    async fn sweep(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let mut removed = 0;
        sessions.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|_, stored| stored.is_live(now));
            removed += before - entries.len();
            !entries.is_empty()
        });
        removed
    }
}

impl SessionStore for InMemorySessionStore {
    fn get<'a>(
        &'a self,
        session_id: &'a str,
        key: &'a str,
    ) -> StoreFuture<'a, Option<SessionEntry>> {
        Box::pin(async move {
            let now = Instant::now();
            let sessions = self.sessions.read().await;
            Ok(sessions
                .get(session_id)
                .and_then(|entries| entries.get(key))
                .filter(|stored| stored.is_live(now))
                .map(|stored| stored.entry.clone()))
        })
    }

    fn set<'a>(
        &'a self,
        session_id: &'a str,
        key: String,
        entry: SessionEntry,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let now = Instant::now();
            let mut sessions = self.sessions.write().await;
            let entries = sessions.entry(session_id.to_string()).or_default();
            entries.retain(|_, stored| stored.is_live(now));
            entries.insert(
                key,
                StoredEntry {
                    entry,
                    expires_at: now + self.ttl,
                },
            );
            Ok(())
        })
    }

    fn exists<'a>(&'a self, session_id: &'a str, key: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let now = Instant::now();
            let sessions = self.sessions.read().await;
            Ok(sessions
                .get(session_id)
                .and_then(|entries| entries.get(key))
                .is_some_and(|stored| stored.is_live(now)))
        })
    }

    fn remove_session<'a>(&'a self, session_id: &'a str) -> StoreFuture<'a, usize> {
        Box::pin(async move {
            let mut sessions = self.sessions.write().await;
            Ok(sessions.remove(session_id).map_or(0, |entries| entries.len()))
        })
    }

    fn purge_expired(&self) -> StoreFuture<'_, usize> {
        Box::pin(async move { Ok(self.sweep(Instant::now()).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str) -> SessionEntry {
        SessionEntry::SlotRef(name.to_string())
    }

    #[tokio::test]
    async fn set_then_get_within_ttl() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        store.set("s1", "k".into(), slot("v")).await.unwrap();

        assert_eq!(store.get("s1", "k").await.unwrap(), Some(slot("v")));
        assert!(store.exists("s1", "k").await.unwrap());
        assert!(!store.exists("s2", "k").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entries_are_invisible() {
        let store = InMemorySessionStore::new(Duration::from_millis(20));
        store.set("s1", "k".into(), slot("v")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.get("s1", "k").await.unwrap(), None);
        assert!(!store.exists("s1", "k").await.unwrap());
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.entry_count().await, 0);
    }

    #[tokio::test]
    async fn overwriting_a_key_refreshes_it() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        store.set("s1", "k".into(), slot("old")).await.unwrap();
        store.set("s1", "k".into(), slot("new")).await.unwrap();

        assert_eq!(store.get("s1", "k").await.unwrap(), Some(slot("new")));
        assert_eq!(store.entry_count().await, 1);
    }

    #[tokio::test]
    async fn remove_session_only_touches_that_session() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        store.set("s1", "a".into(), slot("1")).await.unwrap();
        store.set("s1", "b".into(), slot("2")).await.unwrap();
        store.set("s2", "a".into(), slot("3")).await.unwrap();

        assert_eq!(store.remove_session("s1").await.unwrap(), 2);
        assert_eq!(store.remove_session("s1").await.unwrap(), 0);
        assert!(store.exists("s2", "a").await.unwrap());
    }

    #[tokio::test]
    async fn sweeper_purges_and_stops_on_cancel() {
        let store = Arc::new(InMemorySessionStore::new(Duration::from_millis(10)));
        store.set("s1", "k".into(), slot("v")).await.unwrap();

        let token = CancellationToken::new();
        let handle = store
            .clone()
            .spawn_sweeper(Duration::from_millis(15), token.clone());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(store.entry_count().await, 0);

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop after cancellation")
            .unwrap();
    }
}
