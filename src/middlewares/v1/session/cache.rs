use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::Session;

/// Resolved sessions kept in memory until they expire
///
/// Saves the `sessions` join on every request to a protected page. Entries
/// carry their own expiry, so a cached session never outlives its row.
#[derive(Clone, Debug)]
pub struct SessionCache {
    store: Arc<DashMap<Uuid, Session>>,
}

impl SessionCache {
    /// Shard count of CPU count * 4, rounded up to a power of two
    pub fn new() -> Self {
        Self::with_shard_count((num_cpus::get() * 4).next_power_of_two())
    }

    pub fn with_shard_count(shard_count: usize) -> Self {
        Self {
            store: Arc::new(DashMap::with_shard_amount(shard_count.max(2).next_power_of_two())),
        }
    }

    #[::tracing::instrument(skip(self), fields(session_id = %id))]
    pub fn get(&self, id: Uuid) -> Option<Session> {
        let session = self.store.get(&id).map(|entry| entry.value().clone());

        match session {
            Some(session) if session.is_expired() => {
                self.store.remove(&id);
                ::tracing::debug!("Session cache entry expired");
                None
            }
            Some(session) => {
                ::tracing::debug!("Session cache hit");
                Some(session)
            }
            None => {
                ::tracing::debug!("Session cache miss");
                None
            }
        }
    }

    pub fn insert(&self, session: Session) {
        if !session.is_expired() {
            self.store.insert(session.id, session);
        }
    }

    pub fn remove(&self, id: Uuid) -> Option<Session> {
        self.store.remove(&id).map(|(_, session)| session)
    }

    /// Drop every expired entry, returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let before = self.store.len();

        self.store.retain(|_, session| !session.is_expired());

        before.saturating_sub(self.store.len())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
