//! Session-scoped storage for canonical comparison sets.
//!
//! # Design
//! - The set for a session is created implicitly on the first add.
//! - Removes against an unknown session answer with zero counts and create nothing.
//! - Storage sits behind a trait so handlers never depend on the backing store.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use juxta_core::{CompareAction, CompareDeltaRequest, ComparisonSet, SyncResult};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Identifier of a browser session.
pub type SessionId = Uuid;

/// Backend holding one comparison set per session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current set for the session (empty when none exists).
    async fn load(&self, session: SessionId) -> Result<ComparisonSet>;
    /// Apply a delta to the session's set and return the new totals.
    async fn apply(
        &self,
        session: SessionId,
        action: CompareAction,
        delta: &CompareDeltaRequest,
    ) -> Result<SyncResult>;
    /// Drop the session's set; returns whether one existed.
    async fn clear(&self, session: SessionId) -> Result<bool>;
    /// Number of sessions currently holding a set.
    async fn session_count(&self) -> Result<usize>;
}

/// Shared reference to the session backend.
pub type SharedSessions = Arc<dyn SessionStore>;

/// Process-local session store; sets are lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sets: RwLock<HashMap<SessionId, ComparisonSet>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the store for sharing with handlers.
    #[must_use]
    pub fn shared() -> SharedSessions {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session: SessionId) -> Result<ComparisonSet> {
        Ok(self
            .sets
            .read()
            .await
            .get(&session)
            .cloned()
            .unwrap_or_default())
    }

    async fn apply(
        &self,
        session: SessionId,
        action: CompareAction,
        delta: &CompareDeltaRequest,
    ) -> Result<SyncResult> {
        let mut sets = self.sets.write().await;
        let result = match action {
            CompareAction::Add => sets.entry(session).or_default().apply(action, delta),
            CompareAction::Remove => sets
                .get_mut(&session)
                .map_or_else(SyncResult::default, |set| set.apply(action, delta)),
        };
        drop(sets);
        Ok(result)
    }

    async fn clear(&self, session: SessionId) -> Result<bool> {
        Ok(self.sets.write().await.remove(&session).is_some())
    }

    async fn session_count(&self) -> Result<usize> {
        Ok(self.sets.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(contexts: &[&str], models: &[&str]) -> CompareDeltaRequest {
        CompareDeltaRequest {
            contexts: contexts.iter().map(|id| (*id).to_string()).collect(),
            models: models.iter().map(|id| (*id).to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn sets_are_isolated_per_session() -> Result<()> {
        let store = InMemorySessionStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store
            .apply(alice, CompareAction::Add, &delta(&["c1"], &["m1"]))
            .await?;
        let bob_counts = store
            .apply(bob, CompareAction::Add, &delta(&["c2"], &[]))
            .await?;

        assert_eq!(bob_counts.total(), 1);
        assert_eq!(store.load(alice).await?.counts().total(), 2);
        assert_eq!(store.session_count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn remove_without_a_set_creates_nothing() -> Result<()> {
        let store = InMemorySessionStore::new();
        let session = Uuid::new_v4();
        let counts = store
            .apply(session, CompareAction::Remove, &delta(&["c1"], &[]))
            .await?;
        assert_eq!(counts, SyncResult::default());
        assert_eq!(store.session_count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn clear_drops_the_set() -> Result<()> {
        let store = InMemorySessionStore::new();
        let session = Uuid::new_v4();
        store
            .apply(session, CompareAction::Add, &delta(&["c1"], &[]))
            .await?;
        assert!(store.clear(session).await?);
        assert!(!store.clear(session).await?);
        assert!(store.load(session).await?.is_empty());
        Ok(())
    }
}
