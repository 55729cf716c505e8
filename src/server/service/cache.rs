//! In-process cache for computed API responses.
//!
//! Read endpoints such as the alias overview and the alias ledger export store their serialized
//! response here. Every operation that changes donors, aliases or donations clears the whole
//! cache rather than tracking which entries it affected.

use std::{collections::HashMap, future::Future, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::server::error::Error;

/// Cache key for the alias overview returned by `GET /api/aliases`.
pub const ALIAS_OVERVIEW_KEY: &str = "aliases:overview";
/// Cache key for the alias ledger returned by `GET /api/aliases/export`.
pub const ALIAS_EXPORT_KEY: &str = "aliases:export";

/// Shared response cache, cheap to clone.
#[derive(Clone, Default)]
pub struct ResponseCache {
    state: Arc<RwLock<CacheState>>,
}

#[derive(Default)]
struct CacheState {
    /// Bumped by every `clear`, so a response computed before a mutation is never stored after it.
    generation: u64,
    entries: HashMap<String, serde_json::Value>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, if present and deserializable as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let state = self.state.read().await;
        let value = state.entries.get(key)?;

        match serde_json::from_value(value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, "Discarding unreadable cache entry: {}", e);
                None
            }
        }
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        let value = serde_json::to_value(value)?;
        self.state.write().await.entries.insert(key.to_string(), value);

        Ok(())
    }

    async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Stores `value` only if the cache has not been cleared since `generation` was read.
    async fn insert_if_current<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        generation: u64,
    ) -> Result<bool, Error> {
        let value = serde_json::to_value(value)?;
        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(key = %key, "Not caching response computed before the last clear");
            return Ok(false);
        }
        state.entries.insert(key.to_string(), value);

        Ok(true)
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// Errors from `compute` are returned as-is and nothing is cached. A value is also not cached
    /// when the cache was cleared while `compute` ran.
    pub async fn get_or_insert_with<T, F, Fut>(&self, key: &str, compute: F) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        if let Some(value) = self.get(key).await {
            tracing::trace!(key = %key, "Response cache hit");
            return Ok(value);
        }

        let generation = self.generation().await;
        let value = compute().await?;
        self.insert_if_current(key, &value, generation).await?;

        Ok(value)
    }

    /// Removes every cached response.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        if !state.entries.is_empty() {
            tracing::debug!("Clearing {} cached responses", state.entries.len());
        }
        state.entries.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
