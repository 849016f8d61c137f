//! Group membership cache.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use mountview_core::config::cache::GroupCacheConfig;
use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, UserId};
use mountview_service::ports::GroupLookup;

/// Caches the memberships returned by an inner [`GroupLookup`].
///
/// Failed lookups are not cached.
#[derive(Clone)]
pub struct CachedGroupLookup {
    inner: Arc<dyn GroupLookup>,
    cache: Cache<UserId, HashSet<GroupId>>,
}

impl std::fmt::Debug for CachedGroupLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedGroupLookup")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl CachedGroupLookup {
    /// Wrap `inner` with a cache sized and expired according to `config`.
    pub fn new(inner: Arc<dyn GroupLookup>, config: &GroupCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();
        Self { inner, cache }
    }

    /// Drop the cached memberships of `user`.
    pub async fn invalidate(&self, user: &UserId) {
        self.cache.invalidate(user).await;
        debug!(user = %user, "Invalidated cached group memberships");
    }
}

#[async_trait]
impl GroupLookup for CachedGroupLookup {
    async fn groups_of(&self, user: &UserId) -> AppResult<HashSet<GroupId>> {
        if let Some(groups) = self.cache.get(user).await {
            return Ok(groups);
        }

        let groups = self.inner.groups_of(user).await?;
        self.cache.insert(user.clone(), groups.clone()).await;
        debug!(user = %user, count = groups.len(), "Cached group memberships");
        Ok(groups)
    }
}
