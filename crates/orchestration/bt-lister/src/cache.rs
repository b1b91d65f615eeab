//! Listing cache keyed by (bucket, prefix).
//!
//! Each key owns a lazily created [`OnceCell`]. A lookup for a populated
//! key only takes the structural read lock. A miss hands the key's cell to
//! `get_or_try_init`, so at most one build runs per key while builds for
//! different keys proceed independently. Entries are never evicted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use bt_error::{BtError, Result};
use bt_types::FileObject;
use parking_lot::RwLock;
use tokio::sync::OnceCell;
use tracing::{debug, trace};

/// Separator between bucket and prefix in a cache key.
///
/// S3 bucket names cannot contain `_`, so keys never collide.
pub const CACHE_KEY_SEPARATOR: &str = "_";

/// Build the cache key for a (bucket, prefix) pair.
pub fn cache_key(bucket: &str, prefix: &str) -> String {
    format!("{bucket}{CACHE_KEY_SEPARATOR}{prefix}")
}

type Slot = Arc<OnceCell<Arc<FileObject>>>;

/// Process-lifetime cache of built listings.
///
/// Construct one and share it by `Arc` between the services that should
/// see the same entries.
#[derive(Default)]
pub struct TreeCache {
    slots: RwLock<HashMap<String, Slot>>,
}

impl TreeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a populated entry. Never triggers a build.
    pub fn get(&self, key: &str) -> Option<Arc<FileObject>> {
        self.slots
            .read()
            .get(key)
            .and_then(|slot| slot.get().cloned())
    }

    /// Returns true if `key` has been populated.
    pub fn contains(&self, key: &str) -> bool {
        self.slots
            .read()
            .get(key)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Returns true if no entry has been populated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the entry for `key`, running `build` if it is absent.
    ///
    /// Concurrent callers for the same key wait for the running build and
    /// share its result. If the build fails, its error is returned to the
    /// caller that ran it, nothing is stored, and the next waiter (or the
    /// next call) builds again.
    pub async fn get_or_try_populate<F, Fut>(&self, key: &str, build: F) -> Result<Arc<FileObject>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FileObject>>,
    {
        if let Some(entry) = self.get(key) {
            trace!(key = %key, "Cache hit");
            return Ok(entry);
        }

        let slot = self.slot(key);
        let entry = slot
            .get_or_try_init(|| async move {
                debug!(key = %key, "Cache miss, building entry");
                let tree = build().await?;
                Ok::<_, BtError>(Arc::new(tree))
            })
            .await?;

        Ok(Arc::clone(entry))
    }

    /// Fetch or create the cell for `key`.
    fn slot(&self, key: &str) -> Slot {
        if let Some(slot) = self.slots.read().get(key) {
            return Arc::clone(slot);
        }

        Arc::clone(self.slots.write().entry(key.to_string()).or_default())
    }
}
