//! Bucket tree service.

use std::sync::Arc;

use bt_error::{BtError, Result};
use bt_types::{FileObject, FlatListBuilder, TreeBuilder};
use futures::{StreamExt, pin_mut};
use tracing::debug;

use crate::cache::{TreeCache, cache_key};
use crate::config::ListingConfig;
use crate::error_log::{ErrorLog, TracingErrorLog};
use crate::s3::{ObjectStorage, list_keys};

/// Operation name reported when [`BucketTreeService::list`] fails.
pub const LIST_OPERATION: &str = "list";

/// Operation name reported when [`BucketTreeService::list_folder`] fails.
pub const LIST_FOLDER_OPERATION: &str = "list_folder";

/// Directory-style views over a bucket.
///
/// Generic over the storage backend so the same listing logic runs against
/// S3 or an in-memory double. The cache is injected so several services
/// can share it; it lives as long as its last holder.
pub struct BucketTreeService<S: ObjectStorage> {
    storage: S,
    cache: Arc<TreeCache>,
    error_log: Option<Arc<dyn ErrorLog>>,
    config: ListingConfig,
}

impl<S: ObjectStorage> BucketTreeService<S> {
    /// Create a service with default configuration, reporting errors
    /// through `tracing`.
    pub fn new(storage: S, cache: Arc<TreeCache>) -> Self {
        Self {
            storage,
            cache,
            error_log: Some(Arc::new(TracingErrorLog)),
            config: ListingConfig::default(),
        }
    }

    /// Set the listing configuration.
    pub fn with_config(mut self, config: ListingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the error log. `None` disables error reporting.
    pub fn with_error_log(mut self, error_log: Option<Arc<dyn ErrorLog>>) -> Self {
        self.error_log = error_log;
        self
    }

    /// The cache backing [`list_folder`](Self::list_folder).
    pub fn cache(&self) -> &Arc<TreeCache> {
        &self.cache
    }

    /// Build a nested tree of every object under `prefixes`.
    ///
    /// Prefixes are listed one after another and merged into a single
    /// tree. The result is not cached. Any storage error aborts the whole
    /// call; no partial tree is returned.
    pub async fn list<P: AsRef<str>>(&self, bucket: &str, prefixes: &[P]) -> Result<FileObject> {
        self.build_tree(bucket, prefixes)
            .await
            .inspect_err(|e| self.report(LIST_OPERATION, e))
    }

    /// Flat list of every object under `prefix`, cached per (bucket, prefix).
    ///
    /// Each child of the returned root is one object, carrying its full key
    /// in `url`. The first successful call lists the bucket; later calls
    /// return the cached value. A failed call caches nothing.
    pub async fn list_folder(&self, bucket: &str, prefix: &str) -> Result<Arc<FileObject>> {
        let key = cache_key(bucket, prefix);

        self.cache
            .get_or_try_populate(&key, || self.build_flat(bucket, prefix))
            .await
            .inspect_err(|e| self.report(LIST_FOLDER_OPERATION, e))
    }

    async fn build_tree<P: AsRef<str>>(&self, bucket: &str, prefixes: &[P]) -> Result<FileObject> {
        let page_size = self.config.max_keys()?;
        let mut builder = TreeBuilder::new();

        for prefix in prefixes {
            let prefix = prefix.as_ref();
            let stream = list_keys(&self.storage, bucket, prefix, page_size);
            pin_mut!(stream);

            while let Some(key) = stream.next().await {
                builder.insert_key(&key?);
            }

            debug!(
                bucket = %bucket,
                prefix = %prefix,
                keys = builder.inserted(),
                "Merged prefix into tree"
            );
        }

        Ok(builder.finish())
    }

    async fn build_flat(&self, bucket: &str, prefix: &str) -> Result<FileObject> {
        let page_size = self.config.max_keys()?;
        let mut builder = FlatListBuilder::new();

        let stream = list_keys(&self.storage, bucket, prefix, page_size);
        pin_mut!(stream);

        while let Some(key) = stream.next().await {
            builder.insert_key(&key?);
        }

        debug!(
            bucket = %bucket,
            prefix = %prefix,
            files = builder.inserted(),
            "Built folder listing"
        );

        Ok(builder.finish())
    }

    fn report(&self, operation: &str, error: &BtError) {
        if let Some(error_log) = &self.error_log {
            error_log.log_error(operation, error);
        }
    }
}
