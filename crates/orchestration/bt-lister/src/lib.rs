//! bt-lister - directory-style views over S3 buckets.
//!
//! This crate lists every object under one or more key prefixes and
//! rebuilds the `/`-delimited keys into a folder/file tree. It provides:
//!
//! - S3 listing with pagination and LocalStack support
//! - A storage seam ([`ObjectStorage`]) so listing can run against any backend
//! - A per-key listing cache that builds each (bucket, prefix) at most once
//! - [`BucketTreeService`], the facade tying the pieces together
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bt_lister::{BucketTreeService, S3Config, TreeCache, create_s3_client};
//!
//! let s3_config = S3Config::new().with_endpoint("http://localhost:4566");
//! let client = create_s3_client(&s3_config).await?;
//!
//! let service = BucketTreeService::new(client, Arc::new(TreeCache::new()));
//!
//! // Nested tree merged across prefixes, rebuilt on every call
//! let tree = service.list("my-bucket", &["photos/", "docs/"]).await?;
//!
//! // Flat file list, cached per (bucket, prefix)
//! let files = service.list_folder("my-bucket", "photos/2024/").await?;
//! eprintln!("{} files", files.files.len());
//! ```

pub mod cache;
pub mod config;
pub mod error_log;
pub mod s3;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CACHE_KEY_SEPARATOR, TreeCache, cache_key};
pub use config::{DEFAULT_PAGE_SIZE, ListingConfig};
pub use error_log::{ErrorLog, TracingErrorLog};
pub use s3::{ListPage, ListPageRequest, ObjectStorage, S3Config, create_s3_client, list_keys};
pub use service::{BucketTreeService, LIST_FOLDER_OPERATION, LIST_OPERATION};

pub use bt_types::FileObject;
