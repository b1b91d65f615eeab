//! S3 client and listing functionality.
//!
//! This module provides the storage side of tree building:
//! - Client configuration with LocalStack support
//! - The [`ObjectStorage`] seam and its `aws-sdk-s3` implementation
//! - Paginated key listing with streaming

mod client;
mod list;
mod storage;

pub use client::{S3Config, create_s3_client};
pub use list::list_keys;
pub use storage::{ListPage, ListPageRequest, ObjectStorage};
