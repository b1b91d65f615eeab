//! Storage seam for paginated listing.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use bt_error::{BtError, Result};

/// A single list request: one page of keys under a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPageRequest {
    /// Bucket to list
    pub bucket: String,

    /// Key prefix scoping the listing
    pub prefix: String,

    /// Maximum number of keys in the response
    pub max_keys: i32,

    /// Token from the previous page, `None` for the first page
    pub continuation_token: Option<String>,
}

impl ListPageRequest {
    /// Create a request for the first page.
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>, max_keys: i32) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            max_keys,
            continuation_token: None,
        }
    }
}

/// One page of listed keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Object keys in backend order, folder markers included
    pub keys: Vec<String>,

    /// Token to request the next page
    pub next_continuation_token: Option<String>,

    /// Whether more pages follow
    pub is_truncated: bool,
}

/// Backend able to list the keys of a bucket one page at a time.
///
/// Implementations include:
/// - `aws_sdk_s3::Client` (S3, LocalStack, S3-compatible stores)
/// - In-memory doubles for tests
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Fetches a single page of keys.
    ///
    /// Any failure is reported as [`BtError::Transport`].
    async fn list_page(&self, request: &ListPageRequest) -> Result<ListPage>;
}

#[async_trait]
impl<T: ObjectStorage + ?Sized> ObjectStorage for Arc<T> {
    async fn list_page(&self, request: &ListPageRequest) -> Result<ListPage> {
        (**self).list_page(request).await
    }
}

#[async_trait]
impl ObjectStorage for Client {
    async fn list_page(&self, request: &ListPageRequest) -> Result<ListPage> {
        let mut req = self
            .list_objects_v2()
            .bucket(&request.bucket)
            .prefix(&request.prefix)
            .max_keys(request.max_keys);

        if let Some(ref token) = request.continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| BtError::Transport(format!("S3 list objects failed: {e}")))?;

        let keys = resp
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|obj| obj.key)
            .collect();

        Ok(ListPage {
            keys,
            next_continuation_token: resp.next_continuation_token,
            is_truncated: resp.is_truncated == Some(true),
        })
    }
}
