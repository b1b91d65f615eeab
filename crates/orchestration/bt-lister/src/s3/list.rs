//! Paginated key listing.

use async_stream::try_stream;
use bt_error::{BtError, Result};
use bt_types::is_folder_marker;
use futures::Stream;
use tracing::trace;

use super::storage::{ListPageRequest, ObjectStorage};

/// List every object key under `prefix` in `bucket`.
///
/// Returns a lazy stream of keys, requesting pages of at most `page_size`
/// keys one after another. Each request carries the continuation token of
/// the response before it. Folder markers (keys ending with `/`) and empty
/// keys are filtered out.
///
/// The first storage error is yielded and ends the stream. A page that
/// claims more results but carries no continuation token is an error too,
/// so an incomplete listing is never reported as a complete one.
///
/// # Example
///
/// ```ignore
/// use futures::{StreamExt, pin_mut};
///
/// let stream = list_keys(&client, "my-bucket", "data/", 50);
/// pin_mut!(stream);
///
/// while let Some(key) = stream.next().await {
///     println!("Found: {}", key?);
/// }
/// ```
pub fn list_keys<'a, S>(
    storage: &'a S,
    bucket: &'a str,
    prefix: &'a str,
    page_size: i32,
) -> impl Stream<Item = Result<String>> + Send + 'a
where
    S: ObjectStorage + ?Sized,
{
    try_stream! {
        let mut request = ListPageRequest::new(bucket, prefix, page_size);
        let mut page_number = 0usize;

        loop {
            let page = storage.list_page(&request).await?;
            page_number += 1;

            trace!(
                bucket = %bucket,
                prefix = %prefix,
                page = page_number,
                keys = page.keys.len(),
                truncated = page.is_truncated,
                "Listed page"
            );

            for key in page.keys {
                if key.is_empty() || is_folder_marker(&key) {
                    continue;
                }

                yield key;
            }

            if !page.is_truncated {
                break;
            }

            let token = match page.next_continuation_token {
                Some(token) => token,
                None => Err(BtError::Transport(format!(
                    "truncated listing without continuation token after page {page_number} \
                     of {bucket}/{prefix}"
                )))?,
            };

            request.continuation_token = Some(token);
        }
    }
}
