//! In-memory test doubles for the storage and error log seams.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bt_error::{BtError, Result};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error_log::ErrorLog;
use crate::s3::{ListPage, ListPageRequest, ObjectStorage};

/// Storage double serving scripted pages per prefix.
///
/// Records every request, including failed ones. Unknown prefixes list
/// as empty.
#[derive(Default)]
pub(crate) struct MockStorage {
    pages: HashMap<String, Vec<ListPage>>,
    requests: Mutex<Vec<ListPageRequest>>,
    calls: AtomicUsize,
    fail_on_call: Mutex<Option<usize>>,
    delay: Option<Duration>,
    gates: HashMap<String, Arc<Notify>>,
}

impl MockStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script `pages` for `prefix`, chaining them with continuation tokens.
    pub(crate) fn with_pages<K: Into<String>>(mut self, prefix: &str, pages: Vec<Vec<K>>) -> Self {
        let count = pages.len();
        let scripted = pages
            .into_iter()
            .enumerate()
            .map(|(i, keys)| {
                let is_truncated = i + 1 < count;
                ListPage {
                    keys: keys.into_iter().map(Into::into).collect(),
                    next_continuation_token: is_truncated
                        .then(|| self.token_for(prefix, i + 1))
                        .flatten(),
                    is_truncated,
                }
            })
            .collect();

        self.pages.insert(prefix.to_string(), scripted);
        self
    }

    /// Script `keys` for `prefix`, split into pages of `page_size`.
    pub(crate) fn with_keys(self, prefix: &str, keys: &[&str], page_size: usize) -> Self {
        let pages: Vec<Vec<&str>> = keys.chunks(page_size).map(<[&str]>::to_vec).collect();
        self.with_pages(prefix, pages)
    }

    /// Append a page exactly as given.
    pub(crate) fn with_raw_page(mut self, prefix: &str, page: ListPage) -> Self {
        self.pages.entry(prefix.to_string()).or_default().push(page);
        self
    }

    /// Fail the `call`-th request (1-based). Later calls succeed.
    pub(crate) fn fail_on_call(self, call: usize) -> Self {
        *self.fail_on_call.lock() = Some(call);
        self
    }

    /// Sleep before answering each request.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold requests for `prefix` until `gate` is notified.
    pub(crate) fn with_gate(mut self, prefix: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(prefix.to_string(), gate);
        self
    }

    /// Token handed out after page `page` (0-based) of `prefix`.
    pub(crate) fn token_for(&self, prefix: &str, page: usize) -> Option<String> {
        Some(format!("{prefix}#{page}"))
    }

    pub(crate) fn requests(&self) -> Vec<ListPageRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of first-page requests, i.e. listings started.
    pub(crate) fn listings_started(&self) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.continuation_token.is_none())
            .count()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn list_page(&self, request: &ListPageRequest) -> Result<ListPage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push(request.clone());

        if let Some(gate) = self.gates.get(&request.prefix) {
            gate.notified().await;
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut fail_on_call = self.fail_on_call.lock();
            if *fail_on_call == Some(call) {
                *fail_on_call = None;
                return Err(BtError::Transport(format!(
                    "simulated failure on call {call}"
                )));
            }
        }

        let Some(pages) = self.pages.get(&request.prefix) else {
            return Ok(ListPage::default());
        };

        let index = match &request.continuation_token {
            None => 0,
            Some(token) => pages
                .iter()
                .position(|p| p.next_continuation_token.as_ref() == Some(token))
                .map(|i| i + 1)
                .ok_or_else(|| BtError::Transport(format!("unknown continuation token {token}")))?,
        };

        Ok(pages.get(index).cloned().unwrap_or_default())
    }
}

/// Error log double recording `(operation, message)` pairs.
#[derive(Default)]
pub(crate) struct RecordingErrorLog {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingErrorLog {
    pub(crate) fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().clone()
    }
}

impl ErrorLog for RecordingErrorLog {
    fn log_error(&self, operation: &str, error: &BtError) {
        self.entries
            .lock()
            .push((operation.to_string(), error.to_string()));
    }
}
