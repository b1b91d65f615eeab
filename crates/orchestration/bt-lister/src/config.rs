//! Configuration types for listing.

use bt_error::{BtError, Result};
use serde::{Deserialize, Serialize};

/// Default number of keys requested per list call.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Configuration for listing operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Maximum keys per list request (must be >= 1)
    pub page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingConfig {
    /// Create a new listing configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page size as sent to the backend, validated.
    pub fn max_keys(&self) -> Result<i32> {
        if self.page_size == 0 {
            return Err(BtError::Config("page size must be at least 1".to_string()));
        }

        i32::try_from(self.page_size)
            .map_err(|_| BtError::Config(format!("page size {} is too large", self.page_size)))
    }
}
