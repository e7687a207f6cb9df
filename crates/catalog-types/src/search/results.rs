//! Response envelopes shared by every provider.

use serde::{Deserialize, Serialize};

/// Single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// The payload.
    pub data: T,
    /// Human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Success flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload as a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
            success: Some(true),
        }
    }

    /// Take the payload out of the envelope.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Paginated response envelope, the same shape from every provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Total number of matching items.
    pub total: u64,
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Create an envelope, deriving `total_pages = ceil(total / limit)`.
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Everything on one page: `page = total_pages = 1`, `limit` is the
    /// item count.
    pub fn single_page(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            data,
            total: u64::try_from(count).unwrap_or(u64::MAX),
            page: 1,
            limit: u32::try_from(count).unwrap_or(u32::MAX),
            total_pages: 1,
        }
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}
