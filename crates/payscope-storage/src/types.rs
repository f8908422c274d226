//! Page and option types for query execution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options attached to a single query submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Maximum number of records per page. `None` leaves the page size to
    /// the store. Smaller pages mean more round-trips but bound the memory
    /// held per request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_item_count: Option<usize>,
    /// Continuation token from the previous page, if resuming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

impl QueryOptions {
    /// Creates new default `QueryOptions`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_max_item_count(mut self, count: usize) -> Self {
        self.max_item_count = Some(count);
        self
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn with_continuation(mut self, token: impl Into<String>) -> Self {
        self.continuation = Some(token.into());
        self
    }
}

/// One bounded slice of a result set.
///
/// Records are opaque store documents; their schema is store-defined and not
/// validated here. The continuation token, when present, resumes the query
/// at the next page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultPage {
    /// The records in this page, in store order.
    pub records: Vec<Value>,
    /// Token for the next page; `None` means the result set is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

impl ResultPage {
    /// Creates a new empty `ResultPage`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a new `ResultPage` with records.
    #[must_use]
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records,
            continuation: None,
        }
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn with_continuation(mut self, token: impl Into<String>) -> Self {
        self.continuation = Some(token.into());
        self
    }

    /// Whether more pages remain after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }

    /// Returns the number of records in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
