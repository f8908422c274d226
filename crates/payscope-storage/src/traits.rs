//! The document-store trait.
//!
//! The store is an external collaborator: engine internals, consistency,
//! retries and pooling all live behind this boundary. Implementations must
//! be thread-safe (`Send + Sync`) and object-safe.

use async_trait::async_trait;

use payscope_core::{Collection, QuerySpec};

use crate::error::StoreError;
use crate::types::{QueryOptions, ResultPage};

/// A handle to a document store that accepts parameterized queries.
///
/// # Example
///
/// ```ignore
/// use payscope_storage::{DocumentStore, QueryOptions, StoreError};
///
/// async fn first_page(
///     store: &dyn DocumentStore,
///     template: &QueryTemplate,
/// ) -> Result<ResultPage, StoreError> {
///     let options = QueryOptions::new().with_max_item_count(100);
///     store
///         .query_page(template.collection, &template.to_spec(), &options)
///         .await
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Submits a query against a collection and returns one page of results.
    ///
    /// The page carries a continuation token when more results remain;
    /// resubmitting with that token in [`QueryOptions`] fetches the next
    /// page. Ordering is whatever the query's `ORDER BY` asked the store
    /// for; this layer never re-sorts.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] naming the template for any store-reported
    /// failure. Implementations must not retry internally.
    async fn query_page(
        &self,
        collection: Collection,
        spec: &QuerySpec,
        options: &QueryOptions,
    ) -> Result<ResultPage, StoreError>;

    /// Returns the name of this store backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a shared store trait object.
pub type DynStore = std::sync::Arc<dyn DocumentStore>;
