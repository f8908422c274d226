//! Query execution.
//!
//! Two modes: [`execute_all`] drains every page and returns the concatenated
//! records, [`execute_paged`] hands back a pull-based [`PageStream`] that
//! fetches one page per [`try_next`](PageStream::try_next) call. Neither
//! retries, re-sorts, or recovers; store failures surface as-is.

use futures_util::Stream;
use serde_json::Value;

use payscope_core::QueryTemplate;

use crate::error::StoreError;
use crate::traits::DocumentStore;
use crate::types::{QueryOptions, ResultPage};

/// Executes a template and collects every page of results.
///
/// Records come back in store order, exactly as the pages produced them.
/// All-or-nothing: a failure on any page fails the whole call and no
/// partial result is returned.
///
/// # Errors
///
/// Propagates the first [`StoreError`] the store reports.
pub async fn execute_all(
    store: &dyn DocumentStore,
    template: &QueryTemplate,
) -> Result<Vec<Value>, StoreError> {
    let mut pages = PageStream::new(store, template, None);
    let mut records = Vec::new();
    while let Some(page) = pages.try_next().await? {
        records.extend(page.records);
    }
    tracing::debug!(
        template = %template.name,
        record_count = records.len(),
        "query drained"
    );
    Ok(records)
}

/// Executes a template page by page.
///
/// The returned stream issues no store round-trip until its consumer asks
/// for a page, and none after the store reports exhaustion. A fresh call
/// re-issues the query from the start; streams are not restartable.
#[must_use]
pub fn execute_paged<'a>(
    store: &'a dyn DocumentStore,
    template: &QueryTemplate,
    page_size: usize,
) -> PageStream<'a> {
    PageStream::new(store, template, Some(page_size))
}

/// A lazy, pull-based page cursor over one query execution.
///
/// Each [`try_next`](Self::try_next) call performs exactly one store
/// round-trip. After exhaustion or a failure the cursor is fused and yields
/// `Ok(None)` without contacting the store again; pages already yielded
/// stay valid either way. Dropping the cursor at any page boundary needs
/// no cleanup beyond releasing the store handle borrow.
pub struct PageStream<'a> {
    store: &'a dyn DocumentStore,
    template: QueryTemplate,
    options: QueryOptions,
    done: bool,
}

impl<'a> PageStream<'a> {
    fn new(store: &'a dyn DocumentStore, template: &QueryTemplate, page_size: Option<usize>) -> Self {
        Self {
            store,
            template: template.clone(),
            options: QueryOptions {
                max_item_count: page_size,
                continuation: None,
            },
            done: false,
        }
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the store reports no more results.
    ///
    /// # Errors
    ///
    /// Returns the store's [`StoreError`] at the point of failure and fuses
    /// the cursor.
    pub async fn try_next(&mut self) -> Result<Option<ResultPage>, StoreError> {
        if self.done {
            return Ok(None);
        }

        tracing::debug!(
            template = %self.template.name,
            collection = %self.template.collection,
            continuation = self.options.continuation.is_some(),
            "fetching page"
        );

        let spec = self.template.to_spec();
        let page = match self
            .store
            .query_page(self.template.collection, &spec, &self.options)
            .await
        {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(
                    template = %self.template.name,
                    category = %err.category(),
                    error = %err,
                    "store query failed"
                );
                self.done = true;
                return Err(err);
            }
        };

        match &page.continuation {
            Some(token) => self.options.continuation = Some(token.clone()),
            None => self.done = true,
        }
        Ok(Some(page))
    }

    /// Adapts the cursor into a [`futures_util::Stream`] of pages for
    /// combinator-style consumption. The fused semantics carry over: after
    /// an error the stream ends.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResultPage, StoreError>> + 'a {
        futures_util::stream::unfold(self, |mut pages| async move {
            match pages.try_next().await {
                Ok(Some(page)) => Some((Ok(page), pages)),
                Ok(None) => None,
                Err(err) => Some((Err(err), pages)),
            }
        })
    }
}
