//! Runner pagination behavior against a scripted fake store.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use payscope_core::{Collection, QuerySpec, QueryTemplate};
use payscope_storage::{
    DocumentStore, QueryOptions, ResultPage, StoreError, execute_all, execute_paged,
};

/// Replays a fixed script of page responses and records what the runner
/// asked for.
struct ScriptedStore {
    script: Mutex<VecDeque<Result<ResultPage, StoreError>>>,
    calls: AtomicUsize,
    seen_options: Mutex<Vec<QueryOptions>>,
}

impl ScriptedStore {
    fn new(script: Vec<Result<ResultPage, StoreError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            seen_options: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn query_page(
        &self,
        _collection: Collection,
        spec: &QuerySpec,
        options: &QueryOptions,
    ) -> Result<ResultPage, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_options.lock().unwrap().push(options.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(StoreError::internal(&spec.name, "script exhausted")))
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

fn record(id: u32) -> Value {
    json!({ "log_id": format!("log_{id}") })
}

fn template() -> QueryTemplate {
    QueryTemplate::new(
        "query1_api_logs_24h",
        Collection::ApiLogs,
        "SELECT c.log_id FROM c WHERE c.merchant_id = @merchantId",
    )
    .bind("@merchantId", "acct_1MxY2kLkdIwHu0C9")
}

/// Three pages of 2/2/1 records behind continuation tokens.
fn three_page_script() -> Vec<Result<ResultPage, StoreError>> {
    vec![
        Ok(ResultPage::with_records(vec![record(1), record(2)]).with_continuation("t1")),
        Ok(ResultPage::with_records(vec![record(3), record(4)]).with_continuation("t2")),
        Ok(ResultPage::with_records(vec![record(5)])),
    ]
}

#[tokio::test]
async fn execute_all_concatenates_pages_in_store_order() {
    let store = ScriptedStore::new(three_page_script());

    let records = execute_all(&store, &template()).await.unwrap();

    assert_eq!(records.len(), 5);
    let ids: Vec<&str> = records
        .iter()
        .map(|r| r["log_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["log_1", "log_2", "log_3", "log_4", "log_5"]);
    assert_eq!(store.calls(), 3);

    // Page size was left to the store.
    let seen = store.seen_options.lock().unwrap();
    assert!(seen.iter().all(|o| o.max_item_count.is_none()));
}

#[tokio::test]
async fn execute_paged_yields_three_pages_and_stops() {
    let store = ScriptedStore::new(three_page_script());
    let base = template();

    let mut pages = execute_paged(&store, &base, 2);
    let mut sizes = Vec::new();
    while let Some(page) = pages.try_next().await.unwrap() {
        sizes.push(page.len());
    }

    assert_eq!(sizes, [2, 2, 1]);
    assert_eq!(store.calls(), 3);

    // Exhausted cursor is fused: no further round-trip.
    assert!(pages.try_next().await.unwrap().is_none());
    assert_eq!(store.calls(), 3);

    // The runner threaded the page size and continuation tokens through.
    let seen = store.seen_options.lock().unwrap();
    assert!(seen.iter().all(|o| o.max_item_count == Some(2)));
    let continuations: Vec<Option<&str>> = seen.iter().map(|o| o.continuation.as_deref()).collect();
    assert_eq!(continuations, [None, Some("t1"), Some("t2")]);
}

#[tokio::test]
async fn execute_paged_surfaces_mid_stream_failure() {
    let store = ScriptedStore::new(vec![
        Ok(ResultPage::with_records(vec![record(1), record(2)]).with_continuation("t1")),
        Err(StoreError::throttled(
            "query1_api_logs_24h",
            "request rate too large",
        )),
    ]);

    let mut pages = execute_paged(&store, &template(), 2);

    let first = pages.try_next().await.unwrap().unwrap();
    assert_eq!(first.len(), 2);

    let err = pages.try_next().await.unwrap_err();
    assert!(err.is_throttled());
    assert_eq!(err.template(), "query1_api_logs_24h");

    // The already-yielded page is unaffected and the cursor is fused.
    assert_eq!(first.records[0]["log_id"], "log_1");
    assert!(pages.try_next().await.unwrap().is_none());
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn execute_all_is_all_or_nothing() {
    let store = ScriptedStore::new(vec![
        Ok(ResultPage::with_records(vec![record(1)]).with_continuation("t1")),
        Err(StoreError::timeout("query1_api_logs_24h", "deadline exceeded")),
    ]);

    let err = execute_all(&store, &template()).await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn into_stream_adapts_cursor() {
    use futures_util::StreamExt;

    let store = ScriptedStore::new(three_page_script());
    let stream = execute_paged(&store, &template(), 2).into_stream();
    futures_util::pin_mut!(stream);

    let mut sizes = Vec::new();
    while let Some(page) = stream.next().await {
        sizes.push(page.unwrap().len());
    }

    assert_eq!(sizes, [2, 2, 1]);
    assert_eq!(store.calls(), 3);
}
