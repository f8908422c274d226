//! End-to-end: catalogue templates through the runner, including the
//! caller-side chaining of the two audit steps.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use time::macros::datetime;

use payscope_catalog::QueryCatalog;
use payscope_core::{Collection, ParamBinding, QuerySpec};
use payscope_storage::{DocumentStore, QueryOptions, ResultPage, StoreError, execute_all};

/// Answers per collection and records every submitted spec.
struct RoutingStore {
    submissions: Mutex<Vec<(Collection, QuerySpec)>>,
}

impl RoutingStore {
    fn new() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for RoutingStore {
    async fn query_page(
        &self,
        collection: Collection,
        spec: &QuerySpec,
        _options: &QueryOptions,
    ) -> Result<ResultPage, StoreError> {
        self.submissions
            .lock()
            .unwrap()
            .push((collection, spec.clone()));

        let records = match collection {
            Collection::FraudFeatures => vec![json!({
                "payment_id": "pi_lookup",
                "merchant_id": "acct_resolved",
                "fraud_score": 0.91,
            })],
            Collection::ApiLogs => vec![
                json!({ "log_id": "log_1", "request_body": "{\"payment\":\"pi_lookup\"}" }),
                json!({ "log_id": "log_2", "request_body": "{\"payment\":\"pi_lookup\"}" }),
            ],
            _ => Vec::new(),
        };
        Ok(ResultPage::with_records(records))
    }

    fn backend_name(&self) -> &'static str {
        "routing"
    }
}

#[tokio::test]
async fn audit_trail_two_step_chaining() {
    let now = datetime!(2025-10-19 14:24:00 UTC);
    let catalog = QueryCatalog::at(now);
    let store = RoutingStore::new();
    let trail = catalog.audit_trail();

    // Step 1: point lookup, rebound to the payment under audit.
    let step1 = trail
        .fraud_context()
        .with_param("@paymentId", "pi_lookup")
        .unwrap();
    let features = execute_all(&store, &step1).await.unwrap();
    assert_eq!(features.len(), 1);

    // The chaining contract: the caller extracts merchant_id and feeds
    // step 2. The registry does not do this.
    let merchant_id = features[0]["merchant_id"].as_str().unwrap();
    let step2 = trail
        .bind_correlated_logs(
            merchant_id,
            "pi_lookup",
            datetime!(2025-10-19 14:23:00 UTC),
            now,
        )
        .unwrap();
    let logs = execute_all(&store, &step2).await.unwrap();
    assert_eq!(logs.len(), 2);

    // The store saw the rebound parameters, not the catalogue defaults.
    let submissions = submissions_of(&store);
    assert_eq!(submissions.len(), 2);
    let (collection, spec) = &submissions[1];
    assert_eq!(*collection, Collection::ApiLogs);
    assert!(
        spec.parameters
            .contains(&ParamBinding::new("@merchantId", "acct_resolved"))
    );
    assert!(
        spec.parameters
            .contains(&ParamBinding::new("@paymentId", "pi_lookup"))
    );
}

#[tokio::test]
async fn catalogue_template_runs_unmodified() {
    let catalog = QueryCatalog::at(datetime!(2025-10-19 14:23:00 UTC));
    let store = RoutingStore::new();

    let template = catalog.get("query1_api_logs_24h").unwrap();
    let records = execute_all(&store, template).await.unwrap();
    assert_eq!(records.len(), 2);

    let submissions = submissions_of(&store);
    let (collection, spec) = &submissions[0];
    assert_eq!(*collection, Collection::ApiLogs);
    assert_eq!(spec.name, "query1_api_logs_24h");
    assert!(spec.query.contains("c.merchant_id = @merchantId"));
}

fn submissions_of(store: &RoutingStore) -> Vec<(Collection, QuerySpec)> {
    store.submissions.lock().unwrap().clone()
}
