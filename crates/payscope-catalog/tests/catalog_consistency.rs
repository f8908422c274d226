//! Catalogue-wide consistency checks.

use time::macros::datetime;

use payscope_catalog::QueryCatalog;
use payscope_core::{Collection, ParamValue, QueryCost};

fn pinned_catalog() -> QueryCatalog {
    QueryCatalog::at(datetime!(2025-10-19 14:23:00 UTC))
}

#[test]
fn every_placeholder_has_exactly_one_binding() {
    let catalog = pinned_catalog();
    catalog.check().expect("catalogue bindings are consistent");

    for template in catalog.templates() {
        assert!(
            template.unused_parameters().is_empty(),
            "template `{}` carries unused bindings",
            template.name
        );
    }
}

#[test]
fn point_lookup_has_single_payment_binding() {
    let catalog = pinned_catalog();
    let template = catalog.get("query9_fraud_features_by_payment").unwrap();

    assert_eq!(template.parameters.len(), 1);
    assert_eq!(template.parameters[0].name, "@paymentId");
}

#[test]
fn list_by_collection_follows_declaration_order() {
    let catalog = pinned_catalog();

    let api_logs = catalog.list_by_collection("api_logs");
    let names: Vec<&str> = api_logs.iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        [
            "query1_api_logs_24h",
            "query2_api_errors_by_endpoint",
            "query3_slowest_api_calls",
            "query4_api_success_rate_hourly",
        ]
    );

    for collection in Collection::ALL {
        assert_eq!(catalog.list_by_collection(collection.as_str()).len(), 4);
    }
    assert!(catalog.list_by_collection("unknown").is_empty());

    // 16 grouped templates plus the two audit steps.
    assert_eq!(catalog.len(), 18);
}

#[test]
fn unknown_template_name_is_an_error() {
    let catalog = pinned_catalog();
    let err = catalog.get("query99_missing").unwrap_err();
    assert!(err.is_unknown_template());
    assert!(err.to_string().contains("query99_missing"));
}

#[test]
fn rebinding_never_touches_the_catalogue_entry() {
    let catalog = pinned_catalog();
    let template = catalog.get("query1_api_logs_24h").unwrap();

    let first = template.with_param("@merchantId", "acct_first").unwrap();
    let second = template.with_param("@merchantId", "acct_second").unwrap();

    assert_eq!(first.parameters[0].value, ParamValue::from("acct_first"));
    assert_eq!(second.parameters[0].value, ParamValue::from("acct_second"));
    assert_eq!(
        catalog.get("query1_api_logs_24h").unwrap().parameters[0].value,
        ParamValue::from("acct_1MxY2kLkdIwHu0C9")
    );
}

#[test]
fn cost_metadata_marks_cross_partition_scans_batch_only() {
    let catalog = pinned_catalog();

    let point = catalog.get("query9_fraud_features_by_payment").unwrap();
    assert_eq!(point.cost, QueryCost::PointRead);
    assert!(point.cost.request_path_safe());

    for name in [
        "query10_high_risk_payments",
        "query11_fraud_patterns_analysis",
        "query12_customers_with_disputes",
    ] {
        let template = catalog.get(name).unwrap();
        assert_eq!(template.cost, QueryCost::CrossPartition);
        assert!(!template.cost.request_path_safe());
    }

    // Everything outside fraud_features filters on its partition key.
    for template in catalog.templates() {
        if template.collection != Collection::FraudFeatures {
            assert_ne!(template.cost, QueryCost::CrossPartition);
        }
    }
}

#[test]
fn default_windows_follow_the_pinned_clock() {
    let now = datetime!(2025-10-19 14:23:00 UTC);
    let catalog = QueryCatalog::at(now);

    let since = |name: &str| {
        catalog
            .get(name)
            .unwrap()
            .parameters
            .iter()
            .find(|b| b.name == "@since")
            .map(|b| b.value.clone())
            .unwrap()
    };

    assert_eq!(
        since("query1_api_logs_24h"),
        ParamValue::Timestamp(datetime!(2025-10-18 14:23:00 UTC))
    );
    assert_eq!(
        since("query2_api_errors_by_endpoint"),
        ParamValue::Timestamp(datetime!(2025-10-12 14:23:00 UTC))
    );
    assert_eq!(
        since("query8_engagement_by_device"),
        ParamValue::Timestamp(datetime!(2025-07-21 14:23:00 UTC))
    );

    // The retry poll binds the clock itself: due means next_retry_at <= now.
    let retry = catalog.get("query13_failed_webhooks_for_retry").unwrap();
    let now_binding = retry
        .parameters
        .iter()
        .find(|b| b.name == "@now")
        .unwrap();
    assert_eq!(now_binding.value, ParamValue::Timestamp(now));
    assert!(retry.text.contains("c.retry_count < 5"));
    assert!(retry.text.contains("ORDER BY c.next_retry_at ASC"));
}

#[test]
fn field_absence_filters_are_preserved() {
    let catalog = pinned_catalog();

    // Q5: "active" is field absence, not null equality.
    let active = catalog.get("query5_active_sessions").unwrap();
    assert!(active.text.contains("NOT IS_DEFINED(c.session_end)"));

    // Q8: duration averages exclude in-progress sessions.
    let engagement = catalog.get("query8_engagement_by_device").unwrap();
    assert!(engagement.text.contains("IS_DEFINED(c.session_end)"));

    // Q16: the delivery diff requires the completion timestamp.
    let delivery = catalog.get("query16_webhook_delivery_time").unwrap();
    assert!(delivery.text.contains("IS_DEFINED(c.delivered_at)"));
    assert!(
        delivery
            .text
            .contains("DateTimeDiff('second', c.created_at, c.delivered_at)")
    );
}

#[test]
fn audit_trail_exposes_both_steps() {
    let catalog = pinned_catalog();
    let trail = catalog.audit_trail();

    assert_eq!(trail.steps().len(), 2);
    assert_eq!(trail.fraud_context().name, "query17_audit_fraud_context");
    assert_eq!(trail.fraud_context().cost, QueryCost::PointRead);
    assert_eq!(
        trail.correlated_logs().name,
        "query17_audit_correlated_logs"
    );
    assert_eq!(trail.correlated_logs().collection, Collection::ApiLogs);

    // Both steps are also addressable through the registry, but neither
    // shows up in a collection group listing.
    assert!(catalog.get("query17_audit_fraud_context").is_ok());
    assert!(
        !catalog
            .list_by_collection("api_logs")
            .iter()
            .any(|t| t.name.starts_with("query17"))
    );
}
