//! Queries over the `fraud_features` collection.
//!
//! The collection is partitioned by `payment_id`. Q9 is the only
//! partition-aligned query (a point lookup); Q10–Q12 filter on
//! `merchant_id` and therefore fan out across partitions — acceptable for
//! batch and back-office use, not the request path. The [`QueryCost`]
//! metadata carries that caveat so callers can gate on it.

use time::OffsetDateTime;

use payscope_core::{Collection, QueryCost, QueryTemplate, days_before, hours_before};

use super::{SAMPLE_MERCHANT, SAMPLE_PAYMENT};

pub(crate) fn templates(now: OffsetDateTime) -> [QueryTemplate; 4] {
    [
        fraud_features_by_payment(),
        high_risk_payments(now),
        fraud_patterns_analysis(now),
        customers_with_disputes(now),
    ]
}

/// Q9: the ML feature document for one payment. Exact-match point lookup on
/// the unique key, no time filter; this is the request-path read used at
/// scoring time.
pub(crate) fn fraud_features_by_payment() -> QueryTemplate {
    QueryTemplate::new(
        "query9_fraud_features_by_payment",
        Collection::FraudFeatures,
        "\
SELECT *
FROM c
WHERE c.payment_id = @paymentId",
    )
    .with_cost(QueryCost::PointRead)
    .with_use_case("Real-time fraud scoring at payment time")
    .bind("@paymentId", SAMPLE_PAYMENT)
}

/// Q10: payments scoring 0.7 or above for a merchant, highest risk first.
fn high_risk_payments(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query10_high_risk_payments",
        Collection::FraudFeatures,
        "\
SELECT
  c.payment_id,
  c.customer_id,
  c.fraud_score,
  c.risk_level,
  c.computed_at,
  c.features.transaction_velocity_1h,
  c.features.card_country_mismatch,
  c.features.ip_country_mismatch
FROM c
WHERE c.merchant_id = @merchantId
  AND c.fraud_score >= 0.7
  AND c.computed_at >= @since
ORDER BY c.fraud_score DESC",
    )
    .with_cost(QueryCost::CrossPartition)
    .with_use_case("Manual review of suspicious transactions")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", hours_before(now, 24))
}

/// Q11: per-risk-level aggregates with `? 1 : 0` counters for the two
/// country-mismatch boolean features.
fn fraud_patterns_analysis(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query11_fraud_patterns_analysis",
        Collection::FraudFeatures,
        "\
SELECT
  c.risk_level,
  COUNT(1) as count,
  AVG(c.fraud_score) as avg_score,
  AVG(c.features.transaction_velocity_1h) as avg_velocity_1h,
  AVG(c.features.transaction_velocity_24h) as avg_velocity_24h,
  SUM(c.features.card_country_mismatch ? 1 : 0) as card_mismatch_count,
  SUM(c.features.ip_country_mismatch ? 1 : 0) as ip_mismatch_count
FROM c
WHERE c.merchant_id = @merchantId
  AND c.computed_at >= @since
GROUP BY c.risk_level",
    )
    .with_cost(QueryCost::CrossPartition)
    .with_use_case("Feature importance analysis for ML")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", days_before(now, 7))
}

/// Q12: customers with at least one dispute on record. `SELECT DISTINCT`
/// keeps one row per (customer_id, dispute_history) pair.
fn customers_with_disputes(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query12_customers_with_disputes",
        Collection::FraudFeatures,
        "\
SELECT DISTINCT
  c.customer_id,
  c.features.customer_dispute_history,
  COUNT(1) as payment_count,
  AVG(c.fraud_score) as avg_fraud_score
FROM c
WHERE c.merchant_id = @merchantId
  AND c.features.customer_dispute_history > 0
  AND c.computed_at >= @since
GROUP BY c.customer_id, c.features.customer_dispute_history
ORDER BY c.features.customer_dispute_history DESC",
    )
    .with_cost(QueryCost::CrossPartition)
    .with_use_case("Automatic blocklist and enhanced verification")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", days_before(now, 90))
}
