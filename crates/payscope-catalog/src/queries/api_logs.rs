//! Queries over the `api_logs` collection.
//!
//! All four filter on `merchant_id`, the collection's partition key, so
//! each stays within a single partition.

use time::OffsetDateTime;

use payscope_core::{Collection, QueryCost, QueryTemplate, days_before, hours_before};

use super::SAMPLE_MERCHANT;

pub(crate) fn templates(now: OffsetDateTime) -> [QueryTemplate; 4] {
    [
        api_logs_24h(now),
        api_errors_by_endpoint(now),
        slowest_api_calls(now),
        api_success_rate_hourly(now),
    ]
}

/// Q1: every API log for a merchant over the last 24 hours, newest first.
fn api_logs_24h(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query1_api_logs_24h",
        Collection::ApiLogs,
        "\
SELECT
  c.log_id,
  c.timestamp,
  c.endpoint,
  c.method,
  c.status_code,
  c.latency_ms,
  c.error_message
FROM c
WHERE c.merchant_id = @merchantId
  AND c.timestamp >= @since
ORDER BY c.timestamp DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Merchant monitoring dashboard")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", hours_before(now, 24))
}

/// Q2: 5xx errors aggregated per endpoint over the last 7 days, worst first.
fn api_errors_by_endpoint(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query2_api_errors_by_endpoint",
        Collection::ApiLogs,
        "\
SELECT
  c.endpoint,
  COUNT(1) as error_count,
  AVG(c.latency_ms) as avg_latency,
  MAX(c.latency_ms) as max_latency
FROM c
WHERE c.merchant_id = @merchantId
  AND c.status_code >= 500
  AND c.timestamp >= @since
GROUP BY c.endpoint
ORDER BY error_count DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Production incident debugging")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", days_before(now, 7))
}

/// Q3: the 100 slowest calls of the last 24 hours, by latency descending.
fn slowest_api_calls(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query3_slowest_api_calls",
        Collection::ApiLogs,
        "\
SELECT TOP 100
  c.log_id,
  c.timestamp,
  c.endpoint,
  c.latency_ms,
  c.method
FROM c
WHERE c.merchant_id = @merchantId
  AND c.timestamp >= @since
ORDER BY c.latency_ms DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("API performance optimization")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", hours_before(now, 24))
}

/// Q4: hourly request totals with 2xx success counts and a derived
/// percentage column.
fn api_success_rate_hourly(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query4_api_success_rate_hourly",
        Collection::ApiLogs,
        "\
SELECT
  DateTimePart(\"hour\", c.timestamp) as hour,
  COUNT(1) as total_requests,
  SUM(c.status_code >= 200 AND c.status_code < 300 ? 1 : 0) as success_count,
  (SUM(c.status_code >= 200 AND c.status_code < 300 ? 1 : 0) * 100.0 / COUNT(1)) as success_rate
FROM c
WHERE c.merchant_id = @merchantId
  AND c.timestamp >= @since
GROUP BY DateTimePart(\"hour\", c.timestamp)
ORDER BY hour DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("SLA monitoring and alerting")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", hours_before(now, 24))
}
