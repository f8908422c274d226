//! Queries over the `webhook_events` collection.
//!
//! All four filter on `merchant_id`, the collection's partition key.

use time::OffsetDateTime;

use payscope_core::{Collection, QueryCost, QueryTemplate, days_before, hours_before};

use super::SAMPLE_MERCHANT;

pub(crate) fn templates(now: OffsetDateTime) -> [QueryTemplate; 4] {
    [
        failed_webhooks_for_retry(now),
        webhook_stats_by_event_type(now),
        slow_webhook_endpoints(now),
        webhook_delivery_time(now),
    ]
}

/// Q13: the retry-queue poll. Retryable means all three of: delivery
/// failed, fewer than 5 attempts so far, and the scheduled retry time has
/// passed. Ordered by due time ascending so the most overdue goes first.
fn failed_webhooks_for_retry(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query13_failed_webhooks_for_retry",
        Collection::WebhookEvents,
        "\
SELECT
  c.webhook_id,
  c.event_type,
  c.event_id,
  c.webhook_url,
  c.retry_count,
  c.next_retry_at,
  c.error_message
FROM c
WHERE c.merchant_id = @merchantId
  AND c.status = 'failed'
  AND c.retry_count < 5
  AND c.next_retry_at <= @now
ORDER BY c.next_retry_at ASC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Background retry job")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@now", now)
}

/// Q14: delivery statistics per event type, including a derived
/// success-rate percentage.
fn webhook_stats_by_event_type(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query14_webhook_stats_by_event_type",
        Collection::WebhookEvents,
        "\
SELECT
  c.event_type,
  COUNT(1) as total_events,
  SUM(c.status = 'sent' ? 1 : 0) as sent_count,
  SUM(c.status = 'failed' ? 1 : 0) as failed_count,
  (SUM(c.status = 'sent' ? 1 : 0) * 100.0 / COUNT(1)) as success_rate,
  AVG(c.response_time_ms) as avg_response_time,
  AVG(c.retry_count) as avg_retry_count
FROM c
WHERE c.merchant_id = @merchantId
  AND c.created_at >= @since
GROUP BY c.event_type
ORDER BY total_events DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Webhook health monitoring and alerting")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", days_before(now, 7))
}

/// Q15: the 50 slowest deliveries past the 5 second mark, slowest first.
fn slow_webhook_endpoints(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query15_slow_webhook_endpoints",
        Collection::WebhookEvents,
        "\
SELECT TOP 50
  c.webhook_id,
  c.event_type,
  c.webhook_url,
  c.response_time_ms,
  c.created_at
FROM c
WHERE c.merchant_id = @merchantId
  AND c.status = 'sent'
  AND c.response_time_ms > 5000
  AND c.created_at >= @since
ORDER BY c.response_time_ms DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Merchant endpoint optimization")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", hours_before(now, 24))
}

/// Q16: elapsed seconds between creation and delivery as a derived column.
/// Records missing `delivered_at` are excluded so the diff is always
/// defined.
fn webhook_delivery_time(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query16_webhook_delivery_time",
        Collection::WebhookEvents,
        "\
SELECT
  c.webhook_id,
  c.event_type,
  c.created_at,
  c.delivered_at,
  DateTimeDiff('second', c.created_at, c.delivered_at) as delivery_time_seconds,
  c.retry_count
FROM c
WHERE c.merchant_id = @merchantId
  AND c.status = 'sent'
  AND IS_DEFINED(c.delivered_at)
  AND c.created_at >= @since
ORDER BY delivery_time_seconds DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Webhook SLA monitoring")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@since", hours_before(now, 24))
}
