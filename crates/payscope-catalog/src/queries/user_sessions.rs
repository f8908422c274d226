//! Queries over the `user_sessions` collection.
//!
//! All four filter on `user_id`, the collection's partition key.

use time::OffsetDateTime;

use payscope_core::{Collection, QueryCost, QueryTemplate, days_before};

use super::SAMPLE_USER;

pub(crate) fn templates(now: OffsetDateTime) -> [QueryTemplate; 4] {
    [
        active_sessions(),
        user_page_views(now),
        suspicious_sessions(now),
        engagement_by_device(now),
    ]
}

/// Q5: a user's in-progress sessions. "Active" means the `session_end`
/// field is absent, not null; `NOT IS_DEFINED` is the only filter that
/// captures that.
fn active_sessions() -> QueryTemplate {
    QueryTemplate::new(
        "query5_active_sessions",
        Collection::UserSessions,
        "\
SELECT
  c.session_id,
  c.session_start,
  c.last_activity,
  c.device_type,
  c.browser,
  c.country
FROM c
WHERE c.user_id = @userId
  AND NOT IS_DEFINED(c.session_end)
ORDER BY c.last_activity DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("User dashboard and concurrent-session detection")
    .bind("@userId", SAMPLE_USER)
}

/// Q6: one output row per page view. The `JOIN page_view IN c.page_views`
/// expands the embedded array, cross-joining each element with its parent
/// session's fields.
fn user_page_views(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query6_user_page_views",
        Collection::UserSessions,
        "\
SELECT
  c.session_id,
  c.session_start,
  c.duration_seconds,
  page_view.page,
  page_view.count,
  page_view.total_time_seconds
FROM c
JOIN page_view IN c.page_views
WHERE c.user_id = @userId
  AND c.session_start >= @since
ORDER BY c.session_start DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Product analytics and A/B testing")
    .bind("@userId", SAMPLE_USER)
    .bind("@since", days_before(now, 30))
}

/// Q7: sessions matching either anomaly pattern: a bot burst (under 10
/// seconds yet over 50 actions) or a session running past 8 hours.
fn suspicious_sessions(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query7_suspicious_sessions",
        Collection::UserSessions,
        "\
SELECT
  c.session_id,
  c.session_start,
  c.duration_seconds,
  c.actions_count,
  c.device_type,
  c.ip_address
FROM c
WHERE c.user_id = @userId
  AND (
    c.duration_seconds < 10 AND c.actions_count > 50
    OR c.duration_seconds > 28800
  )
  AND c.session_start >= @since
ORDER BY c.session_start DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Bot and anomaly detection")
    .bind("@userId", SAMPLE_USER)
    .bind("@since", days_before(now, 7))
}

/// Q8: engagement averages per device type. Restricted to ended sessions
/// (`IS_DEFINED(c.session_end)`) so in-progress sessions don't drag the
/// duration averages down.
fn engagement_by_device(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query8_engagement_by_device",
        Collection::UserSessions,
        "\
SELECT
  c.device_type,
  COUNT(1) as session_count,
  AVG(c.duration_seconds) as avg_duration,
  AVG(c.actions_count) as avg_actions,
  SUM(c.duration_seconds) as total_time
FROM c
WHERE c.user_id = @userId
  AND c.session_start >= @since
  AND IS_DEFINED(c.session_end)
GROUP BY c.device_type
ORDER BY session_count DESC",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Mobile vs desktop analytics")
    .bind("@userId", SAMPLE_USER)
    .bind("@since", days_before(now, 90))
}
