//! Logical collections of the payments-observability document store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four logical collections (containers) the query catalogue targets.
///
/// Each collection has a fixed partition key; templates that filter on a
/// different field are cross-partition scans and flagged as such by their
/// [`QueryCost`](crate::query::QueryCost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// API request logs, partitioned by `merchant_id`.
    ApiLogs,
    /// End-user browsing sessions, partitioned by `user_id`.
    UserSessions,
    /// ML fraud features computed per payment, partitioned by `payment_id`.
    FraudFeatures,
    /// Outbound webhook delivery attempts, partitioned by `merchant_id`.
    WebhookEvents,
}

impl Collection {
    /// All collections, in catalogue declaration order.
    pub const ALL: [Collection; 4] = [
        Collection::ApiLogs,
        Collection::UserSessions,
        Collection::FraudFeatures,
        Collection::WebhookEvents,
    ];

    /// The collection's container name as known to the store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiLogs => "api_logs",
            Self::UserSessions => "user_sessions",
            Self::FraudFeatures => "fraud_features",
            Self::WebhookEvents => "webhook_events",
        }
    }

    /// The field the store uses to co-locate this collection's documents.
    #[must_use]
    pub fn partition_key(&self) -> &'static str {
        match self {
            Self::ApiLogs | Self::WebhookEvents => "merchant_id",
            Self::UserSessions => "user_id",
            Self::FraudFeatures => "payment_id",
        }
    }

    /// Resolves a container name back to a collection.
    ///
    /// Returns `None` for unknown names rather than erroring, so lookups
    /// keyed on caller-supplied strings stay total.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "api_logs" => Some(Self::ApiLogs),
            "user_sessions" => Some(Self::UserSessions),
            "fraud_features" => Some(Self::FraudFeatures),
            "webhook_events" => Some(Self::WebhookEvents),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
