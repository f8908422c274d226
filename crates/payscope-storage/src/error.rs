//! Store error types.
//!
//! Everything the underlying document store can report surfaces here,
//! tagged with the name of the template that was executing. The runner
//! performs no recovery: no retry, no fallback, no swallowing.

use std::fmt;

/// Errors reported by the document store during query execution.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store rejected the query text or parameters.
    #[error("store rejected query `{template}` as malformed: {message}")]
    MalformedQuery {
        /// The template that was executing.
        template: String,
        /// The store's diagnostic.
        message: String,
    },

    /// The store rate-limited the request.
    #[error("store throttled query `{template}`: {message}")]
    Throttled {
        /// The template that was executing.
        template: String,
        /// The store's diagnostic.
        message: String,
    },

    /// The request exceeded the store's deadline.
    #[error("query `{template}` timed out: {message}")]
    Timeout {
        /// The template that was executing.
        template: String,
        /// The store's diagnostic.
        message: String,
    },

    /// The store refused the caller's credentials.
    #[error("store refused query `{template}`: {message}")]
    Unauthorized {
        /// The template that was executing.
        template: String,
        /// The store's diagnostic.
        message: String,
    },

    /// The store could not be reached.
    #[error("connection failure during query `{template}`: {message}")]
    Connection {
        /// The template that was executing.
        template: String,
        /// The store's diagnostic.
        message: String,
    },

    /// Any other store-side failure.
    #[error("internal store error during query `{template}`: {message}")]
    Internal {
        /// The template that was executing.
        template: String,
        /// The store's diagnostic.
        message: String,
    },
}

impl StoreError {
    /// Creates a new `MalformedQuery` error.
    #[must_use]
    pub fn malformed_query(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedQuery {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Throttled` error.
    #[must_use]
    pub fn throttled(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Throttled {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Timeout` error.
    #[must_use]
    pub fn timeout(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            template: template.into(),
            message: message.into(),
        }
    }

    /// The name of the template that was executing when the store failed.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::MalformedQuery { template, .. }
            | Self::Throttled { template, .. }
            | Self::Timeout { template, .. }
            | Self::Unauthorized { template, .. }
            | Self::Connection { template, .. }
            | Self::Internal { template, .. } => template,
        }
    }

    /// Returns `true` if this is a throttling error.
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the store rejected the query itself.
    #[must_use]
    pub fn is_malformed_query(&self) -> bool {
        matches!(self, Self::MalformedQuery { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedQuery { .. } => ErrorCategory::Query,
            Self::Throttled { .. } => ErrorCategory::Throttling,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Unauthorized { .. } => ErrorCategory::Authorization,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of store errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The query itself was rejected.
    Query,
    /// Rate limiting.
    Throttling,
    /// Deadline exceeded.
    Timeout,
    /// Credential or permission failure.
    Authorization,
    /// Connectivity failure.
    Infrastructure,
    /// Internal store error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Throttling => write!(f, "throttling"),
            Self::Timeout => write!(f, "timeout"),
            Self::Authorization => write!(f, "authorization"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::throttled("query1_api_logs_24h", "request rate too large");
        assert_eq!(
            err.to_string(),
            "store throttled query `query1_api_logs_24h`: request rate too large"
        );

        let err = StoreError::timeout("query3_slowest_api_calls", "deadline exceeded");
        assert_eq!(
            err.to_string(),
            "query `query3_slowest_api_calls` timed out: deadline exceeded"
        );
    }

    #[test]
    fn test_error_identifies_template() {
        let err = StoreError::malformed_query("query9_fraud_features_by_payment", "syntax");
        assert_eq!(err.template(), "query9_fraud_features_by_payment");
        assert!(err.is_malformed_query());
        assert!(!err.is_throttled());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StoreError::throttled("q", "m").category(),
            ErrorCategory::Throttling
        );
        assert_eq!(
            StoreError::connection("q", "m").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(ErrorCategory::Throttling.to_string(), "throttling");
    }
}
