//! The two-step transaction audit trail.
//!
//! The store cannot join `fraud_features` to `api_logs`, so the full audit
//! trail of a payment is a dependent read the caller orchestrates:
//!
//! 1. Point-look-up the payment's fraud-feature document
//!    ([`AuditTrail::fraud_context`]).
//! 2. Extract `merchant_id` from that document, then find the API log
//!    entries whose request body contains the payment id within the
//!    relevant time window ([`AuditTrail::correlated_logs`]).
//!
//! The catalogue only supplies the two templates; extracting the field and
//! rebinding step 2 is the caller's contract.

use time::{Duration, OffsetDateTime};

use payscope_core::{Collection, QueryCost, QueryTemplate, TemplateError};

use crate::queries::{SAMPLE_MERCHANT, SAMPLE_PAYMENT};

pub(crate) fn steps(now: OffsetDateTime) -> [QueryTemplate; 2] {
    [fraud_context(), correlated_logs(now)]
}

/// Step 1: resolve the payment's fraud-feature document.
fn fraud_context() -> QueryTemplate {
    QueryTemplate::new(
        "query17_audit_fraud_context",
        Collection::FraudFeatures,
        "SELECT * FROM c WHERE c.payment_id = @paymentId",
    )
    .with_cost(QueryCost::PointRead)
    .with_use_case("Transaction audit trail, step 1")
    .bind("@paymentId", SAMPLE_PAYMENT)
}

/// Step 2: API log entries mentioning the payment within a time window,
/// scoped to the merchant resolved by step 1.
fn correlated_logs(now: OffsetDateTime) -> QueryTemplate {
    QueryTemplate::new(
        "query17_audit_correlated_logs",
        Collection::ApiLogs,
        "\
SELECT * FROM c
WHERE c.merchant_id = @merchantId
  AND c.timestamp BETWEEN @startTime AND @endTime
  AND CONTAINS(c.request_body, @paymentId)",
    )
    .with_cost(QueryCost::SinglePartition)
    .with_use_case("Transaction audit trail, step 2")
    .bind("@merchantId", SAMPLE_MERCHANT)
    .bind("@startTime", now - Duration::minutes(1))
    .bind("@endTime", now)
    .bind("@paymentId", SAMPLE_PAYMENT)
}

/// The ordered pair of audit-trail templates.
///
/// Step 2 depends on a value extracted from step 1's result; the registry
/// does not resolve that dependency.
#[derive(Debug, Clone)]
pub struct AuditTrail {
    steps: [QueryTemplate; 2],
}

impl AuditTrail {
    pub(crate) fn from_steps(step1: QueryTemplate, step2: QueryTemplate) -> Self {
        Self {
            steps: [step1, step2],
        }
    }

    /// Step 1: the fraud-context point lookup.
    #[must_use]
    pub fn fraud_context(&self) -> &QueryTemplate {
        &self.steps[0]
    }

    /// Step 2: the correlated-log scan.
    #[must_use]
    pub fn correlated_logs(&self) -> &QueryTemplate {
        &self.steps[1]
    }

    /// Both steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[QueryTemplate] {
        &self.steps
    }

    /// Convenience for the caller-side chaining contract: a fresh copy of
    /// step 2 bound to the merchant resolved by step 1 and the window of
    /// interest around the payment.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the step-2 template no longer declares
    /// one of the rebound parameters.
    pub fn bind_correlated_logs(
        &self,
        merchant_id: &str,
        payment_id: &str,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<QueryTemplate, TemplateError> {
        self.correlated_logs()
            .with_param("@merchantId", merchant_id)?
            .with_param("@paymentId", payment_id)?
            .with_param("@startTime", start)?
            .with_param("@endTime", end)
    }
}
