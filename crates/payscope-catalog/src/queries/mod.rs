//! The catalogue's query definitions, one module per collection.
//!
//! Every constructor takes `now` so default look-back bindings are
//! deterministic under test; [`QueryCatalog::new`](crate::QueryCatalog::new)
//! passes the wall clock. Query text is in the store's SQL dialect and the
//! bindings mirror it exactly; `check_bindings` holds for every template
//! (asserted catalogue-wide in tests).

pub(crate) mod api_logs;
pub(crate) mod fraud_features;
pub(crate) mod user_sessions;
pub(crate) mod webhook_events;

/// Sample merchant account used as the default `@merchantId` binding.
pub(crate) const SAMPLE_MERCHANT: &str = "acct_1MxY2kLkdIwHu0C9";
/// Sample user used as the default `@userId` binding.
pub(crate) const SAMPLE_USER: &str = "usr_acct_1MxY2kLkdIwHu0C9";
/// Sample payment intent used as the default `@paymentId` binding.
pub(crate) const SAMPLE_PAYMENT: &str = "pi_3O9P8qLkdIwHu0C91rXyZmQY";
