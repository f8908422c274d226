//! # payscope-catalog
//!
//! The static catalogue of parameterized queries for the payscope
//! document store: 17 templates across four collections, defined once at
//! process start and read-only afterwards.
//!
//! ## Overview
//!
//! - [`QueryCatalog`] — the explicit registry instance; `get` by name,
//!   `list_by_collection` in declaration order.
//! - [`AuditTrail`] — the two-step cross-collection audit composite. The
//!   registry supplies both templates; chaining them is the caller's job.
//!
//! ## Example
//!
//! ```ignore
//! use payscope_catalog::QueryCatalog;
//! use payscope_storage::execute_all;
//!
//! let catalog = QueryCatalog::new();
//! let template = catalog
//!     .get("query13_failed_webhooks_for_retry")?
//!     .with_param("@merchantId", "acct_42")?;
//! let due = execute_all(store.as_ref(), &template).await?;
//! ```

mod audit;
mod catalog;
mod error;
mod queries;

pub use audit::AuditTrail;
pub use catalog::QueryCatalog;
pub use error::CatalogError;
