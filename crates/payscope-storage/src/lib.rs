//! # payscope-storage
//!
//! Document-store abstraction and query runner for payscope.
//!
//! This crate defines the boundary between the query catalogue and the
//! store that executes it. It does not contain a store implementation;
//! those live behind the [`DocumentStore`] trait.
//!
//! ## Overview
//!
//! - [`DocumentStore`] — the object-safe async trait a store handle
//!   implements: submit `{ query text, named parameters }`, get back one
//!   page plus a continuation token.
//! - [`execute_all`] — drain every page of a template's results.
//! - [`execute_paged`] / [`PageStream`] — pull pages one at a time; the
//!   only suspension points are the page-boundary `await`s.
//! - [`StoreError`] — the store-reported failure taxonomy, always naming
//!   the failing template. No retry, no fallback.
//! - [`StoreConfig`] — endpoint/key/database from the environment.
//!
//! ## Example
//!
//! ```ignore
//! use payscope_storage::{execute_paged, DocumentStore};
//!
//! async fn drain(store: &dyn DocumentStore, template: &QueryTemplate) {
//!     let mut pages = execute_paged(store, template, 100);
//!     while let Some(page) = pages.try_next().await? {
//!         process(page.records);
//!     }
//! }
//! ```

mod config;
mod error;
mod runner;
mod traits;
mod types;

pub use config::{ConfigError, ENV_DATABASE, ENV_ENDPOINT, ENV_KEY, StoreConfig};
pub use error::{ErrorCategory, StoreError};
pub use runner::{PageStream, execute_all, execute_paged};
pub use traits::{DocumentStore, DynStore};
pub use types::{QueryOptions, ResultPage};

/// Type alias for a store result.
pub type StoreResult<T> = Result<T, StoreError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use payscope_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigError, StoreConfig};
    pub use crate::error::{ErrorCategory, StoreError};
    pub use crate::runner::{PageStream, execute_all, execute_paged};
    pub use crate::traits::{DocumentStore, DynStore};
    pub use crate::types::{QueryOptions, ResultPage};
    pub use crate::StoreResult;
}
