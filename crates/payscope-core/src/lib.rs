//! # payscope-core
//!
//! Core types shared across the payscope query layer.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//! the four logical [`Collection`]s of the payments-observability store,
//! the [`QueryTemplate`] / [`ParamBinding`] pair that makes parameterized
//! queries a first-class value instead of interpolated strings, and the
//! RFC 3339 time helpers used to seed default look-back bindings.
//!
//! It carries no execution logic. Executing a template against a store
//! lives in `payscope-storage`; the fixed catalogue of templates lives in
//! `payscope-catalog`.

pub mod collection;
pub mod error;
pub mod query;
pub mod time;

pub use collection::Collection;
pub use error::TemplateError;
pub use query::{ParamBinding, ParamValue, QueryCost, QuerySpec, QueryTemplate};
pub use crate::time::{Rfc3339, days_before, hours_before, now_utc};
