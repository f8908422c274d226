//! Catalogue error types.

use payscope_core::TemplateError;

/// Errors raised by catalogue lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No template is registered under the requested name.
    #[error("unknown query template `{name}`")]
    UnknownTemplate {
        /// The name that was looked up.
        name: String,
    },

    /// A template's bindings and query text disagree.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl CatalogError {
    /// Creates a new `UnknownTemplate` error.
    #[must_use]
    pub fn unknown_template(name: impl Into<String>) -> Self {
        Self::UnknownTemplate { name: name.into() }
    }

    /// Returns `true` if this is an unknown template error.
    #[must_use]
    pub fn is_unknown_template(&self) -> bool {
        matches!(self, Self::UnknownTemplate { .. })
    }
}
