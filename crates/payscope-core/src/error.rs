//! Template consistency errors.

/// Errors raised when a template's bindings and query text disagree.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A rebind named a parameter the template does not declare.
    ///
    /// A misspelled name would otherwise ship a placeholder the store only
    /// rejects at runtime, so this fails at bind time instead.
    #[error("template `{template}` has no parameter named `{name}`")]
    UnknownParameter {
        /// The template being rebound.
        template: String,
        /// The parameter name that was not found.
        name: String,
    },

    /// The query text references a placeholder with no matching binding.
    #[error("template `{template}` references `{placeholder}` with no matching binding")]
    MissingBinding {
        /// The template whose text is inconsistent.
        template: String,
        /// The unbound `@placeholder` token.
        placeholder: String,
    },

    /// Two bindings share the same parameter name.
    #[error("template `{template}` binds `{name}` more than once")]
    DuplicateBinding {
        /// The template with the duplicate.
        template: String,
        /// The duplicated parameter name.
        name: String,
    },
}

impl TemplateError {
    /// Creates a new `UnknownParameter` error.
    #[must_use]
    pub fn unknown_parameter(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownParameter {
            template: template.into(),
            name: name.into(),
        }
    }

    /// Creates a new `MissingBinding` error.
    #[must_use]
    pub fn missing_binding(template: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self::MissingBinding {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Creates a new `DuplicateBinding` error.
    #[must_use]
    pub fn duplicate_binding(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateBinding {
            template: template.into(),
            name: name.into(),
        }
    }

    /// Returns `true` if this is an unknown parameter error.
    #[must_use]
    pub fn is_unknown_parameter(&self) -> bool {
        matches!(self, Self::UnknownParameter { .. })
    }

    /// Returns `true` if this is a missing binding error.
    #[must_use]
    pub fn is_missing_binding(&self) -> bool {
        matches!(self, Self::MissingBinding { .. })
    }
}
