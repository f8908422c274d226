//! The query catalogue registry.

use std::collections::HashMap;
use std::ops::Range;

use time::OffsetDateTime;

use payscope_core::{Collection, QueryTemplate, now_utc};

use crate::audit::{self, AuditTrail};
use crate::error::CatalogError;
use crate::queries;

/// The fixed, read-only set of query templates, addressable by name and
/// listable per collection.
///
/// Built once at startup and passed to consumers; there is no mutation
/// after construction and no hidden global instance. Default bindings for
/// look-back windows are seeded from the construction-time clock; callers
/// rebind per invocation with [`QueryTemplate::with_param`].
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    /// All templates in declaration order: the four collection groups of
    /// four, then the two audit steps.
    templates: Vec<QueryTemplate>,
    by_name: HashMap<&'static str, usize>,
    groups: HashMap<Collection, Range<usize>>,
}

impl QueryCatalog {
    /// Builds the catalogue with default bindings seeded from the current
    /// wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::at(now_utc())
    }

    /// Builds the catalogue with default bindings seeded from `now`.
    /// Deterministic; test fixtures pass a pinned clock.
    #[must_use]
    pub fn at(now: OffsetDateTime) -> Self {
        let mut templates = Vec::with_capacity(18);
        let mut groups = HashMap::new();

        for (collection, group) in [
            (Collection::ApiLogs, queries::api_logs::templates(now)),
            (
                Collection::UserSessions,
                queries::user_sessions::templates(now),
            ),
            (
                Collection::FraudFeatures,
                queries::fraud_features::templates(now),
            ),
            (
                Collection::WebhookEvents,
                queries::webhook_events::templates(now),
            ),
        ] {
            let start = templates.len();
            templates.extend(group);
            groups.insert(collection, start..templates.len());
        }

        // The audit steps are addressable by name but belong to no
        // collection group; the two-step dependency makes them a composite,
        // not a fifth entry in a group listing.
        templates.extend(audit::steps(now));

        let by_name = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name, i))
            .collect();

        Self {
            templates,
            by_name,
            groups,
        }
    }

    /// Looks up a template by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTemplate`] if no template is
    /// registered under `name`.
    pub fn get(&self, name: &str) -> Result<&QueryTemplate, CatalogError> {
        self.by_name
            .get(name)
            .map(|&i| &self.templates[i])
            .ok_or_else(|| CatalogError::unknown_template(name))
    }

    /// The templates targeting a collection, in declaration order.
    ///
    /// An unknown collection name yields an empty slice, not an error; the
    /// lookup stays total for caller-supplied strings.
    #[must_use]
    pub fn list_by_collection(&self, collection: &str) -> &[QueryTemplate] {
        Collection::from_name(collection)
            .and_then(|c| self.groups.get(&c))
            .map_or(&[], |range| &self.templates[range.clone()])
    }

    /// All template names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.iter().map(|t| t.name)
    }

    /// All templates in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = &QueryTemplate> + '_ {
        self.templates.iter()
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the catalogue holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The two-step transaction audit trail.
    ///
    /// # Panics
    ///
    /// Never panics; the audit steps are registered unconditionally at
    /// construction.
    #[must_use]
    pub fn audit_trail(&self) -> AuditTrail {
        let step1 = self.templates[self.by_name["query17_audit_fraud_context"]].clone();
        let step2 = self.templates[self.by_name["query17_audit_correlated_logs"]].clone();
        AuditTrail::from_steps(step1, step2)
    }

    /// Verifies binding consistency for every registered template and logs
    /// a warning for any binding the query text never references.
    ///
    /// # Errors
    ///
    /// Returns the first [`TemplateError`](payscope_core::TemplateError)
    /// found, wrapped in [`CatalogError::Template`].
    pub fn check(&self) -> Result<(), CatalogError> {
        for template in &self.templates {
            template.check_bindings()?;
            for unused in template.unused_parameters() {
                tracing::warn!(
                    template = %template.name,
                    parameter = %unused,
                    "binding never referenced by query text"
                );
            }
        }
        Ok(())
    }
}

impl Default for QueryCatalog {
    fn default() -> Self {
        Self::new()
    }
}
