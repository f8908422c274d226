//! Parameterized query templates.
//!
//! A [`QueryTemplate`] pairs a query string containing `@name` placeholders
//! with a typed list of [`ParamBinding`]s, so tests and callers can reason
//! about bindings without parsing query text. Catalogue entries are logically
//! constant; per-invocation rebinding goes through [`QueryTemplate::with_param`],
//! which returns a fresh instance and never mutates the shared entry.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;

use crate::collection::Collection;
use crate::error::TemplateError;
use crate::time::Rfc3339;

/// A typed parameter value for a query.
///
/// Serializes to the plain JSON value the store expects (timestamps as
/// RFC 3339 strings).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
}

impl ParamValue {
    /// Get the value as a string for display/debugging.
    #[must_use]
    pub fn as_display_str(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Timestamp(ts) => Rfc3339(*ts).to_string(),
        }
    }

    /// Converts the value into the JSON form sent to the store.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<OffsetDateTime> for ParamValue {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

/// A named parameter binding. Names carry the `@` prefix exactly as written
/// in the query text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamBinding {
    /// The `@name` placeholder this binding satisfies.
    pub name: String,
    /// The bound value.
    pub value: ParamValue,
}

impl ParamBinding {
    /// Creates a new binding.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Expected cost class of a template against the store's partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCost {
    /// Exact-match lookup on a unique key; minimal latency.
    PointRead,
    /// Filter aligned with the collection's partition key.
    SinglePartition,
    /// Filter on a non-partition field; the store must fan out across
    /// partitions. Acceptable for batch/back-office use only.
    CrossPartition,
}

impl QueryCost {
    /// Whether a template of this cost class is acceptable on the request
    /// path. Cross-partition scans are batch-only.
    #[must_use]
    pub fn request_path_safe(&self) -> bool {
        !matches!(self, Self::CrossPartition)
    }
}

impl fmt::Display for QueryCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointRead => write!(f, "point_read"),
            Self::SinglePartition => write!(f, "single_partition"),
            Self::CrossPartition => write!(f, "cross_partition"),
        }
    }
}

/// The wire form of a query submission: text plus named parameters.
///
/// This is what a [`DocumentStore`] implementation actually sends; the
/// template name rides along for error context but is not serialized.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySpec {
    /// The originating template's name, for error and log context.
    #[serde(skip_serializing)]
    pub name: String,
    /// The query text with `@name` placeholders.
    pub query: String,
    /// The parameter bindings, in declaration order.
    pub parameters: Vec<ParamBinding>,
}

/// A parameterized query template: name, target collection, query text and
/// bindings, plus the cost metadata carried from the catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct QueryTemplate {
    /// Catalogue identifier, e.g. `query1_api_logs_24h`.
    pub name: &'static str,
    /// The collection the template targets.
    pub collection: Collection,
    /// Expected cost class against the store's partitioning.
    pub cost: QueryCost,
    /// One-line description of what the query is for.
    pub use_case: &'static str,
    /// Query text in the store's dialect, with `@name` placeholders.
    pub text: &'static str,
    /// Parameter bindings, in declaration order.
    pub parameters: Vec<ParamBinding>,
}

impl QueryTemplate {
    /// Creates a template with no bindings yet. Catalogue constructors chain
    /// [`bind`](Self::bind) calls to declare parameters.
    #[must_use]
    pub fn new(name: &'static str, collection: Collection, text: &'static str) -> Self {
        Self {
            name,
            collection,
            cost: QueryCost::SinglePartition,
            use_case: "",
            text,
            parameters: Vec::new(),
        }
    }

    /// Sets the cost class.
    #[must_use]
    pub fn with_cost(mut self, cost: QueryCost) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the use-case description.
    #[must_use]
    pub fn with_use_case(mut self, use_case: &'static str) -> Self {
        self.use_case = use_case;
        self
    }

    /// Declares a parameter binding. Construction-time only; rebinding an
    /// existing parameter per invocation goes through [`with_param`](Self::with_param).
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.push(ParamBinding::new(name, value));
        self
    }

    /// Returns a copy of this template with the named parameter rebound.
    ///
    /// The receiver is untouched; catalogue entries stay constant and each
    /// invocation works on its own instance.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownParameter`] if the template declares
    /// no parameter with that name.
    pub fn with_param(
        &self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<Self, TemplateError> {
        let mut rebound = self.clone();
        let binding = rebound
            .parameters
            .iter_mut()
            .find(|binding| binding.name == name)
            .ok_or_else(|| TemplateError::unknown_parameter(self.name, name))?;
        binding.value = value.into();
        Ok(rebound)
    }

    /// The `@name` placeholders referenced by the query text, first-seen order,
    /// deduplicated.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let text = self.text;
        let mut rest = 0usize;
        while let Some(offset) = text[rest..].find('@') {
            let start = rest + offset;
            let tail = &text[start + 1..];
            let len = tail
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(tail.len());
            if len > 0 {
                let token = &text[start..start + 1 + len];
                if !out.iter().any(|p| p == token) {
                    out.push(token.to_string());
                }
            }
            rest = start + 1 + len;
        }
        out
    }

    /// Verifies that every placeholder in the text has exactly one matching
    /// binding.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingBinding`] for an unbound placeholder
    /// and [`TemplateError::DuplicateBinding`] if a name is bound twice.
    pub fn check_bindings(&self) -> Result<(), TemplateError> {
        for (i, binding) in self.parameters.iter().enumerate() {
            if self.parameters[..i].iter().any(|b| b.name == binding.name) {
                return Err(TemplateError::duplicate_binding(self.name, &binding.name));
            }
        }
        for placeholder in self.placeholders() {
            if !self.parameters.iter().any(|b| b.name == placeholder) {
                return Err(TemplateError::missing_binding(self.name, placeholder));
            }
        }
        Ok(())
    }

    /// Bindings the query text never references. Permitted, but a smell worth
    /// surfacing in logs.
    #[must_use]
    pub fn unused_parameters(&self) -> Vec<&str> {
        let placeholders = self.placeholders();
        self.parameters
            .iter()
            .filter(|b| !placeholders.iter().any(|p| *p == b.name))
            .map(|b| b.name.as_str())
            .collect()
    }

    /// Produces the wire form submitted to the store.
    #[must_use]
    pub fn to_spec(&self) -> QuerySpec {
        QuerySpec {
            name: self.name.to_string(),
            query: self.text.to_string(),
            parameters: self.parameters.clone(),
        }
    }
}
