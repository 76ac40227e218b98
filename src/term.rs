//! The [`Term`] value type.
//!
//! A term is either a regular expression pattern or a "fair" representation,
//! an opaque encoding of a regular language produced by the service. Terms are
//! immutable once built; the only interior state is a fill-once cache of their
//! [`Details`].
//!
//! Terms can be persisted with [`Term::serialize`] and restored with
//! [`Term::deserialize`]:
//!
//! ```rust
//! use regexsolver::Term;
//!
//! let term = Term::regex("(abc|de)");
//! assert_eq!(term.serialize(), "regex=(abc|de)");
//! assert_eq!(Term::deserialize("regex=(abc|de)"), Some(term));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::{ApiResult, RegexSolver};
use crate::details::Details;

const REGEX_PREFIX: &str = "regex=";
const FAIR_PREFIX: &str = "fair=";

/// Discriminant of a [`Term`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermType {
    Regex,
    Fair,
}

impl TermType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermType::Regex => "regex",
            TermType::Fair => "fair",
        }
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TermValue {
    Regex(String),
    Fair(String),
}

/// A regular expression or a fair representation of a regular language
#[derive(Debug, Clone)]
pub struct Term {
    value: TermValue,
    details: OnceCell<Details>,
}

impl Term {
    /// Build a term from a regular expression. The pattern is not validated locally.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::from_value(TermValue::Regex(pattern.into()))
    }

    /// Build a term from a fair representation previously returned by the service
    pub fn fair(fair: impl Into<String>) -> Self {
        Self::from_value(TermValue::Fair(fair.into()))
    }

    pub(crate) fn from_parts(term_type: TermType, value: String) -> Self {
        match term_type {
            TermType::Regex => Self::regex(value),
            TermType::Fair => Self::fair(value),
        }
    }

    fn from_value(value: TermValue) -> Self {
        Self {
            value,
            details: OnceCell::new(),
        }
    }

    /// Whether this is a regex or a fair term
    pub fn term_type(&self) -> TermType {
        match self.value {
            TermValue::Regex(_) => TermType::Regex,
            TermValue::Fair(_) => TermType::Fair,
        }
    }

    /// Raw payload, whatever the variant
    pub fn value(&self) -> &str {
        match &self.value {
            TermValue::Regex(value) | TermValue::Fair(value) => value,
        }
    }

    /// The pattern, if this is a regex term
    pub fn as_pattern(&self) -> Option<&str> {
        match &self.value {
            TermValue::Regex(pattern) => Some(pattern),
            TermValue::Fair(_) => None,
        }
    }

    /// The fair representation, if this is a fair term
    pub fn as_fair(&self) -> Option<&str> {
        match &self.value {
            TermValue::Fair(fair) => Some(fair),
            TermValue::Regex(_) => None,
        }
    }

    /// Details fetched by a previous [`Term::get_details`] call, if any
    pub fn cached_details(&self) -> Option<&Details> {
        self.details.get()
    }

    /// Fetch the details of this term.
    ///
    /// The first successful response is cached for the lifetime of the term;
    /// concurrent first calls share a single request. Failures are not cached.
    pub async fn get_details(&self, solver: &RegexSolver) -> ApiResult<&Details> {
        if let Some(details) = self.details.get() {
            debug!(term = %self, "details served from cache");
            return Ok(details);
        }
        self.details
            .get_or_try_init(|| solver.get_details(self))
            .await
    }

    /// Generate up to `count` strings matched by this term.
    ///
    /// The service may return fewer, e.g. when the language is finite.
    pub async fn generate_strings(&self, solver: &RegexSolver, count: usize) -> ApiResult<Vec<String>> {
        solver.generate_strings(self, count).await
    }

    /// Intersection of this term with all of `terms`
    pub async fn intersection(&self, solver: &RegexSolver, terms: &[Term]) -> ApiResult<Term> {
        solver.compute_intersection(&self.with_operands(terms)).await
    }

    /// Union of this term with all of `terms`
    pub async fn union(&self, solver: &RegexSolver, terms: &[Term]) -> ApiResult<Term> {
        solver.compute_union(&self.with_operands(terms)).await
    }

    /// This term minus `term`
    pub async fn subtraction(&self, solver: &RegexSolver, term: &Term) -> ApiResult<Term> {
        solver.compute_subtraction(&[self.clone(), term.clone()]).await
    }

    /// True if both terms match exactly the same strings
    pub async fn is_equivalent_to(&self, solver: &RegexSolver, term: &Term) -> ApiResult<bool> {
        solver.equivalence(&[self.clone(), term.clone()]).await
    }

    /// True if every string matched by this term is matched by `term`
    pub async fn is_subset_of(&self, solver: &RegexSolver, term: &Term) -> ApiResult<bool> {
        solver.subset(&[self.clone(), term.clone()]).await
    }

    fn with_operands(&self, terms: &[Term]) -> Vec<Term> {
        let mut operands = Vec::with_capacity(terms.len() + 1);
        operands.push(self.clone());
        operands.extend_from_slice(terms);
        operands
    }

    /// Textual encoding: `regex=<pattern>` or `fair=<representation>`
    pub fn serialize(&self) -> String {
        match &self.value {
            TermValue::Regex(pattern) => format!("{}{}", REGEX_PREFIX, pattern),
            TermValue::Fair(fair) => format!("{}{}", FAIR_PREFIX, fair),
        }
    }

    /// Parse the output of [`Term::serialize`].
    ///
    /// Only the prefix is checked; everything after the first `=` is the payload.
    /// Returns `None` if no known prefix is present.
    pub fn deserialize(serialized: &str) -> Option<Term> {
        if let Some(pattern) = serialized.strip_prefix(REGEX_PREFIX) {
            Some(Term::regex(pattern))
        } else {
            serialized.strip_prefix(FAIR_PREFIX).map(Term::fair)
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
