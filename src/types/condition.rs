use std::fmt;
use std::ops::Not;
use std::sync::Arc;

use regex::Regex;

use super::error::PatternError;

/// Shared, thread-safe predicate over one request attribute.
pub type PredicateFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A single match predicate over one string attribute of a request.
///
/// Rule conditions in bundler configurations are duck-typed (string, regex,
/// function, or a negation wrapper); here each shape is an explicit variant,
/// evaluated by [`Condition::accepts`].
#[derive(Clone)]
pub enum Condition {
    /// Matches when the attribute equals the string exactly.
    Exact(String),
    /// Matches when the regex finds a match in the attribute.
    Pattern(Regex),
    /// Matches when the caller-supplied function returns `true`.
    Predicate(PredicateFn),
    /// Inverts the inner condition. A missing attribute fails every other
    /// variant, so `Not` succeeds on one.
    Not(Box<Condition>),
}

impl Condition {
    /// Exact string equality condition.
    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Condition::Exact(value.into())
    }

    /// Regex condition compiled from `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is not valid regex syntax.
    pub fn pattern(pattern: &str) -> Result<Self, PatternError> {
        Ok(Condition::Pattern(Regex::new(pattern)?))
    }

    /// Arbitrary predicate condition.
    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Condition::Predicate(Arc::new(f))
    }

    /// Evaluate this condition against an attribute value.
    ///
    /// `None` means the request has no such attribute; every variant except
    /// `Not` rejects it.
    #[must_use]
    pub fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            Condition::Exact(expected) => value == Some(expected.as_str()),
            Condition::Pattern(re) => value.is_some_and(|v| re.is_match(v)),
            Condition::Predicate(f) => value.is_some_and(|v| f(v)),
            Condition::Not(inner) => !inner.accepts(value),
        }
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

impl From<Regex> for Condition {
    fn from(re: Regex) -> Self {
        Condition::Pattern(re)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Exact(s) => f.debug_tuple("Exact").field(s).finish(),
            Condition::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Condition::Predicate(_) => f.write_str("Predicate(..)"),
            Condition::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Condition::Exact(a), Condition::Exact(b)) => a == b,
            (Condition::Pattern(a), Condition::Pattern(b)) => a.as_str() == b.as_str(),
            (Condition::Predicate(a), Condition::Predicate(b)) => Arc::ptr_eq(a, b),
            (Condition::Not(a), Condition::Not(b)) => a == b,
            _ => false,
        }
    }
}

/// Which request attribute a condition clause inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchField {
    /// The resource path.
    Resource,
    /// The resource query string.
    ResourceQuery,
    /// The path of the module that issued the request.
    Issuer,
    /// A key from the enclosing package's description data. Only evaluable
    /// when the extended matcher capability was negotiated.
    DescriptionData(String),
}

/// One `(field, condition)` pair of a rule. A rule accepts a request when
/// every clause accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionClause {
    pub field: MatchField,
    pub condition: Condition,
}

impl ConditionClause {
    #[must_use]
    pub fn new(field: MatchField, condition: Condition) -> Self {
        Self { field, condition }
    }
}
