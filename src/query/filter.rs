//! Filter tree types.
//!
//! A [`Filter`] is what the store receives as `where`. Search predicates are
//! first produced as [`Fragment`]s (one per leaf or column) and then folded
//! into a single filter by the search assembler.
//!
//! Invariant: no constructor in this module yields an empty `Fields`, `And`
//! or `Or` node. Empty input collapses to `None` instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A column reference, optionally namespaced by the alias of a joined entity.
///
/// Serialized as `"column"` or `"alias.column"`. The alias may itself be a
/// dotted path for nested joins (`"author.publisher.name"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct FieldRef {
    alias: Option<String>,
    column: String,
}

impl FieldRef {
    /// A column of the root entity.
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            column: name.into(),
        }
    }

    /// A column of a joined entity included under `alias`.
    pub fn qualified(alias: impl Into<String>, column: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            alias: (!alias.is_empty()).then_some(alias),
            column: column.into(),
        }
    }

    /// Parse a dotted path; everything before the last `.` is the alias.
    pub fn parse(path: &str) -> Self {
        match path.rsplit_once('.') {
            Some((alias, column)) => Self::qualified(alias, column),
            None => Self::column(path),
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.column
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}.{}", alias, self.column),
            None => f.write_str(&self.column),
        }
    }
}

impl From<String> for FieldRef {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<FieldRef> for String {
    fn from(field: FieldRef) -> Self {
        field.to_string()
    }
}

/// A literal compared against a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Operator used for substring matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOp {
    /// Plain `LIKE`; case handling is whatever the engine's collation does.
    Like,
    /// `ILIKE`.
    ILike,
    /// `LOWER(col) LIKE LOWER(pattern)` for engines without ILIKE.
    LowerLike,
}

/// Comparison applied to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The column contains `value` as a literal substring.
    Contains { value: String, op: MatchOp },
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    /// `true` renders `IS NULL`, `false` renders `IS NOT NULL`.
    IsNull(bool),
}

impl Condition {
    pub fn contains(value: impl Into<String>, op: MatchOp) -> Self {
        Condition::Contains {
            value: value.into(),
            op,
        }
    }
}

/// Field → condition map. Sorted so identical input renders identically.
pub type FieldConditions = BTreeMap<FieldRef, Condition>;

/// A filter tree.
///
/// `Fields` is a plain object: every listed field must match. `And`/`Or`
/// combine child filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Fields(FieldConditions),
}

impl Filter {
    /// A single-field filter.
    pub fn field(field: FieldRef, condition: Condition) -> Self {
        Filter::Fields(BTreeMap::from([(field, condition)]))
    }

    /// Plain object from a map, `None` if it has no entries.
    pub fn fields(conditions: FieldConditions) -> Option<Self> {
        (!conditions.is_empty()).then_some(Filter::Fields(conditions))
    }

    /// AND of the non-empty members, `None` if nothing is left.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Option<Self> {
        let members: Vec<Filter> = filters.into_iter().filter(|f| !f.is_empty()).collect();
        (!members.is_empty()).then_some(Filter::And(members))
    }

    /// Whether this filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::And(members) | Filter::Or(members) => members.iter().all(Filter::is_empty),
            Filter::Fields(conditions) => conditions.is_empty(),
        }
    }
}

/// A partial search filter contributed by one leaf or one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Single-entity conditions; merged with other plain fragments.
    Fields(FieldConditions),
    /// Logical OR across the listed condition objects.
    AnyOf(Vec<FieldConditions>),
}
