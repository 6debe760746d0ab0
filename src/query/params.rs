//! Query parameters: includes, order, pagination.
//!
//! [`QueryParams`] plays both roles of the request pipeline: the caller's
//! base parameters going in, and the finalized query coming out. Each
//! translation step hands back a delta which is folded in by value
//! (`with_search`, `with_order`, `with_pagination`), so no step sees a
//! half-mutated object.

use serde::{Deserialize, Serialize};

use super::filter::Filter;
use crate::metadata::EntityRef;

/// A joined entity, possibly carrying nested includes of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    pub model: EntityRef,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<Include>,
}

impl Include {
    pub fn new(model: impl Into<EntityRef>) -> Self {
        Self {
            model: model.into(),
            alias: None,
            include: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn include(mut self, child: Include) -> Self {
        self.include.push(child);
        self
    }
}

/// A joined entity discovered by walking the include tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    pub model: EntityRef,
    pub alias: Option<String>,
    /// Segments from the root down to this leaf, dot-joined.
    pub path: String,
}

impl Leaf {
    /// A top-level leaf, or the root entity itself when `alias` is `None`.
    pub fn new(model: EntityRef, alias: Option<String>) -> Self {
        let path = alias.clone().unwrap_or_default();
        Self { model, alias, path }
    }

    /// The label conditions for this leaf are namespaced with; empty for none.
    pub fn label(&self) -> &str {
        &self.path
    }

    /// Name the include is joined under: its alias, or the model name when
    /// it has none.
    pub fn segment(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.model.name())
    }
}

/// One join hop on the way to a nested sort column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub model: EntityRef,
    #[serde(rename = "as")]
    pub alias: String,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Parse `asc`/`desc` in any case.
    pub fn parse(dir: &str) -> Option<Self> {
        match dir.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(SortDir::Asc),
            "DESC" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// A resolved sort: join hops (empty for a root column), column, direction.
///
/// Serialized as the flat sequence `[hop..., column, direction]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<OrderItem>", try_from = "Vec<OrderItem>")]
pub struct OrderSpec {
    pub path: Vec<Hop>,
    pub column: String,
    pub direction: SortDir,
}

impl OrderSpec {
    pub fn column(column: impl Into<String>, direction: SortDir) -> Self {
        Self {
            path: Vec::new(),
            column: column.into(),
            direction,
        }
    }

    pub fn through(path: Vec<Hop>, column: impl Into<String>, direction: SortDir) -> Self {
        Self {
            path,
            column: column.into(),
            direction,
        }
    }
}

/// One element of the serialized order sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderItem {
    Hop(Hop),
    Text(String),
}

impl From<OrderSpec> for Vec<OrderItem> {
    fn from(spec: OrderSpec) -> Self {
        let mut items: Vec<OrderItem> = spec.path.into_iter().map(OrderItem::Hop).collect();
        items.push(OrderItem::Text(spec.column));
        items.push(OrderItem::Text(spec.direction.as_str().to_string()));
        items
    }
}

impl TryFrom<Vec<OrderItem>> for OrderSpec {
    type Error = String;

    fn try_from(mut items: Vec<OrderItem>) -> Result<Self, Self::Error> {
        let direction = match items.pop() {
            Some(OrderItem::Text(dir)) => {
                SortDir::parse(&dir).ok_or_else(|| format!("invalid sort direction: {dir}"))?
            }
            _ => return Err("order entry must end with a direction".into()),
        };
        let column = match items.pop() {
            Some(OrderItem::Text(column)) => column,
            _ => return Err("order entry must name a column before its direction".into()),
        };
        let path = items
            .into_iter()
            .map(|item| match item {
                OrderItem::Hop(hop) => Ok(hop),
                OrderItem::Text(text) => Err(format!("unexpected order segment: {text}")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            path,
            column,
            direction,
        })
    }
}

/// Resolved pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

/// Query parameters handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use = "query params are values; fold results back into a binding"]
pub struct QueryParams {
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<Include>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<OrderSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Columns to select; empty selects everything.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn include(mut self, include: Include) -> Self {
        self.include.push(include);
        self
    }

    /// Fold a search filter in, keeping any existing filter alongside it.
    pub fn with_search(mut self, search: Option<Filter>) -> Self {
        let Some(search) = search.filter(|s| !s.is_empty()) else {
            return self;
        };
        self.filter = match self.filter.take() {
            Some(base) if !base.is_empty() => Some(Filter::And(vec![base, search])),
            _ => Some(search),
        };
        self
    }

    /// Replace the order with a single resolved sort, if there is one.
    pub fn with_order(mut self, order: Option<OrderSpec>) -> Self {
        if let Some(order) = order {
            self.order = vec![order];
        }
        self
    }

    pub fn with_pagination(mut self, page: Option<Pagination>) -> Self {
        if let Some(page) = page {
            self.offset = Some(page.offset);
            self.limit = Some(page.limit);
        }
        self
    }
}
