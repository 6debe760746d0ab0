//! Wire types for a tabular-UI data request.
//!
//! Mirrors what DataTables-style clients post for server-side processing:
//!
//! ```json
//! {
//!   "draw": "3",
//!   "start": "20",
//!   "length": "10",
//!   "search": { "value": "ann", "regex": "false" },
//!   "columns": [
//!     { "data": "name", "searchable": "true", "orderable": "true", "search": { "value": "" } },
//!     { "data": "author.name", "searchable": "true", "orderable": "true", "search": { "value": "" } }
//!   ],
//!   "order": [{ "column": "1", "dir": "desc" }],
//!   "_": "1700000000000"
//! }
//! ```

mod de;

pub use de::Param;

use serde::{Deserialize, Serialize};

/// A search box value, global or per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchTerm {
    #[serde(default, deserialize_with = "de::text")]
    pub value: String,
    /// Carried for completeness; terms always match literally.
    #[serde(default, deserialize_with = "de::flag")]
    pub regex: bool,
}

impl SearchTerm {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: false,
        }
    }

    /// The term, or `None` when the box is empty.
    pub fn term(&self) -> Option<&str> {
        (!self.value.is_empty()).then_some(self.value.as_str())
    }
}

/// One column of the table as the client describes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field name; dotted for a joined entity (`"author.name"`).
    #[serde(default, deserialize_with = "de::text")]
    pub data: String,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::flag")]
    pub searchable: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub orderable: bool,
    #[serde(default)]
    pub search: SearchTerm,
}

impl ColumnDescriptor {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            searchable: true,
            orderable: true,
            ..Default::default()
        }
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = SearchTerm::new(value);
        self
    }

    /// The per-column term, when this column takes part in per-column search.
    pub fn column_search(&self) -> Option<&str> {
        if self.searchable && !self.data.is_empty() {
            self.search.term()
        } else {
            None
        }
    }
}

/// A requested sort: column index into `columns`, and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub column: Param,
    #[serde(default, deserialize_with = "de::text")]
    pub dir: String,
}

impl OrderEntry {
    pub fn new(column: usize, dir: impl Into<String>) -> Self {
        Self {
            column: Param::Int(column as i64),
            dir: dir.into(),
        }
    }
}

/// The whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw: Option<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchTerm>,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    /// Only the first entry is honored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<OrderEntry>>,
    /// Opaque passthrough echoed into the response.
    #[serde(rename = "_", default, skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<serde_json::Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn global_search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(SearchTerm::new(value));
        self
    }

    pub fn order_by(mut self, entry: OrderEntry) -> Self {
        self.order.get_or_insert_with(Vec::new).push(entry);
        self
    }

    pub fn page(mut self, start: impl Into<Param>, length: impl Into<Param>) -> Self {
        self.start = Some(start.into());
        self.length = Some(length.into());
        self
    }

    /// The global search term, or `None` when the box is empty.
    pub fn global_term(&self) -> Option<&str> {
        self.search.as_ref().and_then(SearchTerm::term)
    }

    /// Columns carrying an active per-column term, in declaration order.
    pub fn column_searches(&self) -> impl Iterator<Item = (&ColumnDescriptor, &str)> {
        self.columns
            .iter()
            .filter_map(|c| c.column_search().map(|term| (c, term)))
    }

    pub fn has_column_search(&self) -> bool {
        self.column_searches().next().is_some()
    }

    /// `draw` as an integer, `None` when absent or non-numeric.
    pub fn draw_number(&self) -> Option<i64> {
        self.draw.as_ref().and_then(Param::as_i64)
    }
}
