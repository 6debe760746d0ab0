//! # gridquery
//!
//! Translates server-side data table requests into query specifications.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │       RequestConfig (draw, start/length, search,         │
//! │       columns, order)  +  base QueryParams               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [translation]
//! ┌─────────────────────────────────────────────────────────┐
//! │  walker → leaves        search → Filter                  │
//! │  order  → OrderSpec     paginate → Pagination            │
//! │         (SchemaInspector::describe per leaf)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [fold by value]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 QueryParams (finalized)                  │
//! └─────────────────────────────────────────────────────────┘
//!                 │                           │
//!                 ▼ [DataStore]               ▼ [sql::render]
//! ┌───────────────────────────────┐ ┌───────────────────────┐
//! │ count ∥ find_and_count_all    │ │ WHERE / ORDER BY /    │
//! │   → DataTableResponse         │ │ LIMIT per dialect     │
//! └───────────────────────────────┘ └───────────────────────┘
//! ```

pub mod config;
pub mod metadata;
pub mod query;
pub mod request;
pub mod sql;
pub mod translation;

pub use sql::dialect;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::metadata::{
        ColumnInfo, ColumnType, ColumnTypes, DataStore, EntityRef, FindAndCount, SchemaInspector,
        StoreError, StoreResult,
    };
    pub use crate::query::{
        Condition, FieldRef, Filter, Fragment, Hop, Include, Leaf, MatchOp, OrderSpec,
        Pagination, QueryParams, SortDir, Value,
    };
    pub use crate::request::{ColumnDescriptor, OrderEntry, Param, RequestConfig, SearchTerm};
    pub use crate::sql::{Dialect, SqlDialect};
    pub use crate::translation::{
        translate, DataTable, DataTableResponse, TranslateError, TranslateOptions,
        TranslateResult,
    };
}

// Also export at crate root for convenience
pub use sql::Dialect;
pub use translation::{translate, DataTable, DataTableResponse, TranslateError, TranslateOptions};
