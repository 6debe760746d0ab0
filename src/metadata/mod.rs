//! Schema inspector and data store contracts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         DataStore                               │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  SchemaInspector (async)   │  Rows (async)                │  │
//! │  │  - describe()              │  - count()                   │  │
//! │  │  - describe_all()          │  - find_and_count_all()      │  │
//! │  │  - dialect_of() (sync)     │                              │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column types arrive as raw strings and are classified into
//! [`ColumnType`] once, when the [`ColumnInfo`] is built.

mod provider;
mod static_schema;
mod types;

pub use provider::{DataStore, FindAndCount, SchemaInspector, StoreError, StoreResult};
pub use static_schema::StaticSchema;
pub use types::*;
