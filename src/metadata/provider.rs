//! SchemaInspector and DataStore trait definitions.
//!
//! The translator never talks to a database directly. It asks a
//! [`SchemaInspector`] what columns an entity has, and hands the finalized
//! [`QueryParams`] to a [`DataStore`] for counting and fetching.

use std::io;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::types::{ColumnTypes, EntityRef};
use crate::query::{Filter, QueryParams};
use crate::sql::Dialect;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a schema inspector or data store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store has no entity by that name.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The backing database rejected the operation.
    #[error("store error: {0}")]
    Backend(String),

    #[error("failed to read schema: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// Filtered rows together with the filtered row count.
#[derive(Debug, Clone, PartialEq)]
pub struct FindAndCount<R> {
    pub rows: Vec<R>,
    pub count: u64,
}

/// Trait for introspecting entities.
///
/// # Example
///
/// ```ignore
/// use gridquery::metadata::{EntityRef, SchemaInspector};
///
/// async fn example(inspector: &impl SchemaInspector) -> StoreResult<()> {
///     let users = EntityRef::new("users");
///     let columns = inspector.describe(&users).await?;
///     let dialect = inspector.dialect_of(&users);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Column name → column type for an entity. Fetched fresh on every call.
    async fn describe(&self, entity: &EntityRef) -> StoreResult<ColumnTypes>;

    /// Storage dialect the entity lives in.
    fn dialect_of(&self, entity: &EntityRef) -> Dialect;

    /// Describe several entities at once.
    ///
    /// Default implementation fetches in parallel using `try_join_all`;
    /// output order matches input order.
    async fn describe_all(&self, entities: &[EntityRef]) -> StoreResult<Vec<ColumnTypes>> {
        let futures: Vec<_> = entities.iter().map(|e| self.describe(e)).collect();
        futures::future::try_join_all(futures).await
    }
}

/// Trait for counting and fetching rows.
#[async_trait]
pub trait DataStore: SchemaInspector {
    /// Row type returned by fetches; converted to JSON for the response.
    type Row: Serialize + Send;

    /// Number of rows of `entity` matching `filter` (all rows for `None`).
    async fn count(&self, entity: &EntityRef, filter: Option<&Filter>) -> StoreResult<u64>;

    /// Rows matching `query`, plus the number of matching rows ignoring
    /// pagination.
    async fn find_and_count_all(
        &self,
        entity: &EntityRef,
        query: &QueryParams,
    ) -> StoreResult<FindAndCount<Self::Row>>;
}
