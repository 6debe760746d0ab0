//! Request-to-query translation.
//!
//! ```text
//! RequestConfig + QueryParams
//!        │
//!        ├── walker::leaves        include tree → [Leaf]
//!        ├── search::assemble      → Option<Filter>     (describe per leaf, concurrent)
//!        ├── order::resolve_order  → Option<OrderSpec>
//!        └── paginate::paginate    → Option<Pagination>
//!        │
//!        ▼  folded by value
//! QueryParams ──► count ∥ find_and_count_all ──► DataTableResponse
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gridquery::prelude::*;
//!
//! let response = DataTable::new(&store)
//!     .entity("users")
//!     .request(request)
//!     .params(QueryParams::new().include(Include::new("authors").alias("author")))
//!     .run()
//!     .await?;
//! ```

pub mod error;
pub mod order;
pub mod paginate;
pub mod predicate;
pub mod response;
pub mod search;
pub mod walker;

pub use error::{TranslateError, TranslateResult};
pub use response::DataTableResponse;
pub use search::SearchMode;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metadata::{DataStore, EntityRef, SchemaInspector};
use crate::query::QueryParams;
use crate::request::RequestConfig;
use crate::sql::Dialect;

const MISSING_INPUT: &str = "entity and request config should be provided";

/// Runtime options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateOptions {
    /// Dialect used for every entity, instead of asking the inspector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

/// Builder for one data table request.
pub struct DataTable<'a, S: ?Sized> {
    store: &'a S,
    entity: Option<EntityRef>,
    request: Option<RequestConfig>,
    params: QueryParams,
    options: TranslateOptions,
}

impl<'a, S: ?Sized> DataTable<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            entity: None,
            request: None,
            params: QueryParams::default(),
            options: TranslateOptions::default(),
        }
    }

    pub fn entity(mut self, entity: impl Into<EntityRef>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn request(mut self, request: RequestConfig) -> Self {
        self.request = Some(request);
        self
    }

    /// Base query parameters; their `where` is kept alongside the search.
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    fn inputs(&self) -> TranslateResult<(&EntityRef, &RequestConfig)> {
        match (&self.entity, &self.request) {
            (Some(entity), Some(request)) => Ok((entity, request)),
            _ => Err(TranslateError::InvalidInvocation(MISSING_INPUT)),
        }
    }
}

impl<S: SchemaInspector + ?Sized> DataTable<'_, S> {
    /// The finalized query, without touching rows.
    pub async fn plan(&self) -> TranslateResult<QueryParams> {
        let (entity, request) = self.inputs()?;
        plan(self.store, entity, request, self.params.clone(), &self.options).await
    }
}

impl<S: DataStore + ?Sized> DataTable<'_, S> {
    /// Plan, query the store and build the response envelope.
    pub async fn run(self) -> TranslateResult<DataTableResponse> {
        let (entity, request) = self.inputs()?;
        let query = plan(self.store, entity, request, self.params.clone(), &self.options).await?;
        respond(self.store, entity, request, &query).await
    }
}

/// Translate `request` against `entity` and answer it from `store`.
///
/// Fails with [`TranslateError::InvalidInvocation`] when `entity` or
/// `request` is missing; `params` defaults to empty.
pub async fn translate<S>(
    store: &S,
    entity: Option<&EntityRef>,
    request: Option<&RequestConfig>,
    params: Option<QueryParams>,
    options: TranslateOptions,
) -> TranslateResult<DataTableResponse>
where
    S: DataStore + ?Sized,
{
    let (Some(entity), Some(request)) = (entity, request) else {
        return Err(TranslateError::InvalidInvocation(MISSING_INPUT));
    };
    let query = plan(store, entity, request, params.unwrap_or_default(), &options).await?;
    respond(store, entity, request, &query).await
}

/// Fold search, order and pagination into `params`.
pub async fn plan<I>(
    inspector: &I,
    entity: &EntityRef,
    request: &RequestConfig,
    params: QueryParams,
    options: &TranslateOptions,
) -> TranslateResult<QueryParams>
where
    I: SchemaInspector + ?Sized,
{
    let leaves = walker::leaves(&params);
    debug!(entity = %entity, leaves = leaves.len(), "Planning data table query");

    let search = search::assemble(inspector, entity, request, &leaves, options.dialect).await?;
    debug!(applied = search.is_some(), "Search resolved");

    let order = order::resolve_order(request, &leaves);
    if request.order.is_some() && order.is_none() {
        debug!("Requested order could not be resolved; sort dropped");
    }

    let page = paginate::paginate(request);
    if let Some(page) = &page {
        debug!(offset = page.offset, limit = page.limit, "Pagination applied");
    }

    Ok(params
        .with_search(search)
        .with_order(order)
        .with_pagination(page))
}

async fn respond<S>(
    store: &S,
    entity: &EntityRef,
    request: &RequestConfig,
    query: &QueryParams,
) -> TranslateResult<DataTableResponse>
where
    S: DataStore + ?Sized,
{
    let (total, found) = futures::try_join!(
        store.count(entity, None),
        store.find_and_count_all(entity, query)
    )?;
    debug!(
        entity = %entity,
        records_total = total,
        records_filtered = found.count,
        rows = found.rows.len(),
        "Data table query complete"
    );

    let data = found
        .rows
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(TranslateError::Row)?;

    Ok(DataTableResponse {
        draw: request.draw_number(),
        data,
        records_filtered: found.count,
        records_total: total,
        passthrough: request.passthrough.clone(),
    })
}
