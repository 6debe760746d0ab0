//! Query specification produced by the translator.
//!
//! - [`filter`] - filter tree (`Filter`), per-field conditions, search fragments
//! - [`params`] - includes, order, pagination and the folded `QueryParams`

pub mod filter;
pub mod params;

pub use filter::{Condition, FieldConditions, FieldRef, Filter, Fragment, MatchOp, Value};
pub use params::{Hop, Include, Leaf, OrderSpec, Pagination, QueryParams, SortDir};
