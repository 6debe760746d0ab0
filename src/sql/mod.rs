//! SQL rendering.
//!
//! - [`dialect`] - SQL dialect implementations
//! - [`token`] - Token types for SQL generation
//! - [`render`] - WHERE / ORDER BY / pagination for a finalized query

pub mod dialect;
pub mod render;
pub mod token;

pub use dialect::{Dialect, SqlDialect, UnknownDialect};
pub use render::{render, select_sql, SqlFragments};
pub use token::{Token, TokenStream};
