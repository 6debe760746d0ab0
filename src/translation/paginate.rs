//! Pagination resolver.

use crate::query::Pagination;
use crate::request::RequestConfig;

/// `offset = start`, `limit = length`, when both are non-negative integers.
pub fn paginate(request: &RequestConfig) -> Option<Pagination> {
    Some(Pagination {
        offset: request.start.as_ref()?.as_u64()?,
        limit: request.length.as_ref()?.as_u64()?,
    })
}
