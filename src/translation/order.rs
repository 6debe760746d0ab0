//! Order resolver.

use crate::query::{Hop, Leaf, OrderSpec, SortDir};
use crate::request::RequestConfig;

/// Resolve the first requested sort against the leaves.
///
/// `None` when the request has no order, the column index or direction is
/// unusable, or a dotted path names a segment no leaf is joined under.
pub fn resolve_order(request: &RequestConfig, leaves: &[Leaf]) -> Option<OrderSpec> {
    let entry = request.order.as_deref()?.first()?;
    let column = request.columns.get(entry.column.as_index()?)?;
    let direction = SortDir::parse(&entry.dir)?;

    if column.data.is_empty() {
        return None;
    }

    let Some((path, name)) = column.data.rsplit_once('.') else {
        return Some(OrderSpec::column(column.data.clone(), direction));
    };

    let hops = path
        .split('.')
        .map(|alias| {
            leaves
                .iter()
                .find(|leaf| leaf.segment() == alias)
                .map(|leaf| Hop {
                    model: leaf.model.clone(),
                    alias: alias.to_string(),
                })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(OrderSpec::through(hops, name, direction))
}
