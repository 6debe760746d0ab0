//! Search assembler: picks a search mode and folds fragments into one filter.

use tracing::{debug, trace};

use super::predicate::build_predicate;
use crate::metadata::{EntityRef, SchemaInspector, StoreResult};
use crate::query::{Condition, FieldConditions, FieldRef, Filter, Fragment, Leaf, MatchOp};
use crate::request::RequestConfig;
use crate::sql::Dialect;

/// Which kind of search a request asks for. Per-column wins over global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode<'a> {
    /// At least one searchable column carries its own term.
    PerColumn,
    /// A global term across every searchable column of every leaf.
    Global(&'a str),
    None,
}

impl<'a> SearchMode<'a> {
    pub fn of(request: &'a RequestConfig) -> Self {
        if request.has_column_search() {
            SearchMode::PerColumn
        } else if let Some(term) = request.global_term() {
            SearchMode::Global(term)
        } else {
            SearchMode::None
        }
    }
}

/// The search filter for `request`, or `None` when it asks for no search.
///
/// Global mode describes every leaf (the root entity when there are none)
/// concurrently; fragments are folded in leaf order.
pub async fn assemble<I>(
    inspector: &I,
    root: &EntityRef,
    request: &RequestConfig,
    leaves: &[Leaf],
    dialect: Option<Dialect>,
) -> StoreResult<Option<Filter>>
where
    I: SchemaInspector + ?Sized,
{
    let fragments = match SearchMode::of(request) {
        SearchMode::None => return Ok(None),
        SearchMode::PerColumn => column_fragments(request),
        SearchMode::Global(term) => {
            let root_leaf;
            let targets = if leaves.is_empty() {
                root_leaf = [Leaf::new(root.clone(), None)];
                &root_leaf[..]
            } else {
                leaves
            };
            let entities: Vec<EntityRef> = targets.iter().map(|l| l.model.clone()).collect();
            let described = inspector.describe_all(&entities).await?;
            debug!(term = %term, leaves = targets.len(), "Global search");

            targets
                .iter()
                .zip(described.iter())
                .filter_map(|(leaf, columns)| {
                    let dialect = dialect.unwrap_or_else(|| inspector.dialect_of(&leaf.model));
                    let fragment = build_predicate(leaf.label(), columns, request, term, dialect);
                    if fragment.is_none() {
                        trace!(leaf = %leaf.model, "No searchable column matches term");
                    }
                    fragment
                })
                .collect()
        }
    };

    Ok(combine(fragments))
}

/// One literal substring match per active column, regardless of its type.
pub fn column_fragments(request: &RequestConfig) -> Vec<Fragment> {
    let fragments: Vec<Fragment> = request
        .column_searches()
        .map(|(column, term)| {
            Fragment::Fields(FieldConditions::from([(
                FieldRef::parse(&column.data),
                Condition::contains(term, MatchOp::Like),
            )]))
        })
        .collect();
    debug!(columns = fragments.len(), "Per-column search");
    fragments
}

/// Fold fragments into `And([or-groups..., merged-fields])`.
///
/// Plain fragments merge into one object, a later field replacing an
/// earlier one. Each OR-group becomes one member; a group of one collapses
/// to its only object. Empty fragments vanish; `None` if nothing is left.
pub fn combine(fragments: impl IntoIterator<Item = Fragment>) -> Option<Filter> {
    let mut merged = FieldConditions::new();
    let mut members = Vec::new();

    for fragment in fragments {
        match fragment {
            Fragment::Fields(conditions) => merged.extend(conditions),
            Fragment::AnyOf(groups) => {
                let mut alternatives: Vec<Filter> =
                    groups.into_iter().filter_map(Filter::fields).collect();
                match alternatives.len() {
                    0 => {}
                    1 => members.extend(alternatives.pop()),
                    _ => members.push(Filter::Or(alternatives)),
                }
            }
        }
    }

    members.extend(Filter::fields(merged));
    Filter::all(members)
}
