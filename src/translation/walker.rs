//! Association walker: flattens the include tree into leaves.

use crate::query::{Include, Leaf, QueryParams};

/// Every include of `params`, depth-first: parent before children,
/// siblings in declaration order. Empty when nothing is included.
pub fn leaves(params: &QueryParams) -> Vec<Leaf> {
    let mut out = Vec::new();
    walk(&params.include, "", &mut out);
    out
}

fn walk(includes: &[Include], prefix: &str, out: &mut Vec<Leaf>) {
    for include in includes {
        let segment = include.alias.as_deref().unwrap_or(include.model.name());
        let path = if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}.{segment}")
        };
        out.push(Leaf {
            model: include.model.clone(),
            alias: include.alias.clone(),
            path: path.clone(),
        });
        walk(&include.include, &path, out);
    }
}
