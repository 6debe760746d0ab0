//! Render a finalized [`QueryParams`] as dialect SQL.
//!
//! Only the clauses the translator decides are rendered: WHERE, ORDER BY and
//! pagination. Joins for includes are left to the store.
//!
//! ```ignore
//! let fragments = render(&query, Dialect::Postgres);
//! // fragments.where_clause == Some("\"name\" ILIKE '%ann%' ESCAPE '\\'")
//! ```

use super::dialect::helpers::{contains_pattern, LIKE_ESCAPE};
use super::dialect::{Dialect, SqlDialect};
use super::token::{Token, TokenStream};
use crate::metadata::EntityRef;
use crate::query::{Condition, FieldRef, Filter, MatchOp, OrderSpec, QueryParams, SortDir, Value};

/// Rendered clause bodies. `where_clause` and `order_by` omit their keyword;
/// `limit_offset` is the complete pagination clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlFragments {
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub limit_offset: Option<String>,
}

/// Clause bodies as tokens, before serialization.
struct Clauses {
    filter: Option<TokenStream>,
    order: Option<TokenStream>,
    page: Option<TokenStream>,
}

impl Clauses {
    fn of(params: &QueryParams, dialect: Dialect) -> Self {
        let paginated = params.limit.is_some() || params.offset.is_some();

        let filter = params
            .filter
            .as_ref()
            .filter(|f| !f.is_empty())
            .map(|f| filter_tokens(f, dialect));

        let order = if !params.order.is_empty() {
            Some(order_tokens(&params.order))
        } else if paginated && dialect.requires_order_by_for_offset() {
            let mut ts = TokenStream::new();
            ts.lparen()
                .push(Token::Select)
                .space()
                .push(Token::LitNull)
                .rparen();
            Some(ts)
        } else {
            None
        };

        let page = paginated.then(|| dialect.emit_limit_offset(params.limit, params.offset));

        Self {
            filter,
            order,
            page,
        }
    }
}

/// Render every clause `params` carries.
pub fn render(params: &QueryParams, dialect: Dialect) -> SqlFragments {
    let clauses = Clauses::of(params, dialect);
    let text = |ts: Option<TokenStream>| ts.map(|ts| ts.serialize(dialect));

    SqlFragments {
        where_clause: text(clauses.filter),
        order_by: text(clauses.order),
        limit_offset: text(clauses.page),
    }
}

/// `SELECT <attributes|*> FROM <table> [WHERE ..] [ORDER BY ..] [pagination]`.
pub fn select_sql(table: &EntityRef, params: &QueryParams, dialect: Dialect) -> String {
    let clauses = Clauses::of(params, dialect);
    let mut ts = TokenStream::new();

    ts.push(Token::Select).space();
    if params.attributes.is_empty() {
        ts.push(Token::Star);
    } else {
        for (i, attr) in params.attributes.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Ident(attr.clone()));
        }
    }
    ts.space()
        .push(Token::From)
        .space()
        .push(Token::QualifiedIdent {
            qualifier: table.schema().map(str::to_string),
            name: table.name().to_string(),
        });

    if let Some(filter) = &clauses.filter {
        ts.space().push(Token::Where).space().append(filter);
    }
    if let Some(order) = &clauses.order {
        ts.space().push(Token::OrderBy).space().append(order);
    }
    if let Some(page) = &clauses.page {
        ts.space().append(page);
    }
    ts.serialize(dialect)
}

fn filter_tokens(filter: &Filter, dialect: Dialect) -> TokenStream {
    let mut ts = TokenStream::new();
    match filter {
        Filter::And(members) => join_filters(&mut ts, members, Token::And, dialect),
        Filter::Or(members) => join_filters(&mut ts, members, Token::Or, dialect),
        Filter::Fields(conditions) => {
            for (i, (field, condition)) in conditions.iter().enumerate() {
                if i > 0 {
                    ts.space().push(Token::And).space();
                }
                ts.append(&condition_tokens(field, condition, dialect));
            }
        }
    }
    ts
}

fn join_filters(ts: &mut TokenStream, members: &[Filter], op: Token, dialect: Dialect) {
    let members: Vec<&Filter> = members.iter().filter(|m| !m.is_empty()).collect();
    let wrap = members.len() > 1;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            ts.space().push(op.clone()).space();
        }
        let inner = filter_tokens(member, dialect);
        if wrap && is_compound(member) {
            ts.lparen().append(&inner).rparen();
        } else {
            ts.append(&inner);
        }
    }
}

fn is_compound(filter: &Filter) -> bool {
    match filter {
        Filter::And(m) | Filter::Or(m) => {
            // A group of one renders as its member
            let mut live = m.iter().filter(|f| !f.is_empty());
            match (live.next(), live.next()) {
                (Some(only), None) => is_compound(only),
                (Some(_), Some(_)) => true,
                _ => false,
            }
        }
        Filter::Fields(c) => c.len() > 1,
    }
}

fn column(field: &FieldRef) -> Token {
    Token::QualifiedIdent {
        qualifier: field.alias().map(str::to_string),
        name: field.name().to_string(),
    }
}

fn literal(value: &Value) -> Token {
    match value {
        Value::Bool(b) => Token::LitBool(*b),
        Value::Int(n) => Token::LitInt(*n),
        Value::Float(f) => Token::LitFloat(*f),
        Value::Text(s) => Token::LitString(s.clone()),
    }
}

fn condition_tokens(field: &FieldRef, condition: &Condition, dialect: Dialect) -> TokenStream {
    let mut ts = TokenStream::new();
    let compare = |ts: &mut TokenStream, op: Token, value: &Value| {
        ts.push(column(field))
            .space()
            .push(op)
            .space()
            .push(literal(value));
    };

    match condition {
        Condition::Contains { value, op } => {
            ts.append(&contains_tokens(field, value, *op, dialect));
        }
        Condition::Eq(v) => compare(&mut ts, Token::Eq, v),
        Condition::Ne(v) => compare(&mut ts, Token::Ne, v),
        Condition::Gt(v) => compare(&mut ts, Token::Gt, v),
        Condition::Gte(v) => compare(&mut ts, Token::Gte, v),
        Condition::Lt(v) => compare(&mut ts, Token::Lt, v),
        Condition::Lte(v) => compare(&mut ts, Token::Lte, v),
        Condition::In(values) if values.is_empty() => {
            ts.push(Token::Raw("1 = 0".into()));
        }
        Condition::In(values) => {
            ts.push(column(field)).space().push(Token::In).space().lparen();
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.push(literal(v));
            }
            ts.rparen();
        }
        Condition::IsNull(true) => {
            ts.push(column(field)).space().push(Token::IsNull);
        }
        Condition::IsNull(false) => {
            ts.push(column(field)).space().push(Token::IsNotNull);
        }
    }
    ts
}

fn contains_tokens(field: &FieldRef, term: &str, op: MatchOp, dialect: Dialect) -> TokenStream {
    let mut ts = TokenStream::new();
    let pattern = Token::LitString(contains_pattern(term, dialect.like_wildcards()));

    // ILIKE planned for one engine falls back to LOWER() on engines without it
    let op = match op {
        MatchOp::ILike if dialect.case_insensitive_match() != MatchOp::ILike => MatchOp::LowerLike,
        other => other,
    };

    match op {
        MatchOp::Like | MatchOp::ILike => {
            let keyword = if op == MatchOp::ILike {
                Token::ILike
            } else {
                Token::Like
            };
            ts.push(column(field)).space().push(keyword).space().push(pattern);
        }
        MatchOp::LowerLike => {
            ts.push(Token::FunctionName("lower".into()))
                .lparen()
                .push(column(field))
                .rparen()
                .space()
                .push(Token::Like)
                .space()
                .push(Token::FunctionName("lower".into()))
                .lparen()
                .push(pattern)
                .rparen();
        }
    }

    if dialect.like_escape_clause() {
        ts.space()
            .push(Token::Escape)
            .space()
            .push(Token::LitString(LIKE_ESCAPE.to_string()));
    }
    ts
}

fn order_tokens(order: &[OrderSpec]) -> TokenStream {
    let mut ts = TokenStream::new();
    for (i, spec) in order.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        // Same qualifier as a `FieldRef` through the same joins
        let qualifier = (!spec.path.is_empty()).then(|| {
            spec.path
                .iter()
                .map(|hop| hop.alias.as_str())
                .collect::<Vec<_>>()
                .join(".")
        });
        ts.push(Token::QualifiedIdent {
            qualifier,
            name: spec.column.clone(),
        })
        .space()
        .push(match spec.direction {
            SortDir::Asc => Token::Asc,
            SortDir::Desc => Token::Desc,
        });
    }
    ts
}
