//! Tokens emitted by the renderer.
//!
//! Identifiers, literals and booleans are the only tokens whose text
//! depends on the dialect.

use super::dialect::{Dialect, SqlDialect};

/// One element of rendered SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    Or,
    In,
    Like,
    ILike,
    Escape,
    IsNull,
    IsNotNull,
    OrderBy,
    Asc,
    Desc,
    Limit,
    Offset,
    Fetch,
    Next,
    Rows,
    Only,

    // === Punctuation ===
    Comma,
    Star,
    LParen,
    RParen,

    // === Operators ===
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Simple identifier (table, column, alias)
    Ident(String),
    /// Identifier qualified by a table or alias: `alias.column`
    QualifiedIdent {
        qualifier: Option<String>,
        name: String,
    },
    /// Signed integer literal
    LitInt(i64),
    /// Unsigned integer literal (pagination)
    LitUInt(u64),
    /// Float literal
    LitFloat(f64),
    /// String literal
    LitString(String),
    /// Boolean literal
    LitBool(bool),
    /// NULL literal
    LitNull,

    /// Function name, rendered upper-case
    FunctionName(String),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// **Never pass user input to this variant.** Only trusted, static
    /// fragments belong here; values go through `LitString` and friends.
    Raw(String),
}

impl Token {
    /// Fixed text for keywords, punctuation and operators.
    fn fixed(&self) -> Option<&'static str> {
        Some(match self {
            Token::Select => "SELECT",
            Token::From => "FROM",
            Token::Where => "WHERE",
            Token::And => "AND",
            Token::Or => "OR",
            Token::In => "IN",
            Token::Like => "LIKE",
            Token::ILike => "ILIKE",
            Token::Escape => "ESCAPE",
            Token::IsNull => "IS NULL",
            Token::IsNotNull => "IS NOT NULL",
            Token::OrderBy => "ORDER BY",
            Token::Asc => "ASC",
            Token::Desc => "DESC",
            Token::Limit => "LIMIT",
            Token::Offset => "OFFSET",
            Token::Fetch => "FETCH",
            Token::Next => "NEXT",
            Token::Rows => "ROWS",
            Token::Only => "ONLY",
            Token::Comma => ",",
            Token::Star => "*",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Eq => "=",
            Token::Ne => "<>",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::Lte => "<=",
            Token::Gte => ">=",
            Token::Space => " ",
            Token::LitNull => "NULL",
            _ => return None,
        })
    }

    /// Append this token's text for `dialect` to `out`.
    fn write_to(&self, out: &mut String, dialect: Dialect) {
        if let Some(text) = self.fixed() {
            out.push_str(text);
            return;
        }
        match self {
            Token::Ident(name) => out.push_str(&dialect.quote_identifier(name)),
            Token::QualifiedIdent { qualifier, name } => {
                if let Some(q) = qualifier {
                    out.push_str(&dialect.quote_identifier(q));
                    out.push('.');
                }
                out.push_str(&dialect.quote_identifier(name));
            }
            Token::LitInt(n) => out.push_str(&n.to_string()),
            Token::LitUInt(n) => out.push_str(&n.to_string()),
            // Non-finite floats never come out of request parsing
            Token::LitFloat(f) if !f.is_finite() => out.push_str("NULL"),
            Token::LitFloat(f) => out.push_str(ryu::Buffer::new().format(*f)),
            Token::LitString(s) => out.push_str(&dialect.quote_string(s)),
            Token::LitBool(b) => out.push_str(dialect.format_bool(*b)),
            Token::FunctionName(name) => out.push_str(&name.to_uppercase()),
            Token::Raw(s) => out.push_str(s),
            _ => {}
        }
    }

    /// Serialize this token to a string for the given dialect.
    pub fn serialize(&self, dialect: Dialect) -> String {
        let mut out = String::new();
        self.write_to(&mut out, dialect);
        out
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, dialect: Dialect) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.write_to(&mut out, dialect);
        }
        out
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
