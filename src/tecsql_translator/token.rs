//! Token model for the TecSql dialect.
//!
//! Tokens are immutable once produced by the lexer; the resolver builds a new
//! output stream instead of mutating these in place.

/// Reserved words recognized by the lexer. Matching is case-insensitive; the
/// token keeps the text as written so the formatter can reproduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    Join,
    Left,
    Right,
    Full,
    Inner,
    Outer,
    Cross,
    On,
    Order,
    By,
    Group,
    Having,
    As,
    And,
    Or,
    Distinct,
    In,
    Exists,
    Not,
    Null,
    Is,
    Like,
    Between,
}

impl Keyword {
    pub fn from_ident(text: &str) -> Option<Self> {
        let kw = match text.to_ascii_uppercase().as_str() {
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "JOIN" => Keyword::Join,
            "LEFT" => Keyword::Left,
            "RIGHT" => Keyword::Right,
            "FULL" => Keyword::Full,
            "INNER" => Keyword::Inner,
            "OUTER" => Keyword::Outer,
            "CROSS" => Keyword::Cross,
            "ON" => Keyword::On,
            "ORDER" => Keyword::Order,
            "BY" => Keyword::By,
            "GROUP" => Keyword::Group,
            "HAVING" => Keyword::Having,
            "AS" => Keyword::As,
            "AND" => Keyword::And,
            "OR" => Keyword::Or,
            "DISTINCT" => Keyword::Distinct,
            "IN" => Keyword::In,
            "EXISTS" => Keyword::Exists,
            "NOT" => Keyword::Not,
            "NULL" => Keyword::Null,
            "IS" => Keyword::Is,
            "LIKE" => Keyword::Like,
            "BETWEEN" => Keyword::Between,
            _ => return None,
        };
        Some(kw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Quoted string literal, quotes included; `''` inside is an escaped quote.
    String(String),
    /// Host parameter marker: `?`, `?name` or `?!name`.
    Param(String),
    /// Bare `$name` marker. Whether it names a table or a field is decided by
    /// the resolver from clause position, never from spelling.
    LogicalName(String),
    /// `$table.*`
    TableStar { text: String, table: String },
    /// `$table.field`
    LogicalField {
        text: String,
        table: String,
        field: String,
    },
    Keyword { kw: Keyword, text: String },
    Ident(String),
    Number(String),
    Operator(String),
    Symbol(String),
}

impl Token {
    /// Literal text the formatter re-emits for this token.
    pub fn text(&self) -> &str {
        match self {
            Token::String(s)
            | Token::Param(s)
            | Token::LogicalName(s)
            | Token::Ident(s)
            | Token::Number(s)
            | Token::Operator(s)
            | Token::Symbol(s) => s,
            Token::TableStar { text, .. } => text,
            Token::LogicalField { text, .. } => text,
            Token::Keyword { text, .. } => text,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Keyword { kw, .. } => Some(*kw),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.keyword() == Some(kw)
    }

    pub fn is_symbol(&self, sym: &str) -> bool {
        matches!(self, Token::Symbol(s) if s == sym)
    }
}
