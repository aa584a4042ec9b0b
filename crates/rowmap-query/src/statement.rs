//! The query value type.

/// The kind of SQL statement a [`Query`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    CreateTable,
    Insert,
    Select,
    Update,
    Delete,
}

impl QueryKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            QueryKind::CreateTable => "CREATE TABLE",
            QueryKind::Insert => "INSERT",
            QueryKind::Select => "SELECT",
            QueryKind::Update => "UPDATE",
            QueryKind::Delete => "DELETE",
        }
    }
}

/// An immutable SQL statement tagged by kind.
///
/// A query is built once per operation invocation and never cached or
/// reused across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    kind: QueryKind,
    sql: String,
}

impl Query {
    /// Create a new query.
    pub fn new(kind: QueryKind, sql: impl Into<String>) -> Self {
        Self {
            kind,
            sql: sql.into(),
        }
    }

    /// The statement kind.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        self.kind
    }

    /// The generated SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}
