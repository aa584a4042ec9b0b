//! Error types for rowmap operations.

use std::fmt;

use crate::value::Value;

/// The primary error type for all rowmap operations.
#[derive(Debug)]
pub enum Error {
    /// Bad or missing entity metadata (not an entity, no identity column,
    /// unsupported field type)
    Mapping(MappingError),
    /// A save/find/update/delete/create-table operation failed below the
    /// session boundary
    Persistence(PersistenceError),
    /// A find matched zero rows
    NotFound(NotFoundError),
    /// An insert was expected to produce a generated key but did not
    NoGeneratedKey(NoGeneratedKeyError),
    /// An executor was driven through a call shape it does not support;
    /// a usage error, not a data error
    UnsupportedOperation(UnsupportedOperationError),
    /// Transaction begin/commit/rollback failure
    Transaction(TransactionError),
    /// Raw driver/connection failure
    Connection(ConnectionError),
    /// Row-to-field type conversion failure
    Type(TypeError),
}

#[derive(Debug)]
pub struct MappingError {
    pub kind: MappingErrorKind,
    /// Type name of the offending entity
    pub entity: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingErrorKind {
    /// The type is not marked as a persistable entity
    NotAnEntity,
    /// No column is marked as the identity column
    NoIdentityColumn,
    /// More than one column is marked as the identity column
    MultipleIdentityColumns,
    /// A declared column type has no SQL type mapping
    UnsupportedType,
}

#[derive(Debug)]
pub struct PersistenceError {
    pub kind: PersistenceErrorKind,
    /// Type name of the entity the operation ran against
    pub entity: &'static str,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
    Save,
    Find,
    Update,
    Delete,
    CreateTable,
    /// An update/delete affected zero rows while the session was configured
    /// to treat that as a failure
    NoRowAffected,
}

impl PersistenceErrorKind {
    /// The operation name used in log events and messages.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            PersistenceErrorKind::Save => "save",
            PersistenceErrorKind::Find => "find",
            PersistenceErrorKind::Update => "update",
            PersistenceErrorKind::Delete => "delete",
            PersistenceErrorKind::CreateTable => "create table",
            PersistenceErrorKind::NoRowAffected => "affected-row check",
        }
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    /// Type name of the entity that was looked up
    pub entity: &'static str,
    /// The primary key value that matched nothing
    pub key: Value,
}

#[derive(Debug)]
pub struct NoGeneratedKeyError {
    /// The insert statement that produced no key
    pub sql: String,
}

#[derive(Debug)]
pub struct UnsupportedOperationError {
    /// The executor that rejected the call
    pub executor: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct TransactionError {
    pub kind: TransactionErrorKind,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionErrorKind {
    Begin,
    Commit,
    Rollback,
}

impl TransactionErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionErrorKind::Begin => "begin",
            TransactionErrorKind::Commit => "commit",
            TransactionErrorKind::Rollback => "rollback",
        }
    }
}

#[derive(Debug)]
pub struct ConnectionError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConnectionError {
    /// Create a connection error from a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

impl Error {
    /// Shorthand for a mapping error on the given entity type.
    pub fn mapping(
        kind: MappingErrorKind,
        entity: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Error::Mapping(MappingError {
            kind,
            entity,
            message: message.into(),
        })
    }

    /// Shorthand for an unsupported-operation usage error.
    pub fn unsupported(executor: &'static str, message: impl Into<String>) -> Self {
        Error::UnsupportedOperation(UnsupportedOperationError {
            executor,
            message: message.into(),
        })
    }

    /// Does this error belong to the mapping/session taxonomy rather than
    /// the driver layer?
    ///
    /// Taxonomy errors propagate out of the session unchanged; everything
    /// else is re-wrapped as a [`PersistenceError`] with operation context.
    #[must_use]
    pub const fn is_taxonomy(&self) -> bool {
        matches!(
            self,
            Error::Mapping(_)
                | Error::Persistence(_)
                | Error::NotFound(_)
                | Error::NoGeneratedKey(_)
                | Error::UnsupportedOperation(_)
                | Error::Transaction(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Mapping(e) => write!(f, "Mapping error for {}: {}", e.entity, e.message),
            Error::Persistence(e) => write!(
                f,
                "Failed to {} entity {}: {}",
                e.kind.operation(),
                e.entity,
                e.message
            ),
            Error::NotFound(e) => write!(f, "Entity {} with key {} not found", e.entity, e.key),
            Error::NoGeneratedKey(e) => {
                write!(f, "Insert produced no generated key (sql: {})", e.sql)
            }
            Error::UnsupportedOperation(e) => {
                write!(f, "{}: {}", e.executor, e.message)
            }
            Error::Transaction(e) => match &e.source {
                Some(source) => write!(f, "Failed to {} transaction: {}", e.kind.as_str(), source),
                None => write!(f, "Failed to {} transaction", e.kind.as_str()),
            },
            Error::Connection(e) => write!(f, "Connection error: {}", e.message),
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Persistence(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Transaction(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Connection(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<MappingError> for Error {
    fn from(err: MappingError) -> Self {
        Error::Mapping(err)
    }
}

impl From<PersistenceError> for Error {
    fn from(err: PersistenceError) -> Self {
        Error::Persistence(err)
    }
}

impl From<NotFoundError> for Error {
    fn from(err: NotFoundError) -> Self {
        Error::NotFound(err)
    }
}

impl From<NoGeneratedKeyError> for Error {
    fn from(err: NoGeneratedKeyError) -> Self {
        Error::NoGeneratedKey(err)
    }
}

impl From<UnsupportedOperationError> for Error {
    fn from(err: UnsupportedOperationError) -> Self {
        Error::UnsupportedOperation(err)
    }
}

impl From<TransactionError> for Error {
    fn from(err: TransactionError) -> Self {
        Error::Transaction(err)
    }
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Self {
        Error::Connection(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

/// Result type alias for rowmap operations.
pub type Result<T> = std::result::Result<T, Error>;
