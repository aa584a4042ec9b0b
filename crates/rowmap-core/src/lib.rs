//! Core types and traits for rowmap.
//!
//! This crate provides the foundational abstractions for the mapping layer:
//!
//! - `Entity` trait and `ColumnDef` for static, per-type column tables
//! - `EntityMeta` resolver producing table/column/identity metadata
//! - `Connection`/`Connector` traits for the synchronous driver seam
//! - `Value` and `Row` for parameter binding and result marshaling
//! - the `Error` taxonomy shared by every layer above

pub mod connection;
pub mod entity;
pub mod error;
pub mod identifiers;
pub mod row;
pub mod types;
pub mod value;

pub use connection::{Connection, ConnectionConfig, Connector};
pub use entity::{ColumnDef, Entity, EntityConfig, EntityMeta};
pub use error::{
    ConnectionError, Error, MappingError, MappingErrorKind, NoGeneratedKeyError, NotFoundError,
    PersistenceError, PersistenceErrorKind, Result, TransactionError, TransactionErrorKind,
    TypeError, UnsupportedOperationError,
};
pub use identifiers::quote_ident;
pub use row::{ColumnInfo, FromValue, Row};
pub use types::{SqlType, TypeInfo};
pub use value::Value;
