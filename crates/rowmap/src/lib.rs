//! rowmap — a minimal object-relational mapping layer.
//!
//! rowmap maps record types to relational table rows and generates and
//! executes the corresponding SQL statements — create table, insert,
//! select-by-key, update, delete — through a single connection, inside an
//! optional transaction.
//!
//! The layer splits into three parts:
//!
//! - **metadata** ([`Entity`], [`EntityMeta`]): a static, per-type column
//!   table resolved into table/column/identity metadata;
//! - **statements** ([`rowmap_query`]): pure builders from metadata to SQL
//!   text, and executors that bind parameters and perform the round trip;
//! - **session** ([`Session`], [`Transaction`], [`SessionFactory`]): the
//!   façade that composes resolver → builder → executor and marshals
//!   between entity instances and column values.
//!
//! The SQL engine itself is an external collaborator behind the
//! [`Connection`] trait; rowmap emits plain ANSI-ish DDL/DML with
//! double-quoted column identifiers and positional `?` parameters.
//!
//! # Example
//!
//! ```ignore
//! use rowmap::prelude::*;
//!
//! let factory = SessionFactory::new(connector, ConnectionConfig::new(url));
//! let mut session = factory.open_session()?;
//!
//! session.create_table::<Hero>()?;
//!
//! let mut hero = Hero { id: None, name: "Alice".into() };
//! session.transaction().begin()?;
//! session.save(&mut hero)?;
//! session.transaction().commit()?;
//!
//! let found: Hero = session.find(hero.id)?;
//! session.close()?;
//! ```

pub use rowmap_core::{
    ColumnDef, ColumnInfo, Connection, ConnectionConfig, ConnectionError, Connector, Entity,
    EntityConfig, EntityMeta, Error, FromValue, MappingError, MappingErrorKind,
    NoGeneratedKeyError, NotFoundError, PersistenceError, PersistenceErrorKind, Result, Row,
    SqlType, TransactionError, TransactionErrorKind, TypeError, TypeInfo,
    UnsupportedOperationError, Value, quote_ident,
};
pub use rowmap_query::{
    CreateTableExecutor, CreateTableStatement, DeleteExecutor, DeleteStatement, InsertExecutor,
    InsertStatement, Query, QueryExecutor, QueryKind, SelectExecutor, SelectStatement,
    UpdateExecutor, UpdateStatement,
};
pub use rowmap_session::{Session, SessionConfig, SessionFactory, Transaction};

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use rowmap_core::{
        ColumnDef, Connection, ConnectionConfig, Connector, Entity, EntityConfig, EntityMeta,
        Error, Result, Row, SqlType, TypeInfo, Value,
    };
    pub use rowmap_query::{Query, QueryKind};
    pub use rowmap_session::{Session, SessionConfig, SessionFactory, Transaction};
}
