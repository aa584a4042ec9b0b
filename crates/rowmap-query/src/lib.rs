//! Statement builders and executors for rowmap.
//!
//! The builder half turns resolved entity metadata into [`Query`] values —
//! pure SQL synthesis, one statement kind per builder. The executor half
//! binds parameters and performs the database round trip, one executor per
//! statement kind, with the result marshaled into a typed output.

pub mod builder;
pub mod executor;
pub mod statement;

pub use builder::{
    CreateTableStatement, DeleteStatement, InsertStatement, SelectStatement, UpdateStatement,
};
pub use executor::{
    CreateTableExecutor, DeleteExecutor, InsertExecutor, QueryExecutor, SelectExecutor,
    UpdateExecutor,
};
pub use statement::{Query, QueryKind};
