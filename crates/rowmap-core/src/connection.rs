//! Database connection traits and configuration.
//!
//! This module defines the seam between the mapping layer and the SQL
//! engine:
//!
//! - [`Connection`] - synchronous parameterized-statement execution plus
//!   autocommit/commit/rollback control
//! - [`Connector`] - driver entry point that opens connections from a
//!   [`ConnectionConfig`]
//!
//! All calls block the calling thread until the database round trip
//! completes; timeouts and cancellation belong to the driver, not to this
//! layer.

use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// A database connection capable of executing parameterized statements.
///
/// Every method performs exactly one round trip: the implementation prepares
/// a fresh statement, binds the positional parameters, executes, and
/// releases the statement and any cursor before returning — success or
/// failure. Nothing is cached across calls.
///
/// Methods take `&mut self`; a connection serves one caller at a time, and
/// the session layer relies on the borrow checker to enforce that.
pub trait Connection: Send {
    /// Execute a statement (INSERT, UPDATE, DELETE, DDL) and return the
    /// number of rows affected.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Execute a query and return all result rows.
    ///
    /// The rows carry the result set's own column metadata; callers must
    /// not assume the column order matches any declaration order.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Execute an INSERT and return the server-generated key, if the
    /// database produced one.
    fn insert(&mut self, sql: &str, params: &[Value]) -> Result<Option<i64>>;

    /// Toggle the connection's autocommit mode.
    fn set_autocommit(&mut self, enabled: bool) -> Result<()>;

    /// Commit the current transaction.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the current transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Close the connection, releasing the underlying resources.
    fn close(&mut self) -> Result<()>;
}

/// Driver entry point: opens connections from configuration.
///
/// A connector may be shared across threads to open independent
/// connections; the connections themselves share nothing.
pub trait Connector: Send + Sync {
    /// The connection type produced by this connector.
    type Conn: Connection;

    /// Open a new connection.
    fn open(&self, config: &ConnectionConfig) -> Result<Self::Conn>;
}

/// Configuration for opening database connections.
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    /// Connection string or URL
    pub url: String,
    /// User name for authentication
    pub username: Option<String>,
    /// Password for authentication
    pub password: Option<String>,
    /// Application name for connection identification
    pub application_name: Option<String>,
}

impl ConnectionConfig {
    /// Create a new connection config with the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the user name.
    #[must_use]
    pub fn username(mut self, name: impl Into<String>) -> Self {
        self.username = Some(name.into());
        self
    }

    /// Set the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the application name.
    #[must_use]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }
}
