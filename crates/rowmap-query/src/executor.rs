//! Statement executors.
//!
//! One executor per statement kind, each borrowing the connection for the
//! duration of one call. An executor performs exactly one round trip;
//! statement and cursor resources live inside the [`Connection`] call and
//! are released on return whether it succeeds or fails.
//!
//! Driving an executor through a call shape it does not support — asking an
//! UPDATE for a result, running a SELECT for effect, or handing it a query
//! of the wrong kind — is a usage error reported as
//! [`UnsupportedOperationError`](rowmap_core::UnsupportedOperationError),
//! never a data error.

use rowmap_core::{Connection, Error, NoGeneratedKeyError, Result, Row, Value};

use crate::statement::{Query, QueryKind};

/// Common execution surface shared by all statement executors.
pub trait QueryExecutor {
    /// Typed result of a result-returning execution.
    type Output;

    /// Execute the statement for effect.
    fn execute(&mut self, query: &Query, params: &[Value]) -> Result<()>;

    /// Execute the statement and marshal its result.
    fn execute_with_result(&mut self, query: &Query, params: &[Value]) -> Result<Self::Output>;
}

fn check_kind(executor: &'static str, query: &Query, expected: QueryKind) -> Result<()> {
    if query.kind() == expected {
        Ok(())
    } else {
        Err(Error::unsupported(
            executor,
            format!("cannot execute a {} statement", query.kind().as_str()),
        ))
    }
}

/// Executor for INSERT statements.
#[derive(Debug)]
pub struct InsertExecutor<'c, C: Connection> {
    conn: &'c mut C,
}

impl<'c, C: Connection> InsertExecutor<'c, C> {
    pub fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }
}

impl<C: Connection> QueryExecutor for InsertExecutor<'_, C> {
    /// The server-generated key, read back as a 64-bit integer.
    type Output = i64;

    fn execute(&mut self, query: &Query, params: &[Value]) -> Result<()> {
        check_kind("InsertExecutor", query, QueryKind::Insert)?;
        self.conn.insert(query.sql(), params).map(|_| ())
    }

    fn execute_with_result(&mut self, query: &Query, params: &[Value]) -> Result<i64> {
        check_kind("InsertExecutor", query, QueryKind::Insert)?;
        self.conn
            .insert(query.sql(), params)?
            .ok_or_else(|| Error::NoGeneratedKey(NoGeneratedKeyError {
                sql: query.sql().to_string(),
            }))
    }
}

/// Executor for SELECT statements.
///
/// Materializes every result row; the column count and order come from the
/// result set's own shape, not from entity metadata.
#[derive(Debug)]
pub struct SelectExecutor<'c, C: Connection> {
    conn: &'c mut C,
}

impl<'c, C: Connection> SelectExecutor<'c, C> {
    pub fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }
}

impl<C: Connection> QueryExecutor for SelectExecutor<'_, C> {
    /// All matching rows; empty when nothing matches.
    type Output = Vec<Row>;

    fn execute(&mut self, _query: &Query, _params: &[Value]) -> Result<()> {
        Err(Error::unsupported(
            "SelectExecutor",
            "does not support execution without result return",
        ))
    }

    fn execute_with_result(&mut self, query: &Query, params: &[Value]) -> Result<Vec<Row>> {
        check_kind("SelectExecutor", query, QueryKind::Select)?;
        self.conn.query(query.sql(), params)
    }
}

/// Executor for UPDATE statements.
#[derive(Debug)]
pub struct UpdateExecutor<'c, C: Connection> {
    conn: &'c mut C,
}

impl<'c, C: Connection> UpdateExecutor<'c, C> {
    pub fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }

    /// Execute and report the affected-row count.
    ///
    /// The session layer uses the count for its optional strict
    /// affected-row check.
    pub fn execute_counting(&mut self, query: &Query, params: &[Value]) -> Result<u64> {
        check_kind("UpdateExecutor", query, QueryKind::Update)?;
        self.conn.execute(query.sql(), params)
    }
}

impl<C: Connection> QueryExecutor for UpdateExecutor<'_, C> {
    type Output = ();

    fn execute(&mut self, query: &Query, params: &[Value]) -> Result<()> {
        self.execute_counting(query, params).map(|_| ())
    }

    fn execute_with_result(&mut self, _query: &Query, _params: &[Value]) -> Result<()> {
        Err(Error::unsupported(
            "UpdateExecutor",
            "does not support execution with result return",
        ))
    }
}

/// Executor for DELETE statements.
#[derive(Debug)]
pub struct DeleteExecutor<'c, C: Connection> {
    conn: &'c mut C,
}

impl<'c, C: Connection> DeleteExecutor<'c, C> {
    pub fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }

    /// Execute and report the affected-row count.
    pub fn execute_counting(&mut self, query: &Query, params: &[Value]) -> Result<u64> {
        check_kind("DeleteExecutor", query, QueryKind::Delete)?;
        self.conn.execute(query.sql(), params)
    }
}

impl<C: Connection> QueryExecutor for DeleteExecutor<'_, C> {
    type Output = ();

    fn execute(&mut self, query: &Query, params: &[Value]) -> Result<()> {
        self.execute_counting(query, params).map(|_| ())
    }

    fn execute_with_result(&mut self, _query: &Query, _params: &[Value]) -> Result<()> {
        Err(Error::unsupported(
            "DeleteExecutor",
            "does not support execution with result return",
        ))
    }
}

/// Executor for CREATE TABLE statements.
///
/// Runs the DDL text verbatim; parameters are ignored.
#[derive(Debug)]
pub struct CreateTableExecutor<'c, C: Connection> {
    conn: &'c mut C,
}

impl<'c, C: Connection> CreateTableExecutor<'c, C> {
    pub fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }
}

impl<C: Connection> QueryExecutor for CreateTableExecutor<'_, C> {
    type Output = ();

    fn execute(&mut self, query: &Query, _params: &[Value]) -> Result<()> {
        check_kind("CreateTableExecutor", query, QueryKind::CreateTable)?;
        self.conn.execute(query.sql(), &[]).map(|_| ())
    }

    fn execute_with_result(&mut self, _query: &Query, _params: &[Value]) -> Result<()> {
        Err(Error::unsupported(
            "CreateTableExecutor",
            "does not support execution with result return",
        ))
    }
}
