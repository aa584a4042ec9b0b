//! Transaction control.

use rowmap_core::{Connection, Error, Result, TransactionError, TransactionErrorKind};

/// A thin state wrapper around the connection's autocommit flag.
///
/// The lifecycle is begin → (commit | rollback); both outcomes leave the
/// connection's autocommit mode reset to true. A transaction has no state
/// of its own beyond the connection borrow — calling commit or rollback
/// without a prior begin is not distinguished from a no-op at this layer
/// and is left to the underlying connection's own signaling.
#[derive(Debug)]
pub struct Transaction<'c, C: Connection> {
    conn: &'c mut C,
}

impl<'c, C: Connection> Transaction<'c, C> {
    pub(crate) fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }

    /// Begin the transaction by disabling autocommit.
    pub fn begin(&mut self) -> Result<()> {
        tracing::debug!("beginning transaction");
        self.conn
            .set_autocommit(false)
            .map_err(|e| tx_error(TransactionErrorKind::Begin, e))
    }

    /// Commit the transaction and restore autocommit.
    pub fn commit(&mut self) -> Result<()> {
        tracing::debug!("committing transaction");
        self.conn
            .commit()
            .and_then(|()| self.conn.set_autocommit(true))
            .map_err(|e| tx_error(TransactionErrorKind::Commit, e))
    }

    /// Roll back the transaction and restore autocommit.
    pub fn rollback(&mut self) -> Result<()> {
        tracing::debug!("rolling back transaction");
        self.conn
            .rollback()
            .and_then(|()| self.conn.set_autocommit(true))
            .map_err(|e| tx_error(TransactionErrorKind::Rollback, e))
    }
}

fn tx_error(kind: TransactionErrorKind, err: Error) -> Error {
    tracing::error!(operation = kind.as_str(), error = %err, "transaction control failed");
    Error::Transaction(TransactionError {
        kind,
        source: Some(Box::new(err)),
    })
}
