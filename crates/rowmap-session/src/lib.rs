//! Session layer for rowmap.
//!
//! A [`Session`] is the unit-of-work façade: it owns exactly one connection
//! for its lifetime and exposes the CRUD-by-primary-key operations, each of
//! which resolves metadata, builds the statement, executes it, and marshals
//! between entity instances and column values. Transaction control is a
//! thin wrapper around the connection's autocommit flag, handed out by
//! [`Session::transaction`].
//!
//! Sessions are single-threaded by construction: every operation takes
//! `&mut self`, so the borrow checker enforces the one-caller-at-a-time
//! contract. All I/O is synchronous blocking.
//!
//! # Example
//!
//! ```ignore
//! let factory = SessionFactory::new(connector, ConnectionConfig::new(url));
//! let mut session = factory.open_session()?;
//!
//! session.create_table::<Hero>()?;
//!
//! let mut hero = Hero { id: None, name: "Alice".into() };
//! session.save(&mut hero)?;                    // id written back
//! let found: Hero = session.find(hero.id)?;
//!
//! session.close()?;
//! ```

pub mod factory;
pub mod transaction;

pub use factory::SessionFactory;
pub use transaction::Transaction;

use rowmap_core::{
    Connection, Entity, EntityMeta, Error, NotFoundError, PersistenceError, PersistenceErrorKind,
    Result, Value,
};
use rowmap_query::{
    CreateTableExecutor, CreateTableStatement, DeleteExecutor, DeleteStatement, InsertExecutor,
    InsertStatement, QueryExecutor, SelectExecutor, SelectStatement, UpdateExecutor,
    UpdateStatement,
};

/// Configuration for session behavior.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Whether an update/delete that affects zero rows is reported as a
    /// failure. Off by default; enable it to surface writes against rows
    /// that no longer exist.
    pub strict_affected_rows: bool,
}

impl SessionConfig {
    /// Set the strict affected-row check (builder pattern).
    #[must_use]
    pub fn strict_affected_rows(mut self, value: bool) -> Self {
        self.strict_affected_rows = value;
        self
    }
}

/// A unit-of-work façade bundling one connection, one transaction, and the
/// CRUD-by-primary-key operations.
///
/// A session must be explicitly released with [`close`](Session::close),
/// which consumes it — operations on a closed session are unrepresentable
/// rather than checked at runtime.
#[derive(Debug)]
pub struct Session<C: Connection> {
    conn: C,
    config: SessionConfig,
}

impl<C: Connection> Session<C> {
    /// Create a session over a connection with the default configuration.
    pub fn new(conn: C) -> Self {
        Self::with_config(conn, SessionConfig::default())
    }

    /// Create a session with an explicit configuration.
    pub fn with_config(conn: C, config: SessionConfig) -> Self {
        Self { conn, config }
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Hand out the transaction wrapper over this session's connection.
    pub fn transaction(&mut self) -> Transaction<'_, C> {
        Transaction::new(&mut self.conn)
    }

    /// Insert the entity and write the server-generated key back into its
    /// identity field.
    ///
    /// Non-identity column values are bound positionally in declaration
    /// order. Lower-level failures are wrapped with save context.
    pub fn save<E: Entity>(&mut self, entity: &mut E) -> Result<()> {
        let meta = EntityMeta::resolve::<E>()?;
        tracing::debug!(entity = E::TYPE_NAME, table = meta.table_name(), "saving entity");

        let params = meta.insert_values(entity);
        let query = InsertStatement::new(&meta).build();
        let key = InsertExecutor::new(&mut self.conn)
            .execute_with_result(&query, &params)
            .map_err(|e| wrap(PersistenceErrorKind::Save, E::TYPE_NAME, e))?;
        entity.set_id(key);

        tracing::debug!(entity = E::TYPE_NAME, id = key, "entity saved");
        Ok(())
    }

    /// Look up an entity by primary key.
    ///
    /// Takes the first returned row and marshals it by column-name lookup
    /// against the row's own metadata — never by position — so a result set
    /// with reordered columns still loads correctly. Zero rows is reported
    /// as [`NotFoundError`](rowmap_core::NotFoundError).
    pub fn find<E: Entity>(&mut self, key: impl Into<Value>) -> Result<E> {
        let meta = EntityMeta::resolve::<E>()?;
        let key = key.into();
        tracing::debug!(entity = E::TYPE_NAME, key = %key, "finding entity");

        let query = SelectStatement::new(&meta).build();
        let rows = SelectExecutor::new(&mut self.conn)
            .execute_with_result(&query, std::slice::from_ref(&key))
            .map_err(|e| wrap(PersistenceErrorKind::Find, E::TYPE_NAME, e))?;

        let Some(row) = rows.first() else {
            tracing::debug!(entity = E::TYPE_NAME, key = %key, "entity not found");
            return Err(Error::NotFound(NotFoundError {
                entity: E::TYPE_NAME,
                key,
            }));
        };

        E::load(row).map_err(|e| wrap(PersistenceErrorKind::Find, E::TYPE_NAME, e))
    }

    /// Update the row matching the entity's identity with its current
    /// non-identity column values.
    ///
    /// With the default configuration, zero rows affected is not an error;
    /// enable [`SessionConfig::strict_affected_rows`] to surface it.
    pub fn update<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let meta = EntityMeta::resolve::<E>()?;
        tracing::debug!(entity = E::TYPE_NAME, table = meta.table_name(), "updating entity");

        let params = meta.update_values(entity);
        let query = UpdateStatement::new(&meta).build();
        let affected = UpdateExecutor::new(&mut self.conn)
            .execute_counting(&query, &params)
            .map_err(|e| wrap(PersistenceErrorKind::Update, E::TYPE_NAME, e))?;
        self.check_affected::<E>(affected, entity.id_value())?;

        tracing::debug!(entity = E::TYPE_NAME, affected, "entity updated");
        Ok(())
    }

    /// Delete the row matching the entity's identity.
    ///
    /// Same affected-row caveat as [`update`](Session::update).
    pub fn delete<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let meta = EntityMeta::resolve::<E>()?;
        tracing::debug!(entity = E::TYPE_NAME, table = meta.table_name(), "deleting entity");

        let params = [entity.id_value()];
        let query = DeleteStatement::new(&meta).build();
        let affected = DeleteExecutor::new(&mut self.conn)
            .execute_counting(&query, &params)
            .map_err(|e| wrap(PersistenceErrorKind::Delete, E::TYPE_NAME, e))?;
        self.check_affected::<E>(affected, entity.id_value())?;

        tracing::debug!(entity = E::TYPE_NAME, affected, "entity deleted");
        Ok(())
    }

    /// Create the table for an entity type.
    pub fn create_table<E: Entity>(&mut self) -> Result<()> {
        let meta = EntityMeta::resolve::<E>()?;
        tracing::debug!(entity = E::TYPE_NAME, table = meta.table_name(), "creating table");

        let query = CreateTableStatement::new(&meta).build();
        CreateTableExecutor::new(&mut self.conn)
            .execute(&query, &[])
            .map_err(|e| wrap(PersistenceErrorKind::CreateTable, E::TYPE_NAME, e))?;

        tracing::debug!(entity = E::TYPE_NAME, table = meta.table_name(), "table created");
        Ok(())
    }

    /// Release the session, closing its connection.
    ///
    /// Consumes the session; there is no way to operate on it afterwards.
    pub fn close(mut self) -> Result<()> {
        tracing::debug!("closing session");
        self.conn.close()
    }

    fn check_affected<E: Entity>(&self, affected: u64, key: Value) -> Result<()> {
        if self.config.strict_affected_rows && affected == 0 {
            return Err(Error::Persistence(PersistenceError {
                kind: PersistenceErrorKind::NoRowAffected,
                entity: E::TYPE_NAME,
                message: format!("no row matched key {key}"),
                source: None,
            }));
        }
        Ok(())
    }
}

/// Re-wrap a lower-level failure with operation and entity context.
///
/// Errors already belonging to this layer's taxonomy propagate unchanged.
fn wrap(kind: PersistenceErrorKind, entity: &'static str, err: Error) -> Error {
    if err.is_taxonomy() {
        return err;
    }
    tracing::error!(
        entity,
        operation = kind.operation(),
        error = %err,
        "operation failed"
    );
    Error::Persistence(PersistenceError {
        kind,
        entity,
        message: err.to_string(),
        source: Some(Box::new(err)),
    })
}
