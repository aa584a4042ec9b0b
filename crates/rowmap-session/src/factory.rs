//! Session factory.

use rowmap_core::{ConnectionConfig, Connector, Result};

use crate::{Session, SessionConfig};

/// Opens new connections from configuration and wraps them in sessions.
///
/// A factory may be shared across threads to open independent sessions;
/// the sessions themselves share nothing with each other.
#[derive(Debug)]
pub struct SessionFactory<D: Connector> {
    connector: D,
    config: ConnectionConfig,
    session_config: SessionConfig,
}

impl<D: Connector> SessionFactory<D> {
    /// Create a factory over a driver connector and its configuration.
    pub fn new(connector: D, config: ConnectionConfig) -> Self {
        Self {
            connector,
            config,
            session_config: SessionConfig::default(),
        }
    }

    /// Use a non-default session configuration for opened sessions.
    #[must_use]
    pub fn with_session_config(mut self, session_config: SessionConfig) -> Self {
        self.session_config = session_config;
        self
    }

    /// The connection configuration this factory opens with.
    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open a fresh connection and wrap it in a session.
    pub fn open_session(&self) -> Result<Session<D::Conn>> {
        tracing::debug!(url = %self.config.url, "opening session");
        let conn = self.connector.open(&self.config)?;
        Ok(Session::with_config(conn, self.session_config.clone()))
    }
}
