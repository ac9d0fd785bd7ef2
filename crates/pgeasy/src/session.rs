//! Execution wrapper: render, submit, and track transaction state.
//!
//! A [`Session`] owns (at most) one [`Connection`] and a "transaction active"
//! flag. It has no queue and no pool: every call is a single in-flight request,
//! and the begin/commit/rollback methods take `&mut self` so a session cannot
//! interleave transaction control with itself. Use one session per logical
//! unit of work; builders and descriptors are plain values and can be used from
//! anywhere.
//!
//! # Example
//!
//! ```ignore
//! use pgeasy::{select, update, Session};
//!
//! let mut session = pgeasy::connect(&database_url).await?;
//!
//! session.begin_transaction().await?;
//! session
//!     .execute(update([("first_name", "Zayne")]).where_("first_name", "=", "Sean").from("users"))
//!     .await?;
//! let rows = session
//!     .query(select(Vec::<String>::new()).where_("first_name", "=", "Zayne").from("users"))
//!     .await?;
//! session.commit_transaction().await?;
//! ```

use crate::config::SessionConfig;
use crate::connection::Connection;
use crate::error::{EasyError, EasyResult, TransactionError};
use crate::query::Query;
use crate::row::FromRow;
use tokio_postgres::Row;

/// Dispatch a tracing event at a runtime-determined level.
#[cfg(feature = "tracing")]
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            tracing::Level::ERROR => tracing::error!($($field)*),
            tracing::Level::WARN => tracing::warn!($($field)*),
            tracing::Level::INFO => tracing::info!($($field)*),
            tracing::Level::DEBUG => tracing::debug!($($field)*),
            tracing::Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// A connection plus transaction bookkeeping.
#[derive(Debug)]
pub struct Session<C> {
    conn: Option<C>,
    config: SessionConfig,
    transaction_active: bool,
}

impl<C> Default for Session<C> {
    fn default() -> Self {
        Self {
            conn: None,
            config: SessionConfig::default(),
            transaction_active: false,
        }
    }
}

impl<C: Connection> Session<C> {
    /// Wrap an established connection.
    pub fn new(conn: C) -> Self {
        Self::with_config(conn, SessionConfig::default())
    }

    /// Wrap an established connection with explicit configuration.
    pub fn with_config(conn: C, config: SessionConfig) -> Self {
        Self {
            conn: Some(conn),
            config,
            transaction_active: false,
        }
    }

    /// A session with no connection. Every statement fails with
    /// [`EasyError::Connection`] until [`attach`](Self::attach) is called.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Install a connection, returning the previous one.
    ///
    /// The transaction flag is cleared: it described the old connection.
    pub fn attach(&mut self, conn: C) -> Option<C> {
        self.transaction_active = false;
        self.conn.replace(conn)
    }

    /// Remove the connection, leaving the session disconnected.
    pub fn detach(&mut self) -> Option<C> {
        self.transaction_active = false;
        self.conn.take()
    }

    pub fn connection(&self) -> Option<&C> {
        self.conn.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn is_transaction_active(&self) -> bool {
        self.transaction_active
    }

    // ==================== Statements ====================

    /// Render the query, submit it, and return all rows.
    ///
    /// The descriptor is consumed, so the caller's builder is "reset" by
    /// construction.
    pub async fn query(&self, query: impl Into<Query>) -> EasyResult<Vec<Row>> {
        let sql = query.into().to_sql();
        self.query_sql(&sql).await
    }

    /// Render the query, submit it, and return the affected row count.
    pub async fn execute(&self, query: impl Into<Query>) -> EasyResult<u64> {
        let sql = query.into().to_sql();
        self.execute_sql(&sql).await
    }

    /// Render, submit, and map every row to `T`.
    pub async fn fetch_as<T: FromRow>(&self, query: impl Into<Query>) -> EasyResult<Vec<T>> {
        let rows = self.query(query).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Render, submit, and map the first row to `T`.
    ///
    /// Returns [`EasyError::NotFound`] when no row comes back.
    pub async fn fetch_one_as<T: FromRow>(&self, query: impl Into<Query>) -> EasyResult<T> {
        let rows = self.query(query).await?;
        match rows.first() {
            Some(row) => T::from_row(row),
            None => Err(EasyError::not_found("Expected one row, got none")),
        }
    }

    /// Submit already-rendered SQL and return all rows.
    pub async fn query_sql(&self, sql: &str) -> EasyResult<Vec<Row>> {
        let conn = self.prepare(sql)?;
        conn.query(sql).await
    }

    /// Submit already-rendered SQL and return the affected row count.
    pub async fn execute_sql(&self, sql: &str) -> EasyResult<u64> {
        let conn = self.prepare(sql)?;
        conn.execute(sql).await
    }

    /// Log the statement and run the pre-submission checks.
    fn prepare(&self, sql: &str) -> EasyResult<&C> {
        let conn = self.connected()?;
        if sql.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "pgeasy.sql", "refusing to submit an empty statement");
            return Err(EasyError::EmptyQuery);
        }
        self.log_statement(sql);
        Ok(conn)
    }

    fn connected(&self) -> EasyResult<&C> {
        self.conn
            .as_ref()
            .ok_or_else(|| EasyError::Connection("database connection does not exist".to_string()))
    }

    #[cfg(feature = "tracing")]
    fn log_statement(&self, sql: &str) {
        if !self.config.log_sql {
            return;
        }
        let sql = self.config.display_sql(sql);
        emit_at_level!(
            self.config.level,
            target: "pgeasy.sql",
            in_transaction = self.transaction_active,
            sql = %sql,
            "submitting statement"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_statement(&self, _sql: &str) {}

    // ==================== Transactions ====================

    /// Open a transaction.
    ///
    /// Fails with [`TransactionError::AlreadyActive`] if one is already open.
    /// The flag is only set once the driver has accepted `BEGIN`.
    pub async fn begin_transaction(&mut self) -> EasyResult<()> {
        if self.transaction_active {
            return Err(TransactionError::AlreadyActive.into());
        }
        let conn = self.connected()?;
        conn.begin_transaction().await?;
        self.transaction_active = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgeasy.sql", "transaction started");
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// If the driver rejects `COMMIT`, a `ROLLBACK` is issued and the commit
    /// error is returned. Either way the session leaves the transaction.
    pub async fn commit_transaction(&mut self) -> EasyResult<()> {
        if !self.transaction_active {
            return Err(TransactionError::NoActiveTransaction.into());
        }
        let conn = self.connected()?;
        let result = match conn.commit().await {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Err(_rollback_err) = conn.rollback().await {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "pgeasy.sql",
                        error = %_rollback_err,
                        "rollback after failed commit also failed"
                    );
                }
                Err(err)
            }
        };
        self.transaction_active = false;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgeasy.sql", committed = result.is_ok(), "transaction finished");
        result
    }

    /// Roll back the open transaction.
    ///
    /// The session leaves the transaction even if the driver reports an error;
    /// that error is returned.
    pub async fn rollback_transaction(&mut self) -> EasyResult<()> {
        if !self.transaction_active {
            return Err(TransactionError::NoActiveTransaction.into());
        }
        let conn = self.connected()?;
        let result = conn.rollback().await;
        self.transaction_active = false;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgeasy.sql", "transaction rolled back");
        result
    }
}
