//! Connection trait over the database driver.
//!
//! pgeasy never talks to the socket itself. A [`Session`](crate::Session)
//! hands fully rendered SQL to a [`Connection`], which forwards it to the
//! driver and maps the driver's error into [`EasyError`].

use crate::error::{EasyError, EasyResult};
use std::future::Future;
use std::sync::Arc;
use tokio_postgres::Row;

/// The driver surface pgeasy relies on: run a statement, and open/close a
/// transaction.
///
/// Statements arrive with every literal already inlined and escaped, so no
/// bind parameters are passed.
pub trait Connection: Send + Sync {
    /// Run a statement and return all rows.
    fn query(&self, sql: &str) -> impl Future<Output = EasyResult<Vec<Row>>> + Send;

    /// Run a statement and return the number of affected rows.
    fn execute(&self, sql: &str) -> impl Future<Output = EasyResult<u64>> + Send;

    /// Run one or more statements that return nothing.
    fn batch_execute(&self, sql: &str) -> impl Future<Output = EasyResult<()>> + Send;

    /// Start a transaction on this connection.
    fn begin_transaction(&self) -> impl Future<Output = EasyResult<()>> + Send {
        self.batch_execute("BEGIN")
    }

    /// Commit the open transaction.
    fn commit(&self) -> impl Future<Output = EasyResult<()>> + Send {
        self.batch_execute("COMMIT")
    }

    /// Roll back the open transaction.
    fn rollback(&self) -> impl Future<Output = EasyResult<()>> + Send {
        self.batch_execute("ROLLBACK")
    }
}

impl Connection for tokio_postgres::Client {
    async fn query(&self, sql: &str) -> EasyResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, &[])
            .await
            .map_err(EasyError::from_db_error)
    }

    async fn execute(&self, sql: &str) -> EasyResult<u64> {
        tokio_postgres::Client::execute(self, sql, &[])
            .await
            .map_err(EasyError::from_db_error)
    }

    async fn batch_execute(&self, sql: &str) -> EasyResult<()> {
        tokio_postgres::Client::batch_execute(self, sql)
            .await
            .map_err(EasyError::from_db_error)
    }
}

impl<C: Connection + ?Sized> Connection for &C {
    async fn query(&self, sql: &str) -> EasyResult<Vec<Row>> {
        C::query(self, sql).await
    }

    async fn execute(&self, sql: &str) -> EasyResult<u64> {
        C::execute(self, sql).await
    }

    async fn batch_execute(&self, sql: &str) -> EasyResult<()> {
        C::batch_execute(self, sql).await
    }

    async fn begin_transaction(&self) -> EasyResult<()> {
        C::begin_transaction(self).await
    }

    async fn commit(&self) -> EasyResult<()> {
        C::commit(self).await
    }

    async fn rollback(&self) -> EasyResult<()> {
        C::rollback(self).await
    }
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    async fn query(&self, sql: &str) -> EasyResult<Vec<Row>> {
        C::query(self, sql).await
    }

    async fn execute(&self, sql: &str) -> EasyResult<u64> {
        C::execute(self, sql).await
    }

    async fn batch_execute(&self, sql: &str) -> EasyResult<()> {
        C::batch_execute(self, sql).await
    }

    async fn begin_transaction(&self) -> EasyResult<()> {
        C::begin_transaction(self).await
    }

    async fn commit(&self) -> EasyResult<()> {
        C::commit(self).await
    }

    async fn rollback(&self) -> EasyResult<()> {
        C::rollback(self).await
    }
}

#[cfg(feature = "pool")]
impl Connection for deadpool_postgres::ClientWrapper {
    async fn query(&self, sql: &str) -> EasyResult<Vec<Row>> {
        Connection::query(&**self, sql).await
    }

    async fn execute(&self, sql: &str) -> EasyResult<u64> {
        Connection::execute(&**self, sql).await
    }

    async fn batch_execute(&self, sql: &str) -> EasyResult<()> {
        Connection::batch_execute(&**self, sql).await
    }
}

#[cfg(feature = "pool")]
impl Connection for deadpool_postgres::Client {
    async fn query(&self, sql: &str) -> EasyResult<Vec<Row>> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        Connection::query(&**self, sql).await
    }

    async fn execute(&self, sql: &str) -> EasyResult<u64> {
        Connection::execute(&**self, sql).await
    }

    async fn batch_execute(&self, sql: &str) -> EasyResult<()> {
        Connection::batch_execute(&**self, sql).await
    }
}
