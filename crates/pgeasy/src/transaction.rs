//! Transaction helper macro.
//!
//! [`Session`](crate::Session) exposes begin/commit/rollback as separate
//! calls. For the common "run a block, commit on `Ok`, roll back on `Err`"
//! shape, use [`transaction!`](crate::transaction).
//!
//! # Example
//!
//! ```ignore
//! use pgeasy::{select, update, EasyError};
//!
//! let rows = pgeasy::transaction!(session, {
//!     session
//!         .execute(update([("first_name", "Zayne")]).where_("first_name", "=", "Sean").from("users"))
//!         .await?;
//!     let rows = session
//!         .query(select(["id"]).where_("first_name", "=", "Zayne").from("users"))
//!         .await?;
//!     Ok::<_, EasyError>(rows)
//! })?;
//! ```

/// Runs the given block inside a session transaction.
///
/// - Begins via `$session.begin_transaction().await`.
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`.
///
/// The block must evaluate to `pgeasy::EasyResult<T>`; the macro evaluates to
/// the same type. `$session` must be a place expression (a variable or field)
/// of type `Session<_>` or `&mut Session<_>`.
#[macro_export]
macro_rules! transaction {
    ($session:expr, $body:block) => {{
        match $session.begin_transaction().await {
            Err(error) => Err(error),
            Ok(()) => {
                let __pgeasy_tx_body_result: $crate::EasyResult<_> = async { $body }.await;
                match __pgeasy_tx_body_result {
                    Ok(value) => match $session.commit_transaction().await {
                        Ok(()) => Ok(value),
                        Err(error) => Err(error),
                    },
                    Err(error) => match $session.rollback_transaction().await {
                        Ok(()) => Err(error),
                        Err(rollback_err) => Err($crate::EasyError::Other(format!(
                            "{error} (rollback failed: {rollback_err})"
                        ))),
                    },
                }
            }
        }
    }};
}
