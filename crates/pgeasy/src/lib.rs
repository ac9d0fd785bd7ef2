//! # pgeasy
//!
//! A small fluent SQL builder for PostgreSQL.
//!
//! ## Features
//!
//! - **Fluent builder**: chain `select`/`from`/`where_`/`join`/`order_by`/`limit`
//!   to describe a statement
//! - **Plain descriptors**: a chain produces a [`Query`] value; rendering is a
//!   pure function of that value
//! - **Escaped literals**: every value is rendered through [`escape`];
//!   identifiers and operators are inserted verbatim and must be trusted
//! - **Thin execution**: a [`Session`] submits the rendered string over a
//!   [`Connection`] and tracks begin/commit/rollback
//!
//! ## Example
//!
//! ```ignore
//! use pgeasy::{delete, insert, select, update, values, Direction};
//!
//! let sql = select(["character.name", "show.title"])
//!     .from("character")
//!     .join("show", "character.id =", "show.character_id")
//!     .where_("num_shows", ">", 10)
//!     .order_by("num_shows", Direction::Desc)
//!     .limit(15)
//!     .to_sql();
//!
//! insert(values! { "a" => 1, "b" => "x" }).into("t").to_sql();
//! // INSERT INTO t (a, b) VALUES (1, 'x')
//!
//! update([("name", "Zayne")]).where_("name", "=", "Sean").from("users").to_sql();
//! // UPDATE users SET name = 'Zayne' WHERE name = 'Sean'
//!
//! delete().from("t").where_("id", "=", 5).to_sql();
//! // DELETE FROM t WHERE id = 5
//! ```
//!
//! ## Executing
//!
//! ```ignore
//! let mut session = pgeasy::connect(&database_url).await?;
//! let rows = session.query(select(["id"]).from("users")).await?;
//! ```
//!
//! A descriptor whose statement kind was never chosen renders as `""`;
//! [`Session`] refuses to submit it and returns [`EasyError::EmptyQuery`].

pub mod builder;
pub mod config;
pub mod connect;
pub mod connection;
pub mod error;
pub mod escape;
pub mod query;
pub mod render;
pub mod row;
pub mod session;
pub mod transaction;
pub mod value;

pub use builder::{QueryBuilder, delete, insert, select, update};
pub use config::SessionConfig;
pub use connect::{connect, connect_with_config};
pub use connection::Connection;
pub use error::{EasyError, EasyResult, TransactionError};
pub use escape::{escape, escape_str};
pub use query::{
    Connective, Direction, JoinClause, JoinKind, JoinOn, OrderClause, Predicate, Query,
    StatementKind,
};
pub use render::render;
pub use row::{FromRow, RowExt};
pub use session::Session;
pub use value::{Value, values_from_json};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config, pooled_session, pooled_session_with_config};
