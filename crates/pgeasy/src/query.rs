//! The query descriptor: a plain value describing one pending statement.
//!
//! A [`Query`] is produced by [`QueryBuilder`](crate::QueryBuilder) and turned
//! into SQL by [`render`](crate::render::render). It carries no connection and
//! no interior mutability, so it can be cloned, compared and sent across
//! threads freely.

use crate::error::EasyError;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Statement kind, chosen by the last of `select`/`insert`/`update`/`delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    /// Nothing chosen yet. Renders as the empty string.
    #[default]
    None,
    Select,
    Insert,
    Update,
    Delete,
}

/// Join keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    /// Bare `JOIN`
    Plain,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Plain => "JOIN",
        }
    }
}

/// The `ON` part of a join.
///
/// Two shapes exist: a plain field equality, and a free-form
/// operator/condition pair that is emitted verbatim after `ON`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOn {
    /// `ON left = right`
    Fields { left: String, right: String },
    /// `ON operator condition`
    Condition { operator: String, condition: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: String,
    pub on: JoinOn,
}

/// Keyword placed in front of every predicate except the first of its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    Where,
    OrWhere,
    And,
}

impl Connective {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Where => "WHERE",
            Self::OrWhere => "OR WHERE",
            Self::And => "AND",
        }
    }
}

/// `column operator value`, where only `value` is escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub connective: Connective,
    pub column: String,
    pub operator: String,
    pub value: Value,
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Direction {
    type Err = EasyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(EasyError::Other(format!("invalid sort direction: {s}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub column: String,
    pub direction: Direction,
}

/// Accumulated description of one statement.
///
/// `where_clauses` and `and_clauses` are two separate groups: the renderer
/// emits `WHERE ...` for the first and then a second, independently prefixed
/// `AND ...` group for the other. This mirrors how the builder has always
/// behaved and is kept even though a single ordered predicate list would be
/// the more natural model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub kind: StatementKind,
    pub tables: Vec<String>,
    pub fields: Vec<String>,
    /// Column/value pairs for INSERT and UPDATE, in insertion order
    pub values: Vec<(String, Value)>,
    pub joins: Vec<JoinClause>,
    pub where_clauses: Vec<Predicate>,
    pub and_clauses: Vec<Predicate>,
    pub order_clauses: Vec<OrderClause>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query {
    /// An empty descriptor (`StatementKind::None`, no clauses).
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the descriptor. Returns `""` when no statement kind was chosen.
    pub fn to_sql(&self) -> String {
        crate::render::render(self)
    }

    /// Render the descriptor and reset it to the empty state.
    pub fn take_sql(&mut self) -> String {
        std::mem::take(self).to_sql()
    }

    /// `true` when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
