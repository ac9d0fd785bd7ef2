//! Fluent query builder.
//!
//! [`QueryBuilder`] is a consuming builder: every method takes `self` and
//! returns the updated builder, so a chain produces a fresh [`Query`] value
//! and nothing is shared between chains.
//!
//! ```ignore
//! use pgeasy::{select, Direction};
//!
//! let sql = select(["character.name", "show.title"])
//!     .from("character")
//!     .inner_join("show", "character.id", "show.character_id")
//!     .where_("num_shows", ">", 10)
//!     .order_by("num_shows", Direction::Desc)
//!     .limit(15)
//!     .to_sql();
//! ```
//!
//! ## Statement kind
//!
//! `select`, `insert`, `update` and `delete` each set the statement kind.
//! Calling more than one of them on the same chain is last-write-wins: only
//! the final kind is rendered, while values/fields recorded by the earlier
//! calls stay in the descriptor.
//!
//! ## WHERE vs AND
//!
//! `where_`/`or_where` and `and` feed two separate predicate groups. The
//! first renders as `WHERE a ... OR WHERE b ...`, the second is appended
//! afterwards as its own `AND c ... AND d ...` group, and only for SELECT.

use crate::query::{
    Connective, Direction, JoinClause, JoinKind, JoinOn, OrderClause, Predicate, Query,
    StatementKind,
};
use crate::value::{Value, values_from_json};

/// Chainable builder producing a [`Query`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

/// Start a SELECT of the given fields. An empty list selects `*`.
pub fn select<I, S>(fields: I) -> QueryBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    QueryBuilder::new().select(fields)
}

/// Start an INSERT of the given column/value pairs.
pub fn insert<I, K, V>(values: I) -> QueryBuilder
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    QueryBuilder::new().insert(values)
}

/// Start an UPDATE setting the given column/value pairs.
pub fn update<I, K, V>(values: I) -> QueryBuilder
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    QueryBuilder::new().update(values)
}

/// Start a DELETE.
pub fn delete() -> QueryBuilder {
    QueryBuilder::new().delete()
}

/// Build an ordered `Vec<(String, Value)>` for `insert`/`update` from
/// heterogeneous values.
///
/// ```ignore
/// let q = pgeasy::insert(pgeasy::values! { "a" => 1, "b" => "x" }).into("t");
/// ```
#[macro_export]
macro_rules! values {
    ($($column:expr => $value:expr),* $(,)?) => {
        ::std::vec![
            $((::std::string::String::from($column), $crate::Value::from($value))),*
        ]
    };
}

impl QueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Tables ====================

    /// Append a table to the FROM list.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.query.tables.push(table.into());
        self
    }

    /// Replace the table list with a single target table.
    pub fn into(mut self, table: impl Into<String>) -> Self {
        self.query.tables = vec![table.into()];
        self
    }

    // ==================== Statement kind ====================

    /// SELECT the given fields (replacing any previous projection).
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.kind = StatementKind::Select;
        self.query.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// SELECT `*`.
    pub fn select_all(mut self) -> Self {
        self.query.kind = StatementKind::Select;
        self.query.fields.clear();
        self
    }

    /// INSERT the given column/value pairs (replacing any previous values).
    pub fn insert<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.query.kind = StatementKind::Insert;
        self.query.values = collect_values(values);
        self
    }

    /// INSERT the members of a JSON object.
    pub fn insert_json(mut self, obj: serde_json::Value) -> Self {
        self.query.kind = StatementKind::Insert;
        self.query.values = values_from_json(obj);
        self
    }

    /// UPDATE setting the given column/value pairs (replacing any previous values).
    pub fn update<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.query.kind = StatementKind::Update;
        self.query.values = collect_values(values);
        self
    }

    /// UPDATE setting the members of a JSON object.
    pub fn update_json(mut self, obj: serde_json::Value) -> Self {
        self.query.kind = StatementKind::Update;
        self.query.values = values_from_json(obj);
        self
    }

    /// DELETE from the first table.
    pub fn delete(mut self) -> Self {
        self.query.kind = StatementKind::Delete;
        self
    }

    // ==================== JOIN ====================

    /// `INNER JOIN table ON field = other_field`.
    pub fn inner_join(
        self,
        table: impl Into<String>,
        field: impl Into<String>,
        other_field: impl Into<String>,
    ) -> Self {
        self.push_join(
            JoinKind::Inner,
            table.into(),
            JoinOn::Fields {
                left: field.into(),
                right: other_field.into(),
            },
        )
    }

    /// `JOIN table ON operator condition`.
    pub fn join(
        self,
        table: impl Into<String>,
        operator: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.push_condition_join(JoinKind::Plain, table, operator, condition)
    }

    /// `LEFT JOIN table ON operator condition`.
    pub fn left_join(
        self,
        table: impl Into<String>,
        operator: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.push_condition_join(JoinKind::Left, table, operator, condition)
    }

    /// `RIGHT JOIN table ON operator condition`.
    pub fn right_join(
        self,
        table: impl Into<String>,
        operator: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.push_condition_join(JoinKind::Right, table, operator, condition)
    }

    fn push_condition_join(
        self,
        kind: JoinKind,
        table: impl Into<String>,
        operator: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.push_join(
            kind,
            table.into(),
            JoinOn::Condition {
                operator: operator.into(),
                condition: condition.into(),
            },
        )
    }

    fn push_join(mut self, kind: JoinKind, table: String, on: JoinOn) -> Self {
        self.query.joins.push(JoinClause { kind, table, on });
        self
    }

    // ==================== Predicates ====================

    /// Add to the WHERE group. Joined to earlier entries with `WHERE`.
    pub fn where_(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let p = predicate(Connective::Where, column, operator, value);
        self.query.where_clauses.push(p);
        self
    }

    /// Add to the WHERE group. Joined to earlier entries with `OR WHERE`.
    pub fn or_where(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let p = predicate(Connective::OrWhere, column, operator, value);
        self.query.where_clauses.push(p);
        self
    }

    /// Add to the separate AND group (SELECT only).
    pub fn and(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let p = predicate(Connective::And, column, operator, value);
        self.query.and_clauses.push(p);
        self
    }

    // ==================== Ordering / pagination ====================

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.query.order_clauses.push(OrderClause {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn order_by_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn order_by_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Desc)
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.query.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.query.offset = Some(offset);
        self
    }

    // ==================== Output ====================

    /// Borrow the descriptor built so far.
    pub fn as_query(&self) -> &Query {
        &self.query
    }

    /// Finish the chain and return the descriptor.
    pub fn build(self) -> Query {
        self.query
    }

    /// Render without consuming the builder.
    pub fn to_sql(&self) -> String {
        self.query.to_sql()
    }

    /// Take the descriptor out, leaving the builder empty.
    pub fn take(&mut self) -> Query {
        std::mem::take(&mut self.query)
    }

    /// Discard everything recorded so far.
    pub fn reset(&mut self) {
        self.query = Query::default();
    }
}

impl From<QueryBuilder> for Query {
    fn from(builder: QueryBuilder) -> Self {
        builder.query
    }
}

impl From<Query> for QueryBuilder {
    fn from(query: Query) -> Self {
        Self { query }
    }
}

fn predicate(
    connective: Connective,
    column: impl Into<String>,
    operator: impl Into<String>,
    value: impl Into<Value>,
) -> Predicate {
    Predicate {
        connective,
        column: column.into(),
        operator: operator.into(),
        value: value.into(),
    }
}

fn collect_values<I, K, V>(values: I) -> Vec<(String, Value)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests;
