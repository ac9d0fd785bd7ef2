//! Descriptor → SQL translation.
//!
//! [`render`] is a pure function: the same [`Query`] always yields the same
//! string. It performs no validation. A descriptor without a statement kind
//! renders as `""`, and INSERT/UPDATE/DELETE without a table or INSERT without
//! values produce malformed SQL that the caller is expected to avoid.

use crate::escape::write_escaped;
use crate::query::{JoinClause, JoinOn, Predicate, Query, StatementKind};

/// Render a query descriptor as a SQL string.
pub fn render(query: &Query) -> String {
    let mut sql = String::new();
    match query.kind {
        StatementKind::None => {}
        StatementKind::Select => render_select(&mut sql, query),
        StatementKind::Insert => render_insert(&mut sql, query),
        StatementKind::Update => render_update(&mut sql, query),
        StatementKind::Delete => render_delete(&mut sql, query),
    }
    sql
}

fn target_table(query: &Query) -> &str {
    query.tables.first().map(String::as_str).unwrap_or("")
}

fn render_select(sql: &mut String, query: &Query) {
    sql.push_str("SELECT ");
    if query.fields.is_empty() {
        sql.push('*');
    } else {
        sql.push_str(&query.fields.join(", "));
    }
    sql.push_str(" FROM ");
    sql.push_str(&query.tables.join(", "));

    for join in &query.joins {
        push_join(sql, join);
    }

    push_group(sql, "WHERE", &query.where_clauses);
    // Independent second group, prefixed on its own.
    push_group(sql, "AND", &query.and_clauses);

    if !query.order_clauses.is_empty() {
        sql.push_str(" ORDER BY");
        for clause in &query.order_clauses {
            sql.push(' ');
            sql.push_str(&clause.column);
            sql.push(' ');
            sql.push_str(clause.direction.as_sql());
        }
    }

    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = query.offset {
        sql.push_str(&format!(" OFFSET {offset}"));
    }
}

fn render_insert(sql: &mut String, query: &Query) {
    sql.push_str("INSERT INTO ");
    sql.push_str(target_table(query));
    sql.push_str(" (");
    for (i, (column, _)) in query.values.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(column);
    }
    sql.push_str(") VALUES (");
    for (i, (_, value)) in query.values.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        write_escaped(sql, value);
    }
    sql.push(')');
}

fn render_update(sql: &mut String, query: &Query) {
    sql.push_str("UPDATE ");
    sql.push_str(target_table(query));
    sql.push_str(" SET ");
    for (i, (column, value)) in query.values.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(column);
        sql.push_str(" = ");
        write_escaped(sql, value);
    }
    push_group(sql, "WHERE", &query.where_clauses);
}

fn render_delete(sql: &mut String, query: &Query) {
    sql.push_str("DELETE FROM ");
    sql.push_str(target_table(query));
    push_group(sql, "WHERE", &query.where_clauses);
}

fn push_join(sql: &mut String, join: &JoinClause) {
    sql.push(' ');
    sql.push_str(join.kind.as_sql());
    sql.push(' ');
    sql.push_str(&join.table);
    sql.push_str(" ON ");
    match &join.on {
        JoinOn::Fields { left, right } => {
            sql.push_str(left);
            sql.push_str(" = ");
            sql.push_str(right);
        }
        JoinOn::Condition {
            operator,
            condition,
        } => {
            sql.push_str(operator);
            sql.push(' ');
            sql.push_str(condition);
        }
    }
}

/// ` <keyword> c1 op v1 <connective2> c2 op v2 ...`; the first predicate's
/// connective is never written.
fn push_group(sql: &mut String, keyword: &str, predicates: &[Predicate]) {
    if predicates.is_empty() {
        return;
    }
    sql.push(' ');
    sql.push_str(keyword);
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(predicate.connective.as_sql());
        }
        sql.push(' ');
        sql.push_str(&predicate.column);
        sql.push(' ');
        sql.push_str(&predicate.operator);
        sql.push(' ');
        write_escaped(sql, &predicate.value);
    }
}
