//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table definition.
//! Identifiers come only from the schema; values are always bound as `?` parameters.

use crate::config::TableSchema;
use crate::sql::SqlValue;
use std::collections::HashMap;

/// Quote identifier for SQLite (safe: only from schema definitions).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

fn select_column_list(schema: &TableSchema) -> String {
    schema
        .column_names()
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by the schema's order column, then by primary key.
pub fn select_all(schema: &TableSchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} ASC, {} ASC",
        select_column_list(schema),
        quoted(schema.name),
        quoted(schema.order_by),
        quoted(schema.primary_key)
    );
    q
}

/// Row count of the table.
pub fn count_all(schema: &TableSchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(schema.name));
    q
}

/// SELECT by primary key. Id is the sole param.
pub fn select_by_id(schema: &TableSchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(schema),
        quoted(schema.name),
        quoted(schema.primary_key)
    );
    q.params.push(SqlValue::Integer(id));
    q
}

/// INSERT: never includes the primary key. Columns absent from `values` are
/// left to their DB default when they have one, otherwise bound as NULL.
pub fn insert(schema: &TableSchema, values: &HashMap<&str, SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    for c in schema.data_columns() {
        let val = match values.get(c.name) {
            Some(v) => v.clone(),
            None if c.default.is_some() => continue,
            None => SqlValue::Null,
        };
        cols.push(quoted(c.name));
        q.params.push(val);
    }
    let table = quoted(schema.name);
    let returning = select_column_list(schema);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        let placeholders = vec!["?"; cols.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders,
            returning
        )
    };
    q
}

/// UPDATE by id: SET every supplied non-key column, in schema order.
/// With nothing to set this degrades to a SELECT so the caller still learns whether the row exists.
pub fn update(schema: &TableSchema, id: i64, values: &HashMap<&str, SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in schema.data_columns() {
        if let Some(v) = values.get(c.name) {
            sets.push(format!("{} = ?", quoted(c.name)));
            q.params.push(v.clone());
        }
    }
    if sets.is_empty() {
        return select_by_id(schema, id);
    }
    q.params.push(SqlValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
        quoted(schema.name),
        sets.join(", "),
        quoted(schema.primary_key),
        select_column_list(schema)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(schema: &TableSchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ? RETURNING {}",
        quoted(schema.name),
        quoted(schema.primary_key),
        select_column_list(schema)
    );
    q.params.push(SqlValue::Integer(id));
    q
}
