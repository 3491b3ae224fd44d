//! Apply table definitions to the database.

use crate::config::{validate, TableSchema};
use crate::error::AppError;
use crate::sql::quoted;
use sqlx::SqlitePool;

/// CREATE TABLE IF NOT EXISTS DDL for a schema.
pub fn create_table_sql(schema: &TableSchema) -> String {
    let mut col_defs = Vec::new();
    for c in schema.columns {
        let mut def = format!("{} {}", quoted(c.name), c.column_type.sql_name());
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if c.name == schema.primary_key {
            def.push_str(" PRIMARY KEY");
            if schema.autoincrement {
                def.push_str(" AUTOINCREMENT");
            }
        }
        if let Some(d) = c.default {
            def.push_str(" DEFAULT ");
            def.push_str(&d.sql_literal());
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(schema.name),
        col_defs.join(",\n  ")
    )
}

/// Validate the schema and create its table if missing. Idempotent; an existing
/// table is left as it is.
pub async fn apply_schema(pool: &SqlitePool, schema: &TableSchema) -> Result<(), AppError> {
    validate(schema)?;
    let sql = create_table_sql(schema);
    tracing::debug!(sql = %sql, "apply schema");
    sqlx::query(&sql).execute(pool).await?;
    tracing::info!(table = %schema, "schema applied");
    Ok(())
}
