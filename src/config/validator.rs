//! Table definition checks, run before any DDL or query is built from a schema.

use crate::config::{ColumnType, TableSchema};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(schema: &TableSchema) -> Result<(), ConfigError> {
    if schema.name.trim().is_empty() {
        return Err(ConfigError::Validation("table name must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for c in schema.columns {
        if !seen.insert(c.name) {
            return Err(ConfigError::DuplicateColumn(format!("{}.{}", schema.name, c.name)));
        }
        if let Some(d) = c.default {
            if !d.fits(c.column_type) {
                return Err(ConfigError::Validation(format!(
                    "default for {}.{} does not match type {}",
                    schema.name,
                    c.name,
                    c.column_type.sql_name()
                )));
            }
        }
    }

    let pk = schema.column(schema.primary_key).ok_or_else(|| ConfigError::InvalidPrimaryKey {
        table: schema.name.to_string(),
        column: schema.primary_key.to_string(),
    })?;
    if pk.column_type != ColumnType::Integer || pk.nullable {
        return Err(ConfigError::InvalidPrimaryKey {
            table: schema.name.to_string(),
            column: schema.primary_key.to_string(),
        });
    }

    if schema.column(schema.order_by).is_none() {
        return Err(ConfigError::UnknownColumn {
            table: schema.name.to_string(),
            column: schema.order_by.to_string(),
        });
    }

    Ok(())
}
