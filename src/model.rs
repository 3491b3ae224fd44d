//! Persisted entities and their table definitions.

use crate::config::{ColumnDefault, ColumnSchema, ColumnType, TableSchema};
use crate::sql::SqlValue;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;
use std::collections::HashMap;

/// A row type backed by one table. `Fields` is the set of mutable columns
/// written by create and update.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    type Fields: Send + Sync;

    fn schema() -> &'static TableSchema;

    fn values(fields: &Self::Fields) -> HashMap<&'static str, SqlValue>;
}

pub static ITEM_TABLE: TableSchema = TableSchema {
    name: "item",
    primary_key: "id",
    order_by: "name",
    autoincrement: true,
    columns: &[
        ColumnSchema {
            name: "id",
            column_type: ColumnType::Integer,
            nullable: false,
            default: None,
        },
        ColumnSchema {
            name: "name",
            column_type: ColumnType::VarChar(120),
            nullable: false,
            default: None,
        },
        ColumnSchema {
            name: "quantity",
            column_type: ColumnType::Integer,
            nullable: false,
            default: Some(ColumnDefault::Integer(0)),
        },
        ColumnSchema {
            name: "price",
            column_type: ColumnType::Real,
            nullable: false,
            default: Some(ColumnDefault::Real(0.0)),
        },
        ColumnSchema {
            name: "description",
            column_type: ColumnType::VarChar(255),
            nullable: true,
            default: None,
        },
    ],
};

/// An inventory record.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub description: Option<String>,
}

/// The four mutable fields of an [`Item`], replaced together on update.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub description: Option<String>,
}

impl Item {
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
            description: self.description.clone(),
        }
    }
}

impl Entity for Item {
    type Fields = ItemFields;

    fn schema() -> &'static TableSchema {
        &ITEM_TABLE
    }

    fn values(fields: &ItemFields) -> HashMap<&'static str, SqlValue> {
        HashMap::from([
            ("name", SqlValue::from(fields.name.as_str())),
            ("quantity", SqlValue::Integer(fields.quantity)),
            ("price", SqlValue::Real(fields.price)),
            ("description", SqlValue::from(fields.description.clone())),
        ])
    }
}
