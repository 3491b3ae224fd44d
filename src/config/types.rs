//! Explicit table definitions consumed by the SQL builder and migrations.

use std::fmt;

/// Column storage type, rendered as a SQLite type name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    /// Declared length is kept for compatibility; SQLite does not enforce it.
    VarChar(u32),
}

impl ColumnType {
    pub fn sql_name(&self) -> String {
        match self {
            ColumnType::Integer => "INTEGER".into(),
            ColumnType::Real => "REAL".into(),
            ColumnType::Text => "TEXT".into(),
            ColumnType::VarChar(n) => format!("VARCHAR({})", n),
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::VarChar(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnDefault {
    Integer(i64),
    Real(f64),
    Text(&'static str),
}

impl ColumnDefault {
    /// SQL literal for a DEFAULT clause.
    pub fn sql_literal(&self) -> String {
        match self {
            ColumnDefault::Integer(n) => n.to_string(),
            ColumnDefault::Real(f) => format!("{:?}", f),
            ColumnDefault::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }

    pub fn fits(&self, ty: ColumnType) -> bool {
        match self {
            ColumnDefault::Integer(_) => matches!(ty, ColumnType::Integer | ColumnType::Real),
            ColumnDefault::Real(_) => ty == ColumnType::Real,
            ColumnDefault::Text(_) => ty.is_textual(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub default: Option<ColumnDefault>,
}

#[derive(Clone, Debug)]
pub struct TableSchema {
    pub name: &'static str,
    pub primary_key: &'static str,
    /// Column used for `list_all` ordering (ascending).
    pub order_by: &'static str,
    /// Never hand out an id twice, even after the highest row is deleted.
    pub autoincrement: bool,
    pub columns: &'static [ColumnSchema],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Every column except the primary key.
    pub fn data_columns(&self) -> impl Iterator<Item = &ColumnSchema> + '_ {
        self.columns.iter().filter(move |c| c.name != self.primary_key)
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
