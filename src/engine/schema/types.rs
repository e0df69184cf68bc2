use serde::{Deserialize, Serialize};

/// Semantic type of a reflected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    /// Double precision; the only type aggregation accepts
    Float,
    Boolean,
    Timestamp,
    Geometry,
}

impl ColumnType {
    /// Map a database type name (as reported by reflection) to a semantic type.
    /// Length/precision suffixes like `VARCHAR(64)` are ignored.
    pub fn from_sql_type(s: &str) -> Option<Self> {
        let base = s.split('(').next().unwrap_or(s).trim().to_ascii_lowercase();
        match base.as_str() {
            "text" | "varchar" | "character varying" | "char" | "character" | "string" => {
                Some(ColumnType::Text)
            }
            "integer" | "int" | "int4" | "int8" | "bigint" | "smallint" | "serial"
            | "bigserial" | "numeric" | "decimal" => Some(ColumnType::Integer),
            "double precision" | "float8" | "float" | "real" | "float4" | "double" => {
                Some(ColumnType::Float)
            }
            "boolean" | "bool" => Some(ColumnType::Boolean),
            "timestamp" | "timestamp without time zone" | "timestamp with time zone"
            | "timestamptz" | "date" | "datetime" => Some(ColumnType::Timestamp),
            "geometry" | "geography" => Some(ColumnType::Geometry),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Reflected shape of a table. Column order is the table's declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
