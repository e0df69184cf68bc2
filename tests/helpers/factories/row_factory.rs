use crate::engine::types::{Row, ScalarValue};

pub struct RowFactory {
    row: Row,
}

impl RowFactory {
    pub fn new() -> Self {
        Self { row: Row::new() }
    }

    pub fn with(mut self, column: &str, value: impl Into<ScalarValue>) -> Self {
        self.row.insert(column.to_string(), value.into());
        self
    }

    pub fn create(self) -> Row {
        self.row
    }
}
