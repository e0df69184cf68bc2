use crate::engine::schema::{ColumnDescriptor, ColumnType, TableDescriptor};

pub struct TableDescriptorFactory {
    name: String,
    columns: Vec<ColumnDescriptor>,
}

impl TableDescriptorFactory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, column_type: ColumnType) -> Self {
        self.columns.push(ColumnDescriptor::new(name, column_type));
        self
    }

    /// A feature-of-interest table: the key columns followed by one double
    /// precision column per property.
    pub fn feature_table(name: &str, properties: &[&str]) -> Self {
        let mut factory = Self::new(name)
            .with_column("node_id", ColumnType::Text)
            .with_column("datetime", ColumnType::Timestamp)
            .with_column("meta_id", ColumnType::Text)
            .with_column("sensor", ColumnType::Text);
        for property in properties {
            factory = factory.with_column(property, ColumnType::Float);
        }
        factory
    }

    pub fn create(self) -> TableDescriptor {
        TableDescriptor::new(self.name, self.columns)
    }
}
