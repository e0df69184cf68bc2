pub use super::factories::{
    MemoryStoreFactory, NodeFactory, RowFactory, SensorFactory, TableDescriptorFactory,
};

pub struct Factory;

impl Factory {
    pub fn table(name: &str) -> TableDescriptorFactory {
        TableDescriptorFactory::new(name)
    }

    pub fn row() -> RowFactory {
        RowFactory::new()
    }

    pub fn sensor(name: &str) -> SensorFactory {
        SensorFactory::new(name)
    }

    pub fn node(id: &str) -> NodeFactory {
        NodeFactory::new(id)
    }

    pub fn memory_store() -> MemoryStoreFactory {
        MemoryStoreFactory::new()
    }
}
