pub mod memory_store_factory;
pub mod node_factory;
pub mod row_factory;
pub mod sensor_factory;
pub mod table_descriptor_factory;
pub mod timestamp_factory;

pub use memory_store_factory::MemoryStoreFactory;
pub use node_factory::NodeFactory;
pub use row_factory::RowFactory;
pub use sensor_factory::SensorFactory;
pub use table_descriptor_factory::TableDescriptorFactory;
pub use timestamp_factory::TimestampFactory;

#[cfg(test)]
mod memory_store_factory_test;
#[cfg(test)]
mod node_factory_test;
