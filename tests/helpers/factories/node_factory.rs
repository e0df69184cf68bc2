use super::sensor_factory::SensorFactory;
use crate::engine::sensor::{Node, Sensor};

pub struct NodeFactory {
    node: Node,
}

impl NodeFactory {
    pub fn new(id: &str) -> Self {
        Self {
            node: Node::new(id, "array_of_things"),
        }
    }

    pub fn on(mut self, network: &str) -> Self {
        self.node.network = network.to_string();
        self
    }

    pub fn at(mut self, longitude: f64, latitude: f64) -> Self {
        self.node = self.node.at(longitude, latitude);
        self
    }

    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.node = self.node.with_sensor(sensor);
        self
    }

    /// The sensor pair used across the aggregation tests: a temperature
    /// sensor and a magnetometer.
    pub fn with_default_sensors(self) -> Self {
        self.with_sensor(
            SensorFactory::new("tmp112")
                .maps("Temperature", "temperature.temperature")
                .create(),
        )
        .with_sensor(
            SensorFactory::new("hmc5883l")
                .maps("X", "magnetic_field.x")
                .maps("Y", "magnetic_field.y")
                .maps("Z", "magnetic_field.z")
                .create(),
        )
    }

    pub fn create(self) -> Node {
        self.node
    }
}
