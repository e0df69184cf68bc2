use crate::engine::sensor::Sensor;

pub struct SensorFactory {
    sensor: Sensor,
}

impl SensorFactory {
    pub fn new(name: &str) -> Self {
        Self {
            sensor: Sensor::new(name),
        }
    }

    /// Map a raw payload key to `feature.property`.
    pub fn maps(mut self, key: &str, mapping: &str) -> Self {
        self.sensor = self.sensor.with_property(key, mapping);
        self
    }

    pub fn create(self) -> Sensor {
        self.sensor
    }
}
