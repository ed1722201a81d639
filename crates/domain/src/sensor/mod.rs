mod code;
mod entity;
mod repository;
mod resolver;

pub use code::SensorCode;
pub use entity::Sensor;
pub use repository::SensorRepository;
pub use resolver::{EffectiveSensor, effective_sensors};
