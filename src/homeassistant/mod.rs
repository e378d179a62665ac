//! Home Assistant MQTT discovery entities.
//!
//! An entity publishes a retained config on
//! `<prefix>/<component>/<node_id>/<object_id>[/<child_object_id>]/config`
//! so the hub creates it, and its values on the matching `.../state` topic.

pub mod bridge;
pub mod cache;
pub mod device;
pub mod discovery;
pub mod entity;
pub mod sensor;
pub mod topic;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{publish_configurations, republish_states, HaBridge, Transport};
pub use device::Device;
pub use entity::{DeviceClass, EntityIdentity, HaEntity, SensorMetadata, StateClass, Unit};
pub use sensor::{EntityState, SensorEntity};
pub use value::StateValue;
