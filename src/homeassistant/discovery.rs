use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;

use super::{
    bridge::HaBridge,
    device::Device,
    entity::{DeviceClass, EntityIdentity, SensorMetadata, StateClass, Unit},
    topic::{unique_id, TopicSet},
};

/// Payload of a sensor's config topic, see
/// <https://www.home-assistant.io/integrations/sensor.mqtt/>.
///
/// Field order is fixed, so the same entity always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryConfig {
    pub name: String,
    pub unique_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<Unit>,
    pub state_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_topic: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_update: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Arc<Device>>,
}

impl DiscoveryConfig {
    pub fn new(
        bridge: &HaBridge,
        component: &str,
        identity: &EntityIdentity,
        metadata: &SensorMetadata,
        topics: &TopicSet,
    ) -> Self {
        let device_class = match metadata.device_class() {
            DeviceClass::Undefined => None,
            class => Some(class),
        };

        Self {
            name: friendly_name(bridge.device().map(|d| d.as_ref()), &identity.name),
            unique_id: unique_id(component, bridge.node_id(), identity),
            device_class,
            state_class: metadata.state_class(),
            unit_of_measurement: metadata.unit(),
            state_topic: topics.state.clone(),
            availability_topic: bridge.availability_topic().map(Into::into),
            force_update: metadata.force_update(),
            device: bridge.device().cloned(),
        }
    }

    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The hub shows "<device> <entity>", or only the device name for its main
/// entity (empty entity name).
fn friendly_name(device: Option<&Device>, name: &str) -> String {
    match device {
        Some(device) if name.is_empty() => device.name.clone(),
        Some(device) => format!("{} {}", device.name, name),
        None => name.to_owned(),
    }
}
