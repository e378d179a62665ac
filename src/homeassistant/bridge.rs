use std::{fmt, sync::Arc};

use crate::{
    constants::DISCOVERY_PREFIX,
    error::{Error, Result},
    mqtt::MqttMessage,
    settings::HomeAssistantSettings,
    util::{is_valid_id, slugify},
};

use super::{device::Device, entity::HaEntity};

/// Sends messages to the broker. Implementations own connection handling,
/// buffering and error reporting, entities only hand messages over.
pub trait Transport: Send + Sync {
    fn publish(&self, message: MqttMessage);
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn publish(&self, message: MqttMessage) {
        (**self).publish(message)
    }
}

/// Node level context shared by all entities: where to publish, which device
/// they belong to and how.
pub struct HaBridge {
    transport: Box<dyn Transport>,
    node_id: String,
    discovery_prefix: String,
    device: Option<Arc<Device>>,
    availability_topic: Option<String>,
    retain_state: bool,
}

impl HaBridge {
    pub fn new(transport: impl Transport + 'static, node_id: impl Into<String>) -> Result<Self> {
        let node_id = node_id.into();
        if !is_valid_id(&node_id) {
            return Err(Error::InvalidNodeId(node_id));
        }

        Ok(Self {
            transport: Box::new(transport),
            node_id,
            discovery_prefix: DISCOVERY_PREFIX.into(),
            device: None,
            availability_topic: None,
            retain_state: false,
        })
    }

    /// Bridge for `device`, with the node id derived from the device name.
    pub fn for_device(transport: impl Transport + 'static, device: Device) -> Result<Self> {
        let node_id = slugify(&device.name);
        Ok(Self::new(transport, node_id)?.with_device(device))
    }

    pub fn from_settings(
        transport: impl Transport + 'static,
        settings: &HomeAssistantSettings,
    ) -> Result<Self> {
        let node_id = settings.node_id().ok_or(Error::MissingNodeId)?;
        let mut bridge = Self::new(transport, node_id)?
            .with_discovery_prefix(settings.discovery_prefix.clone())
            .with_retain_state(settings.retain_state);
        if let Some(device) = &settings.device {
            bridge = bridge.with_device(device.into());
        }
        if let Some(topic) = settings.availability_topic() {
            bridge = bridge.with_availability_topic(topic);
        }
        Ok(bridge)
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(Arc::new(device));
        self
    }

    pub fn with_discovery_prefix(mut self, discovery_prefix: impl Into<String>) -> Self {
        self.discovery_prefix = discovery_prefix.into();
        self
    }

    pub fn with_availability_topic(mut self, topic: impl Into<String>) -> Self {
        self.availability_topic = Some(topic.into());
        self
    }

    pub fn with_retain_state(mut self, retain_state: bool) -> Self {
        self.retain_state = retain_state;
        self
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn discovery_prefix(&self) -> &str {
        &self.discovery_prefix
    }

    pub fn device(&self) -> Option<&Arc<Device>> {
        self.device.as_ref()
    }

    pub fn availability_topic(&self) -> Option<&str> {
        self.availability_topic.as_deref()
    }

    pub fn retain_state(&self) -> bool {
        self.retain_state
    }

    pub fn publish(&self, topic: &str, payload: &str, retained: bool) {
        log::debug!("Publishing to '{}' (retained: {})", topic, retained);
        self.transport.publish(MqttMessage {
            topic: topic.into(),
            payload: payload.into(),
            retained,
        });
    }
}

impl fmt::Debug for HaBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HaBridge")
            .field("node_id", &self.node_id)
            .field("discovery_prefix", &self.discovery_prefix)
            .field("device", &self.device)
            .field("availability_topic", &self.availability_topic)
            .field("retain_state", &self.retain_state)
            .finish_non_exhaustive()
    }
}

/// Publishes the discovery config of every entity, e.g. after a (re)connect.
pub fn publish_configurations(entities: &[&dyn HaEntity]) {
    for entity in entities {
        entity.publish_configuration();
    }
}

/// Replays the last state of every entity that has one.
pub fn republish_states(entities: &[&dyn HaEntity]) {
    for entity in entities {
        entity.republish_state();
    }
}
