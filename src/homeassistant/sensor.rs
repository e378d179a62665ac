use std::{cell::Cell, sync::Arc};

use crate::{constants::SENSOR_COMPONENT, error::Result};

use super::{
    bridge::HaBridge,
    cache::ValueCache,
    discovery::DiscoveryConfig,
    entity::{EntityIdentity, HaEntity, SensorMetadata},
    topic::TopicSet,
    value::StateValue,
};

/// Lifecycle of an entity. There is no end state, entities live as long as
/// the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Constructed,
    Configured,
    ValuePublished,
}

/// A read-only sensor. Power, weight or JSON sensors are all this type with
/// different [`SensorMetadata`].
///
/// Not meant to be shared between threads, wrap it in a mutex if a value
/// may be published from more than one.
#[derive(Debug)]
pub struct SensorEntity {
    bridge: Arc<HaBridge>,
    topics: TopicSet,
    config: DiscoveryConfig,
    config_payload: String,
    precision: usize,
    cache: ValueCache,
    state: Cell<EntityState>,
}

impl SensorEntity {
    pub fn new(
        bridge: Arc<HaBridge>,
        identity: EntityIdentity,
        metadata: SensorMetadata,
    ) -> Result<Self> {
        let topics = TopicSet::new(
            bridge.discovery_prefix(),
            SENSOR_COMPONENT,
            bridge.node_id(),
            &identity,
        )?;
        let config = DiscoveryConfig::new(&bridge, SENSOR_COMPONENT, &identity, &metadata, &topics);
        let config_payload = config.to_payload()?;

        Ok(Self {
            bridge,
            topics,
            config,
            config_payload,
            precision: metadata.precision(),
            cache: ValueCache::new(),
            state: Cell::new(EntityState::Constructed),
        })
    }

    /// Publishes `value`, even if it is the same as the last one.
    pub fn publish_value<V: StateValue + ?Sized>(&mut self, value: &V) {
        let payload = value.to_payload(self.precision);
        self.send_state(payload);
    }

    /// Publishes `value` only if its payload differs from the last published
    /// one. Returns whether anything was sent.
    pub fn update_value<V: StateValue + ?Sized>(&mut self, value: &V) -> bool {
        let payload = value.to_payload(self.precision);
        if !self.cache.should_publish(&payload) {
            log::trace!("State of '{}' unchanged", self.topics.state);
            return false;
        }
        self.send_state(payload);
        true
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    pub fn discovery_config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn last_value(&self) -> Option<&str> {
        self.cache.last()
    }

    pub fn state(&self) -> EntityState {
        self.state.get()
    }

    fn send_state(&mut self, payload: String) {
        let retain = self.bridge.retain_state();
        self.bridge.publish(&self.topics.state, &payload, retain);
        self.cache.record(payload);
        self.state.set(EntityState::ValuePublished);
    }
}

impl HaEntity for SensorEntity {
    fn publish_configuration(&self) {
        self.bridge.publish(&self.topics.config, &self.config_payload, true);
        self.state.set(EntityState::Configured);
    }

    fn republish_state(&self) {
        match self.cache.last() {
            Some(payload) => {
                let retain = self.bridge.retain_state();
                self.bridge.publish(&self.topics.state, payload, retain);
            }
            None => log::debug!("No state to replay for '{}'", self.topics.state),
        }
    }

    fn remove_configuration(&self) {
        log::debug!("Removing entity '{}'", self.config.unique_id);
        self.bridge.publish(&self.topics.config, "", true);
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;

    use crate::{
        error::Error,
        homeassistant::{
            bridge::HaBridge,
            device::Device,
            entity::{DeviceClass, EntityIdentity, HaEntity, SensorMetadata, Unit},
            testing::Recorder,
        },
        mqtt::MqttMessage,
    };

    use super::{EntityState, SensorEntity};

    fn power_sensor() -> (Arc<Recorder>, SensorEntity) {
        let recorder = Arc::new(Recorder::default());
        let bridge = HaBridge::for_device(recorder.clone(), Device::new("Kitchen")).unwrap();
        let sensor = SensorEntity::new(
            Arc::new(bridge),
            EntityIdentity::new("power", "power"),
            SensorMetadata::power(Unit::Watt).unwrap(),
        )
        .unwrap();
        (recorder, sensor)
    }

    #[test]
    fn test_update_value_skips_duplicates() {
        let (recorder, mut sensor) = power_sensor();

        assert!(sensor.update_value(&12.5));
        assert!(!sensor.update_value(&12.5));
        assert!(sensor.update_value(&13.0));

        let payloads = recorder
            .take()
            .into_iter()
            .map(|m| m.payload)
            .collect::<Vec<_>>();
        assert_eq!(payloads, vec!["12.5", "13.0"]);
    }

    #[test]
    fn test_update_value_ignores_sign_of_zero() {
        let (recorder, mut sensor) = power_sensor();

        assert!(sensor.update_value(&0.01));
        for value in [-0.01, 0.02, -0.02] {
            assert!(!sensor.update_value(&value));
        }

        let messages = recorder.take();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].payload, "0.0");
    }

    #[test]
    fn test_publish_value_always_sends() {
        let (recorder, mut sensor) = power_sensor();

        sensor.publish_value(&12.5);
        sensor.publish_value(&12.5);
        assert_eq!(recorder.take().len(), 2);

        // publish_value refreshes the cache, so an equal update is skipped
        assert!(!sensor.update_value(&12.5));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_republish_state() {
        let (recorder, mut sensor) = power_sensor();

        sensor.republish_state();
        assert!(recorder.take().is_empty());

        sensor.update_value(&230.04);
        recorder.take();

        sensor.republish_state();
        let messages = recorder.take();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].topic, "homeassistant/sensor/kitchen/power/state");
        assert_eq!(messages[0].payload, "230.0");
        assert_eq!(sensor.last_value(), Some("230.0"));
    }

    #[test]
    fn test_publish_configuration() {
        let (recorder, sensor) = power_sensor();

        sensor.publish_configuration();
        sensor.publish_configuration();

        let messages = recorder.take();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], messages[1]);
        assert_eq!(messages[0].topic, "homeassistant/sensor/kitchen/power/config");
        assert!(messages[0].retained);
        assert_eq!(sensor.last_value(), None);
    }

    #[test]
    fn test_remove_configuration() {
        let (recorder, sensor) = power_sensor();

        sensor.remove_configuration();
        let messages = recorder.take();
        assert_eq!(
            messages,
            vec![MqttMessage {
                topic: "homeassistant/sensor/kitchen/power/config".into(),
                payload: "".into(),
                retained: true,
            }]
        );
    }

    #[test]
    fn test_state_transitions() {
        let (_recorder, mut sensor) = power_sensor();
        assert_eq!(sensor.state(), EntityState::Constructed);

        sensor.publish_configuration();
        assert_eq!(sensor.state(), EntityState::Configured);

        sensor.republish_state();
        assert_eq!(sensor.state(), EntityState::Configured);

        sensor.update_value(&1.0);
        assert_eq!(sensor.state(), EntityState::ValuePublished);

        sensor.republish_state();
        assert_eq!(sensor.state(), EntityState::ValuePublished);

        sensor.publish_configuration();
        assert_eq!(sensor.state(), EntityState::Configured);
    }

    #[test]
    fn test_json_sensor() {
        let recorder = Arc::new(Recorder::default());
        let bridge = Arc::new(HaBridge::new(recorder.clone(), "printer").unwrap());
        let mut sensor = SensorEntity::new(
            bridge,
            EntityIdentity::new("status", "json"),
            SensorMetadata::json(),
        )
        .unwrap();

        assert!(sensor.update_value(&json!({ "state": "printing", "progress": 42 })));
        assert!(!sensor.update_value(&json!({ "progress": 42, "state": "printing" })));
        assert!(sensor.update_value(&json!({ "progress": 43, "state": "printing" })));

        let messages = recorder.take();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].payload, r#"{"progress":42,"state":"printing"}"#);
        assert!(!messages[0].retained);
    }

    #[test]
    fn test_retained_state() {
        let recorder = Arc::new(Recorder::default());
        let bridge = HaBridge::new(recorder.clone(), "garden")
            .unwrap()
            .with_retain_state(true);
        let mut sensor = SensorEntity::new(
            Arc::new(bridge),
            EntityIdentity::new("humidity", "humidity"),
            SensorMetadata::new(DeviceClass::Humidity, Some(Unit::Percent)).unwrap(),
        )
        .unwrap();

        sensor.publish_value("55");
        sensor.republish_state();

        let messages = recorder.take();
        assert!(messages.iter().all(|m| m.retained));
        assert!(messages.iter().all(|m| m.payload == "55"));
    }

    #[test]
    fn test_invalid_child_object_id() {
        let bridge = Arc::new(HaBridge::new(Recorder::default(), "door").unwrap());
        let err = SensorEntity::new(
            bridge,
            EntityIdentity::new("lock", "lock").with_child_object_id("upper/lock"),
            SensorMetadata::json(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidChildObjectId(_)));
    }
}
