use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{APP_NAME, AVAILABILITY_TOPIC, CONFIG_FILE, DISCOVERY_PREFIX},
    util::slugify,
};

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub mqtt: MqttSettings,
    pub homeassistant: HomeAssistantSettings,
}

impl Settings {
    /// Loads defaults, then the TOML file, then environment variables such as
    /// `MQTT_HOST` or `HOMEASSISTANT_DEVICE_NAME`.
    pub fn new(config: Option<&str>) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config.unwrap_or(CONFIG_FILE)))
            .merge(Env::raw().map(|k| {
                let k = k.as_str().to_lowercase();
                if k.starts_with("mqtt_") {
                    k.replacen("mqtt_", "mqtt.", 1).into()
                } else if k.starts_with("homeassistant_device_") {
                    k.replacen("homeassistant_device_", "homeassistant.device.", 1)
                        .into()
                } else if k.starts_with("homeassistant_") {
                    k.replacen("homeassistant_", "homeassistant.", 1).into()
                } else {
                    k.into()
                }
            }))
            .extract()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: String,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 1883,
            username: None,
            password: None,
            client_id: APP_NAME.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeAssistantSettings {
    pub discovery_prefix: String,
    /// Falls back to the slugified device name
    pub node_id: Option<String>,
    /// Publish states as retained messages
    pub retain_state: bool,
    /// Announce an availability topic with a last will
    pub availability: bool,
    pub device: Option<DeviceSettings>,
}

impl Default for HomeAssistantSettings {
    fn default() -> Self {
        Self {
            discovery_prefix: DISCOVERY_PREFIX.into(),
            node_id: None,
            retain_state: false,
            availability: false,
            device: None,
        }
    }
}

impl HomeAssistantSettings {
    pub fn node_id(&self) -> Option<String> {
        self.node_id
            .clone()
            .or_else(|| self.device.as_ref().map(|d| slugify(&d.name)))
            .filter(|id| !id.is_empty())
    }

    pub fn availability_topic(&self) -> Option<String> {
        if !self.availability {
            return None;
        }
        self.node_id()
            .map(|node_id| format!("{}/{}", node_id, AVAILABILITY_TOPIC))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSettings {
    pub name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub sw_version: Option<String>,
}
