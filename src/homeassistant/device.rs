use serde::Serialize;

use crate::{settings::DeviceSettings, util::slugify};

/// Device block shared by all entities of a bridge. Passed through to every
/// discovery config unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub name: String,
    pub identifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = slugify(&name);
        Self {
            name,
            identifiers: vec![id],
            manufacturer: None,
            model: None,
            sw_version: None,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_sw_version(mut self, sw_version: impl Into<String>) -> Self {
        self.sw_version = Some(sw_version.into());
        self
    }
}

impl From<&DeviceSettings> for Device {
    fn from(settings: &DeviceSettings) -> Self {
        Self {
            manufacturer: settings.manufacturer.clone(),
            model: settings.model.clone(),
            sw_version: settings.sw_version.clone(),
            ..Device::new(settings.name.clone())
        }
    }
}
