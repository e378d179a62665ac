pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const CONFIG_FILE: &str = "ha-entities.toml";

pub const DISCOVERY_PREFIX: &str = "homeassistant";
pub const SENSOR_COMPONENT: &str = "sensor";
pub const CONFIG_TOPIC: &str = "config";
pub const STATE_TOPIC: &str = "state";
pub const AVAILABILITY_TOPIC: &str = "status";
pub const STATE_ONLINE: &str = "online";
pub const STATE_OFFLINE: &str = "offline";
pub const PAYLOAD_ON: &str = "ON";
pub const PAYLOAD_OFF: &str = "OFF";

/// Decimal places for floats when neither the entity nor its unit specify any
pub const DEFAULT_PRECISION: usize = 2;

pub const BUFFER_SIZE_EVENT_CHANNEL: usize = 16;
