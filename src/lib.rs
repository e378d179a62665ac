//! Expose sensor values to Home Assistant over MQTT.
//!
//! Entities announce themselves through MQTT discovery, skip publishing
//! values that did not change and replay their last state after a reconnect.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ha_entities::{
//!     events::{Event, EventChannel},
//!     homeassistant::{EntityIdentity, HaBridge, HaEntity, SensorEntity, SensorMetadata, Unit},
//!     mqtt::MqttClient,
//!     settings::Settings,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::new(None)?;
//! let events = EventChannel::new();
//! let mut event_rx = events.get_receiver();
//!
//! let client = Arc::new(MqttClient::new(&settings)?);
//! let bridge = Arc::new(HaBridge::from_settings(client.clone(), &settings.homeassistant)?);
//! let mut power = SensorEntity::new(
//!     bridge,
//!     EntityIdentity::new("power", "power"),
//!     SensorMetadata::power(Unit::Watt)?,
//! )?;
//!
//! client.connect(events.get_sender()).await?;
//! loop {
//!     tokio::select! {
//!         Ok(Event::MqttConnected) = event_rx.recv() => {
//!             power.publish_configuration();
//!             power.republish_state();
//!         }
//!         _ = tokio::time::sleep(std::time::Duration::from_secs(5)) => {
//!             power.update_value(&12.5);
//!         }
//!     }
//! }
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod events;
pub mod homeassistant;
pub mod mqtt;
pub mod settings;
mod util;

pub use error::{Error, Result};
