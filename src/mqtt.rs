use std::{fmt, future::Future, time::Duration};

use paho_mqtt as mqtt;
use tokio::{runtime::Handle, task::JoinHandle};

use crate::{
    constants::{STATE_OFFLINE, STATE_ONLINE},
    events::{Event, EventSender},
    homeassistant::bridge::Transport,
    settings::Settings,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttMessage {
    pub topic: String,
    pub payload: String,
    pub retained: bool,
}

/// Transport backed by a paho `AsyncClient`.
///
/// Publishing never waits for delivery. Failures are logged and the message
/// is gone, the connected event is what brings the hub back in sync.
pub struct MqttClient {
    client: mqtt::AsyncClient,
    availability_topic: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl MqttClient {
    pub fn new(settings: &Settings) -> Result<Self, mqtt::Error> {
        let uri = format!("tcp://{}:{}", settings.mqtt.host, settings.mqtt.port);
        let options = mqtt::CreateOptionsBuilder::new()
            .mqtt_version(mqtt::MQTT_VERSION_3_1_1)
            .server_uri(uri)
            .client_id(settings.mqtt.client_id.clone())
            .finalize();
        let client = mqtt::AsyncClient::new(options)?;

        Ok(MqttClient {
            client,
            availability_topic: settings.homeassistant.availability_topic(),
            username: settings.mqtt.username.clone(),
            password: settings.mqtt.password.clone(),
        })
    }

    /// Connects to the broker and keeps reconnecting in the background. Every
    /// successful (re)connect is reported as [`Event::MqttConnected`].
    pub async fn connect(&self, event_tx: EventSender) -> Result<(), mqtt::Error> {
        self.register_callbacks(event_tx);

        let mut builder = mqtt::ConnectOptionsBuilder::new();
        builder
            .clean_session(true)
            .automatic_reconnect(Duration::from_secs(2), Duration::from_secs(30));
        if let Some(topic) = &self.availability_topic {
            builder.will_message(mqtt::Message::new_retained(
                topic.as_str(),
                STATE_OFFLINE,
                mqtt::QOS_1,
            ));
        }
        if let Some(username) = &self.username {
            builder.user_name(username.as_str());
        }
        if let Some(password) = &self.password {
            builder.password(password.as_str());
        }

        match self.client.connect(builder.finalize()).await {
            Ok(_) => {
                log::info!("Connected to MQTT server");
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to connect to MQTT server: {}", e);
                Err(e)
            }
        }
    }

    pub async fn disconnect(&self) -> bool {
        if let Some(topic) = &self.availability_topic {
            let message = mqtt::Message::new_retained(topic.as_str(), STATE_OFFLINE, mqtt::QOS_1);
            if let Err(e) = self.client.publish(message).await {
                log::warn!("Failed to publish offline state: {}", e);
            }
        }
        match self.client.disconnect(None).await {
            Ok(_) => {
                log::info!("Disconnected from MQTT");
                true
            }
            Err(e) => {
                log::error!("Failed to disconnect from MQTT: {}", e);
                false
            }
        }
    }

    fn register_callbacks(&self, event_tx: EventSender) {
        let availability_topic = self.availability_topic.clone();
        let connected_tx = event_tx.clone();
        // Callbacks run on paho's thread, outside of any runtime
        let runtime = Handle::try_current().ok();
        self.client.set_connected_callback(move |client| {
            log::debug!("MQTT connection established");
            if let Some(topic) = &availability_topic {
                let token = client.publish(mqtt::Message::new_retained(
                    topic.as_str(),
                    STATE_ONLINE,
                    mqtt::QOS_1,
                ));
                if watch_delivery(runtime.as_ref(), token, topic.clone()).is_none() {
                    log::warn!("Cannot confirm online state on '{}' without a runtime", topic);
                }
            }
            if let Err(e) = connected_tx.send(Event::MqttConnected) {
                log::error!("Failed to send MQTT connected event: {}", e);
            }
        });

        self.client.set_connection_lost_callback(move |_client| {
            log::warn!("Lost connection to MQTT server, reconnecting");
            if let Err(e) = event_tx.send(Event::MqttConnectionLost) {
                log::error!("Failed to send MQTT connection lost event: {}", e);
            }
        });
    }
}

impl Transport for MqttClient {
    fn publish(&self, message: MqttMessage) {
        let qos = if message.retained {
            mqtt::QOS_1
        } else {
            mqtt::QOS_0
        };
        let msg = if message.retained {
            mqtt::Message::new_retained(message.topic.as_str(), message.payload, qos)
        } else {
            mqtt::Message::new(message.topic.as_str(), message.payload, qos)
        };

        let token = self.client.publish(msg);
        let runtime = Handle::try_current().ok();
        if watch_delivery(runtime.as_ref(), token, message.topic.clone()).is_none() {
            log::debug!("Queued MQTT message for topic '{}'", message.topic);
        }
    }
}

/// Logs the outcome of a publish once `delivery` completes. Returns `None`
/// when there is no runtime to wait on, the outcome then goes unobserved.
fn watch_delivery<F, E>(
    runtime: Option<&Handle>,
    delivery: F,
    topic: String,
) -> Option<JoinHandle<bool>>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: fmt::Display,
{
    let runtime = runtime?;
    Some(runtime.spawn(async move {
        match delivery.await {
            Ok(()) => {
                log::debug!("Published MQTT message for topic '{}'", topic);
                true
            }
            Err(e) => {
                log::error!("Failed to publish MQTT message for topic '{}': {}", topic, e);
                false
            }
        }
    }))
}
