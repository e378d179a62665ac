use tokio::sync::broadcast::{self, Receiver, Sender};

use crate::constants::BUFFER_SIZE_EVENT_CHANNEL;

pub type EventSender = Sender<Event>;
pub type EventReceiver = Receiver<Event>;

/// Connection events from the MQTT client. Applications listen for
/// [`Event::MqttConnected`] to publish configurations and replay states.
pub struct EventChannel {
    tx: EventSender,
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EventChannel {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(BUFFER_SIZE_EVENT_CHANNEL);
        Self { tx }
    }

    pub fn get_receiver(&self) -> EventReceiver {
        self.tx.subscribe()
    }

    pub fn get_sender(&self) -> EventSender {
        self.tx.clone()
    }

    pub fn send(&self, event: Event) {
        if let Err(e) = self.tx.send(event) {
            log::error!("Failed to send event: {}", e);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MqttConnected,
    MqttConnectionLost,
}
