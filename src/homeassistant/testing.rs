use std::sync::Mutex;

use crate::mqtt::MqttMessage;

use super::bridge::Transport;

/// Transport that keeps every message for inspection.
#[derive(Default)]
pub(crate) struct Recorder(Mutex<Vec<MqttMessage>>);

impl Recorder {
    /// Drains the messages recorded so far.
    pub(crate) fn take(&self) -> Vec<MqttMessage> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl Transport for Recorder {
    fn publish(&self, message: MqttMessage) {
        self.0.lock().unwrap().push(message);
    }
}
