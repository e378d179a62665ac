use thiserror::Error;

use crate::homeassistant::entity::{DeviceClass, Unit};

/// Errors raised while constructing bridges and entities.
///
/// All of them describe a configuration that would produce a broken
/// discovery payload, so nothing is created when one is returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no node id configured and no device to derive one from")]
    MissingNodeId,

    #[error("invalid node id '{0}', allowed characters are [a-zA-Z0-9_-]")]
    InvalidNodeId(String),

    #[error("invalid object id '{0}', must be non-empty and match [a-zA-Z0-9_-]")]
    InvalidObjectId(String),

    #[error("invalid child object id '{0}', allowed characters are [a-zA-Z0-9_-]")]
    InvalidChildObjectId(String),

    #[error("unit '{unit}' is not valid for device class '{device_class}'")]
    IncompatibleUnit { device_class: DeviceClass, unit: Unit },

    #[error("device class '{0}' requires a unit of measurement")]
    MissingUnit(DeviceClass),

    #[error("failed to serialize discovery config: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
