use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
    constants::DEFAULT_PRECISION,
    error::{Error, Result},
};

/// Capabilities every Home Assistant entity offers to the bridge, which calls
/// them whenever the MQTT connection is (re)established.
pub trait HaEntity {
    /// Publishes the retained discovery config so the hub creates the entity.
    fn publish_configuration(&self);

    /// Publishes the last known state again, if there is one.
    fn republish_state(&self);

    /// Clears the retained discovery config so the hub deletes the entity.
    fn remove_configuration(&self);
}

/// Sensor device classes, see <https://www.home-assistant.io/integrations/sensor/#device-class>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Generic sensor, no device class is announced
    #[serde(skip)]
    Undefined,
    Battery,
    Current,
    Energy,
    Humidity,
    Power,
    Temperature,
    Voltage,
    Weight,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Undefined => "undefined",
            DeviceClass::Battery => "battery",
            DeviceClass::Current => "current",
            DeviceClass::Energy => "energy",
            DeviceClass::Humidity => "humidity",
            DeviceClass::Power => "power",
            DeviceClass::Temperature => "temperature",
            DeviceClass::Voltage => "voltage",
            DeviceClass::Weight => "weight",
        }
    }

    /// Units accepted by Home Assistant for this device class. Empty if the
    /// class has no unit of measurement.
    pub fn units(&self) -> &'static [Unit] {
        use Unit::*;
        match self {
            DeviceClass::Undefined => &[],
            DeviceClass::Battery | DeviceClass::Humidity => &[Percent],
            DeviceClass::Current => &[Ampere, Milliampere],
            DeviceClass::Energy => &[WattHour, KilowattHour],
            DeviceClass::Power => &[Watt, Kilowatt],
            DeviceClass::Temperature => &[Celsius, Fahrenheit, Kelvin],
            DeviceClass::Voltage => &[Volt, Millivolt],
            DeviceClass::Weight => &[Kilogram, Gram, Milligram, Pound, Ounce, Stone],
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Ampere,
    Milliampere,
    WattHour,
    KilowattHour,
    Watt,
    Kilowatt,
    Percent,
    Celsius,
    Fahrenheit,
    Kelvin,
    Volt,
    Millivolt,
    Kilogram,
    Gram,
    Milligram,
    Pound,
    Ounce,
    Stone,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Ampere => "A",
            Unit::Milliampere => "mA",
            Unit::WattHour => "Wh",
            Unit::KilowattHour => "kWh",
            Unit::Watt => "W",
            Unit::Kilowatt => "kW",
            Unit::Percent => "%",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kelvin => "K",
            Unit::Volt => "V",
            Unit::Millivolt => "mV",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Milligram => "mg",
            Unit::Pound => "lb",
            Unit::Ounce => "oz",
            Unit::Stone => "st",
        }
    }

    /// Decimal places used when publishing floats in this unit
    pub fn precision(&self) -> usize {
        match self {
            Unit::Milliampere | Unit::Millivolt | Unit::Milligram | Unit::WattHour => 0,
            Unit::Watt
            | Unit::Percent
            | Unit::Celsius
            | Unit::Fahrenheit
            | Unit::Kelvin
            | Unit::Gram
            | Unit::Ounce => 1,
            Unit::Ampere | Unit::Volt | Unit::Kilogram | Unit::Pound | Unit::Stone => 2,
            Unit::Kilowatt | Unit::KilowattHour => 3,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

/// Who an entity is: its friendly name and the ids its topics are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIdentity {
    pub name: String,
    pub object_id: String,
    pub child_object_id: Option<String>,
}

impl EntityIdentity {
    /// `name` may be empty if this is the main entity of a device, the hub
    /// then shows the device name alone.
    pub fn new(name: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_id: object_id.into(),
            child_object_id: None,
        }
    }

    /// Sets a child object id to tell apart several entities with the same
    /// object id on one node, e.g. an "upper" and a "lower" lock.
    pub fn with_child_object_id(mut self, child_object_id: impl Into<String>) -> Self {
        self.child_object_id = Some(child_object_id.into());
        self
    }
}

/// What kind of value a sensor reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorMetadata {
    device_class: DeviceClass,
    unit: Option<Unit>,
    force_update: bool,
    state_class: Option<StateClass>,
    precision: Option<usize>,
}

impl SensorMetadata {
    pub fn new(device_class: DeviceClass, unit: Option<Unit>) -> Result<Self> {
        match (device_class.units(), unit) {
            ([], None) => {}
            ([], Some(unit)) => return Err(Error::IncompatibleUnit { device_class, unit }),
            (_, None) => return Err(Error::MissingUnit(device_class)),
            (units, Some(unit)) if !units.contains(&unit) => {
                return Err(Error::IncompatibleUnit { device_class, unit })
            }
            _ => {}
        }

        Ok(Self {
            device_class,
            unit,
            force_update: false,
            state_class: None,
            precision: None,
        })
    }

    pub fn power(unit: Unit) -> Result<Self> {
        Self::new(DeviceClass::Power, Some(unit))
    }

    pub fn weight(unit: Unit) -> Result<Self> {
        Self::new(DeviceClass::Weight, Some(unit))
    }

    /// Raw JSON documents, no device class and no unit
    pub fn json() -> Self {
        Self {
            device_class: DeviceClass::Undefined,
            unit: None,
            force_update: false,
            state_class: None,
            precision: None,
        }
    }

    /// Makes the hub record every published value, even unchanged ones.
    pub fn with_force_update(mut self, force_update: bool) -> Self {
        self.force_update = force_update;
        self
    }

    pub fn with_state_class(mut self, state_class: StateClass) -> Self {
        self.state_class = Some(state_class);
        self
    }

    /// Overrides the decimal places the unit would use for floats.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    pub fn force_update(&self) -> bool {
        self.force_update
    }

    pub fn state_class(&self) -> Option<StateClass> {
        self.state_class
    }

    pub fn precision(&self) -> usize {
        self.precision
            .or_else(|| self.unit.map(|u| u.precision()))
            .unwrap_or(DEFAULT_PRECISION)
    }
}
