use std::fmt;

use crate::constants::{PAYLOAD_OFF, PAYLOAD_ON};

/// Values that can be published on a state topic.
///
/// The payload must be the same string for the same value every time,
/// change detection compares payloads and nothing else.
pub trait StateValue {
    /// `precision` is the number of decimal places, only used by floats.
    fn to_payload(&self, precision: usize) -> String;
}

impl StateValue for f64 {
    fn to_payload(&self, precision: usize) -> String {
        fixed(self, precision)
    }
}

impl StateValue for f32 {
    fn to_payload(&self, precision: usize) -> String {
        fixed(self, precision)
    }
}

/// Fixed point text. Anything that rounds to zero is unsigned, otherwise noise
/// around zero would flip between `0.0` and `-0.0`.
fn fixed<T: fmt::Display>(value: T, precision: usize) -> String {
    let payload = format!("{:.*}", precision, value);
    match payload.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_owned(),
        _ => payload,
    }
}

macro_rules! impl_integer_state_value {
    ($($ty:ty),*) => {
        $(
            impl StateValue for $ty {
                fn to_payload(&self, _precision: usize) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_integer_state_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl StateValue for bool {
    fn to_payload(&self, _precision: usize) -> String {
        let payload = if *self { PAYLOAD_ON } else { PAYLOAD_OFF };
        payload.to_owned()
    }
}

impl StateValue for str {
    fn to_payload(&self, _precision: usize) -> String {
        self.to_owned()
    }
}

impl StateValue for String {
    fn to_payload(&self, _precision: usize) -> String {
        self.clone()
    }
}

/// Compact JSON. Object keys come out sorted since `serde_json` keeps them in a
/// `BTreeMap`, so equal documents always give equal payloads.
impl StateValue for serde_json::Value {
    fn to_payload(&self, _precision: usize) -> String {
        self.to_string()
    }
}
