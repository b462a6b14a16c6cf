// Telemetry domain models - raw vendor messages and normalized samples
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameter names carrying digital input channels (din1, din2, ...).
const DIGITAL_INPUT_PREFIX: &str = "din";
/// Parameter names carrying analog input channels (ain1, ain2, ...).
const ANALOG_INPUT_PREFIX: &str = "ain";
/// Driver id reported when no driver tag is present on the message.
const UNKNOWN_DRIVER_ID: &str = "0";

/// One raw message as the vendor delivers it: unix timestamp, an optional
/// GPS block, and the open-ended parameter map. Immutable once received.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "t", default)]
    pub timestamp: i64,
    #[serde(rename = "pos", default)]
    pub position: Option<Position>,
    #[serde(rename = "p", default)]
    pub params: Params,
}

/// GPS block of a raw message. The vendor uses single-letter keys:
/// y/x are latitude/longitude, s is speed, c is course, z is altitude,
/// sc is the satellite count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Position {
    #[serde(rename = "y", default)]
    pub latitude: f64,
    #[serde(rename = "x", default)]
    pub longitude: f64,
    #[serde(rename = "s", default)]
    pub speed: f64,
    #[serde(rename = "c", default)]
    pub course: f64,
    #[serde(rename = "z", default)]
    pub altitude: f64,
    #[serde(rename = "sc", default)]
    pub satellites: u32,
}

/// A single vendor parameter value. Devices report numbers for most
/// channels, but flags and driver tags show up as booleans or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            ParamValue::Number(value) => Some(*value),
            ParamValue::Text(value) => value.parse().ok(),
        }
    }

    /// Loose truthiness matching the vendor's untyped payloads: non-zero
    /// numbers and non-empty strings count as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Bool(value) => *value,
            ParamValue::Number(value) => *value != 0.0,
            ParamValue::Text(value) => !value.is_empty(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            ParamValue::Bool(value) => value.to_string(),
            ParamValue::Number(value) if value.fract() == 0.0 => format!("{}", *value as i64),
            ParamValue::Number(value) => value.to_string(),
            ParamValue::Text(value) => value.clone(),
        }
    }
}

/// The open-ended parameter map with typed accessors for the reserved keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, ParamValue>);

impl Params {
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Numeric read with the missing-field default of zero.
    pub fn number(&self, key: &str) -> f64 {
        self.0
            .get(key)
            .and_then(ParamValue::as_number)
            .unwrap_or(0.0)
    }

    /// Boolean read with the missing-field default of false.
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(ParamValue::is_truthy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }
}

/// Normalized, fixed-shape projection of one raw message. One sample per
/// message, order preserved; missing numerics default to zero, missing
/// booleans to false.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub course: f64,
    pub altitude: f64,
    pub satellites: u32,
    pub odometer: f64,
    pub engine_on: bool,
    pub fuel_level: f64,
    pub power_voltage: f64,
    pub battery_voltage: f64,
    pub gsm_signal: f64,
    pub temperature: f64,
    pub harsh_acceleration: u32,
    pub harsh_braking: u32,
    pub harsh_cornering: u32,
    /// Idling increment reported on this message, in seconds.
    pub idling_time: f64,
    pub driver_id: String,
    pub digital_inputs: HashMap<String, bool>,
    pub analog_inputs: HashMap<String, f64>,
    /// Full parameter map retained for lossless passthrough.
    pub raw_params: Params,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            timestamp: DateTime::UNIX_EPOCH,
            latitude: 0.0,
            longitude: 0.0,
            speed: 0.0,
            course: 0.0,
            altitude: 0.0,
            satellites: 0,
            odometer: 0.0,
            engine_on: false,
            fuel_level: 0.0,
            power_voltage: 0.0,
            battery_voltage: 0.0,
            gsm_signal: 0.0,
            temperature: 0.0,
            harsh_acceleration: 0,
            harsh_braking: 0,
            harsh_cornering: 0,
            idling_time: 0.0,
            driver_id: UNKNOWN_DRIVER_ID.to_string(),
            digital_inputs: HashMap::new(),
            analog_inputs: HashMap::new(),
            raw_params: Params::default(),
        }
    }
}

impl Sample {
    pub fn from_message(message: &RawMessage) -> Self {
        let position = message.position.clone().unwrap_or_default();
        let params = &message.params;

        let digital_inputs = params
            .iter()
            .filter(|(key, _)| key.starts_with(DIGITAL_INPUT_PREFIX))
            .map(|(key, value)| (key.clone(), value.is_truthy()))
            .collect();
        let analog_inputs = params
            .iter()
            .filter(|(key, _)| key.starts_with(ANALOG_INPUT_PREFIX))
            .map(|(key, value)| (key.clone(), value.as_number().unwrap_or(0.0)))
            .collect();

        let driver_id = params
            .get("avl_driver")
            .filter(|value| value.is_truthy())
            .or_else(|| params.get("driver_code").filter(|value| value.is_truthy()))
            .map(ParamValue::to_text)
            .unwrap_or_else(|| UNKNOWN_DRIVER_ID.to_string());

        // pcb_temp wins over the generic temperature channel
        let temperature = match params.number("pcb_temp") {
            t if t != 0.0 => t,
            _ => params.number("temperature"),
        };

        Self {
            timestamp: DateTime::from_timestamp(message.timestamp, 0).unwrap_or_default(),
            latitude: position.latitude,
            longitude: position.longitude,
            speed: position.speed,
            course: position.course,
            altitude: position.altitude,
            satellites: position.satellites,
            odometer: params.number("odometer"),
            engine_on: params.flag("engine_on") || params.flag("ignition"),
            fuel_level: params.number("fuel_level"),
            power_voltage: params.number("power"),
            battery_voltage: params.number("battery"),
            gsm_signal: params.number("gsm_signal"),
            temperature,
            harsh_acceleration: params.number("harsh_acceleration") as u32,
            harsh_braking: params.number("harsh_braking") as u32,
            harsh_cornering: params.number("harsh_cornering") as u32,
            idling_time: params.number("idling_time"),
            driver_id,
            digital_inputs,
            analog_inputs,
            raw_params: params.clone(),
        }
    }
}

/// Projects a raw message sequence into samples of equal length and order.
pub fn normalize_messages(messages: &[RawMessage]) -> Vec<Sample> {
    messages.iter().map(Sample::from_message).collect()
}
