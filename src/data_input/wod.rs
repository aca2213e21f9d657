// src/data_input/wod.rs

use serde_json::{Map, Value};
use std::path::Path;

use crate::constants::WOD_FILE;
use crate::data_input::json_file::require_last_entry;
use crate::error::TelemetryError;
use crate::types::{SeriesPoints, SourceResult};

/// One housekeeping channel carried by a WOD sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WodChannel {
    BattVoltage,
    BattCurrent,
    Current3v3,
    Current5v,
    TempComm,
    TempEps,
    TempBattery,
}

impl WodChannel {
    /// JSON field name in a sample object.
    pub fn field_name(self) -> &'static str {
        match self {
            WodChannel::BattVoltage => "batt_voltage",
            WodChannel::BattCurrent => "batt_current",
            WodChannel::Current3v3 => "current_3v3",
            WodChannel::Current5v => "current_5v",
            WodChannel::TempComm => "temp_comm",
            WodChannel::TempEps => "temp_eps",
            WodChannel::TempBattery => "temp_battery",
        }
    }

    /// Legend label, unit included.
    pub fn label(self) -> &'static str {
        match self {
            WodChannel::BattVoltage => "Battery Voltage (V)",
            WodChannel::BattCurrent => "Battery Current (mA)",
            WodChannel::Current3v3 => "3.3V Bus Current (mA)",
            WodChannel::Current5v => "5V Bus Current (mA)",
            WodChannel::TempComm => "Comm Temp (°C)",
            WodChannel::TempEps => "EPS Temp (°C)",
            WodChannel::TempBattery => "Battery Temp (°C)",
        }
    }
}

/// A single whole-orbit-data sample. Channels missing from the sample are `None`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WodSample {
    pub time_sec: Option<f64>,
    pub batt_voltage: Option<f64>,
    pub batt_current: Option<f64>,
    pub current_3v3: Option<f64>,
    pub current_5v: Option<f64>,
    pub temp_comm: Option<f64>,
    pub temp_eps: Option<f64>,
    pub temp_battery: Option<f64>,
}

impl WodSample {
    fn from_object(object: &Map<String, Value>) -> Self {
        let number = |name: &str| object.get(name).and_then(Value::as_f64);
        Self {
            time_sec: number("time"),
            batt_voltage: number(WodChannel::BattVoltage.field_name()),
            batt_current: number(WodChannel::BattCurrent.field_name()),
            current_3v3: number(WodChannel::Current3v3.field_name()),
            current_5v: number(WodChannel::Current5v.field_name()),
            temp_comm: number(WodChannel::TempComm.field_name()),
            temp_eps: number(WodChannel::TempEps.field_name()),
            temp_battery: number(WodChannel::TempBattery.field_name()),
        }
    }

    pub fn channel(&self, channel: WodChannel) -> Option<f64> {
        match channel {
            WodChannel::BattVoltage => self.batt_voltage,
            WodChannel::BattCurrent => self.batt_current,
            WodChannel::Current3v3 => self.current_3v3,
            WodChannel::Current5v => self.current_5v,
            WodChannel::TempComm => self.temp_comm,
            WodChannel::TempEps => self.temp_eps,
            WodChannel::TempBattery => self.temp_battery,
        }
    }
}

/// The most recent WOD batch, in sample order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WodBatch {
    pub samples: Vec<WodSample>,
}

impl WodBatch {
    /// Parses one batch: a JSON list of sample objects.
    pub fn from_value(batch: &Value, path: &Path) -> Result<Self, TelemetryError> {
        let malformed = |reason: String| TelemetryError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let entries = batch
            .as_array()
            .ok_or_else(|| malformed("WOD batch is not a list".to_string()))?;

        let samples = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .as_object()
                    .map(WodSample::from_object)
                    .ok_or_else(|| malformed(format!("WOD sample {index} is not an object")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { samples })
    }

    /// Timestamps are used only when every sample carries one.
    pub fn has_timestamps(&self) -> bool {
        !self.samples.is_empty() && self.samples.iter().all(|s| s.time_sec.is_some())
    }

    pub fn x_label(&self) -> &'static str {
        if self.has_timestamps() {
            "Time (s)"
        } else {
            "Sample"
        }
    }

    /// `(x, value)` points for one channel, skipping samples without a value.
    pub fn series(&self, channel: WodChannel) -> SeriesPoints {
        let use_time = self.has_timestamps();
        self.samples
            .iter()
            .enumerate()
            .filter_map(|(index, sample)| {
                let x = if use_time {
                    sample.time_sec?
                } else {
                    index as f64
                };
                sample.channel(channel).map(|value| (x, value))
            })
            .collect()
    }
}

/// Loads the last batch from `wod_data.json` in `data_dir`.
pub fn load_wod(data_dir: &Path) -> SourceResult<WodBatch> {
    let path = data_dir.join(WOD_FILE);
    let last_batch = require_last_entry(&path)?;
    WodBatch::from_value(&last_batch, &path)
}


// src/data_input/wod.rs
