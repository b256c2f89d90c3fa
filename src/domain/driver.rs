// Driver sizing - power totals, driver count and utilization
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common LED strip power consumption values (W/m)
pub const POWER_PRESETS: &[(&str, &str)] = &[
    ("14.4", "14.4 W/m (Standard RGB)"),
    ("24", "24 W/m (High Density)"),
    ("36", "36 W/m (Ultra Bright)"),
    ("48", "48 W/m (Commercial Grade)"),
    ("60", "60 W/m (Professional)"),
];

/// Common driver wattages
pub const DRIVER_WATTAGE_PRESETS: &[(&str, &str)] = &[
    ("30", "30W"),
    ("50", "50W"),
    ("75", "75W"),
    ("100", "100W"),
    ("150", "150W"),
    ("200", "200W"),
    ("300", "300W"),
    ("350", "350W"),
];

/// Preset tag meaning "keep whatever is in the numeric field".
pub const CUSTOM_PRESET: &str = "custom";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voltage {
    #[serde(rename = "12V")]
    V12,
    #[default]
    #[serde(rename = "24V")]
    V24,
}

impl Voltage {
    pub fn parse(raw: &str) -> Option<Voltage> {
        match raw {
            "12V" | "12v" | "12" => Some(Voltage::V12),
            "24V" | "24v" | "24" => Some(Voltage::V24),
            _ => None,
        }
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Voltage::V12 => write!(f, "12V"),
            Voltage::V24 => write!(f, "24V"),
        }
    }
}

/// Driver inputs as entered. Numeric fields hold the raw decimal strings so
/// an in-progress edit (or a cleared field) is representable; the preset tags
/// only record which dropdown choice last filled the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverConfig {
    pub power_per_meter: String,
    pub power_preset: String,
    pub voltage: Voltage,
    pub safety_margin: String,
    pub driver_wattage: String,
    pub driver_wattage_preset: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            power_per_meter: "14.4".to_string(),
            power_preset: "14.4".to_string(),
            voltage: Voltage::V24,
            safety_margin: "20".to_string(),
            driver_wattage: "100".to_string(),
            driver_wattage_preset: "100".to_string(),
        }
    }
}

/// Derived sizing figures, kept at full precision. Display rounding happens
/// at the formatting edge so repeated recomputation never drifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_power: f64,
    pub recommended_power: f64,
    pub driver_count: u32,
    pub driver_power: f64,
    pub voltage: Voltage,
    pub length_in_meters: f64,
    /// `None` when `driver_count` is 0 (zero load), where utilization is
    /// indeterminate rather than a number.
    pub efficiency: Option<f64>,
}

impl CalculationResult {
    pub fn total_power_display(&self) -> String {
        format!("{:.1}", self.total_power)
    }

    pub fn recommended_power_display(&self) -> String {
        format!("{:.1}", self.recommended_power)
    }

    pub fn driver_power_display(&self) -> String {
        format!("{:.0}", self.driver_power)
    }

    pub fn length_display(&self) -> String {
        format!("{:.2}", self.length_in_meters)
    }

    pub fn efficiency_display(&self) -> Option<String> {
        self.efficiency.map(|e| format!("{e:.1}"))
    }
}

/// Size drivers for a strip: total load, safety-margined load, and how many
/// drivers of the chosen wattage cover it.
///
/// Returns `None` when any numeric input is non-finite or the driver wattage
/// is not positive; absence of a result is the signal, no error is raised.
/// A zero-length strip yields `driver_count` 0 with no efficiency figure.
pub fn compute_driver_plan(
    length_meters: f64,
    power_per_meter: f64,
    safety_margin_percent: f64,
    driver_wattage: f64,
    voltage: Voltage,
) -> Option<CalculationResult> {
    let inputs = [
        length_meters,
        power_per_meter,
        safety_margin_percent,
        driver_wattage,
    ];
    if inputs.iter().any(|v| !v.is_finite()) || driver_wattage <= 0.0 {
        return None;
    }

    let total_power = length_meters * power_per_meter;
    let recommended_power = total_power * (1.0 + safety_margin_percent / 100.0);
    let driver_count = (recommended_power / driver_wattage).ceil() as u32;
    let efficiency = if driver_count == 0 {
        None
    } else {
        Some(recommended_power / (driver_count as f64 * driver_wattage) * 100.0)
    };

    Some(CalculationResult {
        total_power,
        recommended_power,
        driver_count,
        driver_power: driver_wattage,
        voltage,
        length_in_meters: length_meters,
        efficiency,
    })
}
