// Active calculation session - field edits, recomputation, edit-mode
// transitions and the save/update lifecycle
use crate::application::history_store::HistoryStore;
use crate::domain::driver::{
    self, CalculationResult, DriverConfig, Voltage, CUSTOM_PRESET, DRIVER_WATTAGE_PRESETS,
    POWER_PRESETS,
};
use crate::domain::history::{CalculationSnapshot, CustomerInfo, HistoryEntry};
use crate::domain::units::{self, LengthUnit, LengthValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    Editing {
        entry_id: i64,
    },
}

/// The working fields the presentation layer edits. The result is re-derived
/// after every accepted edit; it is never stored independently of its inputs
/// except inside a history snapshot.
#[derive(Debug, Default)]
pub struct CalculatorSession {
    converter_values: LengthValues,
    last_edited: Option<LengthUnit>,
    driver_values: DriverConfig,
    customer: CustomerInfo,
    results: Option<CalculationResult>,
    mode: SessionMode,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn converter_values(&self) -> &LengthValues {
        &self.converter_values
    }

    pub fn last_edited(&self) -> Option<LengthUnit> {
        self.last_edited
    }

    pub fn driver_values(&self) -> &DriverConfig {
        &self.driver_values
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn results(&self) -> Option<&CalculationResult> {
        self.results.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Apply an edit to one length field. Invalid input is rejected and the
    /// session is left untouched; empty input clears all four fields.
    pub fn edit_length(&mut self, unit: LengthUnit, raw: &str) -> bool {
        let Some(values) = units::convert(unit, raw) else {
            return false;
        };
        self.last_edited = if values.is_empty() { None } else { Some(unit) };
        self.converter_values = values;
        self.recompute();
        true
    }

    pub fn set_customer_name(&mut self, value: &str) {
        self.customer.customer_name = value.to_string();
    }

    pub fn set_area(&mut self, value: &str) {
        self.customer.area = value.to_string();
    }

    pub fn set_power_per_meter(&mut self, raw: &str) -> bool {
        if !units::is_decimal_input(raw) {
            return false;
        }
        self.driver_values.power_per_meter = raw.to_string();
        self.recompute();
        true
    }

    pub fn set_safety_margin(&mut self, raw: &str) -> bool {
        if !units::is_decimal_input(raw) {
            return false;
        }
        self.driver_values.safety_margin = raw.to_string();
        self.recompute();
        true
    }

    pub fn set_driver_wattage(&mut self, raw: &str) -> bool {
        if !units::is_decimal_input(raw) {
            return false;
        }
        self.driver_values.driver_wattage = raw.to_string();
        self.recompute();
        true
    }

    pub fn set_voltage(&mut self, voltage: Voltage) {
        self.driver_values.voltage = voltage;
        self.recompute();
    }

    /// A known preset copies its value into the numeric field; `custom`
    /// keeps the field as typed. Unknown tags are rejected.
    pub fn select_power_preset(&mut self, preset: &str) -> bool {
        if preset != CUSTOM_PRESET && !POWER_PRESETS.iter().any(|(value, _)| *value == preset) {
            return false;
        }
        if preset != CUSTOM_PRESET {
            self.driver_values.power_per_meter = preset.to_string();
        }
        self.driver_values.power_preset = preset.to_string();
        self.recompute();
        true
    }

    pub fn select_driver_wattage_preset(&mut self, preset: &str) -> bool {
        if preset != CUSTOM_PRESET
            && !DRIVER_WATTAGE_PRESETS.iter().any(|(value, _)| *value == preset)
        {
            return false;
        }
        if preset != CUSTOM_PRESET {
            self.driver_values.driver_wattage = preset.to_string();
        }
        self.driver_values.driver_wattage_preset = preset.to_string();
        self.recompute();
        true
    }

    /// Restore every field to its initial state. The edit mode is a separate
    /// concern and is left as is; see `cancel_edit`.
    pub fn reset(&mut self) {
        let mode = self.mode;
        *self = Self::default();
        self.mode = mode;
    }

    /// Copy a stored entry into the working fields for viewing or sharing.
    /// The stored entry is not mutated; any edit mode is left.
    pub fn load_entry(&mut self, entry: &HistoryEntry) {
        self.apply_snapshot(entry.snapshot());
        self.mode = SessionMode::Idle;
    }

    /// Copy a stored entry into the working fields as the basis of an edit.
    pub fn begin_edit(&mut self, entry: &HistoryEntry) {
        self.apply_snapshot(entry.snapshot());
        self.mode = SessionMode::Editing { entry_id: entry.id };
    }

    pub fn cancel_edit(&mut self) {
        self.mode = SessionMode::Idle;
        self.reset();
    }

    /// Snapshot of the current fields; absent until a result exists.
    pub fn snapshot(&self) -> Option<CalculationSnapshot> {
        Some(CalculationSnapshot {
            customer: self.customer.clone(),
            converter_values: self.converter_values.clone(),
            driver_values: self.driver_values.clone(),
            results: self.results.clone()?,
        })
    }

    /// Save the current calculation as a new history entry. A session with no
    /// computed result is a no-op. The store persists before the session
    /// resets, so the just-saved entry can never be lost to the reset.
    pub async fn save_to_history(&mut self, store: &mut HistoryStore) -> Option<i64> {
        let snapshot = self.snapshot()?;
        let id = store.create(snapshot).await;
        self.reset();
        Some(id)
    }

    /// Write the current fields back into the entry being edited, then leave
    /// edit mode and reset. Returns the entry id when the update applied.
    pub async fn save_changes(&mut self, store: &mut HistoryStore) -> Option<i64> {
        let SessionMode::Editing { entry_id } = self.mode else {
            return None;
        };
        let snapshot = self.snapshot()?;
        let updated = store.update(entry_id, snapshot).await;
        self.mode = SessionMode::Idle;
        self.reset();
        updated.then_some(entry_id)
    }

    fn apply_snapshot(&mut self, snapshot: CalculationSnapshot) {
        self.customer = snapshot.customer;
        self.converter_values = snapshot.converter_values;
        self.driver_values = snapshot.driver_values;
        self.results = Some(snapshot.results);
        self.last_edited = None;
    }

    /// Re-derive the result from the raw fields; any missing or unparsable
    /// input clears it.
    fn recompute(&mut self) {
        self.results = self.parse_inputs().and_then(|(length, power, margin, wattage)| {
            driver::compute_driver_plan(length, power, margin, wattage, self.driver_values.voltage)
        });
    }

    fn parse_inputs(&self) -> Option<(f64, f64, f64, f64)> {
        Some((
            parse_field(&self.converter_values.m)?,
            parse_field(&self.driver_values.power_per_meter)?,
            parse_field(&self.driver_values.safety_margin)?,
            parse_field(&self.driver_values.driver_wattage)?,
        ))
    }
}

fn parse_field(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
