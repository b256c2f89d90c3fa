// Saved calculation snapshots
use super::driver::{CalculationResult, DriverConfig};
use super::units::LengthValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Oldest entries beyond this are dropped on save.
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub area: String,
}

/// Everything captured when a calculation is saved, updated or shared.
/// Only constructible once a result exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationSnapshot {
    pub customer: CustomerInfo,
    pub converter_values: LengthValues,
    pub driver_values: DriverConfig,
    pub results: CalculationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub customer: CustomerInfo,
    pub converter_values: LengthValues,
    pub driver_values: DriverConfig,
    pub results: CalculationResult,
}

impl HistoryEntry {
    pub fn new(id: i64, timestamp: DateTime<Utc>, snapshot: CalculationSnapshot) -> Self {
        Self {
            id,
            timestamp,
            last_modified: None,
            customer: snapshot.customer,
            converter_values: snapshot.converter_values,
            driver_values: snapshot.driver_values,
            results: snapshot.results,
        }
    }

    /// New content under the original identity: id and creation timestamp are
    /// preserved, `last_modified` records the edit.
    pub fn with_update(&self, snapshot: CalculationSnapshot, modified: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            timestamp: self.timestamp,
            last_modified: Some(modified),
            customer: snapshot.customer,
            converter_values: snapshot.converter_values,
            driver_values: snapshot.driver_values,
            results: snapshot.results,
        }
    }

    /// Case-insensitive substring match over customer name and area.
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.customer.customer_name.to_lowercase().contains(&term)
            || self.customer.area.to_lowercase().contains(&term)
    }

    /// Stored values copied out for viewing, sharing or editing. The entry
    /// itself is not mutated.
    pub fn snapshot(&self) -> CalculationSnapshot {
        CalculationSnapshot {
            customer: self.customer.clone(),
            converter_values: self.converter_values.clone(),
            driver_values: self.driver_values.clone(),
            results: self.results.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::driver::{compute_driver_plan, Voltage};
    use crate::domain::units::{convert, LengthUnit};

    fn sample_snapshot(name: &str, area: &str) -> CalculationSnapshot {
        let converter_values = convert(LengthUnit::Meters, "2").unwrap();
        let results = compute_driver_plan(2.0, 14.4, 20.0, 100.0, Voltage::V24).unwrap();
        CalculationSnapshot {
            customer: CustomerInfo {
                customer_name: name.to_string(),
                area: area.to_string(),
            },
            converter_values,
            driver_values: DriverConfig::default(),
            results,
        }
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let entry = HistoryEntry::new(1, Utc::now(), sample_snapshot("Alice", "Living Room"));
        assert!(entry.matches(""));
        assert!(entry.matches("ali"));
        assert!(entry.matches("ALICE"));
        assert!(entry.matches("living"));
        assert!(!entry.matches("kitchen"));
    }

    #[test]
    fn test_update_preserves_identity() {
        let created = Utc::now();
        let entry = HistoryEntry::new(7, created, sample_snapshot("Alice", "Hall"));
        let edited = entry.with_update(sample_snapshot("Bob", "Hall"), Utc::now());
        assert_eq!(edited.id, 7);
        assert_eq!(edited.timestamp, created);
        assert_eq!(edited.customer.customer_name, "Bob");
        assert!(edited.last_modified.is_some());
    }

    #[test]
    fn test_entry_serializes_with_original_field_names() {
        let entry = HistoryEntry::new(1, Utc::now(), sample_snapshot("Alice", "Hall"));
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("customerName").is_some());
        assert!(json.get("converterValues").is_some());
        assert!(json.get("driverValues").is_some());
        assert!(json["converterValues"].get("in").is_some());
        assert!(json["driverValues"].get("powerPerMeter").is_some());
        assert!(json["results"].get("totalPower").is_some());
        // never modified, so the field is absent entirely
        assert!(json.get("lastModified").is_none());
    }
}
