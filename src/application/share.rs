// Share text formatting - deterministic message block for a saved or active
// calculation
use crate::domain::history::CalculationSnapshot;
use crate::domain::units::LengthUnit;

/// Render a snapshot as the fixed-order line block used for sharing:
/// customer/area when present, each non-empty length field, the driver
/// configuration, then the result figures. Pure; depends only on the
/// snapshot passed in.
pub fn format_share_text(snapshot: &CalculationSnapshot) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !snapshot.customer.customer_name.is_empty() {
        lines.push(format!("*Customer:* {}", snapshot.customer.customer_name));
    }
    if !snapshot.customer.area.is_empty() {
        lines.push(format!("*Area:* {}", snapshot.customer.area));
    }

    lines.push(String::new());
    lines.push("*Strip Length:*".to_string());
    for unit in LengthUnit::ALL {
        let value = snapshot.converter_values.get(unit);
        if !value.is_empty() {
            lines.push(format!("- {}: {} {}", unit.label(), value, unit.symbol()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "*Power Consumption:* {} W/m",
        snapshot.driver_values.power_per_meter
    ));
    lines.push(format!(
        "*Driver Wattage:* {} W",
        snapshot.driver_values.driver_wattage
    ));
    lines.push(format!("*Voltage:* {}", snapshot.driver_values.voltage));
    lines.push(format!(
        "*Safety Margin:* {}%",
        snapshot.driver_values.safety_margin
    ));

    let results = &snapshot.results;
    lines.push(String::new());
    lines.push("*Calculation Results:*".to_string());
    lines.push(format!("- Total Power: {} W", results.total_power_display()));
    lines.push(format!(
        "- Recommended Power: {} W",
        results.recommended_power_display()
    ));
    lines.push(format!(
        "- Driver Count: {} x {}W ({})",
        results.driver_count,
        results.driver_power_display(),
        results.voltage
    ));
    match results.efficiency_display() {
        Some(efficiency) => lines.push(format!("- Efficiency: {efficiency}%")),
        None => lines.push("- Efficiency: n/a".to_string()),
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::driver::{compute_driver_plan, DriverConfig, Voltage};
    use crate::domain::history::CustomerInfo;
    use crate::domain::units::convert;

    fn snapshot() -> CalculationSnapshot {
        CalculationSnapshot {
            customer: CustomerInfo {
                customer_name: "Alice".to_string(),
                area: "Living Room".to_string(),
            },
            converter_values: convert(LengthUnit::Meters, "2").unwrap(),
            driver_values: DriverConfig::default(),
            results: compute_driver_plan(2.0, 14.4, 20.0, 100.0, Voltage::V24).unwrap(),
        }
    }

    #[test]
    fn test_share_text_layout() {
        let text = format_share_text(&snapshot());
        let expected = "\
*Customer:* Alice
*Area:* Living Room

*Strip Length:*
- Feet (ft): 6.56168 ft
- Inches (in): 78.740157 in
- Centimeters (cm): 200 cm
- Meters (m): 2 m

*Power Consumption:* 14.4 W/m
*Driver Wattage:* 100 W
*Voltage:* 24V
*Safety Margin:* 20%

*Calculation Results:*
- Total Power: 28.8 W
- Recommended Power: 34.6 W
- Driver Count: 1 x 100W (24V)
- Efficiency: 34.6%";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_customer_lines_omitted_when_empty() {
        let mut snapshot = snapshot();
        snapshot.customer = CustomerInfo::default();
        let text = format_share_text(&snapshot);
        assert!(!text.contains("*Customer:*"));
        assert!(!text.contains("*Area:*"));
        assert!(text.starts_with("\n*Strip Length:*"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(format_share_text(&snapshot()), format_share_text(&snapshot()));
    }
}
