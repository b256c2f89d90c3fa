// Length units and the synchronized multi-field conversion
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Feet,
    Inches,
    Centimeters,
    Meters,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Feet,
        LengthUnit::Inches,
        LengthUnit::Centimeters,
        LengthUnit::Meters,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Inches => "in",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LengthUnit::Feet => "Feet (ft)",
            LengthUnit::Inches => "Inches (in)",
            LengthUnit::Centimeters => "Centimeters (cm)",
            LengthUnit::Meters => "Meters (m)",
        }
    }

    /// Fixed factor from this unit to meters, the canonical base unit.
    pub fn factor_to_meters(self) -> f64 {
        match self {
            LengthUnit::Feet => 0.3048,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Meters => 1.0,
        }
    }

    pub fn parse(symbol: &str) -> Option<LengthUnit> {
        LengthUnit::ALL.into_iter().find(|u| u.symbol() == symbol)
    }
}

/// The four length fields as entered/displayed. Either all four carry the
/// same physical length or all four are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthValues {
    #[serde(default)]
    pub ft: String,
    #[serde(rename = "in", default)]
    pub inches: String,
    #[serde(default)]
    pub cm: String,
    #[serde(default)]
    pub m: String,
}

impl LengthValues {
    pub fn get(&self, unit: LengthUnit) -> &str {
        match unit {
            LengthUnit::Feet => &self.ft,
            LengthUnit::Inches => &self.inches,
            LengthUnit::Centimeters => &self.cm,
            LengthUnit::Meters => &self.m,
        }
    }

    fn set(&mut self, unit: LengthUnit, value: String) {
        match unit {
            LengthUnit::Feet => self.ft = value,
            LengthUnit::Inches => self.inches = value,
            LengthUnit::Centimeters => self.cm = value,
            LengthUnit::Meters => self.m = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        LengthUnit::ALL.iter().all(|u| self.get(*u).is_empty())
    }
}

/// Input gate for all numeric fields: digits with at most one decimal point.
/// The empty string passes (it clears the field).
pub fn is_decimal_input(raw: &str) -> bool {
    let mut seen_dot = false;
    raw.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

/// Convert an edit of one length field into the full synchronized field set.
///
/// Returns `None` when the input fails validation (the caller keeps its prior
/// state), an all-empty `LengthValues` for empty input, and otherwise all four
/// fields repopulated through the meters base value.
pub fn convert(unit: LengthUnit, raw: &str) -> Option<LengthValues> {
    if !is_decimal_input(raw) {
        return None;
    }
    if raw.is_empty() {
        return Some(LengthValues::default());
    }
    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let meters = value * unit.factor_to_meters();
    let mut fields = LengthValues::default();
    for target in LengthUnit::ALL {
        fields.set(target, format_length(meters / target.factor_to_meters()));
    }
    Some(fields)
}

/// Display formatting: six decimal places, trailing zeros stripped, and a
/// bare trailing dot removed (`1.000000` -> `1`, `1.234500` -> `1.2345`).
pub fn format_length(value: f64) -> String {
    format!("{value:.6}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_length_strips_trailing_zeros() {
        assert_eq!(format_length(1.0), "1");
        assert_eq!(format_length(1.2345), "1.2345");
        assert_eq!(format_length(0.0), "0");
        assert_eq!(format_length(200.0), "200");
    }

    #[test]
    fn test_convert_two_meters() {
        let fields = convert(LengthUnit::Meters, "2").unwrap();
        assert_eq!(fields.ft, "6.56168");
        assert_eq!(fields.inches, "78.740157");
        assert_eq!(fields.cm, "200");
        assert_eq!(fields.m, "2");
    }

    #[test]
    fn test_convert_rejects_invalid_input() {
        assert!(convert(LengthUnit::Meters, "abc").is_none());
        assert!(convert(LengthUnit::Meters, "-3").is_none());
        assert!(convert(LengthUnit::Meters, "1.2.3").is_none());
        assert!(convert(LengthUnit::Meters, "1e3").is_none());
        // a lone dot passes the pattern but does not parse
        assert!(convert(LengthUnit::Meters, ".").is_none());
    }

    #[test]
    fn test_convert_empty_clears_all_fields() {
        let fields = convert(LengthUnit::Centimeters, "").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for unit in LengthUnit::ALL {
            for raw in ["1", "3.5", "0.125", "42", "7.891"] {
                let fields = convert(unit, raw).unwrap();
                let read_back: f64 = fields.get(unit).parse().unwrap();
                let original: f64 = raw.parse().unwrap();
                assert!(
                    (read_back - original).abs() < 1e-6,
                    "{raw} {} round-tripped to {read_back}",
                    unit.symbol()
                );
            }
        }
    }

    #[test]
    fn test_cross_consistency_in_meters() {
        let fields = convert(LengthUnit::Feet, "12.5").unwrap();
        let meters: f64 = fields.m.parse().unwrap();
        for unit in LengthUnit::ALL {
            let value: f64 = fields.get(unit).parse().unwrap();
            assert!((value * unit.factor_to_meters() - meters).abs() < 1e-6);
        }
    }

    #[test]
    fn test_decimal_input_gate() {
        assert!(is_decimal_input(""));
        assert!(is_decimal_input("14.4"));
        assert!(is_decimal_input(".5"));
        assert!(is_decimal_input("5."));
        assert!(!is_decimal_input("14.4.1"));
        assert!(!is_decimal_input("-1"));
        assert!(!is_decimal_input("1,5"));
    }
}
