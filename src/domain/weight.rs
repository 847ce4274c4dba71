//! Shipment weight parsing. Everything downstream works in kilograms.

use thiserror::Error;

/// Kilograms per avoirdupois pound.
pub const KG_PER_LB: f64 = 0.453592;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum WeightFormatError {
    #[error("weight is empty")]
    Empty,
    #[error("'{0}' is not a weight (expected e.g. 1000, 1000kg or 2204 lbs)")]
    Malformed(String),
    #[error("weight must not be negative: {0}")]
    Negative(String),
}

/// Parse a user supplied weight into kilograms.
///
/// Accepts a bare number (kg), a `kg` suffix or a `lb`/`lbs` suffix, with any
/// surrounding whitespace and in any letter case.
pub fn parse_weight(input: &str) -> Result<f64, WeightFormatError> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(WeightFormatError::Empty);
    }

    let (number, factor) = if let Some(rest) = normalized.strip_suffix("lbs") {
        (rest, KG_PER_LB)
    } else if let Some(rest) = normalized.strip_suffix("lb") {
        (rest, KG_PER_LB)
    } else if let Some(rest) = normalized.strip_suffix("kg") {
        (rest, 1.0)
    } else {
        (normalized.as_str(), 1.0)
    };

    let number = number.trim();
    // f64::from_str also accepts "inf" and "nan"; neither is a weight.
    let value: f64 = number
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| WeightFormatError::Malformed(input.trim().to_string()))?;

    if value < 0.0 {
        return Err(WeightFormatError::Negative(input.trim().to_string()));
    }

    Ok(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bare_number_and_kg_suffix_agree() {
        assert_eq!(parse_weight("1000"), Ok(1000.0));
        assert_eq!(parse_weight("1000kg"), Ok(1000.0));
        assert_eq!(parse_weight(" 1000 KG "), Ok(1000.0));
    }

    #[test]
    fn pounds_convert_to_kilograms() {
        let kg = parse_weight("2204.62 lbs").unwrap();
        assert_abs_diff_eq!(kg, 1000.0, epsilon = 0.5);
        let single = parse_weight("1LB").unwrap();
        assert_abs_diff_eq!(single, KG_PER_LB, epsilon = 1e-12);
    }

    #[test]
    fn zero_is_a_valid_weight() {
        assert_eq!(parse_weight("0"), Ok(0.0));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(matches!(parse_weight("abc"), Err(WeightFormatError::Malformed(_))));
        assert!(matches!(parse_weight("lbs"), Err(WeightFormatError::Malformed(_))));
        assert!(matches!(parse_weight("10 tons"), Err(WeightFormatError::Malformed(_))));
        assert!(matches!(parse_weight("10kg extra"), Err(WeightFormatError::Malformed(_))));
        assert!(matches!(parse_weight("inf"), Err(WeightFormatError::Malformed(_))));
        assert!(matches!(parse_weight("NaN kg"), Err(WeightFormatError::Malformed(_))));
    }

    #[test]
    fn rejects_empty_and_negative_input() {
        assert_eq!(parse_weight("   "), Err(WeightFormatError::Empty));
        assert!(matches!(parse_weight("-5 kg"), Err(WeightFormatError::Negative(_))));
    }
}
