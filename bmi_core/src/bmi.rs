//! # BMI Calculation
//!
//! Body Mass Index from a height/weight pair, and the lookup that maps a BMI
//! value onto a weight category.
//!
//! ## Formula
//!
//! ```text
//! BMI = weight (kg) / height (m)²
//! ```
//!
//! ## Category Conventions
//!
//! Two threshold sets are in circulation for the category lookup. The
//! [`CategoryConvention::Standard`] set uses half-open bands at 18.5 / 25 / 30.
//! [`CategoryConvention::Legacy`] uses upper bounds of 24.9 and 29.9 and
//! leaves the values in `[24.9, 25)` and `[29.9, 30)` falling through to
//! `Obesity`. The two disagree on those bands, so callers pick one explicitly
//! and [`categorize`] uses `Standard`.
//!
//! ## Example
//!
//! ```rust
//! use bmi_core::bmi::{categorize, compute_bmi, BmiCategory, Measurement};
//!
//! let bmi = compute_bmi(1.70, 65.0);
//! assert!((bmi - 22.49).abs() < 0.01);
//! assert_eq!(categorize(bmi), BmiCategory::Normal);
//!
//! let m = Measurement::parse("1.75", "70.5").unwrap();
//! assert_eq!(m.height_m, 1.75);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Upper bound of the accepted height range, in meters
pub const MAX_HEIGHT_M: f64 = 2.5;

/// Upper bound of the accepted weight range, in kilograms
pub const MAX_WEIGHT_KG: f64 = 300.0;

const MSG_NOT_NUMERIC: &str = "Please enter valid numeric values";
const MSG_NOT_POSITIVE: &str = "Values must be greater than 0";
const MSG_OUT_OF_RANGE: &str = "Values outside normal range";

/// Compute BMI as `weight_kg / height_m²`.
///
/// No bounds checking is done: a zero height produces infinity (or NaN for
/// a zero weight). Run [`Measurement::validate`] first when the inputs come
/// from a user.
pub fn compute_bmi(height_m: f64, weight_kg: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Categorize a BMI value under the [`CategoryConvention::Standard`] thresholds.
pub fn categorize(bmi: f64) -> BmiCategory {
    categorize_with(bmi, CategoryConvention::Standard)
}

/// Categorize a BMI value under an explicit convention.
pub fn categorize_with(bmi: f64, convention: CategoryConvention) -> BmiCategory {
    match convention {
        CategoryConvention::Standard => {
            if bmi < 18.5 {
                BmiCategory::Underweight
            } else if bmi < 25.0 {
                BmiCategory::Normal
            } else if bmi < 30.0 {
                BmiCategory::Overweight
            } else {
                BmiCategory::Obesity
            }
        }
        CategoryConvention::Legacy => {
            if bmi < 18.5 {
                BmiCategory::Underweight
            } else if (18.5..24.9).contains(&bmi) {
                BmiCategory::Normal
            } else if (25.0..29.9).contains(&bmi) {
                BmiCategory::Overweight
            } else {
                // includes the [24.9, 25) and [29.9, 30) gaps
                BmiCategory::Obesity
            }
        }
    }
}

/// Weight category derived from a BMI value.
///
/// Variants are ordered by BMI band, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obesity,
    ];

    /// Label written to processed files and shown in tables
    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BmiCategory {
    type Err = CalcError;

    /// Accepts the English labels and the Spanish labels found in files
    /// written by older versions of the tool.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Underweight" | "Bajo peso" => Ok(BmiCategory::Underweight),
            "Normal" | "Peso normal" => Ok(BmiCategory::Normal),
            "Overweight" | "Sobrepeso" => Ok(BmiCategory::Overweight),
            "Obesity" | "Obesidad" => Ok(BmiCategory::Obesity),
            other => Err(CalcError::invalid_input("category", other, "Unknown BMI category")),
        }
    }
}

/// Threshold set used by [`categorize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryConvention {
    /// 18.5 / 25 / 30 half-open bands
    #[default]
    Standard,
    /// 18.5 / 24.9 / 29.9 upper bounds with fall-through to Obesity
    Legacy,
}

impl CategoryConvention {
    pub const ALL: [CategoryConvention; 2] = [CategoryConvention::Standard, CategoryConvention::Legacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryConvention::Standard => "standard",
            CategoryConvention::Legacy => "legacy",
        }
    }
}

impl fmt::Display for CategoryConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryConvention {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(CategoryConvention::Standard),
            "legacy" => Ok(CategoryConvention::Legacy),
            other => Err(CalcError::invalid_input(
                "convention",
                other,
                "Expected 'standard' or 'legacy'",
            )),
        }
    }
}

/// One height/weight pair.
///
/// ## JSON Example
///
/// ```json
/// { "height_m": 1.75, "weight_kg": 70.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Height in meters
    pub height_m: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
}

impl Measurement {
    pub fn new(height_m: f64, weight_kg: f64) -> Self {
        Measurement { height_m, weight_kg }
    }

    /// Parse form text into a validated measurement.
    ///
    /// Both fields are parsed before any range check, so a non-numeric
    /// weight is reported even when the height is out of range.
    pub fn parse(height_text: &str, weight_text: &str) -> CalcResult<Self> {
        let height_m = parse_number("height_m", height_text)?;
        let weight_kg = parse_number("weight_kg", weight_text)?;
        let measurement = Measurement::new(height_m, weight_kg);
        measurement.validate()?;
        Ok(measurement)
    }

    /// Validate against the accepted ranges: height in (0, 2.5] m and
    /// weight in (0, 300] kg.
    pub fn validate(&self) -> CalcResult<()> {
        if self.height_m <= 0.0 {
            return Err(CalcError::invalid_input("height_m", self.height_m.to_string(), MSG_NOT_POSITIVE));
        }
        if self.weight_kg <= 0.0 {
            return Err(CalcError::invalid_input("weight_kg", self.weight_kg.to_string(), MSG_NOT_POSITIVE));
        }
        if self.height_m > MAX_HEIGHT_M {
            return Err(CalcError::invalid_input("height_m", self.height_m.to_string(), MSG_OUT_OF_RANGE));
        }
        if self.weight_kg > MAX_WEIGHT_KG {
            return Err(CalcError::invalid_input("weight_kg", self.weight_kg.to_string(), MSG_OUT_OF_RANGE));
        }
        Ok(())
    }

    pub fn bmi(&self) -> f64 {
        compute_bmi(self.height_m, self.weight_kg)
    }

    pub fn category(&self, convention: CategoryConvention) -> BmiCategory {
        categorize_with(self.bmi(), convention)
    }

    /// Derive BMI and category for this measurement.
    pub fn process(&self, convention: CategoryConvention) -> ProcessedRecord {
        let bmi = self.bmi();
        ProcessedRecord {
            measurement: *self,
            bmi,
            category: categorize_with(bmi, convention),
        }
    }
}

/// A measurement with its derived BMI and category, i.e. one line of a
/// processed data file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    #[serde(flatten)]
    pub measurement: Measurement,
    pub bmi: f64,
    pub category: BmiCategory,
}

fn parse_number(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::invalid_input(field, trimmed, MSG_NOT_NUMERIC)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bmi_formula() {
        for &(h, w) in &[(1.70, 65.0), (1.5, 45.2), (2.1, 120.0), (0.5, 3.0)] {
            assert_eq!(compute_bmi(h, w), w / (h * h));
        }
    }

    #[test]
    fn test_compute_bmi_zero_height_is_unguarded() {
        assert!(compute_bmi(0.0, 70.0).is_infinite());
        assert!(compute_bmi(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_typical_adult_is_normal() {
        let bmi = compute_bmi(1.70, 65.0);
        assert!((bmi - 22.49).abs() < 0.01);
        assert_eq!(categorize(bmi), BmiCategory::Normal);
    }

    #[test]
    fn test_standard_boundaries() {
        assert_eq!(categorize(18.49999), BmiCategory::Underweight);
        assert_eq!(categorize(18.5), BmiCategory::Normal);
        assert_eq!(categorize(24.99), BmiCategory::Normal);
        assert_eq!(categorize(25.0), BmiCategory::Overweight);
        assert_eq!(categorize(29.99), BmiCategory::Overweight);
        assert_eq!(categorize(30.0), BmiCategory::Obesity);
    }

    #[test]
    fn test_standard_is_monotonic() {
        let mut previous = categorize(5.0);
        let mut bmi = 5.0;
        while bmi < 60.0 {
            let current = categorize(bmi);
            assert!(current >= previous, "category dropped at BMI {}", bmi);
            previous = current;
            bmi += 0.01;
        }
    }

    // The two conventions disagree on [24.9, 25) and [29.9, 30). These
    // assertions pin down each side so a change to either is visible.
    #[test]
    fn test_conventions_diverge_below_25() {
        let bmi = 24.95;
        assert_eq!(categorize_with(bmi, CategoryConvention::Standard), BmiCategory::Normal);
        assert_eq!(categorize_with(bmi, CategoryConvention::Legacy), BmiCategory::Obesity);
    }

    #[test]
    fn test_conventions_diverge_below_30() {
        let bmi = 29.95;
        assert_eq!(categorize_with(bmi, CategoryConvention::Standard), BmiCategory::Overweight);
        assert_eq!(categorize_with(bmi, CategoryConvention::Legacy), BmiCategory::Obesity);
    }

    #[test]
    fn test_conventions_agree_at_25() {
        assert_eq!(categorize_with(25.0, CategoryConvention::Standard), BmiCategory::Overweight);
        assert_eq!(categorize_with(25.0, CategoryConvention::Legacy), BmiCategory::Overweight);
    }

    #[test]
    fn test_legacy_is_not_monotonic() {
        let before_gap = categorize_with(24.95, CategoryConvention::Legacy);
        let after_gap = categorize_with(25.0, CategoryConvention::Legacy);
        assert!(after_gap < before_gap);
    }

    #[test]
    fn test_parse_valid() {
        let m = Measurement::parse(" 1.75 ", "70.5").unwrap();
        assert_eq!(m, Measurement::new(1.75, 70.5));
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = Measurement::parse("abc", "70").unwrap_err();
        assert_eq!(err.user_message(), "Please enter valid numeric values");

        let err = Measurement::parse("3.0", "").unwrap_err();
        assert_eq!(err.user_message(), "Please enter valid numeric values");

        assert!(Measurement::parse("NaN", "70").is_err());
        assert!(Measurement::parse("inf", "70").is_err());
    }

    #[test]
    fn test_parse_ranges() {
        let err = Measurement::parse("0", "70").unwrap_err();
        assert_eq!(err.user_message(), "Values must be greater than 0");

        let err = Measurement::parse("1.7", "-1").unwrap_err();
        assert_eq!(err.user_message(), "Values must be greater than 0");

        let err = Measurement::parse("2.51", "70").unwrap_err();
        assert_eq!(err.user_message(), "Values outside normal range");

        let err = Measurement::parse("1.7", "300.5").unwrap_err();
        assert_eq!(err.user_message(), "Values outside normal range");

        assert!(Measurement::parse("2.5", "300").is_ok());
    }

    #[test]
    fn test_process() {
        let record = Measurement::new(1.80, 90.0).process(CategoryConvention::Standard);
        assert!((record.bmi - 27.78).abs() < 0.01);
        assert_eq!(record.category, BmiCategory::Overweight);

        let record = Measurement::new(1.60, 45.0).process(CategoryConvention::Standard);
        assert!((record.bmi - 17.58).abs() < 0.01);
        assert_eq!(record.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_category_labels() {
        for category in BmiCategory::ALL {
            assert_eq!(category.display_name().parse::<BmiCategory>().unwrap(), category);
        }
        assert_eq!("Sobrepeso".parse::<BmiCategory>().unwrap(), BmiCategory::Overweight);
        assert_eq!("Peso normal".parse::<BmiCategory>().unwrap(), BmiCategory::Normal);
        assert!("Heavy".parse::<BmiCategory>().is_err());
    }

    #[test]
    fn test_convention_parse() {
        assert_eq!("Legacy".parse::<CategoryConvention>().unwrap(), CategoryConvention::Legacy);
        assert_eq!("standard".parse::<CategoryConvention>().unwrap(), CategoryConvention::Standard);
        assert!("who".parse::<CategoryConvention>().is_err());
    }

    #[test]
    fn test_processed_record_json() {
        let record = Measurement::new(1.75, 70.5).process(CategoryConvention::Standard);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["height_m"], 1.75);
        assert_eq!(json["category"], "Normal");
    }
}
