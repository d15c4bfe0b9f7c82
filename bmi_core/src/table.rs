//! # Measurement Table
//!
//! Typed view-model for the tables the GUI and CLI display. A table owns
//! its processed records and the convention that categorized them, and
//! hands out display rows formatted to two decimals.
//!
//! ## Example
//!
//! ```rust
//! use bmi_core::bmi::{CategoryConvention, Measurement};
//! use bmi_core::table::MeasurementTable;
//!
//! let mut table = MeasurementTable::new(CategoryConvention::Standard);
//! table.push(Measurement::new(1.70, 65.0));
//!
//! let rows = table.rows();
//! assert_eq!(rows[0].index, "1");
//! assert_eq!(rows[0].bmi, "22.49");
//! assert_eq!(rows[0].category, "Normal");
//! ```

use serde::{Deserialize, Serialize};

use crate::bmi::{BmiCategory, CategoryConvention, Measurement, ProcessedRecord};

/// Ordered measurement rows, each with its derived BMI and category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementTable {
    convention: CategoryConvention,
    records: Vec<ProcessedRecord>,
}

impl MeasurementTable {
    pub fn new(convention: CategoryConvention) -> Self {
        MeasurementTable {
            convention,
            records: Vec::new(),
        }
    }

    pub fn from_measurements(measurements: &[Measurement], convention: CategoryConvention) -> Self {
        let mut table = MeasurementTable::new(convention);
        table.replace_all(measurements);
        table
    }

    /// Build a table from records that already carry BMI and category,
    /// such as a processed file. The records are kept as given.
    pub fn from_records(records: Vec<ProcessedRecord>, convention: CategoryConvention) -> Self {
        MeasurementTable { convention, records }
    }

    pub fn convention(&self) -> CategoryConvention {
        self.convention
    }

    /// Process and append one measurement, returning the new record.
    pub fn push(&mut self, measurement: Measurement) -> &ProcessedRecord {
        let index = self.records.len();
        self.records.push(measurement.process(self.convention));
        &self.records[index]
    }

    /// Replace every row with freshly processed measurements.
    pub fn replace_all(&mut self, measurements: &[Measurement]) {
        self.records = measurements.iter().map(|m| m.process(self.convention)).collect();
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProcessedRecord] {
        &self.records
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        self.records.iter().map(|r| r.measurement).collect()
    }

    /// Display rows, numbered from 1.
    pub fn rows(&self) -> Vec<TableRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| TableRow::new(i + 1, record))
            .collect()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary::from_records(&self.records)
    }
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub index: String,
    pub height: String,
    pub weight: String,
    pub bmi: String,
    pub category: String,
}

impl TableRow {
    pub fn new(number: usize, record: &ProcessedRecord) -> Self {
        TableRow {
            index: number.to_string(),
            height: format!("{:.2}", record.measurement.height_m),
            weight: format!("{:.2}", record.measurement.weight_kg),
            bmi: format!("{:.2}", record.bmi),
            category: record.category.display_name().to_string(),
        }
    }
}

/// Aggregate figures shown under a processed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub count: usize,
    /// Mean BMI, `None` for an empty table
    pub mean_bmi: Option<f64>,
    /// Count per category, in [`BmiCategory::ALL`] order
    pub by_category: Vec<(BmiCategory, usize)>,
}

impl TableSummary {
    pub fn from_records(records: &[ProcessedRecord]) -> Self {
        let count = records.len();
        let mean_bmi = if count == 0 {
            None
        } else {
            Some(records.iter().map(|r| r.bmi).sum::<f64>() / count as f64)
        };
        let by_category = BmiCategory::ALL
            .iter()
            .map(|&category| (category, records.iter().filter(|r| r.category == category).count()))
            .collect();

        TableSummary {
            count,
            mean_bmi,
            by_category,
        }
    }

    /// Count for one category
    pub fn count_of(&self, category: BmiCategory) -> usize {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Measurement> {
        vec![Measurement::new(1.80, 90.0), Measurement::new(1.60, 45.0)]
    }

    #[test]
    fn test_rows_are_formatted() {
        let table = MeasurementTable::from_measurements(&sample(), CategoryConvention::Standard);
        let rows = table.rows();

        assert_eq!(
            rows[0],
            TableRow {
                index: "1".to_string(),
                height: "1.80".to_string(),
                weight: "90.00".to_string(),
                bmi: "27.78".to_string(),
                category: "Overweight".to_string(),
            }
        );
        assert_eq!(rows[1].index, "2");
        assert_eq!(rows[1].bmi, "17.58");
        assert_eq!(rows[1].category, "Underweight");
    }

    #[test]
    fn test_push_and_clear() {
        let mut table = MeasurementTable::new(CategoryConvention::Standard);
        assert!(table.is_empty());

        let record = *table.push(Measurement::new(1.70, 65.0));
        assert_eq!(record.category, BmiCategory::Normal);
        table.push(Measurement::new(1.70, 95.0));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].index, "2");

        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn test_replace_all_keeps_full_precision() {
        let mut table = MeasurementTable::new(CategoryConvention::Standard);
        table.push(Measurement::new(2.0, 100.0));
        table.replace_all(&[Measurement::new(1.756, 70.555)]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.measurements(), vec![Measurement::new(1.756, 70.555)]);
        assert_eq!(table.rows()[0].height, "1.76");
    }

    #[test]
    fn test_convention_is_applied() {
        // 1.70 m / 72.1 kg → BMI ≈ 24.948
        let m = [Measurement::new(1.70, 72.1)];
        let standard = MeasurementTable::from_measurements(&m, CategoryConvention::Standard);
        let legacy = MeasurementTable::from_measurements(&m, CategoryConvention::Legacy);
        assert_eq!(standard.records()[0].category, BmiCategory::Normal);
        assert_eq!(legacy.records()[0].category, BmiCategory::Obesity);
    }

    #[test]
    fn test_summary() {
        let table = MeasurementTable::from_measurements(&sample(), CategoryConvention::Standard);
        let summary = table.summary();

        assert_eq!(summary.count, 2);
        let mean = summary.mean_bmi.unwrap();
        assert!((mean - (27.78 + 17.58) / 2.0).abs() < 0.01);
        assert_eq!(summary.count_of(BmiCategory::Overweight), 1);
        assert_eq!(summary.count_of(BmiCategory::Underweight), 1);
        assert_eq!(summary.count_of(BmiCategory::Obesity), 0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MeasurementTable::default().summary();
        assert_eq!(summary.count, 0);
        assert!(summary.mean_bmi.is_none());
    }
}
