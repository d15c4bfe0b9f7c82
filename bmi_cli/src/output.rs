//! Terminal and JSON output.

use std::path::Path;

use bmi_core::bmi::{CategoryConvention, ProcessedRecord};
use bmi_core::record_store::RecordFormat;
use bmi_core::table::{MeasurementTable, TableSummary};
use serde::Serialize;

const HEADERS: [&str; 5] = ["#", "Height (m)", "Weight (kg)", "BMI", "Category"];

/// JSON document printed for `show` and `process`.
#[derive(Debug, Serialize)]
pub struct TableReport<'a> {
    pub path: String,
    pub format: RecordFormat,
    /// Thresholds that produced the categories; `None` when they were read
    /// from a processed file as written
    pub convention: Option<CategoryConvention>,
    pub records: &'a [ProcessedRecord],
    pub summary: TableSummary,
}

impl<'a> TableReport<'a> {
    pub fn new(
        path: &Path,
        format: RecordFormat,
        convention: Option<CategoryConvention>,
        table: &'a MeasurementTable,
    ) -> Self {
        TableReport {
            path: path.display().to_string(),
            format,
            convention,
            records: table.records(),
            summary: table.summary(),
        }
    }
}

/// First line of a text report, naming where the categories came from.
#[must_use]
pub fn format_heading(
    path: &Path,
    format: RecordFormat,
    convention: Option<CategoryConvention>,
    count: usize,
) -> String {
    let source = match convention {
        Some(convention) => format!("{convention} thresholds"),
        None => "categories as written".to_string(),
    };
    format!(
        "{}: {} format, {} records, {}",
        path.display(),
        format.display_name(),
        count,
        source
    )
}

/// Render a table with right-aligned numeric columns.
#[must_use]
pub fn format_table(table: &MeasurementTable) -> String {
    let rows: Vec<[String; 5]> = table
        .rows()
        .into_iter()
        .map(|r| [r.index, r.height, r.weight, r.bmi, r.category])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(i, (cell, width))| {
            // category column reads better left-aligned
            if i == cells.len() - 1 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// One-line summary printed under a table.
#[must_use]
pub fn format_summary(summary: &TableSummary) -> String {
    let mean = summary
        .mean_bmi
        .map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}"));
    let counts = summary
        .by_category
        .iter()
        .map(|(category, n)| format!("{category}: {n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} records, mean BMI {}; {}", summary.count, mean, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmi_core::bmi::{CategoryConvention, Measurement};

    fn sample() -> MeasurementTable {
        MeasurementTable::from_measurements(
            &[Measurement::new(1.80, 90.0), Measurement::new(1.60, 45.0)],
            CategoryConvention::Standard,
        )
    }

    #[test]
    fn table_has_header_and_rows() {
        let text = format_table(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Height (m)"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("27.78"));
        assert!(lines[2].ends_with("Overweight"));
        assert!(lines[3].ends_with("Underweight"));
    }

    #[test]
    fn empty_table_prints_header_only() {
        let text = format_table(&MeasurementTable::default());
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn heading_names_category_source() {
        let path = Path::new("people.txt");
        assert_eq!(
            format_heading(path, RecordFormat::Raw, Some(CategoryConvention::Legacy), 3),
            "people.txt: raw format, 3 records, legacy thresholds"
        );
        assert_eq!(
            format_heading(path, RecordFormat::Processed, None, 2),
            "people.txt: processed format, 2 records, categories as written"
        );
    }

    #[test]
    fn report_convention_is_optional() {
        let table = sample();
        let report = TableReport::new(Path::new("people.txt"), RecordFormat::Processed, None, &table);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["convention"].is_null());
        assert_eq!(value["summary"]["count"], 2);
    }

    #[test]
    fn summary_line() {
        let line = format_summary(&sample().summary());
        assert!(line.starts_with("2 records, mean BMI 22.68"));
        assert!(line.contains("Overweight: 1"));
        assert!(line.contains("Obesity: 0"));
    }
}
