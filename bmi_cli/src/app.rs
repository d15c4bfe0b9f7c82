//! Subcommand dispatch.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use bmi_core::bmi::{CategoryConvention, Measurement};
use bmi_core::record_store::{self, RecordFormat};
use bmi_core::settings::{settings_path, AppSettings};
use bmi_core::table::MeasurementTable;

use crate::config::{AppConfig, Command};
use crate::output::{format_heading, format_summary, format_table, TableReport};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let settings = AppSettings::load_or_default(&settings_path());
    let convention = config.convention.unwrap_or(settings.convention);
    info!(%convention, "categorizing BMI values");

    match &config.command {
        Command::Compute { height, weight } => {
            let height = match height {
                Some(h) => h.clone(),
                None => prompt("Height (m) [e.g. 1.75]: ")?,
            };
            let weight = match weight {
                Some(w) => w.clone(),
                None => prompt("Weight (kg) [e.g. 70.5]: ")?,
            };
            compute(&height, &weight, convention, config.json)
        }
        Command::Add { file, height, weight } => add(file, height, weight, convention, config.json),
        Command::Show { file } => show(file, convention, config.json),
        Command::Process { file, save } => process(file, *save, convention, config.json),
    }
}

fn compute(height: &str, weight: &str, convention: CategoryConvention, json: bool) -> Result<()> {
    let record = Measurement::parse(height, weight)?.process(convention);

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Height:   {:.2} m", record.measurement.height_m);
        println!("Weight:   {:.2} kg", record.measurement.weight_kg);
        println!("BMI:      {:.2}", record.bmi);
        println!("Category: {}", record.category);
    }
    Ok(())
}

fn add(file: &Path, height: &str, weight: &str, convention: CategoryConvention, json: bool) -> Result<()> {
    let measurement = Measurement::parse(height, weight)?;
    record_store::append(file, &measurement)
        .with_context(|| format!("could not add measurement to {}", file.display()))?;
    info!(path = %file.display(), "measurement appended");

    let record = measurement.process(convention);
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!(
            "Added {} m, {} kg (BMI {:.2}, {}) to {}",
            record_store::format_number(measurement.height_m),
            record_store::format_number(measurement.weight_kg),
            record.bmi,
            record.category,
            file.display()
        );
    }
    Ok(())
}

fn show(file: &Path, convention: CategoryConvention, json: bool) -> Result<()> {
    let format = record_store::detect_format(file)?;
    match format {
        RecordFormat::Raw => {
            let table = MeasurementTable::from_measurements(&record_store::load(file)?, convention);
            print_table(file, format, Some(convention), &table, json)
        }
        RecordFormat::Processed => {
            // Categories stay as written, whatever thresholds produced them
            let table = MeasurementTable::from_records(record_store::load_processed(file)?, convention);
            print_table(file, format, None, &table, json)
        }
    }
}

fn process(file: &Path, save: bool, convention: CategoryConvention, json: bool) -> Result<()> {
    let measurements = record_store::load(file)?;
    let table = MeasurementTable::from_measurements(&measurements, convention);

    if save {
        record_store::overwrite_with_processed(file, table.records())
            .with_context(|| format!("could not save results to {}", file.display()))?;
        info!(path = %file.display(), count = table.len(), "processed file saved");
    }

    print_table(file, RecordFormat::Processed, Some(convention), &table, json)?;
    if save && !json {
        println!("Saved {} processed records to {}", table.len(), file.display());
    }
    Ok(())
}

fn print_table(
    file: &Path,
    format: RecordFormat,
    convention: Option<CategoryConvention>,
    table: &MeasurementTable,
    json: bool,
) -> Result<()> {
    if json {
        let report = TableReport::new(file, format, convention, table);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format_heading(file, format, convention, table.len()));
    print!("{}", format_table(table));
    println!("{}", format_summary(&table.summary()));
    Ok(())
}

/// Ask for one value. The prompt goes to stderr so stdout stays parseable.
fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    io::stderr().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        anyhow::bail!("no input given");
    }
    Ok(input.trim().to_string())
}
