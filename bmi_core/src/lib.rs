//! # bmi_core - BMI Calculation Engine
//!
//! `bmi_core` holds everything in the BMI calculator that is not user
//! interface: the BMI formula and category lookup, the tab-separated record
//! store, the table view-model the front-ends render, and user settings.
//! The GUI (`bmi_gui`) and the CLI (`bmi_cli`) are thin layers over it.
//!
//! ## Quick Start
//!
//! ```rust
//! use bmi_core::bmi::{CategoryConvention, Measurement};
//! use bmi_core::table::MeasurementTable;
//!
//! let measurement = Measurement::parse("1.80", "90")?;
//! let table = MeasurementTable::from_measurements(&[measurement], CategoryConvention::Standard);
//!
//! let json = serde_json::to_string_pretty(table.records()).unwrap();
//! assert!(json.contains("Overweight"));
//! # Ok::<(), bmi_core::errors::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`bmi`] - BMI formula, categories, measurements
//! - [`record_store`] - Raw and processed data files
//! - [`table`] - Display rows and summaries
//! - [`settings`] - Persisted preferences
//! - [`errors`] - Structured error types

pub mod bmi;
pub mod errors;
pub mod record_store;
pub mod settings;
pub mod table;

// Re-export commonly used types at crate root for convenience
pub use bmi::{categorize, categorize_with, compute_bmi, BmiCategory, CategoryConvention, Measurement, ProcessedRecord};
pub use errors::{CalcError, CalcResult};
pub use record_store::{append, load, load_or_empty, load_processed, overwrite_with_processed, RecordFormat};
pub use settings::{AppSettings, ThemeMode};
pub use table::{MeasurementTable, TableRow, TableSummary};
