//! Command-line flags and subcommands.

use std::path::PathBuf;

use bmi_core::bmi::CategoryConvention;
use clap::{Parser, Subcommand};

/// BMI calculator: compute Body Mass Index and manage measurement files.
#[derive(Parser, Debug)]
#[command(name = "bmi", version, about)]
pub struct AppConfig {
    /// Category thresholds: standard (25/30) or legacy (24.9/29.9).
    /// Falls back to the settings file when not given.
    #[arg(long, global = true, env = "BMI_CONVENTION")]
    pub convention: Option<CategoryConvention>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute BMI and category for one measurement. Prompts for any value
    /// not given as a flag.
    Compute {
        /// Height in meters.
        #[arg(long, allow_negative_numbers = true)]
        height: Option<String>,
        /// Weight in kilograms.
        #[arg(long, allow_negative_numbers = true)]
        weight: Option<String>,
    },

    /// Validate a measurement and append it to a raw data file.
    Add {
        /// Data file (created if missing).
        file: PathBuf,
        /// Height in meters.
        #[arg(long, allow_negative_numbers = true)]
        height: String,
        /// Weight in kilograms.
        #[arg(long, allow_negative_numbers = true)]
        weight: String,
    },

    /// Show a data file, raw or processed.
    Show {
        /// Data file to read.
        file: PathBuf,
    },

    /// Compute BMI and category for every line of a raw data file.
    Process {
        /// Raw data file to read.
        file: PathBuf,
        /// Overwrite the file with the processed four-column rows.
        #[arg(long)]
        save: bool,
    },
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_process_with_save() {
        let config = AppConfig::try_parse_from(["bmi", "process", "people.txt", "--save"]).unwrap();
        match config.command {
            Command::Process { file, save } => {
                assert_eq!(file, PathBuf::from("people.txt"));
                assert!(save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_convention() {
        let config =
            AppConfig::try_parse_from(["bmi", "--convention", "legacy", "show", "a.txt"]).unwrap();
        assert_eq!(config.convention, Some(CategoryConvention::Legacy));
        assert!(AppConfig::try_parse_from(["bmi", "--convention", "who", "show", "a.txt"]).is_err());
    }

    #[test]
    fn parse_negative_values() {
        let config =
            AppConfig::try_parse_from(["bmi", "add", "a.txt", "--height", "-1", "--weight", "70"]).unwrap();
        match config.command {
            Command::Add { height, .. } => assert_eq!(height, "-1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verify_command() {
        <AppConfig as clap::CommandFactory>::command().debug_assert();
    }
}
