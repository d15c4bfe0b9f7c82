//! UI module for the BMI calculator
//!
//! # Panel Structure
//! - `sidebar` - Left menu: Enter Data, Process Data, Toggle Theme, Exit
//! - `welcome` - Placeholder shown before a menu item is picked
//! - `entry_view` - Height/weight form and the table of entered rows
//! - `process_view` - File picker, raw table, processed table, save
//! - `status_bar` - Bottom status messages
//!
//! # Shared Components
//! - `shared/data_table` - Bordered, scrollable table of text cells

pub mod sidebar;
pub mod welcome;
pub mod entry_view;
pub mod process_view;
pub mod status_bar;

pub mod shared;
