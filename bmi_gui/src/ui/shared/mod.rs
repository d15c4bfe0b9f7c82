//! Shared UI components reusable across views
//!
//! Contains:
//! - `data_table` - Header row plus text rows with fixed column widths

pub mod data_table;
