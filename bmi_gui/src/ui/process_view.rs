//! Process Data page
//!
//! Left: file chooser and the raw rows of the chosen file.
//! Right: Process button, processed rows with a summary, Save button.
//! Process appears once a file is loaded; Save once rows are processed.

use iced::widget::{button, column, row, rule, text, Column, Space};
use iced::{Element, Length, Padding};

use bmi_core::table::{MeasurementTable, TableSummary};

use crate::ui::shared::data_table::{self, PROCESSED_COLUMNS, RAW_COLUMNS};
use crate::{Message, ProcessState};

const TABLE_HEIGHT: f32 = 520.0;

/// Render the processing page
pub fn view(state: &ProcessState) -> Element<'_, Message> {
    row![
        view_source(state),
        Space::new().width(10),
        rule::vertical(1),
        Space::new().width(10),
        view_results(state),
    ]
    .into()
}

fn view_source(state: &ProcessState) -> Column<'_, Message> {
    let source_label = match &state.source {
        Some(path) => text(path.display().to_string()).size(12),
        None => text("No file chosen").size(12).color([0.5, 0.5, 0.5]),
    };

    let rows: Vec<Vec<String>> = state
        .measurements
        .iter()
        .enumerate()
        .map(|(i, m)| vec![(i + 1).to_string(), format!("{:.2}", m.height_m), format!("{:.2}", m.weight_kg)])
        .collect();

    column![
        text("Calculate BMI").size(40),
        button(text("Choose File").size(16))
            .on_press(Message::ChooseFile)
            .padding(Padding::from([12, 20]))
            .style(button::primary),
        source_label,
        data_table::view_table(&RAW_COLUMNS, rows, "Choose a file to load", TABLE_HEIGHT),
    ]
    .spacing(12)
    .width(Length::Fill)
}

fn view_results(state: &ProcessState) -> Column<'_, Message> {
    let mut panel: Column<'_, Message> = column![].spacing(12).width(Length::Fill);

    if state.can_process() {
        panel = panel.push(
            button(text("Process").size(16))
                .on_press(Message::ProcessData)
                .padding(Padding::from([12, 20]))
                .style(button::primary),
        );
    }

    let rows: Vec<Vec<String>> = state
        .processed
        .as_ref()
        .map(|table| table.rows().into_iter().map(data_table::processed_cells).collect())
        .unwrap_or_default();
    panel = panel.push(data_table::view_table(
        &PROCESSED_COLUMNS,
        rows,
        "Processed rows appear here",
        TABLE_HEIGHT,
    ));

    if let Some(table) = &state.processed {
        panel = panel.push(text(summary_line(table)).size(12));
    }

    if state.can_save() {
        panel = panel.push(
            button(text("Save").size(16))
                .on_press(Message::SaveResults)
                .padding(Padding::from([12, 20]))
                .style(button::success),
        );
    }

    panel
}

fn summary_line(table: &MeasurementTable) -> String {
    let TableSummary {
        count,
        mean_bmi,
        by_category,
    } = table.summary();

    let mean = mean_bmi.map(|m| format!("{:.2}", m)).unwrap_or_else(|| "-".to_string());
    let counts = by_category
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(category, n)| format!("{} {}", n, category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} rows ({} thresholds) · mean BMI {} · {}",
        count,
        table.convention(),
        mean,
        counts
    )
}
