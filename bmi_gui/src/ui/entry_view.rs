//! Data Entry page
//!
//! Left: height, weight and file name inputs with Add Entry / Show Data.
//! Right: the rows added this session, or the rows of a shown file.

use iced::widget::{button, column, row, rule, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::ui::shared::data_table::{self, PROCESSED_COLUMNS};
use crate::{EntryForm, Message};

const FIELD_WIDTH: f32 = 300.0;

/// Render the entry page
pub fn view(form: &EntryForm) -> Element<'_, Message> {
    let inputs: Column<'_, Message> = column![
        text("Data Entry").size(32),
        labeled_input("Height (m)", "e.g. 1.75", &form.height, Message::HeightChanged),
        labeled_input("Weight (kg)", "e.g. 70.5", &form.weight, Message::WeightChanged),
        labeled_input("File name", "Enter a file name", &form.file_name, Message::FileNameChanged),
        row![
            button(text("Add Entry").size(16))
                .on_press(Message::AddEntry)
                .padding(Padding::from([12, 20]))
                .style(button::primary),
            button(text("Show Data").size(16))
                .on_press(Message::ShowData)
                .padding(Padding::from([12, 20]))
                .style(button::secondary),
        ]
        .spacing(20),
    ]
    .spacing(20)
    .width(Length::Shrink);

    let rows: Vec<Vec<String>> = form.table.rows().into_iter().map(data_table::processed_cells).collect();

    let table = column![
        text("Entered Data").size(24),
        data_table::view_table(&PROCESSED_COLUMNS, rows, "No entries yet", 400.0),
    ]
    .spacing(10)
    .width(Length::Fill);

    row![inputs, Space::new().width(10), rule::vertical(1), Space::new().width(10), table]
        .align_y(Alignment::Start)
        .into()
}

/// Label above a text input; Enter in the field adds the entry
fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        text(label).size(16),
        text_input(placeholder, value)
            .on_input(on_change)
            .on_submit(Message::AddEntry)
            .width(Length::Fixed(FIELD_WIDTH))
            .padding(8)
            .size(16),
    ]
    .spacing(4)
    .into()
}
