//! Data Table
//!
//! A header row over text rows, inside a bordered scrollable box.
//! Cells are owned strings so the table does not borrow from app state.

use iced::widget::{column, container, rule, scrollable, text, Column, Row};
use iced::{Element, Font, Length, Padding};

use bmi_core::table::TableRow;

use crate::Message;

/// Column heading and fixed width in pixels
pub type ColumnSpec = (&'static str, f32);

pub const RAW_COLUMNS: [ColumnSpec; 3] = [("#", 50.0), ("Height (m)", 110.0), ("Weight (kg)", 110.0)];

pub const PROCESSED_COLUMNS: [ColumnSpec; 5] = [
    ("#", 50.0),
    ("Height (m)", 110.0),
    ("Weight (kg)", 110.0),
    ("BMI", 80.0),
    ("Category", 120.0),
];

/// Cells of a processed row, in [`PROCESSED_COLUMNS`] order
pub fn processed_cells(row: TableRow) -> Vec<String> {
    vec![row.index, row.height, row.weight, row.bmi, row.category]
}

/// Render a table with the given columns and rows.
///
/// `empty_text` is shown in place of the rows when there are none.
pub fn view_table(
    columns: &[ColumnSpec],
    rows: Vec<Vec<String>>,
    empty_text: &'static str,
    height: f32,
) -> Element<'static, Message> {
    let header: Row<'static, Message> = columns.iter().fold(Row::new(), |header, (title, width)| {
        header.push(
            text(*title)
                .size(14)
                .font(Font {
                    weight: iced::font::Weight::Bold,
                    ..Font::default()
                })
                .width(Length::Fixed(*width)),
        )
    });

    let mut body: Column<'static, Message> = column![].spacing(6);
    if rows.is_empty() {
        body = body.push(text(empty_text).size(12).color([0.5, 0.5, 0.5]));
    }
    for cells in rows {
        let line: Row<'static, Message> = cells
            .into_iter()
            .zip(columns)
            .fold(Row::new(), |line, (cell, (_, width))| {
                line.push(text(cell).size(13).width(Length::Fixed(*width)))
            });
        body = body.push(line);
    }

    let content = column![
        header.padding(Padding::from([4, 0])),
        rule::horizontal(1),
        scrollable(body.padding(Padding::from([4, 0]))).height(Length::Fill),
    ]
    .spacing(4);

    container(content)
        .height(Length::Fixed(height))
        .padding(10)
        .style(container::bordered_box)
        .into()
}
