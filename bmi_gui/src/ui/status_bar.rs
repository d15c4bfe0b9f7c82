//! Status Bar (Bottom)
//!
//! Displays:
//! - The latest status message, green for success and red for errors
//! - A dismiss button while a message is shown
//! - The active category thresholds

use iced::widget::{button, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use bmi_core::bmi::CategoryConvention;

use crate::{Message, StatusMessage};

const SUCCESS_COLOR: [f32; 3] = [0.2, 0.6, 0.2];
const ERROR_COLOR: [f32; 3] = [0.8, 0.2, 0.2];

/// Render the status bar
pub fn view_status_bar(status: Option<&StatusMessage>, convention: CategoryConvention) -> Element<'_, Message> {
    let message: Element<'_, Message> = match status {
        Some(status) => {
            let color = if status.is_error { ERROR_COLOR } else { SUCCESS_COLOR };
            row![
                text(&status.text).size(13).color(color),
                Space::new().width(8),
                button(text("×").size(12))
                    .on_press(Message::DismissStatus)
                    .padding(Padding::from([0, 6]))
                    .style(button::text),
            ]
            .align_y(Alignment::Center)
            .into()
        }
        None => text("Ready").size(13).into(),
    };

    container(
        row![
            message,
            Space::new().width(Length::Fill),
            text(format!("Thresholds: {}", convention)).size(11).color([0.5, 0.5, 0.5]),
        ]
        .align_y(Alignment::Center),
    )
    .padding(Padding::from([6, 12]))
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
