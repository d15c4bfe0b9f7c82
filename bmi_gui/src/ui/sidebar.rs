//! Sidebar (Left)
//!
//! App header plus one button per menu item. The button for the open page
//! is highlighted.

use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::{MenuItem, Message, View};

const SIDEBAR_WIDTH: f32 = 200.0;

/// Render the sidebar menu
pub fn view_sidebar(active: View) -> Element<'static, Message> {
    let header = column![
        text("BMI").size(24).font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::default()
        }),
        text("Calculator").size(18),
    ]
    .spacing(2)
    .padding(10);

    let mut menu: Column<'static, Message> = column![header, Space::new().height(8)].spacing(4);

    for item in MenuItem::ALL {
        let is_active = item.view() == Some(active);
        menu = menu.push(view_menu_item(item, is_active));
    }

    container(menu)
        .width(Length::Fixed(SIDEBAR_WIDTH))
        .height(Length::Fill)
        .padding(Padding::from([10, 6]))
        .into()
}

fn view_menu_item(item: MenuItem, is_active: bool) -> Element<'static, Message> {
    let marker = if is_active { "▶" } else { " " };

    button(
        row![
            text(marker).size(12).width(Length::Fixed(14.0)),
            text(item.label()).size(18),
        ]
        .align_y(Alignment::Center),
    )
    .on_press(Message::MenuSelected(item))
    .padding(Padding::from([10, 10]))
    .width(Length::Fill)
    .style(if is_active { button::primary } else { button::text })
    .into()
}
