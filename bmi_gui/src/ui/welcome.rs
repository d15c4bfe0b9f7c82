//! Placeholder page shown at startup.

use iced::widget::text;
use iced::Element;

use crate::Message;

pub fn view() -> Element<'static, Message> {
    text("Select an option from the menu").size(20).into()
}
