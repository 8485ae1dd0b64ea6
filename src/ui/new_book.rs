//! The "Add New Book" form

use iced::widget::{button, checkbox, column, container, horizontal_space, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::data::NewBook;
use crate::Message;

#[derive(Debug, Clone, Default)]
pub struct NewBookForm {
    pub title: String,
    pub author: String,
    pub read_me: bool,
}

impl NewBookForm {
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            read_me: self.read_me,
        }
    }

    pub fn view<'a>(&'a self, status: &'a str) -> Element<'a, Message> {
        let content = column![
            text("Add New Book").size(30),
            text_input("Title", &self.title)
                .on_input(Message::NewTitleChanged)
                .on_submit(Message::CreateBook)
                .padding(10),
            text_input("Author", &self.author)
                .on_input(Message::NewAuthorChanged)
                .on_submit(Message::CreateBook)
                .padding(10),
            checkbox("Read me", self.read_me).on_toggle(Message::NewReadMeToggled),
            row![
                button(text("Cancel")).on_press(Message::Back).style(button::secondary),
                horizontal_space(),
                button(text("Create")).on_press(Message::CreateBook),
            ]
            .align_y(Alignment::Center),
            text(status).size(14),
        ]
        .spacing(16)
        .padding(30)
        .max_width(520);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_maps_to_new_book() {
        let form = NewBookForm {
            title: " Circe ".into(),
            author: "Madeline Miller".into(),
            read_me: true,
        };
        let book = form.to_new_book().validate().unwrap();
        assert_eq!(book.title, "Circe");
        assert!(book.read_me);
    }
}
