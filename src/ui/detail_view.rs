use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, row, text, text_editor};
use iced::{Alignment, Element, Length, Theme};

use super::library_view::cover_element;
use crate::state::data::Book;
use crate::state::draft::BookDraft;
use crate::Message;

const COVER_EDGE: f32 = 200.0;

/// State of the detail screen: the draft being edited plus the widget
/// state that goes with it
pub struct DetailView {
    pub draft: BookDraft,
    review: text_editor::Content,
    cover: Option<Handle>,
}

impl DetailView {
    pub fn new(book: Book) -> Self {
        let review = text_editor::Content::with_text(book.review.as_deref().unwrap_or_default());
        let cover = book.cover.clone().map(|bytes| Handle::from_bytes(bytes));
        Self {
            draft: BookDraft::new(book),
            review,
            cover,
        }
    }

    /// Apply an editor action; text changes flow into the draft
    pub fn edit_review(&mut self, action: text_editor::Action) {
        let is_edit = action.is_edit();
        self.review.perform(action);
        if is_edit {
            self.draft.set_review(&self.review.text());
        }
    }

    pub fn set_cover(&mut self, bytes: Vec<u8>) {
        self.cover = Some(Handle::from_bytes(bytes.clone()));
        self.draft.set_cover(bytes);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let book = self.draft.book();

        let bookmark = button(text(if book.read_me {
            "Marked: Read Me"
        } else {
            "Mark as Read Me"
        }))
        .on_press(Message::ToggleReadMe)
        .style(bookmark_style(book.read_me));

        let header = row![
            column![
                cover_element(book, self.cover.as_ref(), COVER_EDGE),
                button(text("Update Image"))
                    .on_press(Message::PickCover)
                    .style(button::text),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
            column![
                text(&book.title).size(30),
                text(&book.author).size(20),
                bookmark,
            ]
            .spacing(12),
        ]
        .spacing(24);

        let review = text_editor(&self.review)
            .placeholder("Write a review…")
            .on_action(Message::ReviewEdited)
            .height(Length::Fixed(180.0));

        let save_label = if self.draft.is_dirty() {
            "Save Changes"
        } else {
            "Save"
        };

        let actions = row![
            button(text("Back")).on_press(Message::Back).style(button::secondary),
            horizontal_space(),
            button(text(save_label)).on_press(Message::SaveChanges),
        ]
        .align_y(Alignment::Center);

        let content = column![header, text("Review").size(18), review, actions]
            .spacing(16)
            .padding(30)
            .max_width(720);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}

fn bookmark_style(read_me: bool) -> fn(&Theme, button::Status) -> button::Style {
    if read_me {
        button::primary
    } else {
        button::secondary
    }
}
