//! The library screen: sort toolbar, the "Add New Book" row and the two
//! book sections.

use iced::widget::image::{Handle, Image};
use iced::widget::{button, canvas, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Theme};
use std::collections::HashMap;

use super::letter_square::LetterSquare;
use crate::state::book_list::BookList;
use crate::state::data::{Book, BookId, SortStyle};
use crate::state::listing::{Row, RowPath, SectionLabel};
use crate::Message;

const THUMBNAIL_EDGE: f32 = 56.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Build the whole library screen
pub fn view<'a>(
    list: &'a BookList,
    covers: &'a HashMap<BookId, Handle>,
    editing: bool,
    status: &'a str,
) -> Element<'a, Message> {
    let mut sections = Column::new().spacing(8);

    for section in &list.listing().sections {
        if let Some(title) = section.label.title() {
            sections = sections.push(text(title).size(26));
        }

        for (index, entry) in section.rows.iter().enumerate() {
            let path = RowPath::new(section.label, index);
            sections = sections.push(match entry {
                Row::AddNew => add_new_row(path),
                Row::Book(book) => {
                    book_row(list, path, book, covers.get(&book.id()), editing, section.rows.len())
                }
            });
        }
    }

    let content = column![
        toolbar(list.listing().sort_style, editing),
        scrollable(sections.padding([0, 12])).height(Length::Fill),
        text(status).size(14),
    ]
    .spacing(16)
    .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn toolbar<'a>(active: SortStyle, editing: bool) -> Element<'a, Message> {
    let mut sort_buttons = row![text("Sort by").size(16)]
        .spacing(8)
        .align_y(Alignment::Center);

    for style in SortStyle::ALL {
        let look: ButtonStyle = if style == active {
            button::primary
        } else {
            button::secondary
        };
        sort_buttons = sort_buttons.push(
            button(text(style.label()))
                .on_press(Message::SortBy(style))
                .style(look)
                .padding([6, 12]),
        );
    }

    row![
        text("Library").size(36),
        horizontal_space(),
        sort_buttons,
        button(text(if editing { "Done" } else { "Edit" }))
            .on_press(Message::ToggleEditing)
            .padding([6, 12]),
    ]
    .spacing(16)
    .align_y(Alignment::Center)
    .into()
}

fn add_new_row<'a>(path: RowPath) -> Element<'a, Message> {
    button(
        row![text("+").size(28), text("Add New Book").size(20)]
            .spacing(12)
            .align_y(Alignment::Center),
    )
    .on_press(Message::Select(path))
    .style(button::text)
    .width(Length::Fill)
    .into()
}

fn book_row<'a>(
    list: &BookList,
    path: RowPath,
    book: &'a Book,
    cover: Option<&'a Handle>,
    editing: bool,
    rows_in_section: usize,
) -> Element<'a, Message> {
    let mut details = column![
        text(&book.title).size(20),
        text(&book.author).size(15),
    ]
    .spacing(2);

    if let Some(review) = &book.review {
        details = details.push(text(review).size(13));
    }

    let mut line = row![thumbnail(book, cover), details, horizontal_space()]
        .spacing(14)
        .align_y(Alignment::Center);

    if book.read_me {
        line = line.push(text("Read Me").size(13));
    }

    let selectable = button(line)
        .on_press(Message::Select(path))
        .style(button::text)
        .width(Length::Fill);

    if !editing {
        return selectable.into();
    }

    let mut controls = row![selectable].spacing(6).align_y(Alignment::Center);

    if list.can_move(path) {
        let up = (path.row > 0).then(|| Message::Move {
            from: path,
            to: RowPath::new(SectionLabel::ReadMe, path.row - 1),
        });
        let down = (path.row + 1 < rows_in_section).then(|| Message::Move {
            from: path,
            to: RowPath::new(SectionLabel::ReadMe, path.row + 1),
        });
        controls = controls
            .push(button(text("Up")).on_press_maybe(up).style(button::secondary))
            .push(button(text("Down")).on_press_maybe(down).style(button::secondary));
    }

    if list.can_edit(path) {
        controls = controls.push(
            button(text("Delete"))
                .on_press(Message::Delete(path))
                .style(button::danger),
        );
    }

    controls.into()
}

/// Cover image if there is one, the letter square otherwise
pub fn thumbnail<'a>(book: &Book, cover: Option<&'a Handle>) -> Element<'a, Message> {
    cover_element(book, cover, THUMBNAIL_EDGE)
}

pub fn cover_element<'a>(book: &Book, cover: Option<&'a Handle>, edge: f32) -> Element<'a, Message> {
    match cover {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fixed(edge))
            .height(Length::Fixed(edge))
            .into(),
        None => canvas(LetterSquare::for_title(&book.title))
            .width(Length::Fixed(edge))
            .height(Length::Fixed(edge))
            .into(),
    }
}
