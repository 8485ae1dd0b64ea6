//! Placeholder cover: a coloured square with the book's initial
use iced::alignment;
use iced::widget::canvas::{self, Path, Text};
use iced::{Color, Pixels, Point, Rectangle};

use crate::cover::placeholder_letter;
use crate::Message;

/// Background tints, picked by letter so a book keeps its colour
const TINTS: [Color; 5] = [
    Color::from_rgb(0.85, 0.36, 0.31),
    Color::from_rgb(0.29, 0.53, 0.82),
    Color::from_rgb(0.35, 0.68, 0.45),
    Color::from_rgb(0.80, 0.60, 0.25),
    Color::from_rgb(0.55, 0.42, 0.78),
];

#[derive(Debug, Clone, Copy)]
pub struct LetterSquare {
    pub letter: char,
}

impl LetterSquare {
    pub fn for_title(title: &str) -> Self {
        Self {
            letter: placeholder_letter(title),
        }
    }

    fn tint(&self) -> Color {
        TINTS[self.letter as u32 as usize % TINTS.len()]
    }
}

impl canvas::Program<Message> for LetterSquare {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let square = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&square, self.tint());

        let edge = bounds.width.min(bounds.height);
        frame.fill_text(Text {
            content: self.letter.to_string(),
            position: frame.center(),
            color: Color::WHITE,
            size: Pixels(edge * 0.55),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}
