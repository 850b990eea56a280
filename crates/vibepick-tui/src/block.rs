#![forbid(unsafe_code)]

//! Bordered boxes: the one drawing primitive every screen shares.

use crate::buffer::{Buffer, Rect, Style};

/// Border character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderKind {
    #[default]
    Square,
    Rounded,
    Double,
    Heavy,
}

struct BorderSet {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderKind {
    fn set(self) -> BorderSet {
        match self {
            Self::Square => BorderSet {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            Self::Rounded => BorderSet {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            Self::Double => BorderSet {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
            Self::Heavy => BorderSet {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                horizontal: '━',
                vertical: '┃',
            },
        }
    }
}

/// A box with a border and an optional centered title on the top edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Block<'a> {
    kind: BorderKind,
    border_style: Style,
    title: Option<&'a str>,
    title_style: Style,
}

impl<'a> Block<'a> {
    pub fn new(kind: BorderKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Draw the border into `buffer` and return the inner area.
    pub fn draw(&self, buffer: &mut Buffer, area: Rect) -> Rect {
        if area.width < 2 || area.height < 2 {
            return area.inner();
        }
        let set = self.kind.set();
        let style = self.border_style;
        let (left, right) = (area.x, area.right() - 1);
        let (top, bottom) = (area.y, area.bottom() - 1);

        for x in left + 1..right {
            buffer.set_char(x, top, set.horizontal, style);
            buffer.set_char(x, bottom, set.horizontal, style);
        }
        for y in top + 1..bottom {
            buffer.set_char(left, y, set.vertical, style);
            buffer.set_char(right, y, set.vertical, style);
        }
        buffer.set_char(left, top, set.top_left, style);
        buffer.set_char(right, top, set.top_right, style);
        buffer.set_char(left, bottom, set.bottom_left, style);
        buffer.set_char(right, bottom, set.bottom_right, style);

        if let Some(title) = self.title {
            buffer.set_str_centered(area, top, title, self.title_style);
        }

        area.inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Style;

    #[test]
    fn draws_corners_and_returns_inner() {
        let mut buffer = Buffer::new(8, 4);
        let area = buffer.area();
        let inner = Block::new(BorderKind::Rounded).draw(&mut buffer, area);
        assert_eq!(inner, Rect::new(1, 1, 6, 2));

        let mut out: Vec<u8> = Vec::new();
        buffer.present(&mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        for corner in ['╭', '╮', '╰', '╯'] {
            assert!(rendered.contains(corner), "missing {corner}");
        }
    }

    #[test]
    fn degenerate_areas_draw_nothing() {
        let mut buffer = Buffer::new(8, 4);
        let inner = Block::new(BorderKind::Heavy)
            .border_style(Style::new())
            .draw(&mut buffer, Rect::new(0, 0, 1, 1));
        assert_eq!(inner.width, 0);
    }
}
