#![forbid(unsafe_code)]

//! Cell buffer and presenter.
//!
//! A plain grid of styled characters, repainted in full every frame. The
//! screens here are a few dozen rows of mostly-static panels at animation
//! cadence, so there is no damage tracking; correctness over cleverness.
//!
//! Wide characters (emoji, die faces) occupy their cell plus a zero-width
//! continuation cell that the presenter skips.

use std::io::{self, Write};

use crossterm::style::{
    Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue};
use unicode_width::UnicodeWidthChar;

pub use crossterm::style::Color;

/// A rectangle of cells, in terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The area inside a one-cell border.
    pub fn inner(&self) -> Self {
        if self.width < 2 || self.height < 2 {
            return Self::new(self.x, self.y, 0, 0);
        }
        Self::new(self.x + 1, self.y + 1, self.width - 2, self.height - 2)
    }
}

/// Character style: colors plus the attributes the games actually use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    symbol: char,
    /// Display width: 1 or 2, or 0 for a wide-char continuation.
    width: u8,
    style: Style,
}

impl Cell {
    const BLANK: Self = Self {
        symbol: ' ',
        width: 1,
        style: Style {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            italic: false,
        },
    };
}

/// The full-screen cell grid.
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; usize::from(width) * usize::from(height)];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            None
        } else {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        }
    }

    /// Place one character. Wide characters claim the following cell as a
    /// continuation; writes outside the grid are dropped.
    pub fn set_char(&mut self, x: u16, y: u16, symbol: char, style: Style) {
        let width = UnicodeWidthChar::width(symbol).unwrap_or(0) as u8;
        if width == 0 {
            return;
        }
        let Some(index) = self.index(x, y) else {
            return;
        };
        if width == 2 && x + 1 >= self.width {
            // A wide char cannot straddle the edge.
            return;
        }
        self.cells[index] = Cell {
            symbol,
            width,
            style,
        };
        if width == 2 {
            if let Some(next) = self.index(x + 1, y) {
                self.cells[next] = Cell {
                    symbol: ' ',
                    width: 0,
                    style,
                };
            }
        }
    }

    /// Write a string starting at `(x, y)`, clipped to the row.
    pub fn set_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let mut cursor = x;
        for symbol in text.chars() {
            let width = UnicodeWidthChar::width(symbol).unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if cursor >= self.width {
                break;
            }
            self.set_char(cursor, y, symbol, style);
            cursor += width;
        }
    }

    /// Write a string centered within `area` on row `y`.
    pub fn set_str_centered(&mut self, area: Rect, y: u16, text: &str, style: Style) {
        let text_width = display_width(text);
        let x = area.x + area.width.saturating_sub(text_width) / 2;
        self.set_str(x, y, text, style);
    }

    /// Fill an area's background style (symbols untouched where blank).
    pub fn fill(&mut self, area: Rect, style: Style) {
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(index) = self.index(x, y) {
                    self.cells[index] = Cell {
                        symbol: ' ',
                        width: 1,
                        style,
                    };
                }
            }
        }
    }

    /// Repaint the whole grid to `out`.
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        let mut current: Option<Style> = None;
        for y in 0..self.height {
            queue!(out, cursor::MoveTo(0, y))?;
            for x in 0..self.width {
                let Some(index) = self.index(x, y) else {
                    continue;
                };
                let cell = &self.cells[index];
                if cell.width == 0 {
                    continue;
                }
                if current != Some(cell.style) {
                    apply_style(out, cell.style)?;
                    current = Some(cell.style);
                }
                write!(out, "{}", cell.symbol)?;
            }
        }
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        out.flush()
    }
}

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

/// Terminal display width of a string.
pub fn display_width(text: &str) -> u16 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as u16)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_at(buffer: &Buffer, x: u16, y: u16) -> Cell {
        let index = buffer.index(x, y).unwrap();
        buffer.cells[index]
    }

    #[test]
    fn set_str_advances_by_display_width() {
        let mut buffer = Buffer::new(10, 2);
        buffer.set_str(0, 0, "a🎲b", Style::new());
        assert_eq!(cell_at(&buffer, 0, 0).symbol, 'a');
        assert_eq!(cell_at(&buffer, 1, 0).symbol, '🎲');
        assert_eq!(cell_at(&buffer, 2, 0).width, 0, "continuation cell");
        assert_eq!(cell_at(&buffer, 3, 0).symbol, 'b');
    }

    #[test]
    fn writes_outside_the_grid_are_dropped() {
        let mut buffer = Buffer::new(4, 2);
        buffer.set_char(9, 0, 'x', Style::new());
        buffer.set_char(0, 9, 'x', Style::new());
        buffer.set_str(2, 0, "long", Style::new());
        assert_eq!(cell_at(&buffer, 3, 0).symbol, 'o');
        // A wide char cannot start on the last column.
        buffer.set_char(3, 1, '🎯', Style::new());
        assert_eq!(cell_at(&buffer, 3, 1).symbol, ' ');
    }

    #[test]
    fn centering_uses_display_width() {
        let mut buffer = Buffer::new(10, 1);
        buffer.set_str_centered(buffer.area(), 0, "ab", Style::new());
        assert_eq!(cell_at(&buffer, 4, 0).symbol, 'a');
        assert_eq!(cell_at(&buffer, 5, 0).symbol, 'b');
    }

    #[test]
    fn rect_inner_and_contains() {
        let rect = Rect::new(2, 3, 10, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(11, 7));
        assert!(!rect.contains(12, 3));
        assert_eq!(rect.inner(), Rect::new(3, 4, 8, 3));
        assert_eq!(Rect::new(0, 0, 1, 1).inner().width, 0);
    }
}
