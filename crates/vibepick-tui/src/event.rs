#![forbid(unsafe_code)]

//! Input events, translated from crossterm into the handful of shapes the
//! games care about. Key releases, drags, scrolls and the rest are folded
//! away here so models only ever see presses, left clicks and resizes.

use std::io;
use std::time::Duration;

use crossterm::event::{self as ct, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// A pressed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Up,
    Down,
    Left,
    Right,
    /// Anything the games have no binding for.
    Other,
}

/// A left-button press at a cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseClick {
    pub x: u16,
    pub y: u16,
}

/// An input event delivered to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Click(MouseClick),
    Resize(u16, u16),
    /// Ctrl-C, always treated as quit.
    Interrupt,
}

/// Poll for the next event, waiting at most `timeout`.
///
/// Returns `None` on timeout or when the raw event folds away to nothing
/// (releases, moves, scrolls).
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if !ct::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(ct::read()?))
}

fn translate(raw: ct::Event) -> Option<Event> {
    match raw {
        ct::Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == ct::KeyCode::Char('c')
            {
                return Some(Event::Interrupt);
            }
            let key = match key.code {
                ct::KeyCode::Char(c) => Key::Char(c),
                ct::KeyCode::Enter => Key::Enter,
                ct::KeyCode::Esc => Key::Esc,
                ct::KeyCode::Up => Key::Up,
                ct::KeyCode::Down => Key::Down,
                ct::KeyCode::Left => Key::Left,
                ct::KeyCode::Right => Key::Right,
                _ => Key::Other,
            };
            Some(Event::Key(key))
        }
        ct::Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Event::Click(MouseClick {
                x: mouse.column,
                y: mouse.row,
            })),
            _ => None,
        },
        ct::Event::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    #[test]
    fn presses_translate_and_releases_fold_away() {
        let press = ct::Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(translate(press), Some(Event::Key(Key::Char('q'))));

        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(ct::Event::Key(release)), None);
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        let event = ct::Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(event), Some(Event::Interrupt));
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            translate(ct::Event::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        );
    }
}
