//! The three game screens.
//!
//! Each screen is a [`vibepick_tui::Model`]: game engine state plus the
//! presentation state around it (pending winner, status lines, running
//! animations). All three share the same skeleton — Space starts, Enter
//! dispatches a non-special pending winner, `q` quits.

pub mod flip;
pub mod slot;
pub mod wheel;

pub use flip::FlipScreen;
pub use slot::SlotScreen;
pub use wheel::WheelScreen;

use vibepick_core::WinnerResult;
use vibepick_tui::{Buffer, Cmd, Rect, Style};

use crate::theme;

/// A styled status line under the game area.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub style: Style,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn accent(text: impl Into<String>) -> Self {
        Self::new(text, theme::base().fg(theme::ACCENT).bold())
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, theme::base().bold())
    }
}

/// Dispatch the pending winner, if there is one worth dispatching.
pub(crate) fn execute_pending<M>(pending: Option<&WinnerResult>) -> Cmd<M> {
    match pending {
        Some(winner) if winner.dispatchable() => Cmd::exec(winner.value.as_str()),
        _ => Cmd::none(),
    }
}

/// Paint the themed background and the key-hint footer; returns the
/// content area above the footer.
pub(crate) fn chrome(buffer: &mut Buffer, hints: &str) -> Rect {
    let area = buffer.area();
    buffer.fill(area, theme::base());
    if area.height > 0 {
        buffer.set_str_centered(area, area.bottom() - 1, hints, theme::base().dim());
    }
    Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1))
}

/// Draw multi-line frame art centered horizontally, starting at `top`.
pub(crate) fn draw_art(buffer: &mut Buffer, area: Rect, top: u16, art: &str, style: Style) {
    for (row, line) in art.lines().enumerate() {
        let y = top + row as u16;
        if y >= area.bottom() {
            break;
        }
        buffer.set_str_centered(area, y, line, style);
    }
}
