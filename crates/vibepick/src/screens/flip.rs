#![forbid(unsafe_code)]

//! Memory match: a 4×4 grid of face-down cards worked by keyboard cursor
//! or mouse. The last value matched wins the board.
//!
//! The view and the click handler compute card rectangles from the same
//! geometry function, so hit-testing can never drift from the drawing.

use std::time::Duration;

use vibepick_core::{Classification, FlipOutcome, MatchSession, WinnerResult};
use vibepick_tui::{
    Block, BorderKind, Buffer, Cmd, Color, Event, Key, Model, MouseClick, Rect, TimerKey,
};

use crate::screens::{self, StatusLine};
use crate::theme;

const UNFLIP: TimerKey = TimerKey("flip.unflip");
const CELEBRATION: TimerKey = TimerKey("flip.celebration");

const UNFLIP_DELAY: Duration = Duration::from_secs(1);
const CELEBRATION_FRAMES: usize = 16;
const CELEBRATION_INTERVAL: Duration = Duration::from_millis(150);

const GRID_COLS: usize = 4;
const GRID_ROWS: usize = 4;
const CARD_WIDTH: u16 = 14;
const CARD_HEIGHT: u16 = 3;
const GAP_X: u16 = 2;
const GAP_Y: u16 = 1;

pub enum FlipMsg {
    Input(Event),
    UnflipTick,
    CelebrationTick,
}

impl From<Event> for FlipMsg {
    fn from(event: Event) -> Self {
        Self::Input(event)
    }
}

pub struct FlipScreen {
    session: MatchSession,
    cursor: usize,
    size: (u16, u16),
    pending: Option<WinnerResult>,
    status: StatusLine,
    celebration: Option<usize>,
}

impl FlipScreen {
    pub fn new(session: MatchSession, size: (u16, u16)) -> Self {
        Self {
            session,
            cursor: 0,
            size,
            pending: None,
            status: StatusLine::plain(
                "Find two of a kind. Arrows move, Space flips, clicking works too.",
            ),
            celebration: None,
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let col = (self.cursor % GRID_COLS) as isize;
        let row = (self.cursor / GRID_COLS) as isize;
        let col = (col + dx).rem_euclid(GRID_COLS as isize);
        let row = (row + dy).rem_euclid(GRID_ROWS as isize);
        self.cursor = row as usize * GRID_COLS + col as usize;
    }

    fn flip(&mut self, card_id: usize) -> Cmd<FlipMsg> {
        match self.session.flip(card_id) {
            FlipOutcome::Ignored => Cmd::none(),
            FlipOutcome::Flipped => Cmd::cancel(UNFLIP),
            FlipOutcome::Mismatch => {
                self.status = StatusLine::plain("No match.");
                Cmd::after(UNFLIP, UNFLIP_DELAY, FlipMsg::UnflipTick)
            }
            FlipOutcome::PairMatched { value } => {
                self.status = StatusLine::accent(format!("{value} matched!"));
                Cmd::cancel(UNFLIP)
            }
            FlipOutcome::AllMatched { winner } => {
                let result = WinnerResult::new(winner, Classification::Normal);
                self.status = if result.dispatchable() {
                    StatusLine::accent(format!(
                        "{} closed the board. Enter to launch.",
                        result.value
                    ))
                } else {
                    StatusLine::accent(format!(
                        "{} closed the board. Bragging rights only.",
                        result.value
                    ))
                };
                self.pending = Some(result);
                self.celebration = Some(0);
                Cmd::batch(vec![
                    Cmd::cancel(UNFLIP),
                    Cmd::after(CELEBRATION, CELEBRATION_INTERVAL, FlipMsg::CelebrationTick),
                ])
            }
        }
    }

    fn on_click(&mut self, click: MouseClick) -> Cmd<FlipMsg> {
        for card_id in 0..self.session.cards().len() {
            if card_rect(self.size, card_id).contains(click.x, click.y) {
                self.cursor = card_id;
                return self.flip(card_id);
            }
        }
        Cmd::none()
    }

    fn reset(&mut self) -> Cmd<FlipMsg> {
        self.session.reset();
        self.pending = None;
        self.celebration = None;
        self.status = StatusLine::plain("Fresh board. Find two of a kind.");
        Cmd::batch(vec![Cmd::cancel(UNFLIP), Cmd::cancel(CELEBRATION)])
    }

    fn on_celebration(&mut self) -> Cmd<FlipMsg> {
        match self.celebration {
            Some(frame) if frame + 1 < CELEBRATION_FRAMES => {
                self.celebration = Some(frame + 1);
                Cmd::after(CELEBRATION, CELEBRATION_INTERVAL, FlipMsg::CelebrationTick)
            }
            _ => {
                self.celebration = None;
                Cmd::none()
            }
        }
    }

    fn draw_card(&self, buffer: &mut Buffer, card_id: usize) {
        let Some(card) = self.session.card(card_id) else {
            return;
        };
        let rect = card_rect(self.size, card_id);

        let (border, bg, face) = if card.is_matched() {
            (
                theme::base().fg(Color::Green),
                theme::MATCHED_BG,
                format!("✓ {} ✓", card.value()),
            )
        } else if card.is_flipped() {
            (
                theme::base().fg(Color::Yellow).bold(),
                theme::CELL_BG,
                card.value().to_string(),
            )
        } else {
            (
                theme::base().fg(theme::FRAME),
                theme::CELL_BG,
                "?".to_string(),
            )
        };

        let fill = theme::base().bg(bg);
        buffer.fill(rect, fill);
        let kind = if card_id == self.cursor {
            BorderKind::Heavy
        } else {
            BorderKind::Rounded
        };
        let border = if card_id == self.cursor {
            border.bold()
        } else {
            border
        };
        let inner = Block::new(kind)
            .border_style(border.bg(bg))
            .draw(buffer, rect);
        buffer.set_str_centered(inner, inner.y, &face, fill.fg(Color::White).bold());
    }
}

impl Model for FlipScreen {
    type Message = FlipMsg;

    fn update(&mut self, msg: FlipMsg) -> Cmd<FlipMsg> {
        match msg {
            FlipMsg::Input(Event::Interrupt) => Cmd::quit(0),
            FlipMsg::Input(Event::Key(Key::Char('q')) | Event::Key(Key::Esc)) => Cmd::quit(0),
            FlipMsg::Input(Event::Key(Key::Char('r'))) => self.reset(),
            FlipMsg::Input(Event::Key(Key::Char(' '))) => self.flip(self.cursor),
            FlipMsg::Input(Event::Key(Key::Enter)) => {
                screens::execute_pending(self.pending.as_ref())
            }
            FlipMsg::Input(Event::Key(Key::Up)) => {
                self.move_cursor(0, -1);
                Cmd::none()
            }
            FlipMsg::Input(Event::Key(Key::Down)) => {
                self.move_cursor(0, 1);
                Cmd::none()
            }
            FlipMsg::Input(Event::Key(Key::Left)) => {
                self.move_cursor(-1, 0);
                Cmd::none()
            }
            FlipMsg::Input(Event::Key(Key::Right)) => {
                self.move_cursor(1, 0);
                Cmd::none()
            }
            FlipMsg::Input(Event::Click(click)) => self.on_click(click),
            FlipMsg::Input(Event::Resize(width, height)) => {
                self.size = (width, height);
                Cmd::none()
            }
            FlipMsg::Input(_) => Cmd::none(),
            FlipMsg::UnflipTick => {
                self.session.unflip_pending();
                Cmd::none()
            }
            FlipMsg::CelebrationTick => self.on_celebration(),
        }
    }

    fn view(&self, buffer: &mut Buffer) {
        let area = screens::chrome(
            buffer,
            "arrows move · space flip · r reshuffle · enter run winner · q quit",
        );

        let origin = grid_origin(self.size);
        buffer.set_str_centered(
            area,
            origin.1.saturating_sub(2),
            "🃏 MEMORY MATCH 🃏",
            theme::base().fg(theme::ACCENT).bold(),
        );

        for card_id in 0..self.session.cards().len() {
            self.draw_card(buffer, card_id);
        }

        let mut status = self.status.text.clone();
        if let Some(frame) = self.celebration {
            let emoji = theme::CELEBRATION_EMOJIS[frame % theme::CELEBRATION_EMOJIS.len()];
            status = format!("{emoji} {status} {emoji}");

            // Confetti washes over the middle of the solved board.
            let art = theme::CELEBRATION_FRAMES[frame % theme::CELEBRATION_FRAMES.len()];
            let color = theme::ANIMATION_COLORS[frame % theme::ANIMATION_COLORS.len()];
            let top = origin.1 + grid_size().1 / 2 - 1;
            screens::draw_art(buffer, area, top, art, theme::base().fg(color).bold());
        }
        let status_y = origin.1 + grid_size().1 + 1;
        if status_y < area.bottom() {
            buffer.set_str_centered(area, status_y, &status, self.status.style);
        }

        let progress = format!(
            "{} / {} matched",
            self.session.matched_count() / 2,
            vibepick_core::memory::PAIR_VALUES
        );
        if status_y + 1 < area.bottom() {
            buffer.set_str_centered(area, status_y + 1, &progress, theme::base().dim());
        }
    }
}

fn grid_size() -> (u16, u16) {
    (
        GRID_COLS as u16 * CARD_WIDTH + (GRID_COLS as u16 - 1) * GAP_X,
        GRID_ROWS as u16 * CARD_HEIGHT + (GRID_ROWS as u16 - 1) * GAP_Y,
    )
}

fn grid_origin(size: (u16, u16)) -> (u16, u16) {
    let (grid_w, grid_h) = grid_size();
    (
        size.0.saturating_sub(grid_w) / 2,
        size.1.saturating_sub(grid_h) / 2,
    )
}

fn card_rect(size: (u16, u16), card_id: usize) -> Rect {
    let (origin_x, origin_y) = grid_origin(size);
    let col = (card_id % GRID_COLS) as u16;
    let row = (card_id / GRID_COLS) as u16;
    Rect::new(
        origin_x + col * (CARD_WIDTH + GAP_X),
        origin_y + row * (CARD_HEIGHT + GAP_Y),
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use vibepick_core::Participant;
    use vibepick_core::memory::PAIR_VALUES;

    const SIZE: (u16, u16) = (80, 24);

    fn screen(seed: u64) -> FlipScreen {
        let values = ["kimi", "claude", "gemini", "codex", "code", "cursor", "amp", "opencode"]
            .map(|n| Participant::new(n).unwrap());
        FlipScreen::new(MatchSession::with_seed(values, seed), SIZE)
    }

    fn pairs(screen: &FlipScreen) -> Vec<(usize, usize)> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut out = Vec::new();
        for (i, card) in screen.session.cards().iter().enumerate() {
            match seen.remove(card.value().as_str()) {
                Some(first) => out.push((first, i)),
                None => {
                    seen.insert(card.value().as_str(), i);
                }
            }
        }
        out
    }

    #[test]
    fn card_rects_are_disjoint_and_clickable() {
        let mut hits = 0;
        for card_id in 0..16 {
            let rect = card_rect(SIZE, card_id);
            for other in card_id + 1..16 {
                let o = card_rect(SIZE, other);
                let overlap = rect.x < o.right()
                    && o.x < rect.right()
                    && rect.y < o.bottom()
                    && o.y < rect.bottom();
                assert!(!overlap, "cards {card_id} and {other} overlap");
            }
            hits += 1;
            assert!(rect.contains(rect.x, rect.y));
        }
        assert_eq!(hits, 16);
    }

    #[test]
    fn clicking_a_card_flips_it() {
        let mut screen = screen(1);
        let rect = card_rect(SIZE, 5);
        screen.update(FlipMsg::Input(Event::Click(MouseClick {
            x: rect.x + 1,
            y: rect.y + 1,
        })));
        assert!(screen.session.card(5).unwrap().is_flipped());
        assert_eq!(screen.cursor, 5);
    }

    #[test]
    fn cursor_wraps_on_every_edge() {
        let mut screen = screen(2);
        screen.update(FlipMsg::Input(Event::Key(Key::Left)));
        assert_eq!(screen.cursor, 3);
        screen.update(FlipMsg::Input(Event::Key(Key::Up)));
        assert_eq!(screen.cursor, 15);
        screen.update(FlipMsg::Input(Event::Key(Key::Down)));
        assert_eq!(screen.cursor, 3);
        screen.update(FlipMsg::Input(Event::Key(Key::Right)));
        assert_eq!(screen.cursor, 0);
    }

    #[test]
    fn completing_the_board_sets_the_pending_winner() {
        let mut screen = screen(3);
        let pairs = pairs(&screen);
        assert_eq!(pairs.len(), PAIR_VALUES);
        for (a, b) in &pairs {
            screen.flip(*a);
            screen.flip(*b);
        }
        assert!(screen.session.is_complete());
        let pending = screen.pending.as_ref().unwrap();
        assert!(pending.dispatchable());
        assert!(screen.celebration.is_some());
    }

    #[test]
    fn reset_clears_pending_state() {
        let mut screen = screen(4);
        let (a, b) = pairs(&screen)[0];
        screen.flip(a);
        screen.flip(b);
        assert_eq!(screen.session.matched_count(), 2);
        screen.update(FlipMsg::Input(Event::Key(Key::Char('r'))));
        assert_eq!(screen.session.matched_count(), 0);
        assert!(screen.pending.is_none());
    }

    #[test]
    fn mismatch_then_unflip_timer_restores_the_board() {
        let mut screen = screen(5);
        let p = pairs(&screen);
        let (a, _) = p[0];
        let (b, _) = p[1];
        let cmd = screen.flip(a);
        assert!(matches!(cmd, Cmd::Cancel(UNFLIP)));
        let cmd = screen.flip(b);
        assert!(matches!(cmd, Cmd::After { key: UNFLIP, .. }));
        screen.update(FlipMsg::UnflipTick);
        assert!(!screen.session.card(a).unwrap().is_flipped());
        assert!(!screen.session.card(b).unwrap().is_flipped());
    }
}
