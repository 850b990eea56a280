#![forbid(unsafe_code)]

//! The spinning wheel: participants laid out around a ring, a highlight
//! chasing around it until the wheel lands.
//!
//! Four participants sit on a 2×2 grid; five through eight wrap clockwise
//! around the perimeter of a 3×3 grid with a die face in the middle.

use std::time::Duration;

use vibepick_core::{
    Classification, Participant, Roster, SpinEngine, SpinEvent, SpinState, WinnerResult,
};
use vibepick_tui::{Block, BorderKind, Buffer, Cmd, Color, Event, Key, Model, Rect, TimerKey};

use crate::screens::{self, StatusLine};
use crate::theme;

const TICK: TimerKey = TimerKey("wheel.tick");
const CELEBRATION: TimerKey = TimerKey("wheel.celebration");

const CELEBRATION_FRAMES: usize = 15;
const CELEBRATION_INTERVAL: Duration = Duration::from_millis(100);

const CELL_WIDTH: u16 = 14;
const CELL_HEIGHT: u16 = 3;
const GAP_X: u16 = 2;
const GAP_Y: u16 = 1;

pub enum WheelMsg {
    Input(Event),
    SpinTick,
    CelebrationTick,
}

impl From<Event> for WheelMsg {
    fn from(event: Event) -> Self {
        Self::Input(event)
    }
}

pub struct WheelScreen {
    roster: Roster,
    engine: SpinEngine,
    state: SpinState,
    die_face: char,
    pending: Option<WinnerResult>,
    status: StatusLine,
    warning: Option<String>,
    celebration: Option<usize>,
}

impl WheelScreen {
    pub fn new(roster: Roster) -> Self {
        let status = if roster.all_handy() {
            StatusLine::plain("No vibers found on PATH, so handy fills every slot. Space spins anyway.")
        } else {
            StatusLine::plain("Press Space to spin the wheel.")
        };
        let warning = roster.truncated().then(|| {
            format!(
                "Room for 8, so {} name(s) were dropped.",
                roster.extra_count()
            )
        });
        Self {
            roster,
            engine: SpinEngine::new(),
            state: SpinState::idle(0),
            die_face: theme::DICE,
            pending: None,
            status,
            warning,
            celebration: None,
        }
    }

    fn start_spin(&mut self) -> Cmd<WheelMsg> {
        if self.state.is_spinning() {
            return Cmd::none();
        }
        // Roster size is enforced at construction, so start cannot fail
        // here; a failure would mean the roster was mutated underneath us.
        if self.engine.start(&mut self.state, &self.roster).is_err() {
            return Cmd::none();
        }
        self.pending = None;
        self.celebration = None;
        self.status = StatusLine::plain("Spinning...");
        Cmd::batch(vec![
            Cmd::cancel(CELEBRATION),
            Cmd::after(TICK, self.state.delay(), WheelMsg::SpinTick),
        ])
    }

    fn on_tick(&mut self) -> Cmd<WheelMsg> {
        match self.engine.tick(&mut self.state, &self.roster) {
            Some(SpinEvent::Tick { face }) => {
                self.die_face = face;
                Cmd::after(TICK, self.state.delay(), WheelMsg::SpinTick)
            }
            Some(SpinEvent::Finished { winner }) => self.finish(winner),
            None => Cmd::none(),
        }
    }

    fn finish(&mut self, winner: Participant) -> Cmd<WheelMsg> {
        let result = WinnerResult::new(winner, Classification::Normal);
        self.status = match result.value.as_str() {
            "lucky" => StatusLine::accent("lucky wins. No agent today, fortune rides with you."),
            "handy" => StatusLine::accent("handy wins. Your own two hands take the keyboard."),
            name => StatusLine::accent(format!(
                "{} {name} takes the keyboard. Enter to launch.",
                theme::TARGET
            )),
        };
        self.pending = Some(result);
        self.celebration = Some(0);
        Cmd::after(CELEBRATION, CELEBRATION_INTERVAL, WheelMsg::CelebrationTick)
    }

    fn on_celebration(&mut self) -> Cmd<WheelMsg> {
        match self.celebration {
            Some(frame) if frame + 1 < CELEBRATION_FRAMES => {
                self.celebration = Some(frame + 1);
                Cmd::after(CELEBRATION, CELEBRATION_INTERVAL, WheelMsg::CelebrationTick)
            }
            _ => {
                self.celebration = None;
                Cmd::none()
            }
        }
    }

    fn frame_color(&self) -> Color {
        match self.celebration {
            Some(frame) => theme::BORDER_COLORS[frame % theme::BORDER_COLORS.len()],
            None => theme::FRAME,
        }
    }

    fn grid_size(&self) -> (u16, u16) {
        let (cols, rows) = if self.roster.len() <= 4 { (2, 2) } else { (3, 3) };
        (
            cols * CELL_WIDTH + (cols - 1) * GAP_X,
            rows * CELL_HEIGHT + (rows - 1) * GAP_Y,
        )
    }

    fn draw_slot(&self, buffer: &mut Buffer, origin: (u16, u16), index: usize) {
        let (col, row) = slot_cell(index, self.roster.len());
        let rect = Rect::new(
            origin.0 + col * (CELL_WIDTH + GAP_X),
            origin.1 + row * (CELL_HEIGHT + GAP_Y),
            CELL_WIDTH,
            CELL_HEIGHT,
        );
        let highlighted = index == self.state.current_index();
        let (bg, fg) = if highlighted {
            (theme::HIGHLIGHT_BG, Color::Black)
        } else {
            (theme::CELL_BG, Color::White)
        };
        let style = theme::base().fg(fg).bg(bg);
        buffer.fill(rect, style);
        let inner = Block::new(BorderKind::Rounded).border_style(style).draw(buffer, rect);
        if let Some(participant) = self.roster.get(index) {
            let style = if highlighted { style.bold() } else { style };
            buffer.set_str_centered(inner, inner.y, participant.as_str(), style);
        }
    }
}

impl Model for WheelScreen {
    type Message = WheelMsg;

    fn update(&mut self, msg: WheelMsg) -> Cmd<WheelMsg> {
        match msg {
            WheelMsg::Input(Event::Interrupt) => Cmd::quit(0),
            WheelMsg::Input(Event::Key(Key::Char('q')) | Event::Key(Key::Esc)) => Cmd::quit(0),
            WheelMsg::Input(Event::Key(Key::Char(' '))) => self.start_spin(),
            WheelMsg::Input(Event::Key(Key::Enter)) => {
                screens::execute_pending(self.pending.as_ref())
            }
            WheelMsg::Input(_) => Cmd::none(),
            WheelMsg::SpinTick => self.on_tick(),
            WheelMsg::CelebrationTick => self.on_celebration(),
        }
    }

    fn view(&self, buffer: &mut Buffer) {
        let area = screens::chrome(buffer, "space spin · enter run winner · q quit");
        let (grid_w, grid_h) = self.grid_size();

        let frame = Rect::new(
            area.x + area.width.saturating_sub(grid_w + 4) / 2,
            area.y + area.height.saturating_sub(grid_h + 4) / 2,
            grid_w + 4,
            grid_h + 4,
        );
        let frame_style = theme::base().fg(self.frame_color()).bold();
        Block::new(BorderKind::Double)
            .border_style(frame_style)
            .title(" 🎲 vibepick 🎲 ")
            .title_style(frame_style)
            .draw(buffer, frame);

        let origin = (frame.x + 2, frame.y + 2);
        for index in 0..self.roster.len() {
            self.draw_slot(buffer, origin, index);
        }

        // The center of the 3×3 ring shows the rolling die.
        if self.roster.len() > 4 {
            let center = Rect::new(
                origin.0 + CELL_WIDTH + GAP_X,
                origin.1 + CELL_HEIGHT + GAP_Y,
                CELL_WIDTH,
                CELL_HEIGHT,
            );
            let face = theme::base().fg(theme::ACCENT).bold();
            buffer.set_str_centered(center, center.y + 1, &self.die_face.to_string(), face);
        }

        let mut status = self.status.text.clone();
        if let Some(frame) = self.celebration {
            let emoji = theme::CELEBRATION_EMOJIS[frame % theme::CELEBRATION_EMOJIS.len()];
            status = format!("{emoji} {status} {emoji}");
        }
        if frame.bottom() + 1 < area.bottom() {
            buffer.set_str_centered(area, frame.bottom() + 1, &status, self.status.style);
        }
        if let Some(warning) = &self.warning {
            if frame.y >= 2 {
                let style = theme::base().fg(theme::ACCENT).italic();
                buffer.set_str_centered(area, frame.y - 2, warning, style);
            }
        }
    }
}

/// Clockwise perimeter cell for a slot index.
fn slot_cell(index: usize, roster_len: usize) -> (u16, u16) {
    if roster_len <= 4 {
        match index {
            0 => (0, 0),
            1 => (1, 0),
            2 => (1, 1),
            _ => (0, 1),
        }
    } else {
        match index {
            0 => (0, 0),
            1 => (1, 0),
            2 => (2, 0),
            3 => (2, 1),
            4 => (2, 2),
            5 => (1, 2),
            6 => (0, 2),
            _ => (0, 1),
        }
    }
}
