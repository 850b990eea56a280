#![forbid(unsafe_code)]

//! The slot machine: three reels over the same item strip, a lever that
//! snaps back, and fireworks on a jackpot.

use std::time::Duration;

use vibepick_core::{Classification, Outcome, REEL_COUNT, SlotEvent, SlotMachine, WinnerResult};
use vibepick_tui::{Block, BorderKind, Buffer, Cmd, Color, Event, Key, Model, Rect, Style, TimerKey};

use crate::screens::{self, StatusLine};
use crate::theme;

const REEL_KEYS: [TimerKey; REEL_COUNT] = [
    TimerKey("slot.reel0"),
    TimerKey("slot.reel1"),
    TimerKey("slot.reel2"),
];
const LEVER: TimerKey = TimerKey("slot.lever");
const FIREWORKS: TimerKey = TimerKey("slot.fireworks");

const LEVER_SNAP: Duration = Duration::from_millis(500);
const FIREWORKS_TICKS: usize = 20;
const FIREWORKS_INTERVAL: Duration = Duration::from_millis(100);

const REEL_WIDTH: u16 = 20;
const REEL_HEIGHT: u16 = 7;
const REEL_GAP: u16 = 2;

pub enum SlotMsg {
    Input(Event),
    Reel(usize),
    LeverUp,
    FireworksTick,
}

impl From<Event> for SlotMsg {
    fn from(event: Event) -> Self {
        Self::Input(event)
    }
}

pub struct SlotScreen {
    machine: SlotMachine,
    outcome: Option<Outcome>,
    pending: Option<WinnerResult>,
    status: StatusLine,
    lever_down: bool,
    fireworks: Option<usize>,
}

impl SlotScreen {
    pub fn new(machine: SlotMachine) -> Self {
        Self {
            machine,
            outcome: None,
            pending: None,
            status: StatusLine::plain("Press Space to pull the lever."),
            lever_down: false,
            fireworks: None,
        }
    }

    fn pull_lever(&mut self) -> Cmd<SlotMsg> {
        if !self.machine.start_spin() {
            return Cmd::none();
        }
        self.outcome = None;
        self.pending = None;
        self.fireworks = None;
        self.lever_down = true;
        self.status = StatusLine::plain("Reels spinning...");

        let mut cmds = vec![
            Cmd::cancel(FIREWORKS),
            Cmd::after(LEVER, LEVER_SNAP, SlotMsg::LeverUp),
        ];
        for reel in 0..REEL_COUNT {
            if let Some(state) = self.machine.reel(reel) {
                cmds.push(Cmd::after(REEL_KEYS[reel], state.delay(), SlotMsg::Reel(reel)));
            }
        }
        Cmd::batch(cmds)
    }

    fn on_reel(&mut self, reel: usize) -> Cmd<SlotMsg> {
        let mut cmds = Vec::new();
        for event in self.machine.tick_reel(reel) {
            match event {
                SlotEvent::ReelTick { reel, .. } => {
                    if let Some(state) = self.machine.reel(reel) {
                        cmds.push(Cmd::after(
                            REEL_KEYS[reel],
                            state.delay(),
                            SlotMsg::Reel(reel),
                        ));
                    }
                }
                SlotEvent::ReelStopped { .. } => {}
                SlotEvent::AllStopped { outcome, .. } => {
                    cmds.push(self.settle(outcome));
                }
            }
        }
        Cmd::batch(cmds)
    }

    fn settle(&mut self, outcome: Outcome) -> Cmd<SlotMsg> {
        let mut cmd = Cmd::none();
        self.status = match &outcome {
            Outcome::Jackpot(value) => {
                self.fireworks = Some(0);
                cmd = Cmd::after(FIREWORKS, FIREWORKS_INTERVAL, SlotMsg::FireworksTick);
                if value.is_special() {
                    StatusLine::accent(format!(
                        "JACKPOT on {value}, but it only pays in bragging rights."
                    ))
                } else {
                    StatusLine::accent(format!("JACKPOT! {value} three times. Enter to launch."))
                }
            }
            Outcome::Pair(value) if value.is_special() => {
                StatusLine::accent(format!("Pair of {value}. Display only, spin again."))
            }
            Outcome::Pair(value) => {
                StatusLine::accent(format!("Pair of {value}. Enter to launch."))
            }
            Outcome::NoMatch => StatusLine::plain("No match. Space to spin again."),
        };
        self.pending = outcome.winner().map(|value| {
            let classification = match &outcome {
                Outcome::Jackpot(_) => Classification::Jackpot,
                Outcome::Pair(_) => Classification::Pair,
                Outcome::NoMatch => Classification::NoMatch,
            };
            WinnerResult::new(value.clone(), classification)
        });
        self.outcome = Some(outcome);
        cmd
    }

    fn on_fireworks(&mut self) -> Cmd<SlotMsg> {
        match self.fireworks {
            Some(tick) if tick + 1 < FIREWORKS_TICKS => {
                self.fireworks = Some(tick + 1);
                Cmd::after(FIREWORKS, FIREWORKS_INTERVAL, SlotMsg::FireworksTick)
            }
            _ => {
                self.fireworks = None;
                Cmd::none()
            }
        }
    }

    /// Border drawn around a reel once the round is settled.
    fn reel_border(&self, reel: usize) -> (BorderKind, Style) {
        let idle = (BorderKind::Square, theme::base().fg(theme::FRAME));
        let Some(outcome) = &self.outcome else {
            return idle;
        };
        match outcome {
            Outcome::Jackpot(_) => (
                BorderKind::Heavy,
                theme::base().fg(Color::Yellow).bold(),
            ),
            Outcome::Pair(value) => match self.machine.results() {
                Some(results) if results[reel] == value => (
                    BorderKind::Heavy,
                    theme::base().fg(Color::Yellow).bold(),
                ),
                _ => (BorderKind::Double, theme::base().fg(Color::Magenta)),
            },
            Outcome::NoMatch => idle,
        }
    }

    fn draw_reel(&self, buffer: &mut Buffer, rect: Rect, reel: usize) {
        let (kind, style) = self.reel_border(reel);
        let inner = Block::new(kind).border_style(style).draw(buffer, rect);
        let Some(state) = self.machine.reel(reel) else {
            return;
        };
        let items = self.machine.items();
        let len = items.len();
        let current = state.current_index();
        let prev = &items[(current + len - 1) % len];
        let next = &items[(current + 1) % len];

        let dim = theme::base().dim();
        let payline = theme::base().bg(theme::PAYLINE_BG).bold();
        let rule = theme::base().fg(theme::FRAME).dim();
        let mid = inner.y + inner.height / 2;

        buffer.set_str_centered(inner, mid - 2, prev.as_str(), dim);
        buffer.set_str_centered(inner, mid - 1, &"┄".repeat(inner.width as usize), rule);
        buffer.fill(Rect::new(inner.x, mid, inner.width, 1), payline);
        buffer.set_str_centered(inner, mid, &items[current].to_string(), payline);
        buffer.set_str_centered(inner, mid + 1, &"┄".repeat(inner.width as usize), rule);
        buffer.set_str_centered(inner, mid + 2, next.as_str(), dim);
    }
}

impl Model for SlotScreen {
    type Message = SlotMsg;

    fn update(&mut self, msg: SlotMsg) -> Cmd<SlotMsg> {
        match msg {
            SlotMsg::Input(Event::Interrupt) => Cmd::quit(0),
            SlotMsg::Input(Event::Key(Key::Char('q')) | Event::Key(Key::Esc)) => Cmd::quit(0),
            SlotMsg::Input(Event::Key(Key::Char(' '))) => self.pull_lever(),
            SlotMsg::Input(Event::Key(Key::Enter)) => {
                screens::execute_pending(self.pending.as_ref())
            }
            SlotMsg::Input(_) => Cmd::none(),
            SlotMsg::Reel(reel) => self.on_reel(reel),
            SlotMsg::LeverUp => {
                self.lever_down = false;
                Cmd::none()
            }
            SlotMsg::FireworksTick => self.on_fireworks(),
        }
    }

    fn view(&self, buffer: &mut Buffer) {
        let area = screens::chrome(buffer, "space pull · enter run winner · q quit");

        let strip_w = REEL_WIDTH * 3 + REEL_GAP * 2;
        let origin_x = area.x + area.width.saturating_sub(strip_w + 4) / 2;
        let origin_y = area.y + area.height.saturating_sub(REEL_HEIGHT) / 2;

        buffer.set_str_centered(
            area,
            origin_y.saturating_sub(2),
            "🎰 VIBE SLOTS 🎰",
            theme::base().fg(theme::ACCENT).bold(),
        );

        for reel in 0..REEL_COUNT {
            let rect = Rect::new(
                origin_x + reel as u16 * (REEL_WIDTH + REEL_GAP),
                origin_y,
                REEL_WIDTH,
                REEL_HEIGHT,
            );
            self.draw_reel(buffer, rect, reel);
        }

        // Lever mounted to the right of the strip.
        let lever = if self.lever_down {
            theme::LEVER_DOWN
        } else {
            theme::LEVER_UP
        };
        let lever_x = origin_x + strip_w + 2;
        for (row, line) in lever.lines().enumerate() {
            buffer.set_str(
                lever_x,
                origin_y + 1 + row as u16,
                line,
                theme::base().fg(Color::Red).bold(),
            );
        }

        if let Some(tick) = self.fireworks {
            let frame = theme::FIREWORKS_FRAMES[tick % theme::FIREWORKS_FRAMES.len()];
            let color = theme::ANIMATION_COLORS[tick % theme::ANIMATION_COLORS.len()];
            let top = origin_y + REEL_HEIGHT + 2;
            screens::draw_art(buffer, area, top, frame, theme::base().fg(color).bold());
        }

        let status_y = origin_y + REEL_HEIGHT + 1;
        if status_y < area.bottom() {
            buffer.set_str_centered(area, status_y, &self.status.text, self.status.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibepick_core::Participant;

    fn machine(seed: u64) -> SlotMachine {
        let items = ["kimi", "claude", "gemini", "codex"]
            .iter()
            .filter_map(|n| Participant::new(n))
            .collect();
        SlotMachine::with_seed(items, seed).unwrap()
    }

    fn run_round(screen: &mut SlotScreen) {
        screen.update(SlotMsg::Input(Event::Key(Key::Char(' '))));
        let mut guard = 0;
        while screen.machine.is_spinning() {
            for reel in 0..REEL_COUNT {
                screen.update(SlotMsg::Reel(reel));
            }
            guard += 1;
            assert!(guard < 1000, "round never settled");
        }
    }

    #[test]
    fn a_round_always_settles_with_an_outcome() {
        for seed in 0..20 {
            let mut screen = SlotScreen::new(machine(seed));
            run_round(&mut screen);
            let outcome = screen.outcome.as_ref().unwrap();
            match outcome {
                Outcome::Jackpot(_) => assert!(screen.fireworks.is_some()),
                Outcome::Pair(_) => assert!(screen.pending.is_some()),
                Outcome::NoMatch => assert!(screen.pending.is_none()),
            }
        }
    }

    #[test]
    fn pending_winner_matches_the_outcome() {
        for seed in 0..50 {
            let mut screen = SlotScreen::new(machine(seed));
            run_round(&mut screen);
            match (&screen.outcome, &screen.pending) {
                (Some(Outcome::Jackpot(v) | Outcome::Pair(v)), Some(pending)) => {
                    assert_eq!(&pending.value, v);
                    assert!(pending.dispatchable());
                }
                (Some(Outcome::NoMatch), None) => {}
                other => panic!("inconsistent settle state {other:?}"),
            }
        }
    }

    #[test]
    fn lever_snaps_back_on_its_timer() {
        let mut screen = SlotScreen::new(machine(1));
        screen.update(SlotMsg::Input(Event::Key(Key::Char(' '))));
        assert!(screen.lever_down);
        screen.update(SlotMsg::LeverUp);
        assert!(!screen.lever_down);
    }

    #[test]
    fn pulling_mid_spin_is_ignored() {
        let mut screen = SlotScreen::new(machine(2));
        screen.update(SlotMsg::Input(Event::Key(Key::Char(' '))));
        let cmd = screen.update(SlotMsg::Input(Event::Key(Key::Char(' '))));
        assert!(matches!(cmd, Cmd::None));
        assert!(screen.machine.is_spinning());
    }
}
