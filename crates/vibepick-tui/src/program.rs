#![forbid(unsafe_code)]

//! Elm-style program loop.
//!
//! A model owns all game state, consumes messages and returns commands;
//! the program turns terminal input and due timers into messages, repaints
//! after every update and executes the side effects.
//!
//! Timers are keyed: scheduling on a key that already has a pending timer
//! replaces it, and [`Cmd::Cancel`] drops it. That gives each animation
//! (wheel tick, per-reel tick, unflip delay, celebration frame) exactly
//! one pending callback, and resetting a game cannot leave a stale tick
//! behind to mutate post-reset state. Everything runs on this one thread;
//! ticks for a given key are strictly sequential by construction.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::debug;
use vibepick_core::dispatch::{self, Dispatched};

use crate::buffer::Buffer;
use crate::event::{self, Event};
use crate::session::{Session, SessionOptions};

/// Longest the loop sleeps with no timer pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Identifies one logical timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerKey(pub &'static str);

/// Side effects returned from [`Model::update`].
pub enum Cmd<M> {
    /// Nothing to do.
    None,
    /// Stop the loop and exit with this code.
    Quit(i32),
    /// Feed another message through `update` immediately.
    Msg(M),
    /// Run several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Deliver `msg` after `delay`, replacing any pending timer on `key`.
    After {
        key: TimerKey,
        delay: Duration,
        msg: M,
    },
    /// Drop the pending timer on `key`, if any.
    Cancel(TimerKey),
    /// Restore the terminal and replace this process with the winner.
    Exec(String),
}

impl<M> Cmd<M> {
    pub fn none() -> Self {
        Self::None
    }

    pub fn quit(code: i32) -> Self {
        Self::Quit(code)
    }

    pub fn msg(msg: M) -> Self {
        Self::Msg(msg)
    }

    pub fn batch(cmds: Vec<Self>) -> Self {
        Self::Batch(cmds)
    }

    pub fn after(key: TimerKey, delay: Duration, msg: M) -> Self {
        Self::After { key, delay, msg }
    }

    pub fn cancel(key: TimerKey) -> Self {
        Self::Cancel(key)
    }

    pub fn exec(winner: impl Into<String>) -> Self {
        Self::Exec(winner.into())
    }
}

/// Application state and behavior.
pub trait Model {
    /// Messages driving this model; terminal events convert into them.
    type Message: From<Event>;

    /// Startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::None
    }

    /// State transition. Returns the side effects to run.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Paint the current state.
    fn view(&self, buffer: &mut Buffer);
}

struct Timer<M> {
    key: TimerKey,
    due: Instant,
    msg: M,
}

/// Pending keyed timers, at most one per key.
struct TimerQueue<M> {
    timers: Vec<Timer<M>>,
}

impl<M> TimerQueue<M> {
    fn new() -> Self {
        Self { timers: Vec::new() }
    }

    fn schedule(&mut self, key: TimerKey, delay: Duration, msg: M, now: Instant) {
        self.cancel(key);
        self.timers.push(Timer {
            key,
            due: now + delay,
            msg,
        });
    }

    fn cancel(&mut self, key: TimerKey) {
        self.timers.retain(|timer| timer.key != key);
    }

    /// Time until the earliest timer fires, capped for idle polling.
    fn next_timeout(&self, now: Instant) -> Duration {
        self.timers
            .iter()
            .map(|timer| timer.due.saturating_duration_since(now))
            .min()
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL)
    }

    /// Remove and return the earliest due timer's message, if any.
    fn pop_due(&mut self, now: Instant) -> Option<M> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| timer.due)
            .map(|(index, _)| index)?;
        Some(self.timers.swap_remove(position).msg)
    }
}

/// The runtime: session, buffer, timer queue and the model.
pub struct Program<M: Model> {
    model: M,
    session: Session,
    buffer: Buffer,
    timers: TimerQueue<M::Message>,
    exit: Option<i32>,
}

impl<M: Model> Program<M> {
    pub fn new(model: M, options: SessionOptions) -> io::Result<Self> {
        let session = Session::new(options)?;
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self {
            model,
            session,
            buffer: Buffer::new(width, height),
            timers: TimerQueue::new(),
            exit: None,
        })
    }

    /// Terminal size at startup, for models that pre-compute layout.
    pub fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    /// Run until the model quits or a dispatch ends the process.
    ///
    /// Returns the exit code the process should finish with.
    pub fn run(mut self) -> io::Result<i32> {
        let cmd = self.model.init();
        self.apply(cmd)?;

        loop {
            self.draw()?;
            if let Some(code) = self.exit {
                return Ok(code);
            }

            let timeout = self.timers.next_timeout(Instant::now());
            if let Some(event) = event::poll_event(timeout)? {
                if let Event::Resize(width, height) = event {
                    self.buffer.resize(width, height);
                }
                let cmd = self.model.update(event.into());
                self.apply(cmd)?;
            }

            // Fire everything that came due, oldest first, one update per
            // message so a handler can reschedule before the next fires.
            while let Some(msg) = self.timers.pop_due(Instant::now()) {
                let cmd = self.model.update(msg);
                self.apply(cmd)?;
                if self.exit.is_some() {
                    break;
                }
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        self.buffer.clear();
        self.model.view(&mut self.buffer);
        let mut out = io::stdout().lock();
        self.buffer.present(&mut out)?;
        out.flush()
    }

    fn apply(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Quit(code) => self.exit = Some(code),
            Cmd::Msg(msg) => {
                let next = self.model.update(msg);
                self.apply(next)?;
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.apply(cmd)?;
                }
            }
            Cmd::After { key, delay, msg } => {
                self.timers.schedule(key, delay, msg, Instant::now());
            }
            Cmd::Cancel(key) => self.timers.cancel(key),
            Cmd::Exec(winner) => self.exec(&winner)?,
        }
        Ok(())
    }

    /// Two-phase dispatch: give the terminal back, then try to replace the
    /// process. On Unix success this never returns.
    fn exec(&mut self, winner: &str) -> io::Result<()> {
        self.session.suspend()?;
        match dispatch::dispatch(winner) {
            Ok(Dispatched::Nothing) => self.exit = Some(0),
            Ok(Dispatched::Completed(code)) => self.exit = Some(code),
            Ok(Dispatched::Refused) => {
                // Display-only winner slipped through; keep the UI alive.
                debug!(winner, "dispatch refused, resuming");
                self.session.resume()?;
            }
            Err(err) => {
                eprintln!("[vibepick] {err}");
                self.exit = Some(err.exit_code());
            }
        }
        Ok(())
    }
}
