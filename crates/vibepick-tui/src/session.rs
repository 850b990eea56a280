#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII wrapper around raw mode, the alternate screen and mouse capture.
//! Dropping the guard restores everything in reverse order of enabling,
//! including during panic unwinding, so no exit path leaves the terminal
//! in a broken state.
//!
//! [`Session::suspend`] releases the terminal without consuming the guard;
//! the program loop uses it right before attempting to replace the process
//! image, and [`Session::resume`] re-enters the modes if the exec attempt
//! is refused and the UI keeps running.

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use tracing::debug;

/// Current terminal size in cells.
///
/// Models that hit-test mouse clicks against a layout need the size
/// before the program loop starts feeding them resize events.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    crossterm::terminal::size()
}

/// Which terminal modes a session enables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,
    /// Capture left-button mouse presses (the flip-card game wants them).
    pub mouse_capture: bool,
}

/// Active terminal session. Restores the terminal on drop.
pub struct Session {
    options: SessionOptions,
    active: bool,
}

impl Session {
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        let mut session = Self {
            options,
            active: false,
        };
        session.resume()?;
        Ok(session)
    }

    /// Re-enter raw mode and the configured screen modes.
    pub fn resume(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode()?;
        let mut out = io::stdout();
        if self.options.alternate_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        execute!(out, cursor::Hide)?;
        if self.options.mouse_capture {
            execute!(out, EnableMouseCapture)?;
        }
        self.active = true;
        debug!("terminal session active");
        Ok(())
    }

    /// Restore the terminal without dropping the guard.
    ///
    /// Cleanup runs in reverse order of enabling. Safe to call twice.
    pub fn suspend(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut out = io::stdout();
        if self.options.mouse_capture {
            execute!(out, DisableMouseCapture)?;
        }
        execute!(out, cursor::Show)?;
        if self.options.alternate_screen {
            execute!(out, LeaveAlternateScreen)?;
        }
        disable_raw_mode()?;
        out.flush()?;
        debug!("terminal session suspended");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Errors are unreportable mid-unwind.
        let _ = self.suspend();
    }
}
