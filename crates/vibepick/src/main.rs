#![forbid(unsafe_code)]

//! Entry point: parse the mode, assemble the game inputs and hand the
//! terminal to the chosen screen. The process exit code comes back from
//! the program loop (or from the dispatcher, which usually never returns).

mod cli;
mod screens;
mod theme;

use std::io;
use std::process;

use tracing::debug;
use vibepick_core::participant::KNOWN_VIBERS;
use vibepick_core::{MatchSession, Participant, Roster, RosterBuilder, SlotMachine};
use vibepick_tui::{Program, SessionOptions};

use crate::cli::Mode;
use crate::screens::{FlipScreen, SlotScreen, WheelScreen};

fn main() {
    let mode = cli::parse(std::env::args().skip(1));
    match run(mode) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("[vibepick] {err}");
            process::exit(1);
        }
    }
}

fn run(mode: Mode) -> io::Result<i32> {
    match mode {
        Mode::Help => {
            println!("{}", cli::HELP_TEXT);
            Ok(0)
        }
        Mode::Version => {
            println!("{}", cli::version_line());
            Ok(0)
        }
        Mode::Wheel(names) => {
            let roster = if names.is_empty() {
                detect_roster()
            } else {
                match Roster::from_names(&names) {
                    Ok(roster) => roster,
                    Err(err) => {
                        eprintln!("[vibepick] {err}");
                        return Ok(1);
                    }
                }
            };
            let screen = WheelScreen::new(roster);
            Program::new(screen, session_options(false))?.run()
        }
        Mode::Slot => {
            let machine = SlotMachine::new(detected_participants()).map_err(io::Error::other)?;
            let screen = SlotScreen::new(machine);
            Program::new(screen, session_options(false))?.run()
        }
        Mode::Flip => {
            let values = flip_values().map_err(io::Error::other)?;
            let screen = FlipScreen::new(MatchSession::new(values), vibepick_tui::terminal_size()?);
            Program::new(screen, session_options(true))?.run()
        }
    }
}

fn session_options(mouse: bool) -> SessionOptions {
    SessionOptions {
        alternate_screen: true,
        mouse_capture: mouse,
    }
}

/// Scan PATH for vibers; an empty machine falls back to an all-handy
/// roster rather than failing, matching the promise that the wheel always
/// has something to spin.
fn detect_roster() -> Roster {
    RosterBuilder::new().detect().unwrap_or_else(|err| {
        debug!(%err, "detection found nothing, using fallback roster");
        Roster::fallback()
    })
}

/// Items for the slot reels: whatever detection produced, or the full
/// known list when nothing is installed (the reels only display names, so
/// an uninstalled name merely loses at dispatch time).
fn detected_participants() -> Vec<Participant> {
    match RosterBuilder::new().detect() {
        Ok(roster) => roster.participants().to_vec(),
        Err(_) => KNOWN_VIBERS
            .iter()
            .filter_map(|name| Participant::new(name))
            .collect(),
    }
}

/// Eight distinct values for the card pairs. Detection only qualifies
/// when it fills all eight slots; otherwise the full known list plays.
fn flip_values() -> Result<[Participant; 8], &'static str> {
    let detected = RosterBuilder::new().detect();
    let values: Vec<Participant> = match detected {
        Ok(roster) if roster.len() == 8 => roster.participants().to_vec(),
        _ => KNOWN_VIBERS
            .iter()
            .filter_map(|name| Participant::new(name))
            .collect(),
    };
    values
        .try_into()
        .map_err(|_| "expected exactly eight card values")
}
