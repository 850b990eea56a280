#![forbid(unsafe_code)]

//! Core selection engines for vibepick.
//!
//! Three independent mini-games pick a single participant from a bounded
//! roster of detected commands:
//!
//! - [`spin`] — a wheel that walks one highlight index with decelerating
//!   ticks until it lands on a pre-chosen slot.
//! - [`slot`] — three staggered reels classified as jackpot / pair / no
//!   match once all of them stop.
//! - [`memory`] — a 4×4 flip-card grid where the last matched pair names
//!   the winner.
//!
//! [`roster`] builds the participant set the engines draw from, and
//! [`dispatch`] turns a winning name into a process replacement.
//!
//! Every engine is synchronous and timer-driven: the caller owns the clock,
//! asks the engine for the next delay and feeds ticks back in. Misuse
//! (ticking an idle engine, flipping a matched card, restarting a running
//! spin) is a no-op rather than an error, keeping the state machines total.

pub mod dispatch;
pub mod memory;
pub mod participant;
pub mod roster;
pub mod slot;
pub mod spin;

pub use dispatch::{DispatchError, Dispatched, dispatch};
pub use memory::{Card, FlipOutcome, MatchSession};
pub use participant::{Classification, Participant, WinnerResult};
pub use roster::{Roster, RosterBuilder, RosterError};
pub use slot::{Outcome, REEL_COUNT, SlotEvent, SlotMachine};
pub use spin::{SpinEngine, SpinError, SpinEvent, SpinState};
