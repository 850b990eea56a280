#![forbid(unsafe_code)]

//! Terminal runtime for vibepick.
//!
//! A deliberately small stack: an RAII [`session::Session`] guard that owns
//! raw mode and the alternate screen, a wide-char-aware cell
//! [`buffer::Buffer`] repainted whole each frame, bordered [`block::Block`]
//! drawing, and an Elm-style [`program::Program`] loop with keyed,
//! cancellable timers.
//!
//! The games never talk to the terminal directly: they implement
//! [`program::Model`], return [`program::Cmd`]s from `update` and paint
//! into the buffer from `view`.

pub mod block;
pub mod buffer;
pub mod event;
pub mod program;
pub mod session;

pub use block::{Block, BorderKind};
pub use buffer::{Buffer, Color, Rect, Style};
pub use event::{Event, Key, MouseClick};
pub use program::{Cmd, Model, Program, TimerKey};
pub use session::{Session, SessionOptions, terminal_size};
