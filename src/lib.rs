//! A typewriter-style reveal animation for lines of text in the terminal.
//!
//! Every line is revealed one character per tick, in lockstep, until the longest line is complete;
//! the finished text is then held for a moment. Pressing the terminate key (Escape by default)
//! ends the animation early.
//!
//! # Examples
//!
//! Reveal two lines using the Crossterm backend:
//!
//! ```no_run
//! use typewriter::{Crossterm, Typewriter};
//!
//! let mut typewriter = Typewriter::new();
//! typewriter.add_line("Hello World!");
//! typewriter.add_line("Press Escape to skip.");
//!
//! typewriter.play(Crossterm::default())?;
//! # Ok::<(), typewriter::Error<std::io::Error>>(())
//! ```
//!
//! Tests can drive the animation with the [`Dummy`] backend, which records every frame:
//!
//! ```
//! use std::time::Duration;
//! use typewriter::{Dummy, Finish, Terminal, Typewriter};
//!
//! let mut terminal = Terminal::new(Dummy::new((10, 2)))?;
//! let mut typewriter = Typewriter::new()
//!     .with_tick_interval(Duration::from_millis(1))
//!     .with_hold_duration(Duration::ZERO)
//!     .with_lines(["Hi", "Yo!"]);
//!
//! assert_eq!(typewriter.run_blocking(&mut terminal)?, Finish::Completed);
//! assert_eq!(
//!     terminal.backend().frames,
//!     [vec!["H", "Y"], vec!["Hi", "Yo"], vec!["Hi", "Yo!"]],
//! );
//! # Ok::<(), typewriter::Error<typewriter::backend::DummyError>>(())
//! ```
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
#![warn(
    clippy::pedantic,
    rust_2018_idioms,
    missing_docs,
    unused_qualifications,
    missing_debug_implementations
)]
#![allow(
    // `as u16` is used for grid coordinates, which are guaranteed not to exceed u16.
    clippy::cast_possible_truncation,
    clippy::non_ascii_literal
)]

#[cfg(feature = "crossterm")]
#[doc(no_inline)]
pub use backend::Crossterm;
#[doc(no_inline)]
pub use backend::{Backend, Dummy};
pub use buffer::Grid;
pub use input::{Key, KeyPress, Modifiers, ParseKeyError};
pub use output::Output;
pub use style::{Color, Style};
pub use terminal::{Error, Screen, Terminal};
pub use typewriter::{
    frame, longest_line, Finish, Typewriter, DEFAULT_HOLD_DURATION, DEFAULT_TICK_INTERVAL,
};
pub use vec2::Vec2;

pub mod backend;
pub mod buffer;
pub mod input;
pub mod output;
pub mod style;
mod terminal;
mod typewriter;
mod vec2;
