//! Terminal backends.
//!
//! A [`Backend`] is consumed when a [`Terminal`](crate::Terminal) is created and split into two
//! halves: a [`Bound`] that receives drawing commands and a [`ReadEvents`] that produces input.
//! Keeping them apart lets the reveal loop draw while the key watcher is waiting on input.

use std::future::Future;

use crate::{Color, KeyPress, Vec2};

#[cfg(feature = "crossterm")]
mod crossterm;
mod dummy;
mod tty;

#[cfg(feature = "crossterm")]
pub use self::crossterm::{Crossterm, CrosstermBound, CrosstermEvents};
pub use self::dummy::*;
pub use self::tty::Tty;

/// A way of talking to a terminal.
pub trait Backend {
    /// Failure of any operation on either half.
    type Error;
    /// The half that draws.
    type Bound: Bound<Error = Self::Error>;
    /// The half that reads input.
    type Events: for<'a> ReadEvents<'a, EventError = Self::Error>;

    /// Take over `io` and split into the drawing and input halves.
    ///
    /// # Errors
    ///
    /// Fails if the terminal can't be put into the state the backend needs.
    fn bind(self, io: Tty) -> Result<(Self::Bound, Self::Events), Self::Error>;

    /// Dummy backends get a [`Tty`] that discards output, leave stdio alone and may have many
    /// terminals alive at once. `false` unless overridden.
    #[must_use]
    fn is_dummy() -> bool {
        false
    }
}

/// The drawing half of a [`Backend`].
///
/// Commands may be buffered until [`flush`](Self::flush).
#[allow(clippy::missing_errors_doc)]
pub trait Bound: Sized {
    /// Failure of a drawing command.
    type Error;

    /// Columns and rows of the terminal.
    fn size(&mut self) -> Result<Vec2<u16>, Self::Error>;

    /// Stop showing the cursor.
    fn hide_cursor(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to a zero-indexed cell.
    fn set_cursor_pos(&mut self, pos: Vec2<u16>) -> Result<(), Self::Error>;

    /// Color used for text written from now on.
    fn set_foreground(&mut self, foreground: Color) -> Result<(), Self::Error>;

    /// Fill color used for cells written from now on.
    fn set_background(&mut self, background: Color) -> Result<(), Self::Error>;

    /// Write `text` at the cursor. Every code point takes one column and moves the cursor right.
    ///
    /// `text` never contains control characters.
    fn write(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Send everything buffered to the terminal.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Undo what [`Backend::bind`] did and hand back the TTY. Called exactly once, when the
    /// terminal is cleaned up.
    fn reset(self) -> Result<Tty, Self::Error>;
}

/// The input half of a [`Backend`].
pub trait ReadEvents<'a> {
    /// Failure reading input. Always the same type as [`Bound::Error`].
    type EventError;

    /// Resolves to the next event.
    ///
    /// Dropping it before it resolves must not lose or half-read an event.
    type EventFuture: Future<Output = Result<TerminalEvent, Self::EventError>> + 'a;

    /// Wait for the next event.
    fn read_event(&'a mut self) -> Self::EventFuture;
}

/// Something that happened on the terminal.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key was pressed.
    Key(KeyPress),
    /// The terminal changed size to the contained columns and rows.
    Resize(Vec2<u16>),
}
