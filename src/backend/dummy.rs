use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_io::Timer;
use thiserror::Error;

use crate::style::{Color, Style};
use crate::{Grid, KeyPress, Output, Vec2};

use super::{Backend, Bound, ReadEvents, TerminalEvent, Tty};

/// A dummy backend for testing.
///
/// This backend doesn't display any output to the screen. Its drawing half records all the
/// operations it receives into a grid and a log, and its input half replays a script of events.
#[derive(Debug, Clone)]
pub struct Dummy {
    /// The size of the dummy terminal.
    pub size: Vec2<u16>,
    /// Events to feed the terminal, each preceded by a delay. They will be popped from the front
    /// of the queue; the delay is counted from when the event is requested.
    ///
    /// If this is empty and the terminal requests an event it will wait forever.
    pub events: VecDeque<(Duration, TerminalEvent)>,
    /// Fail every flush after this many flushes have succeeded.
    pub fail_after_flushes: Option<usize>,
}

impl Dummy {
    /// Create a new dummy backend with the given size and no events.
    #[must_use]
    pub fn new(size: impl Into<Vec2<u16>>) -> Self {
        Self {
            size: size.into(),
            events: VecDeque::new(),
            fail_after_flushes: None,
        }
    }

    /// Queue a key press, delivered `after` the previous event was delivered.
    #[must_use]
    pub fn with_key(mut self, after: Duration, key: impl Into<KeyPress>) -> Self {
        self.events
            .push_back((after, TerminalEvent::Key(key.into())));
        self
    }

    /// Queue an arbitrary event, delivered `after` the previous event was delivered.
    #[must_use]
    pub fn with_event(mut self, after: Duration, event: TerminalEvent) -> Self {
        self.events.push_back((after, event));
        self
    }

    /// Make every flush after the first `flushes` fail with [`DummyError`].
    #[must_use]
    pub fn failing_after(mut self, flushes: usize) -> Self {
        self.fail_after_flushes = Some(flushes);
        self
    }
}

/// The error produced by a [`Dummy`] configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dummy backend failed to flush")]
pub struct DummyError;

/// An operation on a terminal backend, stored by [`DummyBound`].
///
/// Each variant corresponds to a method on the [`Bound`] trait.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Operation {
    /// The cursor was hidden.
    HideCursor,
    /// The position of the cursor was set.
    SetCursorPos(Vec2<u16>),
    /// The foreground color was set.
    SetForeground(Color),
    /// The background color was set.
    SetBackground(Color),
    /// Text was written to the output.
    Write(String),
    /// The output was flushed.
    Flush,
}

/// The drawing half of the [`Dummy`] backend.
#[derive(Debug)]
pub struct DummyBound {
    /// The operations the dummy backend has received.
    pub operations: Vec<Operation>,
    /// The grid the dummy backend writes to.
    pub grid: Grid,
    /// The visible text of the grid at each flush, in order.
    pub frames: Vec<Vec<String>>,
    /// The current position of the cursor.
    pub cursor_pos: Vec2<u16>,
    /// Whether the cursor is hidden.
    pub cursor_hidden: bool,
    /// The current style being written with.
    pub style: Style,
    fail_after_flushes: Option<usize>,
}

impl Backend for Dummy {
    type Error = DummyError;
    type Bound = DummyBound;
    type Events = DummyEvents;

    fn bind(self, _io: Tty) -> Result<(Self::Bound, Self::Events), Self::Error> {
        Ok((
            DummyBound {
                operations: Vec::new(),
                grid: Grid::new(self.size),
                frames: Vec::new(),
                cursor_pos: Vec2::new(0, 0),
                cursor_hidden: false,
                style: Style::default(),
                fail_after_flushes: self.fail_after_flushes,
            },
            DummyEvents {
                pending: self.events,
            },
        ))
    }

    fn is_dummy() -> bool {
        true
    }
}

impl Bound for DummyBound {
    type Error = DummyError;

    fn size(&mut self) -> Result<Vec2<u16>, Self::Error> {
        Ok(self.grid.size())
    }

    fn hide_cursor(&mut self) -> Result<(), Self::Error> {
        self.operations.push(Operation::HideCursor);
        self.cursor_hidden = true;
        Ok(())
    }
    fn set_cursor_pos(&mut self, pos: Vec2<u16>) -> Result<(), Self::Error> {
        self.operations.push(Operation::SetCursorPos(pos));
        self.cursor_pos = pos;
        Ok(())
    }

    fn set_foreground(&mut self, foreground: Color) -> Result<(), Self::Error> {
        self.operations.push(Operation::SetForeground(foreground));
        self.style.foreground = foreground;
        Ok(())
    }
    fn set_background(&mut self, background: Color) -> Result<(), Self::Error> {
        self.operations.push(Operation::SetBackground(background));
        self.style.background = background;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), Self::Error> {
        self.operations.push(Operation::Write(text.to_owned()));

        let grid_width = self.grid.width();
        for c in text.chars() {
            self.grid.write_char(self.cursor_pos, c, self.style);

            let x = self.cursor_pos.x + 1;
            self.cursor_pos = Vec2 {
                x: x % grid_width,
                y: self.cursor_pos.y + x / grid_width,
            };
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if let Some(remaining) = &mut self.fail_after_flushes {
            if *remaining == 0 {
                return Err(DummyError);
            }
            *remaining -= 1;
        }
        self.operations.push(Operation::Flush);
        self.frames.push(self.grid.visible_lines());
        Ok(())
    }
    fn reset(self) -> Result<Tty, Self::Error> {
        Ok(Tty::dummy())
    }
}

/// The input half of the [`Dummy`] backend.
#[derive(Debug)]
pub struct DummyEvents {
    /// The events still to be delivered.
    pub pending: VecDeque<(Duration, TerminalEvent)>,
}

impl<'a> ReadEvents<'a> for DummyEvents {
    type EventError = DummyError;
    type EventFuture = Pin<Box<dyn Future<Output = Result<TerminalEvent, DummyError>> + 'a>>;

    fn read_event(&'a mut self) -> Self::EventFuture {
        // The event is only popped once its delay has passed, so a dropped read loses nothing.
        Box::pin(async move {
            loop {
                match self.pending.front() {
                    Some(&(after, _)) => Timer::after(after).await,
                    None => futures_lite::future::pending().await,
                };
                if let Some((_, event)) = self.pending.pop_front() {
                    return Ok(event);
                }
            }
        })
    }
}
