use std::fmt::{self, Debug, Formatter};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use os_pipe::PipeReader;
use thiserror::Error;

use crate::backend::{Backend, Bound, Tty};
use crate::buffer::Grid;
use crate::{Output, Style, Vec2};

static TERMINAL_EXISTS: AtomicBool = AtomicBool::new(false);

/// A terminal which frames can be drawn to and keys read from.
///
/// Creating a terminal takes over the TTY (raw mode, alternate screen, captured stdio); it is
/// given back when the terminal is [cleaned up](Self::cleanup) or dropped, on every exit path.
///
/// For backends that aren't dummies, only one terminal may exist at once; attempting to
/// create more than one at once will panic.
pub struct Terminal<B: Backend> {
    screen: Screen<B::Bound>,
    events: B::Events,
    /// The captured stdout and stderr.
    captured: Option<PipeReader>,
}

impl<B: Backend> Terminal<B> {
    /// Create a new terminal with the given backend.
    ///
    /// # Panics
    ///
    /// Panics if the backend is not a dummy and a terminal already exists.
    ///
    /// # Errors
    ///
    /// Fails if setting up the terminal fails.
    pub fn new(backend: B) -> Result<Self, Error<B::Error>> {
        if !B::is_dummy() && TERMINAL_EXISTS.swap(true, Ordering::Acquire) {
            panic!("Terminal already exists!");
        }

        let bound = Self::bind(backend);
        if bound.is_err() && !B::is_dummy() {
            TERMINAL_EXISTS.store(false, Ordering::Release);
        }
        let (bound, events, captured) = bound?;

        // From here on `Drop` resets the backend if anything fails.
        let mut terminal = Self {
            screen: Screen {
                backend: Some(bound),
                old_grid: Grid::default(),
                grid: Grid::default(),
                cursor_pos: None,
                style: Style::default(),
            },
            events,
            captured,
        };
        terminal.screen.init()?;

        Ok(terminal)
    }

    fn bind(
        backend: B,
    ) -> Result<(B::Bound, B::Events, Option<PipeReader>), Error<B::Error>> {
        let (tty, captured) = if B::is_dummy() {
            (Tty::dummy(), None)
        } else {
            let (tty, captured) = Tty::new().map_err(Error::Io)?;
            (tty, Some(captured))
        };

        let (bound, events) = backend.bind(tty)?;
        Ok((bound, events, captured))
    }

    /// Get the drawing half of the terminal.
    #[must_use]
    pub fn screen(&self) -> &Screen<B::Bound> {
        &self.screen
    }

    /// Get the drawing half of the terminal mutably.
    #[must_use]
    pub fn screen_mut(&mut self) -> &mut Screen<B::Bound> {
        &mut self.screen
    }

    /// Get the input half of the terminal.
    #[must_use]
    pub fn events_mut(&mut self) -> &mut B::Events {
        &mut self.events
    }

    /// Borrow the drawing and input halves at the same time, so one task can draw while another
    /// waits for input.
    #[must_use]
    pub fn split(&mut self) -> (&mut Screen<B::Bound>, &mut B::Events) {
        (&mut self.screen, &mut self.events)
    }

    /// Get a reference to the terminal's backend.
    #[must_use]
    pub fn backend(&self) -> &B::Bound {
        self.screen.backend()
    }

    /// Clean up the terminal.
    ///
    /// This will be called in the destructor too, but use this if you want to handle errors
    /// instead of ignoring them.
    ///
    /// # Errors
    ///
    /// Fails if cleaning up the backend fails.
    pub fn cleanup(mut self) -> Result<(), Error<B::Error>> {
        self.cleanup_inner()
    }

    fn cleanup_inner(&mut self) -> Result<(), Error<B::Error>> {
        if let Some(backend) = self.screen.backend.take() {
            backend.reset()?.cleanup().map_err(Error::Io)?;
        }

        if let Some(mut captured) = self.captured.take() {
            io::copy(&mut captured, &mut io::stdout()).map_err(Error::Io)?;
        }

        Ok(())
    }
}

impl<B: Backend> Drop for Terminal<B> {
    fn drop(&mut self) {
        let _ = self.cleanup_inner();

        if !B::is_dummy() {
            TERMINAL_EXISTS.store(false, Ordering::Release);
        }
    }
}

impl<B: Backend> Debug for Terminal<B>
where
    B::Bound: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("screen", &self.screen)
            .field("capturing", &self.captured.is_some())
            .finish_non_exhaustive()
    }
}

/// The drawing half of a [`Terminal`].
///
/// Cells are written into a back buffer through the [`Output`] impl. [`flush`](Self::flush)
/// compares the back buffer against the last flushed one and sends only the changed cells to the
/// backend. The back buffer keeps its contents across flushes; [`Output::clear`] it to start a
/// frame from scratch.
#[derive(Debug)]
pub struct Screen<T> {
    /// Only `None` during destruction of the terminal.
    backend: Option<T>,
    /// Holds the previous frame to diff against.
    old_grid: Grid,
    grid: Grid,
    /// The current position of the backend's cursor. `None` when unknown, such as after writing
    /// to the last column.
    cursor_pos: Option<Vec2<u16>>,
    /// The current style being written with.
    style: Style,
}

impl<T: Bound> Screen<T> {
    fn init(&mut self) -> Result<(), Error<T::Error>> {
        let backend = self.backend_mut();

        backend.hide_cursor()?;
        backend.set_cursor_pos(Vec2::default())?;
        backend.set_foreground(Style::default().foreground)?;
        backend.set_background(Style::default().background)?;

        let size = backend.size()?;
        self.grid = Grid::new(size);
        self.old_grid = Grid::new(size);
        self.cursor_pos = Some(Vec2::default());
        self.style = Style::default();

        Ok(())
    }

    /// Send the changes made since the last flush to the backend and flush it.
    ///
    /// # Errors
    ///
    /// Fails when drawing to the backend fails.
    pub fn flush(&mut self) -> Result<(), Error<T::Error>> {
        self.diff()?;
        self.backend_mut().flush()?;
        self.old_grid.clone_from(&self.grid);
        Ok(())
    }

    /// Diffs `old_grid` and `grid` and draws the changed cells to the backend.
    fn diff(&mut self) -> Result<(), Error<T::Error>> {
        let backend = self
            .backend
            .as_mut()
            .expect("screen used after its terminal was cleaned up");
        let width = self.grid.width();

        for (y, (old_row, new_row)) in self
            .old_grid
            .rows()
            .iter()
            .zip(self.grid.rows())
            .enumerate()
        {
            for (x, (old_cell, new_cell)) in
                old_row.cells().iter().zip(new_row.cells()).enumerate()
            {
                if new_cell == old_cell {
                    continue;
                }

                let pos = Vec2::new(x as u16, y as u16);

                if self.style.foreground != new_cell.style.foreground {
                    backend.set_foreground(new_cell.style.foreground)?;
                }
                if self.style.background != new_cell.style.background {
                    backend.set_background(new_cell.style.background)?;
                }
                self.style = new_cell.style;

                if self.cursor_pos != Some(pos) {
                    backend.set_cursor_pos(pos)?;
                }

                backend.write(new_cell.contents.encode_utf8(&mut [0; 4]))?;

                // Terminals differ on where the cursor ends up after writing to the last column.
                self.cursor_pos = if pos.x + 1 < width {
                    Some(Vec2::new(pos.x + 1, pos.y))
                } else {
                    None
                };
            }
        }

        Ok(())
    }

    /// Get the contents of the back buffer.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get a reference to the backend.
    #[must_use]
    pub fn backend(&self) -> &T {
        self.backend
            .as_ref()
            .expect("screen used after its terminal was cleaned up")
    }

    /// Get a mutable reference to the backend.
    #[must_use]
    pub fn backend_mut(&mut self) -> &mut T {
        self.backend
            .as_mut()
            .expect("screen used after its terminal was cleaned up")
    }
}

impl<T> Output for Screen<T> {
    fn size(&self) -> Vec2<u16> {
        self.grid.size()
    }
    fn write_char(&mut self, pos: Vec2<u16>, c: char, style: Style) {
        self.grid.write_char(pos, c, style);
    }
    fn clear(&mut self) {
        self.grid.clear();
    }
}

/// An error drawing to or reading from a terminal.
///
/// Backend failures are passed through unmodified.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error<B> {
    /// An error in the backend.
    #[error(transparent)]
    Backend(B),
    /// An I/O error setting up or tearing down the TTY.
    #[error(transparent)]
    Io(io::Error),
}

impl<B> From<B> for Error<B> {
    fn from(e: B) -> Self {
        Self::Backend(e)
    }
}
