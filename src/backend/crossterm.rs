use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Color as CColor};
use crossterm::{cursor, terminal};
use crossterm::{execute, queue};
use crossterm_crate as crossterm;
use futures_lite::StreamExt;

use crate::input::{Key, KeyPress, Modifiers};
use crate::style::Color;
use crate::Vec2;

use super::{Backend, ReadEvents, TerminalEvent, Tty};

/// Crossterm backend.
///
/// Binding it enables raw mode, enters the alternate screen and disables line wrapping; the
/// bound half undoes all of that when it is reset.
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "crossterm")))]
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct Crossterm {}

impl Backend for Crossterm {
    type Error = io::Error;
    type Bound = CrosstermBound;
    type Events = CrosstermEvents;

    fn bind(self, mut io: Tty) -> io::Result<(Self::Bound, Self::Events)> {
        terminal::enable_raw_mode()?;
        execute!(
            io,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            terminal::DisableLineWrap,
        )?;

        Ok((
            CrosstermBound { io },
            CrosstermEvents {
                stream: EventStream::new(),
            },
        ))
    }
}

/// The drawing half of the [`Crossterm`] backend.
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "crossterm")))]
#[derive(Debug)]
pub struct CrosstermBound {
    io: Tty,
}

impl super::Bound for CrosstermBound {
    type Error = io::Error;

    fn size(&mut self) -> io::Result<Vec2<u16>> {
        terminal::size().map(Vec2::from)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.io, cursor::Hide)
    }
    fn set_cursor_pos(&mut self, pos: Vec2<u16>) -> io::Result<()> {
        queue!(self.io, cursor::MoveTo(pos.x, pos.y))
    }

    fn set_foreground(&mut self, foreground: Color) -> io::Result<()> {
        queue!(
            self.io,
            style::SetForegroundColor(to_crossterm_color(foreground))
        )
    }
    fn set_background(&mut self, background: Color) -> io::Result<()> {
        queue!(
            self.io,
            style::SetBackgroundColor(to_crossterm_color(background))
        )
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.io.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.io.flush()
    }
    fn reset(mut self) -> io::Result<Tty> {
        execute!(
            self.io,
            style::ResetColor,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen,
            cursor::Show,
        )?;
        terminal::disable_raw_mode()?;

        Ok(self.io)
    }
}

/// The input half of the [`Crossterm`] backend.
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "crossterm")))]
#[derive(Debug)]
pub struct CrosstermEvents {
    stream: EventStream,
}

impl<'a> ReadEvents<'a> for CrosstermEvents {
    type EventError = io::Error;
    type EventFuture = Pin<Box<dyn Future<Output = io::Result<TerminalEvent>> + 'a>>;

    fn read_event(&'a mut self) -> Self::EventFuture {
        Box::pin(async move {
            loop {
                let event = self.stream.next().await.ok_or_else(|| {
                    io::Error::new(io::ErrorKind::UnexpectedEof, "terminal event stream ended")
                })??;

                match from_crossterm_event(event.clone()) {
                    Some(event) => return Ok(event),
                    None => tracing::trace!(?event, "ignoring terminal event"),
                }
            }
        })
    }
}

fn to_crossterm_color(color: Color) -> CColor {
    match color {
        Color::Default => CColor::Reset,
        Color::Indexed(n) => CColor::AnsiValue(n),
        Color::Rgb { r, g, b } => CColor::Rgb { r, g, b },
    }
}

/// Convert a crossterm event, returning `None` for events the animation has no use for (mouse,
/// focus, paste, key releases and keys with no equivalent [`Key`]).
fn from_crossterm_event(event: Event) -> Option<TerminalEvent> {
    match event {
        Event::Key(key) => from_crossterm_key(key).map(TerminalEvent::Key),
        Event::Resize(x, y) => Some(TerminalEvent::Resize(Vec2 { x, y })),
        _ => None,
    }
}

fn from_crossterm_key(key: KeyEvent) -> Option<KeyPress> {
    // Windows reports releases and repeats too.
    if key.kind == KeyEventKind::Release {
        return None;
    }

    Some(KeyPress {
        key: match key.code {
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Char('\n'),
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Tab | KeyCode::BackTab => Key::Char('\t'),
            KeyCode::Delete => Key::Char('\x7f'),
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            KeyCode::Null => Key::Char('\0'),
            KeyCode::Esc => Key::Escape,
            _ => return None,
        },
        modifiers: {
            let mut modifiers = from_crossterm_modifiers(key.modifiers);
            modifiers.shift = modifiers.shift
                || key.code == KeyCode::BackTab
                || matches!(key.code, KeyCode::Char(c) if c.is_uppercase());
            modifiers
        },
    })
}

fn from_crossterm_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        control: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}
