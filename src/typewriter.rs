//! The typewriter reveal animation.
//!
//! A run reveals every line one character per tick, in lockstep, until the longest line is
//! complete, then holds the finished text before returning. A key watcher races the reveal: if
//! the terminate key arrives first the run ends early, and whichever finishes first decides the
//! outcome.

use std::cell::Cell;
use std::io::{self, Write};
use std::time::Duration;

use async_io::Timer;
use futures_lite::{future, StreamExt};

use crate::backend::{Backend, Bound, ReadEvents, TerminalEvent};
use crate::output::OutputExt as _;
use crate::terminal::{Error, Screen, Terminal};
use crate::{Key, KeyPress, Output, Style};

/// The default time between two frames.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// The default time the completed text stays on screen.
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(500);

/// A typewriter-style reveal animation over a set of lines.
///
/// All configuration is optional:
///
/// ```no_run
/// use std::time::Duration;
/// use typewriter::{Crossterm, Key, Typewriter};
///
/// let mut typewriter = Typewriter::new()
///     .with_tick_interval(Duration::from_millis(30))
///     .with_terminate_key(Key::Char('q'))
///     .with_lines(["Hello,", "world!"]);
///
/// typewriter.play(Crossterm::default())?;
/// # Ok::<(), typewriter::Error<std::io::Error>>(())
/// ```
///
/// After a run the stored lines are replaced by the last frame that was drawn, so a run that was
/// cut short leaves the partially revealed text behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    tick_interval: Duration,
    hold_duration: Duration,
    terminate_key: Key,
    terminate_on_any_key: bool,
    lines: Vec<String>,
}

/// How a run of the animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Every line was fully revealed and held.
    Completed,
    /// A terminating key was pressed first.
    Terminated(KeyPress),
}

impl Default for Typewriter {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            hold_duration: DEFAULT_HOLD_DURATION,
            terminate_key: Key::Escape,
            terminate_on_any_key: false,
            lines: Vec::new(),
        }
    }
}

impl Typewriter {
    /// Create an animation with the default timings, terminated by Escape, with no lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time between two frames.
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Set how long the completed text stays on screen.
    pub fn set_hold_duration(&mut self, duration: Duration) {
        self.hold_duration = duration;
    }

    /// Set the key that ends the animation early.
    ///
    /// Character keys are matched case-insensitively: `Key::Char('Q')` is stored as
    /// `Key::Char('q')`, the form backends report letters in.
    pub fn set_terminate_key(&mut self, key: Key) {
        self.terminate_key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            key => key,
        };
    }

    /// Set whether any key press ends the animation early, not only the terminate key.
    pub fn set_terminate_on_any_key(&mut self, any_key: bool) {
        self.terminate_on_any_key = any_key;
    }

    /// Append a line.
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Replace all the lines.
    pub fn set_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
    }

    /// Builder form of [`set_tick_interval`](Self::set_tick_interval).
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.set_tick_interval(interval);
        self
    }

    /// Builder form of [`set_hold_duration`](Self::set_hold_duration).
    #[must_use]
    pub fn with_hold_duration(mut self, duration: Duration) -> Self {
        self.set_hold_duration(duration);
        self
    }

    /// Builder form of [`set_terminate_key`](Self::set_terminate_key).
    #[must_use]
    pub fn with_terminate_key(mut self, key: Key) -> Self {
        self.set_terminate_key(key);
        self
    }

    /// Builder form of [`set_terminate_on_any_key`](Self::set_terminate_on_any_key).
    #[must_use]
    pub fn with_terminate_on_any_key(mut self, any_key: bool) -> Self {
        self.set_terminate_on_any_key(any_key);
        self
    }

    /// Builder form of [`set_lines`](Self::set_lines).
    #[must_use]
    pub fn with_lines<I>(mut self, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.set_lines(lines);
        self
    }

    /// The lines, as last shown if the animation has run.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The time between two frames.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// How long the completed text stays on screen.
    #[must_use]
    pub fn hold_duration(&self) -> Duration {
        self.hold_duration
    }

    /// The key that ends the animation early.
    #[must_use]
    pub fn terminate_key(&self) -> Key {
        self.terminate_key
    }

    /// Whether any key press ends the animation early.
    #[must_use]
    pub fn terminates_on_any_key(&self) -> bool {
        self.terminate_on_any_key
    }

    /// Print every line to stdout at once, without animating.
    ///
    /// Errors writing to stdout are ignored.
    pub fn print_lines(&self) {
        let _ = self.write_lines(io::stdout().lock());
    }

    /// Write every line to `out`, each followed by a newline, without animating.
    ///
    /// # Errors
    ///
    /// Fails if writing to `out` fails.
    pub fn write_lines(&self, mut out: impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    /// Run the animation on a terminal.
    ///
    /// The future resolves once every line has been revealed and held, or as soon as a
    /// terminating key is pressed. Dropping the future stops the animation.
    ///
    /// # Errors
    ///
    /// Fails if drawing to or reading from the terminal fails. The stored lines are left
    /// untouched in that case.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<Finish, Error<B::Error>> {
        let longest = longest_line(&self.lines);
        tracing::debug!(
            lines = self.lines.len(),
            longest,
            tick = ?self.tick_interval,
            hold = ?self.hold_duration,
            key = %self.terminate_key,
            any_key = self.terminate_on_any_key,
            "starting reveal"
        );

        let shown = Cell::new(None);
        let (screen, events) = terminal.split();

        // The loser of the race is dropped, which stops it: the reveal cannot draw again after
        // a key press, and the key watcher stops reading once the reveal completes.
        let finish = future::race(
            reveal::<B>(
                screen,
                &self.lines,
                longest,
                self.tick_interval,
                self.hold_duration,
                &shown,
            ),
            watch_keys::<B>(events, self.terminate_key, self.terminate_on_any_key),
        )
        .await?;

        if let Some(position) = shown.get() {
            self.lines = frame(&self.lines, position);
        }

        tracing::debug!(?finish, shown = ?shown.get(), "reveal finished");
        Ok(finish)
    }

    /// Run the animation on a terminal, blocking the current thread until it finishes.
    ///
    /// # Errors
    ///
    /// Fails if drawing to or reading from the terminal fails.
    pub fn run_blocking<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<Finish, Error<B::Error>> {
        future::block_on(self.run(terminal))
    }

    /// Take over the terminal with `backend`, run the animation and give the terminal back.
    ///
    /// The terminal is restored whether the run completes, is terminated or fails.
    ///
    /// # Panics
    ///
    /// Panics if another [`Terminal`] already exists.
    ///
    /// # Errors
    ///
    /// Fails if setting up, drawing to, reading from or restoring the terminal fails.
    pub fn play<B: Backend>(&mut self, backend: B) -> Result<Finish, Error<B::Error>> {
        let mut terminal = Terminal::new(backend)?;
        let finish = self.run_blocking(&mut terminal)?;
        terminal.cleanup()?;
        Ok(finish)
    }
}

/// Draws one frame per tick, then waits out the hold.
async fn reveal<B: Backend>(
    screen: &mut Screen<B::Bound>,
    lines: &[String],
    longest: usize,
    tick_interval: Duration,
    hold_duration: Duration,
    shown: &Cell<Option<usize>>,
) -> Result<Finish, Error<B::Error>> {
    // Deadlines are spaced from the previous deadline, not from when the last frame was drawn;
    // after a stall the missed ticks fire back to back, still in order.
    let mut ticks = Timer::interval(tick_interval);

    for position in 1..=longest {
        ticks.next().await;
        draw_frame(screen, lines, position)?;
        shown.set(Some(position));
        tracing::trace!(position, "drew frame");
    }

    Timer::after(hold_duration).await;
    Ok(Finish::Completed)
}

async fn watch_keys<B: Backend>(
    events: &mut B::Events,
    terminate_key: Key,
    any_key: bool,
) -> Result<Finish, Error<B::Error>> {
    loop {
        match events.read_event().await? {
            TerminalEvent::Key(press) if any_key || press.key == terminate_key => {
                return Ok(Finish::Terminated(press));
            }
            event => tracing::trace!(?event, "ignoring event"),
        }
    }
}

fn draw_frame<T: Bound>(
    screen: &mut Screen<T>,
    lines: &[String],
    position: usize,
) -> Result<(), Error<T::Error>> {
    screen.clear();
    for (y, line) in lines.iter().enumerate() {
        // Rows past the bottom of the screen can't be seen anyway.
        let y = match u16::try_from(y) {
            Ok(y) if y < screen.size().y => y,
            _ => break,
        };
        screen.write((0, y), truncate(line, position), Style::default());
    }
    screen.flush()
}

/// The number of code points in the longest line, or 0 if there are no lines.
#[must_use]
pub fn longest_line<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| line.as_ref().chars().count())
        .max()
        .unwrap_or(0)
}

/// The frame shown at a reveal position: every line cut to its first `position` code points.
///
/// Lines no longer than `position` are returned unchanged.
#[must_use]
pub fn frame<S: AsRef<str>>(lines: &[S], position: usize) -> Vec<String> {
    lines
        .iter()
        .map(|line| truncate(line.as_ref(), position).to_owned())
        .collect()
}

fn truncate(line: &str, len: usize) -> &str {
    match line.char_indices().nth(len) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::backend::{Dummy, DummyError};

    const TICK: Duration = Duration::from_millis(10);
    const HOLD: Duration = Duration::from_millis(20);

    fn hi_yo() -> Typewriter {
        Typewriter::new()
            .with_tick_interval(TICK)
            .with_hold_duration(HOLD)
            .with_lines(["Hi", "Yo!"])
    }

    #[test]
    fn defaults() {
        let typewriter = Typewriter::new();
        assert_eq!(typewriter.tick_interval(), Duration::from_millis(50));
        assert_eq!(typewriter.hold_duration(), Duration::from_millis(500));
        assert_eq!(typewriter.terminate_key(), Key::Escape);
        assert!(!typewriter.terminates_on_any_key());
        assert!(typewriter.lines().is_empty());
    }

    #[test]
    fn setters_replace_values() {
        let mut typewriter = Typewriter::new();
        typewriter.set_tick_interval(Duration::from_secs(1));
        typewriter.set_hold_duration(Duration::ZERO);
        typewriter.set_terminate_key(Key::Char('q'));
        typewriter.set_terminate_on_any_key(true);
        typewriter.add_line("one");
        typewriter.add_line(String::from("two"));
        assert_eq!(typewriter.lines(), ["one", "two"]);

        typewriter.set_lines(vec!["three"]);
        assert_eq!(typewriter.lines(), ["three"]);
        assert_eq!(typewriter.tick_interval(), Duration::from_secs(1));
        assert_eq!(typewriter.hold_duration(), Duration::ZERO);
        assert_eq!(typewriter.terminate_key(), Key::Char('q'));
        assert!(typewriter.terminates_on_any_key());
    }

    #[test]
    fn truncation() {
        let lines = ["Hi", "Yo!", "", "日本語"];
        assert_eq!(longest_line(&lines), 3);
        assert_eq!(frame(&lines, 1), ["H", "Y", "", "日"]);
        assert_eq!(frame(&lines, 2), ["Hi", "Yo", "", "日本"]);
        assert_eq!(frame(&lines, 3), lines);
        assert_eq!(frame(&lines, 100), lines);
        assert_eq!(frame(&lines, 0), ["", "", "", ""]);
        assert_eq!(longest_line::<&str>(&[]), 0);
    }

    #[test]
    fn write_lines_is_verbatim() {
        let typewriter = Typewriter::new().with_lines(["Hi", "", "Yo!"]);
        let mut out = Vec::new();
        typewriter.write_lines(&mut out).unwrap();
        assert_eq!(out, b"Hi\n\nYo!\n");
        typewriter.print_lines();
    }

    #[test]
    fn reveals_every_position_in_order() {
        let mut terminal = Terminal::new(Dummy::new((10, 4))).unwrap();
        let mut typewriter = hi_yo();

        let start = Instant::now();
        let finish = typewriter.run_blocking(&mut terminal).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(finish, Finish::Completed);
        assert_eq!(
            terminal.backend().frames,
            [vec!["H", "Y"], vec!["Hi", "Yo"], vec!["Hi", "Yo!"]]
        );
        assert_eq!(typewriter.lines(), ["Hi", "Yo!"]);
        assert!(elapsed >= TICK * 3 + HOLD, "finished after {:?}", elapsed);
        assert!(
            elapsed < TICK * 3 + HOLD + Duration::from_millis(200),
            "finished after {:?}",
            elapsed
        );
    }

    #[test]
    fn no_lines_only_holds() {
        let mut terminal = Terminal::new(Dummy::new((10, 4))).unwrap();
        let mut typewriter = Typewriter::new()
            .with_tick_interval(TICK)
            .with_hold_duration(HOLD)
            .with_lines(["", ""]);

        let start = Instant::now();
        let finish = typewriter.run_blocking(&mut terminal).unwrap();

        assert_eq!(finish, Finish::Completed);
        assert!(start.elapsed() >= HOLD);
        assert!(terminal.backend().frames.is_empty());
        assert_eq!(typewriter.lines(), ["", ""]);
    }

    #[test]
    fn terminate_key_stops_early() {
        let dummy = Dummy::new((10, 4)).with_key(Duration::from_millis(20), Key::Escape);
        let mut terminal = Terminal::new(dummy).unwrap();
        let mut typewriter = Typewriter::new()
            .with_tick_interval(Duration::from_millis(500))
            .with_hold_duration(Duration::from_secs(60))
            .with_lines(["Hello", "World"]);

        let start = Instant::now();
        let finish = typewriter.run_blocking(&mut terminal).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(finish, Finish::Terminated(KeyPress::from(Key::Escape)));
        assert!(elapsed < Duration::from_millis(400), "finished after {:?}", elapsed);
        assert!(terminal.backend().frames.is_empty());
        assert_eq!(typewriter.lines(), ["Hello", "World"]);
    }

    #[test]
    fn other_keys_are_ignored() {
        let dummy = Dummy::new((10, 4))
            .with_key(Duration::ZERO, 'x')
            .with_event(Duration::ZERO, TerminalEvent::Resize((20, 5).into()))
            .with_key(Duration::ZERO, Key::Escape);
        let mut terminal = Terminal::new(dummy).unwrap();
        let mut typewriter = hi_yo().with_hold_duration(Duration::from_secs(60));

        let start = Instant::now();
        let finish = typewriter.run_blocking(&mut terminal).unwrap();
        assert_eq!(finish, Finish::Terminated(KeyPress::from(Key::Escape)));
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn any_key_terminates_when_enabled() {
        let dummy = Dummy::new((10, 4)).with_key(Duration::ZERO, 'x');
        let mut terminal = Terminal::new(dummy).unwrap();
        let mut typewriter = hi_yo()
            .with_hold_duration(Duration::from_secs(60))
            .with_terminate_on_any_key(true);

        let finish = typewriter.run_blocking(&mut terminal).unwrap();
        assert_eq!(finish, Finish::Terminated(KeyPress::from('x')));
    }

    #[test]
    fn uppercase_terminate_key_matches() {
        let dummy = Dummy::new((10, 4)).with_key(Duration::ZERO, 'Q');
        let mut terminal = Terminal::new(dummy).unwrap();
        let mut typewriter = hi_yo()
            .with_hold_duration(Duration::from_secs(60))
            .with_terminate_key(Key::Char('Q'));
        assert_eq!(typewriter.terminate_key(), Key::Char('q'));

        let start = Instant::now();
        let finish = typewriter.run_blocking(&mut terminal).unwrap();

        assert_eq!(finish, Finish::Terminated(KeyPress::from('Q')));
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn key_during_hold_keeps_full_text() {
        let dummy = Dummy::new((10, 4)).with_key(Duration::from_millis(100), 'q');
        let mut terminal = Terminal::new(dummy).unwrap();
        let mut typewriter = hi_yo()
            .with_hold_duration(Duration::from_secs(60))
            .with_terminate_key(Key::Char('q'));

        let start = Instant::now();
        let finish = typewriter.run_blocking(&mut terminal).unwrap();

        assert_eq!(finish, Finish::Terminated(KeyPress::from('q')));
        assert!(start.elapsed() < Duration::from_millis(500));
        assert_eq!(terminal.backend().frames.len(), 3);
        assert_eq!(typewriter.lines(), ["Hi", "Yo!"]);
    }

    #[test]
    fn draw_failures_propagate() {
        let mut terminal = Terminal::new(Dummy::new((10, 4)).failing_after(1)).unwrap();
        let mut typewriter = hi_yo();

        let err = typewriter.run_blocking(&mut terminal).unwrap_err();

        assert!(matches!(err, Error::Backend(DummyError)));
        assert_eq!(terminal.backend().frames, [vec!["H", "Y"]]);
        assert_eq!(typewriter.lines(), ["Hi", "Yo!"]);
    }

    #[test]
    fn lines_below_the_screen_are_skipped() {
        let mut terminal = Terminal::new(Dummy::new((3, 1))).unwrap();
        let mut typewriter = Typewriter::new()
            .with_tick_interval(Duration::from_millis(1))
            .with_hold_duration(Duration::ZERO)
            .with_lines(["abcd", "efgh"]);

        typewriter.run_blocking(&mut terminal).unwrap();

        assert_eq!(terminal.backend().frames.len(), 4);
        assert_eq!(terminal.backend().frames.last().unwrap(), &["abc"]);
        assert_eq!(typewriter.lines(), ["abcd", "efgh"]);
    }
}
