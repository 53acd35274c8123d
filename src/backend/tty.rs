use std::fs::{self, File};
use std::io::{self, BufWriter, IoSlice, Write};

use os_pipe::PipeReader;
use stdio_override::{StderrOverride, StdoutOverride};

/// A type which backends use to perform I/O.
///
/// While a real (non-dummy) `Tty` exists the process's stdout and stderr are redirected into a
/// pipe, so that stray prints and log lines cannot scribble over the animation. The captured
/// output is replayed by [`Terminal`](crate::Terminal) when it is cleaned up.
///
/// Internally it uses a `BufWriter` so all write calls are buffered until flushed.
#[derive(Debug)]
pub struct Tty {
    inner: Option<BufWriter<TtyInner>>,
}

impl Tty {
    /// A TTY that discards everything written to it.
    pub(crate) fn dummy() -> Self {
        Self { inner: None }
    }

    /// Open the controlling terminal and start capturing stdio.
    pub(crate) fn new() -> io::Result<(Self, PipeReader)> {
        let (inner, captured) = TtyInner::new()?;
        Ok((
            Self {
                inner: Some(BufWriter::new(inner)),
            },
            captured,
        ))
    }

    /// Stop capturing stdio.
    pub(crate) fn cleanup(self) -> io::Result<()> {
        if let Some(inner) = self.inner {
            inner.into_inner().map_err(io::IntoInnerError::into_error)?.cleanup()?;
        }
        Ok(())
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            Some(inner) => inner.write(buf),
            None => Ok(buf.len()),
        }
    }
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        match &mut self.inner {
            Some(inner) => inner.write_vectored(bufs),
            None => Ok(bufs.iter().map(|buf| buf.len()).sum()),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            Some(inner) => inner.flush(),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
struct TtyInner {
    stdout: StdoutOverride,
    stderr: StderrOverride,
    /// `/dev/tty` when it can be opened. Otherwise output goes to the real stdout behind the
    /// override.
    tty: Option<File>,
}

impl TtyInner {
    fn new() -> io::Result<(Self, PipeReader)> {
        let (rx, tx) = os_pipe::pipe()?;

        let stdout = StdoutOverride::from_io_ref(&tx)?;
        let stderr = StderrOverride::from_io(tx)?;

        let tty = if cfg!(unix) {
            let tty_path = if cfg!(target_os = "redox") {
                std::env::var("TTY").ok()
            } else {
                Some("/dev/tty".to_owned())
            };

            tty_path.and_then(|path| {
                fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .open(path)
                    .ok()
            })
        } else {
            None
        };

        if tty.is_none() {
            tracing::debug!("no controlling terminal file, drawing through stdout");
        }

        Ok((
            Self {
                stdout,
                stderr,
                tty,
            },
            rx,
        ))
    }
    fn cleanup(self) -> io::Result<()> {
        self.stdout.reset()?;
        self.stderr.reset()?;
        Ok(())
    }
}

impl Write for TtyInner {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.tty {
            Some(tty) => tty.write(buf),
            None => self.stdout.write(buf),
        }
    }
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        match &mut self.tty {
            Some(tty) => tty.write_vectored(bufs),
            None => self.stdout.write_vectored(bufs),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut self.tty {
            Some(tty) => tty.flush(),
            None => self.stdout.flush(),
        }
    }
}
