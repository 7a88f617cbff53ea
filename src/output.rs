//! Diagnostic sinks and the line-protocol writer.
//!
//! Everything the engine reports goes through an [`Output`]: one byte slice at
//! a time, append only, never buffered by the engine. [`Writer`] wraps a sink
//! with the formatting helpers that produce the protocol lines, and
//! implements [`std::fmt::Write`] so values can be rendered straight into the
//! sink without intermediate strings.

use std::fmt;
use std::io;

use crate::Location;

// ============================================================================
// OUTPUT TRAIT
// ============================================================================

/// Append-only destination for protocol lines.
pub trait Output {
    fn write(&mut self, bytes: &[u8]);
}

impl<O: Output + ?Sized> Output for &mut O {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }
}

// ============================================================================
// OUTPUT SINKS: OutputBuffer, IoSink and NullSink implementations
// ============================================================================

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.lines()
    }
}

impl Output for OutputBuffer {
    fn write(&mut self, bytes: &[u8]) {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));
    }
}

/// IoSink: forwards output to any `io::Write`, remembering the first failure.
///
/// Write errors never interrupt a test run; callers inspect them afterwards
/// with [`IoSink::take_error`].
pub struct IoSink<W: io::Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: io::Write> Output for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.inner.write_all(bytes) {
            self.error = Some(e);
        }
    }
}

/// StdoutSink: writes output to stdout for the CLI and default runner use.
pub type StdoutSink = IoSink<io::Stdout>;

impl Default for StdoutSink {
    fn default() -> Self {
        IoSink::new(io::stdout())
    }
}

// A null output sink for running without output.
pub struct NullSink;

impl Output for NullSink {
    fn write(&mut self, _bytes: &[u8]) {}
}

// ============================================================================
// WRITER: protocol formatting helpers
// ============================================================================

/// Formatting helpers over an [`Output`] for the line protocol.
pub struct Writer<'a, O: Output + ?Sized> {
    out: &'a mut O,
}

pub fn writer<O: Output + ?Sized>(out: &mut O) -> Writer<'_, O> {
    Writer { out }
}

impl<'a, O: Output + ?Sized> Writer<'a, O> {
    pub fn write(&mut self, bytes: &[u8]) {
        self.out.write(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.out.write(s.as_bytes());
    }

    pub fn write_int(&mut self, v: i64) {
        let _ = fmt::Write::write_fmt(self, format_args!("{v}"));
    }

    pub fn write_newline(&mut self) {
        self.out.write(b"\n");
    }

    pub fn write_prefix(&mut self, location: Location) {
        self.write_str(location.file);
        self.write_str(":");
        self.write_int(i64::from(location.line));
        self.write_str(": ");
    }

    pub fn enter(&mut self, location: Location, prefix: &str, name: &str) {
        self.event(location, "enter: ", prefix, name);
    }

    pub fn leave(&mut self, location: Location, prefix: &str, name: &str) {
        self.event(location, "leave: ", prefix, name);
    }

    pub fn report_prefix(&mut self, location: Location, success: bool) {
        self.write_prefix(location);
        if success {
            self.write_str("passed: ");
        } else {
            self.write_str("failed: expected ");
        }
    }

    pub fn fatal(&mut self, location: Location, message: &dyn fmt::Display) {
        self.write_prefix(location);
        self.write_str("fatal: ");
        let _ = fmt::Write::write_fmt(self, format_args!("{message}"));
        self.write_newline();
    }

    fn event(&mut self, location: Location, tag: &str, prefix: &str, name: &str) {
        self.write_prefix(location);
        self.write_str(tag);
        self.write_str(prefix);
        self.write_str(name);
        self.write_newline();
    }
}

impl<'a, O: Output + ?Sized> fmt::Write for Writer<'a, O> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write(s.as_bytes());
        Ok(())
    }
}
