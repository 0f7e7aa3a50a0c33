//! Diagnostic logging setup.
//!
//! Logs go to stderr alongside the interactive output and stay quiet
//! (`warn`) unless raised with `-v` or an explicit filter. On a terminal each
//! event starts by clearing the current line, so a log emitted while the
//! fetch spinner is drawing replaces the frame instead of trailing it.

use crate::tui::settings::PROGRESS_CLEAR_LINE;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter env var checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "FORKSWEEP_LOG";

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::new(filter_directive(verbosity, |name| std::env::var(name).ok()));
    let writer = LineClearingWriter::new(io::stderr, io::stderr().is_terminal());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .without_time()
        .with_target(false)
        .try_init();
}

/// `MakeWriter` that prefixes every event with a line clear when enabled.
pub struct LineClearingWriter<M> {
    inner: M,
    clear: bool,
}

impl<M> LineClearingWriter<M> {
    pub fn new(inner: M, clear: bool) -> Self {
        Self { inner, clear }
    }
}

impl<'a, M> MakeWriter<'a> for LineClearingWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = ClearFirst<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        ClearFirst {
            inner: self.inner.make_writer(),
            pending: self.clear,
        }
    }
}

/// Writer for one event; the clear goes out with the first write.
pub struct ClearFirst<W> {
    inner: W,
    pending: bool,
}

impl<W: Write> Write for ClearFirst<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.pending {
            return self.inner.write(buf);
        }
        let mut joined = Vec::with_capacity(PROGRESS_CLEAR_LINE.len() + buf.len());
        joined.extend_from_slice(PROGRESS_CLEAR_LINE.as_bytes());
        joined.extend_from_slice(buf);
        self.inner.write_all(&joined)?;
        self.pending = false;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Pick the filter directive: `FORKSWEEP_LOG`, then `RUST_LOG`, then the
/// `-v` count.
fn filter_directive<F>(verbosity: u8, env_lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV_VAR, "RUST_LOG"]
        .into_iter()
        .filter_map(|name| env_lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| level_for(verbosity).to_string())
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
