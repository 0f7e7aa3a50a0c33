//! Spinner primitive shown while forks are fetched.
//!
//! The spinner runs on its own thread and stops on whichever comes first:
//! the owning [`ProgressHandle`] finishing (explicitly or on drop) or the
//! session [`CancelSignal`] firing. Both paths end with a line clear, so no
//! frame is ever left on screen.

use crate::cancel::CancelSignal;
use crate::tui::settings;
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// RAII handle for an active spinner.
pub struct ProgressHandle {
    /// Stop handshake; dropping the sender also stops the thread.
    stop: Option<mpsc::Sender<()>>,
    /// Background writer thread, present only when the spinner is active.
    thread: Option<thread::JoinHandle<()>>,
}

impl ProgressHandle {
    /// Construct a no-op handle used when progress output is disabled.
    pub fn disabled() -> Self {
        Self {
            stop: None,
            thread: None,
        }
    }

    /// Whether the spinner thread is still drawing.
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stop the spinner and wait until its line has been cleared.
    pub fn finish(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Start a spinner on stderr.
///
/// Returns a disabled handle when `enabled` is false or stderr is not a
/// terminal, so piped output never receives control sequences.
pub fn start_progress(
    label: impl Into<String>,
    color: bool,
    enabled: bool,
    cancel: &CancelSignal,
) -> ProgressHandle {
    if !enabled || !io::stderr().is_terminal() {
        return ProgressHandle::disabled();
    }
    start_progress_with(io::stderr(), label, color, cancel)
}

/// Start a spinner drawing into an arbitrary writer.
pub fn start_progress_with<W>(
    mut out: W,
    label: impl Into<String>,
    color: bool,
    cancel: &CancelSignal,
) -> ProgressHandle
where
    W: Write + Send + 'static,
{
    let label = label.into();
    let cancel = cancel.clone();
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let tick = Duration::from_millis(settings::PROGRESS_TICK_MS);

    let thread = thread::spawn(move || {
        let start = Instant::now();
        let mut idx = 0usize;

        while !cancel.is_cancelled() {
            let frame = settings::PROGRESS_FRAMES[idx % settings::PROGRESS_FRAMES.len()];
            let line = progress_line(frame, &label, start.elapsed(), color);
            let _ = write!(out, "{line}");
            let _ = out.flush();
            idx += 1;

            match stop_rx.recv_timeout(tick) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let _ = write!(out, "{}", settings::PROGRESS_CLEAR_LINE);
        let _ = out.flush();
    });

    ProgressHandle {
        stop: Some(stop_tx),
        thread: Some(thread),
    }
}

fn progress_line(frame: char, label: &str, elapsed: Duration, color: bool) -> String {
    let elapsed_s = elapsed.as_millis() as f64 / 1000.0;
    if color {
        format!(
            "{}{} {} {}",
            settings::PROGRESS_CLEAR_LINE,
            frame.to_string().with(settings::COLOR_PROGRESS_FRAME),
            label.with(settings::COLOR_PROGRESS_LABEL),
            format!("({elapsed_s:.1}s)").with(settings::COLOR_PROGRESS_ELAPSED),
        )
    } else {
        format!(
            "{}{frame} {label} ({elapsed_s:.1}s)",
            settings::PROGRESS_CLEAR_LINE
        )
    }
}
