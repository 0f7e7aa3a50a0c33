//! Cancellable line input for confirmation prompts.
//!
//! `BufRead::read_line` cannot be interrupted, so the blocking read lives on a
//! dedicated thread that owns the input source. Each call to
//! [`LineReader::read_line`] asks that thread for one line and races the reply
//! against the session [`CancelSignal`].
//!
//! Abandonment is best effort: a cancelled read stays blocked in the
//! background until input arrives or the process exits. The reader remembers
//! that a request is still outstanding, and the next call collects its reply
//! instead of issuing another read. A line is therefore never dropped or
//! delivered twice.

use crate::cancel::CancelSignal;
use async_trait::async_trait;
use std::io::{self, BufRead, BufReader};
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::sync::mpsc;

/// Result of reading one confirmation answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Operator submitted a line (trimmed, lower-cased).
    Line(String),
    /// The cancellation signal fired before a line arrived.
    Cancelled,
}

/// Source of operator answers consumed by the decision engine.
///
/// End of input and device errors surface as `Err`.
#[async_trait]
pub trait AnswerSource: Send {
    async fn read_answer(&mut self, cancel: &CancelSignal) -> io::Result<ReadOutcome>;
}

/// Normalize a raw answer line for comparison against `y`/`o`/`yes`.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

type LineReply = io::Result<Option<String>>;

/// Line reader whose reads can be abandoned on cancellation.
pub struct LineReader {
    requests: std_mpsc::Sender<()>,
    replies: mpsc::UnboundedReceiver<LineReply>,
    /// Set while a request has been sent but its reply not yet consumed.
    pending: bool,
}

impl LineReader {
    /// Reader over the process stdin.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }

    /// Reader over any blocking line source. The source cursor carries over
    /// between reads.
    pub fn new<R>(source: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (request_tx, request_rx) = std_mpsc::channel::<()>();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel::<LineReply>();

        thread::spawn(move || {
            let mut source = source;
            while request_rx.recv().is_ok() {
                let mut line = String::new();
                let reply = match source.read_line(&mut line) {
                    Ok(0) => Ok(None),
                    Ok(_) => Ok(Some(line)),
                    Err(err) => Err(err),
                };
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            replies: reply_rx,
            pending: false,
        }
    }

    /// Read one normalized line, or return `Cancelled` as soon as `cancel`
    /// fires.
    pub async fn read_line(&mut self, cancel: &CancelSignal) -> io::Result<ReadOutcome> {
        if cancel.is_cancelled() {
            return Ok(ReadOutcome::Cancelled);
        }
        if !self.pending {
            self.requests.send(()).map_err(|_| reader_gone())?;
            self.pending = true;
        }

        let received = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            reply = self.replies.recv() => Some(reply),
        };
        let Some(reply) = received else {
            return Ok(ReadOutcome::Cancelled);
        };
        self.pending = false;

        match reply {
            Some(Ok(Some(line))) => Ok(ReadOutcome::Line(normalize_answer(&line))),
            Some(Ok(None)) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            )),
            Some(Err(err)) => Err(err),
            None => Err(reader_gone()),
        }
    }
}

#[async_trait]
impl AnswerSource for LineReader {
    async fn read_answer(&mut self, cancel: &CancelSignal) -> io::Result<ReadOutcome> {
        self.read_line(cancel).await
    }
}

fn reader_gone() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "input reader thread exited")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::time::Duration;
    use tokio::time::timeout;

    /// Blocking reader fed line-by-line from the test body.
    struct ChannelReader {
        rx: std_mpsc::Receiver<String>,
        buf: Vec<u8>,
    }

    impl Read for ChannelReader {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.buf.is_empty() {
                match self.rx.recv() {
                    Ok(chunk) => self.buf = chunk.into_bytes(),
                    Err(_) => return Ok(0),
                }
            }
            let n = out.len().min(self.buf.len());
            out[..n].copy_from_slice(&self.buf[..n]);
            self.buf.drain(..n);
            Ok(n)
        }
    }

    fn channel_reader() -> (std_mpsc::Sender<String>, LineReader) {
        let (tx, rx) = std_mpsc::channel();
        let reader = LineReader::new(BufReader::new(ChannelReader {
            rx,
            buf: Vec::new(),
        }));
        (tx, reader)
    }

    #[test]
    fn normalize_answer_trims_and_lowercases() {
        assert_eq!(normalize_answer("  YeS \r\n"), "yes");
        assert_eq!(normalize_answer("\n"), "");
    }

    #[tokio::test]
    async fn reads_lines_in_order() {
        let mut reader = LineReader::new(Cursor::new("  Y \no\n"));
        let cancel = CancelSignal::new();
        assert_eq!(
            reader.read_line(&cancel).await.unwrap(),
            ReadOutcome::Line("y".to_string())
        );
        assert_eq!(
            reader.read_line(&cancel).await.unwrap(),
            ReadOutcome::Line("o".to_string())
        );
    }

    #[tokio::test]
    async fn end_of_input_is_a_read_failure() {
        let mut reader = LineReader::new(Cursor::new(""));
        let err = reader
            .read_line(&CancelSignal::new())
            .await
            .expect_err("eof should fail");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn cancellation_preempts_blocked_read() {
        let (_tx, mut reader) = channel_reader();
        let cancel = CancelSignal::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.fire();
        });

        let outcome = timeout(Duration::from_secs(2), reader.read_line(&cancel))
            .await
            .expect("cancelled read must not hang")
            .unwrap();
        assert_eq!(outcome, ReadOutcome::Cancelled);
    }

    #[tokio::test]
    async fn abandoned_read_is_delivered_once_to_next_call() {
        let (tx, mut reader) = channel_reader();

        let first = CancelSignal::new();
        first.fire();
        // Already-fired signal: no request is issued at all.
        assert_eq!(
            reader.read_line(&first).await.unwrap(),
            ReadOutcome::Cancelled
        );

        let interrupted = CancelSignal::new();
        let trigger = interrupted.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            trigger.fire();
        });
        assert_eq!(
            reader.read_line(&interrupted).await.unwrap(),
            ReadOutcome::Cancelled
        );

        tx.send("Y\n".to_string()).unwrap();
        tx.send("n\n".to_string()).unwrap();
        let fresh = CancelSignal::new();
        assert_eq!(
            reader.read_line(&fresh).await.unwrap(),
            ReadOutcome::Line("y".to_string())
        );
        assert_eq!(
            reader.read_line(&fresh).await.unwrap(),
            ReadOutcome::Line("n".to_string())
        );
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_answer_is_idempotent(raw in "[ \\tA-Za-z]{0,12}\\r?\\n?") {
                let once = normalize_answer(&raw);
                prop_assert_eq!(normalize_answer(&once), once.clone());
                prop_assert_eq!(once.trim(), once.as_str());
            }
        }
    }
}
