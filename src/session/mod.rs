//! Interactive fork-cleanup session.
//!
//! [`SessionRunner`] owns the run: it fetches forks behind a spinner, walks
//! them in fetch order, asks the [`DecisionEngine`] to resolve each one, and
//! maps the overall outcome to a process exit code. Operator interrupts reach
//! every suspension point through one shared [`CancelSignal`].

mod decision;

pub use decision::DecisionEngine;

use crate::browser::BrowserOpener;
use crate::cancel::CancelSignal;
use crate::config::GitHubConfig;
use crate::error::{GitHubError, SessionError};
use crate::github::{fetch_forks, ForkDeleter, ForkSource};
use crate::tui::input::AnswerSource;
use crate::tui::progress::start_progress;
use crate::tui::settings;
use crate::types::{Decision, DecisionKind, DecisionTally, Divergence, Fork, SkipReason};
use crate::ui::render::RenderSink;

/// Reserved exit status for a run interrupted by the operator.
pub const EXIT_INTERRUPTED: i32 = 130;
/// Exit status for any other unrecovered error.
pub const EXIT_FAILURE: i32 = 1;

/// Behavior switches fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Delete every fork without prompting.
    pub force: bool,
    /// Skip the literal `yes` confirmation for forks with open pull requests.
    pub skip_double_confirm: bool,
    /// Show the fetch spinner (only when stderr is a terminal).
    pub progress: bool,
    pub color: bool,
    /// Base for "open in browser" links.
    pub web_base_url: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            force: false,
            skip_double_confirm: false,
            progress: true,
            color: true,
            web_base_url: GitHubConfig::default().web_base_url,
        }
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Every fork was resolved.
    Completed,
    /// The fetch returned no forks.
    NothingToDo,
    /// The operator interrupted the run.
    Cancelled,
    Failed(SessionError),
}

/// Decisions recorded during a run plus its outcome.
#[derive(Debug)]
pub struct SessionReport {
    pub decisions: Vec<Decision>,
    pub outcome: SessionOutcome,
}

impl SessionReport {
    /// Process exit status for this report.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            SessionOutcome::Completed | SessionOutcome::NothingToDo => 0,
            SessionOutcome::Cancelled => EXIT_INTERRUPTED,
            SessionOutcome::Failed(_) => EXIT_FAILURE,
        }
    }

    pub fn tally(&self) -> DecisionTally {
        DecisionTally::from_decisions(&self.decisions)
    }
}

/// Collaborators a session talks to.
pub struct SessionIo<'a> {
    pub source: &'a dyn ForkSource,
    pub deleter: &'a dyn ForkDeleter,
    pub answers: &'a mut dyn AnswerSource,
    pub renderer: &'a dyn RenderSink,
    pub browser: &'a dyn BrowserOpener,
}

/// Runs one interactive session from fetch to summary.
pub struct SessionRunner<'a> {
    io: SessionIo<'a>,
    options: SessionOptions,
    cancel: CancelSignal,
}

impl<'a> SessionRunner<'a> {
    pub fn new(io: SessionIo<'a>, options: SessionOptions, cancel: CancelSignal) -> Self {
        Self {
            io,
            options,
            cancel,
        }
    }

    /// Run the session to completion, failure, or interruption.
    ///
    /// Cancellation observed by the end of the run wins over any other
    /// outcome.
    pub async fn run(&mut self) -> SessionReport {
        let mut decisions = Vec::new();
        let mut outcome = self.drive(&mut decisions).await;

        if self.cancel.is_cancelled() && !matches!(outcome, SessionOutcome::Cancelled) {
            if let SessionOutcome::Failed(err) = &outcome {
                tracing::debug!("error superseded by cancellation: {err}");
            }
            outcome = SessionOutcome::Cancelled;
        }

        match &outcome {
            SessionOutcome::NothingToDo => {}
            SessionOutcome::Failed(err @ SessionError::Fetch(_)) => {
                self.io.renderer.error(&err.to_string());
            }
            SessionOutcome::Failed(err) => {
                self.io.renderer.error(&err.to_string());
                self.render_summary(&decisions, false);
            }
            SessionOutcome::Completed => self.render_summary(&decisions, false),
            SessionOutcome::Cancelled => self.render_summary(&decisions, true),
        }

        tracing::info!(
            decisions = decisions.len(),
            outcome = ?outcome,
            "session finished"
        );
        SessionReport { decisions, outcome }
    }

    async fn drive(&mut self, decisions: &mut Vec<Decision>) -> SessionOutcome {
        let forks = match self.fetch().await {
            None => return SessionOutcome::Cancelled,
            Some(Err(err)) => return SessionOutcome::Failed(SessionError::Fetch(err)),
            Some(Ok(forks)) => forks,
        };
        if forks.is_empty() {
            self.io.renderer.no_forks();
            return SessionOutcome::NothingToDo;
        }
        self.io.renderer.found_forks(forks.len());

        let engine = DecisionEngine::new(
            self.io.renderer,
            self.io.browser,
            self.io.deleter,
            &self.cancel,
            &self.options,
        );
        for fork in &forks {
            if self.cancel.is_cancelled() {
                return SessionOutcome::Cancelled;
            }

            let divergence = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    decisions.push(Decision::new(fork, DecisionKind::Skipped(SkipReason::Cancelled)));
                    return SessionOutcome::Cancelled;
                }
                divergence = divergence_for(self.io.source, fork) => divergence,
            };
            self.io.renderer.fork_summary(fork, divergence);

            match engine.decide(fork, &mut *self.io.answers).await {
                Ok(decision) => {
                    let cancelled = decision.is_cancelled();
                    decisions.push(decision);
                    if cancelled {
                        return SessionOutcome::Cancelled;
                    }
                }
                Err(err) if self.cancel.is_cancelled() => {
                    tracing::debug!("read failure during cancellation: {err}");
                    decisions.push(Decision::new(fork, DecisionKind::Skipped(SkipReason::Cancelled)));
                    return SessionOutcome::Cancelled;
                }
                Err(err) => {
                    let reason = match &err {
                        SessionError::Input(e) => format!("input unavailable: {e}"),
                        SessionError::Fetch(e) => e.to_string(),
                    };
                    decisions.push(Decision::new(fork, DecisionKind::Failed(reason)));
                    return SessionOutcome::Failed(err);
                }
            }
        }
        SessionOutcome::Completed
    }

    /// Fetch forks behind the spinner; `None` means cancelled first.
    async fn fetch(&self) -> Option<Result<Vec<Fork>, GitHubError>> {
        let mut progress = start_progress(
            settings::PROGRESS_LABEL_FETCH,
            self.options.color,
            self.options.progress,
            &self.cancel,
        );
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = fetch_forks(self.io.source) => Some(result),
        };
        progress.finish();
        result
    }

    fn render_summary(&self, decisions: &[Decision], interrupted: bool) {
        self.io
            .renderer
            .summary(DecisionTally::from_decisions(decisions), interrupted);
    }
}

/// Comparison stats for display; failures only omit the stats.
async fn divergence_for(source: &dyn ForkSource, fork: &Fork) -> Option<Divergence> {
    match source.compare(fork).await {
        Ok(divergence) => Some(divergence),
        Err(err) => {
            tracing::debug!(repo = %fork.name_with_owner, "comparison unavailable: {err}");
            None
        }
    }
}
