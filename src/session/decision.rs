//! Per-fork confirm-then-delete state machine.
//!
//! ```text
//! Prompted --o--> BrowserOpened --> RePrompted
//! Prompted | RePrompted --y--> AwaitingRiskConfirm (risky, not suppressed)
//!                         \--> Deleted
//! AwaitingRiskConfirm --yes--> Deleted
//! anything else --> Skipped
//! ```
//!
//! Every prompt read is a suspension point that may observe cancellation.

use crate::browser::BrowserOpener;
use crate::cancel::CancelSignal;
use crate::error::SessionError;
use crate::github::ForkDeleter;
use crate::tui::input::{AnswerSource, ReadOutcome};
use crate::tui::settings;
use crate::types::{Decision, DecisionKind, Fork, SkipReason};
use crate::ui::render::RenderSink;

use super::SessionOptions;

/// Prompt states awaiting an operator answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptState {
    Prompted,
    RePrompted,
    AwaitingRiskConfirm,
}

impl PromptState {
    fn text(self) -> &'static str {
        match self {
            Self::Prompted => settings::PROMPT_DELETE_WITH_OPEN,
            Self::RePrompted => settings::PROMPT_DELETE,
            Self::AwaitingRiskConfirm => settings::PROMPT_RISK_CONFIRM,
        }
    }

    fn is_risk(self) -> bool {
        self == Self::AwaitingRiskConfirm
    }
}

/// Where the prompt chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Delete,
    Skip(SkipReason),
}

/// Drives the prompt chain for one fork and carries out the result.
pub struct DecisionEngine<'a> {
    renderer: &'a dyn RenderSink,
    browser: &'a dyn BrowserOpener,
    deleter: &'a dyn ForkDeleter,
    cancel: &'a CancelSignal,
    options: &'a SessionOptions,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(
        renderer: &'a dyn RenderSink,
        browser: &'a dyn BrowserOpener,
        deleter: &'a dyn ForkDeleter,
        cancel: &'a CancelSignal,
        options: &'a SessionOptions,
    ) -> Self {
        Self {
            renderer,
            browser,
            deleter,
            cancel,
            options,
        }
    }

    /// Resolve `fork` to exactly one [`Decision`].
    ///
    /// With `force` no prompt is issued. A failed read is returned as
    /// [`SessionError::Input`]; the caller records the item.
    pub async fn decide(
        &self,
        fork: &Fork,
        answers: &mut dyn AnswerSource,
    ) -> Result<Decision, SessionError> {
        let resolution = if self.options.force {
            Resolution::Delete
        } else {
            self.prompt_chain(fork, answers).await?
        };

        let kind = match resolution {
            Resolution::Delete => self.delete(fork).await,
            Resolution::Skip(reason) => {
                if reason != SkipReason::Cancelled {
                    self.renderer.skipping(&fork.name_with_owner);
                }
                tracing::debug!(repo = %fork.name_with_owner, ?reason, "skipped fork");
                DecisionKind::Skipped(reason)
            }
        };
        Ok(Decision::new(fork, kind))
    }

    async fn prompt_chain(
        &self,
        fork: &Fork,
        answers: &mut dyn AnswerSource,
    ) -> Result<Resolution, SessionError> {
        let mut state = PromptState::Prompted;
        loop {
            self.renderer.prompt(state.text(), state.is_risk());
            let answer = match answers.read_answer(self.cancel).await? {
                ReadOutcome::Line(answer) => answer,
                ReadOutcome::Cancelled => return Ok(Resolution::Skip(SkipReason::Cancelled)),
            };

            state = match (state, answer.as_str()) {
                (PromptState::Prompted, settings::ANSWER_OPEN) => {
                    self.open_in_browser(fork);
                    PromptState::RePrompted
                }
                (PromptState::Prompted | PromptState::RePrompted, settings::ANSWER_YES_SHORT) => {
                    if fork.is_risky() && !self.options.skip_double_confirm {
                        PromptState::AwaitingRiskConfirm
                    } else {
                        return Ok(Resolution::Delete);
                    }
                }
                (PromptState::AwaitingRiskConfirm, settings::ANSWER_YES_LONG) => {
                    return Ok(Resolution::Delete)
                }
                (PromptState::AwaitingRiskConfirm, _) => {
                    return Ok(Resolution::Skip(SkipReason::NotConfirmed))
                }
                _ => return Ok(Resolution::Skip(SkipReason::Declined)),
            };
        }
    }

    fn open_in_browser(&self, fork: &Fork) {
        let url = fork.web_url(&self.options.web_base_url);
        if let Err(err) = self.browser.open(&url) {
            tracing::warn!(%url, "failed to open browser: {err}");
            self.renderer
                .warn(&format!("could not open {url} in a browser: {err}"));
        }
    }

    /// Deletion runs to completion even if cancellation fires meanwhile.
    async fn delete(&self, fork: &Fork) -> DecisionKind {
        let name = fork.name_with_owner.as_str();
        self.renderer.deleting(name);
        match self.deleter.delete_fork(fork).await {
            Ok(confirmation) => {
                self.renderer.deleted(name, &confirmation);
                DecisionKind::Deleted
            }
            Err(err) => {
                tracing::warn!(repo = %name, "delete failed: {err}");
                self.renderer
                    .error(&format!("failed to delete {name}: {err}"));
                DecisionKind::Failed(err.to_string())
            }
        }
    }
}
