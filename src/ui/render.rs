//! Rendering contract and default terminal renderer binding.

pub use crate::tui::renderer::Renderer;
use crate::types::{DecisionTally, Divergence, Fork};

/// Injectable rendering interface used by the session and decision engine.
///
/// `Renderer` is the terminal implementation; tests substitute a recording
/// sink to assert on prompts and status lines without touching stderr.
pub trait RenderSink: Send + Sync {
    /// Announce how many forks were fetched.
    fn found_forks(&self, count: usize);
    /// Report that there is nothing to process.
    fn no_forks(&self);
    /// Render one fork's summary block.
    fn fork_summary(&self, fork: &Fork, divergence: Option<Divergence>);
    /// Render a question awaiting operator input.
    fn prompt(&self, text: &str, risk: bool);
    fn skipping(&self, name: &str);
    fn deleting(&self, name: &str);
    fn deleted(&self, name: &str, confirmation: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    /// Render the end-of-session tally.
    fn summary(&self, tally: DecisionTally, interrupted: bool);
}

impl RenderSink for Renderer {
    fn found_forks(&self, count: usize) {
        self.found_forks(count);
    }

    fn no_forks(&self) {
        self.no_forks();
    }

    fn fork_summary(&self, fork: &Fork, divergence: Option<Divergence>) {
        self.fork_summary(fork, divergence);
    }

    fn prompt(&self, text: &str, risk: bool) {
        self.prompt(text, risk);
    }

    fn skipping(&self, name: &str) {
        self.skipping(name);
    }

    fn deleting(&self, name: &str) {
        self.deleting(name);
    }

    fn deleted(&self, name: &str, confirmation: &str) {
        self.deleted(name, confirmation);
    }

    fn warn(&self, msg: &str) {
        self.warn(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn summary(&self, tally: DecisionTally, interrupted: bool) {
        self.summary(tally, interrupted);
    }
}
