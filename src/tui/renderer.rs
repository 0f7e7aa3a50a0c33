//! Terminal output renderer for fork summaries, prompts, and status lines.
//!
//! Everything is written to stderr so stdout stays clean for piping.

use crate::tui::settings;
use crate::types::{DecisionTally, Divergence, Fork};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

/// Stateless stderr renderer; `color` toggles crossterm styling.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_bold(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print the fork count banner.
    pub fn found_forks(&self, count: usize) {
        eprintln!(
            "{}",
            self.paint_bold(
                &format!("{} Found {count} forks", settings::GLYPH_ARCHIVED),
                settings::COLOR_SUMMARY
            )
        );
    }

    /// Print the empty-result message.
    pub fn no_forks(&self) {
        eprintln!("No forked repositories found.");
    }

    /// Print the per-fork summary block.
    pub fn fork_summary(&self, fork: &Fork, divergence: Option<Divergence>) {
        eprintln!();
        for (text, color, bold) in fork_summary_lines(fork, divergence) {
            if bold {
                eprintln!("{}", self.paint_bold(&text, color));
            } else {
                eprintln!("{}", self.paint(&text, color));
            }
        }
    }

    /// Print a prompt without a trailing newline.
    pub fn prompt(&self, text: &str, risk: bool) {
        let line = if risk {
            self.paint_bold(
                &format!("{} {text}", settings::GLYPH_RISK_PROMPT),
                settings::COLOR_RISK,
            )
        } else {
            self.paint(
                &format!("{} {text}", settings::GLYPH_PROMPT),
                settings::COLOR_PROMPT,
            )
        };
        let mut err = io::stderr();
        let _ = write!(err, "{line}");
        let _ = err.flush();
    }

    pub fn skipping(&self, name: &str) {
        eprintln!(
            "{}",
            self.paint(
                &format!("{} Skipping {name}...", settings::GLYPH_SKIP),
                settings::COLOR_INFO
            )
        );
    }

    pub fn deleting(&self, name: &str) {
        eprintln!(
            "{}",
            self.paint(
                &format!("{} Deleting {name}...", settings::GLYPH_DELETE),
                settings::COLOR_DELETE
            )
        );
    }

    pub fn deleted(&self, name: &str, confirmation: &str) {
        let mut text = format!("{} Successfully deleted {name}.", settings::GLYPH_DELETED);
        if !confirmation.trim().is_empty() {
            text.push_str(&format!(" ({confirmation})"));
        }
        eprintln!("{}", self.paint(&text, settings::COLOR_SUCCESS));
    }

    pub fn warn(&self, msg: &str) {
        eprintln!(
            "\r{} {msg}",
            self.paint_bold(settings::LABEL_WARNING, settings::COLOR_WARNING)
        );
    }

    pub fn error(&self, msg: &str) {
        eprintln!(
            "\r{} {msg}",
            self.paint_bold(settings::LABEL_ERROR, settings::COLOR_ERROR)
        );
    }

    /// Print the end-of-session tally.
    pub fn summary(&self, tally: DecisionTally, interrupted: bool) {
        eprintln!();
        eprintln!("{}", summary_line(tally, interrupted));
        eprintln!(
            "{}",
            self.paint_bold(
                &format!("{} Process complete!", settings::GLYPH_DONE),
                settings::COLOR_SUMMARY
            )
        );
    }
}

/// Build the summary block as `(text, color, bold)` rows.
pub(crate) fn fork_summary_lines(
    fork: &Fork,
    divergence: Option<Divergence>,
) -> Vec<(String, Color, bool)> {
    let mut lines = vec![(
        format!(
            "{} Repository: {} (owner: {})",
            settings::GLYPH_REPOSITORY,
            fork.name,
            fork.owner_login
        ),
        settings::COLOR_REPOSITORY,
        true,
    )];
    lines.push((
        format!(
            "{}{} Forked from: {}",
            settings::INDENT_1,
            settings::GLYPH_PARENT,
            fork.parent_name()
        ),
        settings::COLOR_INFO,
        false,
    ));
    if fork.is_archived {
        lines.push((
            format!(
                "{}{} This repository is archived",
                settings::INDENT_1,
                settings::GLYPH_ARCHIVED
            ),
            settings::COLOR_ARCHIVED,
            false,
        ));
    }
    if let Some(divergence) = divergence.filter(Divergence::is_diverged) {
        lines.push((
            format!(
                "{}{} Commits: {} ahead, {} behind",
                settings::INDENT_1,
                settings::GLYPH_COMMITS,
                divergence.ahead_by,
                divergence.behind_by
            ),
            settings::COLOR_INFO,
            false,
        ));
    }
    if fork.is_risky() {
        lines.push((
            format!(
                "{}{} Has {} open pull request(s):",
                settings::INDENT_1,
                settings::GLYPH_WARNING,
                fork.pull_requests.len()
            ),
            settings::COLOR_RISK,
            false,
        ));
        for pr in &fork.pull_requests {
            lines.push((
                format!("{}#{}: {}", settings::INDENT_2, pr.number, pr.title),
                settings::COLOR_PR_TITLE,
                false,
            ));
            lines.push((
                format!("{}URL: {}", settings::INDENT_2, pr.url),
                settings::COLOR_INFO,
                false,
            ));
        }
    }
    lines.push((
        format!(
            "{}{} Last updated: {}",
            settings::INDENT_1,
            settings::GLYPH_UPDATED,
            fork.updated_at
        ),
        settings::COLOR_UPDATED,
        false,
    ));
    lines
}

pub(crate) fn summary_line(tally: DecisionTally, interrupted: bool) -> String {
    let mut line = format!(
        "Deleted {}, skipped {}, failed {}",
        tally.deleted, tally.skipped, tally.failed
    );
    if interrupted {
        line.push_str(" (interrupted)");
    }
    line
}
