//! Domain types shared by the GitHub client, the renderer, and the session.

use std::fmt;

/// A branch reference: default branch name plus its head commit id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub oid: String,
}

impl BranchRef {
    pub fn new(name: impl Into<String>, oid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oid: oid.into(),
        }
    }
}

/// The upstream repository a fork was created from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRepo {
    pub name_with_owner: String,
    pub default_branch: Option<BranchRef>,
}

/// One open pull request whose head lives on a fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
}

/// Commit divergence of a fork's default branch relative to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divergence {
    pub ahead_by: u64,
    pub behind_by: u64,
}

impl Divergence {
    /// Whether the branches differ at all.
    pub fn is_diverged(&self) -> bool {
        self.ahead_by > 0 || self.behind_by > 0
    }
}

/// One fork under consideration for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fork {
    /// Unique `owner/name` key.
    pub name_with_owner: String,
    pub name: String,
    pub owner_login: String,
    pub parent: Option<ParentRepo>,
    pub default_branch: Option<BranchRef>,
    pub is_archived: bool,
    /// Timestamp exactly as reported by the API.
    pub updated_at: String,
    /// Open pull requests headed on this fork.
    pub pull_requests: Vec<PullRequestSummary>,
}

impl Fork {
    /// A fork is risky when open pull requests depend on it.
    pub fn is_risky(&self) -> bool {
        !self.pull_requests.is_empty()
    }

    /// Parent `owner/name`, or an empty string for detached forks.
    pub fn parent_name(&self) -> &str {
        self.parent
            .as_ref()
            .map(|parent| parent.name_with_owner.as_str())
            .unwrap_or("")
    }

    /// Web location of this fork under `web_base_url`.
    pub fn web_url(&self, web_base_url: &str) -> String {
        format!(
            "{}/{}",
            web_base_url.trim_end_matches('/'),
            self.name_with_owner
        )
    }
}

/// Why a fork was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Operator answered something other than `y`.
    Declined,
    /// Operator did not type `yes` at the risk confirmation.
    NotConfirmed,
    /// The session was interrupted while this fork was in flight.
    Cancelled,
}

/// Terminal outcome of processing one fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionKind {
    Deleted,
    Skipped(SkipReason),
    Failed(String),
}

/// Final record for one fork, produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub fork: String,
    pub kind: DecisionKind,
}

impl Decision {
    pub fn new(fork: &Fork, kind: DecisionKind) -> Self {
        Self {
            fork: fork.name_with_owner.clone(),
            kind,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, DecisionKind::Skipped(SkipReason::Cancelled))
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => write!(f, "deleted"),
            Self::Skipped(SkipReason::Declined) => write!(f, "skipped"),
            Self::Skipped(SkipReason::NotConfirmed) => write!(f, "skipped (not confirmed)"),
            Self::Skipped(SkipReason::Cancelled) => write!(f, "skipped (cancelled)"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Aggregate counts over a set of decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionTally {
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DecisionTally {
    pub fn from_decisions(decisions: &[Decision]) -> Self {
        decisions
            .iter()
            .fold(Self::default(), |mut tally, decision| {
                match decision.kind {
                    DecisionKind::Deleted => tally.deleted += 1,
                    DecisionKind::Skipped(_) => tally.skipped += 1,
                    DecisionKind::Failed(_) => tally.failed += 1,
                }
                tally
            })
    }
}
