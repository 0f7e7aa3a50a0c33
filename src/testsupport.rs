//! Shared test fixtures for the session and decision-engine test modules.
//!
//! Every collaborator seam gets a small in-memory fake here so each test
//! module can script a session without reaching the network or a terminal.

use crate::browser::BrowserOpener;
use crate::cancel::CancelSignal;
use crate::error::GitHubError;
use crate::github::{ForkDeleter, ForkSource};
use crate::tui::input::{normalize_answer, AnswerSource, ReadOutcome};
use crate::types::{DecisionTally, Divergence, Fork, PullRequestSummary};
use crate::ui::render::RenderSink;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Build a fork `octo/<name>` with a parent and default branches.
pub fn fork(name: &str) -> Fork {
    Fork {
        name_with_owner: format!("octo/{name}"),
        name: name.to_string(),
        owner_login: "octo".to_string(),
        parent: Some(crate::types::ParentRepo {
            name_with_owner: format!("upstream/{name}"),
            default_branch: Some(crate::types::BranchRef::new("main", "p0")),
        }),
        default_branch: Some(crate::types::BranchRef::new("main", "f0")),
        updated_at: "2024-05-01T12:00:00Z".to_string(),
        ..Fork::default()
    }
}

/// Build a fork with one open pull request attached.
pub fn risky_fork(name: &str) -> Fork {
    let mut fork = fork(name);
    fork.pull_requests.push(PullRequestSummary {
        number: 42,
        title: "Keep me".to_string(),
        url: format!("https://github.com/upstream/{name}/pull/42"),
    });
    fork
}

/// One scripted reply from [`ScriptedAnswers`].
#[derive(Debug)]
pub enum Scripted {
    Line(&'static str),
    /// Fire the shared cancel signal and report cancellation.
    Cancel,
    /// Fail the read with `UnexpectedEof`.
    Eof,
    /// Fire the cancel signal, then fail the read anyway.
    CancelThenEof,
}

/// Answer source replaying a fixed script; running out of script is EOF.
pub struct ScriptedAnswers {
    script: VecDeque<Scripted>,
    pub reads: usize,
}

impl ScriptedAnswers {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: script.into_iter().collect(),
            reads: 0,
        }
    }

    pub fn lines(lines: &[&'static str]) -> Self {
        Self::new(lines.iter().map(|line| Scripted::Line(*line)))
    }
}

#[async_trait]
impl AnswerSource for ScriptedAnswers {
    async fn read_answer(&mut self, cancel: &CancelSignal) -> io::Result<ReadOutcome> {
        self.reads += 1;
        if cancel.is_cancelled() {
            return Ok(ReadOutcome::Cancelled);
        }
        match self.script.pop_front() {
            Some(Scripted::Line(line)) => Ok(ReadOutcome::Line(normalize_answer(line))),
            Some(Scripted::Cancel) => {
                cancel.fire();
                Ok(ReadOutcome::Cancelled)
            }
            Some(Scripted::CancelThenEof) => {
                cancel.fire();
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"))
            }
            Some(Scripted::Eof) | None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            )),
        }
    }
}

/// Render sink that records every call as a short text event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("sink lock").clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| event.strip_prefix("prompt:").map(str::to_string))
            .collect()
    }

    fn push(&self, event: String) {
        self.events.lock().expect("sink lock").push(event);
    }
}

impl RenderSink for RecordingSink {
    fn found_forks(&self, count: usize) {
        self.push(format!("found:{count}"));
    }

    fn no_forks(&self) {
        self.push("no_forks".to_string());
    }

    fn fork_summary(&self, fork: &Fork, divergence: Option<Divergence>) {
        let stats = divergence
            .map(|d| format!("{}/{}", d.ahead_by, d.behind_by))
            .unwrap_or_else(|| "-".to_string());
        self.push(format!("summary:{}:{stats}", fork.name_with_owner));
    }

    fn prompt(&self, text: &str, risk: bool) {
        let marker = if risk { "!" } else { "" };
        self.push(format!("prompt:{marker}{text}"));
    }

    fn skipping(&self, name: &str) {
        self.push(format!("skipping:{name}"));
    }

    fn deleting(&self, name: &str) {
        self.push(format!("deleting:{name}"));
    }

    fn deleted(&self, name: &str, confirmation: &str) {
        self.push(format!("deleted:{name}:{confirmation}"));
    }

    fn warn(&self, msg: &str) {
        self.push(format!("warn:{msg}"));
    }

    fn error(&self, msg: &str) {
        self.push(format!("error:{msg}"));
    }

    fn summary(&self, tally: DecisionTally, interrupted: bool) {
        self.push(format!(
            "summary_total:{}/{}/{}:{interrupted}",
            tally.deleted, tally.skipped, tally.failed
        ));
    }
}

/// In-memory fork source.
#[derive(Default)]
pub struct FakeSource {
    pub forks: Vec<Fork>,
    pub pull_requests: HashMap<String, Vec<PullRequestSummary>>,
    pub divergence: HashMap<String, Divergence>,
    /// When set, `list_forks` fails with this GraphQL message.
    pub list_error: Option<String>,
    /// When true, `list_forks` never resolves.
    pub hang: bool,
    /// When true, `compare` never resolves.
    pub hang_compare: bool,
    pub compare_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_forks(forks: Vec<Fork>) -> Self {
        Self {
            forks,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ForkSource for FakeSource {
    async fn open_pull_requests(
        &self,
    ) -> Result<HashMap<String, Vec<PullRequestSummary>>, GitHubError> {
        Ok(self.pull_requests.clone())
    }

    async fn list_forks(&self) -> Result<Vec<Fork>, GitHubError> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        match &self.list_error {
            Some(msg) => Err(GitHubError::GraphQl(msg.clone())),
            None => Ok(self.forks.clone()),
        }
    }

    async fn compare(&self, fork: &Fork) -> Result<Divergence, GitHubError> {
        self.compare_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_compare {
            std::future::pending::<()>().await;
        }
        self.divergence
            .get(&fork.name_with_owner)
            .copied()
            .ok_or_else(|| GitHubError::status(404, "No common ancestor".to_string(), None))
    }
}

/// Deleter recording each call; names in `failing` return a 403.
#[derive(Default)]
pub struct FakeDeleter {
    pub failing: HashSet<String>,
    deleted: Mutex<Vec<String>>,
}

impl FakeDeleter {
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|name| name.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().expect("deleter lock").clone()
    }
}

#[async_trait]
impl ForkDeleter for FakeDeleter {
    async fn delete_fork(&self, fork: &Fork) -> Result<String, GitHubError> {
        if self.failing.contains(&fork.name_with_owner) {
            return Err(GitHubError::status(
                403,
                "Must have admin rights".to_string(),
                None,
            ));
        }
        self.deleted
            .lock()
            .expect("deleter lock")
            .push(fork.name_with_owner.clone());
        Ok(format!("deleted {}", fork.name_with_owner))
    }
}

/// Browser opener that records URLs and optionally fails.
#[derive(Default)]
pub struct FakeBrowser {
    pub fail: bool,
    opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("browser lock").clone()
    }
}

impl BrowserOpener for FakeBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened
            .lock()
            .expect("browser lock")
            .push(url.to_string());
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no launcher"))
        } else {
            Ok(())
        }
    }
}
