//! GitHub data sources and the destructive delete action.
//!
//! The session only depends on the [`ForkSource`] and [`ForkDeleter`] traits,
//! so tests can provide in-memory fakes while production uses
//! [`GitHubClient`].

use crate::error::GitHubError;
use crate::types::{Divergence, Fork, PullRequestSummary};
use async_trait::async_trait;
use std::collections::HashMap;

pub mod auth;
mod client;
mod queries;
mod retry;

pub use client::GitHubClient;

/// Read-only view of the operator's forks.
#[async_trait]
pub trait ForkSource: Send + Sync {
    /// Open pull requests authored by the viewer, keyed by head `owner/name`.
    async fn open_pull_requests(
        &self,
    ) -> Result<HashMap<String, Vec<PullRequestSummary>>, GitHubError>;

    /// All forks owned by the viewer, most recently updated first.
    async fn list_forks(&self) -> Result<Vec<Fork>, GitHubError>;

    /// Ahead/behind counts of the fork's default branch against its parent.
    async fn compare(&self, fork: &Fork) -> Result<Divergence, GitHubError>;
}

/// Deletes a fork; `Ok` carries a confirmation message.
#[async_trait]
pub trait ForkDeleter: Send + Sync {
    async fn delete_fork(&self, fork: &Fork) -> Result<String, GitHubError>;
}

/// Fetch open pull requests and forks, attaching each fork's pull requests.
///
/// Fork order from the source is preserved.
pub async fn fetch_forks(source: &dyn ForkSource) -> Result<Vec<Fork>, GitHubError> {
    let mut pull_requests = source.open_pull_requests().await?;
    let mut forks = source.list_forks().await?;
    for fork in &mut forks {
        if let Some(prs) = pull_requests.remove(&fork.name_with_owner) {
            fork.pull_requests = prs;
        }
    }
    tracing::info!(
        forks = forks.len(),
        risky = forks.iter().filter(|fork| fork.is_risky()).count(),
        "fetched forks"
    );
    Ok(forks)
}
