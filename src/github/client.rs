//! reqwest-backed GitHub client for forks, pull requests, comparisons, and
//! repository deletion.

use super::queries::{
    CompareResponse, Connection, GraphQlRequest, GraphQlResponse, PageVariables,
    PullRequestsData, RepositoriesData, FORKS_QUERY, OPEN_PULL_REQUESTS_QUERY,
};
use super::retry::{parse_retry_after_secs, RetryPolicy};
use super::{ForkDeleter, ForkSource};
use crate::build_info;
use crate::config::GitHubConfig;
use crate::error::GitHubError;
use crate::types::{Divergence, Fork, PullRequestSummary};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Client for the GitHub REST and GraphQL APIs.
pub struct GitHubClient {
    http: reqwest::Client,
    rest_base: String,
    graphql_url: String,
    token: String,
    page_size: u32,
    retry_policy: RetryPolicy,
}

impl GitHubClient {
    /// Build a client from resolved config and an already-resolved token.
    pub fn new(config: &GitHubConfig, token: impl Into<String>) -> Self {
        Self::new_with_retry_policy(config, token, RetryPolicy::default())
    }

    fn new_with_retry_policy(
        config: &GitHubConfig,
        token: impl Into<String>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            http: build_http_client(config.timeout()),
            rest_base: config.rest_base().to_string(),
            graphql_url: config.graphql_url(),
            token: token.into(),
            page_size: config.page_size,
            retry_policy,
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    /// Send one request built by `build`, mapping non-2xx to `Status`.
    async fn send_once<F>(&self, build: &F) -> Result<reqwest::Response, GitHubError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let response = build().headers(self.headers()).send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let retry_after_secs = parse_retry_after_secs(response.headers());
        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::status(status, body, retry_after_secs))
    }

    async fn send_with_retries<F>(&self, build: F) -> Result<reqwest::Response, GitHubError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        self.send_with_policy(self.retry_policy, build).await
    }

    async fn send_with_policy<F>(
        &self,
        policy: RetryPolicy,
        build: F,
    ) -> Result<reqwest::Response, GitHubError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(&build).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if !policy.should_retry(&err, attempt) {
                        return Err(err);
                    }
                    let delay = policy.retry_delay_for(attempt, &err);
                    tracing::warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retrying GitHub request after error: {err}"
                    );
                    sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }

    async fn graphql<D>(&self, query: &str, after: Option<String>) -> Result<D, GitHubError>
    where
        D: DeserializeOwned,
    {
        let body = GraphQlRequest {
            query,
            variables: PageVariables {
                first: self.page_size,
                after,
            },
        };
        let response = self
            .send_with_retries(|| self.http.post(&self.graphql_url).json(&body))
            .await?;
        let parsed: GraphQlResponse<D> = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))?;
        if !parsed.errors.is_empty() {
            let messages = parsed
                .errors
                .into_iter()
                .map(|entry| entry.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GitHubError::GraphQl(messages));
        }
        parsed
            .data
            .ok_or_else(|| GitHubError::InvalidResponse("GraphQL response had no data".to_string()))
    }

    /// Walk every page of a viewer connection.
    async fn paginate<D, T>(
        &self,
        query: &str,
        extract: fn(D) -> Connection<T>,
    ) -> Result<Vec<T>, GitHubError>
    where
        D: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut after: Option<String> = None;
        let mut page: u32 = 0;
        loop {
            page += 1;
            let connection = extract(self.graphql::<D>(query, after.take()).await?);
            items.extend(connection.nodes.into_iter().flatten());
            tracing::debug!(page, total = items.len(), "fetched GraphQL page");
            match connection.page_info.next_cursor() {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl ForkSource for GitHubClient {
    async fn open_pull_requests(
        &self,
    ) -> Result<HashMap<String, Vec<PullRequestSummary>>, GitHubError> {
        let nodes = self
            .paginate(OPEN_PULL_REQUESTS_QUERY, |data: PullRequestsData| {
                data.viewer.pull_requests
            })
            .await?;
        let mut by_repo: HashMap<String, Vec<PullRequestSummary>> = HashMap::new();
        for (repo, summary) in nodes
            .into_iter()
            .filter_map(|node| node.into_keyed_summary())
        {
            by_repo.entry(repo).or_default().push(summary);
        }
        Ok(by_repo)
    }

    async fn list_forks(&self) -> Result<Vec<Fork>, GitHubError> {
        let nodes = self
            .paginate(FORKS_QUERY, |data: RepositoriesData| {
                data.viewer.repositories
            })
            .await?;
        Ok(nodes.into_iter().map(Fork::from).collect())
    }

    async fn compare(&self, fork: &Fork) -> Result<Divergence, GitHubError> {
        let url = compare_url(&self.rest_base, fork)?;
        // Comparisons only decorate the listing; a throttled one degrades
        // immediately instead of holding up the prompt.
        let response = self
            .send_with_policy(RetryPolicy::single_attempt(), || self.http.get(&url))
            .await?;
        let comparison: CompareResponse = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))?;
        Ok(comparison.into())
    }
}

#[async_trait]
impl ForkDeleter for GitHubClient {
    async fn delete_fork(&self, fork: &Fork) -> Result<String, GitHubError> {
        // Deletion is not retried: a retry after an ambiguous failure could
        // only ever report a confusing 404.
        let url = format!("{}/repos/{}", self.rest_base, fork.name_with_owner);
        self.send_once(&|| self.http.delete(&url)).await?;
        tracing::info!(repo = %fork.name_with_owner, "deleted fork");
        Ok(format!("deleted {}", fork.name_with_owner))
    }
}

/// Build an HTTP client with timeout and user agent applied.
fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(build_info::user_agent())
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// `repos/{parent}/compare/{parentBranch}...{owner}:{forkBranch}`.
fn compare_url(rest_base: &str, fork: &Fork) -> Result<String, GitHubError> {
    let missing = || GitHubError::MissingRepositoryInfo(fork.name_with_owner.clone());
    let parent = fork.parent.as_ref().ok_or_else(missing)?;
    let parent_branch = parent
        .default_branch
        .as_ref()
        .filter(|branch| !branch.name.is_empty())
        .ok_or_else(missing)?;
    let fork_branch = fork
        .default_branch
        .as_ref()
        .filter(|branch| !branch.name.is_empty())
        .ok_or_else(missing)?;
    if parent.name_with_owner.is_empty() {
        return Err(missing());
    }
    Ok(format!(
        "{rest_base}/repos/{}/compare/{}...{}:{}",
        parent.name_with_owner, parent_branch.name, fork.owner_login, fork_branch.name
    ))
}
