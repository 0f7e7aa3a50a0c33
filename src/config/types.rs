//! Configuration data model.
//!
//! `File*` structs mirror the TOML layout (every field optional); `Config` is
//! the resolved, validated shape the rest of the crate consumes.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{
    DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_WEB_BASE_URL,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub github: GitHubConfig,
    pub display: DisplayConfig,
}

/// GitHub endpoint and request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// REST base, e.g. `https://api.github.com` or `https://ghe.example/api/v3`.
    pub api_base_url: String,
    /// Browser base used for "open in browser".
    pub web_base_url: String,
    /// Token from config or `FORKSWEEP_TOKEN`; other sources are consulted
    /// by `github::auth` when this is `None`.
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Nodes requested per GraphQL page.
    pub page_size: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GitHubConfig {
    /// REST base without a trailing slash.
    pub fn rest_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// GraphQL endpoint derived from the REST base.
    ///
    /// GitHub Enterprise serves REST under `/api/v3` and GraphQL under
    /// `/api/graphql`; github.com serves both from the API host root.
    pub fn graphql_url(&self) -> String {
        let base = self.rest_base();
        match base.strip_suffix("/api/v3") {
            Some(host) => format!("{host}/api/graphql"),
            None => format!("{base}/graphql"),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Terminal output preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub color: bool,
    pub progress: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub(crate) github: FileGitHubConfig,
    #[serde(default)]
    pub(crate) display: FileDisplayConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileGitHubConfig {
    pub(crate) api_base_url: Option<String>,
    pub(crate) web_base_url: Option<String>,
    pub(crate) token: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileDisplayConfig {
    pub(crate) color: Option<bool>,
    pub(crate) progress: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_url_for_github_dot_com() {
        let cfg = GitHubConfig::default();
        assert_eq!(cfg.graphql_url(), "https://api.github.com/graphql");
    }

    #[test]
    fn graphql_url_for_enterprise_host() {
        let cfg = GitHubConfig {
            api_base_url: "https://ghe.example.com/api/v3/".to_string(),
            ..GitHubConfig::default()
        };
        assert_eq!(cfg.rest_base(), "https://ghe.example.com/api/v3");
        assert_eq!(cfg.graphql_url(), "https://ghe.example.com/api/graphql");
    }

    #[test]
    fn timeout_never_zero() {
        let cfg = GitHubConfig {
            timeout_secs: 0,
            ..GitHubConfig::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(1));
    }
}
