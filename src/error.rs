//! Unified error types for forksweep.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// GitHubError
// ---------------------------------------------------------------------------

/// Errors from the GitHub REST/GraphQL layer.
#[derive(Debug)]
pub enum GitHubError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the API.
    Status {
        code: u16,
        body: String,
        retry_after_secs: Option<u64>,
    },
    /// GraphQL response carried an `errors` array.
    GraphQl(String),
    /// Body could not be decoded into the expected shape.
    InvalidResponse(String),
    /// A fork lacks the parent/branch data needed for a comparison.
    MissingRepositoryInfo(String),
}

impl GitHubError {
    pub fn status(code: u16, body: String, retry_after_secs: Option<u64>) -> Self {
        Self::Status {
            code,
            body,
            retry_after_secs,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Status {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status { code, body, .. } => write!(f, "status {code}: {body}"),
            Self::GraphQl(msg) => write!(f, "graphql: {msg}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::MissingRepositoryInfo(repo) => {
                write!(f, "missing required repository information for {repo}")
            }
        }
    }
}

impl std::error::Error for GitHubError {}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors that stop a run before any fork is fetched.
#[derive(Debug)]
pub enum ConfigError {
    /// A config file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid TOML or names unknown keys.
    Parse(toml::de::Error),
    /// A setting is malformed or out of range.
    Invalid(String),
    /// No token source produced a GitHub token.
    MissingToken,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "malformed config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
            Self::MissingToken => write!(
                f,
                "no GitHub token found; set GITHUB_TOKEN, configure github.token, or run `gh auth login`"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) | Self::MissingToken => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// SessionError: fatal to the whole run
// ---------------------------------------------------------------------------

/// Errors that abort an interactive session.
#[derive(Debug)]
pub enum SessionError {
    /// The initial fork / pull-request fetch failed.
    Fetch(GitHubError),
    /// Operator input could not be read (EOF, closed terminal).
    Input(std::io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "error fetching forks: {e}"),
            Self::Input(e) => write!(f, "error reading input: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GitHubError> for SessionError {
    fn from(e: GitHubError) -> Self {
        Self::Fetch(e)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        Self::Input(e)
    }
}
