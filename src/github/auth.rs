//! Token resolution for GitHub requests.
//!
//! First hit wins: configured token (`github.token` or `FORKSWEEP_TOKEN`),
//! `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token` from the GitHub CLI.

use crate::error::ConfigError;
use std::process::{Command, Stdio};

/// Resolve a token from the real environment and the `gh` CLI.
pub fn resolve_token(configured: Option<&str>) -> Result<String, ConfigError> {
    resolve_token_with(configured, |name| std::env::var(name).ok(), gh_cli_token)
}

pub(crate) fn resolve_token_with<FEnv, FCli>(
    configured: Option<&str>,
    env_lookup: FEnv,
    cli_token: FCli,
) -> Result<String, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
    FCli: FnOnce() -> Option<String>,
{
    let candidates = configured
        .map(str::to_string)
        .into_iter()
        .chain(env_lookup("GITHUB_TOKEN"))
        .chain(env_lookup("GH_TOKEN"));
    for candidate in candidates {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    if let Some(token) = cli_token()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
    {
        tracing::debug!("using token from `gh auth token`");
        return Ok(token);
    }

    Err(ConfigError::MissingToken)
}

/// Best-effort `gh auth token`; any failure yields `None`.
fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_token_wins() {
        let token = resolve_token_with(
            Some("cfg"),
            |_| Some("env".to_string()),
            || panic!("cli must not run"),
        )
        .unwrap();
        assert_eq!(token, "cfg");
    }

    #[test]
    fn github_token_precedes_gh_token() {
        let token = resolve_token_with(
            None,
            |name| match name {
                "GITHUB_TOKEN" => Some(" first ".to_string()),
                "GH_TOKEN" => Some("second".to_string()),
                _ => None,
            },
            || None,
        )
        .unwrap();
        assert_eq!(token, "first");
    }

    #[test]
    fn falls_back_to_cli_then_errors() {
        let token = resolve_token_with(None, |_| None, || Some("gho_x\n".to_string())).unwrap();
        assert_eq!(token, "gho_x");

        let err = resolve_token_with(None, |_| Some("  ".to_string()), || None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }
}
