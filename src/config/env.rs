//! Environment overrides applied on top of the file config.

use crate::error::ConfigError;

use super::Config;

pub(crate) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup, "FORKSWEEP_API_BASE_URL") {
        config.github.api_base_url = url;
    }
    if let Some(url) = non_empty(env_lookup, "FORKSWEEP_WEB_BASE_URL") {
        config.github.web_base_url = url;
    }
    if let Some(token) = non_empty(env_lookup, "FORKSWEEP_TOKEN") {
        config.github.token = Some(token);
    }
    if let Some(timeout) = non_empty(env_lookup, "FORKSWEEP_TIMEOUT_SECS") {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid FORKSWEEP_TIMEOUT_SECS value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        // Clamp to at least 1 second so a zero never means "no timeout".
        config.github.timeout_secs = parsed.max(1);
    }
    // https://no-color.org: any non-empty value disables color.
    if env_lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        config.display.color = false;
    }
    Ok(())
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
