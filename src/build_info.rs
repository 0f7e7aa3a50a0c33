//! Build metadata embedded by `build.rs` for `--version` and `--help`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash, or `unknown` outside a git checkout.
pub const GIT_COMMIT: &str = env!("FORKSWEEP_BUILD_GIT_HASH");

/// UTC build time.
pub const BUILD_TIMESTAMP: &str = env!("FORKSWEEP_BUILD_TIMESTAMP");

/// Multi-line text for `forksweep --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("FORKSWEEP_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("FORKSWEEP_BUILD_TIMESTAMP")
);

/// Trailer appended to `forksweep --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("FORKSWEEP_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("FORKSWEEP_BUILD_TIMESTAMP")
);

/// `forksweep/<version>` identifier sent as the HTTP user agent.
pub fn user_agent() -> String {
    format!("forksweep/{VERSION} ({GIT_COMMIT})")
}
