//! Embeds the commit hash and build time for `forksweep --version`.
//!
//! Both values can be pinned through the environment for reproducible
//! builds. Missing git or clock tooling degrades to `unknown` markers.

use std::env;
use std::fs;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const HASH_VAR: &str = "FORKSWEEP_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "FORKSWEEP_BUILD_TIMESTAMP";

fn main() {
    watch_git_head();
    for var in [HASH_VAR, TIMESTAMP_VAR] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let hash = env::var(HASH_VAR)
        .ok()
        .or_else(|| capture("git", &["rev-parse", "--short=10", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = env::var(TIMESTAMP_VAR).unwrap_or_else(|_| utc_now());

    println!("cargo:rustc-env={HASH_VAR}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

/// Rebuild when HEAD moves, either by checkout or by a new commit on the
/// checked-out branch.
fn watch_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    let branch = fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.trim().strip_prefix("ref: ").map(str::to_string));
    if let Some(branch) = branch {
        println!("cargo:rerun-if-changed=.git/{branch}");
    }
}

fn utc_now() -> String {
    capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]).unwrap_or_else(|| {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        format!("unix:{secs}")
    })
}

/// Trimmed stdout of a successful command.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|text| !text.is_empty())
}
