//! forksweep: interactively review and delete GitHub forks.
//!
//! The crate fetches the viewer's forks, annotates each with divergence from
//! its parent and any open pull requests headed on it, and walks them through
//! a confirm-then-delete prompt. Every prompt and the fetch spinner can be
//! interrupted by one shared cancellation signal.
//!
//! # Quick start
//!
//! ```no_run
//! use forksweep::browser::SystemBrowser;
//! use forksweep::cancel::CancelSignal;
//! use forksweep::config::load_config;
//! use forksweep::github::{auth::resolve_token, GitHubClient};
//! use forksweep::session::{SessionIo, SessionOptions, SessionRunner};
//! use forksweep::tui::{LineReader, Renderer};
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let token = resolve_token(config.github.token.as_deref()).unwrap();
//! let client = GitHubClient::new(&config.github, token);
//! let mut answers = LineReader::stdin();
//! let renderer = Renderer::new(config.display.color);
//! let mut runner = SessionRunner::new(
//!     SessionIo {
//!         source: &client,
//!         deleter: &client,
//!         answers: &mut answers,
//!         renderer: &renderer,
//!         browser: &SystemBrowser,
//!     },
//!     SessionOptions::default(),
//!     CancelSignal::new(),
//! );
//! let report = runner.run().await;
//! std::process::exit(report.exit_code());
//! # }
//! ```

pub mod browser;
pub mod build_info;
pub mod cancel;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod session;
#[cfg(test)]
pub(crate) mod testsupport;
pub mod tui;
pub mod types;
pub mod ui;
