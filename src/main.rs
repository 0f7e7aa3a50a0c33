//! CLI entry point for forksweep.

mod cli;

use clap::Parser;
use forksweep::browser::SystemBrowser;
use forksweep::cancel::CancelSignal;
use forksweep::config::load_config;
use forksweep::github::auth::resolve_token;
use forksweep::github::GitHubClient;
use forksweep::logging::init_tracing;
use forksweep::session::{SessionIo, SessionOptions, SessionRunner, EXIT_FAILURE};
use forksweep::tui::{LineReader, Renderer};

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    // Apply CLI overrides.
    if args.no_color {
        config.display.color = false;
    }
    if args.no_progress {
        config.display.progress = false;
    }

    let renderer = Renderer::new(config.display.color);

    let token = match resolve_token(config.github.token.as_deref()) {
        Ok(token) => token,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(EXIT_FAILURE);
        }
    };

    let client = GitHubClient::new(&config.github, token);
    let cancel = CancelSignal::new();
    cancel.fire_on_ctrl_c();

    let mut answers = LineReader::stdin();
    let options = SessionOptions {
        force: args.force,
        skip_double_confirm: args.skip_confirmation,
        progress: config.display.progress,
        color: config.display.color,
        web_base_url: config.github.web_base_url.clone(),
    };
    let mut runner = SessionRunner::new(
        SessionIo {
            source: &client,
            deleter: &client,
            answers: &mut answers,
            renderer: &renderer,
            browser: &SystemBrowser,
        },
        options,
        cancel,
    );
    let report = runner.run().await;

    // Exit directly: an abandoned stdin read may still be parked on the
    // reader thread and would otherwise hold the process open.
    std::process::exit(report.exit_code());
}
