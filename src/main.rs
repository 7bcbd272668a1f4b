//! `skew-heap`: runs one command session over stdin/stdout
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`),
//! so stdout carries nothing but the transcript.

use rust_skew_heap::config::{Options, SessionConfig};
use rust_skew_heap::session;
use std::io;
use std::process::ExitCode;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig::from(Options::from_args());
    tracing::debug!(?config, "starting session");

    match session::run(io::stdin().lock(), io::stdout().lock(), config) {
        Ok(heap) => {
            tracing::info!(len = heap.len(), "session finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "session aborted");
            eprintln!("skew-heap: {err}");
            ExitCode::from(1)
        }
    }
}
