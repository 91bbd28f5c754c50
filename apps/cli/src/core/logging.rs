//! Run log plus opt-in stderr diagnostics.
//!
//! Every event goes to the append-only run log without ANSI codes. Stderr
//! only shows what `DEVSTRAP_LOG` lets through (default `error`) so that
//! spinners stay readable.

use anyhow::Result;
use devstrap::infrastructure::system::run_log;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_ENV: &str = "DEVSTRAP_LOG";

/// Installs the global subscriber and returns the log file in use.
pub fn init(log_file: Option<&Path>) -> Result<PathBuf> {
    let path = match log_file {
        Some(p) => p.to_path_buf(),
        None => run_log::default_log_path()?,
    };
    let file = run_log::open(&path)?;

    let stderr_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(EnvFilter::new("info")),
        )
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(stderr_filter),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "devstrap starting");
    Ok(path)
}
