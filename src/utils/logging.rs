//! Diagnostic logging setup.
//!
//! The interactive UI owns the terminal, so it only logs when a file is
//! given. One-shot commands log to stderr. `RUST_LOG` overrides the default
//! filter in both cases.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Disabled,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// File when a path was given, otherwise `fallback`.
    pub fn file_or(path: Option<&Path>, fallback: LogTarget) -> Self {
        match path {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None => fallback,
        }
    }
}

fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber. Calling this twice keeps the first one.
pub fn init(target: &LogTarget, default_filter: &str) -> std::io::Result<()> {
    match target {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(filter(default_filter))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::registry()
                .with(filter(default_filter))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init();
        }
    }
    Ok(())
}
