//! tracing subscriber setup.
//!
//! Filter priority: `FANCYCLOCK_LOG` (full directive syntax), then
//! `--log-level`, then `[log] level` from the config file.

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FANCYCLOCK_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    /// No subscriber; used by the full-screen clock without a log file
    Disabled,
}

pub fn build_filter(level: &str) -> Result<EnvFilter> {
    let directive = match std::env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => level.to_string(),
    };
    EnvFilter::try_new(&directive).with_context(|| format!("invalid log filter '{}'", directive))
}

pub fn init(level: &str, sink: LogSink<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level)?)
        .with_target(false);

    let installed = match sink {
        LogSink::Disabled => return Ok(()),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| anyhow!("failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_levels() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(build_filter(level).is_ok(), "{level}");
        }
    }

    #[test]
    fn test_disabled_sink_installs_nothing() {
        assert!(init("info", LogSink::Disabled).is_ok());
    }
}
