//! Tracing bootstrap for the binary.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use core_types::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Shift a plain level name by `delta` steps. A directive list such as
/// `info,api=debug` is kept verbatim unless a shift is requested, in which
/// case it is treated as `info`.
pub fn effective_level(configured: &str, delta: i8) -> String {
    let configured = configured.trim();
    if delta == 0 {
        return configured.to_string();
    }
    let base = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(configured))
        .unwrap_or(2);
    let shifted = (base as i32 + i32::from(delta)).clamp(0, LEVELS.len() as i32 - 1);
    LEVELS[shifted as usize].to_string()
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// The returned guard must be held for as long as file logging should flush.
pub fn init_tracing_with_config(
    cfg: &LoggingConfig,
    verbosity: i8,
    force_json: bool,
) -> Result<Option<WorkerGuard>> {
    let level = effective_level(&cfg.level, verbosity);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&level)
            .with_context(|| format!("invalid log level `{level}`"))?,
    };

    let (writer, guard, ansi) = match cfg.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("log file `{file}` has no file name"))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (nb, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(nb), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    let json = force_json || cfg.json;
    let layer = if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_target(false)
            .with_ansi(ansi)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
