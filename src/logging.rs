use crate::models::LoggingSettings;
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the level filter: `RUST_LOG` wins, then `verbose`, then the settings level.
pub fn build_env_filter(settings: &LoggingSettings, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&settings.level)
    }
}

/// Setup logging to stderr, plus a daily-rotated log file when `settings.dir` is set.
///
/// # Arguments
/// * `settings` - Level, log directory and file prefix from the settings file
/// * `verbose` - If true, use debug level unless `RUST_LOG` is set
///
/// # Returns
/// A guard that must be held for the duration of the program to keep file logging
/// active, or `None` when file logging is off
pub fn setup_logging(settings: &LoggingSettings, verbose: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = build_env_filter(settings, verbose);

    let (file_sink, guard) = match settings.dir.as_deref() {
        Some(log_dir) => {
            let (writer, guard) = file_writer(log_dir, &settings.prefix)?;
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let file_layer = file_sink.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false) // No ANSI codes in log files
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // Ignore the error if a subscriber is already installed (tests)
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    if let Some(log_dir) = settings.dir.as_deref() {
        tracing::debug!(
            "Logging initialized: dir={}, prefix={}, level={}",
            log_dir,
            settings.prefix,
            settings.level
        );
    }

    Ok(guard)
}

/// Create `log_dir` if needed and open a non-blocking daily-rotated appender in it.
fn file_writer(log_dir: &str, prefix: &str) -> Result<(NonBlocking, WorkerGuard)> {
    let log_path = Utf8PathBuf::from(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(&log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }

    let file_appender = rolling::daily(log_dir, prefix);
    Ok(tracing_appender::non_blocking(file_appender))
}
