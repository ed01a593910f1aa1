//! Logging setup.
//!
//! Two sinks share one subscriber: human-readable events on stderr,
//! filtered by `--quiet`/`--verbose`, and structured JSONL events in a log
//! file, filtered by `RUST_LOG` or the configured log level. The file sink
//! is best-effort; when no log location is writable only stderr is used.

use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Explicit log file path.
pub const LOG_PATH_ENV: &str = "APPEAL_LINT_LOG_PATH";

/// Log directory (daily rotated files).
pub const LOG_DIR_ENV: &str = "APPEAL_LINT_LOG_DIR";

const LOG_FILE_PREFIX: &str = "appeal-lint";

/// Where JSONL logs go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Single file to append to. Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily rotated files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve log locations from the environment, then the config file's
    /// `log_dir`, then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let default_dir = appeal_lint_core::config::user_data_dir()
            .map(|dir| dir.join("logs").into_std_path_buf());
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            default_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        default_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path,
            log_dir: env_dir.or(config_dir).or(default_dir),
        }
    }
}

/// Keeps the background log writer alive. Dropping it flushes the file.
#[must_use = "logs are lost if the guard is dropped early"]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Filter for the JSONL file sink.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` selects errors only, each
/// `-v` raises verbosity one step, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Level for the stderr sink: warnings by default.
pub const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    file_filter: EnvFilter,
    stderr: LevelFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let (file_layer, guard) = match open_log_writer(config) {
        Some((writer, guard)) => (
            Some(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_filter(file_filter),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_filter(stderr);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: guard })
}

fn open_log_writer(config: &ObservabilityConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if let Some(ref path) = config.log_path {
        return open_log_file(path).map(tracing_appender::non_blocking);
    }
    let dir = config.log_dir.as_ref()?;
    fs::create_dir_all(dir).ok()?;
    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("jsonl")
        .build(dir)
        .ok()?;
    Some(tracing_appender::non_blocking(appender))
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
