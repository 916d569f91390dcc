//! File-based logging.
//!
//! The console belongs to the menu and the now-playing lines, so tracing
//! output goes to a daily-rolling file instead.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "orbiter";

/// Initialize the logging system.
///
/// Logs are written to `<dir>/orbiter.YYYY-MM-DD.log`. `RUST_LOG` wins over
/// the configured level. The returned guard flushes pending lines on drop and
/// must outlive every log call.
pub fn init_logging(
    settings: &LoggingSettings,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    if !settings.enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(&settings.dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&settings.dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %settings.dir.display(), "logging initialized");
    Ok(Some(guard))
}
