//! Log setup for the bot and the one-shot subcommands.
//!
//! `faqbot start` runs for days, so it keeps a JSON file per day in a
//! `logs/` directory beside `config.toml` (`~/.faqbot/logs/` by default) on
//! top of human-readable stderr output. `chat`, `search` and `seed` share the
//! terminal with their own output and only log warnings to stderr unless
//! `RUST_LOG` asks for more.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "faqbot.log";

/// Keeps the background log writer of the bot alive.
///
/// Hold it in `main` until the dispatcher stops. Dropping it flushes the
/// remaining lines to the day's file.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Install logging for the long-running bot.
///
/// Every event goes to `{logs_dir}/faqbot.log.YYYY-MM-DD` as one JSON object
/// per line, and to stderr as plain text. Both share one `RUST_LOG` filter,
/// `info` by default, which covers bootstrap outcomes and delivery failures.
///
/// # Errors
///
/// Returns an error if `logs_dir` cannot be created or another subscriber
/// is already installed.
pub fn init_production(logs_dir: &Path) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir).map_err(|e| {
        anyhow::anyhow!(
            "failed to create logs directory {}: {e}",
            logs_dir.display()
        )
    })?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().with_writer(file_writer))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(LoggingGuard { _guard: guard })
}

/// Install stderr-only logging for `chat`, `search` and `seed`.
///
/// The default `warn` level keeps console conversations and search output
/// clean; a failed bootstrap still shows up. Calling it twice is harmless.
pub fn init_cli() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
