//! Logging setup for the embedding shell.

use anyhow::Result;

/// Install the global tracing subscriber. Call once, before the session
/// starts. With `PERCH_DEBUG_LOG` set, everything at DEBUG and above is
/// appended to that file; otherwise warnings go to stderr.
pub fn init_logging() -> Result<()> {
    if let Ok(log_path) = std::env::var("PERCH_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    Ok(())
}
