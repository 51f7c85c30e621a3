//! Logging and tracing initialization.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// Honors `RUST_LOG` over the configured level, and sends output to
/// the configured log file when one is set (falling back to stderr if
/// the file cannot be opened).
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, to_file) = make_writer(config);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(!to_file)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

/// The output writer for the subscriber and whether it is a file.
fn make_writer(config: &LoggingConfig) -> (BoxMakeWriter, bool) {
    let Some(path) = &config.file else {
        return (BoxMakeWriter::new(std::io::stdout), false);
    };
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => (BoxMakeWriter::new(Arc::new(file)), true),
        Err(e) => {
            eprintln!("Failed to open log file {path:?}: {e}; logging to stderr");
            (BoxMakeWriter::new(std::io::stderr), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_log_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chromacast-{}-{}.log", name, std::process::id()))
    }

    #[test]
    fn test_file_writer_creates_log_file() {
        let path = temp_log_path("file-writer");
        let _ = std::fs::remove_file(&path);

        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        };
        init_logging(&config);

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_log_directory_falls_back() {
        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(PathBuf::from("/nonexistent-dir/chromacast.log")),
        };
        // Must not panic; the writer falls back to stderr.
        init_logging(&config);
    }
}
