//! Tracing setup.
//!
//! `RUST_LOG` picks the filter. `TXCHECK_LOG` names a file to append to,
//! `TXCHECK_LOG_FORMAT=json` switches to one JSON object per event and
//! `TXCHECK_LOG_STREAM=stdout` moves console logs off stderr.

use std::fs::OpenOptions;
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

const LOG_FILE_ENV: &str = "TXCHECK_LOG";
const LOG_FORMAT_ENV: &str = "TXCHECK_LOG_FORMAT";
const LOG_STREAM_ENV: &str = "TXCHECK_LOG_STREAM";

/// Flushes buffered file logs when dropped. Hold it until `main` returns.
#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LogDestination {
    Stderr,
    Stdout,
    File(PathBuf),
}

#[derive(Debug, PartialEq, Eq)]
struct LogSettings {
    format: LogFormat,
    destination: LogDestination,
}

impl LogSettings {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A file wins over the stream setting. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let setting = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let format = match setting(LOG_FORMAT_ENV) {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        let destination = match (setting(LOG_FILE_ENV), setting(LOG_STREAM_ENV)) {
            (Some(path), _) => LogDestination::File(PathBuf::from(path)),
            (None, Some(stream)) if stream.eq_ignore_ascii_case("stdout") => LogDestination::Stdout,
            _ => LogDestination::Stderr,
        };

        Self {
            format,
            destination,
        }
    }
}

struct Sink {
    writer: BoxMakeWriter,
    guard: Option<WorkerGuard>,
    ansi: bool,
}

impl Sink {
    fn console<W>(make_writer: W, ansi: bool) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            writer: BoxMakeWriter::new(make_writer),
            guard: None,
            ansi,
        }
    }

    fn stderr() -> Self {
        Self::console(io::stderr, io::stderr().is_terminal())
    }
}

impl LogDestination {
    fn open(&self) -> io::Result<Sink> {
        match self {
            LogDestination::Stderr => Ok(Sink::stderr()),
            LogDestination::Stdout => Ok(Sink::console(io::stdout, io::stdout().is_terminal())),
            LogDestination::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let (writer, guard) = tracing_appender::non_blocking(file);
                Ok(Sink {
                    writer: BoxMakeWriter::new(writer),
                    guard: Some(guard),
                    ansi: false,
                })
            }
        }
    }
}

/// Installs the global subscriber. `default_level` applies when `RUST_LOG`
/// is unset or invalid.
///
/// A log file that cannot be opened falls back to stderr with a warning.
/// Calling this twice leaves the first subscriber in place.
pub fn init_tracing(default_level: &str) -> TelemetryGuard {
    let settings = LogSettings::from_env();
    let (sink, open_error) = match settings.destination.open() {
        Ok(sink) => (sink, None),
        Err(err) => (Sink::stderr(), Some(err)),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let events = fmt::layer().with_target(false).with_writer(sink.writer);
    let events: Box<dyn Layer<Registry> + Send + Sync> = match settings.format {
        LogFormat::Json => events.json().with_ansi(false).boxed(),
        LogFormat::Text => events.with_ansi(sink.ansi).boxed(),
    };

    if tracing_subscriber::registry()
        .with(events)
        .with(filter)
        .try_init()
        .is_err()
    {
        return TelemetryGuard { _guard: None };
    }

    if let (Some(err), LogDestination::File(path)) = (open_error, &settings.destination) {
        warn!(path = %path.display(), error = %err, "Cannot open log file, logging to stderr");
    }
    TelemetryGuard {
        _guard: sink.guard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        LogSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_text_on_stderr() {
        assert_eq!(
            settings(&[]),
            LogSettings {
                format: LogFormat::Text,
                destination: LogDestination::Stderr,
            }
        );
    }

    #[test]
    fn test_format_is_case_insensitive() {
        assert_eq!(settings(&[(LOG_FORMAT_ENV, " JSON ")]).format, LogFormat::Json);
        assert_eq!(settings(&[(LOG_FORMAT_ENV, "yaml")]).format, LogFormat::Text);
    }

    #[test]
    fn test_stdout_stream() {
        assert_eq!(
            settings(&[(LOG_STREAM_ENV, "stdout")]).destination,
            LogDestination::Stdout
        );
    }

    #[test]
    fn test_file_overrides_stream() {
        let settings = settings(&[
            (LOG_FILE_ENV, "/tmp/txcheck.log"),
            (LOG_STREAM_ENV, "stdout"),
        ]);
        assert_eq!(
            settings.destination,
            LogDestination::File(PathBuf::from("/tmp/txcheck.log"))
        );
    }

    #[test]
    fn test_blank_file_is_ignored() {
        assert_eq!(
            settings(&[(LOG_FILE_ENV, "   ")]).destination,
            LogDestination::Stderr
        );
    }

    #[test]
    fn test_open_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("txcheck.log");
        let sink = LogDestination::File(path.clone()).open().unwrap();
        assert!(sink.guard.is_some());
        assert!(!sink.ansi);
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("txcheck.log");
        assert!(LogDestination::File(path).open().is_err());
    }
}
