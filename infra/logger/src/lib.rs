//! # Logger
//!
//! Subscriber setup for the `fgate` binary.
//!
//! Events always go to **stderr**: stdout belongs to the command (tables,
//! `--json` reports) and must stay parseable at any log level. A log
//! directory adds a daily-rotated file sink next to stderr, as plain text or
//! JSON lines.
//!
//! Library crates only emit `tracing` events; nothing but a binary should
//! depend on this crate.
//!
//! ```rust
//! use fgate_logger::{LevelFilter, Logger};
//!
//! let logger = Logger::builder().level(LevelFilter::INFO).ansi(false).install().unwrap();
//! assert!(!logger.writes_files());
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Days of rotated files kept in a log directory.
const RETAINED_FILES: usize = 7;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Stderr is the only sink.
#[derive(Debug)]
pub struct Stderr;

/// Stderr plus rolling files in `dir`, named `<prefix>.<date>.log`.
#[derive(Debug)]
pub struct Files {
    dir: PathBuf,
    prefix: String,
    json: bool,
}

mod sealed {
    pub trait Sink {}
}
impl sealed::Sink for Stderr {}
impl sealed::Sink for Files {}

/// Where events are written besides stderr.
pub trait Sink: sealed::Sink {
    #[doc(hidden)]
    fn file_layer(self) -> Result<Option<(BoxedLayer, WorkerGuard)>, LoggerError>;
}

impl Sink for Stderr {
    fn file_layer(self) -> Result<Option<(BoxedLayer, WorkerGuard)>, LoggerError> {
        Ok(None)
    }
}

impl Sink for Files {
    fn file_layer(self) -> Result<Option<(BoxedLayer, WorkerGuard)>, LoggerError> {
        if self.prefix.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "log file prefix cannot be empty".into(),
                context: None,
            });
        }

        fs::create_dir_all(&self.dir).context(self.dir.display().to_string())?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&self.prefix)
            .filename_suffix("log")
            .max_log_files(RETAINED_FILES)
            .build(&self.dir)
            .context(self.dir.display().to_string())?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        let layer: BoxedLayer = if self.json { layer.json().boxed() } else { layer.boxed() };
        Ok(Some((layer, guard)))
    }
}

/// Collects the subscriber settings; [`LoggerBuilder::install`] applies them once per process.
#[derive(Debug)]
pub struct LoggerBuilder<S: Sink = Stderr> {
    level: LevelFilter,
    filter: Option<String>,
    ansi: bool,
    sink: S,
}

impl<S: Sink> LoggerBuilder<S> {
    /// Default verbosity for targets not named by a filter.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Directives such as `fgate_resolver=trace`, used instead of `RUST_LOG`.
    #[must_use]
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    /// Colors on stderr. Files never get escape codes.
    #[must_use]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until exit; dropping it stops the
    /// background file writer.
    ///
    /// # Errors
    /// - [`LoggerError::InvalidConfiguration`] for unparsable filter directives
    ///   or an empty file prefix. Nothing is installed in that case.
    /// - [`LoggerError::LogDirectory`] / [`LoggerError::Appender`] when the
    ///   log directory cannot be used.
    /// - [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn install(self) -> Result<Logger, LoggerError> {
        let filter = env_filter(self.level, self.filter.as_deref())?;

        let stderr = fmt::layer().compact().with_writer(std::io::stderr).with_ansi(self.ansi).boxed();
        let mut layers: Vec<BoxedLayer> = vec![stderr];

        let guard = match self.sink.file_layer()? {
            Some((layer, guard)) => {
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;
        Ok(Logger { guard })
    }
}

impl LoggerBuilder<Stderr> {
    /// Also writes events to daily files `<prefix>.<date>.log` under `dir`.
    #[must_use]
    pub fn files(self, dir: impl Into<PathBuf>, prefix: impl Into<String>) -> LoggerBuilder<Files> {
        LoggerBuilder {
            level: self.level,
            filter: self.filter,
            ansi: self.ansi,
            sink: Files { dir: dir.into(), prefix: prefix.into(), json: false },
        }
    }
}

impl LoggerBuilder<Files> {
    /// Writes file events as JSON lines; stderr stays human-readable.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.sink.json = enabled;
        self
    }
}

/// Installed subscriber. Owns the file writer's guard, if any.
#[must_use = "dropping the logger stops the file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts from `warn` on stderr with colors, honouring `RUST_LOG`.
    #[must_use]
    pub const fn builder() -> LoggerBuilder {
        LoggerBuilder { level: LevelFilter::WARN, filter: None, ansi: true, sink: Stderr }
    }

    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

fn env_filter(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    let Some(directives) = directives else {
        return Ok(builder.from_env_lossy());
    };
    builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("invalid filter '{directives}': {e}").into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_warn_on_stderr() {
        let builder = Logger::builder();
        assert_eq!(builder.level, LevelFilter::WARN);
        assert!(builder.ansi);
        assert!(builder.filter.is_none());
    }

    #[test]
    fn test_files_keep_console_settings() {
        let builder = Logger::builder().level(LevelFilter::DEBUG).ansi(false).files("logs", "fgate").json(true);

        assert_eq!(builder.level, LevelFilter::DEBUG);
        assert!(!builder.ansi);
        assert_eq!(builder.sink.dir, PathBuf::from("logs"));
        assert_eq!(builder.sink.prefix, "fgate");
        assert!(builder.sink.json);
    }

    #[test]
    fn test_filter_directives_are_parsed() {
        assert!(env_filter(LevelFilter::WARN, Some("fgate_resolver=debug,fgate=info")).is_ok());

        let err = env_filter(LevelFilter::WARN, Some("fgate=loud")).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("invalid filter 'fgate=loud'"));
    }

    #[test]
    fn test_invalid_settings_install_nothing() {
        let err = Logger::builder().filter("fgate=loud").install().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let dir = tempfile::tempdir().unwrap();
        let err = Logger::builder().files(dir.path().join("logs"), "  ").install().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(!dir.path().join("logs").exists());
    }

    #[test]
    fn test_unusable_log_directory_is_reported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Logger::builder().files(file.path().join("logs"), "fgate").install().unwrap_err();

        assert!(matches!(err, LoggerError::LogDirectory { .. }), "unexpected error: {err}");
        assert!(err.to_string().starts_with("Log directory error ("));
    }
}
