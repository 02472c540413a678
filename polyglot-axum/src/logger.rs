use std::path::PathBuf;

use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_FILE_PREFIX: &str = "polyglot.log";

/// Logging setup: console output and an optional daily rolling file.
///
/// `level` accepts a plain level (`info`) or filter directives
/// (`info,polyglot_core=debug`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    level: String,
    time_format: String,
    console: bool,
    file: bool,
    log_dir: PathBuf,
    file_prefix: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            console: true,
            file: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }

    /// Write to `<log_dir>/<file_prefix>.<date>` as well.
    pub fn enable_file(mut self, enable: bool) -> Self {
        self.file = enable;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes the file writer on drop and must be held
    /// for as long as logging is needed.
    pub fn init(self) -> anyhow::Result<Option<WorkerGuard>> {
        let (file_layer, guard) = self.build_file_layer();

        Registry::default()
            .with(self.build_console_layer())
            .with(file_layer)
            .try_init()?;

        Ok(guard)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn build_console_layer<S>(&self) -> Option<impl Layer<S> + use<S>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_writer(std::io::stdout)
                .with_filter(self.filter())
        })
    }

    fn build_file_layer<S>(&self) -> (Option<impl Layer<S> + use<S>>, Option<WorkerGuard>)
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if !self.file {
            return (None, None);
        }

        let file_appender = tracing_appender::rolling::daily(&self.log_dir, &self.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer()
            .with_timer(ChronoLocal::new(self.time_format.clone()))
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(self.filter());

        (Some(layer), Some(guard))
    }
}
