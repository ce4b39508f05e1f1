//! # sevlog
//! Process-wide leveled logger: four severities (info, warning, error, fatal),
//! each routed to its own sink, plus error wrapping with a captured stack trace.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! sevlog = "0.1.0"
//! ```
//!
//! ```rust
//! use sevlog::{LogStderr, LogStdout, shared};
//!
//! let stdout = shared(LogStdout);
//! let stderr = shared(LogStderr);
//! sevlog::init(stdout.clone(), stdout, stderr.clone(), stderr);
//! sevlog::info!("Hello, ", "world!");
//! sevlog::warningf!("{} retries left", 3);
//! sevlog::close();
//! ```
//!
//! Every line has the shape
//! `INFO: 2024/03/09 07:05:01 main.rs:12: Hello, world!`.
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//!
//! ```rust
//! use sevlog::{file_for_saving, logger_config, shared};
//!
//! let path = std::env::temp_dir().join("sevlog_doc_app.log");
//! std::fs::remove_file(&path).ok();
//! let guard = logger_config()
//!     .with_all(shared(file_for_saving(&path)))
//!     .init_global();
//!
//! sevlog::errorf!("job {} failed", 17);
//! drop(guard); // closes the file
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with("job 17 failed\n"));
//! ```
//!
//! ## Explicit handles
//! A [`Logger`] can also be built and passed around without touching the global
//! instance, which keeps independent loggers apart in tests.
//!
//! ```rust
//! use sevlog::{MemorySink, logger_config, shared};
//!
//! let buffer = MemorySink::new();
//! let logger = logger_config().with_all(shared(buffer.clone())).build();
//! logger.info(format_args!("count={}", 3));
//! assert!(buffer.contents().starts_with("INFO: "));
//! ```
//!
//! ## Fatal
//! `fatal!`/`fatalf!` log at fatal severity, close every sink and exit with
//! status 1.
//!
//! ```rust,no_run
//! if std::env::args().count() > 8 {
//!     sevlog::fatalf!("too many arguments: {}", std::env::args().count());
//! }
//! ```

mod facade;
mod logger;
mod macros;
mod wrap;

pub use facade::install_log_facade;
pub use logger::Logger;
pub use sevlog_core::{
    LINE_PATTERN, LogFile, LogStderr, LogStdout, MemorySink, ParsedLine, Severity, SharedSink,
    Sink, file_for_saving, parse_line, shared,
};
pub use wrap::{WrapResult, WrappedError, wrap, wrap_error};

use sevlog_core::SEVLOG_CONFIG;
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Logger used by the free functions and macros. Replaced by every `init`.
static GLOBAL_LOGGER: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Guard returned by [`ConfigBuilder::init_global`]. Closes the sinks of the
/// logger it installed when dropped.
pub struct LoggerGuard {
    logger: Arc<Logger>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        self.logger.close();
    }
}

/// Builder for configuring and initializing the logger.
pub struct ConfigBuilder {
    routes: [Option<SharedSink>; 4],
    diagnostics: Option<SharedSink>,
    utc: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            routes: Default::default(),
            diagnostics: None,
            utc: SEVLOG_CONFIG.UTC,
        }
    }
}

impl ConfigBuilder {
    /// Routes one severity to `sink`.
    pub fn with_sink(mut self, severity: Severity, sink: SharedSink) -> Self {
        self.routes[severity.index()] = Some(sink);
        self
    }
    pub fn with_info(self, sink: SharedSink) -> Self {
        self.with_sink(Severity::Info, sink)
    }
    pub fn with_warning(self, sink: SharedSink) -> Self {
        self.with_sink(Severity::Warning, sink)
    }
    pub fn with_error(self, sink: SharedSink) -> Self {
        self.with_sink(Severity::Error, sink)
    }
    pub fn with_fatal(self, sink: SharedSink) -> Self {
        self.with_sink(Severity::Fatal, sink)
    }
    /// Routes every severity to the same sink.
    pub fn with_all(self, sink: SharedSink) -> Self {
        Severity::ALL
            .into_iter()
            .fold(self, |builder, severity| builder.with_sink(severity, sink.clone()))
    }
    /// Sets where close and write failures are reported. Defaults to stderr.
    pub fn with_diagnostics(self, sink: SharedSink) -> Self {
        Self {
            diagnostics: Some(sink),
            ..self
        }
    }
    /// Stamp lines in UTC. Defaults to `SEVLOG_UTC`.
    pub fn with_utc(self, yes: bool) -> Self {
        Self { utc: yes, ..self }
    }
    /// Builds a standalone logger. Info and warning default to stdout, error
    /// and fatal to stderr.
    pub fn build(self) -> Logger {
        let Self {
            routes: [info, warning, error, fatal],
            diagnostics,
            utc,
        } = self;
        let stdout = shared(LogStdout);
        let stderr = shared(LogStderr);
        let info = info.unwrap_or_else(|| stdout.clone());
        let warning = warning.unwrap_or(stdout);
        let error = error.unwrap_or_else(|| stderr.clone());
        let fatal = fatal.unwrap_or_else(|| stderr.clone());
        let diagnostics = diagnostics.unwrap_or(stderr);
        Logger::from_parts([info, warning, error, fatal], diagnostics, utc)
    }
    /// Installs the logger globally, replacing any previous one.
    /// Returns a guard that will close the sinks when dropped.
    #[must_use = "LoggerGuard closes the sinks when dropped. Do \"let _guard = logger_config().init_global();\""]
    pub fn init_global(self) -> LoggerGuard {
        LoggerGuard {
            logger: install(self.build()),
        }
    }
}

/// Returns a default ConfigBuilder for configuring the logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

/// Installs `logger` as the global logger, replacing any previous one.
pub fn install(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    *GLOBAL_LOGGER.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&logger));
    logger
}

/// Initializes the global logger with one sink per severity. Pass clones of the
/// same handle to share a sink; it is closed only once.
///
/// Meant to be called during single-threaded setup, before the first log call.
pub fn init(info: SharedSink, warning: SharedSink, error: SharedSink, fatal: SharedSink) {
    install(Logger::new(info, warning, error, fatal));
}

/// The global logger, if one was installed.
pub fn try_global() -> Option<Arc<Logger>> {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// The global logger.
///
/// # Panics
/// Panics if neither [`init`] nor [`ConfigBuilder::init_global`] was called.
pub fn global() -> Arc<Logger> {
    match try_global() {
        Some(logger) => logger,
        None => panic!("sevlog: logging before initialization, call sevlog::init first"),
    }
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    global().info(args);
}

#[track_caller]
pub fn warning(args: fmt::Arguments<'_>) {
    global().warning(args);
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) {
    global().error(args);
}

/// Logs through the global logger, closes its sinks and exits with status 1.
#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    global().fatal(args)
}

/// Closes every sink of the global logger. Does nothing before initialization.
pub fn close() {
    if let Some(logger) = try_global() {
        logger.close();
    }
}

#[doc(hidden)]
pub mod __private {
    use std::fmt::{Display, Write};

    /// Concatenates the operands of the non-formatting macros.
    pub fn concat(parts: &[&dyn Display]) -> String {
        let mut message = String::new();
        for part in parts {
            let _ = write!(message, "{part}");
        }
        message
    }
}
