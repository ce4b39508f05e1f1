//! # sevlog-core
//! Core utilities for sevlog - severities, line formatting, sinks and failure
//! reporting shared by the logger.

mod config;
mod diagnostics;
mod format;
mod severity;
mod sink;

pub use config::{SEVLOG_CONFIG, SevlogConfig};
pub use diagnostics::report_failure;
pub use format::{LINE_PATTERN, ParsedLine, TIMESTAMP_FORMAT, format_line, parse_line, short_file};
pub use severity::Severity;
pub use sink::{
    LogFile, LogStderr, LogStdout, MemorySink, SharedSink, Sink, file_for_saving, lock_sink,
    same_sink, shared,
};
