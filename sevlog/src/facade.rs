use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use sevlog_core::Severity;

use crate::try_global;

/// Forwards `log` records to the global logger.
struct Facade;

impl Log for Facade {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        // Nothing to write to until a global logger is installed.
        let Some(logger) = try_global() else {
            return;
        };
        logger.write_at(
            Severity::from(record.level()),
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            *record.args(),
        );
    }

    fn flush(&self) {}
}

/// Routes `log::error!`, `log::warn!` and `log::info!` to the error, warning
/// and info sinks of the global logger. Debug and trace records are filtered
/// out. Fails if another `log` backend is already registered.
pub fn install_log_facade() -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Facade))?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}
