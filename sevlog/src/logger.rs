use std::{
    fmt,
    io::Write,
    panic::Location,
    sync::{Mutex, MutexGuard, PoisonError},
};

use sevlog_core::{Severity, SharedSink, format_line, lock_sink, report_failure, same_sink};

struct LoggerState {
    /// Destination per severity, indexed by [`Severity::index`].
    routes: [SharedSink; 4],
    /// Distinct sinks in registration order.
    closers: Vec<SharedSink>,
    diagnostics: SharedSink,
}

/// A leveled logger writing each severity to its own sink.
///
/// One lock covers every severity and the close sequence, so lines never
/// interleave and their order across sinks follows lock acquisition.
pub struct Logger {
    state: Mutex<LoggerState>,
    utc: bool,
}

impl Logger {
    pub(crate) fn from_parts(routes: [SharedSink; 4], diagnostics: SharedSink, utc: bool) -> Self {
        let mut closers: Vec<SharedSink> = Vec::with_capacity(routes.len());
        for sink in &routes {
            if !closers.iter().any(|known| same_sink(known, sink)) {
                closers.push(sink.clone());
            }
        }
        Self {
            state: Mutex::new(LoggerState {
                routes,
                closers,
                diagnostics,
            }),
            utc,
        }
    }

    /// Builds a logger from one sink per severity, reporting failures on stderr.
    /// Pass clones of the same handle to route several severities to one sink.
    pub fn new(
        info: SharedSink,
        warning: SharedSink,
        error: SharedSink,
        fatal: SharedSink,
    ) -> Self {
        crate::logger_config()
            .with_info(info)
            .with_warning(warning)
            .with_error(error)
            .with_fatal(fatal)
            .build()
    }

    fn state(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes one line attributed to `file:line`. Used by the `log` facade,
    /// which carries its own call site.
    pub fn write_at(&self, severity: Severity, file: &str, line: u32, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        let state = self.state();
        let formatted = format_line(severity, file, line, &message, self.utc);
        let sink = &state.routes[severity.index()];
        let result = {
            let mut sink = lock_sink(sink);
            sink.write_all(formatted.as_bytes())
                .and_then(|()| sink.flush())
                .map_err(|err| (sink.describe(), err))
        };
        if let Err((target, err)) = result {
            let target = format!("log {target}");
            report_failure(&mut *lock_sink(&state.diagnostics), "write", &target, &err);
        }
    }

    #[track_caller]
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let caller = Location::caller();
        self.write_at(severity, caller.file(), caller.line(), args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    /// Logs at fatal severity, closes every sink and exits with status 1.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(Severity::Fatal, args);
        self.close();
        std::process::exit(1)
    }

    /// Closes every registered sink in registration order. Failures are
    /// reported on the diagnostic sink and do not stop the remaining closes.
    pub fn close(&self) {
        let state = self.state();
        for sink in &state.closers {
            let result = {
                let mut sink = lock_sink(sink);
                sink.close().map_err(|err| (sink.describe(), err))
            };
            if let Err((target, err)) = result {
                let target = format!("log {target}");
                report_failure(&mut *lock_sink(&state.diagnostics), "close", &target, &err);
            }
        }
    }
}
