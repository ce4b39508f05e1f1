use std::{fmt::Display, io::Write};

use colored::Colorize;

use crate::{config::SEVLOG_CONFIG, sink::Sink};

/// Writes `Failed to <action> <target>: <err>` to the diagnostic sink.
///
/// The diagnostic sink is the last resort, so a failure to write the report is
/// dropped.
pub fn report_failure(diagnostics: &mut dyn Sink, action: &str, target: &str, err: &dyn Display) {
    let head = format!("Failed to {action}");
    let head = if diagnostics.is_terminal() && SEVLOG_CONFIG.DIAGNOSTIC_COLOR {
        head.red().bold().to_string()
    } else {
        head
    };
    let report = format!("{head} {target}: {err}\n");
    if diagnostics.write_all(report.as_bytes()).is_ok() {
        diagnostics.flush().ok();
    }
}
