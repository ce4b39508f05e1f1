use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime, Utc};
use regex::Regex;

use crate::severity::Severity;

/// Date and clock time, in the order they appear on a line.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Regular expression matching one formatted line, without its trailing newline.
pub const LINE_PATTERN: &str =
    r"^(INFO|WARNING|ERROR|FATAL): (\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}) (\S+):(\d+): (.*)$";

static LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_PATTERN).expect("LINE_PATTERN is a valid regex"));

/// Strips the directories from a source path, keeping only the file name.
pub fn short_file(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}

fn timestamp(utc: bool) -> String {
    if utc {
        Utc::now().format(TIMESTAMP_FORMAT).to_string()
    } else {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Formats a complete line:
/// `<SEVERITY>: <YYYY/MM/DD> <HH:MM:SS> <file>:<line>: <message>\n`.
///
/// A message that already ends with a newline is not given a second one.
pub fn format_line(
    severity: Severity,
    file: &str,
    line: u32,
    message: &str,
    utc: bool,
) -> String {
    let prefix = severity.prefix();
    let time = timestamp(utc);
    let file = short_file(file);
    let mut formatted = format!("{prefix}{time} {file}:{line}: {message}");
    if !formatted.ends_with('\n') {
        formatted.push('\n');
    }
    formatted
}

/// A line read back from a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub severity: Severity,
    pub timestamp: NaiveDateTime,
    pub file: String,
    pub line: u32,
    pub message: String,
}

/// Parses a line produced by [`format_line`]. The trailing newline is optional.
///
/// Only the first line of a multi-line message can be recovered this way.
pub fn parse_line(text: &str) -> Option<ParsedLine> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let captures = LINE_REGEX.captures(text)?;
    let severity = Severity::from_name(&captures[1])?;
    let timestamp = NaiveDateTime::parse_from_str(&captures[2], TIMESTAMP_FORMAT).ok()?;
    let line = captures[4].parse().ok()?;
    Some(ParsedLine {
        severity,
        timestamp,
        file: captures[3].to_string(),
        line,
        message: captures[5].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_file() {
        assert_eq!(short_file("src/bin/main.rs"), "main.rs");
        assert_eq!(short_file(r"src\lib.rs"), "lib.rs");
        assert_eq!(short_file("lib.rs"), "lib.rs");
    }

    #[test]
    fn test_format_line_shape() {
        let line = format_line(Severity::Warning, "src/app/worker.rs", 42, "disk at 91%", false);
        let pattern = Regex::new(LINE_PATTERN).unwrap();
        assert!(line.ends_with("worker.rs:42: disk at 91%\n"));
        assert!(pattern.is_match(line.trim_end_matches('\n')), "{line:?}");
        assert!(line.starts_with("WARNING: "));
    }

    #[test]
    fn test_format_line_keeps_single_newline() {
        let line = format_line(Severity::Info, "main.rs", 1, "done\n", true);
        assert!(line.ends_with("main.rs:1: done\n"));
        assert!(!line.ends_with("\n\n"));
    }

    #[test]
    fn test_parse_line() {
        let parsed =
            parse_line("ERROR: 2024/03/09 07:05:01 db.rs:118: connection refused\n").unwrap();
        assert_eq!(parsed.severity, Severity::Error);
        assert_eq!(parsed.file, "db.rs");
        assert_eq!(parsed.line, 118);
        assert_eq!(parsed.message, "connection refused");
        assert_eq!(
            parsed.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "2024/03/09 07:05:01"
        );
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert!(parse_line("DEBUG: 2024/03/09 07:05:01 db.rs:118: nope").is_none());
        assert!(parse_line("INFO: 2024/13/45 07:05:01 db.rs:1: bad date").is_none());
        assert!(parse_line("INFO: half a line").is_none());
    }

    #[test]
    fn test_parse_formatted_line() {
        let line = format_line(Severity::Fatal, "/abs/path/main.rs", 7, "count=3", false);
        let parsed = parse_line(&line).unwrap();
        assert_eq!(parsed.severity, Severity::Fatal);
        assert_eq!(parsed.file, "main.rs");
        assert_eq!(parsed.line, 7);
        assert_eq!(parsed.message, "count=3");
    }
}
