use std::sync::{Mutex, MutexGuard, PoisonError};

use regex::Regex;
use sevlog::{MemorySink, logger_config, shared};

/// Tests in this file share the global logger.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

fn init_memory() -> [MemorySink; 4] {
    let sinks: [MemorySink; 4] = Default::default();
    sevlog::init(
        shared(sinks[0].clone()),
        shared(sinks[1].clone()),
        shared(sinks[2].clone()),
        shared(sinks[3].clone()),
    );
    sinks
}

#[test]
fn macros_write_one_line_per_call() {
    let _serial = serial();
    let [info, warning, error, fatal] = init_memory();
    let jobs = 4;
    sevlog::info!("started ", jobs, " jobs");
    sevlog::warningf!("{}% of quota used", 91);
    sevlog::error!("lost connection");
    sevlog::errorf!("retrying in {}s", 5);
    assert_eq!(info.lines().len(), 1);
    assert!(info.lines()[0].ends_with(": started 4 jobs"));
    assert!(warning.lines()[0].ends_with(": 91% of quota used"));
    assert_eq!(error.lines().len(), 2);
    assert!(error.lines()[1].ends_with(": retrying in 5s"));
    assert!(fatal.contents().is_empty());
}

#[test]
fn infof_matches_line_format() {
    let _serial = serial();
    let [info, ..] = init_memory();
    sevlog::infof!("count={}", 3);
    let pattern =
        Regex::new(r"^INFO: \d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2} \S+:\d+: count=3$").unwrap();
    assert!(pattern.is_match(&info.lines()[0]), "{}", info.contents());
}

#[test]
fn macros_report_invocation_site() {
    let _serial = serial();
    let [info, ..] = init_memory();
    let expected = line!() + 1;
    sevlog::info!("where am i");
    let parsed = sevlog::parse_line(&info.lines()[0]).unwrap();
    assert_eq!(parsed.file, "global.rs");
    assert_eq!(parsed.line, expected);
}

#[test]
fn shared_sink_keeps_call_order() {
    let _serial = serial();
    let buffer = MemorySink::new();
    let sink = shared(buffer.clone());
    sevlog::init(sink.clone(), sink.clone(), sink.clone(), sink);
    sevlog::info!("a");
    sevlog::warning!("b");
    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("INFO: ") && lines[0].ends_with(": a"));
    assert!(lines[1].starts_with("WARNING: ") && lines[1].ends_with(": b"));
}

#[test]
fn last_init_wins() {
    let _serial = serial();
    let [first, ..] = init_memory();
    let [second, ..] = init_memory();
    sevlog::info!("to the second");
    assert!(first.contents().is_empty());
    assert_eq!(second.lines().len(), 1);
}

#[test]
fn guard_closes_on_drop() {
    let _serial = serial();
    let buffer = MemorySink::new();
    let guard = logger_config()
        .with_all(shared(buffer.clone()))
        .with_diagnostics(shared(MemorySink::new()))
        .init_global();
    sevlog::errorf!("job {} failed", 17);
    assert!(!buffer.is_closed());
    drop(guard);
    assert!(buffer.is_closed());
    assert!(buffer.contents().ends_with("job 17 failed\n"));
}

#[test]
fn close_closes_global_sinks() {
    let _serial = serial();
    let sinks = init_memory();
    sevlog::close();
    assert!(sinks.iter().all(MemorySink::is_closed));
}

#[test]
fn file_sink_appends_lines() {
    let _serial = serial();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    std::fs::write(&path, "previous run\n").unwrap();
    let file = shared(sevlog::file_for_saving(&path));
    sevlog::init(file.clone(), file.clone(), file.clone(), file);
    sevlog::warning!("disk ", 91, "%");
    sevlog::close();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "previous run");
    assert!(lines[1].starts_with("WARNING: "));
    assert!(lines[1].ends_with(": disk 91%"));
    assert_eq!(lines.len(), 2);
}
