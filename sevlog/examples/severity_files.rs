use std::path::PathBuf;

use sevlog::{WrapResult, file_for_saving, logger_config, shared};

fn read_settings(path: &std::path::Path) -> Result<String, sevlog::WrappedError> {
    std::fs::read_to_string(path).wrap_stack()
}

fn main() {
    let dir = PathBuf::from("/tmp/sevlog_example_severity_files");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    // info and warning share one file, errors get their own
    let main_log = shared(file_for_saving(dir.join("main.log")));
    let error_log = shared(file_for_saving(dir.join("error.log")));
    let _guard = logger_config()
        .with_info(main_log.clone())
        .with_warning(main_log)
        .with_error(error_log.clone())
        .with_fatal(error_log)
        .init_global();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            std::thread::spawn(move || {
                sevlog::infof!("worker {i} started");
                if i % 2 == 1 {
                    sevlog::warning!("worker ", i, " is running late");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    if let Err(err) = read_settings(&dir.join("missing.toml")) {
        sevlog::errorf!("cannot load settings: {err}");
        println!("wrapped at:\n{}", err.stack_trace());
    }

    drop(_guard);

    for name in ["main.log", "error.log"] {
        println!("--- {name} ---");
        print!("{}", std::fs::read_to_string(dir.join(name)).unwrap());
    }
}
