//! Out-of-range level requests reach the host as `log` warnings

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use skyhop::{generate_background, generate_level, sanitize_level};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn warnings_during(f: impl FnOnce()) -> Vec<String> {
    LOGGER.records.lock().unwrap().clear();
    f();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message.clone())
        .collect()
}

// One test function: the logger is process-global and tests run in parallel
#[test]
fn out_of_range_levels_warn_and_fall_back() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let warnings = warnings_during(|| assert_eq!(sanitize_level(3, 8), 3));
    assert!(warnings.is_empty());

    let warnings = warnings_during(|| assert_eq!(sanitize_level(0, 8), 1));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Level 0 outside 1..=8"));

    let warnings = warnings_during(|| assert_eq!(generate_level(42).level_number, 1));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Level 42"));

    let warnings = warnings_during(|| assert_eq!(generate_background(9).level_number, 1));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("falling back to level 1"));
}
