//! # Testing module
//!
//! Helpers shared by the test suites: random data generators shaped like
//! real items, and a capture sink for the warnings the codecs emit
//! through the `log` crate.

use std::sync::{Mutex,OnceLock};
use log::{LevelFilter,Log,Metadata,Record};
use rand::Rng;
use crate::features::Features;
use crate::times::{Times,TimesFormat};
use crate::properties::Properties;
use crate::item::Item;

/// A fresh temporary directory and the path of an h5 file inside it.
/// The file lives as long as the returned directory guard.
pub fn temp_h5() -> (tempfile::TempDir,String) {
    let dir = tempfile::TempDir::new().expect("temporary directory");
    let path = dir.path().join("test.h5").to_str().expect("utf8 path").to_string();
    (dir,path)
}

/// Route codec warnings to stderr in tests that do not capture them.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A random vector with values in [0, 1)
pub fn generate_vector(size: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(0.0..1.0)).collect()
}

/// The vector `[start, start+1, ...)` up to `stop`
pub fn generate_range(start: f64,stop: f64) -> Vec<f64> {
    let count = (stop - start) as usize;
    (0..count).map(|i| start + i as f64).collect()
}

pub fn generate_features(size: usize,dim: usize) -> Features {
    Features::new(generate_vector(size * dim),dim,true).expect("generated features are valid")
}

pub fn generate_times(size: usize,format: TimesFormat) -> Times {
    match format {
        TimesFormat::Simple =>
            Times::new(generate_range(0.0,size as f64),format,true).expect("generated times are valid"),
        TimesFormat::Interval =>
            Times::from_start_stop(
                generate_range(0.0,size as f64),
                generate_range(0.5,size as f64 + 0.5),
                true).expect("generated times are valid")
    }
}

pub fn generate_item(name: &str,size: usize,dim: usize,with_properties: bool,format: TimesFormat) -> Item {
    let mut props = Properties::new();
    if with_properties {
        props.set("int",1).expect("valid name");
        props.set("string","string").expect("valid name");
        props.set("vector",generate_vector(10)).expect("valid name");
    }
    Item::new(name,generate_features(size,dim),generate_times(size,format),props,true)
        .expect("generated item is valid")
}

struct CaptureLogger {
    records: Mutex<Vec<String>>,
    gate: Mutex<()>
}

impl Log for CaptureLogger {
    fn enabled(&self,_metadata: &Metadata) -> bool {
        true
    }
    fn log(&self,record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(format!("{}",record.args()));
        }
    }
    fn flush(&self) {}
}

static CAPTURE: OnceLock<CaptureLogger> = OnceLock::new();

/// Run `f` while collecting log records; returns the captured messages.
///
/// The first call installs the collecting logger process-wide, so tests
/// relying on capture must not install another logger.  Captures are
/// serialized against each other.
pub fn capture_warnings<F: FnOnce()>(f: F) -> Vec<String> {
    let logger = CAPTURE.get_or_init(|| CaptureLogger {
        records: Mutex::new(Vec::new()),
        gate: Mutex::new(())
    });
    let _ = log::set_logger(logger);
    log::set_max_level(LevelFilter::Warn);
    let _gate = logger.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Ok(mut records) = logger.records.lock() {
        records.clear();
    }
    f();
    match logger.records.lock() {
        Ok(records) => records.clone(),
        Err(_) => Vec::new()
    }
}
