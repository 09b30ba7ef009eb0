#![allow(dead_code)]

pub mod fixtures;

use querywire::{QueryWire, QueryWireBuilder};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A facade over the shared registry with default options.
pub fn wire() -> QueryWire<'static> {
    init_logging();
    QueryWireBuilder::new().build()
}
