//! Process-wide logging setup shared by the server binary and tests.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Install the default subscriber (JSON, `info`, `RUST_LOG` override).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    crate::tracing::init(LogFormat::Json);
}

/// Like [`init`] with an explicit output format.
pub fn init_with(format: LogFormat) {
    crate::tracing::init(format);
}

/// Human-readable output routed through the test harness' capture.
pub fn init_for_tests() {
    crate::tracing::init_test_writer();
}
