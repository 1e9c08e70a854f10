//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&tracing::LogConfig::from_env());
}

/// Tracing configuration (filters, formats, writer).
pub mod tracing;

/// In-memory log capture for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod capture;

pub use self::tracing::{LogConfig, LogFormat};
