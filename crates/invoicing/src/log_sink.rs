//! Where "Updating ..." lines go.

use std::sync::{PoisonError, RwLock};

/// Write-only logging sink.
///
/// `info` returns `true` once the line is accepted, mirroring loggers whose
/// write call reports success. That return value is exactly what a careless
/// pipe-style injection ends up passing down the chain.
pub trait LogSink {
    fn info(&self, message: &str) -> bool;
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn info(&self, message: &str) -> bool {
        (**self).info(message)
    }
}

/// Sink backed by the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) -> bool {
        tracing::info!("{message}");
        true
    }
}

/// Test double that keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: RwLock<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogSink for RecordingSink {
    fn info(&self, message: &str) -> bool {
        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        true
    }
}
