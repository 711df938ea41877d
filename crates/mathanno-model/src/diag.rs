//! Diagnostics reporting.
//!
//! Non-fatal conditions (an incompatible version tag, an occurrence that
//! cannot be resolved against the document index, a skipped file in a
//! migration batch) are reported through an injected sink instead of a
//! process-wide logger. Fatal conditions use [`crate::DataError`].

use std::cell::RefCell;

pub trait Diagnostics {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Swallows all warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn warn(&self, _message: &str) {}
}

/// Collects warnings for later inspection; used in tests.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    warnings: RefCell<Vec<String>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
