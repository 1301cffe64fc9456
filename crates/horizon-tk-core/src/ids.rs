//! Identifier generation for interpreter-side objects.

use std::sync::atomic::{AtomicU64, Ordering};

/// Generates `prefix` + counter identifiers.
///
/// Each session owns its own generators, so identifiers are unique per
/// interpreter rather than per process-global singleton. The counter is
/// atomic, so generation is safe from any thread.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator whose first id is `{prefix}1`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// The prefix shared by all generated ids.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produce the next identifier. Never repeats for the lifetime of the
    /// generator.
    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}
