//! Reference designator allocation.
//!
//! A requested designator ending in `?` is a template: the `?` is replaced
//! by the next number for that prefix, so `"LED?"` yields `LED1`, `LED2`, ...
//! Each prefix counts on its own, starting at 1, and numbers are never
//! handed out twice. Any other designator is used as written and does not
//! advance a counter.

use std::collections::HashMap;

/// Placeholder character marking a designator template
pub const WILDCARD: char = '?';

#[derive(Debug, Clone, Default)]
pub struct DesignatorAllocator {
    counters: HashMap<String, u32>,
}

impl DesignatorAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Final designator for a requested one
    pub fn resolve(&mut self, requested: &str) -> String {
        match requested.strip_suffix(WILDCARD) {
            Some(prefix) => {
                let counter = self.counters.entry(prefix.to_string()).or_insert(0);
                *counter += 1;
                format!("{prefix}{counter}")
            }
            None => requested.to_string(),
        }
    }

    /// What `resolve` would return for `requested`, without advancing any
    /// counter
    pub fn peek(&self, requested: &str) -> String {
        match requested.strip_suffix(WILDCARD) {
            Some(prefix) => format!("{prefix}{}", self.peek_next(prefix)),
            None => requested.to_string(),
        }
    }

    /// Designator for a footprint placed without one
    pub fn anonymous(&mut self, prefix: &str) -> String {
        self.resolve(&format!("{prefix}{WILDCARD}"))
    }

    /// Number the next template with this prefix would receive
    pub fn peek_next(&self, prefix: &str) -> u32 {
        self.counters.get(prefix).copied().unwrap_or(0) + 1
    }
}
