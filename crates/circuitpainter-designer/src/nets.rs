//! Session net table.
//!
//! Maps net names to backend net handles. Names are exact and
//! case-sensitive, and a name keeps the same handle for the whole session.

use std::collections::HashMap;

use circuitpainter_core::Result;

use crate::backend::{BoardBackend, NetHandle};

#[derive(Debug, Clone, Default)]
pub struct NetRegistry {
    handles: HashMap<String, NetHandle>,
    order: Vec<String>,
}

impl NetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `name`, asking the backend to create the net on first use
    pub fn find_or_create<B: BoardBackend + ?Sized>(
        &mut self,
        name: &str,
        backend: &mut B,
    ) -> Result<NetHandle> {
        if let Some(handle) = self.handles.get(name) {
            return Ok(*handle);
        }

        let handle = backend.find_or_create_net(name)?;
        tracing::debug!("Registered net '{}' as {}", name, handle);
        self.handles.insert(name.to_string(), handle);
        self.order.push(name.to_string());
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<NetHandle> {
        self.handles.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Net names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
