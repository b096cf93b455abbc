//! Navigation memory: where to send an authenticated user who lands on a
//! public page (typically after a reload).
//!
//! Only non-root paths of declared private routes are ever stored, so the
//! remembered path can never bounce back to a public route.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::routes::{RouteClass, RouteMatch, RouteTable, is_root};

/// Shared, in-memory remembered path. Not persisted across page loads.
#[derive(Clone, Debug, Default)]
pub struct NavigationMemory {
    path: Arc<Mutex<Option<String>>>,
}

impl NavigationMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the path the app was loaded with, before any redirect.
    pub fn capture_initial(&self, path: &str, table: &RouteTable) {
        let resolved = table.resolve(path);
        self.remember(&resolved);
    }

    /// Record a private route that was just rendered.
    pub fn record(&self, resolved: &RouteMatch) {
        self.remember(resolved);
    }

    #[must_use]
    pub fn remembered(&self) -> Option<String> {
        self.path.lock().clone()
    }

    pub fn clear(&self) {
        *self.path.lock() = None;
    }

    fn remember(&self, resolved: &RouteMatch) {
        if resolved.not_found || resolved.route.class() != RouteClass::Private || is_root(&resolved.path) {
            return;
        }
        *self.path.lock() = Some(resolved.path.clone());
    }
}
