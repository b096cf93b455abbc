//! Access controller: session store, route table and navigation memory
//! behind one handle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client's top-level navigation observer holds one controller. It calls
//! `resolve` whenever the location or the session status changes and
//! `commit` once a decision has been applied.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::guard::{Decision, decide};
use crate::memory::NavigationMemory;
use crate::routes::{RouteMatch, RouteTable};
use crate::session::{SessionStatus, SessionStore};

#[derive(Clone, Debug)]
pub struct AccessController {
    session: SessionStore,
    table: RouteTable,
    memory: NavigationMemory,
}

impl AccessController {
    #[must_use]
    pub fn new(session: SessionStore, table: RouteTable) -> Self {
        Self { session, table, memory: NavigationMemory::new() }
    }

    /// Use an existing memory (e.g. one already holding a path).
    #[must_use]
    pub fn with_memory(mut self, memory: NavigationMemory) -> Self {
        self.memory = memory;
        self
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn memory(&self) -> &NavigationMemory {
        &self.memory
    }

    /// Remember the load path. Call once, before the first decision is applied.
    pub fn capture_initial(&self, path: &str) {
        self.memory.capture_initial(path, &self.table);
    }

    /// Decision for `path` under an explicit status.
    #[must_use]
    pub fn resolve(&self, path: &str, status: SessionStatus) -> Decision {
        let resolved = self.table.resolve(path);
        let remembered = self.memory.remembered();
        decide(&resolved.path, &resolved.route, status, remembered.as_deref())
    }

    /// Decision for `path` under the store's current status.
    #[must_use]
    pub fn evaluate(&self, path: &str) -> Decision {
        self.resolve(path, self.session.status())
    }

    /// Record the outcome of an applied decision. Only renders of private
    /// routes while authenticated update the memory.
    pub fn commit(&self, decision: &Decision) -> Option<RouteMatch> {
        let Decision::Render(path) = decision else {
            return None;
        };
        let resolved = self.table.resolve(path);
        if self.session.status() == SessionStatus::Authenticated {
            self.memory.record(&resolved);
        }
        Some(resolved)
    }
}
