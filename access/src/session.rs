//! Session store: authentication status and the current identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the only writer of [`SessionStatus`]. The route guard reads it
//! synchronously; UI layers subscribe to be told when it changes.
//!
//! DESIGN
//! ======
//! Status is a three-state enum rather than a `loading` flag so "not yet
//! known" is a value the guard can match on. Every operation that supersedes
//! an in-flight fetch (`sign_in`, `sign_out`, `close`) bumps a generation
//! counter; a fetch that settles under an older generation is dropped.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Authentication status of the browser session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No determination yet; the identity check has not settled.
    #[default]
    Unknown,
    /// A valid identity is confirmed.
    Authenticated,
    /// No valid identity.
    Anonymous,
}

impl SessionStatus {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// The signed-in user as held by the store while authenticated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    /// Bearer token presented to the API.
    pub token: String,
}

/// Status and identity as observed at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub identity: Option<Identity>,
}

/// Failure of an identity check. All variants resolve the session to anonymous.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The credential was rejected (HTTP 401).
    #[error("credential rejected")]
    Unauthorized,
    /// The request could not be completed.
    #[error("identity request failed: {0}")]
    Transport(String),
    /// The server answered with an unexpected status.
    #[error("identity request returned status {0}")]
    Status(u16),
    /// The response body was not a valid identity.
    #[error("malformed identity payload: {0}")]
    Malformed(String),
}

/// Where the store gets the current identity from.
///
/// `Ok(None)` means the source knows there is no session (e.g. no stored
/// token) without it being an error.
#[async_trait::async_trait(?Send)]
pub trait IdentitySource {
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityError>;
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// Generation captured when a fetch starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

struct Inner {
    snapshot: SessionSnapshot,
    generation: u64,
    /// Bumped on every snapshot change; a notification round stops once a
    /// newer one has started.
    version: u64,
    closed: bool,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

/// Shared handle to the session state. Cloning shares the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SessionStore")
            .field("status", &inner.snapshot.status)
            .field("generation", &inner.generation)
            .field("closed", &inner.closed)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

impl SessionStore {
    /// New store in the `Unknown` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                snapshot: SessionSnapshot::default(),
                generation: 0,
                version: 0,
                closed: false,
                observers: Vec::new(),
                next_observer: 0,
            })),
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.inner.lock().snapshot.status
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.inner.lock().snapshot.identity.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot.clone()
    }

    /// Register an observer called with the new snapshot after every change.
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = ObserverId(inner.next_observer);
        inner.next_observer += 1;
        inner.observers.push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.inner.lock().observers.retain(|(oid, _)| *oid != id);
    }

    /// Run one identity check against `source` and apply its outcome.
    ///
    /// Returns the status after the attempt. If the store was closed or the
    /// fetch was superseded while awaiting, the outcome is discarded and the
    /// current status is returned unchanged.
    pub async fn fetch_current_identity<S>(&self, source: &S) -> SessionStatus
    where
        S: IdentitySource + ?Sized,
    {
        let ticket = self.begin_fetch();
        let outcome = source.current_identity().await;
        self.complete_fetch(ticket, outcome);
        self.status()
    }

    /// Capture the generation an identity fetch belongs to.
    #[must_use]
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket { generation: self.inner.lock().generation }
    }

    /// Apply the outcome of a fetch started with `ticket`.
    ///
    /// Returns `false` when the outcome was discarded as stale.
    pub fn complete_fetch(&self, ticket: FetchTicket, outcome: Result<Option<Identity>, IdentityError>) -> bool {
        let inner = self.inner.lock();
        if inner.closed || inner.generation != ticket.generation {
            log::debug!("session: discarding stale identity result");
            return false;
        }
        let next = match outcome {
            Ok(Some(identity)) => SessionSnapshot { status: SessionStatus::Authenticated, identity: Some(identity) },
            Ok(None) => SessionSnapshot { status: SessionStatus::Anonymous, identity: None },
            Err(e) => {
                log::warn!("session: identity check failed: {e}");
                SessionSnapshot { status: SessionStatus::Anonymous, identity: None }
            }
        };
        self.replace(inner, next);
        true
    }

    /// Mark the session authenticated with the identity returned by sign-in.
    pub fn sign_in(&self, identity: Identity) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.generation += 1;
        let next = SessionSnapshot { status: SessionStatus::Authenticated, identity: Some(identity) };
        self.replace(inner, next);
    }

    /// Drop the identity after an explicit sign-out. No-op when anonymous.
    pub fn sign_out(&self) {
        self.drop_identity("sign-out");
    }

    /// Drop the identity after the API rejected the credential.
    pub fn reject_credentials(&self) {
        self.drop_identity("credential rejected");
    }

    /// Tear the store down. Later fetch results and writes are ignored.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.generation += 1;
        inner.observers.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    fn drop_identity(&self, reason: &str) {
        let mut inner = self.inner.lock();
        if inner.closed || inner.snapshot.status == SessionStatus::Anonymous {
            return;
        }
        log::debug!("session: {reason}");
        inner.generation += 1;
        self.replace(inner, SessionSnapshot { status: SessionStatus::Anonymous, identity: None });
    }

    /// Swap in `next` and notify observers after releasing the lock.
    ///
    /// An observer may change the store from its callback. That nested change
    /// notifies everyone with the newer snapshot, so the rest of this round is
    /// skipped rather than delivering an outdated one afterwards.
    fn replace(&self, mut inner: parking_lot::MutexGuard<'_, Inner>, next: SessionSnapshot) {
        if inner.snapshot == next {
            return;
        }
        log::debug!("session: {:?} -> {:?}", inner.snapshot.status, next.status);
        inner.snapshot = next.clone();
        inner.version += 1;
        let version = inner.version;
        let observers: Vec<Observer> = inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
        drop(inner);
        for observer in observers {
            if self.inner.lock().version != version {
                log::debug!("session: notification superseded");
                break;
            }
            observer(&next);
        }
    }
}
