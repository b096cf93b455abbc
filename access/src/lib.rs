//! Route-access control for the Drink Master client.
//!
//! This crate owns the decision of whether a navigation renders its view or
//! redirects, and when that decision is re-evaluated relative to the
//! asynchronous identity check. It has no UI-framework dependency so the
//! `client` crate and native tests share the same rules.
//!
//! ARCHITECTURE
//! ============
//! - [`session`]: three-state session store with observers and a stale-fetch guard.
//! - [`routes`]: declared route patterns, classes and redirect targets.
//! - [`guard`]: the pure `decide` function.
//! - [`memory`]: remembered path used to restore location after reload.
//! - [`controller`]: glue that resolves a concrete path against all of the above.

pub mod controller;
pub mod guard;
pub mod memory;
pub mod routes;
pub mod session;

pub use controller::AccessController;
pub use guard::{Decision, decide};
pub use memory::NavigationMemory;
pub use routes::{RouteClass, RouteDef, RouteMatch, RouteTable};
pub use session::{Identity, IdentityError, IdentitySource, ObserverId, SessionSnapshot, SessionStatus, SessionStore};
