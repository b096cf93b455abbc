//! Route guard: the per-navigation render/redirect decision.
//!
//! `decide` is total over its inputs and holds no state, so the caller can
//! re-run it on every navigation and every session change.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::{RouteClass, RouteDef, ROOT, is_root};
use crate::session::SessionStatus;

/// Outcome of evaluating one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Show the view for this path.
    Render(String),
    /// Navigate to this path instead.
    Redirect(String),
    /// Session not resolved yet; show a neutral state and re-evaluate later.
    Defer,
}

impl Decision {
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }

    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(path) => Some(path),
            _ => None,
        }
    }
}

/// Decide what to do with a navigation to `path`, which resolved to `route`.
///
/// `remembered` overrides the logged-in fallback of public routes when it is
/// set and not root.
#[must_use]
pub fn decide(path: &str, route: &RouteDef, status: SessionStatus, remembered: Option<&str>) -> Decision {
    match (status, route.class()) {
        (SessionStatus::Unknown, _) => Decision::Defer,
        (SessionStatus::Anonymous, RouteClass::Private) => Decision::Redirect(route.redirect_to().to_owned()),
        (SessionStatus::Authenticated, RouteClass::Public) => {
            let target = match remembered {
                Some(p) if !is_root(p) => p,
                _ => route.redirect_to(),
            };
            Decision::Redirect(if target.is_empty() { ROOT.to_owned() } else { target.to_owned() })
        }
        _ => Decision::Render(path.to_owned()),
    }
}
