use super::*;

fn private() -> RouteDef {
    RouteDef::new("/add", RouteClass::Private, "/welcome")
}

fn public() -> RouteDef {
    RouteDef::new("/signin", RouteClass::Public, "/")
}

const ALL_STATUSES: [SessionStatus; 3] =
    [SessionStatus::Unknown, SessionStatus::Authenticated, SessionStatus::Anonymous];

// =============================================================
// Unknown status defers
// =============================================================

#[test]
fn unknown_status_never_redirects() {
    for route in [private(), public()] {
        for remembered in [None, Some("/my"), Some("/")] {
            let d = decide(route.pattern(), &route, SessionStatus::Unknown, remembered);
            assert_eq!(d, Decision::Defer);
            assert!(d.redirect_target().is_none());
        }
    }
}

// =============================================================
// Private routes
// =============================================================

#[test]
fn private_route_anonymous_redirects_to_logged_out_fallback() {
    let d = decide("/add", &private(), SessionStatus::Anonymous, Some("/my"));
    assert_eq!(d, Decision::Redirect("/welcome".to_owned()));
}

#[test]
fn private_route_authenticated_renders() {
    let d = decide("/add", &private(), SessionStatus::Authenticated, None);
    assert_eq!(d, Decision::Render("/add".to_owned()));
    assert!(d.is_render());
}

// =============================================================
// Public routes
// =============================================================

#[test]
fn public_route_anonymous_renders() {
    let d = decide("/signin", &public(), SessionStatus::Anonymous, None);
    assert_eq!(d, Decision::Render("/signin".to_owned()));
}

#[test]
fn public_route_authenticated_redirects_to_remembered() {
    let d = decide("/signin", &public(), SessionStatus::Authenticated, Some("/favorites"));
    assert_eq!(d.redirect_target(), Some("/favorites"));
}

#[test]
fn public_route_authenticated_without_memory_redirects_to_root() {
    let d = decide("/signin", &public(), SessionStatus::Authenticated, None);
    assert_eq!(d, Decision::Redirect("/".to_owned()));
}

#[test]
fn remembered_root_is_ignored() {
    let d = decide("/signin", &public(), SessionStatus::Authenticated, Some("/"));
    assert_eq!(d, Decision::Redirect("/".to_owned()));
}

// =============================================================
// Purity
// =============================================================

#[test]
fn identical_inputs_yield_identical_decisions() {
    for route in [private(), public()] {
        for status in ALL_STATUSES {
            let a = decide(route.pattern(), &route, status, Some("/my"));
            let b = decide(route.pattern(), &route, status, Some("/my"));
            assert_eq!(a, b);
        }
    }
}

#[test]
fn no_class_status_mismatch_renders() {
    for route in [private(), public()] {
        for status in ALL_STATUSES {
            let d = decide(route.pattern(), &route, status, None);
            if d.is_render() {
                match route.class() {
                    RouteClass::Private => assert_eq!(status, SessionStatus::Authenticated),
                    RouteClass::Public => assert_eq!(status, SessionStatus::Anonymous),
                }
            }
        }
    }
}
