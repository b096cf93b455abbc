//! Declared routes and path resolution.
//!
//! A route pattern is a `/`-separated list of static segments and `:name`
//! parameters. Resolution ranks candidates by specificity so `/welcome`
//! beats `/:token`; equal ranks fall back to declaration order.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Root path of the application.
pub const ROOT: &str = "/";

/// Static access class of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    /// Only while signed out (welcome, sign-in, sign-up, verification).
    Public,
    /// Only while signed in.
    Private,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// One declared route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pattern: String,
    segments: Vec<Segment>,
    class: RouteClass,
    redirect_to: String,
}

impl RouteDef {
    /// Declare a route. `redirect_to` is where the guard sends a user whose
    /// session does not fit `class`.
    #[must_use]
    pub fn new(pattern: &str, class: RouteClass, redirect_to: &str) -> Self {
        Self {
            pattern: normalize_path(pattern),
            segments: parse_segments(pattern),
            class,
            redirect_to: redirect_to.to_owned(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn class(&self) -> RouteClass {
        self.class
    }

    #[must_use]
    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    /// Match `parts` against this pattern, returning captured params and a
    /// specificity score (2 per static segment, 1 per param).
    fn matches(&self, parts: &[&str]) -> Option<(BTreeMap<String, String>, usize)> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        let mut score = 0;
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s == part => score += 2,
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*part).to_owned());
                    score += 1;
                }
            }
        }
        Some((params, score))
    }
}

/// A concrete path resolved against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub route: RouteDef,
    pub params: BTreeMap<String, String>,
    /// True when nothing matched and `route` is the not-found fallback.
    pub not_found: bool,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered route declarations plus the fallback used for unmatched paths.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Arc<Vec<RouteDef>>,
    not_found: Arc<RouteDef>,
}

impl RouteTable {
    /// Empty table whose unmatched paths resolve to `not_found`.
    #[must_use]
    pub fn new(not_found: RouteDef) -> Self {
        Self { routes: Arc::new(Vec::new()), not_found: Arc::new(not_found) }
    }

    /// Builder-style declaration.
    #[must_use]
    pub fn route(mut self, pattern: &str, class: RouteClass, redirect_to: &str) -> Self {
        Arc::make_mut(&mut self.routes).push(RouteDef::new(pattern, class, redirect_to));
        self
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    #[must_use]
    pub fn not_found(&self) -> &RouteDef {
        &self.not_found
    }

    /// Resolve a browser path (query and fragment ignored).
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let path = normalize_path(path);
        let parts = split_path(&path);

        let mut best: Option<(&RouteDef, BTreeMap<String, String>, usize)> = None;
        for route in self.routes.iter() {
            let Some((params, score)) = route.matches(&parts) else {
                continue;
            };
            if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
                best = Some((route, params, score));
            }
        }

        match best {
            Some((route, params, _)) => RouteMatch { path, route: route.clone(), params, not_found: false },
            None => RouteMatch { path, route: (*self.not_found).clone(), params: BTreeMap::new(), not_found: true },
        }
    }
}

/// Strip query/fragment, collapse duplicate and trailing slashes.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let parts = split_path(&path[..end]);
    if parts.is_empty() {
        return ROOT.to_owned();
    }
    format!("/{}", parts.join("/"))
}

/// True for `/` and anything that normalizes to it.
#[must_use]
pub fn is_root(path: &str) -> bool {
    normalize_path(path) == ROOT
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|p| !p.is_empty()).collect()
}

fn parse_segments(pattern: &str) -> Vec<Segment> {
    split_path(pattern)
        .into_iter()
        .map(|p| match p.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_owned()),
            None => Segment::Static(p.to_owned()),
        })
        .collect()
}
