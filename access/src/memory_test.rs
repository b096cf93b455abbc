use super::*;
use crate::routes::RouteDef;

fn table() -> RouteTable {
    RouteTable::new(RouteDef::new("*", RouteClass::Private, "/welcome"))
        .route("/signin", RouteClass::Public, "/")
        .route("/", RouteClass::Private, "/welcome")
        .route("/my", RouteClass::Private, "/welcome")
        .route("/favorites", RouteClass::Private, "/welcome")
}

#[test]
fn capture_initial_private_path() {
    let memory = NavigationMemory::new();
    memory.capture_initial("/my?tab=1", &table());
    assert_eq!(memory.remembered().as_deref(), Some("/my"));
}

#[test]
fn capture_initial_skips_root_public_and_unknown_paths() {
    let memory = NavigationMemory::new();
    for path in ["/", "/signin", "/nope/nope"] {
        memory.capture_initial(path, &table());
    }
    assert_eq!(memory.remembered(), None);
}

#[test]
fn capture_initial_keeps_earlier_memory_for_public_load() {
    let memory = NavigationMemory::new();
    memory.record(&table().resolve("/favorites"));
    memory.capture_initial("/signin", &table());
    assert_eq!(memory.remembered().as_deref(), Some("/favorites"));
}

#[test]
fn record_overwrites_with_latest_private_path() {
    let memory = NavigationMemory::new();
    let t = table();
    memory.record(&t.resolve("/my"));
    memory.record(&t.resolve("/favorites"));
    memory.record(&t.resolve("/"));
    assert_eq!(memory.remembered().as_deref(), Some("/favorites"));
}

#[test]
fn clones_share_the_same_slot() {
    let memory = NavigationMemory::new();
    let other = memory.clone();
    other.record(&table().resolve("/my"));
    assert_eq!(memory.remembered().as_deref(), Some("/my"));
    memory.clear();
    assert_eq!(other.remembered(), None);
}
