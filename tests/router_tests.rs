//! Route table behaviour: ordered matching, duplicate rejection, lazy loads.

use std::cell::Cell;
use std::rc::Rc;

use shortlink_ui::{RouteTable, RouterError, ViewLoadError};

#[derive(Debug, PartialEq, Eq)]
struct Page(&'static str);

fn table() -> RouteTable<Page> {
    let mut routes = RouteTable::new();
    routes
        .register("/", || async { Ok(Page("shorten")) })
        .expect("root registers");
    routes
}

#[test]
fn root_resolves_to_exactly_one_entry() {
    let routes = table();
    assert!(!routes.is_empty());
    assert_eq!(routes.len(), 1);
    let entry = routes.resolve("/").expect("root is registered");
    assert_eq!(entry.path(), "/");
    assert_eq!(
        routes.entries().iter().filter(|e| e.path() == "/").count(),
        1
    );
}

#[test]
fn unregistered_path_yields_no_matching_route() {
    let routes = table();
    assert_eq!(
        routes.resolve("/nonexistent").err(),
        Some(RouterError::NoMatchingRoute("/nonexistent".into()))
    );
}

#[test]
fn duplicate_path_is_rejected() {
    let mut routes = table();
    assert_eq!(
        routes.register("/", || async { Ok(Page("other")) }),
        Err(RouterError::DuplicatePath("/".into()))
    );

    routes
        .register("/stats", || async { Ok(Page("stats")) })
        .expect("new path registers");
    // Normalised duplicates collide too
    assert_eq!(
        routes.register("/stats/", || async { Ok(Page("stats")) }),
        Err(RouterError::DuplicatePath("/stats".into()))
    );
}

#[test]
fn registration_order_is_preserved() {
    let mut routes = table();
    routes
        .register("/stats", || async { Ok(Page("stats")) })
        .expect("stats registers");
    let paths: Vec<&str> = routes.entries().iter().map(|e| e.path()).collect();
    assert_eq!(paths, ["/", "/stats"]);
}

#[test]
fn normalised_variants_match_the_registered_path() {
    let mut routes = table();
    routes
        .register("/stats", || async { Ok(Page("stats")) })
        .expect("stats registers");

    assert_eq!(routes.resolve("/?utm=share").expect("matches").path(), "/");
    assert_eq!(
        routes.resolve("/stats/").expect("matches").path(),
        "/stats"
    );
    assert_eq!(
        routes.resolve("/stats#top").expect("matches").path(),
        "/stats"
    );
}

#[tokio::test]
async fn loader_runs_only_when_the_view_is_loaded() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);

    let mut routes = RouteTable::new();
    routes
        .register("/", move || {
            let calls = Rc::clone(&seen);
            async move {
                calls.set(calls.get() + 1);
                Ok(Page("shorten"))
            }
        })
        .expect("root registers");

    routes.resolve("/").expect("root is registered");
    assert_eq!(calls.get(), 0, "resolve must not invoke the loader");

    let page = routes.load("/").await.expect("view loads");
    assert_eq!(page, Page("shorten"));
    assert_eq!(calls.get(), 1);

    routes.load("/").await.expect("view loads again");
    assert_eq!(calls.get(), 2, "every load invokes the loader");
}

#[tokio::test]
async fn failed_load_surfaces_view_load_failure() {
    let mut routes: RouteTable<Page> = RouteTable::new();
    routes
        .register("/broken", || async {
            Err(ViewLoadError::new("chunk fetch failed"))
        })
        .expect("broken registers");

    assert_eq!(
        routes.load("/broken").await.err(),
        Some(RouterError::ViewLoadFailure {
            path: "/broken".into(),
            reason: "chunk fetch failed".into(),
        })
    );
}

#[tokio::test]
async fn not_found_loader_supplies_a_fallback_view() {
    let routes = table().with_not_found(|| async { Ok(Page("not-found")) });

    let page = routes.load("/missing").await.expect("fallback loads");
    assert_eq!(page, Page("not-found"));

    // resolve still reports the condition
    assert_eq!(
        routes.resolve("/missing").err(),
        Some(RouterError::NoMatchingRoute("/missing".into()))
    );
}

#[tokio::test]
async fn load_without_fallback_reports_no_matching_route() {
    let routes = table();
    assert_eq!(
        routes.load("/missing").await.err(),
        Some(RouterError::NoMatchingRoute("/missing".into()))
    );
}
