//! View bindings of the built-in route table.

use story_console::config::{default_routes, AssetsConfig};
use story_console::routing::RouteTable;

fn table() -> RouteTable {
    RouteTable::from_config(&default_routes(), &AssetsConfig::default()).unwrap()
}

fn assert_binding(pattern: &str, template_url: &str, controller: &str) {
    let table = table();
    let entry = table
        .get(pattern)
        .unwrap_or_else(|| panic!("no route declared for {}", pattern));
    assert_eq!(table.template_url(entry), template_url);
    assert_eq!(entry.controller_id, controller);
}

#[test]
fn test_new_story_route() {
    assert_binding("/page/stories/new/", "/assets/html/story/story.tmpl.html", "storyCtrl");
}

#[test]
fn test_new_story_with_path_route() {
    assert_binding(
        "/page/stories/new/:path*",
        "/assets/html/story/story.tmpl.html",
        "storyCtrl",
    );
}

#[test]
fn test_view_story_route() {
    assert_binding(
        "/page/stories/view/:path*",
        "/assets/html/story/story.tmpl.html",
        "storyCtrl",
    );
}

#[test]
fn test_composites_route() {
    assert_binding(
        "/page/composites/:className*",
        "/assets/html/composites/composites.tmpl.html",
        "compositesCtrl",
    );
}

#[test]
fn test_runner_route() {
    assert_binding("/page/runner/", "/assets/html/runner/runner.tmpl.html", "runnerCtrl");
}

#[test]
fn test_lookup_of_concrete_paths() {
    let table = table();
    let cases = [
        ("/page/stories/new/", "story/story", "storyCtrl"),
        ("/page/stories/new/login/happy_path.story", "story/story", "storyCtrl"),
        ("/page/stories/view/login/happy_path.story", "story/story", "storyCtrl"),
        ("/page/composites/com.example.Login", "composites/composites", "compositesCtrl"),
        ("/page/runner/", "runner/runner", "runnerCtrl"),
    ];

    for (path, template, controller) in cases {
        let m = table
            .lookup(path)
            .unwrap_or_else(|| panic!("{} should match", path));
        assert_eq!(m.entry.template_id, template, "template for {}", path);
        assert_eq!(m.entry.controller_id, controller, "controller for {}", path);
    }
}

#[test]
fn test_exact_new_story_path_prefers_literal_route() {
    let m = table().lookup("/page/stories/new/").unwrap();
    assert_eq!(m.entry.path_pattern, "/page/stories/new/");
    assert!(m.params.is_empty());
}

#[test]
fn test_wildcard_params() {
    let table = table();

    let m = table.lookup("/page/stories/view/login/happy_path.story").unwrap();
    assert_eq!(m.entry.path_pattern, "/page/stories/view/:path*");
    assert_eq!(
        m.params.get("path").map(String::as_str),
        Some("login/happy_path.story")
    );

    let m = table.lookup("/page/composites/com.example.Login").unwrap();
    assert_eq!(
        m.params.get("className").map(String::as_str),
        Some("com.example.Login")
    );
}

#[test]
fn test_unmatched_paths() {
    let table = table();
    for path in [
        "/nonexistent/",
        "/",
        "",
        "/page/runner",
        "/page/stories/view/",
        "/page/composites/",
        "/Page/runner/",
    ] {
        assert!(table.lookup(path).is_none(), "{} should not match", path);
    }
}

#[test]
fn test_lookup_is_idempotent() {
    let table = table();
    for path in ["/page/runner/", "/page/composites/a.B", "/nonexistent/"] {
        assert_eq!(table.lookup(path), table.lookup(path));
    }
}

#[test]
fn test_entries_keep_declaration_order() {
    let patterns: Vec<_> = table()
        .entries()
        .iter()
        .map(|e| e.path_pattern.clone())
        .collect();
    assert_eq!(
        patterns,
        vec![
            "/page/stories/new/",
            "/page/stories/new/:path*",
            "/page/stories/view/:path*",
            "/page/composites/:className*",
            "/page/runner/",
        ]
    );
}
