//! Composite loading against a live mock upstream.

use serde_json::{json, Value};
use story_console::composites::{
    CompositeLoader, CompositeResource, FetchError, HttpCompositeSource, Origin,
};
use story_console::config::UpstreamConfig;

mod common;

fn loader_for(base_url: String) -> CompositeLoader<HttpCompositeSource> {
    let source = HttpCompositeSource::new(&UpstreamConfig {
        base_url,
        connect_timeout_secs: 1,
        request_timeout_secs: 2,
    })
    .unwrap();
    CompositeLoader::new(source)
}

fn synthesized(package: &str, class: &str) -> Value {
    json!({
        "package": package,
        "class": class,
        "composites": [{"stepText": "", "compositeSteps": [{}]}],
        "isNew": true
    })
}

#[tokio::test]
async fn test_success_passes_payload_through() {
    let payload = json!({
        "package": "com.example",
        "class": "Foo",
        "composites": [
            {"stepText": "Given a registered user", "compositeSteps": [{"stepText": "When they log in"}]}
        ],
        "lastEditedBy": "qa"
    });
    let body = payload.to_string();
    let (addr, seen) = common::start_programmable_backend(move |_path| {
        let body = body.clone();
        async move { (200, body) }
    })
    .await;

    let loader = loader_for(format!("http://{}", addr));
    let loaded = loader.fetch_traced("com.example.Foo").await;

    assert_eq!(loaded.origin, Origin::Remote);
    assert_eq!(serde_json::to_value(&loaded.resource).unwrap(), payload);

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/composites/com.example.Foo");
    assert_eq!(requests[0].header("cache-control"), Some("no-cache"));
    assert_eq!(requests[0].header("pragma"), Some("no-cache"));
}

#[tokio::test]
async fn test_not_found_synthesizes_new_resource() {
    let (addr, _) = common::start_programmable_backend(|_path| async {
        (404, r#"{"error":"missing"}"#.to_string())
    })
    .await;

    let loader = loader_for(format!("http://{}", addr));
    let loaded = loader.fetch_traced("com.example.Foo").await;

    assert_eq!(loaded.origin, Origin::Synthesized(FetchError::Status(404)));
    assert_eq!(
        serde_json::to_value(&loaded.resource).unwrap(),
        synthesized("com.example", "Foo")
    );
}

#[tokio::test]
async fn test_server_error_is_masked_too() {
    let (addr, _) = common::start_programmable_backend(|_path| async {
        (500, "boom".to_string())
    })
    .await;

    let loader = loader_for(format!("http://{}", addr));
    let loaded = loader.fetch_traced("com.example.Foo").await;

    assert_eq!(loaded.origin, Origin::Synthesized(FetchError::Status(500)));
    assert!(loaded.resource.is_new());
}

#[tokio::test]
async fn test_identifier_without_package() {
    let (addr, _) = common::start_programmable_backend(|_path| async {
        (404, String::new())
    })
    .await;

    let resource: CompositeResource = loader_for(format!("http://{}", addr)).fetch("Foo").await;
    assert_eq!(serde_json::to_value(&resource).unwrap(), synthesized("", "Foo"));
}

#[tokio::test]
async fn test_connection_refused_falls_back() {
    let addr = common::unused_addr().await;
    let loader = loader_for(format!("http://{}", addr));

    let loaded = loader.fetch_traced("org.acme.Checkout").await;
    assert!(matches!(loaded.origin, Origin::Synthesized(_)));
    assert_eq!(
        serde_json::to_value(&loaded.resource).unwrap(),
        synthesized("org.acme", "Checkout")
    );
}

#[tokio::test]
async fn test_invalid_body_falls_back() {
    let (addr, _) = common::start_programmable_backend(|_path| async {
        (200, "this is not json".to_string())
    })
    .await;

    let loaded = loader_for(format!("http://{}", addr))
        .fetch_traced("com.example.Foo")
        .await;
    assert!(matches!(loaded.origin, Origin::Synthesized(FetchError::Decode(_))));
}

#[tokio::test]
async fn test_list_composites() {
    let (addr, seen) = common::start_programmable_backend(|path| async move {
        if path == "/composites" {
            (200, r#"["com.example.Foo","com.example.Bar"]"#.to_string())
        } else {
            (404, String::new())
        }
    })
    .await;

    let loader = loader_for(format!("http://{}", addr));
    assert_eq!(
        loader.list_composites().await.unwrap(),
        json!(["com.example.Foo", "com.example.Bar"])
    );
    assert_eq!(seen.lock().unwrap()[0].header("cache-control"), Some("no-cache"));
}

#[tokio::test]
async fn test_list_composites_reports_failure() {
    let (addr, _) = common::start_programmable_backend(|_path| async {
        (503, String::new())
    })
    .await;

    let err = loader_for(format!("http://{}", addr))
        .list_composites()
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Status(503));
}

#[tokio::test]
async fn test_dot_identifiers_never_reach_the_list_endpoint() {
    let (addr, seen) = common::start_programmable_backend(|path| async move {
        if path == "/composites" {
            (200, r#"["com.example.Foo"]"#.to_string())
        } else {
            (404, String::new())
        }
    })
    .await;

    let loader = loader_for(format!("http://{}", addr));
    for id in ["..", "."] {
        let loaded = loader.fetch_traced(id).await;
        assert!(
            matches!(loaded.origin, Origin::Synthesized(FetchError::Url(_))),
            "{:?} should fail before any request",
            id
        );
        assert!(loaded.resource.is_new());
    }

    loader.fetch("a.B").await;
    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/composites/a.B");
}

#[tokio::test]
async fn test_slash_in_identifier_stays_one_segment() {
    let (addr, seen) = common::start_programmable_backend(|_path| async {
        (404, String::new())
    })
    .await;

    let resource = loader_for(format!("http://{}", addr))
        .fetch("com/example/Foo")
        .await;
    assert!(resource.is_new());

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/composites/com%2Fexample%2FFoo");
}
