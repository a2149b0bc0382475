//! Request/response shapes of [`ConfluenceClient`] against a mock server.
//!
//! The client is blocking, so every call runs on `spawn_blocking` while the
//! mock server lives on the async runtime.

use std::time::Duration;

use md2wiki_core::{Label, PageId, SpaceKey};
use md2wiki_store::{
    Content, ContentQuery, ContentStore, ConfluenceClient, CreateContent, Credentials, StoreError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ConfluenceClient {
    ConfluenceClient::new(
        &format!("{}/wiki", server.uri()),
        Some(Credentials {
            username: "bot".into(),
            password: "token".into(),
        }),
        Duration::from_secs(5),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn search_sends_exact_query_with_expansions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content"))
        .and(query_param("title", "Deploy Guide"))
        .and(query_param("spaceKey", "DOC"))
        .and(query_param("type", "page"))
        .and(query_param("limit", "1"))
        .and(query_param("expand", "version,body.storage"))
        .and(header("Authorization", "Basic Ym90OnRva2Vu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "42",
                "type": "page",
                "title": "Deploy Guide",
                "version": {"number": 3},
                "_links": {"tinyui": "/x/Kg"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let results = tokio::task::spawn_blocking(move || {
        let query = ContentQuery::page("Deploy Guide", &SpaceKey::from("DOC"))
            .expand(&["version", "body.storage"]);
        client.search(&query)
    })
    .await
    .unwrap()
    .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "42");
    assert_eq!(results[0].version.number, 3);
    assert_eq!(results[0].links.tinyui, "/x/Kg");
}

#[tokio::test(flavor = "multi_thread")]
async fn search_with_no_hits_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let client = client(&server);
    let results = tokio::task::spawn_blocking(move || {
        client.search(&ContentQuery::page("Nope", &SpaceKey::from("DOC")))
    })
    .await
    .unwrap()
    .expect("search");
    assert!(results.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_posts_storage_body_and_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wiki/rest/api/content"))
        .and(body_partial_json(json!({
            "title": "guides",
            "type": "page",
            "space": {"key": "DOC"},
            "body": {"storage": {"value": "<p>x</p>", "representation": "storage"}},
            "ancestors": [{"id": "7"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "8",
            "type": "page",
            "title": "guides",
            "version": {"number": 1},
            "_links": {"tinyui": "/x/CA"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let created = tokio::task::spawn_blocking(move || {
        let request = CreateContent::page(
            "guides",
            &SpaceKey::from("DOC"),
            "<p>x</p>",
            Some(&PageId::from("7")),
        );
        client.create(&request)
    })
    .await
    .unwrap()
    .expect("create");

    assert_eq!(created.id, "8");
    assert_eq!(created.version.number, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_puts_to_page_id_with_labels() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/wiki/rest/api/content/8"))
        .and(body_partial_json(json!({
            "id": "8",
            "version": {"number": 2},
            "metadata": {"labels": [{"name": "migrated-from-hugo"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "8",
            "title": "guides",
            "version": {"number": 2},
            "_links": {"tinyui": "/x/CA"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let updated = tokio::task::spawn_blocking(move || {
        let mut page = Content {
            id: "8".into(),
            title: "guides".into(),
            ..Content::default()
        };
        page.version.number = 2;
        page.set_labels(vec![Label::new("migrated-from-hugo")]);
        client.update(&page)
    })
    .await
    .unwrap()
    .expect("update");

    assert_eq!(updated.version.number, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_conflict_is_distinguishable() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/wiki/rest/api/content/8"))
        .respond_with(ResponseTemplate::new(409).set_body_string("version mismatch"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = tokio::task::spawn_blocking(move || {
        let page = Content {
            id: "8".into(),
            ..Content::default()
        };
        client.update(&page)
    })
    .await
    .unwrap()
    .expect_err("409 must fail");

    assert!(err.is_conflict(), "got: {err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not permitted"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = tokio::task::spawn_blocking(move || {
        client.search(&ContentQuery::page("x", &SpaceKey::from("DOC")))
    })
    .await
    .unwrap()
    .expect_err("403 must fail");

    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "not permitted");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_endpoint_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = tokio::task::spawn_blocking(move || {
        let client = ConfluenceClient::new(&uri, None, Duration::from_secs(2));
        client.search(&ContentQuery::page("x", &SpaceKey::from("DOC")))
    })
    .await
    .unwrap()
    .expect_err("closed port must fail");

    assert!(matches!(err, StoreError::Transport(_)), "got: {err}");
}
