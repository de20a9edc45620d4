//! End-to-end tests for the delivery server's middleware chain.
//!
//! Requests are driven straight into the router with `oneshot`; only the
//! bind tests open real sockets.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use folio::server::{
    NOT_FOUND_PAGE, SECURITY_HEADERS, ServeError, StaticSite, bind_addr, pipeline, router,
    start_server,
};
use http_body_util::BodyExt;
use std::convert::Infallible;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

/// A small build output: an index page big enough to be worth compressing,
/// a stylesheet, and a nested page.
fn site_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let paragraph = "<p>Stargazing notes, written slowly and read quickly.</p>\n";
    fs::write(
        tmp.path().join("index.html"),
        format!("<!DOCTYPE html><html><body>{}</body></html>", paragraph.repeat(50)),
    )
    .unwrap();
    fs::write(tmp.path().join("styles.css"), "body { margin: 0; }\n").unwrap();
    fs::create_dir_all(tmp.path().join("pages/about")).unwrap();
    fs::write(
        tmp.path().join("pages/about/index.html"),
        "<!DOCTYPE html><html><body>About</body></html>",
    )
    .unwrap();
    tmp
}

async fn get(site: &StaticSite, uri: &str, accept_encoding: Option<&str>) -> axum::response::Response {
    let mut req = Request::builder().uri(uri);
    if let Some(encoding) = accept_encoding {
        req = req.header(header::ACCEPT_ENCODING, encoding);
    }
    router(site)
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn assert_security_headers(response: &axum::response::Response) {
    for (name, value) in SECURITY_HEADERS {
        assert_eq!(
            response.headers().get(name).map(|v| v.to_str().unwrap()),
            Some(value),
            "header {name}"
        );
    }
}

// =========================================================================
// Static files
// =========================================================================

#[tokio::test]
async fn serves_index_for_root() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    assert!(body_text(response).await.contains("Stargazing notes"));
}

#[tokio::test]
async fn infers_content_type_from_extension() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/styles.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn serves_nested_directory_index() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/pages/about/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("About"));
}

// =========================================================================
// Not found
// =========================================================================

#[tokio::test]
async fn unknown_path_is_404_with_security_headers() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_security_headers(&response);
    assert!(body_text(response).await.contains("Not Found"));
}

#[tokio::test]
async fn custom_404_page_is_used() {
    let tmp = site_fixture();
    fs::write(tmp.path().join(NOT_FOUND_PAGE), "<h1>Lost in space</h1>").unwrap();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/missing.html", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "<h1>Lost in space</h1>");
}

#[tokio::test]
async fn builtin_404_links_home_under_path_prefix() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap().with_home("/blog");

    let response = get(&site, "/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains(r#"href="/blog/""#));
}

#[tokio::test]
async fn traversal_outside_root_is_not_served() {
    let outer = TempDir::new().unwrap();
    fs::write(outer.path().join("secret.txt"), "top secret").unwrap();
    let public = outer.path().join("public");
    fs::create_dir_all(&public).unwrap();
    fs::write(public.join("index.html"), "home").unwrap();
    let site = StaticSite::open(&public).unwrap();

    let response = get(&site, "/../secret.txt", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!body_text(response).await.contains("top secret"));
}

// =========================================================================
// Chain order, observed from responses
// =========================================================================

#[tokio::test]
async fn every_response_carries_security_headers() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    for uri in ["/", "/styles.css", "/pages/about/", "/nope"] {
        let response = get(&site, uri, None).await;
        assert_security_headers(&response);
    }
}

#[tokio::test]
async fn compression_negotiated_and_headers_kept() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/", Some("gzip")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
    assert_security_headers(&response);

    let compressed = response.into_body().collect().await.unwrap().to_bytes();
    let original = fs::read(tmp.path().join("index.html")).unwrap();
    assert!(compressed.len() < original.len());
}

#[tokio::test]
async fn brotli_negotiated() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/", Some("br")).await;
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    assert_security_headers(&response);
}

#[tokio::test]
async fn no_compression_without_accept_encoding() {
    let tmp = site_fixture();
    let site = StaticSite::open(tmp.path()).unwrap();

    let response = get(&site, "/", None).await;
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
}

async fn failing_file_stage(_req: Request<Body>) -> Result<Response, Infallible> {
    panic!("disk went away mid-read");
}

#[tokio::test]
async fn panic_in_file_stage_is_500_with_security_headers() {
    let app = pipeline(tower::service_fn(failing_file_stage));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_security_headers(&response);

    // The router keeps answering after a panic.
    let again = app
        .oneshot(Request::builder().uri("/again").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =========================================================================
// Startup failures
// =========================================================================

#[tokio::test]
async fn missing_output_dir_fails_before_binding() {
    let tmp = TempDir::new().unwrap();
    let err = start_server(&tmp.path().join("public"), 0).await.unwrap_err();
    assert!(matches!(err, ServeError::MissingOutputDir(_)));
}

#[tokio::test]
async fn occupied_port_is_a_bind_error() {
    let tmp = site_fixture();
    let taken = std::net::TcpListener::bind(bind_addr(0)).unwrap();
    let port = taken.local_addr().unwrap().port();

    let err = start_server(tmp.path(), port).await.unwrap_err();
    match err {
        ServeError::Bind { addr, .. } => assert_eq!(addr.port(), port),
        other => panic!("expected bind error, got {other:?}"),
    }
}
