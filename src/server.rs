//! Production delivery server for the built site.
//!
//! Serves a directory of pre-rendered files over HTTP. There is no routing
//! and no per-request rendering: every request goes through the same fixed
//! chain of stages, outermost first.
//!
//! ```text
//! request ──► SecurityHeaders ──► Compression ──► StaticFiles ──► disk
//! response ◄── (+ hardening headers) ◄── (gzip / br) ◄── file or 404
//! ```
//!
//! - **SecurityHeaders** sets [`SECURITY_HEADERS`] on every response,
//!   including 404s and errors, replacing any value an inner stage set.
//! - **Compression** negotiates gzip or brotli from `Accept-Encoding`.
//!   It adds `content-encoding`/`vary` and never touches the hardening headers.
//! - **StaticFiles** maps the path onto the output directory (with
//!   `index.html` for directories and content-type from the extension).
//!   Misses get the site's own `404.html` if it has one, otherwise a built-in
//!   page linking back to the site's home, always with status 404. A panic
//!   here becomes a 500 that still passes through the outer stages.
//!
//! The chain is data ([`MIDDLEWARE_CHAIN`]) and [`pipeline`] folds it into an
//! axum [`Router`] around a terminal service, so the order in the table above
//! is the order on the wire. [`router`] is that pipeline around the output
//! directory.
//!
//! ## Runtime
//!
//! One tokio runtime drives all connections. Nothing is shared mutably between
//! requests: the output directory, home link and preloaded 404 page are fixed
//! at startup. `ServeDir` reads files asynchronously, so a slow disk read does
//! not hold up other connections.

use axum::Router;
use axum::body::Body;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::map_response;
use axum::response::{Html, IntoResponse, Response};
use maud::{DOCTYPE, html};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::{Service, ServiceBuilder, ServiceExt};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Level;

/// Port used when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 8080;

/// Name of the custom not-found page a site build may provide.
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Hardening headers attached to every response.
pub const SECURITY_HEADERS: [(&str, &str); 11] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("referrer-policy", "no-referrer"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("x-xss-protection", "0"),
];

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("output directory not found: {}", .0.display())]
    MissingOutputDir(PathBuf),
    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One stage of the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SecurityHeaders,
    Compression,
    StaticFiles,
}

/// Pipeline order, outermost stage first. `StaticFiles` is the terminal stage.
pub const MIDDLEWARE_CHAIN: [Stage; 3] = [Stage::SecurityHeaders, Stage::Compression, Stage::StaticFiles];

/// The build output directory, checked and prepared for serving.
#[derive(Debug, Clone)]
pub struct StaticSite {
    root: PathBuf,
    home_href: Arc<str>,
    not_found_page: Option<Arc<str>>,
}

impl StaticSite {
    /// Check the directory exists and preload its `404.html`, if any.
    ///
    /// The built-in 404 page links home to `/`; see [`StaticSite::with_home`].
    pub fn open(root: &Path) -> Result<Self, ServeError> {
        if !root.is_dir() {
            return Err(ServeError::MissingOutputDir(root.to_path_buf()));
        }
        let not_found_path = root.join(NOT_FOUND_PAGE);
        let not_found_page = if not_found_path.is_file() {
            Some(Arc::from(std::fs::read_to_string(&not_found_path)?))
        } else {
            None
        };
        Ok(Self {
            root: root.to_path_buf(),
            home_href: Arc::from("/"),
            not_found_page,
        })
    }

    /// Point the built-in 404 page's home link at the site's path prefix.
    pub fn with_home(mut self, path_prefix: &str) -> Self {
        self.home_href = Arc::from(crate::image_url::with_prefix("/", path_prefix));
        self
    }

    pub fn home_href(&self) -> &str {
        &self.home_href
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_custom_not_found(&self) -> bool {
        self.not_found_page.is_some()
    }
}

/// Build the request pipeline for a site.
pub fn router(site: &StaticSite) -> Router {
    let page = site.not_found_page.clone();
    let home = site.home_href.clone();
    let not_found = (move || async move { not_found_response(page, &home) }).into_service();
    let files = ServeDir::new(&site.root)
        .append_index_html_on_directories(true)
        .not_found_service(not_found);
    pipeline(ServiceExt::<Request<Body>>::map_response(
        files,
        IntoResponse::into_response,
    ))
}

/// Fold [`MIDDLEWARE_CHAIN`] around `files`, the terminal stage.
///
/// `files` is wrapped in a panic guard: a panic while serving becomes a 500
/// response, and that response still gets compression and security headers.
pub fn pipeline<S>(files: S) -> Router
where
    S: Service<Request<Body>, Response = Response, Error = Infallible>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    // Innermost stage first: every stage wraps everything built before it.
    MIDDLEWARE_CHAIN
        .iter()
        .rev()
        .fold(Router::new(), |app, stage| match stage {
            Stage::StaticFiles => app.fallback_service(
                ServiceBuilder::new()
                    .layer(CatchPanicLayer::new())
                    .service(files.clone()),
            ),
            Stage::Compression => app.layer(CompressionLayer::new()),
            Stage::SecurityHeaders => app.layer(map_response(apply_security_headers)),
        })
}

async fn apply_security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

fn not_found_response(page: Option<Arc<str>>, home_href: &str) -> Response {
    let body = match page {
        Some(page) => page.to_string(),
        None => html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    title { "404 Not Found" }
                }
                body {
                    main {
                        h1 { "Not Found" }
                        p { "There is nothing at this address." }
                        a href=(home_href) { "Back to the home page" }
                    }
                }
            }
        }
        .into_string(),
    };
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Address the server listens on for `port`: all interfaces.
pub fn bind_addr(port: u16) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], port))
}

/// Bind `port` and serve `output_dir` until Ctrl-C / SIGTERM.
pub async fn start_server(output_dir: &Path, port: u16) -> Result<(), ServeError> {
    let site = StaticSite::open(output_dir)?;
    bind_and_serve(&site, port).await
}

/// Bind `port` and serve an opened site until Ctrl-C / SIGTERM.
///
/// A port that is already taken is fatal: the error is returned right away
/// and nothing is retried.
pub async fn bind_and_serve(site: &StaticSite, port: u16) -> Result<(), ServeError> {
    let addr = bind_addr(port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    serve(listener, site).await
}

/// Serve a site on an already-bound listener.
pub async fn serve(listener: TcpListener, site: &StaticSite) -> Result<(), ServeError> {
    let addr = listener.local_addr()?;
    let app = router(site).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        },
    ));

    tracing::info!(
        addr = %addr,
        root = %site.root().display(),
        home = site.home_href(),
        custom_404 = site.has_custom_not_found(),
        "serving static site"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
