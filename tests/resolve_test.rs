//! End-to-end resolution tests against an in-process HTTP server
//!
//! The mock server exposes:
//! - `/short`      HEAD/GET 301 -> relative `/landing`
//! - `/found`      HEAD/GET 302 -> absolute `/landing`
//! - `/head-blind` HEAD 200, GET 307 -> `/landing` (forces the GET fallback)
//! - `/bare`       301 -> `http://intranet/wiki` (host without a dot)
//! - `/agent`      302 -> `/agent/<user-agent>`
//! - `/landing`    200
//! - `/`           200

use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect},
    routing::get,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use browserselect::handlers::{FileTypeHandler, HandlerId, HandlerRegistries, ProtocolHandler};
use browserselect::unshorten::{Expander, HttpConfig, HttpExpander};
use browserselect::{Coordinator, ResolutionResult, ResolveOptions};

const WAIT: Duration = Duration::from_secs(10);

async fn start_mock_server() -> String {
    let app = Router::new()
        .route(
            "/short",
            get(|| async { (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/landing")]) }),
        )
        .route(
            "/found",
            get(|| async { (StatusCode::FOUND, [(header::LOCATION, "/landing?from=found")]) }),
        )
        .route(
            "/head-blind",
            get(|| async { Redirect::temporary("/landing") }).head(|| async { StatusCode::OK }),
        )
        .route(
            "/bare",
            get(|| async {
                (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "http://intranet/wiki")])
            }),
        )
        .route("/", get(|| async { "root" }))
        .route("/agent", get(agent_redirect))
        .route("/agent/{name}", get(|| async { "agent" }))
        .route("/landing", get(|| async { "landed" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

async fn agent_redirect(headers: HeaderMap) -> impl IntoResponse {
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    (StatusCode::FOUND, [(header::LOCATION, format!("/agent/{agent}"))])
}

fn registries() -> Arc<HandlerRegistries> {
    Arc::new(HandlerRegistries::new(
        vec![
            ProtocolHandler::new("http", ["firefox"]),
            ProtocolHandler::new("https", ["firefox", "chrome"]),
        ],
        vec![FileTypeHandler::new("pdf", ["acrobat"])],
    ))
}

fn unshorten_opts() -> ResolveOptions {
    ResolveOptions {
        unshorten: true,
        user_agent: "Test-Agent".to_string(),
        ..ResolveOptions::default()
    }
}

fn coordinator() -> Coordinator {
    Coordinator::with_http(HttpConfig {
        request_timeout: Duration::from_secs(5),
        max_redirects: 5,
    })
    .unwrap()
}

async fn expand(coordinator: &Coordinator, url: &str) -> ResolutionResult {
    let (immediate, pending) = coordinator.resolve_pending(url, &unshorten_opts(), registries());
    assert_eq!(immediate.final_string, url);
    assert!(!immediate.was_unshortened);

    timeout(WAIT, pending.expect("expansion should start").wait())
        .await
        .expect("expansion timed out")
        .expect("expansion superseded")
}

#[tokio::test]
async fn test_head_redirect_with_relative_location() {
    let base = start_mock_server().await;
    let result = expand(&coordinator(), &format!("{base}/short")).await;

    assert_eq!(result.final_string, format!("{base}/landing"));
    assert!(result.was_unshortened);
    assert_eq!(result.candidate_handler_ids, vec![HandlerId::from("firefox")]);
}

#[tokio::test]
async fn test_head_redirect_found() {
    let base = start_mock_server().await;
    let result = expand(&coordinator(), &format!("{base}/found")).await;

    assert_eq!(result.final_string, format!("{base}/landing?from=found"));
    assert!(result.was_unshortened);
}

#[tokio::test]
async fn test_get_fallback_follows_redirects() {
    let base = start_mock_server().await;
    let result = expand(&coordinator(), &format!("{base}/head-blind")).await;

    assert_eq!(result.final_string, format!("{base}/landing"));
    assert!(result.was_unshortened);
}

#[tokio::test]
async fn test_no_redirect_keeps_url() {
    let base = start_mock_server().await;
    let url = format!("{base}/landing");
    let result = expand(&coordinator(), &url).await;

    assert_eq!(result.final_string, url);
    assert!(!result.was_unshortened);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let base = start_mock_server().await;
    let expander = HttpExpander::new(HttpConfig::default()).unwrap();

    let resolved = expander.expand(&format!("{base}/agent"), "Test-Agent").await;
    assert_eq!(resolved, format!("{base}/agent/Test-Agent"));
}

#[tokio::test]
async fn test_unreachable_host_delivers_original() {
    let url = "http://127.0.0.1:1/xyz";
    let result = expand(&coordinator(), url).await;

    assert_eq!(result.final_string, url);
    assert!(!result.was_unshortened);
    assert_eq!(result.candidate_handler_ids, vec![HandlerId::from("firefox")]);
}

#[tokio::test]
async fn test_only_latest_request_is_delivered() {
    let base = start_mock_server().await;
    let coordinator = coordinator();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let first_tx = tx.clone();
    coordinator.resolve(&format!("{base}/short"), &unshorten_opts(), registries(), move |r| {
        first_tx.send(r).unwrap();
    });
    coordinator.resolve(&format!("{base}/found"), &unshorten_opts(), registries(), move |r| {
        tx.send(r).unwrap();
    });

    let delivered = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(delivered.final_string, format!("{base}/landing?from=found"));
    assert!(timeout(WAIT, rx.recv()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_bare_host_without_redirect_is_not_unshortened() {
    let base = start_mock_server().await;
    let coordinator = coordinator();

    let result = expand(&coordinator, &base).await;
    assert_eq!(result.final_string, base);
    assert!(!result.was_unshortened);

    let shouted = format!("{}/", base.replacen("http", "HTTP", 1));
    let result = expand(&coordinator, &shouted).await;
    assert_eq!(result.final_string, shouted);
    assert!(!result.was_unshortened);

    assert_eq!(coordinator.metrics().unshorten_expanded, 0);
}

#[tokio::test]
async fn test_expanded_result_is_canonicalized() {
    let base = start_mock_server().await;
    let opts = ResolveOptions {
        canonicalize: true,
        append_text: "com".to_string(),
        ..unshorten_opts()
    };

    let coordinator = coordinator();
    let (_, pending) = coordinator.resolve_pending(&format!("{base}/bare"), &opts, registries());

    let result = timeout(WAIT, pending.unwrap().wait()).await.unwrap().unwrap();
    assert_eq!(result.final_string, "http://intranet.com/wiki");
    assert!(result.was_unshortened);
    assert_eq!(result.candidate_handler_ids, vec![HandlerId::from("firefox")]);
}

#[tokio::test]
async fn test_expanded_qualified_host_is_left_alone() {
    let base = start_mock_server().await;
    let opts = ResolveOptions {
        canonicalize: true,
        append_text: "com".to_string(),
        ..unshorten_opts()
    };

    let coordinator = coordinator();
    let (immediate, pending) =
        coordinator.resolve_pending(&format!("{base}/short"), &opts, registries());
    assert_eq!(immediate.final_string, format!("{base}/short"));

    let result = timeout(WAIT, pending.unwrap().wait()).await.unwrap().unwrap();
    // dotted host is already qualified
    assert_eq!(result.final_string, format!("{base}/landing"));
}

#[tokio::test]
async fn test_non_web_input_never_expands() {
    let coordinator = coordinator();
    for raw in ["report.final.pdf", "ftp://files.example.org", "localhost"] {
        let (result, pending) = coordinator.resolve_pending(raw, &unshorten_opts(), registries());
        assert!(pending.is_none(), "{raw}");
        assert!(!result.was_unshortened);
    }
    assert_eq!(coordinator.metrics().unshorten_started, 0);
    assert_eq!(coordinator.metrics().resolutions, 3);
}
