//! `HttpTransport` against a local stub server.

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use chessmate_client::ClientConfig;
use chessmate_client::net::transport::{HttpTransport, Transport};
use chessmate_client::net::types::{HttpRequest, TransportError};

fn app() -> Router {
    Router::new()
        .route("/login", get(|| async { "login page" }))
        .route("/puzzle/move", post(|| async { Redirect::to("/login") }))
        .route("/placement/selectPiece", post(echo))
        .route("/puzzle", get(|| async { "<div class=\"main-container\"></div>" }))
        .route("/session", get(|| async { ([(header::SET_COOKIE, "SESSION=abc; Path=/")], "ok").into_response() }))
        .route("/whoami", get(whoami))
        .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
}

async fn echo(headers: HeaderMap, body: String) -> String {
    let token = headers.get("x-csrf-token").and_then(|v| v.to_str().ok()).unwrap_or("-");
    format!("{token}|{body}")
}

async fn whoami(headers: HeaderMap) -> String {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_owned()
}

async fn serve() -> HttpTransport {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    let config = ClientConfig::default().with_base_url(&format!("http://{addr}")).unwrap();
    HttpTransport::new(&config).unwrap()
}

#[tokio::test]
async fn plain_get_is_not_redirected() {
    let transport = serve().await;
    let response = transport.send(&HttpRequest::get("/puzzle")).await.unwrap();
    assert!(response.is_success());
    assert!(!response.redirected);
    assert!(response.body.contains("main-container"));
}

#[tokio::test]
async fn redirect_to_login_is_detected() {
    let transport = serve().await;
    let request = HttpRequest::post("/puzzle/move").with_field("departX", "1");
    let response = transport.send(&request).await.unwrap();
    assert!(response.redirected);
    assert!(response.final_url.ends_with("/login"));
    assert!(response.redirected_to_login("/login"));
    assert_eq!(response.body, "login page");
}

#[tokio::test]
async fn csrf_token_goes_in_header_and_form() {
    let transport = serve().await;
    let request = HttpRequest::post("/placement/selectPiece")
        .with_field("type", "Dame")
        .with_csrf(Some("tok".into()));
    let response = transport.send(&request).await.unwrap();
    let (header, body) = response.body.split_once('|').unwrap();
    assert_eq!(header, "tok");
    assert!(body.contains("type=Dame"));
    assert!(body.contains("_csrf=tok"));
}

#[tokio::test]
async fn missing_token_still_sends() {
    let transport = serve().await;
    let request = HttpRequest::post("/placement/selectPiece").with_field("type", "Tour");
    let response = transport.send(&request).await.unwrap();
    assert_eq!(response.body, "-|type=Tour");
}

#[tokio::test]
async fn session_cookie_is_kept() {
    let transport = serve().await;
    transport.send(&HttpRequest::get("/session")).await.unwrap();
    let response = transport.send(&HttpRequest::get("/whoami")).await.unwrap();
    assert!(response.body.contains("SESSION=abc"));
}

#[tokio::test]
async fn error_status_is_returned_not_raised() {
    let transport = serve().await;
    let response = transport.send(&HttpRequest::post("/broken")).await.unwrap();
    assert_eq!(response.status, 500);
    assert!(!response.is_success());
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = ClientConfig::default().with_base_url(&format!("http://{addr}")).unwrap();
    let transport = HttpTransport::new(&config).unwrap();
    let err = transport.send(&HttpRequest::get("/puzzle")).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}
