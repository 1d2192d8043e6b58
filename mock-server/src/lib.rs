//! In-process HTTP server the client's integration tests talk to.
//!
//! Every route answers with fixed or echoed data so tests can check what the
//! client actually put on the wire.

use std::{collections::BTreeMap, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const GREETING: &str = "Hello, reqit!";

/// How long `/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EchoReply {
    pub result: String,
}

/// What `/raw` saw in the request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawEcho {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/get", get(greeting_json))
        .route("/text", get(greeting_text))
        .route("/echo", post(echo))
        .route("/headers", get(echo_headers).post(echo_headers))
        .route("/query", get(echo_query).post(echo_query))
        .route("/raw", get(raw).post(raw).put(raw).patch(raw).delete(raw))
        .route("/malformed", get(malformed))
        .route("/status/{code}", get(status))
        .route("/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn greeting_json() -> Json<Message> {
    Json(Message {
        message: GREETING.to_string(),
    })
}

async fn greeting_text() -> &'static str {
    GREETING
}

async fn echo(Json(input): Json<Message>) -> Json<EchoReply> {
    log::debug!("echoing {:?}", input.message);
    Json(EchoReply {
        result: input.message,
    })
}

async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers.iter() {
        seen.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(seen)
}

async fn echo_query(Query(params): Query<Vec<(String, String)>>) -> Json<Vec<(String, String)>> {
    Json(params)
}

async fn raw(method: axum::http::Method, headers: HeaderMap, body: Bytes) -> Json<RawEcho> {
    Json(RawEcho {
        method: method.to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn malformed() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"message": "#)
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

async fn slow() -> &'static str {
    tokio::time::sleep(SLOW_DELAY).await;
    GREETING
}
