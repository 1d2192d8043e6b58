use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, EchoReply, Message, RawEcho, GREETING};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- greetings ---

#[tokio::test]
async fn get_returns_json_greeting() {
    let resp = app().oneshot(get("/get")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let message: Message = body_json(resp).await;
    assert_eq!(message.message, GREETING);
}

#[tokio::test]
async fn text_returns_plain_greeting() {
    let resp = app().oneshot(get("/text")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], GREETING.as_bytes());
}

// --- echo ---

#[tokio::test]
async fn echo_moves_message_into_result() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"message":"Hello, reqit!"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: EchoReply = body_json(resp).await;
    assert_eq!(reply.result, GREETING);
}

#[tokio::test]
async fn echo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"not_message":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- echoed request data ---

#[tokio::test]
async fn headers_are_echoed_with_every_value() {
    let req = Request::builder()
        .uri("/headers")
        .header("x-a", "1")
        .header("x-a", "2")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let seen: std::collections::BTreeMap<String, Vec<String>> = body_json(resp).await;
    assert_eq!(seen["x-a"], ["1", "2"]);
}

#[tokio::test]
async fn query_is_echoed_in_order() {
    let resp = app().oneshot(get("/query?b=2&a=1&b=3")).await.unwrap();

    let params: Vec<(String, String)> = body_json(resp).await;
    let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(params, [("b", "2"), ("a", "1"), ("b", "3")]);
}

#[tokio::test]
async fn raw_reports_method_content_type_and_body() {
    let req = Request::builder()
        .method("PUT")
        .uri("/raw")
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let echo: RawEcho = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.content_type.as_deref(), Some("text/plain"));
    assert_eq!(echo.body, "payload");
}

// --- failure fixtures ---

#[tokio::test]
async fn malformed_is_not_json() {
    let resp = app().oneshot(get("/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

#[tokio::test]
async fn status_route_answers_with_requested_code() {
    let resp = app().oneshot(get("/status/418")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(&body_bytes(resp).await[..], b"status 418");
}

#[tokio::test]
async fn status_route_rejects_invalid_codes() {
    let resp = app().oneshot(get("/status/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
