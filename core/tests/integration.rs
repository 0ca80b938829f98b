//! The default ureq transport against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port inside the test runtime, then
//! drives `HttpClient` over real HTTP. Most tests use the multi-threaded
//! runtime; `UreqTransport` only needs a blocking pool, which the
//! current-thread runtime has too.

#![cfg(feature = "ureq")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ajax_core::{
    AuthInterceptor, ClientConfig, DefaultHeaders, HttpClient, HttpError, LoggingInterceptor,
    Request, ResponseType, UreqTransport,
};
use mock_server::Echo;
use serde::Serialize;
use serde_json::{json, Value};

/// Bind a random port, serve the mock app on it, and return a client whose
/// base url points at it.
async fn start() -> HttpClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    HttpClient::new(ClientConfig::new().with_base_url(format!("http://{addr}")))
}

#[tokio::test]
async fn default_transport_runs_on_current_thread_runtime() {
    let client = start().await;

    let res = client.get::<Echo>("/echo/single", None).await.unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.response.path, "/echo/single");
}

#[derive(Serialize)]
struct NewItem {
    title: String,
}

#[tokio::test(flavor = "multi_thread")]
async fn get_decodes_json_echo() {
    let client = start().await;

    let res = client.get::<Echo>("/echo/users", None).await.unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.response.method, "GET");
    assert_eq!(res.response.path, "/echo/users");
    assert!(res.response.body.is_empty());
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert!(res.request.url.as_deref().unwrap().ends_with("/echo/users"));
}

#[tokio::test(flavor = "multi_thread")]
async fn body_verbs_send_json() {
    let client = start().await;
    let item = NewItem {
        title: "Integration test".to_string(),
    };

    let post = client.post::<Echo, _>("/echo", &item, None).await.unwrap();
    let put = client.put::<Echo, _>("/echo", &item, None).await.unwrap();
    let patch = client.patch::<Echo, _>("/echo", &item, None).await.unwrap();

    for (res, method) in [(post, "POST"), (put, "PUT"), (patch, "PATCH")] {
        let echo = res.response;
        assert_eq!(echo.method, method);
        assert_eq!(echo.headers["content-type"], "application/json;charset=UTF-8");
        let body: Value = serde_json::from_str(&echo.body).unwrap();
        assert_eq!(body, json!({"title": "Integration test"}));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_sends_no_body() {
    let client = start().await;

    let res = client.delete::<Echo>("/echo/items/1", None).await.unwrap();

    assert_eq!(res.response.method, "DELETE");
    assert!(res.response.body.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn string_bodies_go_out_as_text() {
    let client = start().await;

    let res = client
        .post::<Echo, _>("/echo", "hello", None)
        .await
        .unwrap();

    assert_eq!(res.response.body, "hello");
    assert_eq!(res.response.headers["content-type"], "text/plain;charset=UTF-8");
}

#[tokio::test(flavor = "multi_thread")]
async fn caller_content_type_is_kept() {
    let client = start().await;
    let options = Request::new().header("Content-Type", "application/vnd.api+json");

    let res = client
        .post::<Echo, Value>("/echo", json!({"a": 1}), Some(options))
        .await
        .unwrap();

    assert_eq!(res.response.headers["content-type"], "application/vnd.api+json");
}

#[tokio::test(flavor = "multi_thread")]
async fn interceptors_shape_the_wire_request() {
    let mut client = start().await;
    client
        .interceptors_mut()
        .request
        .push(DefaultHeaders::new().header("X-Client", "ajax-core"));
    client
        .interceptors_mut()
        .request
        .push(AuthInterceptor::bearer("secret"));
    client.interceptors_mut().request.push(LoggingInterceptor::new());
    client.interceptors_mut().response.push(LoggingInterceptor::new());

    let res = client.get::<Echo>("/echo", None).await.unwrap();

    assert_eq!(res.response.headers["x-client"], "ajax-core");
    assert_eq!(res.response.headers["authorization"], "Bearer secret");
}

#[tokio::test(flavor = "multi_thread")]
async fn basic_auth_fields_become_a_header() {
    let client = start().await;
    let options = Request::new().basic_auth("aladdin", "opensesame");

    let res = client.get::<Echo>("/echo", Some(options)).await.unwrap();

    assert_eq!(
        res.response.headers["authorization"],
        "Basic YWxhZGRpbjpvcGVuc2VzYW1l"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn error_status_is_a_transport_failure() {
    let mut client = start().await;
    let spy = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&spy);
    client.interceptors_mut().response.push_fn(move |res| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(res)
    });

    let err = client.get::<Value>("/status/404", None).await.unwrap_err();

    assert_eq!(
        err,
        HttpError::Status {
            status: 404,
            body: "status 404".to_string(),
        }
    );
    assert_eq!(spy.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn text_response_type_keeps_raw_body() {
    let client = start().await;
    let options = Request::new().response_type(ResponseType::Text);

    let res = client.get::<String>("/text", Some(options)).await.unwrap();

    assert_eq!(res.response, "plain text");
    assert_eq!(res.raw, "plain text");
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_body_fails_json_decoding() {
    let client = start().await;

    let err = client.get::<Value>("/text", None).await.unwrap_err();

    assert!(matches!(err, HttpError::Deserialization(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_body_decodes_to_null() {
    let client = start().await;

    let res = client.get::<Value>("/empty", None).await.unwrap();

    assert_eq!(res.status, 204);
    assert_eq!(res.response, Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn request_timeout_is_reported() {
    let client = start().await;
    let options = Request::new().timeout(Duration::from_millis(50));

    let err = client.get::<Value>("/slow/2000", Some(options)).await.unwrap_err();

    assert_eq!(err, HttpError::Timeout);
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_default_timeout_applies() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    let client = HttpClient::with_transport(
        ClientConfig::new().with_base_url(format!("http://{addr}")),
        UreqTransport::new().with_timeout(Duration::from_millis(50)),
    );

    let err = client.get::<Value>("/slow/2000", None).await.unwrap_err();
    assert_eq!(err, HttpError::Timeout);

    let ok = client
        .get::<Value>("/slow/0", Some(Request::new().timeout(Duration::from_secs(5))))
        .await
        .unwrap();
    assert_eq!(ok.response, json!({"slept": 0}));
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_refused_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpClient::new(ClientConfig::new().with_base_url(format!("http://{addr}")));

    let err = client.get::<Value>("/echo", None).await.unwrap_err();

    assert!(matches!(err, HttpError::Transport(_)), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_calls_reach_the_server_independently() {
    let client = start().await;

    let (a, b) = tokio::join!(
        client.post::<Echo, _>("/echo/a", json!({"id": "a"}), None),
        client.put::<Echo, _>("/echo/b", json!({"id": "b"}), None),
    );
    let (a, b) = (a.unwrap().response, b.unwrap().response);

    assert_eq!((a.method.as_str(), a.path.as_str()), ("POST", "/echo/a"));
    assert_eq!((b.method.as_str(), b.path.as_str()), ("PUT", "/echo/b"));
    assert_eq!(a.body, r#"{"id":"a"}"#);
    assert_eq!(b.body, r#"{"id":"b"}"#);
}
