use std::time::Duration;

use axum::Json;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use futures::StreamExt;
use serde_json::{Value, json};
use tokio_stream::wrappers::ReceiverStream;

use eduadmin_client::{ApiClient, ApiError, ClientConfig, StreamEvent};

async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client_for(router: axum::Router) -> ApiClient {
    let base = serve(router).await;
    ApiClient::new(ClientConfig::new(base)).unwrap()
}

fn sse_response(chunks: Vec<&'static str>) -> Response {
    let parts = chunks
        .into_iter()
        .map(Ok::<&'static str, std::io::Error>)
        .collect::<Vec<_>>();
    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(Body::from_stream(futures::stream::iter(parts)))
        .unwrap()
}

#[tokio::test]
async fn stream_decodes_chunks_split_across_frames() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async {
            sse_response(vec![
                "data: {\"t\":1}\n\n",
                "da",
                "ta: {\"t\":2}\n\n",
                "data: [DONE]\n\n",
            ])
        }),
    );
    let client = client_for(router).await;

    let (stream, _cancel) = client.chat_stream("hello");
    let events: Vec<_> = stream.collect().await;

    let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(
        events,
        vec![
            StreamEvent::Chunk(json!({"t": 1})),
            StreamEvent::Chunk(json!({"t": 2})),
        ]
    );
}

#[tokio::test]
async fn sentinel_wins_over_data_buffered_behind_it() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async {
            sse_response(vec![
                "data: {\"t\":1}\n\ndata: [DONE]\n\ndata: {\"t\":9}\n\n",
            ])
        }),
    );
    let client = client_for(router).await;

    let (stream, _cancel) = client.chat_stream("hello");
    let events: Vec<_> = stream.collect().await;

    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].as_ref().unwrap(),
        &StreamEvent::Chunk(json!({"t": 1}))
    );
}

#[tokio::test]
async fn trailing_partial_line_is_flushed_on_clean_close() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async { sse_response(vec!["data: {\"t\":1}\n\ndata: tail"]) }),
    );
    let client = client_for(router).await;

    let (stream, _cancel) = client.chat_stream("hello");
    let events: Vec<_> = stream.collect().await;

    let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(
        events,
        vec![
            StreamEvent::Chunk(json!({"t": 1})),
            StreamEvent::Text("tail".to_string()),
        ]
    );
}

#[tokio::test]
async fn text_payload_spacing_is_preserved() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async { sse_response(vec!["data:   hi  there \n\ndata: [DONE]\n\n"]) }),
    );
    let client = client_for(router).await;

    let (stream, _cancel) = client.chat_stream("hello");
    let events: Vec<_> = stream.collect().await;

    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].as_ref().unwrap(),
        &StreamEvent::Text("hi  there ".to_string())
    );
}

#[tokio::test]
async fn non_success_status_fails_with_body_text() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let client = client_for(router).await;

    let (mut stream, _cancel) = client.chat_stream("hello");
    let err = stream.next().await.unwrap().unwrap_err();
    match err {
        ApiError::HttpStatus { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected http status error, got {other:?}"),
    }
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn cancel_before_any_data_yields_no_events() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            sse_response(vec!["data: {\"t\":1}\n\n"])
        }),
    );
    let client = client_for(router).await;

    let (mut stream, cancel) = client.chat_stream("hello");
    cancel.cancel();
    cancel.cancel(); // idempotent

    assert!(stream.next().await.is_none());
    assert!(stream.next().await.is_none());
    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn cancel_mid_stream_stops_emission() {
    let router = axum::Router::new().route(
        "/aigc/chat/stream",
        post(|| async {
            let (tx, rx) = tokio::sync::mpsc::channel::<Result<&'static str, std::io::Error>>(4);
            tx.send(Ok("data: {\"t\":1}\n\n")).await.unwrap();
            // Hold the connection open so only cancellation can end it.
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(tx);
            });
            Response::builder()
                .header(header::CONTENT_TYPE, "text/event-stream")
                .body(Body::from_stream(ReceiverStream::new(rx)))
                .unwrap()
        }),
    );
    let client = client_for(router).await;

    let (mut stream, cancel) = client.chat_stream("hello");
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, StreamEvent::Chunk(json!({"t": 1})));

    cancel.cancel();
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn chat_unwraps_explicit_envelope() {
    let router = axum::Router::new().route(
        "/aigc/chat",
        post(|Json(body): Json<Value>| async move {
            Json(json!({"code": 200, "msg": "ok", "data": body}))
        }),
    );
    let client = client_for(router).await;

    let value = client.chat("hello").await.unwrap();
    assert_eq!(value["code"], 200);
    assert_eq!(value["data"]["messages"][0]["role"], "user");
    assert_eq!(value["data"]["messages"][0]["content"], "hello");
    assert_eq!(value["data"]["enable_web_search"], false);
}

#[tokio::test]
async fn chat_surfaces_envelope_failure() {
    let router = axum::Router::new().route(
        "/aigc/chat",
        post(|| async { Json(json!({"code": 500, "msg": "model offline"})) }),
    );
    let client = client_for(router).await;

    let err = client.chat("hello").await.unwrap_err();
    match err {
        ApiError::Envelope { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "model offline");
        }
        other => panic!("expected envelope error, got {other:?}"),
    }
}

#[tokio::test]
async fn bare_body_is_wrapped_for_uniform_access() {
    let router = axum::Router::new().route(
        "/aigc/chat",
        post(|| async { Json(json!({"x": 1})) }),
    );
    let client = client_for(router).await;

    let value = client.chat("hello").await.unwrap();
    assert_eq!(value, json!({"data": {"x": 1}}));
}
