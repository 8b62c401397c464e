//! Integration tests for the Meowtrics HTTP API

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use prost::Message;
use tower::util::ServiceExt;

use meowtrics::{
    create_router, AppState, ClientEventData, ClientEventType, ClientEventUploadRequest,
    EventStore, MemoryEventStore,
};

fn setup() -> (Router, Arc<MemoryEventStore>) {
    let store = Arc::new(MemoryEventStore::new());
    let state = Arc::new(AppState::new(store.clone()));
    (create_router(state), store)
}

fn sample_bundle() -> ClientEventUploadRequest {
    ClientEventUploadRequest::new(
        "r1",
        "android",
        vec![ClientEventData::new("123", ClientEventType::Unknown, 1000, "x")],
    )
}

fn post(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/events")
        .header("Content-Type", content_type)
        .body(body.into())
        .unwrap()
}

fn get(uri: &str, accept: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(accept) = accept {
        builder = builder.header("Accept", accept);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_post_json_bundle_stores_event() {
    let (app, store) = setup();
    let body = serde_json::to_vec(&sample_bundle()).unwrap();

    let response = app.oneshot(post("application/json", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("123").unwrap().data, "x");
}

#[tokio::test]
async fn test_post_json_literal_document() {
    let (app, store) = setup();
    let body = r#"{"requestId":"r1","deviceType":"android",
        "events":[{"eventId":"123","eventType":"UNKNOWN","timestamp":1000,"data":"x"}]}"#;

    let response = app.oneshot(post("application/json", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.get("123").unwrap().timestamp, 1000);
}

#[tokio::test]
async fn test_post_json_without_event_id_is_rejected() {
    let (app, store) = setup();
    let body = r#"{"requestId":"r1","deviceType":"android",
        "events":[{"eventType":"UNKNOWN","timestamp":1000,"data":"x"}]}"#;

    let response = app.oneshot(post("application/json", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REQUEST_PARAMETERS");
    assert_eq!(json["description"], "Event index (count starts from 0): 0");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_json_null_event_id_is_rejected() {
    let (app, store) = setup();
    let body = r#"{"requestId":"r1","deviceType":null,
        "events":[{"eventId":null,"eventType":null,"timestamp":1000,"data":"x"}]}"#;

    let response = app.oneshot(post("application/json", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REQUEST_PARAMETERS");
    assert_eq!(json["description"], "Event index (count starts from 0): 0");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_bundle_larger_than_two_mebibytes() {
    let (app, store) = setup();
    let payload = "p".repeat(1024);
    let bundle = ClientEventUploadRequest::new(
        "big",
        "android",
        (0..3000)
            .map(|i| {
                ClientEventData::new(
                    format!("{}", i),
                    ClientEventType::ScreenView,
                    i,
                    payload.as_str(),
                )
            })
            .collect(),
    );
    let body = serde_json::to_vec(&bundle).unwrap();
    assert!(body.len() > 2 * 1024 * 1024);

    let response = app.oneshot(post("application/json", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 3000);
    assert_eq!(store.get("2999").unwrap().data.len(), 1024);
}

#[tokio::test]
async fn test_post_bundle_with_one_bad_event_stores_nothing() {
    let (app, store) = setup();
    let mut bundle = sample_bundle();
    bundle
        .events
        .push(ClientEventData::new("124", ClientEventType::AppOpen, 1001, "y"));
    bundle
        .events
        .push(ClientEventData::new("", ClientEventType::Crash, 1002, "z"));

    let response = app
        .oneshot(post("application/x-protobuf", bundle.encode_to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["description"],
        "Event index (count starts from 0): 2"
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_malformed_json() {
    let (app, store) = setup();

    let response = app
        .oneshot(post("application/json", "randomString"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MALFORMED_REQUEST");
    assert_eq!(json["message"], "Request body contains malformed JSON");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_protobuf_bundle_stores_event() {
    let (app, store) = setup();

    let response = app
        .oneshot(post("application/x-protobuf", sample_bundle().encode_to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("123").unwrap(), sample_bundle().events[0]);
}

#[tokio::test]
async fn test_post_malformed_protobuf_answers_in_json() {
    let (app, store) = setup();

    let response = app
        .oneshot(post("application/x-protobuf", "randomString"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], "MALFORMED_REQUEST");
    assert_eq!(json["message"], "Request body contains malformed buffered data");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_unsupported_media_type() {
    let (app, store) = setup();

    let response = app
        .oneshot(post("application/meow", "meowtrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(json["message"].as_str().unwrap().contains("Content-Type"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_without_content_type_is_unsupported() {
    let (app, _store) = setup();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/events")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_get_json_after_post() {
    let (app, _store) = setup();
    let body = serde_json::to_vec(&sample_bundle()).unwrap();

    let response = app
        .clone()
        .oneshot(post("application/json", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for accept in [Some("application/json"), Some("*/*"), None] {
        let response = app
            .clone()
            .oneshot(get("/v1/events/123", accept))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["eventId"], "123");
        assert_eq!(json["eventType"], "UNKNOWN");
        assert_eq!(json["timestamp"], 1000);
        assert_eq!(json["data"], "x");
    }
}

#[tokio::test]
async fn test_get_protobuf() {
    let (app, store) = setup();
    let event = ClientEventData::new("42", ClientEventType::ScreenView, 7, "payload");
    store.put(event.clone()).unwrap();

    let response = app
        .oneshot(get("/v1/events/42", Some("application/x-protobuf")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/x-protobuf"
    );
    let decoded = ClientEventData::decode(body_bytes(response).await.as_slice()).unwrap();
    assert_eq!(decoded, event);
}

#[tokio::test]
async fn test_get_missing_event_has_empty_body() {
    let (app, _store) = setup();

    for accept in ["application/json", "application/x-protobuf"] {
        let response = app
            .clone()
            .oneshot(get("/v1/events/999", Some(accept)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_get_unsupported_accept() {
    let (app, store) = setup();
    store
        .put(ClientEventData::new("1", ClientEventType::Unknown, 1, "x"))
        .unwrap();

    let response = app
        .oneshot(get("/v1/events/1", Some("application/meow")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(json["message"].as_str().unwrap().starts_with("Accept"));
}

#[tokio::test]
async fn test_get_non_numeric_id_uses_catch_all() {
    let (app, store) = setup();
    // stored under a non-numeric key, still unreachable over HTTP
    store
        .put(ClientEventData::new("abc", ClientEventType::Unknown, 1, "x"))
        .unwrap();

    let response = app
        .oneshot(get("/v1/events/abc", Some("application/json")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Nothing to see here");
}

#[tokio::test]
async fn test_post_overwrites_existing_event() {
    let (app, store) = setup();
    let first = sample_bundle();
    let mut second = sample_bundle();
    second.events[0].data = "updated".to_string();

    for bundle in [first, second] {
        let response = app
            .clone()
            .oneshot(post("application/json", serde_json::to_vec(&bundle).unwrap()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("123").unwrap().data, "updated");
}

#[tokio::test]
async fn test_concurrent_uploads() {
    let (app, store) = setup();
    let mut handles = vec![];

    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let bundle = ClientEventUploadRequest::new(
                format!("r{}", i),
                "ios",
                (0..10)
                    .map(|j| {
                        ClientEventData::new(
                            format!("{}", i * 100 + j),
                            ClientEventType::UserAction,
                            j,
                            "tap",
                        )
                    })
                    .collect(),
            );
            app.oneshot(post("application/x-protobuf", bundle.encode_to_vec()))
                .await
                .unwrap()
                .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(store.len(), 160);
}
