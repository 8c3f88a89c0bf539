//! Webhook receiver HTTP tests.

mod helpers;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use lw_common::{EventSource, EventType, Message};
use lw_server::config::Config;

use helpers::{body_to_json, TestApp};

const TEXT_MESSAGE: &str = r#"{
  "destination": "Ub6f9a5d8e8e3c3b0b4e1f2a3c4d5e6f7",
  "events": [
    {
      "type": "message",
      "mode": "active",
      "timestamp": 1462629479859,
      "source": {"type": "user", "userId": "U4af4980629"},
      "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
      "deliveryContext": {"isRedelivery": false},
      "replyToken": "0f3779fba3b349968c5d07db31eab56f",
      "message": {"id": "444573844083572737", "type": "text", "text": "@example Hello, world!"}
    },
    {
      "type": "follow",
      "mode": "active",
      "timestamp": 1462629479960,
      "source": {"type": "user", "userId": "U4af4980629"},
      "webhookEventId": "01FZ74ASS536FW97EX38NKCZQK",
      "deliveryContext": {"isRedelivery": true},
      "replyToken": "85cbe770fa8b4f45bbe077b1d4be4a36"
    }
  ]
}"#;

#[tokio::test]
async fn valid_signature_queues_events_in_order() {
    let mut app = TestApp::new();
    let sig = app.sign(TEXT_MESSAGE.as_bytes());

    let resp = app.post_webhook(TEXT_MESSAGE, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_to_json(resp).await["received"], 2);

    let events = app.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventType::Message);
    assert_eq!(events[1].kind, EventType::Follow);
    assert!(events[1].is_redelivery());
    assert_eq!(
        events[0].source,
        Some(EventSource::User {
            user_id: "U4af4980629".into()
        })
    );
    assert!(matches!(
        events[0].message,
        Some(Message::Text { ref text, .. }) if text == "@example Hello, world!"
    ));
}

#[tokio::test]
async fn verification_request_with_no_events() {
    let mut app = TestApp::new();
    let body = r#"{"destination":"U0","events":[]}"#;
    let sig = app.sign(body.as_bytes());

    let resp = app.post_webhook(body, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_to_json(resp).await["received"], 0);
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn wrong_signature_is_unauthorized() {
    let mut app = TestApp::new();
    let sig = app.sign(b"some other body");

    let resp = app.post_webhook(TEXT_MESSAGE, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_to_json(resp).await["error"], "INVALID_SIGNATURE");
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn missing_signature_is_unauthorized() {
    let app = TestApp::new();
    let resp = app.post_webhook(TEXT_MESSAGE, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_signature_is_unauthorized_not_bad_request() {
    let app = TestApp::new();
    let resp = app.post_webhook("{not json", Some("???")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_to_json(resp).await["error"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn signed_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let body = r#"{"events": [1, 2"#;
    let sig = app.sign(body.as_bytes());

    let resp = app.post_webhook(body, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(resp).await["error"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = Config::default_for_test();
    config.max_body_size = 32;
    let app = TestApp::with_config(config);

    let body = format!(r#"{{"events":[],"padding":"{}"}}"#, "x".repeat(64));
    let sig = app.sign(body.as_bytes());

    let resp = app.post_webhook(&body, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_to_json(resp).await["error"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn payload_without_events_field_is_accepted() {
    let mut app = TestApp::new();
    for body in [r#"{}"#, r#"{"events":null}"#, r#"{"destination":"U0"}"#] {
        let sig = app.sign(body.as_bytes());
        let resp = app.post_webhook(body, Some(&sig)).await;
        assert_eq!(resp.status(), StatusCode::OK, "{body}");
        assert_eq!(body_to_json(resp).await["received"], 0);
    }
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn unrecognised_source_does_not_drop_the_batch() {
    let mut app = TestApp::new();
    let body = r#"{"events":[
        {"type":"follow","timestamp":1,"source":{"type":"user","userId":"U1"}},
        {"type":"follow","timestamp":2,"source":{"type":"channel","channelId":"C1"}}
    ]}"#;
    let sig = app.sign(body.as_bytes());

    let resp = app.post_webhook(body, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let events = app.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].source, Some(EventSource::Unknown));
}

#[tokio::test]
async fn closed_queue_is_service_unavailable() {
    let mut app = TestApp::new();
    let (_, unused_rx) = tokio::sync::mpsc::channel(1);
    drop(std::mem::replace(&mut app.events, unused_rx));

    let sig = app.sign(TEXT_MESSAGE.as_bytes());
    let resp = app.post_webhook(TEXT_MESSAGE, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_to_json(resp).await["error"], "DISPATCH_UNAVAILABLE");
}

#[tokio::test]
async fn custom_webhook_path() {
    let mut config = Config::default_for_test();
    config.webhook_path = "/hooks/line".into();
    let app = TestApp::with_config(config);

    let body = r#"{"events":[]}"#;
    let sig = app.sign(body.as_bytes());
    let resp = app.post_webhook(body, Some(&sig)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestApp::request(Method::POST, "/callback")
        .body(Body::from(body))
        .unwrap();
    assert_eq!(app.oneshot(req).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_and_request_id() {
    let app = TestApp::new();
    let req = TestApp::request(Method::GET, "/health")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(body_to_json(resp).await["status"], "ok");
}
