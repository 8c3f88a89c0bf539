//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router while
//! keeping the receiving end of the event queue for assertions.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lw_common::Event;
use lw_server::api::{create_router, AppState};
use lw_server::config::Config;
use lw_server::dispatch::{self, EventReceiver};
use lw_server::webhook::{sign_body, SIGNATURE_HEADER};
use tower::ServiceExt;

/// Router plus the consumer side of its event queue.
pub struct TestApp {
    pub router: Router,
    pub config: Config,
    pub events: EventReceiver,
}

impl TestApp {
    /// Build an app with the test configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    pub fn with_config(config: Config) -> Self {
        let (tx, rx) = dispatch::channel(config.event_buffer);
        let router = create_router(AppState::new(config.clone(), tx));
        Self {
            router,
            config,
            events: rx,
        }
    }

    /// Request builder with the given method and path.
    pub fn request(method: Method, path: &str) -> http::request::Builder {
        Request::builder().method(method).uri(path)
    }

    /// Send one request through a clone of the router.
    pub async fn oneshot(&self, req: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("router is infallible")
    }

    /// Signature the platform would send for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        sign_body(self.config.channel_secret.expose(), body)
    }

    /// POST `body` to the webhook path with the given signature header.
    pub async fn post_webhook(&self, body: &str, signature: Option<&str>) -> Response<Body> {
        let mut req = Self::request(Method::POST, &self.config.webhook_path)
            .header("Content-Type", "application/json");
        if let Some(signature) = signature {
            req = req.header(SIGNATURE_HEADER, signature);
        }
        self.oneshot(req.body(Body::from(body.to_owned())).unwrap())
            .await
    }

    /// Events queued so far, without waiting for more.
    pub fn drain_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Collect a response body as JSON.
pub async fn body_to_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
