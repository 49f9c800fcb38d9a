#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use medical_advisor_gateway::error::AdvisorError;
use medical_advisor_gateway::models::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage,
};
use medical_advisor_gateway::rate_limit::RateLimiter;
use medical_advisor_gateway::router;
use medical_advisor_gateway::state::AppState;
use medical_advisor_gateway::upstream::CompletionClient;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const MODEL: &str = "test-model";

pub enum Reply {
    Answer(String),
    NoChoices,
    Fail(String),
}

// Records every call and answers with a canned reply
pub struct MockCompletion {
    reply: Reply,
    pub calls: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockCompletion {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn answering(text: &str) -> Arc<Self> {
        Self::new(Reply::Answer(text.to_string()))
    }

    pub fn calls(&self) -> Vec<ChatCompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AdvisorError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Answer(text) => Ok(ChatCompletionResponse {
                choices: vec![Choice {
                    message: Some(ChoiceMessage {
                        content: Some(text.clone()),
                    }),
                }],
            }),
            Reply::NoChoices => Ok(ChatCompletionResponse { choices: vec![] }),
            Reply::Fail(msg) => Err(AdvisorError::upstream(msg.clone())),
        }
    }
}

pub fn app(completion: Arc<dyn CompletionClient>, limit: u32) -> Router {
    router(Arc::new(AppState {
        completion,
        model: MODEL.to_string(),
        rate_limiter: Arc::new(RateLimiter::new(limit, Duration::from_secs(60))),
        trust_proxy: false,
    }))
}

pub fn advice_request(body: &str, client: Option<SocketAddr>) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/api/medical-advisor")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    if let Some(addr) = client {
        request.extensions_mut().insert(ConnectInfo(addr));
    }
    request
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn post_json(app: &Router, body: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, advice_request(body, None)).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
