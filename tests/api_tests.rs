use gemini_chat_backend::message::{ChatResponse, ChatStatus, ErrorResponse, HealthResponse, RootResponse};
use gemini_chat_backend::routes::create_router;
use gemini_chat_backend::services::gemini::{LlmClient, LlmError};
use gemini_chat_backend::state::AppState;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

enum Reply {
    Text(&'static str),
    Empty,
    Fail(u16, &'static str),
}

struct MockLlm {
    reply: Reply,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockLlm {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<Option<String>, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        match self.reply {
            Reply::Text(text) => Ok(Some(text.to_string())),
            Reply::Empty => Ok(Some(String::new())),
            Reply::Fail(status, message) => Err(LlmError::Api {
                status,
                message: message.to_string(),
            }),
        }
    }
}

fn app_with(mock: Arc<MockLlm>) -> Router {
    let llm: Arc<dyn LlmClient> = mock;
    let state = Arc::new(AppState::new(Some(llm), "gemini-2.5-flash"));
    create_router().with_state(state)
}

fn unconfigured_app() -> Router {
    create_router().with_state(Arc::new(AppState::unconfigured()))
}

fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_root_endpoint() {
    let response = unconfigured_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let root: RootResponse = read_json(response).await;
    assert!(root.message.contains("Gemini"));
}

#[tokio::test]
async fn test_health_reports_configured() {
    let response = app_with(MockLlm::new(Reply::Text("unused")))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "healthy");
    assert!(health.gemini_configured);
}

#[tokio::test]
async fn test_health_reports_unconfigured_and_ignores_body() {
    let response = unconfigured_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::from("not json at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "healthy");
    assert!(!health.gemini_configured);
}

#[tokio::test]
async fn test_chat_success() {
    let mock = MockLlm::new(Reply::Text("Hi there!"));
    let response = app_with(mock.clone())
        .oneshot(post_chat(r#"{"message": "Hello", "conversation_history": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat: ChatResponse = read_json(response).await;
    assert_eq!(chat.response, "Hi there!");
    assert_eq!(chat.status, ChatStatus::Success);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "gemini-2.5-flash");
    assert_eq!(calls[0].1, "\nUser: Hello\nAssistant:");
}

#[tokio::test]
async fn test_chat_without_history_field() {
    let mock = MockLlm::new(Reply::Text("ok"));
    let response = app_with(mock.clone())
        .oneshot(post_chat(r#"{"message": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mock.calls()[0].1, "\nUser: Hello\nAssistant:");
}

#[tokio::test]
async fn test_chat_passes_history_window_to_model() {
    let mock = MockLlm::new(Reply::Text("ok"));
    let body = r#"{
        "message": "And now?",
        "conversation_history": [
            {"user": "one", "assistant": "1"},
            {"user": "two", "assistant": "2"},
            {"user": "three", "assistant": "3"},
            "garbage",
            {"user": "four"},
            {"user": "five", "assistant": "5"}
        ]
    }"#;

    let response = app_with(mock.clone()).oneshot(post_chat(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prompt = &mock.calls()[0].1;
    assert_eq!(
        prompt,
        "User: two\nAssistant: 2\n\
         User: three\nAssistant: 3\n\
         User: four\nAssistant: \n\
         User: five\nAssistant: 5\n\
         \nUser: And now?\nAssistant:"
    );
}

#[tokio::test]
async fn test_chat_unconfigured() {
    let response = unconfigured_app()
        .oneshot(post_chat(r#"{"message": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = read_json(response).await;
    assert!(err.detail.contains("GEMINI_API_KEY"));
    assert!(err.detail.contains("not configured"));
}

#[tokio::test]
async fn test_chat_empty_model_output() {
    let response = app_with(MockLlm::new(Reply::Empty))
        .oneshot(post_chat(r#"{"message": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = read_json(response).await;
    assert_eq!(err.detail, "No response generated from Gemini API");
}

#[tokio::test]
async fn test_chat_adapter_error_is_embedded() {
    let response = app_with(MockLlm::new(Reply::Fail(429, "Resource has been exhausted")))
        .oneshot(post_chat(r#"{"message": "Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = read_json(response).await;
    assert!(err.detail.starts_with("Internal server error:"));
    assert!(err.detail.contains("Resource has been exhausted"));
}

#[tokio::test]
async fn test_chat_malformed_body() {
    let mock = MockLlm::new(Reply::Text("unused"));
    let response = app_with(mock.clone())
        .oneshot(post_chat(r#"{"conversation_history": []}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let err: ErrorResponse = read_json(response).await;
    assert!(!err.detail.is_empty());
    assert!(mock.calls().is_empty());
}
