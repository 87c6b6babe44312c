//! Integration tests for BoosterForge
//!
//! These drive the public pipeline and the HTTP router end to end with a
//! scripted generation client, so no network is involved.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use boosterforge::genai::{ContentPart, GenError, GenerationClient, InlineImage};
use boosterforge::plan::{PlanError, PlanSession};
use boosterforge::server::{AppState, router};

/// Scripted generation client: returns canned responses in order and records
/// every prompt it was sent.
struct ScriptedClient {
    responses: Mutex<Vec<Result<Vec<ContentPart>, GenError>>>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<Vec<ContentPart>>>,
}

impl ScriptedClient {
    fn new(responses: Vec<Result<Vec<ContentPart>, GenError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<Vec<ContentPart>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, parts: Vec<ContentPart>) -> Result<Vec<ContentPart>, GenError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(parts);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(GenError::InvalidResponse("script exhausted".to_string()));
        }
        responses.remove(0)
    }
}

fn milestone_response() -> Vec<ContentPart> {
    vec![
        ContentPart::text("Title: The First Toss\nDescription: Foundations of flight."),
        ContentPart::InlineImage(InlineImage::new("M1", "image/png")),
        ContentPart::text("Title: Two in the Air\nDescription: The rhythm builds."),
        ContentPart::InlineImage(InlineImage::new("M2", "image/png")),
        ContentPart::text("Title: The Cascade Unleashed\nDescription: The goal, achieved."),
        ContentPart::InlineImage(InlineImage::new("M3", "image/png")),
    ]
}

fn task_response() -> Vec<ContentPart> {
    vec![
        ContentPart::text("Title: Card: Gather Components\nDetails:\n1. Find three beanbags\n2. Clear a space"),
        ContentPart::InlineImage(InlineImage::new("T1", "image/png")),
        ContentPart::text("Title: Card: Learn the Arc\nDetails:\n1. Toss to eye height\n2. Catch without looking"),
        ContentPart::InlineImage(InlineImage::new("T2", "image/png")),
        ContentPart::text("Title: Card: Build the Habit\nDetails:\n1. Ten minutes daily\n2. Track your drops"),
        ContentPart::InlineImage(InlineImage::new("T3", "image/png")),
    ]
}

// =============================================================================
// Session end-to-end
// =============================================================================

#[tokio::test]
async fn test_full_wizard_flow() {
    let client = ScriptedClient::new(vec![Ok(milestone_response()), Ok(task_response())]);
    let mut session = PlanSession::new(client.clone());

    // Goal in, exactly one generation call with the goal embedded verbatim
    let milestones = session.generate_plan("Learn to Juggle", None).await.unwrap();
    assert_eq!(milestones.len(), 3);
    assert_eq!(milestones[0].title, "The First Toss");
    assert_eq!(milestones[2].title, "The Cascade Unleashed");
    assert_eq!(client.call_count(), 1);

    let first_prompt = client.requests()[0]
        .iter()
        .find_map(|p| p.as_text())
        .unwrap()
        .to_string();
    assert!(first_prompt.contains("Learn to Juggle"));

    // Opening booster 0 triggers exactly one task call
    let tasks = session.select_milestone(0).await.unwrap().to_vec();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].title, "Gather Components");
    assert_eq!(client.call_count(), 2);

    // The task prompt names the booster and the series theme
    let task_prompt = client.requests()[1]
        .iter()
        .find_map(|p| p.as_text())
        .unwrap()
        .to_string();
    assert!(task_prompt.contains("The First Toss"));
    assert!(task_prompt.contains("Learn to Juggle"));

    // Tasks cached on booster 0 only
    assert!(session.milestones()[0].tasks.is_some());
    assert!(session.milestones()[1].tasks.is_none());
    assert!(session.milestones()[2].tasks.is_none());

    // Re-opening is served from the cache
    session.select_milestone(0).await.unwrap();
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_empty_response_surfaces_user_message() {
    let client = ScriptedClient::new(vec![Err(GenError::EmptyResponse)]);
    let mut session = PlanSession::new(client);

    let err = session.generate_plan("Something restricted", None).await.unwrap_err();
    assert!(matches!(err, PlanError::Gen(GenError::EmptyResponse)));
    assert!(err.to_string().contains("try a different goal"));
}

// =============================================================================
// HTTP routes
// =============================================================================

fn test_app(client: Arc<ScriptedClient>) -> axum::Router {
    let static_dir = std::env::temp_dir();
    router(AppState { client }, &static_dir)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_prompt_request(prompt: &str) -> Request<Body> {
    let boundary = "bf-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{prompt}\r\n--{boundary}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/api/generate-milestones")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_generate_milestones_endpoint() {
    let client = ScriptedClient::new(vec![Ok(milestone_response())]);
    let app = test_app(client.clone());

    let response = app.oneshot(multipart_prompt_request("Learn to Juggle")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let milestones = json.as_array().unwrap();
    assert_eq!(milestones.len(), 3);
    assert_eq!(milestones[0]["title"], "The First Toss");
    assert_eq!(milestones[0]["imageUrl"], "data:image/png;base64,M1");
    assert!(milestones[0].get("tasks").is_none());
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_generate_milestones_empty_prompt_is_400() {
    let client = ScriptedClient::new(vec![]);
    let app = test_app(client.clone());

    let response = app.oneshot(multipart_prompt_request("   ")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Please enter your goal.");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_generate_tasks_endpoint() {
    let client = ScriptedClient::new(vec![Ok(task_response())]);
    let app = test_app(client);

    let body = serde_json::json!({
        "milestone": {
            "title": "The First Toss",
            "description": "Foundations of flight.",
            "imageUrl": "data:image/png;base64,M1"
        },
        "seriesTheme": "Learn to Juggle"
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-tasks")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0]["title"], "Gather Components");
    assert_eq!(tasks[0]["details"][0], "Find three beanbags");
    assert_eq!(tasks[2]["imageUrl"], "data:image/png;base64,T3");
}

#[tokio::test]
async fn test_generate_tasks_breakdown_is_500_with_message() {
    let client = ScriptedClient::new(vec![Ok(vec![ContentPart::text("no structure at all")])]);
    let app = test_app(client);

    let body = serde_json::json!({
        "milestone": {
            "title": "The First Toss",
            "description": "d",
            "imageUrl": "data:image/png;base64,M1"
        },
        "seriesTheme": "Learn to Juggle"
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-tasks")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Could not break down the milestone. Please try again.");
}

#[tokio::test]
async fn test_health_endpoint() {
    let client = ScriptedClient::new(vec![]);
    let app = test_app(client);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
