use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::post,
    Json, Router,
};
use dw_generate::{GenerationClient, GenerationConfig, PromptStore};
use dw_refine::Refiner;
use dw_server::{routes::create_router, AppState, GENERIC_FAILURE};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn offline_state() -> AppState {
    AppState::new(Refiner::default(), None, PromptStore::default())
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, String) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_text(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Serves a canned chat-completion reply on an ephemeral port.
async fn fake_completion_service(status: StatusCode, reply: Value) -> String {
    let app = Router::new().route(
        "/chat/completions",
        post(move || async move { (status, Json(reply)) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn generating_state(base_url: String, prompts: &std::path::Path) -> AppState {
    let config = GenerationConfig {
        base_url,
        api_key: "test-key".to_string(),
        timeout_secs: 5,
        ..Default::default()
    };
    AppState::new(
        Refiner::default(),
        Some(GenerationClient::new(config).unwrap()),
        PromptStore::new(prompts, "ui-gen.md"),
    )
}

#[tokio::test]
async fn health_reports_catalog_sizes() {
    let (status, body) = send(offline_state(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["rules"], 44);
    assert_eq!(health["icons"], 0);
}

#[tokio::test]
async fn refine_endpoint_returns_repaired_module() {
    let source = r#"import { Card } from "./components/card";
export default function App() {
  return <Card><Hero /></Card>;
}
"#;
    let (status, body) = send(offline_state(), post_text("/refine", source)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(
        "import { Card } from \"@/components/ui/card\";\nimport { Box } from \"lucide-react\";\n"
    ));
    assert!(!body.contains("./components/card"));
    assert!(!body.contains("<Hero"));
    assert!(body.contains("<div"));
}

#[tokio::test]
async fn refine_endpoint_rejects_invalid_source() {
    let (status, body) = send(offline_state(), post_text("/refine", "export default (")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.starts_with("Syntax error at 1:"), "got {body}");
}

#[tokio::test]
async fn ui_gen_fails_closed_without_credentials() {
    let (status, body) = send(offline_state(), get("/ui-gen?prompt=a%20login%20form")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, GENERIC_FAILURE);

    let request = post_json("/ui-gen", json!({ "prompt": "a login form", "images": [] }));
    let (status, body) = send(offline_state(), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, GENERIC_FAILURE);
}

#[tokio::test]
async fn ui_gen_refines_generated_code() {
    let prompts = tempfile::tempdir().unwrap();
    std::fs::write(prompts.path().join("ui-gen.md"), "Write one React component.").unwrap();

    let reply = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "Here is the page.\n\n```tsx\nimport { Button } from \"./button\";\nexport default function Page() {\n  return <Button>Save</Button>;\n}\n```\n"
            }
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
    });
    let base_url = fake_completion_service(StatusCode::OK, reply).await;
    let state = generating_state(base_url, prompts.path());

    let (status, body) = send(state, get("/ui-gen?prompt=save%20button")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("import { Button } from \"@/components/ui/button\";\n"));
    assert!(!body.contains("./button"));
    assert!(!body.contains("Here is the page"));
}

#[tokio::test]
async fn ui_gen_hides_upstream_failures() {
    let prompts = tempfile::tempdir().unwrap();
    std::fs::write(prompts.path().join("ui-gen.md"), "Write one React component.").unwrap();

    let base_url = fake_completion_service(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "rate limited" } }),
    )
    .await;
    let state = generating_state(base_url, prompts.path());

    let request = post_json("/ui-gen", json!({ "prompt": "dashboard" }));
    let (status, body) = send(state, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, GENERIC_FAILURE);
}

#[tokio::test]
async fn ui_gen_requires_the_system_prompt() {
    let prompts = tempfile::tempdir().unwrap();
    let base_url = fake_completion_service(StatusCode::OK, json!({ "choices": [] })).await;
    let state = generating_state(base_url, prompts.path());

    let (status, body) = send(state, get("/ui-gen?prompt=anything")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, GENERIC_FAILURE);
}

async fn ui_gen_with_reply(content: &str) -> (StatusCode, String) {
    let prompts = tempfile::tempdir().unwrap();
    std::fs::write(prompts.path().join("ui-gen.md"), "Write one React component.").unwrap();

    let reply = json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] });
    let base_url = fake_completion_service(StatusCode::OK, reply).await;
    let state = generating_state(base_url, prompts.path());

    send(state, get("/ui-gen?prompt=card")).await
}

#[tokio::test]
async fn ui_gen_hides_parse_errors_in_generated_code() {
    let (status, body) = ui_gen_with_reply(
        "```tsx\nexport default function P() { return <Card> }\n```\n",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, GENERIC_FAILURE);
}

#[tokio::test]
async fn ui_gen_rejects_replies_with_several_code_blocks() {
    let (status, body) = ui_gen_with_reply(
        "```tsx\nexport const A = () => <Card />;\n```\n\n```tsx\nexport const B = () => <Badge />;\n```\n",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, GENERIC_FAILURE);
}
