use super::*;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::error::{failure_message, LookupError, GENERATION_FAILURE_MESSAGE};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{fetcher::DefinitionFetcher, fetcher::DefinitionSource, prompt::build_prompt};

#[derive(Debug, Clone)]
struct CapturedRequest {
    model_action: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn handle_generate(
    State(state): State<StubState>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    state.captured.lock().await.push(CapturedRequest {
        model_action,
        api_key,
        body,
    });
    (state.status, state.body.clone())
}

async fn spawn_stub_server(
    status: StatusCode,
    body: impl Into<String>,
) -> Result<(String, Arc<Mutex<Vec<CapturedRequest>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        body: body.into(),
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/:model_action", post(handle_generate))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), captured))
}

fn settings_for(base_url: &str) -> Settings {
    Settings {
        api_key: Some("test-key".to_string()),
        api_base_url: base_url.to_string(),
        ..Settings::default()
    }
}

fn text_response(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn returns_first_candidate_text_unmodified() {
    let text = "\n  1. 📖 정의:\n핀테크는 금융(Finance)과 기술(Technology)의 합성어입니다.  \n";
    let (base_url, captured) = spawn_stub_server(StatusCode::OK, text_response(text))
        .await
        .expect("spawn server");
    let client = GeminiClient::new(&settings_for(&base_url)).expect("client");

    let prompt = build_prompt("핀테크");
    let generated = client.generate(&prompt).await.expect("generate");
    assert_eq!(generated, text);

    let captured = captured.lock().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].model_action, "gemini-2.5-flash:generateContent");
    assert_eq!(captured[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(captured[0].body["contents"][0]["role"], "user");
    assert_eq!(captured[0].body["contents"][0]["parts"][0]["text"], prompt);
}

#[tokio::test]
async fn configured_model_selects_endpoint() {
    let (base_url, captured) = spawn_stub_server(StatusCode::OK, text_response("ok"))
        .await
        .expect("spawn server");
    let settings = Settings {
        model: "gemini-custom".to_string(),
        ..settings_for(&format!("{base_url}/"))
    };
    let client = GeminiClient::new(&settings).expect("client");
    assert_eq!(client.model().as_str(), "gemini-custom");

    client.generate("prompt").await.expect("generate");

    assert_eq!(
        captured.lock().await[0].model_action,
        "gemini-custom:generateContent"
    );
}

#[tokio::test]
async fn prefixed_model_id_targets_same_endpoint() {
    let (base_url, captured) = spawn_stub_server(StatusCode::OK, text_response("ok"))
        .await
        .expect("spawn server");
    let settings = Settings {
        model: "models/gemini-2.5-flash".to_string(),
        ..settings_for(&base_url)
    };
    let client = GeminiClient::new(&settings).expect("client");

    client.generate("prompt").await.expect("generate");

    assert_eq!(
        captured.lock().await[0].model_action,
        "gemini-2.5-flash:generateContent"
    );
}

#[test]
fn endpoint_strips_models_prefix() {
    let plain = generate_endpoint(
        "https://generativelanguage.googleapis.com",
        &ModelId("gemini-2.5-flash".to_string()),
    )
    .expect("endpoint");
    let prefixed = generate_endpoint(
        "https://generativelanguage.googleapis.com",
        &ModelId("models/gemini-2.5-flash".to_string()),
    )
    .expect("endpoint");

    assert_eq!(
        plain.as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
    assert_eq!(prefixed, plain);
}

#[test]
fn endpoint_escapes_model_id_into_one_segment() {
    let endpoint = generate_endpoint(
        "https://generativelanguage.googleapis.com",
        &ModelId("gemini?x#y".to_string()),
    )
    .expect("endpoint");

    assert_eq!(endpoint.query(), None);
    assert_eq!(endpoint.fragment(), None);
    assert_eq!(
        endpoint.path_segments().map(|segments| segments.count()),
        Some(3)
    );
    assert!(endpoint.path().ends_with(":generateContent"));
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let endpoint = generate_endpoint(
        "http://proxy.local/gemini/",
        &ModelId("gemini-2.5-flash".to_string()),
    )
    .expect("endpoint");

    assert_eq!(
        endpoint.as_str(),
        "http://proxy.local/gemini/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[tokio::test]
async fn error_status_is_reported_with_detail() {
    let body = json!({
        "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
    })
    .to_string();
    let (base_url, _captured) = spawn_stub_server(StatusCode::FORBIDDEN, body)
        .await
        .expect("spawn server");
    let client = GeminiClient::new(&settings_for(&base_url)).expect("client");

    let err = client.generate("prompt").await.expect_err("must fail");
    let rendered = err.to_string();
    assert!(rendered.contains("403"), "{rendered}");
    assert!(rendered.contains("API key not valid"), "{rendered}");
    assert!(rendered.contains("PERMISSION_DENIED"), "{rendered}");
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let (base_url, _captured) = spawn_stub_server(StatusCode::OK, "not json at all")
        .await
        .expect("spawn server");
    let client = GeminiClient::new(&settings_for(&base_url)).expect("client");

    assert!(client.generate("prompt").await.is_err());
}

#[tokio::test]
async fn response_without_candidates_is_an_error() {
    let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let (base_url, _captured) = spawn_stub_server(StatusCode::OK, body)
        .await
        .expect("spawn server");
    let client = GeminiClient::new(&settings_for(&base_url)).expect("client");

    let err = client.generate("prompt").await.expect_err("must fail");
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn unreachable_service_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let client = GeminiClient::new(&settings_for(&format!("http://{addr}"))).expect("client");

    assert!(client.generate("prompt").await.is_err());
}

#[tokio::test]
async fn fetcher_hides_http_failures_behind_safe_message() {
    let (base_url, captured) =
        spawn_stub_server(StatusCode::INTERNAL_SERVER_ERROR, "backend exploded")
            .await
            .expect("spawn server");
    let client = GeminiClient::new(&settings_for(&base_url)).expect("client");
    let fetcher = DefinitionFetcher::new(client);

    let err = fetcher.fetch("핀테크").await.expect_err("must fail");

    assert_eq!(failure_message(&err), GENERATION_FAILURE_MESSAGE);
    assert!(!format!("{err:#}").contains("backend exploded"));
    assert_eq!(captured.lock().await.len(), 1);
}

#[test]
fn missing_api_key_fails_construction() {
    let err = GeminiClient::new(&Settings::default()).expect_err("must fail");
    assert_eq!(
        err.downcast_ref::<LookupError>(),
        Some(&LookupError::ConfigurationMissing { setting: "API_KEY" })
    );
    assert!(crate::connect(&Settings::default()).is_err());
}

#[test]
fn invalid_base_url_fails_construction() {
    let settings = settings_for("not a url");
    assert!(GeminiClient::new(&settings).is_err());
}

#[test]
fn debug_output_hides_api_key() {
    let client = GeminiClient::new(&settings_for("http://127.0.0.1:9")).expect("client");
    let rendered = format!("{client:?}");
    assert!(!rendered.contains("test-key"));
    assert!(rendered.contains("gemini-2.5-flash"));
}
