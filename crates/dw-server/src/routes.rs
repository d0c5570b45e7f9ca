use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use dw_generate::GenerationRequest;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{GenerationFailure, Result, ServerError};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ui-gen", get(ui_gen_query).post(ui_gen_json))
        .route("/refine", post(refine))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct UiGenQuery {
    #[serde(default)]
    pub prompt: String,
    /// Single screenshot URL
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UiGenBody {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rules: usize,
    pub icons: usize,
}

async fn ui_gen_query(
    State(state): State<AppState>,
    Query(query): Query<UiGenQuery>,
) -> std::result::Result<String, GenerationFailure> {
    let images = query.image.into_iter().collect();
    generate_ui(&state, query.prompt, images)
        .await
        .map_err(GenerationFailure)
}

async fn ui_gen_json(
    State(state): State<AppState>,
    Json(body): Json<UiGenBody>,
) -> std::result::Result<String, GenerationFailure> {
    generate_ui(&state, body.prompt, body.images)
        .await
        .map_err(GenerationFailure)
}

/// prompt -> generation -> refinement. Every stage error surfaces as the
/// same opaque 500 to the caller.
async fn generate_ui(state: &AppState, prompt: String, images: Vec<String>) -> Result<String> {
    let generator = state
        .generator
        .as_ref()
        .ok_or(ServerError::GeneratorUnavailable)?;

    let system_prompt = state.prompts.load_system_prompt().await?;
    let request = GenerationRequest {
        system_prompt,
        prompt,
        images,
    };

    let generation = generator.generate(&request).await?;
    let refined = state.refiner.refine(&generation.code)?;

    info!(
        total_tokens = generation.usage.total_tokens,
        imports = refined.resolution.imports_by_module.len(),
        fallbacks = refined.resolution.fallback_names.len(),
        "generated component"
    );

    Ok(refined.code)
}

async fn refine(State(state): State<AppState>, source: String) -> Result<String> {
    let refined = state.refiner.refine(&source)?;
    info!(
        tags = refined.classification.used_tag_names.len(),
        rewritten = refined.rewritten_tags,
        "refined submitted module"
    );
    Ok(refined.code)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules: state.refiner.catalog().len(),
        icons: state.refiner.icons().len(),
    })
}
