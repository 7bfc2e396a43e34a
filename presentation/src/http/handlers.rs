//! Route handlers

use crate::http::dto::{AssistantRequestBody, HealthResponse, ModelStatus, ModelsResponse};
use crate::http::error::ApiError;
use crate::http::state::AppState;
use assistant_application::NoProgress;
use assistant_domain::{AssistantResponse, ModelRole};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, error, warn};

/// `POST /ai-assistant`
///
/// `topic` and `question` are trimmed before validation, and the response
/// echoes the trimmed values. A field counts as too short when fewer than
/// three characters remain, so `"  a"` is rejected with 422 and
/// `" ocean currents "` comes back as `"ocean currents"`.
pub async fn run_assistant(
    State(state): State<AppState>,
    payload: Result<Json<AssistantRequestBody>, JsonRejection>,
) -> Result<Json<AssistantResponse>, ApiError> {
    let Json(body) = payload.inspect_err(|e| debug!("Rejected body: {}", e))?;
    let request = body.into_request().inspect_err(|e| debug!("Rejected request: {}", e))?;

    let _permit = state.acquire_permit().await?;
    let response = state
        .use_case
        .execute_cancellable(request, &NoProgress, &state.shutdown)
        .await
        .inspect_err(|e| {
            if e.is_cancelled() {
                warn!("{}", e);
            } else {
                error!("Assistant request failed: {}", e);
            }
        })?;

    Ok(Json(response))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        models_loaded: state.registry().loaded_roles(),
    })
}

/// `GET /models`
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let registry = state.registry();
    let models = ModelRole::ALL
        .into_iter()
        .map(|role| ModelStatus {
            role,
            model: registry.catalog().model_for(role).to_string(),
            task: role.task().to_string(),
            loaded: registry.is_loaded(role),
        })
        .collect();
    Json(ModelsResponse { models })
}
