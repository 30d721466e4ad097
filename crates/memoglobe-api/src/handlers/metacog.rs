//! Metacognition dashboard and knowledge map.

use axum::{extract::State, Json};

use memoglobe_core::{KnowledgeMapResponse, MetacogDashboard};

use crate::{ApiError, AppState, RequireAuth};

/// GET /metacog/dashboard
#[utoipa::path(get, path = "/metacog/dashboard", tag = "Metacog",
    responses(
        (status = 200, description = "Learning dashboard", body = MetacogDashboard),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn dashboard(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<MetacogDashboard>, ApiError> {
    Ok(Json(state.store.read().await.dashboard()))
}

/// GET /metacog/knowledge-map
#[utoipa::path(get, path = "/metacog/knowledge-map", tag = "Metacog",
    responses(
        (status = 200, description = "Coverage regions on the globe", body = KnowledgeMapResponse),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn knowledge_map(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<KnowledgeMapResponse>, ApiError> {
    let regions = state.store.read().await.knowledge_map();
    Ok(Json(KnowledgeMapResponse { regions }))
}
