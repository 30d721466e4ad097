use axum::Json;
use tracing::debug;

use memoglobe_core::{scaffolding, ScaffoldingResponse, ScaffoldingTriggerRequest};

use crate::{ApiError, RequireAuth};

/// Ask for learning support on a concept.
///
/// POST /scaffolding/trigger
#[utoipa::path(post, path = "/scaffolding/trigger", tag = "Scaffolding",
    request_body = ScaffoldingTriggerRequest,
    responses(
        (status = 200, description = "Scaffolding level and content", body = ScaffoldingResponse),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn trigger(
    _auth: RequireAuth,
    Json(req): Json<ScaffoldingTriggerRequest>,
) -> Result<Json<ScaffoldingResponse>, ApiError> {
    let response = scaffolding::trigger(req.trigger_reason);
    debug!(
        concept_id = %req.concept_id,
        reason = ?req.trigger_reason,
        level = ?response.level,
        "Scaffolding triggered"
    );
    Ok(Json(response))
}
