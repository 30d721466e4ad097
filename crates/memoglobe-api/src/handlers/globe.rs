//! Geo anchor handlers: list, create, inspect, review.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use memoglobe_core::{
    validate_uuid, AnchorStrategy, CreateAnchorRequest, CreateAnchorResponse, Error,
    GetAnchorResponse, ListAnchorsResponse, RecallQuality, ReviewAnchorRequest,
    ReviewAnchorResponse,
};

use crate::{ApiError, AppState, RequireAuth};

/// GET /globe/anchors
#[utoipa::path(get, path = "/globe/anchors", tag = "Globe",
    responses(
        (status = 200, description = "All anchors in creation order", body = ListAnchorsResponse),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn list_anchors(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ListAnchorsResponse>, ApiError> {
    let anchors = state.store.read().await.list_anchors().to_vec();
    Ok(Json(ListAnchorsResponse { anchors }))
}

/// Pin a concept to a place of the student's choosing.
///
/// POST /globe/anchors
#[utoipa::path(post, path = "/globe/anchors", tag = "Globe",
    request_body = CreateAnchorRequest,
    responses(
        (status = 201, description = "Anchor created", body = CreateAnchorResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Unsupported anchor strategy")))]
pub async fn create_anchor(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateAnchorRequest>,
) -> Result<(StatusCode, Json<CreateAnchorResponse>), ApiError> {
    if let Some(strategy) = req.anchor_strategy {
        if strategy != AnchorStrategy::Personal {
            return Err(Error::InvalidInput(
                "only personal anchors can be created".to_string(),
            )
            .into());
        }
    }

    let anchor = state.store.write().await.create_personal_anchor(
        req.concept_id,
        req.location.latitude,
        req.location.longitude,
        req.location.name,
    );

    info!(anchor_id = %anchor.id, concept_id = %req.concept_id, "Anchor created");
    Ok((StatusCode::CREATED, Json(CreateAnchorResponse { anchor })))
}

/// GET /globe/anchors/:anchor_id
#[utoipa::path(get, path = "/globe/anchors/{anchor_id}", tag = "Globe",
    params(("anchor_id" = String, Path, description = "Anchor id")),
    responses(
        (status = 200, description = "Anchor with details and review history", body = GetAnchorResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Anchor not found"),
        (status = 422, description = "Malformed anchor id")))]
pub async fn get_anchor(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(anchor_id): Path<String>,
) -> Result<Json<GetAnchorResponse>, ApiError> {
    let anchor_id = validate_uuid(&anchor_id, "anchor_id")?;
    let store = state.store.read().await;
    let anchor = store
        .anchor(anchor_id)
        .cloned()
        .ok_or(Error::AnchorNotFound(anchor_id))?;

    Ok(Json(GetAnchorResponse {
        concept_detail: anchor.concept.clone(),
        location_detail: anchor.location.clone(),
        review_history: store.review_history(anchor_id),
        anchor,
    }))
}

/// Record how well the student recalled an anchor.
///
/// POST /globe/anchors/:anchor_id/review
#[utoipa::path(post, path = "/globe/anchors/{anchor_id}/review", tag = "Globe",
    params(("anchor_id" = String, Path, description = "Anchor id")),
    request_body = ReviewAnchorRequest,
    responses(
        (status = 200, description = "Updated strength and next review time", body = ReviewAnchorResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Anchor not found"),
        (status = 422, description = "recall_quality outside 1-5 or malformed anchor id")))]
pub async fn review_anchor(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(anchor_id): Path<String>,
    Json(req): Json<ReviewAnchorRequest>,
) -> Result<Json<ReviewAnchorResponse>, ApiError> {
    let anchor_id = validate_uuid(&anchor_id, "anchor_id")?;
    let quality = RecallQuality::new(req.recall_quality)?;

    let response = state
        .store
        .write()
        .await
        .review_anchor(anchor_id, quality)
        .ok_or(Error::AnchorNotFound(anchor_id))?;

    info!(
        anchor_id = %anchor_id,
        recall_quality = quality.get(),
        strength = response.updated_strength,
        "Anchor reviewed"
    );
    Ok(Json(response))
}
