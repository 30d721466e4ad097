//! Daily quest handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use memoglobe_core::{
    validate_uuid, CompleteQuestRequest, DailyQuestPayload, Error, QuestCompletionResponse,
};

use crate::{ApiError, AppState, RequireAuth};

/// GET /quests/daily
#[utoipa::path(get, path = "/quests/daily", tag = "Quests",
    responses(
        (status = 200, description = "Today's quests", body = DailyQuestPayload),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn daily_quests(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DailyQuestPayload>, ApiError> {
    Ok(Json(state.store.read().await.daily_quests()))
}

/// Complete a quest by pointing at the note written for it.
///
/// POST /quests/:quest_id/complete
#[utoipa::path(post, path = "/quests/{quest_id}/complete", tag = "Quests",
    params(("quest_id" = String, Path, description = "Quest id")),
    request_body = CompleteQuestRequest,
    responses(
        (status = 200, description = "Quest completed", body = QuestCompletionResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Quest or note not found"),
        (status = 422, description = "Malformed quest id")))]
pub async fn complete_quest(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(quest_id): Path<String>,
    Json(req): Json<CompleteQuestRequest>,
) -> Result<Json<QuestCompletionResponse>, ApiError> {
    let quest_id = validate_uuid(&quest_id, "quest_id")?;
    let mut store = state.store.write().await;

    if !store.daily_quests().quests.iter().any(|q| q.id == quest_id) {
        return Err(Error::QuestNotFound(quest_id).into());
    }
    if !store.contains_note(req.note_id) {
        return Err(Error::NoteNotFound(req.note_id).into());
    }

    let quest = store
        .complete_quest(quest_id)
        .ok_or(Error::QuestNotFound(quest_id))?;

    info!(
        quest_id = %quest_id,
        note_id = %req.note_id,
        user_id = %user.user_id,
        "Quest completed"
    );
    Ok(Json(QuestCompletionResponse::reward(quest)))
}
