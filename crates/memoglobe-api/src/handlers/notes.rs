//! Note submission, listing, and analysis handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use memoglobe_core::{
    validate_uuid, AnalysisReport, CreateNoteAccepted, CreateNoteRequest, Error,
    GetNoteResponse, ListNotesResponse, Pagination,
};

use crate::{ApiError, AppState, RequireAuth};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// Exact subject to filter on
    pub subject: Option<String>,
    /// 1-based page number, default 1
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
    /// Page size 1-100, default 20
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

/// Submit a note for analysis.
///
/// POST /notes
#[utoipa::path(post, path = "/notes", tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 202, description = "Accepted for analysis", body = CreateNoteAccepted),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn create_note(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<CreateNoteAccepted>), ApiError> {
    let note = state
        .store
        .write()
        .await
        .create_note(req.template_type, req.subject, req.content);

    info!(
        note_id = %note.id,
        user_id = %user.user_id,
        session_number = note.session_number,
        "Note created"
    );
    Ok((
        StatusCode::ACCEPTED,
        Json(CreateNoteAccepted::processing(note.id)),
    ))
}

/// List notes, newest first.
///
/// GET /notes
#[utoipa::path(get, path = "/notes", tag = "Notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Page of notes", body = ListNotesResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Page or limit out of range")))]
pub async fn list_notes(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<ListNotesResponse>, ApiError> {
    let pagination = Pagination::from_query(query.page.as_deref(), query.limit.as_deref())?;
    let notes = state.store.read().await.list_notes(query.subject.as_deref());

    Ok(Json(ListNotesResponse {
        total: notes.len(),
        notes: pagination.slice(&notes),
        page: pagination.page,
    }))
}

/// Fetch a note with its analysis. An unknown id yields a freshly created
/// generic note rather than a 404.
///
/// GET /notes/:note_id
#[utoipa::path(get, path = "/notes/{note_id}", tag = "Notes",
    params(("note_id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "Note and analysis", body = GetNoteResponse),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn get_note(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<GetNoteResponse>, ApiError> {
    let mut store = state.store.write().await;
    let note = store.note_or_fallback(&note_id);
    let analysis = store.get_analysis(note.id);
    Ok(Json(GetNoteResponse { note, analysis }))
}

/// Fetch the analysis report for an existing note.
///
/// GET /notes/:note_id/analysis
#[utoipa::path(get, path = "/notes/{note_id}/analysis", tag = "Notes",
    params(("note_id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "Analysis report", body = AnalysisReport),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Note not found"),
        (status = 422, description = "Malformed note id")))]
pub async fn get_note_analysis(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let note_id = validate_uuid(&note_id, "note_id")?;
    let store = state.store.read().await;
    if !store.contains_note(note_id) {
        return Err(Error::NoteNotFound(note_id).into());
    }
    Ok(Json(store.get_analysis(note_id)))
}
