//! # memoglobe-api
//!
//! HTTP surface of MemoGlobe: an axum router over a shared
//! [`InMemoryStore`], guarded by a bearer-token extractor.
//!
//! Every API route lives under the configured prefix (default `/v1`).
//! `GET /health` and `GET /openapi.json` sit at the root and need no token.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use memoglobe_core::InMemoryStore;

pub use auth::RequireAuth;
pub use config::{settings, Settings};
pub use error::ApiError;

use handlers::{globe, journey, metacog, notes, quests, scaffolding};

/// Shared state handed to every handler.
///
/// Reads take the store's read lock. Every mutation, including the note
/// fallback in `GET /notes/:id`, holds the write lock for its whole request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: InMemoryStore, settings: Settings) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            settings: Arc::new(settings),
        }
    }
}

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// OPENAPI
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MemoGlobe API",
        description = "Note-taking with learning analytics, anchored to places on a 3D globe"
    ),
    paths(
        notes::create_note,
        notes::list_notes,
        notes::get_note,
        notes::get_note_analysis,
        globe::list_anchors,
        globe::create_anchor,
        globe::get_anchor,
        globe::review_anchor,
        journey::list_routes,
        journey::get_route,
        quests::daily_quests,
        quests::complete_quest,
        metacog::dashboard,
        metacog::knowledge_map,
        scaffolding::trigger,
    ),
    components(schemas(
        memoglobe_core::TemplateType,
        memoglobe_core::BloomLevel,
        memoglobe_core::AnchorStrategy,
        memoglobe_core::PinColor,
        memoglobe_core::FeedbackSeverity,
        memoglobe_core::FeedbackType,
        memoglobe_core::QuestType,
        memoglobe_core::ScaffoldingLevel,
        memoglobe_core::Note,
        memoglobe_core::FeedbackCard,
        memoglobe_core::AnalysisReport,
        memoglobe_core::CreateNoteRequest,
        memoglobe_core::CreateNoteAccepted,
        memoglobe_core::GetNoteResponse,
        memoglobe_core::ListNotesResponse,
        memoglobe_core::Concept,
        memoglobe_core::Location,
        memoglobe_core::Anchor,
        memoglobe_core::ReviewEvent,
        memoglobe_core::ListAnchorsResponse,
        memoglobe_core::LocationInput,
        memoglobe_core::CreateAnchorRequest,
        memoglobe_core::CreateAnchorResponse,
        memoglobe_core::GetAnchorResponse,
        memoglobe_core::ReviewAnchorRequest,
        memoglobe_core::ReviewAnchorResponse,
        memoglobe_core::JourneyRoute,
        memoglobe_core::ListRoutesResponse,
        memoglobe_core::RouteProgress,
        memoglobe_core::GetRouteResponse,
        memoglobe_core::DailyQuest,
        memoglobe_core::DailyQuestPayload,
        memoglobe_core::CompleteQuestRequest,
        memoglobe_core::QuestCompletionResponse,
        memoglobe_core::SubjectCoverage,
        memoglobe_core::CliTrendPoint,
        memoglobe_core::MetacogDashboard,
        memoglobe_core::KnowledgeRegion,
        memoglobe_core::KnowledgeMapResponse,
        memoglobe_core::ScaffoldingTriggerRequest,
        memoglobe_core::ScaffoldingResponse,
    )),
    tags(
        (name = "Notes", description = "Note submission and analysis"),
        (name = "Globe", description = "Concepts anchored to places"),
        (name = "Journey", description = "Review routes across anchors"),
        (name = "Quests", description = "Daily learning quests"),
        (name = "Metacog", description = "Learning dashboard and knowledge map"),
        (name = "Scaffolding", description = "Learning support on demand"),
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the configured prefix as its server URL.
async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    let base = if state.settings.api_prefix.is_empty() {
        "/".to_string()
    } else {
        state.settings.api_prefix.clone()
    };
    doc.servers = Some(vec![utoipa::openapi::Server::new(base)]);
    Json(doc)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "app_name": state.settings.app_name,
        "environment": state.settings.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    memoglobe_core::Error::NotFound(uri.path().to_string()).into()
}

/// A handler panic becomes a JSON 500 instead of a dropped connection.
fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    ApiError::Internal("Internal server error".to_string()).into_response()
}

// =============================================================================
// ROUTER
// =============================================================================

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(notes::create_note).get(notes::list_notes))
        .route("/notes/:note_id", get(notes::get_note))
        .route("/notes/:note_id/analysis", get(notes::get_note_analysis))
        .route(
            "/globe/anchors",
            get(globe::list_anchors).post(globe::create_anchor),
        )
        .route("/globe/anchors/:anchor_id", get(globe::get_anchor))
        .route("/globe/anchors/:anchor_id/review", post(globe::review_anchor))
        .route("/journey/routes", get(journey::list_routes))
        .route("/journey/routes/:route_id", get(journey::get_route))
        .route("/quests/daily", get(quests::daily_quests))
        .route("/quests/:quest_id/complete", post(quests::complete_quest))
        .route("/metacog/dashboard", get(metacog::dashboard))
        .route("/metacog/knowledge-map", get(metacog::knowledge_map))
        .route("/scaffolding/trigger", post(scaffolding::trigger))
}

/// Build the full application router with middleware.
pub fn app(state: AppState) -> Router {
    let prefix = state.settings.api_prefix.clone();
    let allowed_origins = state.settings.allowed_origins();

    let router = Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json));
    let router = if prefix.is_empty() {
        router.merge(api_routes())
    } else {
        router.nest(&prefix, api_routes())
    };

    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};

    #[tokio::test]
    async fn test_panic_response_is_json_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Internal server error");
    }

    #[tokio::test]
    async fn test_panicking_route_is_caught() {
        use tower::ServiceExt;

        async fn explode() -> &'static str {
            panic!("handler failure")
        }
        let router = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(panic_response));
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/explode")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
