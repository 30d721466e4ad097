//! Core data models for MemoGlobe.
//!
//! Entities held by the in-memory store plus the request/response contracts
//! of the HTTP API. Field names are the wire names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::defaults;

/// Fraction of study time per Bloom level. Fractions are not required to sum
/// to 1.
pub type BloomDistribution = BTreeMap<BloomLevel, f64>;

// =============================================================================
// ENUMS
// =============================================================================

/// Note layout chosen by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Cornell,
    Zettelkasten,
    Outline,
    ConceptMap,
}

/// Bloom's taxonomy levels, ordered from lowest to highest cognitive skill.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BloomLevel {
    Remember,
    #[default]
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    /// All levels in ascending order.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];

    /// Build a distribution from fractions given in ascending level order.
    pub fn distribution(fractions: [f64; 6]) -> BloomDistribution {
        Self::ALL.into_iter().zip(fractions).collect()
    }
}

/// How a concept got tied to its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStrategy {
    Historical,
    Cultural,
    Personal,
}

/// Globe pin category. Serialized by name; the client picks the colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PinColor {
    Mastered,
    Gap,
    Review,
    Path,
    Personal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    GapAlert,
    RedundancyWarning,
    BloomImbalance,
    CognitiveOverload,
    GrowthReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    GapReview,
    BloomPush,
    NewExplore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldingLevel {
    Hint,
    Decompose,
    Simplify,
}

/// Why the client asked for scaffolding. Unrecognised reasons deserialize
/// to [`TriggerReason::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    CliOverload,
    ZpdNotReady,
    StudentRequest,
    #[serde(other)]
    Other,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A submitted study note.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub template_type: TemplateType,
    pub subject: String,
    /// Template-specific free-form fields.
    #[schema(value_type = Object)]
    pub content: HashMap<String, JsonValue>,
    pub extracted_concepts: Vec<String>,
    /// 1-based position of this note in the store's creation sequence.
    pub session_number: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeedbackCard {
    #[serde(rename = "type")]
    pub card_type: FeedbackType,
    pub severity: FeedbackSeverity,
    pub message: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub action: HashMap<String, JsonValue>,
}

/// Learning analytics computed for a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalysisReport {
    pub srs_score: f64,
    pub kcs_score: f64,
    #[schema(value_type = Object)]
    pub bloom_distribution: BloomDistribution,
    pub cli_score: f64,
    pub dag_violations: Vec<String>,
    pub uncovered_concepts: Vec<String>,
    pub redundant_with: Vec<Uuid>,
    pub feedback_cards: Vec<FeedbackCard>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    pub template_type: TemplateType,
    pub subject: String,
    #[schema(value_type = Object)]
    pub content: HashMap<String, JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteAccepted {
    pub note_id: Uuid,
    pub status: String,
    pub analysis_eta_seconds: u32,
}

impl CreateNoteAccepted {
    /// Acknowledge a note whose analysis is still being produced.
    pub fn processing(note_id: Uuid) -> Self {
        Self {
            note_id,
            status: "processing".to_string(),
            analysis_eta_seconds: defaults::ANALYSIS_ETA_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GetNoteResponse {
    pub note: Note,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
    /// Count of all notes matching the subject filter, across every page.
    pub total: usize,
    pub page: i64,
}

// =============================================================================
// GLOBE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Concept {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default)]
    pub bloom_level: BloomLevel,
}

fn default_domain() -> String {
    "general".to_string()
}

/// A point on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "type", default = "default_location_type")]
    pub location_type: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub street_view_available: bool,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: HashMap<String, JsonValue>,
}

fn default_location_type() -> String {
    "landmark".to_string()
}

/// A concept bound to a place, with its recall strength.
///
/// Concept and location are embedded copies, never shared between anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Anchor {
    pub id: Uuid,
    pub concept: Concept,
    pub location: Location,
    pub anchor_strategy: AnchorStrategy,
    /// Recall strength, kept within [0.2, 1.0] by reviews.
    pub strength: f64,
    pub pin_color: PinColor,
    #[serde(default)]
    pub review_count: u32,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Anchor {
    /// Strength after one review of the given quality.
    pub fn reviewed_strength(strength: f64, recall_quality: u8) -> f64 {
        let delta = (f64::from(recall_quality) - f64::from(defaults::NEUTRAL_RECALL_QUALITY))
            * defaults::STRENGTH_STEP;
        (strength + delta).clamp(defaults::STRENGTH_MIN, defaults::STRENGTH_MAX)
    }

    /// Apply one review: adjust strength, bump the count, stamp the time.
    pub fn apply_review(&mut self, recall_quality: u8, at: DateTime<Utc>) -> f64 {
        self.strength = Self::reviewed_strength(self.strength, recall_quality);
        self.review_count += 1;
        self.last_reviewed = Some(at);
        self.strength
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReviewEvent {
    pub timestamp: DateTime<Utc>,
    pub recall_quality: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListAnchorsResponse {
    pub anchors: Vec<Anchor>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct LocationInput {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateAnchorRequest {
    pub concept_id: Uuid,
    pub location: LocationInput,
    /// Only `personal` may be requested; omitted means `personal`.
    #[serde(default)]
    pub anchor_strategy: Option<AnchorStrategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateAnchorResponse {
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GetAnchorResponse {
    pub anchor: Anchor,
    pub concept_detail: Concept,
    pub location_detail: Location,
    pub review_history: Vec<ReviewEvent>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ReviewAnchorRequest {
    /// 1 (forgot) to 5 (perfect recall).
    pub recall_quality: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReviewAnchorResponse {
    pub updated_strength: f64,
    pub next_review_at: DateTime<Utc>,
}

// =============================================================================
// JOURNEY & QUEST TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct JourneyRoute {
    pub id: Uuid,
    pub estimated_minutes: u32,
    pub bloom_progression: Vec<BloomLevel>,
    /// Anchor ids in visiting order.
    pub stops: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListRoutesResponse {
    pub routes: Vec<JourneyRoute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteProgress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GetRouteResponse {
    pub route: JourneyRoute,
    pub stops: Vec<Anchor>,
    pub progress: RouteProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DailyQuest {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub concept_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub bloom_target: Option<BloomLevel>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DailyQuestPayload {
    pub date: NaiveDate,
    pub quests: Vec<DailyQuest>,
    pub journey_route: Option<JourneyRoute>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CompleteQuestRequest {
    pub note_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestCompletionResponse {
    pub quest: DailyQuest,
    pub xp_earned: u32,
    pub evolution_index_delta: f64,
}

impl QuestCompletionResponse {
    /// Fixed reward for a completed quest.
    pub fn reward(quest: DailyQuest) -> Self {
        Self {
            quest,
            xp_earned: defaults::QUEST_XP_REWARD,
            evolution_index_delta: defaults::QUEST_EVOLUTION_DELTA,
        }
    }
}

// =============================================================================
// METACOGNITION TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubjectCoverage {
    pub subject: String,
    pub coverage_pct: f64,
    pub gap_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CliTrendPoint {
    pub week: String,
    pub avg_cli: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetacogDashboard {
    #[schema(value_type = Object)]
    pub bloom_distribution: BloomDistribution,
    pub kcs_by_subject: Vec<SubjectCoverage>,
    pub cli_trend: Vec<CliTrendPoint>,
    pub evolution_index: f64,
    pub streak: u32,
}

/// A circular area of the globe and how well the student covers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct KnowledgeRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub coverage_pct: f64,
    pub concept_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct KnowledgeMapResponse {
    pub regions: Vec<KnowledgeRegion>,
}

// =============================================================================
// SCAFFOLDING TYPES
// =============================================================================

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ScaffoldingTriggerRequest {
    pub concept_id: Uuid,
    #[schema(value_type = String, example = "cli_overload")]
    pub trigger_reason: TriggerReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScaffoldingResponse {
    pub level: ScaffoldingLevel,
    #[schema(value_type = Object)]
    pub content: JsonValue,
}

// =============================================================================
// AUTH TYPES
// =============================================================================

/// The caller behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub token: String,
}
