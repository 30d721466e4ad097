//! Centralized default constants for MemoGlobe.
//!
//! Every fixed value the API hands out (placeholder scores, rewards, review
//! spacing, seed data) lives here so the store and the handlers agree on it.

use uuid::Uuid;

// =============================================================================
// AUTH
// =============================================================================

/// Identity every accepted bearer token maps to until a real identity
/// provider is wired in.
pub const DEV_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_a000_0000_0000_0001);

// =============================================================================
// NOTES
// =============================================================================

/// Concepts attached to every new note.
pub const PLACEHOLDER_CONCEPTS: [&str; 2] = ["Placeholder Concept A", "Placeholder Concept B"];

/// Seconds the client is told to wait before asking for a note's analysis.
pub const ANALYSIS_ETA_SECONDS: u32 = 3;

/// Subject of the generic note synthesized for unknown note ids.
pub const FALLBACK_NOTE_SUBJECT: &str = "General";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page number for note listings.
pub const PAGE: i64 = 1;

/// Default page size for note listings.
pub const PAGE_LIMIT: i64 = 20;

/// Largest page size a caller may request.
pub const PAGE_LIMIT_MAX: i64 = 100;

// =============================================================================
// ANCHOR REVIEW
// =============================================================================

/// Lowest strength an anchor can be reviewed down to.
pub const STRENGTH_MIN: f64 = 0.2;

/// Highest strength an anchor can be reviewed up to.
pub const STRENGTH_MAX: f64 = 1.0;

/// Strength change per recall-quality point away from the neutral score.
pub const STRENGTH_STEP: f64 = 0.03;

/// Recall quality that leaves strength unchanged.
pub const NEUTRAL_RECALL_QUALITY: u8 = 3;

/// Recall quality reported for anchors with no recorded reviews.
pub const SYNTHETIC_RECALL_QUALITY: u8 = 4;

/// Days until the next review, indexed by recall quality 1..=5.
pub const REVIEW_SPACING_DAYS: [(u8, i64); 5] = [(1, 1), (2, 1), (3, 3), (4, 7), (5, 14)];

/// Spacing used for any recall quality outside the table.
pub const REVIEW_SPACING_FALLBACK_DAYS: i64 = 1;

// =============================================================================
// JOURNEY & QUESTS
// =============================================================================

/// Estimated walking time for the journey route.
pub const ROUTE_ESTIMATED_MINUTES: u32 = 45;

/// Number of quests handed out per day.
pub const DAILY_QUEST_COUNT: usize = 3;

/// XP granted for completing a quest.
pub const QUEST_XP_REWARD: u32 = 50;

/// Evolution index gained for completing a quest.
pub const QUEST_EVOLUTION_DELTA: f64 = 0.02;

// =============================================================================
// PLACEHOLDER ANALYTICS
// =============================================================================

/// Spaced-repetition score reported for every note.
pub const SEED_SRS_SCORE: f64 = 0.08;

/// Knowledge-coverage score reported for every note.
pub const SEED_KCS_SCORE: f64 = 0.72;

/// Cognitive-load index reported for every note.
pub const SEED_CLI_SCORE: f64 = 0.45;

/// Evolution index shown on the dashboard.
pub const DASHBOARD_EVOLUTION_INDEX: f64 = 0.68;

/// Study streak shown on the dashboard.
pub const DASHBOARD_STREAK: u32 = 7;

// =============================================================================
// SERVER
// =============================================================================

/// Application name reported by the API.
pub const APP_NAME: &str = "MemoGlobe API";

/// Deployment environment name.
pub const ENVIRONMENT: &str = "development";

/// Path prefix the API routes are mounted under.
pub const API_PREFIX: &str = "/v1";

/// Browser origin allowed by default (the web client dev server).
pub const CORS_ORIGIN: &str = "http://localhost:3000";

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;
