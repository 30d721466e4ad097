//! Fixed placeholder content served until real analytics exist.

use chrono::{DateTime, Utc};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use uuid::Uuid;

use crate::defaults;
use crate::models::*;

/// Analysis attached to every note.
pub fn analysis() -> AnalysisReport {
    AnalysisReport {
        srs_score: defaults::SEED_SRS_SCORE,
        kcs_score: defaults::SEED_KCS_SCORE,
        bloom_distribution: BloomLevel::distribution([0.30, 0.25, 0.20, 0.15, 0.07, 0.03]),
        cli_score: defaults::SEED_CLI_SCORE,
        dag_violations: vec!["Linear Algebra".to_string(), "Calculus II".to_string()],
        uncovered_concepts: vec![
            "Wave Function".to_string(),
            "Quantum Entanglement".to_string(),
            "Superposition".to_string(),
        ],
        redundant_with: Vec::new(),
        feedback_cards: vec![FeedbackCard {
            card_type: FeedbackType::GapAlert,
            severity: FeedbackSeverity::Warning,
            message: "3 concepts in Physics remain uncovered.".to_string(),
            action: HashMap::from([(
                "suggest".to_string(),
                json!("Review Wave Function and Superposition"),
            )]),
        }],
    }
}

/// The historical anchor every store starts with.
pub fn anchor(now: DateTime<Utc>) -> Anchor {
    Anchor {
        id: Uuid::new_v4(),
        concept: Concept {
            id: Uuid::new_v4(),
            name: "Quantum Mechanics".to_string(),
            aliases: vec!["양자역학".to_string()],
            domain: "physics".to_string(),
            bloom_level: BloomLevel::Understand,
        },
        location: Location {
            id: Uuid::new_v4(),
            name: "Niels Bohr Institute".to_string(),
            description: "Birthplace of quantum mechanics.".to_string(),
            latitude: 55.6961,
            longitude: 12.5713,
            country: "Denmark".to_string(),
            location_type: "laboratory".to_string(),
            image_url: String::new(),
            street_view_available: true,
            metadata: HashMap::from([("city".to_string(), json!("Copenhagen"))]),
        },
        anchor_strategy: AnchorStrategy::Historical,
        strength: 0.82,
        pin_color: PinColor::Mastered,
        review_count: 4,
        last_reviewed: Some(now),
    }
}

/// Content of the generic note handed out for unknown note ids.
pub fn fallback_note_content() -> HashMap<String, JsonValue> {
    HashMap::from([
        ("cue_column".to_string(), json!([])),
        ("main_notes".to_string(), json!("")),
        ("summary".to_string(), json!("")),
    ])
}

pub fn dashboard() -> MetacogDashboard {
    MetacogDashboard {
        bloom_distribution: BloomLevel::distribution([0.25, 0.22, 0.20, 0.18, 0.10, 0.05]),
        kcs_by_subject: vec![
            SubjectCoverage {
                subject: "Physics".to_string(),
                coverage_pct: 0.72,
                gap_count: 5,
            },
            SubjectCoverage {
                subject: "Biology".to_string(),
                coverage_pct: 0.95,
                gap_count: 1,
            },
        ],
        cli_trend: vec![
            CliTrendPoint {
                week: "W1".to_string(),
                avg_cli: 0.35,
            },
            CliTrendPoint {
                week: "W2".to_string(),
                avg_cli: 0.42,
            },
            CliTrendPoint {
                week: "W3".to_string(),
                avg_cli: 0.48,
            },
        ],
        evolution_index: defaults::DASHBOARD_EVOLUTION_INDEX,
        streak: defaults::DASHBOARD_STREAK,
    }
}

pub fn knowledge_regions() -> Vec<KnowledgeRegion> {
    vec![
        // Copenhagen
        KnowledgeRegion {
            latitude: 55.6961,
            longitude: 12.5713,
            radius: 130.0,
            coverage_pct: 0.72,
            concept_count: 5,
        },
        // Athens
        KnowledgeRegion {
            latitude: 37.9715,
            longitude: 23.7267,
            radius: 100.0,
            coverage_pct: 0.60,
            concept_count: 8,
        },
    ]
}
