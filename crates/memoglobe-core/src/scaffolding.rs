//! Learning-support lookup: which scaffolding level a struggle reason calls
//! for, and the fixed content offered at each level.

use serde_json::{json, Value as JsonValue};

use crate::models::{ScaffoldingLevel, ScaffoldingResponse, TemplateType, TriggerReason};

/// Level for a trigger reason. Reasons without a dedicated level get a hint.
pub fn level_for(reason: TriggerReason) -> ScaffoldingLevel {
    match reason {
        TriggerReason::CliOverload => ScaffoldingLevel::Simplify,
        TriggerReason::ZpdNotReady => ScaffoldingLevel::Decompose,
        TriggerReason::StudentRequest | TriggerReason::Other => ScaffoldingLevel::Hint,
    }
}

pub fn content_for(level: ScaffoldingLevel) -> JsonValue {
    match level {
        ScaffoldingLevel::Hint => json!({
            "question": "What prior concept can explain this new concept?",
            "connected_concept": "Prerequisites",
        }),
        ScaffoldingLevel::Decompose => json!({
            "sub_concepts": ["Foundation", "Core Principle", "Application"],
            "suggested_notes": [
                { "template_type": TemplateType::Cornell, "subject": "General" }
            ],
        }),
        ScaffoldingLevel::Simplify => json!({
            "analogy": "Think in smaller chunks and map one concept to one location first.",
            "visual_url": "",
            "simplified_explanation": "Start from one anchor and expand outward.",
        }),
    }
}

/// Scaffolding offered for a trigger reason.
pub fn trigger(reason: TriggerReason) -> ScaffoldingResponse {
    let level = level_for(reason);
    ScaffoldingResponse {
        level,
        content: content_for(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_to_level_mapping() {
        assert_eq!(level_for(TriggerReason::CliOverload), ScaffoldingLevel::Simplify);
        assert_eq!(level_for(TriggerReason::ZpdNotReady), ScaffoldingLevel::Decompose);
        assert_eq!(level_for(TriggerReason::StudentRequest), ScaffoldingLevel::Hint);
        assert_eq!(level_for(TriggerReason::Other), ScaffoldingLevel::Hint);
    }

    #[test]
    fn test_hint_content() {
        let response = trigger(TriggerReason::StudentRequest);
        assert_eq!(response.content["connected_concept"], "Prerequisites");
        assert!(response.content["question"].is_string());
    }

    #[test]
    fn test_decompose_content_suggests_cornell_note() {
        let response = trigger(TriggerReason::ZpdNotReady);
        assert_eq!(response.content["sub_concepts"].as_array().unwrap().len(), 3);
        assert_eq!(
            response.content["suggested_notes"][0]["template_type"],
            "cornell"
        );
    }

    #[test]
    fn test_simplify_content() {
        let response = trigger(TriggerReason::CliOverload);
        assert_eq!(response.level, ScaffoldingLevel::Simplify);
        assert_eq!(response.content["visual_url"], "");
        assert!(response.content.get("analogy").is_some());
        assert!(response.content.get("simplified_explanation").is_some());
    }

    #[test]
    fn test_trigger_is_deterministic() {
        assert_eq!(trigger(TriggerReason::Other), trigger(TriggerReason::Other));
    }
}
