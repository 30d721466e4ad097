//! Process-local store holding every MemoGlobe entity.
//!
//! Nothing here is persisted. One `InMemoryStore` is built per server process
//! and handed to the request layer, which serializes mutations around it.
//! Operations never fail: absence is reported as `None`, an empty list, or a
//! freshly seeded default, and the caller decides whether that is a 404.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

use crate::defaults;
use crate::models::*;
use crate::seed;
use crate::validation::RecallQuality;

/// Quest slots handed out every day: type and the Bloom level it pushes toward.
const QUEST_SLOTS: [(QuestType, BloomLevel); defaults::DAILY_QUEST_COUNT] = [
    (QuestType::GapReview, BloomLevel::Understand),
    (QuestType::BloomPush, BloomLevel::Analyze),
    (QuestType::NewExplore, BloomLevel::Apply),
];

/// Bloom levels the journey route walks through.
const ROUTE_PROGRESSION: [BloomLevel; 3] = [
    BloomLevel::Remember,
    BloomLevel::Understand,
    BloomLevel::Apply,
];

/// Days until the next review for a recall quality. Values outside the table
/// fall back to one day.
pub fn review_spacing_days(recall_quality: i64) -> i64 {
    defaults::REVIEW_SPACING_DAYS
        .iter()
        .find(|(q, _)| i64::from(*q) == recall_quality)
        .map(|(_, days)| *days)
        .unwrap_or(defaults::REVIEW_SPACING_FALLBACK_DAYS)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug)]
pub struct InMemoryStore {
    /// Insertion order.
    notes: Vec<Note>,
    analysis_by_note: HashMap<Uuid, AnalysisReport>,
    /// Insertion order.
    anchors: Vec<Anchor>,
    review_log: HashMap<Uuid, Vec<ReviewEvent>>,
    route_id: Uuid,
    quest_ids: [Uuid; defaults::DAILY_QUEST_COUNT],
    completed_quests: HashSet<Uuid>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// A store seeded with the historical Quantum Mechanics anchor.
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.anchors.push(seed::anchor(Utc::now()));
        store
    }

    /// A store with no notes and no anchors.
    pub fn empty() -> Self {
        Self {
            notes: Vec::new(),
            analysis_by_note: HashMap::new(),
            anchors: Vec::new(),
            review_log: HashMap::new(),
            route_id: Uuid::new_v4(),
            quest_ids: [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()],
            completed_quests: HashSet::new(),
        }
    }

    // =========================================================================
    // NOTES
    // =========================================================================

    /// Store a note and its seeded analysis.
    pub fn create_note(
        &mut self,
        template_type: TemplateType,
        subject: impl Into<String>,
        content: HashMap<String, JsonValue>,
    ) -> Note {
        let note = Note {
            id: Uuid::new_v4(),
            template_type,
            subject: subject.into(),
            content,
            extracted_concepts: defaults::PLACEHOLDER_CONCEPTS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            session_number: u32::try_from(self.notes.len() + 1).unwrap_or(u32::MAX),
            created_at: Utc::now(),
        };
        self.analysis_by_note.insert(note.id, seed::analysis());
        self.notes.push(note.clone());
        debug!(note_id = %note.id, session_number = note.session_number, "Note stored");
        note
    }

    /// Notes newest first, optionally restricted to one subject. Notes created
    /// at the same instant keep their insertion order.
    pub fn list_notes(&self, subject: Option<&str>) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|n| match subject {
                Some(s) if !s.is_empty() => n.subject == s,
                _ => true,
            })
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }

    pub fn note(&self, note_id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    pub fn contains_note(&self, note_id: Uuid) -> bool {
        self.note(note_id).is_some()
    }

    /// Look a note up by its textual id, creating a generic cornell note when
    /// nothing matches. Only the canonical lowercase hyphenated form matches.
    pub fn note_or_fallback(&mut self, raw_id: &str) -> Note {
        let existing = self
            .notes
            .iter()
            .find(|n| n.id.hyphenated().to_string() == raw_id)
            .cloned();
        match existing {
            Some(note) => note,
            None => {
                debug!(requested = raw_id, "No note for id, synthesizing generic note");
                self.create_note(
                    TemplateType::Cornell,
                    defaults::FALLBACK_NOTE_SUBJECT,
                    seed::fallback_note_content(),
                )
            }
        }
    }

    /// Stored analysis, or a freshly seeded one for unknown ids.
    pub fn get_analysis(&self, note_id: Uuid) -> AnalysisReport {
        self.analysis_by_note
            .get(&note_id)
            .cloned()
            .unwrap_or_else(seed::analysis)
    }

    // =========================================================================
    // ANCHORS
    // =========================================================================

    pub fn list_anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor(&self, anchor_id: Uuid) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == anchor_id)
    }

    /// Bind a concept to a user-chosen place at full strength.
    pub fn create_personal_anchor(
        &mut self,
        concept_id: Uuid,
        latitude: f64,
        longitude: f64,
        name: impl Into<String>,
    ) -> Anchor {
        let anchor = Anchor {
            id: Uuid::new_v4(),
            concept: Concept {
                id: concept_id,
                name: "Personal Concept".to_string(),
                aliases: Vec::new(),
                domain: "general".to_string(),
                bloom_level: BloomLevel::Understand,
            },
            location: Location {
                id: Uuid::new_v4(),
                name: name.into(),
                description: String::new(),
                latitude,
                longitude,
                country: String::new(),
                location_type: "personal".to_string(),
                image_url: String::new(),
                street_view_available: false,
                metadata: HashMap::new(),
            },
            anchor_strategy: AnchorStrategy::Personal,
            strength: defaults::STRENGTH_MAX,
            pin_color: PinColor::Personal,
            review_count: 0,
            last_reviewed: Some(Utc::now()),
        };
        self.anchors.push(anchor.clone());
        debug!(anchor_id = %anchor.id, concept_id = %concept_id, "Personal anchor stored");
        anchor
    }

    /// Apply a review to an anchor and log it. The reported strength is
    /// rounded to three decimals; the stored one is not. `None` if the anchor
    /// does not exist.
    pub fn review_anchor(
        &mut self,
        anchor_id: Uuid,
        recall_quality: RecallQuality,
    ) -> Option<ReviewAnchorResponse> {
        let now = Utc::now();
        let anchor = self.anchors.iter_mut().find(|a| a.id == anchor_id)?;
        let strength = anchor.apply_review(recall_quality.get(), now);
        self.review_log.entry(anchor_id).or_default().push(ReviewEvent {
            timestamp: now,
            recall_quality: recall_quality.get(),
        });
        debug!(
            anchor_id = %anchor_id,
            recall_quality = recall_quality.get(),
            strength,
            "Anchor reviewed"
        );
        Some(ReviewAnchorResponse {
            updated_strength: round3(strength),
            next_review_at: self.next_review_at(i64::from(recall_quality.get())),
        })
    }

    /// Reviews recorded for an anchor, oldest first. An anchor never reviewed
    /// through the store reports one synthetic event at its last review time.
    pub fn review_history(&self, anchor_id: Uuid) -> Vec<ReviewEvent> {
        if let Some(events) = self.review_log.get(&anchor_id) {
            if !events.is_empty() {
                return events.clone();
            }
        }
        match self.anchor(anchor_id) {
            Some(anchor) => vec![ReviewEvent {
                timestamp: anchor.last_reviewed.unwrap_or_else(Utc::now),
                recall_quality: defaults::SYNTHETIC_RECALL_QUALITY,
            }],
            None => Vec::new(),
        }
    }

    /// When an anchor reviewed now with this quality should be seen again.
    pub fn next_review_at(&self, recall_quality: i64) -> DateTime<Utc> {
        Utc::now() + Duration::days(review_spacing_days(recall_quality))
    }

    // =========================================================================
    // JOURNEY & QUESTS
    // =========================================================================

    /// The single journey route. Its stops are every current anchor, in
    /// anchor insertion order, so they change as anchors are added.
    pub fn route(&self) -> JourneyRoute {
        JourneyRoute {
            id: self.route_id,
            estimated_minutes: defaults::ROUTE_ESTIMATED_MINUTES,
            bloom_progression: ROUTE_PROGRESSION.to_vec(),
            stops: self.anchors.iter().map(|a| a.id).collect(),
        }
    }

    /// Resolve a route's stop ids to anchors, skipping ids that no longer exist.
    pub fn route_stops(&self, route: &JourneyRoute) -> Vec<Anchor> {
        route
            .stops
            .iter()
            .filter_map(|id| self.anchor(*id).cloned())
            .collect()
    }

    /// Today's quests, rebuilt from the fixed quest ids on every call. Each
    /// quest points at the first anchor's concept and location when one
    /// exists; `completed` reflects quests completed earlier in this store's
    /// lifetime.
    pub fn daily_quests(&self) -> DailyQuestPayload {
        let first = self.anchors.first();
        let concept_id = first.map(|a| a.concept.id);
        let location_id = first.map(|a| a.location.id);

        let quests = self
            .quest_ids
            .iter()
            .zip(QUEST_SLOTS)
            .map(|(id, (quest_type, bloom_target))| DailyQuest {
                id: *id,
                quest_type,
                concept_id,
                location_id,
                bloom_target: Some(bloom_target),
                completed: self.completed_quests.contains(id),
            })
            .collect();

        DailyQuestPayload {
            date: Utc::now().date_naive(),
            quests,
            journey_route: Some(self.route()),
        }
    }

    /// Mark a quest completed. Returns the completed quest, or `None` for an
    /// id that is not one of today's quests.
    pub fn complete_quest(&mut self, quest_id: Uuid) -> Option<DailyQuest> {
        if !self.quest_ids.contains(&quest_id) {
            return None;
        }
        self.completed_quests.insert(quest_id);
        debug!(quest_id = %quest_id, "Quest completed");
        self.daily_quests()
            .quests
            .into_iter()
            .find(|q| q.id == quest_id)
    }

    // =========================================================================
    // METACOGNITION
    // =========================================================================

    pub fn dashboard(&self) -> MetacogDashboard {
        seed::dashboard()
    }

    pub fn knowledge_map(&self) -> Vec<KnowledgeRegion> {
        seed::knowledge_regions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content() -> HashMap<String, JsonValue> {
        HashMap::from([("main_notes".to_string(), json!("Bohr model"))])
    }

    fn quality(q: i64) -> RecallQuality {
        RecallQuality::new(q).unwrap()
    }

    #[test]
    fn test_new_store_has_seed_anchor() {
        let store = InMemoryStore::new();
        let anchors = store.list_anchors();
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].concept.name, "Quantum Mechanics");
        assert_eq!(anchors[0].anchor_strategy, AnchorStrategy::Historical);
        assert_eq!(anchors[0].strength, 0.82);
    }

    #[test]
    fn test_create_note_assigns_sequential_sessions() {
        let mut store = InMemoryStore::new();
        let a = store.create_note(TemplateType::Cornell, "Physics", content());
        let b = store.create_note(TemplateType::Outline, "Biology", HashMap::new());
        assert_ne!(a.id, b.id);
        assert_eq!(a.session_number, 1);
        assert_eq!(b.session_number, 2);
        assert_eq!(
            a.extracted_concepts,
            vec!["Placeholder Concept A", "Placeholder Concept B"]
        );
        assert!(store.contains_note(a.id));
        assert_eq!(store.note(b.id).map(|n| n.subject.as_str()), Some("Biology"));
    }

    #[test]
    fn test_create_note_seeds_analysis() {
        let mut store = InMemoryStore::new();
        let note = store.create_note(TemplateType::Zettelkasten, "Physics", content());
        let report = store.get_analysis(note.id);
        assert_eq!(report.srs_score, 0.08);
        assert_eq!(report.kcs_score, 0.72);
        assert_eq!(report.cli_score, 0.45);
    }

    #[test]
    fn test_get_analysis_unknown_id_returns_seed() {
        let store = InMemoryStore::new();
        let report = store.get_analysis(Uuid::new_v4());
        assert_eq!(report, seed::analysis());
    }

    #[test]
    fn test_list_notes_newest_first_and_filtered() {
        let mut store = InMemoryStore::new();
        let first = store.create_note(TemplateType::Cornell, "Physics", content());
        let second = store.create_note(TemplateType::Cornell, "Biology", content());
        let third = store.create_note(TemplateType::Cornell, "Physics", content());

        let all = store.list_notes(None);
        assert_eq!(all.len(), 3);
        for pair in all.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }

        let physics: Vec<Uuid> = store.list_notes(Some("Physics")).iter().map(|n| n.id).collect();
        assert_eq!(physics.len(), 2);
        assert!(physics.contains(&first.id));
        assert!(physics.contains(&third.id));
        assert!(!physics.contains(&second.id));

        assert!(store.list_notes(Some("Chemistry")).is_empty());
        assert_eq!(store.list_notes(Some("")).len(), 3);
    }

    #[test]
    fn test_note_or_fallback_returns_existing() {
        let mut store = InMemoryStore::new();
        let note = store.create_note(TemplateType::Outline, "History", content());
        let found = store.note_or_fallback(&note.id.to_string());
        assert_eq!(found.id, note.id);
        assert_eq!(store.list_notes(None).len(), 1);
    }

    #[test]
    fn test_note_or_fallback_only_matches_canonical_id() {
        let mut store = InMemoryStore::empty();
        let note = store.create_note(TemplateType::Cornell, "Physics", content());
        let upper = note.id.to_string().to_uppercase();
        let simple = note.id.simple().to_string();

        for raw in [upper.as_str(), simple.as_str()] {
            let found = store.note_or_fallback(raw);
            assert_ne!(found.id, note.id, "{raw} should not resolve");
            assert_eq!(found.subject, defaults::FALLBACK_NOTE_SUBJECT);
        }
        assert_eq!(store.note_or_fallback(&note.id.to_string()).id, note.id);
    }

    #[test]
    fn test_note_or_fallback_synthesizes_generic_note() {
        let mut store = InMemoryStore::new();
        let note = store.note_or_fallback("no-such-note");
        assert_eq!(note.template_type, TemplateType::Cornell);
        assert_eq!(note.subject, "General");
        assert_eq!(note.content, seed::fallback_note_content());
        assert!(store.contains_note(note.id));
    }

    #[test]
    fn test_create_personal_anchor() {
        let mut store = InMemoryStore::new();
        let concept_id = Uuid::new_v4();
        let anchor = store.create_personal_anchor(concept_id, 48.8584, 2.2945, "Eiffel Tower");
        assert_eq!(anchor.concept.id, concept_id);
        assert_eq!(anchor.concept.name, "Personal Concept");
        assert_eq!(anchor.location.name, "Eiffel Tower");
        assert_eq!(anchor.location.location_type, "personal");
        assert_eq!(anchor.anchor_strategy, AnchorStrategy::Personal);
        assert_eq!(anchor.pin_color, PinColor::Personal);
        assert_eq!(anchor.strength, 1.0);
        assert_eq!(anchor.review_count, 0);

        let ids: Vec<Uuid> = store.list_anchors().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], anchor.id);
    }

    #[test]
    fn test_review_anchor_unknown_id() {
        let mut store = InMemoryStore::new();
        assert!(store.review_anchor(Uuid::new_v4(), quality(5)).is_none());
    }

    #[test]
    fn test_review_anchor_three_perfect_recalls_from_seed() {
        let mut store = InMemoryStore::new();
        let id = store.list_anchors()[0].id;
        let reported: Vec<f64> = (0..3)
            .map(|_| store.review_anchor(id, quality(5)).unwrap().updated_strength)
            .collect();
        assert_eq!(reported, vec![0.88, 0.94, 1.0]);
        let anchor = store.anchor(id).unwrap();
        assert_eq!(anchor.review_count, 7);
    }

    #[test]
    fn test_review_anchor_strength_never_leaves_bounds() {
        let mut store = InMemoryStore::new();
        let id = store.list_anchors()[0].id;

        let mut previous = store.anchor(id).unwrap().strength;
        for _ in 0..40 {
            let s = store.review_anchor(id, quality(1)).unwrap().updated_strength;
            assert!(s <= previous);
            assert!(s >= 0.2);
            previous = s;
        }
        assert_eq!(previous, 0.2);

        for _ in 0..40 {
            let s = store.review_anchor(id, quality(5)).unwrap().updated_strength;
            assert!(s >= previous);
            assert!(s <= 1.0);
            previous = s;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_review_history_synthetic_then_recorded() {
        let mut store = InMemoryStore::new();
        let id = store.list_anchors()[0].id;

        let synthetic = store.review_history(id);
        assert_eq!(synthetic.len(), 1);
        assert_eq!(synthetic[0].recall_quality, 4);

        store.review_anchor(id, quality(2));
        store.review_anchor(id, quality(5));
        let history = store.review_history(id);
        let qualities: Vec<u8> = history.iter().map(|e| e.recall_quality).collect();
        assert_eq!(qualities, vec![2, 5]);
        assert!(history[0].timestamp <= history[1].timestamp);
        assert_eq!(store.anchor(id).unwrap().last_reviewed, Some(history[1].timestamp));

        assert!(store.review_history(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_review_spacing_table() {
        assert_eq!(review_spacing_days(1), 1);
        assert_eq!(review_spacing_days(2), 1);
        assert_eq!(review_spacing_days(3), 3);
        assert_eq!(review_spacing_days(4), 7);
        assert_eq!(review_spacing_days(5), 14);
        assert_eq!(review_spacing_days(0), 1);
        assert_eq!(review_spacing_days(6), 1);
        assert_eq!(review_spacing_days(-7), 1);
    }

    #[test]
    fn test_review_schedules_next_review_by_quality() {
        let mut store = InMemoryStore::new();
        let id = store.list_anchors()[0].id;
        for (q, days) in [(1, 1), (2, 1), (3, 3), (4, 7), (5, 14)] {
            let before = Utc::now();
            let response = store.review_anchor(id, quality(q)).unwrap();
            let after = Utc::now();
            assert!(response.next_review_at >= before + Duration::days(days));
            assert!(response.next_review_at <= after + Duration::days(days));
        }
    }

    #[test]
    fn test_next_review_at_outside_table_is_one_day() {
        let store = InMemoryStore::new();
        for q in [0, 6, 42, -1] {
            let before = Utc::now();
            let at = store.next_review_at(q);
            assert!(at >= before + Duration::days(1));
            assert!(at <= Utc::now() + Duration::days(1));
        }
    }

    #[test]
    fn test_route_tracks_current_anchors() {
        let mut store = InMemoryStore::new();
        let route = store.route();
        assert_eq!(route.stops.len(), 1);
        assert_eq!(route.estimated_minutes, 45);
        assert_eq!(
            route.bloom_progression,
            vec![BloomLevel::Remember, BloomLevel::Understand, BloomLevel::Apply]
        );

        let added = store.create_personal_anchor(Uuid::new_v4(), 0.0, 0.0, "Null Island");
        let again = store.route();
        assert_eq!(again.id, route.id);
        assert_eq!(again.stops.len(), 2);
        assert_eq!(again.stops[1], added.id);
        assert_eq!(store.route_stops(&again).len(), 2);
    }

    #[test]
    fn test_daily_quests_stable_ids() {
        let store = InMemoryStore::new();
        let first = store.daily_quests();
        let second = store.daily_quests();
        let ids_a: Vec<Uuid> = first.quests.iter().map(|q| q.id).collect();
        let ids_b: Vec<Uuid> = second.quests.iter().map(|q| q.id).collect();
        assert_eq!(ids_a.len(), 3);
        assert_eq!(ids_a, ids_b);
        assert!(first.quests.iter().all(|q| !q.completed));
        assert_eq!(first.quests[0].quest_type, QuestType::GapReview);
        assert_eq!(first.quests[1].bloom_target, Some(BloomLevel::Analyze));
        assert_eq!(first.quests[2].quest_type, QuestType::NewExplore);
        assert_eq!(first.date, Utc::now().date_naive());
        assert!(first.journey_route.is_some());
    }

    #[test]
    fn test_daily_quests_reference_first_anchor() {
        let store = InMemoryStore::new();
        let anchor = &store.list_anchors()[0];
        for quest in store.daily_quests().quests {
            assert_eq!(quest.concept_id, Some(anchor.concept.id));
            assert_eq!(quest.location_id, Some(anchor.location.id));
        }
    }

    #[test]
    fn test_daily_quests_without_anchors() {
        let store = InMemoryStore::empty();
        for quest in store.daily_quests().quests {
            assert!(quest.concept_id.is_none());
            assert!(quest.location_id.is_none());
        }
        assert!(store.route().stops.is_empty());
    }

    #[test]
    fn test_complete_quest_persists() {
        let mut store = InMemoryStore::new();
        let quest_id = store.daily_quests().quests[1].id;
        let completed = store.complete_quest(quest_id).unwrap();
        assert!(completed.completed);
        assert_eq!(completed.id, quest_id);

        let quests = store.daily_quests().quests;
        assert!(quests[1].completed);
        assert!(!quests[0].completed);
        assert!(!quests[2].completed);
    }

    #[test]
    fn test_complete_unknown_quest() {
        let mut store = InMemoryStore::new();
        assert!(store.complete_quest(Uuid::new_v4()).is_none());
        assert!(store.daily_quests().quests.iter().all(|q| !q.completed));
    }

    #[test]
    fn test_dashboard_and_knowledge_map_are_static() {
        let store = InMemoryStore::new();
        assert_eq!(store.dashboard(), store.dashboard());
        let dashboard = store.dashboard();
        assert_eq!(dashboard.streak, 7);
        assert_eq!(dashboard.evolution_index, 0.68);
        assert_eq!(dashboard.kcs_by_subject.len(), 2);
        assert_eq!(dashboard.cli_trend.len(), 3);
        assert_eq!(store.knowledge_map().len(), 2);
    }
}
