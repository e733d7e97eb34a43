//! Display projection of extracted memory.
//!
//! [`MemoryView::from`] distinguishes three states the shell renders
//! differently: nothing extracted yet, an extraction that found nothing, and
//! an extraction with items. Only non-empty collections become sections.

use persona_types::memory::{EmotionalPattern, Fact, Memory, Preference, Scalar};

/// Shown when no extraction has happened (or the last one returned nothing).
pub const ABSENT_NOTICE: &str = "No memory extracted yet.";

/// Shown when an extraction succeeded but every collection was empty.
pub const EMPTY_NOTICE: &str = "No new memory items found in the recent messages.";

/// Headline used for items whose primary text is blank.
const MISSING_HEADLINE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Preferences,
    EmotionalPatterns,
    Facts,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Preferences => "Preferences",
            SectionKind::EmotionalPatterns => "Emotional Patterns",
            SectionKind::Facts => "Facts",
        }
    }
}

/// One rendered memory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItemView {
    pub headline: String,
    /// Labelled detail lines such as `Confidence: high`.
    pub details: Vec<String>,
    /// Supporting quote from the conversation.
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySection {
    pub kind: SectionKind,
    pub items: Vec<MemoryItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryView {
    Absent,
    Empty,
    Sections(Vec<MemorySection>),
}

impl MemoryView {
    /// The placeholder text for the two content-less states.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            MemoryView::Absent => Some(ABSENT_NOTICE),
            MemoryView::Empty => Some(EMPTY_NOTICE),
            MemoryView::Sections(_) => None,
        }
    }
}

impl From<Option<&Memory>> for MemoryView {
    fn from(memory: Option<&Memory>) -> Self {
        let Some(memory) = memory else {
            return MemoryView::Absent;
        };
        if memory.is_empty() {
            return MemoryView::Empty;
        }

        let sections = [
            section(SectionKind::Preferences, &memory.preferences, preference_item),
            section(
                SectionKind::EmotionalPatterns,
                &memory.emotional_patterns,
                pattern_item,
            ),
            section(SectionKind::Facts, &memory.facts, fact_item),
        ];
        MemoryView::Sections(sections.into_iter().flatten().collect())
    }
}

fn section<T>(
    kind: SectionKind,
    entries: &[T],
    project: fn(&T) -> MemoryItemView,
) -> Option<MemorySection> {
    if entries.is_empty() {
        return None;
    }
    Some(MemorySection {
        kind,
        items: entries.iter().map(project).collect(),
    })
}

fn headline(text: &str) -> String {
    if text.trim().is_empty() {
        MISSING_HEADLINE.to_string()
    } else {
        text.to_string()
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn scalar_detail(label: &str, value: Option<&Scalar>) -> Option<String> {
    value
        .filter(|v| v.is_present())
        .map(|v| format!("{label}: {v}"))
}

fn text_detail(label: &str, value: Option<&String>) -> Option<String> {
    non_blank(value).map(|v| format!("{label}: {v}"))
}

fn preference_item(pref: &Preference) -> MemoryItemView {
    MemoryItemView {
        headline: headline(&pref.preference),
        details: scalar_detail("Confidence", pref.confidence.as_ref())
            .into_iter()
            .collect(),
        context: non_blank(pref.context.as_ref()).map(str::to_string),
    }
}

fn pattern_item(pattern: &EmotionalPattern) -> MemoryItemView {
    let triggers = pattern
        .triggers
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|t| format!("Triggers: {}", t.join(", ")));

    MemoryItemView {
        headline: headline(&pattern.pattern),
        details: text_detail("Emotion", pattern.emotion.as_ref())
            .into_iter()
            .chain(triggers)
            .collect(),
        context: non_blank(pattern.context.as_ref()).map(str::to_string),
    }
}

fn fact_item(fact: &Fact) -> MemoryItemView {
    MemoryItemView {
        headline: headline(&fact.fact),
        details: text_detail("Category", fact.category.as_ref())
            .into_iter()
            .chain(scalar_detail("Importance", fact.importance.as_ref()))
            .collect(),
        context: non_blank(fact.context.as_ref()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_from(json: serde_json::Value) -> Memory {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_absent_memory() {
        let view = MemoryView::from(None);
        assert_eq!(view, MemoryView::Absent);
        assert_eq!(view.notice(), Some(ABSENT_NOTICE));
    }

    #[test]
    fn test_present_but_empty_memory_differs_from_absent() {
        let memory = memory_from(serde_json::json!({
            "preferences": [], "emotional_patterns": [], "facts": []
        }));
        let view = MemoryView::from(Some(&memory));
        assert_eq!(view, MemoryView::Empty);
        assert_eq!(view.notice(), Some(EMPTY_NOTICE));
        assert_ne!(view, MemoryView::from(None));
    }

    #[test]
    fn test_only_non_empty_sections_in_order() {
        let memory = memory_from(serde_json::json!({
            "facts": [{"fact": "has a dog"}],
            "preferences": [{"preference": "hiking"}]
        }));
        let MemoryView::Sections(sections) = MemoryView::from(Some(&memory)) else {
            panic!("expected sections");
        };
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [SectionKind::Preferences, SectionKind::Facts]);
        assert_eq!(sections[0].items[0].headline, "hiking");
        assert!(sections[0].items[0].details.is_empty());
        assert!(sections[0].items[0].context.is_none());
    }

    #[test]
    fn test_item_details() {
        let memory = memory_from(serde_json::json!({
            "preferences": [{"preference": "tea", "confidence": "high", "context": "I drink tea daily"}],
            "emotional_patterns": [{"pattern": "", "emotion": "anxiety", "triggers": ["exams", "deadlines"]}],
            "facts": [{"fact": "works remotely", "category": "professional", "importance": 0}]
        }));
        let MemoryView::Sections(sections) = MemoryView::from(Some(&memory)) else {
            panic!("expected sections");
        };

        let pref = &sections[0].items[0];
        assert_eq!(pref.details, ["Confidence: high"]);
        assert_eq!(pref.context.as_deref(), Some("I drink tea daily"));

        let pattern = &sections[1].items[0];
        assert_eq!(pattern.headline, "N/A");
        assert_eq!(pattern.details, ["Emotion: anxiety", "Triggers: exams, deadlines"]);

        // Zero importance is treated as absent.
        let fact = &sections[2].items[0];
        assert_eq!(fact.details, ["Category: professional"]);
    }

    #[test]
    fn test_empty_triggers_hidden() {
        let memory = memory_from(serde_json::json!({
            "emotional_patterns": [{"pattern": "calm on weekends", "triggers": []}]
        }));
        let MemoryView::Sections(sections) = MemoryView::from(Some(&memory)) else {
            panic!("expected sections");
        };
        assert!(sections[0].items[0].details.is_empty());
        assert_eq!(sections[0].kind.title(), "Emotional Patterns");
    }
}
