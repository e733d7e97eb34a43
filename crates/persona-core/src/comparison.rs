//! Before/after comparison view.
//!
//! Pairs the default-persona reply with the selected-persona reply from the
//! last successful chat exchange.

use persona_types::chat::Comparison;

use crate::personality::display_label;

pub const BEFORE_TITLE: &str = "Before (Default)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonView {
    pub before_title: &'static str,
    pub before: String,
    /// `After (<Persona>)`.
    pub after_title: String,
    pub after: String,
}

impl From<&Comparison> for ComparisonView {
    fn from(comparison: &Comparison) -> Self {
        Self {
            before_title: BEFORE_TITLE,
            before: comparison.before_response.clone(),
            after_title: format!("After ({})", display_label(&comparison.personality)),
            after: comparison.after_response.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(personality: &str) -> Comparison {
        Comparison {
            personality: personality.to_string(),
            response: "Nice!".to_string(),
            before_response: "B".to_string(),
            after_response: "Nice!".to_string(),
        }
    }

    #[test]
    fn test_view_uses_catalog_name() {
        let view = ComparisonView::from(&comparison("therapist"));
        assert_eq!(view.before_title, "Before (Default)");
        assert_eq!(view.before, "B");
        assert_eq!(view.after_title, "After (Therapist)");
        assert_eq!(view.after, "Nice!");
    }

    #[test]
    fn test_view_humanizes_unknown_persona() {
        let view = ComparisonView::from(&comparison("life_coach"));
        assert_eq!(view.after_title, "After (Life Coach)");
    }
}
