//! Built-in personality catalog.
//!
//! Personalities are process-wide constants. The session controller only
//! passes the selected id through to the service.

use serde::Serialize;

/// Id of the personality selected when a session starts.
pub const DEFAULT_PERSONALITY_ID: &str = "calm_mentor";

/// A selectable response style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Personality {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const CATALOG: [Personality; 3] = [
    Personality {
        id: "calm_mentor",
        name: "Calm Mentor",
        description: "Patient, wise, and supportive guide",
    },
    Personality {
        id: "witty_friend",
        name: "Witty Friend",
        description: "Fun, humorous, and engaging companion",
    },
    Personality {
        id: "therapist",
        name: "Therapist",
        description: "Professional, empathetic listener",
    },
];

/// All catalog entries in display order.
pub fn all() -> &'static [Personality] {
    &CATALOG
}

/// The personality a new session starts with.
pub fn default_personality() -> &'static Personality {
    &CATALOG[0]
}

/// Look up a personality by id.
///
/// Matching is case-insensitive and treats `-` and spaces like `_`, so
/// `"Witty Friend"` and `"witty-friend"` both resolve to `witty_friend`.
pub fn find(id: &str) -> Option<&'static Personality> {
    let normalized: String = id
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect();
    CATALOG.iter().find(|p| p.id == normalized)
}

/// Human-readable label for a personality id.
///
/// Uses the catalog name when the id is known; otherwise replaces
/// underscores with spaces and capitalises each word.
pub fn display_label(id: &str) -> String {
    if let Some(personality) = find(id) {
        return personality.name.to_string();
    }

    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_calm_mentor() {
        assert_eq!(default_personality().id, DEFAULT_PERSONALITY_ID);
        assert_eq!(default_personality().name, "Calm Mentor");
    }

    #[test]
    fn test_catalog_order() {
        let ids: Vec<&str> = all().iter().map(|p| p.id).collect();
        assert_eq!(ids, ["calm_mentor", "witty_friend", "therapist"]);
    }

    #[test]
    fn test_find_is_lenient() {
        assert_eq!(find("therapist").unwrap().name, "Therapist");
        assert_eq!(find("Witty Friend").unwrap().id, "witty_friend");
        assert_eq!(find("calm-mentor").unwrap().id, "calm_mentor");
        assert!(find("pirate").is_none());
    }

    #[test]
    fn test_display_label_known_and_unknown() {
        assert_eq!(display_label("witty_friend"), "Witty Friend");
        assert_eq!(display_label("grumpy_old_wizard"), "Grumpy Old Wizard");
        assert_eq!(display_label("stoic"), "Stoic");
    }
}
