//! Badge registry: a fixed catalog of achievements with a one-way unlock
//! state machine (locked -> unlocked, never back).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const FIRST_STEPS: &str = "first-steps";
pub const QUIZ_MASTER: &str = "quiz-master";
pub const PERFECTIONIST: &str = "perfectionist";
pub const STRATEGIST: &str = "strategist";
pub const STREAK_5: &str = "streak-5";
pub const STREAK_7: &str = "streak-7";
pub const STREAK_10: &str = "streak-10";

/// Per-user unlock state for one catalog badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeStatus {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}

struct BadgeDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
}

// `quiz-master` and `strategist` are catalog-defined but currently have no
// trigger wired up anywhere; they stay permanently locked.
static CATALOG: Lazy<Vec<BadgeDef>> = Lazy::new(|| {
    vec![
        BadgeDef {
            id: FIRST_STEPS,
            name: "First Steps",
            description: "Complete your first lesson",
            icon: "🎯",
        },
        BadgeDef {
            id: QUIZ_MASTER,
            name: "Quiz Master",
            description: "Pass 10 quizzes",
            icon: "🏆",
        },
        BadgeDef {
            id: PERFECTIONIST,
            name: "Perfectionist",
            description: "Get a perfect quiz score",
            icon: "⭐",
        },
        BadgeDef {
            id: STRATEGIST,
            name: "Strategist",
            description: "Master all 3 strategies",
            icon: "🎓",
        },
        BadgeDef {
            id: STREAK_5,
            name: "5-Day Streak",
            description: "5 consecutive days of activity",
            icon: "🔥",
        },
        BadgeDef {
            id: STREAK_7,
            name: "Perfect Week",
            description: "7 consecutive days of activity",
            icon: "🌟",
        },
        BadgeDef {
            id: STREAK_10,
            name: "10-Day Streak",
            description: "10 consecutive days of activity",
            icon: "💫",
        },
    ]
});

/// The fresh all-locked badge list, in catalog order.
pub fn badge_catalog() -> Vec<BadgeStatus> {
    CATALOG
        .iter()
        .map(|def| BadgeStatus {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            unlocked: false,
        })
        .collect()
}

/// Whether `id` names a catalog badge.
pub fn is_known_badge(id: &str) -> bool {
    CATALOG.iter().any(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_locked_badges() {
        let catalog = badge_catalog();
        assert_eq!(catalog.len(), 7);
        assert!(catalog.iter().all(|b| !b.unlocked));
        assert_eq!(catalog[0].id, FIRST_STEPS);
        assert_eq!(catalog[6].id, STREAK_10);
    }

    #[test]
    fn known_badge_lookup() {
        assert!(is_known_badge("streak-7"));
        assert!(!is_known_badge("streak-42"));
    }
}
