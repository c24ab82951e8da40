//! The per-user game state snapshot and its basic mutations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::badges::{badge_catalog, BadgeStatus};
use super::level::level_for;

/// Authoritative per-user gamification state.
///
/// Owned and threaded through operations explicitly; no ambient singletons.
/// Mutations keep `level` derived from `points` and the badge id set equal to
/// the catalog's at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProfile {
    pub points: u32,
    pub level: u32,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_date: Option<NaiveDate>,
    pub badges: Vec<BadgeStatus>,
    /// Course identifier -> completion percent (0-100)
    pub progress: BTreeMap<String, u8>,
}

impl Default for GameProfile {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            streak: 0,
            last_active_date: None,
            badges: badge_catalog(),
            progress: BTreeMap::new(),
        }
    }
}

impl GameProfile {
    /// Add points and rederive the level. Point totals only ever grow through
    /// public operations; decreases are not a supported use case.
    pub fn add_points(&mut self, amount: u32) {
        self.points += amount;
        self.level = level_for(self.points);
    }

    /// Unlock a badge by id. Idempotent; unknown ids are a no-op.
    /// Returns true only when the badge was newly unlocked.
    pub fn unlock_badge(&mut self, badge_id: &str) -> bool {
        match self.badges.iter_mut().find(|b| b.id == badge_id) {
            Some(badge) if !badge.unlocked => {
                badge.unlocked = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_unlocked(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id && b.unlocked)
    }

    /// Store a course completion percent, clamped to 0-100.
    pub fn update_progress(&mut self, course_id: &str, percent: f64) {
        let clamped = percent.clamp(0.0, 100.0).round() as u8;
        self.progress.insert(course_id.to_string(), clamped);
    }
}
